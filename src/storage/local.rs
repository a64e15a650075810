use super::Storage;
use crate::{Error, Result, locator::ResourceLocator};
use std::path::{Path, PathBuf};

/// File extensions tried, in order, when resolving a dataset id.
const EXTENSIONS: &[&str] = &["vcf.gz", "vcf", "bcf"];

pub struct LocalStorage {
    data_dir: PathBuf,
}

impl LocalStorage {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn find_file(&self, id: &str) -> Result<Option<PathBuf>> {
        validate_id(id)?;
        Ok(EXTENSIONS
            .iter()
            .map(|ext| self.data_dir.join(format!("{}.{}", id, ext)))
            .find(|path| path.is_file()))
    }
}

impl Storage for LocalStorage {
    fn exists(&self, id: &str) -> bool {
        matches!(self.find_file(id), Ok(Some(_)))
    }

    fn resolve(&self, id: &str) -> Result<ResourceLocator> {
        self.find_file(id)?
            .map(ResourceLocator::from)
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }
}

/// Ids name files directly under the data directory.
fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() || id.contains(['/', '\\']) || id.starts_with('.') {
        return Err(Error::InvalidInput(format!("invalid dataset id: {}", id)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_resolve_prefers_compressed_vcf() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("sample.vcf"), b"").unwrap();
        fs::write(dir.path().join("sample.vcf.gz"), b"").unwrap();

        let storage = LocalStorage::new(dir.path().to_path_buf());
        let locator = storage.resolve("sample").unwrap();
        assert!(locator.as_str().ends_with("sample.vcf.gz"));
    }

    #[test]
    fn test_resolve_bcf() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("calls.bcf"), b"").unwrap();

        let storage = LocalStorage::new(dir.path().to_path_buf());
        assert!(storage.exists("calls"));
        assert!(storage.resolve("calls").unwrap().is_bcf());
    }

    #[test]
    fn test_resolve_missing() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().to_path_buf());
        assert!(!storage.exists("nothing"));
        assert!(matches!(
            storage.resolve("nothing"),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_rejects_path_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().to_path_buf());
        assert!(matches!(
            storage.resolve("../etc/passwd"),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(storage.resolve(".."), Err(Error::InvalidInput(_))));
        assert!(!storage.exists("a/b"));
    }
}
