//! Index discovery and loading.
//!
//! An explicit index always wins. Otherwise the conventional locations next
//! to the data file are tried, appended (`calls.vcf.gz.tbi`) before replaced
//! (`calls.vcf.tbi`): tabix then CSI for VCF, CSI only for BCF.

use super::DecodingStrategy;
use crate::locator::ResourceLocator;
use crate::{Error, Operation, Result};
use noodles::{csi, tabix};
use std::path::{Path, PathBuf};

/// A loaded binning index.
pub enum VariantIndex {
    Tabix(tabix::Index),
    Csi(csi::Index),
}

impl VariantIndex {
    pub fn kind(&self) -> &'static str {
        match self {
            VariantIndex::Tabix(_) => "tabix",
            VariantIndex::Csi(_) => "csi",
        }
    }
}

fn index_extensions(strategy: DecodingStrategy) -> &'static [&'static str] {
    match strategy {
        DecodingStrategy::Textual => &["tbi", "csi"],
        DecodingStrategy::Binary => &["csi"],
    }
}

/// Search the default index locations for `data_path`.
pub fn find_default(data_path: &Path, strategy: DecodingStrategy) -> Option<PathBuf> {
    for ext in index_extensions(strategy) {
        // Try appended index first (e.g., file.vcf.gz.tbi)
        let appended = PathBuf::from(format!("{}.{}", data_path.display(), ext));
        if appended.exists() {
            return Some(appended);
        }

        // Try replaced extension (e.g., file.vcf.tbi)
        let replaced = data_path.with_extension(ext);
        if replaced.exists() {
            return Some(replaced);
        }
    }
    None
}

/// Pick the index path: the explicit one if given, else a default location.
pub fn resolve(
    data_path: &Path,
    explicit: Option<&ResourceLocator>,
    strategy: DecodingStrategy,
) -> Result<Option<PathBuf>> {
    let path = match explicit {
        Some(locator) => Some(locator.to_local_path()?),
        None => find_default(data_path, strategy),
    };
    tracing::debug!(data = %data_path.display(), index = ?path, "resolved index location");
    Ok(path)
}

/// Read the index at `path`. BCF files only take CSI indexes; for VCF the
/// `.csi` suffix selects CSI and anything else is read as tabix.
pub fn read(path: &Path, strategy: DecodingStrategy) -> Result<VariantIndex> {
    let is_csi = match strategy {
        DecodingStrategy::Binary => true,
        DecodingStrategy::Textual => path.extension().is_some_and(|ext| ext == "csi"),
    };

    if is_csi {
        csi::read(path)
            .map(VariantIndex::Csi)
            .map_err(|e| Error::resource(Operation::Open, e))
    } else {
        tabix::read(path)
            .map(VariantIndex::Tabix)
            .map_err(|e| Error::resource(Operation::Open, e))
    }
}

/// Resolve and read the index for a resource, enforcing `require_index`.
pub(super) fn load(
    data_path: &Path,
    explicit: Option<&ResourceLocator>,
    strategy: DecodingStrategy,
    require_index: bool,
    locator: &ResourceLocator,
) -> Result<Option<VariantIndex>> {
    let path = match resolve(data_path, explicit, strategy)? {
        Some(path) => path,
        None if require_index => return Err(Error::IndexRequired(locator.to_string())),
        None => return Ok(None),
    };

    match read(&path, strategy) {
        Ok(index) => Ok(Some(index)),
        // A stale index found next to the file only matters when queries need it.
        Err(e) if explicit.is_none() && !require_index => {
            tracing::warn!(index = %path.display(), error = %e, "ignoring unreadable index");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
