//! Resource locators for variant files.
//!
//! A locator is either an absolute URI (`file:///data/calls.bcf`,
//! `https://host/calls.vcf.gz?token=..`) or a bare filesystem path. Bare paths
//! are read as relative URI references, so a `?` starts a query and a `#`
//! starts a fragment in both forms.

use crate::{Error, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLocator {
    raw: String,
    url: Option<Url>,
    path: String,
}

impl ResourceLocator {
    pub fn parse(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(Error::InvalidInput("empty resource locator".to_string()));
        }

        // Single-letter schemes are Windows drive letters, not URIs.
        if let Ok(url) = Url::parse(s) {
            if url.scheme().len() > 1 {
                let path = url.path().to_string();
                return Ok(Self {
                    raw: s.to_string(),
                    url: Some(url),
                    path,
                });
            }
        }

        let end = s.find(['?', '#']).unwrap_or(s.len());
        Ok(Self {
            raw: s.to_string(),
            url: None,
            path: s[..end].to_string(),
        })
    }

    /// The locator exactly as supplied.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Path component without query or fragment, never percent-decoded.
    pub fn raw_path(&self) -> &str {
        &self.path
    }

    pub fn scheme(&self) -> Option<&str> {
        self.url.as_ref().map(Url::scheme)
    }

    /// Whether the path names a BCF file. Literal, case-sensitive suffix match.
    pub fn is_bcf(&self) -> bool {
        self.path.ends_with(".bcf")
    }

    /// Resolve to a filesystem path. Only `file:` URIs and bare paths resolve.
    pub fn to_local_path(&self) -> Result<PathBuf> {
        match &self.url {
            None => Ok(PathBuf::from(&self.path)),
            Some(url) if url.scheme() == "file" => url
                .to_file_path()
                .map_err(|_| Error::UnsupportedLocator(self.raw.clone())),
            Some(_) => Err(Error::UnsupportedLocator(self.raw.clone())),
        }
    }
}

impl FromStr for ResourceLocator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<&Path> for ResourceLocator {
    fn from(path: &Path) -> Self {
        let raw = path.to_string_lossy().into_owned();
        Self {
            path: raw.clone(),
            raw,
            url: None,
        }
    }
}

impl From<PathBuf> for ResourceLocator {
    fn from(path: PathBuf) -> Self {
        Self::from(path.as_path())
    }
}

impl fmt::Display for ResourceLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
