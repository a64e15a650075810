//! Storage backend abstraction for variant files.
//!
//! A storage backend maps a dataset id, as it appears in a request path, to
//! a [`ResourceLocator`] that the readers can open.
//!
//! # Implementations
//!
//! - [`LocalStorage`] - Local filesystem storage
//!
//! # Example
//!
//! ```no_run
//! use vcf_intervals::storage::{LocalStorage, Storage};
//! use std::path::PathBuf;
//!
//! let storage = LocalStorage::new(PathBuf::from("./data"));
//! let locator = storage.resolve("sample").unwrap();
//! ```

mod local;

pub use local::LocalStorage;

use crate::{Result, locator::ResourceLocator};

/// Storage backend trait for locating variant files
pub trait Storage: Send + Sync {
    /// Check if a dataset exists
    fn exists(&self, id: &str) -> bool;

    /// Locate the file backing a dataset
    fn resolve(&self, id: &str) -> Result<ResourceLocator>;
}
