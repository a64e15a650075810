//! # vcf-intervals
//!
//! Turn the records of a VCF or BCF file into a named interval list.
//!
//! The codec is picked from the locator: a path ending in `.bcf` is read as
//! BCF, anything else as VCF. Each record that passes the filter becomes one
//! interval named after its ID, or `interval-N` when it has none.
//!
//! ## Modules
//!
//! - [`locator`]: Resource locators (paths and URIs)
//! - [`formats`]: Decoding strategy selection and noodles-backed readers
//! - [`reader`]: [`VariantReader`], the high-level reader
//! - [`intervals`]: Interval projection and interval-list output
//! - [`handlers`]: HTTP routes

pub mod config;
pub mod dictionary;
pub mod error;
pub mod formats;
pub mod handlers;
pub mod intervals;
pub mod locator;
pub mod reader;
pub mod record;
pub mod storage;
pub mod types;

pub use config::Cli;
pub use dictionary::SequenceDictionary;
pub use error::{Error, Operation, Result};
pub use formats::DecodingStrategy;
pub use intervals::{Interval, IntervalList};
pub use locator::ResourceLocator;
pub use reader::{IntervalOptions, VariantReader};
pub use record::VariantRecord;
