//! Variant file readers using noodles.
//!
//! This module picks a decoding strategy from the resource locator and wraps
//! the matching noodles reader behind the [`FeatureReader`] trait.
//!
//! # Supported Formats
//!
//! - [`VcfFeatureReader`] - VCF, plain or BGZF-compressed (`.tbi`, `.csi` index)
//! - [`BcfFeatureReader`] - BCF (`.csi` index)
//!
//! # Cursors
//!
//! Every call to [`FeatureReader::records`] or [`FeatureReader::query`] opens
//! its own file handle, so cursors are independent of each other. Region
//! queries need an index; without one they fail with
//! [`Error::IndexRequired`](crate::Error::IndexRequired).

mod bcf;
pub mod index;
mod vcf;

pub use bcf::BcfFeatureReader;
pub use index::VariantIndex;
pub use vcf::VcfFeatureReader;

use crate::locator::ResourceLocator;
use crate::record::VariantRecord;
use crate::{Error, Operation, Result};
use noodles::core::Region;
use noodles::vcf::variant::RecordBuf;
use noodles::vcf::{self as noodles_vcf, Header};
use std::fmt;
use std::io;
use std::sync::Arc;

/// One-shot, forward-only cursor over decoded records.
pub type RecordCursor<'a> = Box<dyn Iterator<Item = Result<VariantRecord>> + 'a>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum DecodingStrategy {
    /// VCF text codec
    #[serde(rename = "VCF")]
    Textual,
    /// BCF binary codec
    #[serde(rename = "BCF")]
    Binary,
}

impl DecodingStrategy {
    /// `.bcf` at the end of the locator's path selects the binary codec;
    /// everything else is read as VCF.
    pub fn for_locator(locator: &ResourceLocator) -> Self {
        let strategy = if locator.is_bcf() {
            DecodingStrategy::Binary
        } else {
            DecodingStrategy::Textual
        };
        tracing::debug!(%locator, ?strategy, "selected decoding strategy");
        strategy
    }
}

impl fmt::Display for DecodingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodingStrategy::Textual => f.write_str("VCF"),
            DecodingStrategy::Binary => f.write_str("BCF"),
        }
    }
}

/// A configured reader over one variant resource.
pub trait FeatureReader {
    fn strategy(&self) -> DecodingStrategy;

    fn header(&self) -> &Header;

    /// Whether an index was found, so that [`FeatureReader::query`] can work.
    fn has_index(&self) -> bool;

    /// Cursor over every record in the file, in file order.
    fn records(&self) -> Result<RecordCursor<'_>>;

    /// Cursor over the records overlapping `region`. Requires an index.
    fn query(&mut self, region: &Region) -> Result<RecordCursor<'_>>;

    /// Release the reader and any open handles.
    fn close(self: Box<Self>) -> Result<()>;
}

/// Open a reader for `locator`, choosing the codec with
/// [`DecodingStrategy::for_locator`].
///
/// Without an explicit `index` the default index locations next to the file
/// are searched. When `require_index` is set and no index is found this fails
/// with [`Error::IndexRequired`].
pub fn open_feature_reader(
    locator: &ResourceLocator,
    index: Option<&ResourceLocator>,
    require_index: bool,
) -> Result<Box<dyn FeatureReader>> {
    let strategy = DecodingStrategy::for_locator(locator);
    let path = locator.to_local_path()?;

    let reader: Box<dyn FeatureReader> = match strategy {
        DecodingStrategy::Textual => {
            let header = vcf::read_header(&path)?;
            let index = index::load(&path, index, strategy, require_index, locator)?;
            Box::new(VcfFeatureReader::new(path, header, index))
        }
        DecodingStrategy::Binary => {
            let header = bcf::read_header(&path)?;
            let index = index::load(&path, index, strategy, require_index, locator)?;
            Box::new(BcfFeatureReader::new(path, header, index))
        }
    };

    tracing::info!(
        %locator,
        format = %strategy,
        indexed = reader.has_index(),
        contigs = reader.header().contigs().len(),
        "opened variant reader"
    );

    Ok(reader)
}

/// Turn a `read_record_buf`-style reader into a [`RecordCursor`].
///
/// The cursor stops after the first error.
fn record_buf_cursor<'a, F>(header: Arc<Header>, operation: Operation, mut read: F) -> RecordCursor<'a>
where
    F: FnMut(&Header, &mut RecordBuf) -> io::Result<usize> + 'a,
{
    let mut record = RecordBuf::default();
    let mut done = false;

    Box::new(std::iter::from_fn(move || {
        if done {
            return None;
        }

        match read(&header, &mut record) {
            Ok(0) => {
                done = true;
                None
            }
            Ok(_) => Some(VariantRecord::from_record_buf(&record)),
            Err(e) => {
                done = true;
                Some(Err(Error::from_cursor(operation, e)))
            }
        }
    }))
}

/// Decode a lazily parsed query result into a [`VariantRecord`].
fn decode_query_record<R>(header: &Header, result: io::Result<R>) -> Result<VariantRecord>
where
    R: noodles_vcf::variant::Record,
{
    let record = result.map_err(|e| Error::from_cursor(Operation::Query, e))?;
    let record = RecordBuf::try_from_variant_record(header, &record)
        .map_err(|e| Error::from_cursor(Operation::Query, e))?;
    VariantRecord::from_record_buf(&record)
}

fn missing_index(path: &std::path::Path) -> Error {
    tracing::warn!(path = %path.display(), "region query attempted without an index");
    Error::IndexRequired(path.display().to_string())
}
