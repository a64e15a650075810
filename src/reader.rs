//! High-level reader over a VCF or BCF resource.
//!
//! # Example
//!
//! ```no_run
//! use vcf_intervals::{ResourceLocator, VariantReader};
//!
//! let locator = ResourceLocator::parse("calls.vcf.gz").unwrap();
//! let intervals = VariantReader::interval_list(&locator, false).unwrap();
//! intervals.write_to(std::io::stdout()).unwrap();
//! ```

use crate::dictionary::SequenceDictionary;
use crate::formats::{self, DecodingStrategy, FeatureReader, RecordCursor};
use crate::intervals::{self, IntervalList};
use crate::locator::ResourceLocator;
use crate::{Error, Result};
use noodles::core::{Position, Region};
use noodles::vcf;

/// Settings for [`VariantReader::to_interval_list_with`].
#[derive(Debug, Clone, Copy, Default)]
pub struct IntervalOptions {
    /// Keep records whose FILTER column holds a non-`PASS` value.
    pub include_filtered: bool,
}

pub struct VariantReader {
    locator: ResourceLocator,
    inner: Box<dyn FeatureReader>,
}

impl std::fmt::Debug for VariantReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VariantReader")
            .field("locator", &self.locator)
            .field("strategy", &self.inner.strategy())
            .field("indexed", &self.inner.has_index())
            .finish()
    }
}

/// Builder for [`VariantReader`]. Requires an index unless told otherwise.
#[derive(Debug, Clone)]
pub struct Builder {
    locator: ResourceLocator,
    index: Option<ResourceLocator>,
    require_index: bool,
}

impl Builder {
    pub fn index(mut self, index: ResourceLocator) -> Self {
        self.index = Some(index);
        self
    }

    pub fn require_index(mut self, require_index: bool) -> Self {
        self.require_index = require_index;
        self
    }

    pub fn open(self) -> Result<VariantReader> {
        let inner =
            formats::open_feature_reader(&self.locator, self.index.as_ref(), self.require_index)?;
        Ok(VariantReader {
            locator: self.locator,
            inner,
        })
    }
}

impl VariantReader {
    pub fn builder(locator: ResourceLocator) -> Builder {
        Builder {
            locator,
            index: None,
            require_index: true,
        }
    }

    /// Open a reader that requires an index at a default location.
    pub fn open(locator: ResourceLocator) -> Result<Self> {
        Self::builder(locator).open()
    }

    /// Open a reader with an explicit index, which must be readable.
    pub fn open_with_index(locator: ResourceLocator, index: ResourceLocator) -> Result<Self> {
        Self::builder(locator).index(index).open()
    }

    /// Read only the sequence dictionary. The file is released before
    /// returning, whether or not the header could be read.
    pub fn read_sequence_dictionary(locator: &ResourceLocator) -> Result<SequenceDictionary> {
        Self::scoped(locator, |reader| Ok(reader.sequence_dictionary()))
    }

    /// Convert a whole file to an interval list without requiring an index.
    pub fn interval_list(locator: &ResourceLocator, include_filtered: bool) -> Result<IntervalList> {
        Self::scoped(locator, |reader| {
            reader.to_interval_list_with(IntervalOptions { include_filtered })
        })
    }

    fn scoped<T, F>(locator: &ResourceLocator, f: F) -> Result<T>
    where
        F: FnOnce(&mut VariantReader) -> Result<T>,
    {
        let mut reader = Self::builder(locator.clone())
            .require_index(false)
            .open()?;
        let result = f(&mut reader);
        let closed = reader.close();
        let value = result?;
        closed?;
        Ok(value)
    }

    pub fn locator(&self) -> &ResourceLocator {
        &self.locator
    }

    pub fn strategy(&self) -> DecodingStrategy {
        self.inner.strategy()
    }

    pub fn has_index(&self) -> bool {
        self.inner.has_index()
    }

    pub fn header(&self) -> &vcf::Header {
        self.inner.header()
    }

    pub fn sequence_dictionary(&self) -> SequenceDictionary {
        SequenceDictionary::from_vcf_header(self.inner.header())
    }

    /// Cursor over all records, in file order.
    pub fn records(&self) -> Result<RecordCursor<'_>> {
        self.inner.records()
    }

    /// Cursor over the records overlapping `region`. Fails with
    /// [`Error::IndexRequired`] when the reader has no index.
    pub fn query(&mut self, region: &Region) -> Result<RecordCursor<'_>> {
        self.inner.query(region)
    }

    /// Query a 1-based, inclusive range on `contig`.
    pub fn query_interval(
        &mut self,
        contig: &str,
        start: usize,
        end: usize,
    ) -> Result<RecordCursor<'_>> {
        let region = region(contig, start, end)?;
        self.inner.query(&region)
    }

    /// Convert to an interval list, leaving filtered records out.
    pub fn to_interval_list(&self) -> Result<IntervalList> {
        self.to_interval_list_with(IntervalOptions::default())
    }

    pub fn to_interval_list_with(&self, options: IntervalOptions) -> Result<IntervalList> {
        let dictionary = self.sequence_dictionary();
        intervals::project(self.records()?, dictionary, options.include_filtered)
    }

    pub fn close(self) -> Result<()> {
        self.inner.close()
    }
}

/// Build a noodles region from 1-based inclusive coordinates.
pub fn region(contig: &str, start: usize, end: usize) -> Result<Region> {
    let start = Position::try_from(start)
        .map_err(|e| Error::InvalidRegion(format!("invalid start position: {}", e)))?;
    let end = Position::try_from(end)
        .map_err(|e| Error::InvalidRegion(format!("invalid end position: {}", e)))?;
    if end < start {
        return Err(Error::InvalidRegion(format!(
            "{contig}:{start}-{end} ends before it starts"
        )));
    }
    Ok(Region::new(contig, start..=end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intervals::Interval;
    use std::fs;
    use std::path::Path;

    const VCF: &str = "##fileformat=VCFv4.3
##contig=<ID=chr1,length=1000>
##contig=<ID=chr2,length=500>
##INFO=<ID=END,Number=1,Type=Integer,Description=\"End position\">
##FILTER=<ID=q10,Description=\"Quality below 10\">
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO
chr1\t100\trs1\tA\tG\t.\tPASS\t.
chr1\t200\t.\tA\t<DEL>\t.\t.\tEND=250
chr1\t300\t.\tA\tT\t.\tq10\t.
chr2\t50\t.\tAC\tA\t.\tPASS\t.
";

    fn write_vcf(dir: &Path) -> ResourceLocator {
        let path = dir.join("calls.vcf");
        fs::write(&path, VCF).unwrap();
        ResourceLocator::from(path)
    }

    #[test]
    fn test_open_requires_index_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let locator = write_vcf(dir.path());

        let err = VariantReader::open(locator).unwrap_err();
        assert!(matches!(err, Error::IndexRequired(_)));
    }

    #[test]
    fn test_interval_list_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let locator = write_vcf(dir.path());

        let list = VariantReader::interval_list(&locator, false).unwrap();
        assert_eq!(
            list.intervals(),
            &[
                Interval::new("chr1", 100, 100, "rs1"),
                Interval::new("chr1", 200, 250, "interval-1"),
                Interval::new("chr2", 50, 51, "interval-2"),
            ]
        );
        assert_eq!(list.sequence_dictionary().len(), 2);
    }

    #[test]
    fn test_interval_list_include_filtered() {
        let dir = tempfile::tempdir().unwrap();
        let locator = write_vcf(dir.path());

        let list = VariantReader::interval_list(&locator, true).unwrap();
        let names: Vec<_> = list.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["rs1", "interval-1", "interval-2", "interval-3"]);
        assert_eq!(list.intervals()[2], Interval::new("chr1", 300, 300, "interval-2"));
    }

    #[test]
    fn test_read_sequence_dictionary() {
        let dir = tempfile::tempdir().unwrap();
        let locator = write_vcf(dir.path());

        let dict = VariantReader::read_sequence_dictionary(&locator).unwrap();
        let names: Vec<_> = dict.iter().map(|s| (s.name.as_str(), s.length)).collect();
        assert_eq!(names, [("chr1", 1000), ("chr2", 500)]);
    }

    #[test]
    fn test_unindexed_reader_fails_queries() {
        let dir = tempfile::tempdir().unwrap();
        let locator = write_vcf(dir.path());

        let mut reader = VariantReader::builder(locator)
            .require_index(false)
            .open()
            .unwrap();
        assert_eq!(reader.strategy(), DecodingStrategy::Textual);
        assert!(!reader.has_index());

        let err = reader.query_interval("chr1", 1, 1000).err().unwrap();
        assert!(matches!(err, Error::IndexRequired(_)));

        assert_eq!(reader.to_interval_list().unwrap().len(), 3);
        reader.close().unwrap();
    }

    #[test]
    fn test_missing_explicit_index() {
        let dir = tempfile::tempdir().unwrap();
        let locator = write_vcf(dir.path());
        let index = ResourceLocator::from(dir.path().join("calls.vcf.tbi"));

        let err = VariantReader::open_with_index(locator, index).unwrap_err();
        assert!(matches!(err, Error::Resource { .. }));
    }

    #[test]
    fn test_malformed_record_aborts_projection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.vcf");
        fs::write(
            &path,
            format!("{VCF}chr1\tnot-a-position\t.\tA\tG\t.\t.\t.\n"),
        )
        .unwrap();

        let err = VariantReader::interval_list(&ResourceLocator::from(path), false).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_region() {
        assert!(region("chr1", 10, 20).is_ok());
        assert!(region("chr1", 20, 20).is_ok());
        assert!(matches!(region("chr1", 0, 20), Err(Error::InvalidRegion(_))));
        assert!(matches!(region("chr1", 30, 20), Err(Error::InvalidRegion(_))));
    }
}
