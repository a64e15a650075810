use super::{
    DecodingStrategy, FeatureReader, RecordCursor, VariantIndex, decode_query_record,
    missing_index, record_buf_cursor,
};
use crate::{Error, Operation, Result};
use noodles::bgzf;
use noodles::core::Region;
use noodles::csi::binning_index::BinningIndex;
use noodles::vcf;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

type IndexedVcfReader = vcf::io::Reader<bgzf::Reader<File>>;

/// VCF reader. Handles plain text and BGZF-compressed files.
pub struct VcfFeatureReader {
    path: PathBuf,
    header: Arc<vcf::Header>,
    index: Option<VariantIndex>,
    query_reader: Option<IndexedVcfReader>,
}

impl VcfFeatureReader {
    pub fn new(path: PathBuf, header: vcf::Header, index: Option<VariantIndex>) -> Self {
        Self {
            path,
            header: Arc::new(header),
            index,
            query_reader: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Open the file and read its header. Compression is detected from the file.
pub fn read_header(path: &Path) -> Result<vcf::Header> {
    let mut reader = open(path, Operation::Open)?;
    reader
        .read_header()
        .map_err(|e| Error::from_cursor(Operation::Header, e))
}

fn open(path: &Path, operation: Operation) -> Result<vcf::io::Reader<Box<dyn std::io::BufRead>>> {
    vcf::io::reader::Builder::default()
        .build_from_path(path)
        .map_err(|e| Error::resource(operation, e))
}

impl FeatureReader for VcfFeatureReader {
    fn strategy(&self) -> DecodingStrategy {
        DecodingStrategy::Textual
    }

    fn header(&self) -> &vcf::Header {
        &self.header
    }

    fn has_index(&self) -> bool {
        self.index.is_some()
    }

    fn records(&self) -> Result<RecordCursor<'_>> {
        let mut reader = open(&self.path, Operation::Iterate)?;
        reader
            .read_header()
            .map_err(|e| Error::from_cursor(Operation::Iterate, e))?;

        Ok(record_buf_cursor(
            Arc::clone(&self.header),
            Operation::Iterate,
            move |header, record| reader.read_record_buf(header, record),
        ))
    }

    fn query(&mut self, region: &Region) -> Result<RecordCursor<'_>> {
        let Self {
            path,
            header,
            index,
            query_reader,
        } = self;

        let path: &Path = path;
        let header: &vcf::Header = header;
        let index = index.as_ref().ok_or_else(|| missing_index(path))?;

        let file = File::open(path).map_err(|e| Error::resource(Operation::Query, e))?;
        let mut reader = vcf::io::Reader::new(bgzf::Reader::new(file));
        reader
            .read_header()
            .map_err(|e| Error::from_cursor(Operation::Query, e))?;
        let reader = query_reader.insert(reader);

        match index {
            VariantIndex::Tabix(index) => query_records(reader, header, index, region),
            VariantIndex::Csi(index) => query_records(reader, header, index, region),
        }
    }

    fn close(self: Box<Self>) -> Result<()> {
        tracing::debug!(path = %self.path.display(), "closing VCF reader");
        drop(self);
        Ok(())
    }
}

fn query_records<'r, I>(
    reader: &'r mut IndexedVcfReader,
    header: &'r vcf::Header,
    index: &'r I,
    region: &Region,
) -> Result<RecordCursor<'r>>
where
    I: BinningIndex,
{
    let records = reader
        .query(header, index, region)
        .map_err(|e| Error::from_cursor(Operation::Query, e))?;
    Ok(Box::new(
        records.map(move |result| decode_query_record(header, result)),
    ))
}
