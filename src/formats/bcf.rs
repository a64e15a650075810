use super::{
    DecodingStrategy, FeatureReader, RecordCursor, VariantIndex, decode_query_record,
    missing_index, record_buf_cursor,
};
use crate::{Error, Operation, Result};
use noodles::bcf;
use noodles::bgzf;
use noodles::core::Region;
use noodles::vcf;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

type BgzfBcfReader = bcf::io::Reader<bgzf::Reader<File>>;

/// BCF reader. BCF is always BGZF-compressed and indexed with CSI.
pub struct BcfFeatureReader {
    path: PathBuf,
    header: Arc<vcf::Header>,
    index: Option<VariantIndex>,
    query_reader: Option<BgzfBcfReader>,
}

impl BcfFeatureReader {
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

fn open(path: &Path, operation: Operation) -> Result<BgzfBcfReader> {
    let file = File::open(path).map_err(|e| Error::resource(operation, e))?;
    Ok(bcf::io::Reader::new(file))
}

/// Read the BCF header
pub fn read_header(path: &Path) -> Result<vcf::Header> {
    let mut reader = open(path, Operation::Open)?;
    reader
        .read_header()
        .map_err(|e| Error::from_cursor(Operation::Header, e))
}

impl FeatureReader for BcfFeatureReader {
    fn strategy(&self) -> DecodingStrategy {
        DecodingStrategy::Binary
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
        let index: &Option<VariantIndex> = index;

        // BCF is only ever indexed with CSI.
        let index = match index {
            Some(VariantIndex::Csi(index)) => index,
            Some(VariantIndex::Tabix(_)) | None => return Err(missing_index(path)),
        };

        let mut reader = open(path, Operation::Query)?;
        reader
            .read_header()
            .map_err(|e| Error::from_cursor(Operation::Query, e))?;
        let reader = query_reader.insert(reader);

        let records = reader
            .query(header, index, region)
            .map_err(|e| Error::from_cursor(Operation::Query, e))?;
        Ok(Box::new(
            records.map(move |result| decode_query_record(header, result)),
        ))
    }

    fn close(self: Box<Self>) -> Result<()> {
        tracing::debug!(path = %self.path.display(), "closing BCF reader");
        drop(self);
        Ok(())
    }
}
