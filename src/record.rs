use crate::{Error, Result};
use noodles::vcf::variant::RecordBuf;
use noodles::vcf::variant::record_buf::info::field::Value;
use serde::Serialize;
use std::io;

const END_KEY: &str = "END";
const PASS: &str = "PASS";

/// Decoded variant record, detached from the reader that produced it.
///
/// Positions are 1-based and inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantRecord {
    /// ID column, multiple IDs joined with `;`. The decoder keeps IDs as a
    /// set, so a repeated ID (`rs1;rs1`) is never reported twice.
    pub id: Option<String>,
    pub contig: String,
    pub start: usize,
    pub end: usize,
    #[serde(rename = "END", skip_serializing_if = "Option::is_none")]
    pub end_attribute: Option<i64>,
    pub filters: Vec<String>,
}

impl VariantRecord {
    pub fn new(contig: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            id: None,
            contig: contig.into(),
            start,
            end,
            end_attribute: None,
            filters: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_end_attribute(mut self, end: i64) -> Self {
        self.end_attribute = Some(end);
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filters.push(filter.into());
        self
    }

    /// A record is filtered when any FILTER value other than `PASS` is set.
    pub fn is_filtered(&self) -> bool {
        self.filters.iter().any(|f| f != PASS)
    }

    pub fn from_record_buf(record: &RecordBuf) -> Result<Self> {
        let start = record.variant_start().map(usize::from).unwrap_or(0);
        let reference_len = record.reference_bases().len();
        let end = start + reference_len.saturating_sub(1);

        let ids = record.ids().as_ref();
        let id = if ids.is_empty() {
            None
        } else {
            Some(ids.iter().map(String::as_str).collect::<Vec<_>>().join(";"))
        };

        let filters = record.filters().as_ref().iter().cloned().collect();

        let end_attribute = match record.info().as_ref().get(END_KEY) {
            Some(Some(value)) => Some(end_value(value)?),
            Some(None) | None => None,
        };

        Ok(Self {
            id,
            contig: record.reference_sequence_name().to_string(),
            start,
            end,
            end_attribute,
            filters,
        })
    }
}

fn end_value(value: &Value) -> Result<i64> {
    match value {
        Value::Integer(n) => Ok(i64::from(*n)),
        Value::String(s) => s.trim().parse().map_err(|_| invalid_end(s)),
        other => Err(invalid_end(&format!("{other:?}"))),
    }
}

fn invalid_end(value: &str) -> Error {
    Error::Decode(io::Error::new(
        io::ErrorKind::InvalidData,
        format!("INFO END is not an integer: {value}"),
    ))
}
