//! Projection of variant records onto named intervals.
//!
//! Each record that survives the filter becomes one interval, in stream order.
//! The interval name is the record ID when one is set; otherwise a name of
//! the form `interval-N` is generated, where `N` counts only the records that
//! needed a generated name. An INFO `END` value, when present, replaces the
//! record's own end position.

use crate::dictionary::SequenceDictionary;
use crate::record::VariantRecord;
use crate::Result;
use serde::Serialize;
use std::io::{self, Write};

const MISSING_ID: &str = ".";
const GENERATED_NAME_PREFIX: &str = "interval-";
const INTERVAL_LIST_VERSION: &str = "1.6";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interval {
    pub contig: String,
    pub start: usize,
    pub end: usize,
    pub negative_strand: bool,
    pub name: String,
}

impl Interval {
    pub fn new(contig: impl Into<String>, start: usize, end: usize, name: impl Into<String>) -> Self {
        Self {
            contig: contig.into(),
            start,
            end,
            negative_strand: false,
            name: name.into(),
        }
    }

    fn strand(&self) -> char {
        if self.negative_strand { '-' } else { '+' }
    }
}

/// Ordered intervals plus the dictionary of the file they came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntervalList {
    dictionary: SequenceDictionary,
    intervals: Vec<Interval>,
}

impl IntervalList {
    pub fn new(dictionary: SequenceDictionary) -> Self {
        Self {
            dictionary,
            intervals: Vec::new(),
        }
    }

    pub fn push(&mut self, interval: Interval) {
        self.intervals.push(interval);
    }

    pub fn sequence_dictionary(&self) -> &SequenceDictionary {
        &self.dictionary
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn into_intervals(self) -> Vec<Interval> {
        self.intervals
    }

    pub fn iter(&self) -> impl Iterator<Item = &Interval> {
        self.intervals.iter()
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Write in Picard interval-list format: a SAM-style header followed by
    /// one tab-separated `contig start end strand name` line per interval.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(writer, "@HD\tVN:{INTERVAL_LIST_VERSION}")?;
        self.dictionary.write_sq_lines(&mut writer)?;
        for interval in &self.intervals {
            writeln!(
                writer,
                "{}\t{}\t{}\t{}\t{}",
                interval.contig,
                interval.start,
                interval.end,
                interval.strand(),
                interval.name
            )?;
        }
        writer.flush()
    }
}

/// Project records onto intervals.
///
/// The first record error aborts the projection and is returned unchanged.
pub fn project<I>(
    records: I,
    dictionary: SequenceDictionary,
    include_filtered: bool,
) -> Result<IntervalList>
where
    I: IntoIterator<Item = Result<VariantRecord>>,
{
    let mut list = IntervalList::new(dictionary);
    let mut generated = 0usize;
    let mut skipped = 0usize;

    for record in records {
        let record = record?;

        if !include_filtered && record.is_filtered() {
            skipped += 1;
            continue;
        }

        let name = match record.id {
            Some(id) if id != MISSING_ID => id,
            _ => {
                generated += 1;
                format!("{GENERATED_NAME_PREFIX}{generated}")
            }
        };

        let end = match record.end_attribute {
            Some(end) => usize::try_from(end).map_err(|_| {
                crate::Error::Decode(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("negative INFO END at {}:{}: {end}", record.contig, record.start),
                ))
            })?,
            None => record.end,
        };

        list.push(Interval::new(record.contig, record.start, end, name));
    }

    tracing::info!(
        intervals = list.len(),
        skipped,
        generated_names = generated,
        "projected variant records onto intervals"
    );

    Ok(list)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn dict() -> SequenceDictionary {
        SequenceDictionary::new([("chr1", 1000), ("chr2", 500)])
    }

    fn ok(records: Vec<VariantRecord>) -> impl Iterator<Item = Result<VariantRecord>> {
        records.into_iter().map(Ok)
    }

    #[test]
    fn test_scenario_skips_filtered_and_names_missing_ids() {
        let records = vec![
            VariantRecord::new("chr1", 100, 100).with_id("rs1"),
            VariantRecord::new("chr1", 200, 200)
                .with_id(".")
                .with_end_attribute(250),
            VariantRecord::new("chr1", 300, 300).with_filter("q10"),
        ];

        let list = project(ok(records), dict(), false).unwrap();

        assert_eq!(
            list.intervals(),
            &[
                Interval::new("chr1", 100, 100, "rs1"),
                Interval::new("chr1", 200, 250, "interval-1"),
            ]
        );
        assert_eq!(list.sequence_dictionary(), &dict());
    }

    #[test]
    fn test_include_filtered() {
        let records = vec![
            VariantRecord::new("chr1", 100, 100).with_id("rs1"),
            VariantRecord::new("chr1", 300, 300).with_filter("q10"),
        ];

        let list = project(ok(records), dict(), true).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.intervals()[1], Interval::new("chr1", 300, 300, "interval-1"));
    }

    #[test]
    fn test_filtered_records_do_not_advance_counter() {
        let records = vec![
            VariantRecord::new("chr1", 10, 10),
            VariantRecord::new("chr1", 20, 20).with_filter("LowQual"),
            VariantRecord::new("chr1", 30, 30).with_id("rs3"),
            VariantRecord::new("chr2", 40, 40).with_id("."),
        ];

        let names: Vec<_> = project(ok(records), dict(), false)
            .unwrap()
            .into_intervals()
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, ["interval-1", "rs3", "interval-2"]);
    }

    #[test]
    fn test_pass_records_are_kept() {
        let records = vec![VariantRecord::new("chr1", 10, 10).with_filter("PASS")];
        let list = project(ok(records), dict(), false).unwrap();
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_duplicate_ids_are_kept_verbatim() {
        let records = vec![
            VariantRecord::new("chr1", 10, 10).with_id("rs7"),
            VariantRecord::new("chr1", 20, 20).with_id("rs7"),
        ];

        let list = project(ok(records), dict(), false).unwrap();
        assert!(list.iter().all(|i| i.name == "rs7"));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_order_is_preserved() {
        let records = vec![
            VariantRecord::new("chr2", 400, 400).with_id("b"),
            VariantRecord::new("chr1", 100, 100).with_id("a"),
            VariantRecord::new("chr2", 10, 10).with_id("c"),
        ];

        let list = project(ok(records), dict(), false).unwrap();
        let names: Vec<_> = list.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["b", "a", "c"]);
    }

    #[test]
    fn test_end_without_attribute_uses_record_end() {
        let records = vec![VariantRecord::new("chr1", 100, 103).with_id("del")];
        let list = project(ok(records), dict(), false).unwrap();
        assert_eq!(list.intervals()[0].end, 103);
        assert!(!list.intervals()[0].negative_strand);
    }

    #[test]
    fn test_end_attribute_overrides_even_when_smaller() {
        let records = vec![VariantRecord::new("chr1", 100, 110).with_end_attribute(105)];
        let list = project(ok(records), dict(), false).unwrap();
        assert_eq!(list.intervals()[0].end, 105);
    }

    #[test]
    fn test_negative_end_attribute_aborts() {
        let records = vec![
            VariantRecord::new("chr1", 100, 100).with_id("a"),
            VariantRecord::new("chr1", 200, 200).with_end_attribute(-5),
        ];

        let err = project(ok(records), dict(), false).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_record_error_aborts() {
        let records = vec![
            Ok(VariantRecord::new("chr1", 100, 100)),
            Err(Error::Decode(io::Error::new(
                io::ErrorKind::InvalidData,
                "bad record",
            ))),
            Ok(VariantRecord::new("chr1", 300, 300)),
        ];

        let err = project(records, dict(), false).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_empty_input() {
        let list = project(ok(vec![]), dict(), false).unwrap();
        assert!(list.is_empty());
        assert_eq!(list.sequence_dictionary().len(), 2);
    }

    #[test]
    fn test_write_interval_list() {
        let mut list = IntervalList::new(SequenceDictionary::new([("chr1", 1000)]));
        list.push(Interval::new("chr1", 100, 100, "rs1"));
        list.push(Interval::new("chr1", 200, 250, "interval-1"));

        let mut buf = Vec::new();
        list.write_to(&mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "@HD\tVN:1.6\n\
             @SQ\tSN:chr1\tLN:1000\n\
             chr1\t100\t100\t+\trs1\n\
             chr1\t200\t250\t+\tinterval-1\n"
        );
    }
}
