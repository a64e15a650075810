//! Sequence dictionaries copied from variant file headers.

use noodles::vcf;
use serde::Serialize;
use std::io::{self, Write};

/// One `##contig` entry. Length is 0 when the header does not declare one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SequenceRecord {
    pub name: String,
    pub length: usize,
    pub index: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SequenceDictionary {
    sequences: Vec<SequenceRecord>,
}

impl SequenceDictionary {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        let sequences = entries
            .into_iter()
            .enumerate()
            .map(|(index, (name, length))| SequenceRecord {
                name: name.into(),
                length,
                index,
            })
            .collect();
        Self { sequences }
    }

    pub fn from_vcf_header(header: &vcf::Header) -> Self {
        Self::new(
            header
                .contigs()
                .iter()
                .map(|(name, contig)| (name.clone(), contig.length().unwrap_or(0))),
        )
    }

    pub fn get(&self, name: &str) -> Option<&SequenceRecord> {
        self.sequences.iter().find(|s| s.name == name)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.get(name).map(|s| s.index)
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SequenceRecord> {
        self.sequences.iter()
    }

    /// Write SAM-style `@SQ` lines.
    pub fn write_sq_lines<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for sequence in &self.sequences {
            writeln!(writer, "@SQ\tSN:{}\tLN:{}", sequence.name, sequence.length)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "##fileformat=VCFv4.3
##contig=<ID=chr1,length=248956422>
##contig=<ID=chr2,length=242193529>
##contig=<ID=chrUn>
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO
";

    #[test]
    fn test_from_vcf_header_preserves_order() {
        let header: vcf::Header = HEADER.parse().unwrap();
        let dict = SequenceDictionary::from_vcf_header(&header);

        assert_eq!(dict.len(), 3);
        let names: Vec<_> = dict.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["chr1", "chr2", "chrUn"]);
        assert_eq!(dict.get("chr2").unwrap().length, 242193529);
        assert_eq!(dict.get("chrUn").unwrap().length, 0);
        assert_eq!(dict.index_of("chrUn"), Some(2));
        assert_eq!(dict.index_of("chrM"), None);
    }

    #[test]
    fn test_write_sq_lines() {
        let dict = SequenceDictionary::new([("chr1", 1000), ("chr2", 500)]);
        let mut buf = Vec::new();
        dict.write_sq_lines(&mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "@SQ\tSN:chr1\tLN:1000\n@SQ\tSN:chr2\tLN:500\n"
        );
    }

    #[test]
    fn test_empty() {
        let dict = SequenceDictionary::default();
        assert!(dict.is_empty());
        assert!(dict.get("chr1").is_none());
    }
}
