//! A permissive VCF row model and INFO-field manipulation.
//!
//! This is deliberately not a validating VCF parser: the tools here rewrite
//! single columns of otherwise-opaque rows, so anything that does not look
//! like a VCF body row is passed through to output untouched rather than
//! rejected.

use crate::io::tsv::{TsvConfig, TsvRecord, TsvSerialize};
use crate::Position;

/// INFO keys holding variant-effect annotations, which may be multi-valued.
pub const ANNOTATION_KEYS: [&str; 2] = ["ANN=", "EFF="];

/// One VCF body row: the eight fixed columns plus any trailing
/// FORMAT/sample columns, kept verbatim.
#[derive(Clone, Debug, PartialEq)]
pub struct VcfRecord {
    pub chrom: String,
    /// 1-based position, as in the file.
    pub pos: Position,
    pub id: String,
    pub reference: String,
    pub alternate: String,
    pub qual: String,
    pub filter: String,
    pub info: String,
    pub rest: Vec<String>,
}

impl VcfRecord {
    /// Parse a VCF body row. Returns `None` for header lines, rows with
    /// fewer than eight columns, or rows with a non-numeric POS; callers
    /// treat those as pass-through or skippable, not as errors.
    pub fn parse(line: &str) -> Option<Self> {
        if line.starts_with('#') {
            return None;
        }
        let record = TsvRecord::parse(line);
        if record.len() < 8 {
            return None;
        }
        let pos: Position = record.field(1)?.parse().ok()?;
        Some(Self {
            chrom: record.field(0)?.to_string(),
            pos,
            id: record.field(2)?.to_string(),
            reference: record.field(3)?.to_string(),
            alternate: record.field(4)?.to_string(),
            qual: record.field(5)?.to_string(),
            filter: record.field(6)?.to_string(),
            info: record.field(7)?.to_string(),
            rest: record.fields()[8..].iter().map(|s| s.to_string()).collect(),
        })
    }

    /// Build a minimal record (ID/QUAL/FILTER/INFO missing) for generated
    /// variants.
    pub fn new_minimal(
        chrom: impl Into<String>,
        pos: Position,
        reference: impl Into<String>,
        alternate: impl Into<String>,
    ) -> Self {
        Self {
            chrom: chrom.into(),
            pos,
            id: String::new(),
            reference: reference.into(),
            alternate: alternate.into(),
            qual: String::new(),
            filter: String::new(),
            info: String::new(),
            rest: Vec::new(),
        }
    }
}

impl TsvSerialize for VcfRecord {
    fn to_tsv(&self, config: &TsvConfig) -> String {
        let or_missing = |value: &str| {
            if value.is_empty() {
                config.no_value_string.clone()
            } else {
                value.to_string()
            }
        };
        let mut fields = vec![
            self.chrom.clone(),
            self.pos.to_string(),
            or_missing(&self.id),
            self.reference.clone(),
            self.alternate.clone(),
            or_missing(&self.qual),
            or_missing(&self.filter),
            or_missing(&self.info),
        ];
        fields.extend(self.rest.iter().cloned());
        fields.join("\t")
    }
}

/// Collapse multi-valued annotation sub-fields of a `;`-separated INFO field
/// down to their first `,`-separated entry.
///
/// Sub-fields whose key does not match any of `key_prefixes` are untouched;
/// if no sub-field matches, the input comes back unchanged.
pub fn collapse_first(info: &str, key_prefixes: &[&str]) -> String {
    info.split(';')
        .map(|sub| {
            if key_prefixes.iter().any(|prefix| sub.starts_with(prefix)) {
                sub.split(',').next().unwrap_or(sub)
            } else {
                sub
            }
        })
        .collect::<Vec<_>>()
        .join(";")
}

#[cfg(test)]
mod tests {
    use super::{collapse_first, VcfRecord, ANNOTATION_KEYS};
    use crate::io::tsv::{TsvSerialize, VCF_TSV};

    #[test]
    fn collapse_keeps_first_annotation_entry() {
        let info = "DP=10;ANN=a,b,c;AF=0.1";
        assert_eq!(collapse_first(info, &ANNOTATION_KEYS), "DP=10;ANN=a;AF=0.1");
    }

    #[test]
    fn collapse_without_matching_key_is_identity() {
        let info = "DP=10;AF=0.1";
        assert_eq!(collapse_first(info, &ANNOTATION_KEYS), info);
    }

    #[test]
    fn collapse_handles_eff_key() {
        let info = "EFF=missense,stop_gained;DP=3";
        assert_eq!(collapse_first(info, &ANNOTATION_KEYS), "EFF=missense;DP=3");
    }

    #[test]
    fn collapse_single_valued_annotation_is_unchanged() {
        let info = "ANN=only";
        assert_eq!(collapse_first(info, &ANNOTATION_KEYS), info);
    }

    #[test]
    fn parse_rejects_headers_and_short_rows() {
        assert!(VcfRecord::parse("#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO").is_none());
        assert!(VcfRecord::parse("chr1\t100\t.\tA\tT").is_none());
    }

    #[test]
    fn parse_and_serialize_round_trips() {
        let line = "chr2\t42\trs99\tAC\tA\t50\tPASS\tDP=10;ANN=a,b\tGT\t0/1";
        let record = VcfRecord::parse(line).unwrap();
        assert_eq!(record.chrom, "chr2");
        assert_eq!(record.pos, 42);
        assert_eq!(record.rest, vec!["GT".to_string(), "0/1".to_string()]);
        assert_eq!(record.to_tsv(&VCF_TSV), line);
    }

    #[test]
    fn minimal_record_uses_missing_placeholder() {
        let record = VcfRecord::new_minimal("chr1", 7, "A", "T");
        assert_eq!(record.to_tsv(&VCF_TSV), "chr1\t7\t.\tA\tT\t.\t.\t.");
    }
}
