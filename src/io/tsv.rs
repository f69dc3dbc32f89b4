//! Tab-delimited record parsing and serializing helpers.
//!
//! Rows in the formats handled here (VCF bodies, GTF, gene tables, gene-set
//! lists) are ragged: the number of fields can vary per line. [`TsvRecord`]
//! keeps positional access bounds-checked, so a short row reads as "field
//! absent" rather than a panic or a truncated parse.

use lazy_static::lazy_static;
use std::collections::HashSet;

use crate::error::GeneToolsError;

lazy_static! {
    /// The standard VCF-style TSV output configuration.
    pub static ref VCF_TSV: TsvConfig = TsvConfig {
        no_value_string: ".".to_string(),
    };
}

/// This is an extensible type to handle common TSV output configurations,
/// e.g. what to print for a missing value.
pub struct TsvConfig {
    pub no_value_string: String,
}

/// Serialize a value back into a TSV field or row.
pub trait TsvSerialize {
    fn to_tsv(&self, config: &TsvConfig) -> String;
}

impl TsvSerialize for &String {
    #![allow(unused_variables)]
    fn to_tsv(&self, config: &TsvConfig) -> String {
        self.to_string()
    }
}

impl TsvSerialize for String {
    #![allow(unused_variables)]
    fn to_tsv(&self, config: &TsvConfig) -> String {
        self.to_string()
    }
}

impl<U: TsvSerialize> TsvSerialize for Vec<U> {
    fn to_tsv(&self, config: &TsvConfig) -> String {
        self.iter()
            .map(|x| x.to_tsv(config))
            .collect::<Vec<_>>()
            .join("\t")
    }
}

/// A single tab-delimited row, split into positional fields.
///
/// Records are ephemeral: one is constructed per input line, consumed, and
/// dropped. Field access through [`TsvRecord::field`] is bounds-checked.
#[derive(Clone, Debug, PartialEq)]
pub struct TsvRecord<'a> {
    fields: Vec<&'a str>,
}

impl<'a> TsvRecord<'a> {
    /// Split a line on tabs, after stripping the trailing line terminator.
    /// No other trimming is done.
    pub fn parse(line: &'a str) -> Self {
        let line = line.strip_suffix('\n').unwrap_or(line);
        let line = line.strip_suffix('\r').unwrap_or(line);
        Self {
            fields: line.split('\t').collect(),
        }
    }

    /// The number of fields in this record.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Return whether this record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Bounds-checked positional field access.
    pub fn field(&self, index: usize) -> Option<&'a str> {
        self.fields.get(index).copied()
    }

    /// All fields, in order.
    pub fn fields(&self) -> &[&'a str] {
        &self.fields
    }

    /// The filtering predicate: true iff this record has more fields than
    /// `index` and the value at `index` is a member of `accepted`. Short
    /// records never match.
    pub fn matches(&self, index: usize, accepted: &HashSet<String>) -> bool {
        self.field(index)
            .map(|value| accepted.contains(value))
            .unwrap_or(false)
    }
}

/// Find the index of a named column in a header line. A leading `#` on the
/// first column (VCF-style `#CHROM`) is ignored.
pub fn column_index(header: &str, name: &str) -> Option<usize> {
    let header = header.strip_prefix('#').unwrap_or(header);
    TsvRecord::parse(header)
        .fields()
        .iter()
        .position(|&field| field == name)
}

/// Look up a set of required named columns, failing with a single error that
/// lists *every* missing column name. A mis-specified column name is a user
/// configuration error, so this is a hard failure.
pub fn require_columns(header: &str, names: &[&str]) -> Result<Vec<usize>, GeneToolsError> {
    let mut indices = Vec::with_capacity(names.len());
    let mut missing = Vec::new();
    for name in names {
        match column_index(header, name) {
            Some(index) => indices.push(index),
            None => missing.push(*name),
        }
    }
    if !missing.is_empty() {
        return Err(GeneToolsError::MissingColumns(missing.join(", ")));
    }
    Ok(indices)
}
