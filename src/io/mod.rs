//! Types and methods for reading and parsing input and writing output.

pub mod file;
pub mod tsv;

pub use file::{InputFile, OutputFile};
pub use tsv::{column_index, require_columns, TsvConfig, TsvRecord, TsvSerialize, VCF_TSV};
