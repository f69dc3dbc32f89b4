//! `genetools` is a small library and command line toolkit for the kind of
//! genomic text-file munging that usually lives in ad hoc shell pipelines:
//! filtering tab-delimited rows against an ID list, collapsing multi-valued
//! VCF annotations, translating gene names through alias tables, and
//! generating or correcting variants against a reference FASTA.
//!
//! Everything is line-oriented, single-pass, and permissive: malformed rows
//! are skipped with a diagnostic rather than aborting the stream, while
//! configuration mistakes (a missing file, a missing required column) fail
//! immediately. Lookup tables ([`SequenceSet`], [`GeneNameResolver`]) are
//! built once up front and queried read-only during the main pass.
//!
//! [`SequenceSet`]: crate::sequences::SequenceSet
//! [`GeneNameResolver`]: crate::genes::GeneNameResolver

pub mod commands;
pub mod error;
pub mod genes;
pub mod io;
pub mod reporting;
pub mod sequences;
pub mod test_utilities;
pub mod vcf;

/// The type of genomic positions.
pub type Position = u32;

pub mod prelude {
    //! The `genetools` prelude.
    pub use crate::error::GeneToolsError;
    pub use crate::genes::{GeneNameResolver, Resolved, ResolutionKind};
    pub use crate::io::{InputFile, OutputFile, TsvRecord};
    pub use crate::sequences::{MutationKind, Sequence, SequenceSet};
    pub use crate::vcf::VcfRecord;
    pub use crate::Position;
}
