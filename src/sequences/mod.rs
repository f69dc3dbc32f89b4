//! Functionality for working with named nucleotide sequences.
//!
//! [`SequenceSet`] materializes a whole (possibly gzip-compressed) FASTA
//! file in memory as a name → sequence map for reference lookups; the
//! [`mutate`] module synthesizes per-position test variants against a stored
//! sequence. This is a deliberate simplicity tradeoff for gene-list and
//! chromosome-scale inputs, not whole-genome sequence collections.

pub mod mutate;
pub mod store;

pub use mutate::{
    complement, mutate_at, mutation_series, Mutation, MutationKind, DEFAULT_INSERT_BASE,
};
pub use store::{Sequence, SequenceSet};
