//! Per-position mutation generation against a reference sequence.
//!
//! Used to synthesize one exhaustive test variant per scanned position, e.g.
//! to exercise a variant annotator over every base of a region.

use clap::ValueEnum;

use crate::error::GeneToolsError;
use crate::sequences::store::Sequence;
use crate::Position;

/// The base inserted after the reference base when generating insertions,
/// unless overridden.
pub const DEFAULT_INSERT_BASE: u8 = b'T';

/// The kind of variant to generate at each position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum MutationKind {
    /// Single-nucleotide substitution to the Watson-Crick complement.
    Snv,
    /// Single-base insertion after the reference base.
    Insertion,
    /// Single-base deletion, anchored on the preceding base.
    Deletion,
}

/// The Watson-Crick complement of an unambiguous uppercase base.
pub fn complement(base: u8) -> Result<u8, GeneToolsError> {
    match base {
        b'A' => Ok(b'T'),
        b'T' => Ok(b'A'),
        b'C' => Ok(b'G'),
        b'G' => Ok(b'C'),
        other => Err(GeneToolsError::InvalidNucleotide(other as char)),
    }
}

/// A generated variant: reference and alternate alleles anchored at a
/// 0-based position.
#[derive(Clone, Debug, PartialEq)]
pub struct Mutation {
    pub position: Position,
    pub reference: String,
    pub alternate: String,
}

/// Generate the variant of the given kind at a single 0-based position.
///
/// Failures here (a position outside the sequence, an ambiguous base under
/// [`MutationKind::Snv`]) are per-position conditions: series callers skip
/// the position, count it, and continue.
pub fn mutate_at(
    sequence: &Sequence,
    position: Position,
    kind: MutationKind,
    insert_base: u8,
) -> Result<Mutation, GeneToolsError> {
    let seqlen = sequence.len() as Position;
    let base_at = |pos: Position| {
        sequence
            .base(pos)
            .ok_or(GeneToolsError::PositionOutOfRange(pos, seqlen))
    };

    let (reference, alternate) = match kind {
        MutationKind::Snv => {
            let reference = base_at(position)?;
            let alternate = complement(reference)?;
            ((reference as char).to_string(), (alternate as char).to_string())
        }
        MutationKind::Insertion => {
            let reference = base_at(position)?;
            let alternate = format!("{}{}", reference as char, insert_base as char);
            ((reference as char).to_string(), alternate)
        }
        MutationKind::Deletion => {
            let first = base_at(position)?;
            let second = base_at(position + 1)?;
            let reference = format!("{}{}", first as char, second as char);
            (reference, (first as char).to_string())
        }
    };

    Ok(Mutation {
        position,
        reference,
        alternate,
    })
}

/// Generate one variant per position over the half-open range
/// `[start, end)`. Each item carries its position alongside the result, so
/// callers can report exactly which positions were skipped.
pub fn mutation_series(
    sequence: &Sequence,
    start: Position,
    end: Position,
    kind: MutationKind,
    insert_base: u8,
) -> impl Iterator<Item = (Position, Result<Mutation, GeneToolsError>)> + '_ {
    (start..end).map(move |position| (position, mutate_at(sequence, position, kind, insert_base)))
}
