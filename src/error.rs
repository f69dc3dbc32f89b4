//! The [`GeneToolsError`] `enum` definition and error messages.

use crate::Position;
use std::num::ParseIntError;
use std::string::FromUtf8Error;
use thiserror::Error;

/// The standard set of errors passed to the user.
///
/// Two classes of failure live here. Configuration errors (a missing file, a
/// missing required column, a bad command line argument) are propagated with
/// `?` and abort the run. Per-record data errors ([`MissingSequence`],
/// [`InvalidGenomicRangeForSequence`], [`InvalidNucleotide`]) are caught at
/// the record loop, tallied, and the stream continues.
///
/// [`MissingSequence`]: GeneToolsError::MissingSequence
/// [`InvalidGenomicRangeForSequence`]: GeneToolsError::InvalidGenomicRangeForSequence
/// [`InvalidNucleotide`]: GeneToolsError::InvalidNucleotide
#[derive(Debug, Error)]
pub enum GeneToolsError {
    // IO related errors
    #[error("File reading error: {0}")]
    IOError(#[from] std::io::Error),

    // File parsing related errors
    #[error("Integer parsing error: {0}")]
    ParseIntError(#[from] ParseIntError),
    #[error("UTF-8 conversion error: {0}")]
    FromUtf8Error(#[from] FromUtf8Error),
    #[error("Required column(s) not found in header: {0}")]
    MissingColumns(String),

    // Sequence store errors
    #[error("Sequence name '{0}' is not in the sequence store")]
    MissingSequence(String),
    #[error("Range [{1}, {2}) is invalid for sequence '{0}' of length {3}")]
    InvalidGenomicRangeForSequence(String, Position, Position, Position),
    #[error("Invalid nucleotide '{0}': expected one of A, C, G, T")]
    InvalidNucleotide(char),
    #[error("Position {0} is out of range for a sequence of length {1}")]
    PositionOutOfRange(Position, Position),

    // Command line tool related errors
    #[error("Invalid column index: columns are 1-indexed")]
    InvalidColumnIndex,
    #[error("Invalid position range: start ({0}) must be less than end ({1})")]
    InvalidPositionRange(Position, Position),
}
