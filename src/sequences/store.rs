//! In-memory storage of named nucleotide sequences loaded from FASTA.

use bytes::Bytes;
use indexmap::IndexMap;
use noodles::fasta;
use std::fmt;
use std::io::Write;
use std::ops::Deref;
use std::path::PathBuf;
use tracing::info;

use crate::error::GeneToolsError;
use crate::io::InputFile;
use crate::Position;

/// A newtype around raw nucleotide [`Bytes`], normalized to uppercase at
/// load time so callers can compare case-insensitively.
#[derive(Clone, Debug, PartialEq)]
pub struct Sequence(Bytes);

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

impl Deref for Sequence {
    type Target = Bytes;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<&str> for Sequence {
    fn from(s: &str) -> Self {
        Sequence(Bytes::from(s.as_bytes().to_ascii_uppercase()))
    }
}

impl Sequence {
    /// Get the length of the sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return whether this is an empty sequence.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Bounds-checked access to the base at a 0-based position.
    pub fn base(&self, position: Position) -> Option<u8> {
        self.0.get(position as usize).copied()
    }
}

/// A set of named sequences loaded from a (possibly gzip-compressed) FASTA
/// file, built once by a full-file scan and queried read-only afterwards.
///
/// Names are the first whitespace-delimited token of each header; the rest
/// of the header is discarded. A later record reusing a name silently
/// overwrites the earlier sequence, and sequence content is not validated.
pub struct SequenceSet {
    data: IndexMap<String, Sequence>,
}

impl SequenceSet {
    /// Load an entire FASTA file into memory.
    pub fn from_fasta(filepath: impl Into<PathBuf>) -> Result<Self, GeneToolsError> {
        let filepath = filepath.into();
        info!("reading FASTA file {}", filepath.display());

        let input_file = InputFile::new(&filepath);
        let mut reader = fasta::Reader::new(input_file.reader()?);

        let mut data = IndexMap::new();
        for result in reader.records() {
            let record = result?;
            let name = String::from_utf8(record.definition().name().to_vec())?;
            let sequence = record.sequence().as_ref().to_ascii_uppercase();
            data.insert(name, Sequence(Bytes::from(sequence)));
        }
        Ok(Self { data })
    }

    /// Retrieve a sequence by name. A missing name is a per-record
    /// condition for most callers, which skip the record and move on.
    pub fn get(&self, name: &str) -> Result<&Sequence, GeneToolsError> {
        self.data
            .get(name)
            .ok_or_else(|| GeneToolsError::MissingSequence(name.to_string()))
    }

    /// Retrieve all sequence names, in load order.
    pub fn seqnames(&self) -> Vec<String> {
        self.data.keys().cloned().collect()
    }

    /// Retrieve an [`IndexMap`] of the sequence names and their lengths.
    pub fn seqlens(&self) -> IndexMap<String, Position> {
        self.data
            .iter()
            .map(|(name, seq)| (name.clone(), seq.len() as Position))
            .collect()
    }

    /// The number of sequences in the set.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Return whether the set holds no sequences.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Extract `length` bases starting at the 0-based `start` position.
    ///
    /// A window running past the end of the sequence is an
    /// [`GeneToolsError::InvalidGenomicRangeForSequence`], which callers
    /// treat as a skip-this-record condition (e.g. a variant near a
    /// chromosome end), not a fatal error.
    pub fn substring(
        &self,
        name: &str,
        start: Position,
        length: Position,
    ) -> Result<String, GeneToolsError> {
        let sequence = self.get(name)?;
        let seqlen = sequence.len() as Position;
        let end = start.saturating_add(length);
        if end > seqlen {
            return Err(GeneToolsError::InvalidGenomicRangeForSequence(
                name.to_string(),
                start,
                end,
                seqlen,
            ));
        }
        let window = &sequence[start as usize..end as usize];
        Ok(String::from_utf8_lossy(window).into_owned())
    }

    /// Serialize the stored sequences back out as FASTA, wrapping sequence
    /// lines at `width` bases. Descriptions are not retained, so only the
    /// name is written on each header line.
    pub fn write_fasta(&self, writer: &mut dyn Write, width: usize) -> std::io::Result<()> {
        for (name, sequence) in &self.data {
            writeln!(writer, ">{}", name)?;
            for chunk in sequence.chunks(width.max(1)) {
                writer.write_all(chunk)?;
                writeln!(writer)?;
            }
        }
        Ok(())
    }
}
