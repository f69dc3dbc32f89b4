//! Test fixtures and test utility functions.

use flate2::write::GzEncoder;
use flate2::Compression;
use rand::{thread_rng, Rng};
use std::io::Write;
use tempfile::NamedTempFile;

/// The unambiguous nucleotides used for random test sequences.
pub const BASES: &[u8; 4] = b"ACGT";

/// Build a random uppercase nucleotide sequence of the given length.
pub fn random_sequence(length: usize) -> String {
    let mut rng = thread_rng();
    (0..length)
        .map(|_| BASES[rng.gen_range(0..BASES.len())] as char)
        .collect()
}

/// Write `contents` to a named temporary file.
pub fn temp_text(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("could not create temp file");
    file.write_all(contents.as_bytes())
        .expect("could not write temp file");
    file.flush().expect("could not flush temp file");
    file
}

/// Write `contents` to a gzip-compressed named temporary file.
pub fn temp_gzipped_text(contents: &str) -> NamedTempFile {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(contents.as_bytes())
        .expect("could not compress temp contents");
    let compressed = encoder.finish().expect("could not finish gzip stream");

    let mut file = NamedTempFile::new().expect("could not create temp file");
    file.write_all(&compressed).expect("could not write temp file");
    file.flush().expect("could not flush temp file");
    file
}

/// Write a FASTA temporary file from (header, sequence) pairs. The
/// sequence string may contain embedded newlines to produce wrapped
/// records.
pub fn temp_fasta(records: &[(&str, &str)]) -> NamedTempFile {
    let mut contents = String::new();
    for (header, sequence) in records {
        contents.push_str(&format!(">{}\n{}\n", header, sequence));
    }
    temp_text(&contents)
}
