//! Input/Output file handling with [`InputFile`] and [`OutputFile`].
//!
//! These types abstract over reading/writing plaintext and gzip-compressed
//! files, as well as standard input/output, so that every tool can sit in a
//! shell pipeline or work off files interchangeably.

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::error::GeneToolsError;

/// Check if a file is gzipped by looking for the magic numbers.
fn is_gzipped_file(file_path: &Path) -> io::Result<bool> {
    let mut file = File::open(file_path)?;
    let mut buffer = [0; 2];
    // An input shorter than two bytes cannot be a gzip stream.
    if file.read(&mut buffer)? < 2 {
        return Ok(false);
    }
    Ok(buffer == [0x1f, 0x8b])
}

enum InputSource {
    File(PathBuf),
    Stdin,
}

/// Represents an input stream.
///
/// This abstracts how data is read in, allowing plaintext files,
/// gzip-compressed files (detected from content, not extension), and
/// standard input to be read through a common interface. Standard input is
/// never decompressed.
pub struct InputFile {
    source: InputSource,
}

impl InputFile {
    /// Constructs a new `InputFile` for a path on disk.
    pub fn new(filepath: impl Into<PathBuf>) -> Self {
        Self {
            source: InputSource::File(filepath.into()),
        }
    }

    /// Constructs a new `InputFile` reading standard input.
    pub fn stdin() -> Self {
        Self {
            source: InputSource::Stdin,
        }
    }

    /// Build an `InputFile` from an optional command line path; `None` or
    /// `"-"` mean standard input.
    pub fn from_arg(filepath: Option<&PathBuf>) -> Self {
        match filepath {
            Some(path) if path.as_os_str() != "-" => Self::new(path),
            _ => Self::stdin(),
        }
    }

    /// Opens the source and returns a buffered reader, transparently
    /// decompressing gzip files.
    pub fn reader(&self) -> Result<BufReader<Box<dyn Read>>, GeneToolsError> {
        let reader: Box<dyn Read> = match &self.source {
            InputSource::File(path) => {
                let is_gzipped = is_gzipped_file(path)?;
                let file = File::open(path)?;
                if is_gzipped {
                    Box::new(GzDecoder::new(file))
                } else {
                    Box::new(file)
                }
            }
            InputSource::Stdin => Box::new(io::stdin()),
        };
        Ok(BufReader::new(reader))
    }

    /// Iterate over the lines of the input, with line terminators stripped.
    pub fn lines(
        &self,
    ) -> Result<impl Iterator<Item = io::Result<String>>, GeneToolsError> {
        Ok(self.reader()?.lines())
    }
}

enum OutputDestination {
    File(PathBuf),
    Stdout,
}

/// Represents an output stream.
///
/// This abstracts writing both plaintext and gzip-compressed files, as well
/// as standard output.
pub struct OutputFile {
    destination: OutputDestination,
    pub header: Option<Vec<String>>,
}

impl OutputFile {
    /// Constructs a new `OutputFile`.
    ///
    /// # Arguments
    /// * `filepath` - the path to write to. If the extension is `.gz`, the
    ///   output is gzip-compressed.
    /// * `header` - optional commented header lines written before any data.
    pub fn new(filepath: impl Into<PathBuf>, header: Option<Vec<String>>) -> Self {
        Self {
            destination: OutputDestination::File(filepath.into()),
            header,
        }
    }

    /// Constructs a new [`OutputFile`] for standard output.
    pub fn new_stdout(header: Option<Vec<String>>) -> Self {
        Self {
            destination: OutputDestination::Stdout,
            header,
        }
    }

    /// Build an `OutputFile` from an optional command line path; `None`
    /// means standard output.
    pub fn from_arg(filepath: Option<&PathBuf>) -> Self {
        filepath.map_or_else(|| Self::new_stdout(None), |path| Self::new(path, None))
    }

    /// Opens the destination and returns a writer. If a header is set, it is
    /// written first, each line prefixed with `#`.
    pub fn writer(&self) -> io::Result<Box<dyn Write>> {
        let mut writer: Box<dyn Write> = match &self.destination {
            OutputDestination::File(path) => {
                let is_gzip = path.extension().is_some_and(|ext| ext == "gz");
                if is_gzip {
                    Box::new(BufWriter::new(GzEncoder::new(
                        File::create(path)?,
                        Compression::default(),
                    )))
                } else {
                    Box::new(BufWriter::new(File::create(path)?))
                }
            }
            OutputDestination::Stdout => Box::new(BufWriter::new(io::stdout())),
        };
        if let Some(entries) = &self.header {
            for entry in entries {
                writeln!(writer, "#{}", entry)?;
            }
        }
        Ok(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::InputFile;
    use crate::test_utilities::{temp_gzipped_text, temp_text};
    use std::io::Read;

    #[test]
    fn plaintext_input_reads_verbatim() {
        let file = temp_text("id1\tfoo\nid2\tbar\n");
        let mut contents = String::new();
        InputFile::new(file.path())
            .reader()
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        assert_eq!(contents, "id1\tfoo\nid2\tbar\n");
    }

    #[test]
    fn gzipped_input_is_decompressed() {
        let file = temp_gzipped_text("chr1\t100\n");
        let mut contents = String::new();
        InputFile::new(file.path())
            .reader()
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        assert_eq!(contents, "chr1\t100\n");
    }

    #[test]
    fn empty_input_is_not_mistaken_for_gzip() {
        let file = temp_text("");
        let mut contents = String::new();
        InputFile::new(file.path())
            .reader()
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        assert!(contents.is_empty());
    }
}
