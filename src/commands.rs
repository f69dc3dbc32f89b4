//! The functions behind each command line tool.
//!
//! Each command streams line-oriented input once, builds whatever lookup
//! tables it needs up front, and returns a [`CommandOutput`] whose
//! [`Report`] carries the per-record diagnostics accumulated along the way.

use std::collections::HashSet;
use std::io::Write;
use std::path::PathBuf;
use tracing::warn;

use crate::error::GeneToolsError;
use crate::genes::{GeneNameResolver, ResolutionSummary};
use crate::io::tsv::{require_columns, TsvRecord, TsvSerialize, VCF_TSV};
use crate::io::{InputFile, OutputFile};
use crate::reporting::{CommandOutput, Report};
use crate::sequences::{mutation_series, MutationKind, SequenceSet};
use crate::vcf::{collapse_first, VcfRecord, ANNOTATION_KEYS};
use crate::Position;

/// Read a one-ID-per-line file (first column if tab-delimited) into a set.
fn read_id_set(filepath: &PathBuf) -> Result<HashSet<String>, GeneToolsError> {
    let mut ids = HashSet::new();
    for line in InputFile::new(filepath).lines()? {
        let line = line?;
        let record = TsvRecord::parse(&line);
        if let Some(id) = record.field(0) {
            if !id.is_empty() {
                ids.insert(id.to_string());
            }
        }
    }
    Ok(ids)
}

/// Keep only rows whose value in the key column is a member of the ID set
/// in `ids`. The key column is either the 1-indexed `column`, or, when
/// `column_name` is given, looked up in the first input line (which is then
/// echoed through as the header). Comment lines (leading `#`) pass through
/// unchanged; non-matching rows, including rows too short to have the
/// column, are dropped silently. A `column_name` absent from the header is
/// a configuration error and fails the run.
pub fn filter_by_ids(
    ids: &PathBuf,
    input: Option<&PathBuf>,
    column: usize,
    column_name: Option<&str>,
    output: Option<&PathBuf>,
) -> Result<CommandOutput<()>, GeneToolsError> {
    let accepted = read_id_set(ids)?;

    let output_stream = OutputFile::from_arg(output);
    let mut writer = output_stream.writer()?;

    let mut lines = InputFile::from_arg(input).lines()?;
    let index = match column_name {
        Some(name) => {
            let Some(header) = lines.next() else {
                return Ok(CommandOutput::new((), Report::new()));
            };
            let header = header?;
            let index = require_columns(&header, &[name])?[0];
            writeln!(writer, "{}", header)?;
            index
        }
        None => column
            .checked_sub(1)
            .ok_or(GeneToolsError::InvalidColumnIndex)?,
    };

    for line in lines {
        let line = line?;
        if line.starts_with('#') || TsvRecord::parse(&line).matches(index, &accepted) {
            writeln!(writer, "{}", line)?;
        }
    }
    Ok(CommandOutput::new((), Report::new()))
}

/// Reduce multi-valued `ANN=`/`EFF=` INFO annotations of a VCF stream to
/// their first entry. Header lines and rows that do not parse as VCF pass
/// through verbatim.
pub fn collapse_annotations(
    input: Option<&PathBuf>,
    output: Option<&PathBuf>,
) -> Result<CommandOutput<()>, GeneToolsError> {
    let output_stream = OutputFile::from_arg(output);
    let mut writer = output_stream.writer()?;

    for line in InputFile::from_arg(input).lines()? {
        let line = line?;
        match VcfRecord::parse(&line) {
            Some(mut record) => {
                record.info = collapse_first(&record.info, &ANNOTATION_KEYS);
                writeln!(writer, "{}", record.to_tsv(&VCF_TSV))?;
            }
            None => writeln!(writer, "{}", line)?,
        }
    }
    Ok(CommandOutput::new((), Report::new()))
}

/// Rewrite gene-set rows (`set \t description \t gene...`) so every member
/// carries its current canonical name. Unresolvable members are dropped
/// from the output row; each row with translations or losses gets a
/// resolution summary in the report.
pub fn resolve_gene_sets(
    gene_table: &PathBuf,
    alias_tables: &[PathBuf],
    input: Option<&PathBuf>,
    output: Option<&PathBuf>,
) -> Result<CommandOutput<()>, GeneToolsError> {
    let resolver = GeneNameResolver::build(gene_table, alias_tables)?;

    let output_stream = OutputFile::from_arg(output);
    let mut writer = output_stream.writer()?;
    let mut report = Report::new();

    for line in InputFile::from_arg(input).lines()? {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        let record = TsvRecord::parse(&line);
        let group = record.field(0).unwrap_or("");
        let description = record.field(1).unwrap_or("");

        let mut out_fields = vec![group.to_string(), description.to_string()];
        let mut summary = ResolutionSummary::new(group);
        for name in record.fields().iter().skip(2) {
            let resolved = resolver.resolve(name);
            summary.record(name, resolved.as_ref());
            if let Some(resolved) = resolved {
                out_fields.push(resolved.name);
            }
        }
        writeln!(writer, "{}", out_fields.join("\t"))?;

        if summary.has_issues() {
            report.add_issue(summary.to_string());
        }
    }
    Ok(CommandOutput::new((), report))
}

/// Generate one test variant per position over the half-open
/// `[start, end)` range of `seqname`, written as minimal VCF rows with
/// 1-based positions. Positions that cannot be mutated (ambiguous base, a
/// deletion window past the sequence end) are skipped and tallied.
#[allow(clippy::too_many_arguments)]
pub fn generate_mutations(
    fasta: &PathBuf,
    seqname: &str,
    start: Position,
    end: Position,
    kind: MutationKind,
    insert_base: char,
    output: Option<&PathBuf>,
) -> Result<CommandOutput<()>, GeneToolsError> {
    if start >= end {
        return Err(GeneToolsError::InvalidPositionRange(start, end));
    }
    let sequences = SequenceSet::from_fasta(fasta)?;
    let sequence = sequences.get(seqname)?;

    let seqlen = sequence.len() as Position;
    let end = if end > seqlen {
        warn!(
            "range end {} clipped to the length of sequence '{}' ({})",
            end, seqname, seqlen
        );
        seqlen
    } else {
        end
    };

    let output_stream = OutputFile::from_arg(output);
    let mut writer = output_stream.writer()?;
    let mut report = Report::new();
    let mut skipped_positions = 0;

    for (position, result) in mutation_series(sequence, start, end, kind, insert_base as u8) {
        match result {
            Ok(mutation) => {
                let record = VcfRecord::new_minimal(
                    seqname,
                    mutation.position + 1,
                    mutation.reference,
                    mutation.alternate,
                );
                writeln!(writer, "{}", record.to_tsv(&VCF_TSV))?;
            }
            Err(err) => {
                skipped_positions += 1;
                warn!("skipping position {} on '{}': {}", position, seqname, err);
            }
        }
    }

    if skipped_positions > 0 {
        report.add_issue(format!(
            "{} positions could not be mutated and were skipped",
            skipped_positions
        ));
    }
    Ok(CommandOutput::new((), report))
}

/// Rewrite the REF column of a VCF stream from the reference FASTA.
/// Records on chromosomes absent from the reference, or whose REF window
/// runs past the end of the chromosome, are skipped with a diagnostic; the
/// stream continues to completion.
pub fn fix_reference_alleles(
    fasta: &PathBuf,
    input: Option<&PathBuf>,
    output: Option<&PathBuf>,
) -> Result<CommandOutput<()>, GeneToolsError> {
    let sequences = SequenceSet::from_fasta(fasta)?;

    let output_stream = OutputFile::from_arg(output);
    let mut writer = output_stream.writer()?;
    let mut report = Report::new();
    let mut corrected = 0;
    let mut skipped = 0;

    for line in InputFile::from_arg(input).lines()? {
        let line = line?;
        let Some(mut record) = VcfRecord::parse(&line) else {
            writeln!(writer, "{}", line)?;
            continue;
        };
        // VCF positions are 1-based
        let Some(window_start) = record.pos.checked_sub(1) else {
            skipped += 1;
            warn!("skipping record with position 0 on '{}'", record.chrom);
            continue;
        };
        let window_len = record.reference.len() as Position;
        match sequences.substring(&record.chrom, window_start, window_len) {
            Ok(expected) => {
                if record.reference != expected {
                    record.reference = expected;
                    corrected += 1;
                }
                writeln!(writer, "{}", record.to_tsv(&VCF_TSV))?;
            }
            Err(err @ GeneToolsError::MissingSequence(_))
            | Err(err @ GeneToolsError::InvalidGenomicRangeForSequence(..)) => {
                skipped += 1;
                warn!(
                    "skipping record at {}:{}: {}",
                    record.chrom, record.pos, err
                );
            }
            Err(err) => return Err(err),
        }
    }

    if corrected > 0 {
        report.add_issue(format!("{} REF alleles were corrected", corrected));
    }
    if skipped > 0 {
        report.add_issue(format!("{} records were skipped", skipped));
    }
    Ok(CommandOutput::new((), report))
}
