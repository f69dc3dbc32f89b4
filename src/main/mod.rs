use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use genetools::{
    commands::{
        collapse_annotations, filter_by_ids, fix_reference_alleles, generate_mutations,
        resolve_gene_sets,
    },
    error::GeneToolsError,
    sequences::MutationKind,
    Position,
};

const INFO: &str = "\
genetools: command line utilities for munging genomic text files
usage: genetools [--help] <subcommand>

Subcommands:

  filter: keep rows whose key column matches an ID list.
  collapse: reduce multi-valued VCF annotations to their first entry.
  resolve: rewrite gene-set members to their current gene names.
  mutate: generate per-position test variants from a reference.
  fix-ref: correct VCF REF alleles against a reference.

Inputs may be plaintext or gzip-compressed; where a tool reads a stream,
omitting the input path (or passing '-') reads standard input.
";

#[derive(Parser)]
#[clap(name = "genetools")]
#[clap(about = INFO)]
struct Cli {
    #[arg(short, long, action = clap::ArgAction::Count)]
    debug: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Keep rows whose key column value is in an accepted-ID list.
    Filter {
        /// a file of accepted IDs, one per line
        #[arg(long, required = true)]
        ids: PathBuf,

        /// an input TSV file (standard input if not given)
        input: Option<PathBuf>,

        /// the 1-indexed column holding the key
        #[arg(long, default_value_t = 1)]
        column: usize,

        /// look the key column up by name in the first (header) line
        #[arg(long, conflicts_with = "column")]
        key: Option<String>,

        /// an optional output file (standard output will be used if not specified)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Collapse multi-valued ANN=/EFF= INFO annotations to their first entry.
    Collapse {
        /// an input VCF file (standard input if not given)
        input: Option<PathBuf>,

        /// an optional output file (standard output will be used if not specified)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Rewrite gene-set members to their current gene names.
    Resolve {
        /// the gene table: geneId, current name, optional previous name
        #[arg(long, required = true)]
        genes: PathBuf,

        /// HGNC-style synonym tables (repeatable)
        #[arg(long = "hgnc")]
        hgnc: Vec<PathBuf>,

        /// an input gene-set file (standard input if not given)
        input: Option<PathBuf>,

        /// an optional output file (standard output will be used if not specified)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Generate one test variant per position of a reference region.
    Mutate {
        /// the reference FASTA (plain or gzip-compressed)
        #[arg(long, required = true)]
        fasta: PathBuf,

        /// the sequence (e.g. chromosome) to scan
        #[arg(long, required = true)]
        seqname: String,

        /// 0-based start of the scanned range
        #[arg(long, required = true)]
        start: Position,

        /// 0-based exclusive end of the scanned range
        #[arg(long, required = true)]
        end: Position,

        /// the kind of variant to generate at each position
        #[arg(long, value_enum, default_value_t = MutationKind::Snv)]
        kind: MutationKind,

        /// the base appended by insertion variants
        #[arg(long, default_value_t = 'T')]
        insert_base: char,

        /// an optional output file (standard output will be used if not specified)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Correct the REF column of a VCF stream against a reference FASTA.
    FixRef {
        /// the reference FASTA (plain or gzip-compressed)
        #[arg(long, required = true)]
        fasta: PathBuf,

        /// an input VCF file (standard input if not given)
        input: Option<PathBuf>,

        /// an optional output file (standard output will be used if not specified)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn run() -> Result<(), GeneToolsError> {
    let cli = Cli::parse();
    let result = match &cli.command {
        Some(Commands::Filter {
            ids,
            input,
            column,
            key,
            output,
        }) => filter_by_ids(ids, input.as_ref(), *column, key.as_deref(), output.as_ref()),
        Some(Commands::Collapse { input, output }) => {
            collapse_annotations(input.as_ref(), output.as_ref())
        }
        Some(Commands::Resolve {
            genes,
            hgnc,
            input,
            output,
        }) => resolve_gene_sets(genes, hgnc, input.as_ref(), output.as_ref()),
        Some(Commands::Mutate {
            fasta,
            seqname,
            start,
            end,
            kind,
            insert_base,
            output,
        }) => generate_mutations(
            fasta,
            seqname,
            *start,
            *end,
            *kind,
            *insert_base,
            output.as_ref(),
        ),
        Some(Commands::FixRef {
            fasta,
            input,
            output,
        }) => fix_reference_alleles(fasta, input.as_ref(), output.as_ref()),
        None => {
            println!("{}\n", INFO);
            std::process::exit(1);
        }
    };
    let output = result?;
    output.report.print();
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(_) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
