//! Command-line interface for ref-repeats.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **annotate**: Decompose a query into reference pieces and report nested repeats
//! - **tandem**: Report back-to-back copies of reference pieces in a query
//! - **revcomp**: Print the reverse complement of each input sequence
//!
//! ## Usage
//!
//! ```text
//! # Reference and query in separate files
//! ref-repeats annotate --reference ref.fa --query reads.fa
//!
//! # Two-line input: reference on line 1, query on line 2
//! ref-repeats annotate --pair test_1.txt
//!
//! # Long reference, tandem copies as positional tuples
//! ref-repeats tandem --reference chr.fa --query contig.fa
//!
//! # JSON output for scripting
//! ref-repeats annotate --pair test_1.txt --format json
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use crate::parsing::{self, text::parse_pair_file, InputFormat, SequenceRecord};

pub mod annotate;
pub mod revcomp;
pub mod tandem;

#[derive(Parser)]
#[command(name = "ref-repeats")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Decompose a query into exact reference pieces and report repeats")]
#[command(
    long_about = "ref-repeats splits a query sequence into the fewest pieces that occur exactly in a reference, either as written or as its reverse complement.\n\nIt reports:\n- Pieces nested inside other pieces, with how often each occurs\n- Back-to-back copies of the longest matching pieces"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decompose a query and report nested repeats
    Annotate(annotate::AnnotateArgs),

    /// Report tandem copies of reference pieces in a query
    Tandem(tandem::TandemArgs),

    /// Print reverse complements
    Revcomp(revcomp::RevcompArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Reference and query inputs shared by `annotate` and `tandem`
#[derive(Args)]
pub struct PairInput {
    /// Reference file (FASTA or plain text, one record)
    #[arg(short, long, required_unless_present = "pair")]
    pub reference: Option<PathBuf>,

    /// Query file (FASTA or plain text); every FASTA record is processed
    #[arg(short, long, required_unless_present = "pair")]
    pub query: Option<PathBuf>,

    /// Two-line file: reference on the first line, query on the second
    #[arg(long, conflicts_with_all = ["reference", "query"])]
    pub pair: Option<PathBuf>,

    /// Input format (detected from the file extension by default)
    #[arg(long)]
    pub input_format: Option<InputFormat>,
}

impl PairInput {
    /// Load the reference record and every query record
    ///
    /// # Errors
    ///
    /// Returns an error if either input cannot be read or parsed.
    pub fn load(&self) -> anyhow::Result<(SequenceRecord, Vec<SequenceRecord>)> {
        if let Some(path) = &self.pair {
            let (reference, query) = parse_pair_file(path)
                .with_context(|| format!("Failed to read pair file {}", path.display()))?;
            return Ok((reference, vec![query]));
        }

        let (Some(reference_path), Some(query_path)) = (&self.reference, &self.query) else {
            anyhow::bail!("Both --reference and --query are required without --pair");
        };

        let reference = parsing::read_single(reference_path, self.input_format)
            .with_context(|| format!("Failed to read reference {}", reference_path.display()))?;
        let queries = parsing::read_sequences(query_path, self.input_format)
            .with_context(|| format!("Failed to read query {}", query_path.display()))?;

        Ok((reference, queries))
    }
}

/// Run `f` on a dedicated rayon pool with `threads` workers (0 = all cores)
///
/// # Errors
///
/// Returns an error if the thread pool cannot be built.
pub fn with_thread_pool<T: Send>(
    threads: usize,
    f: impl FnOnce() -> T + Send,
) -> anyhow::Result<T> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .context("Failed to build thread pool")?;
    Ok(pool.install(f))
}
