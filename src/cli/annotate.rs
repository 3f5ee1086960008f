use anyhow::Context;
use clap::Args;
use rayon::prelude::*;

use crate::cli::{with_thread_pool, OutputFormat, PairInput};
use crate::index::IndexStrategy;
use crate::matching::engine::{AnnotateConfig, Annotation, Annotator};
use crate::parsing::SequenceRecord;
use crate::utils::validation::{sequence_digest, DEFAULT_SUBSTRING_INDEX_LIMIT};

#[derive(Args)]
pub struct AnnotateArgs {
    #[command(flatten)]
    pub input: PairInput,

    /// Index backing the segmenter
    #[arg(long, value_enum, default_value = "auto")]
    pub strategy: IndexStrategy,

    /// Longest reference for the substring index; longer references use the automata
    #[arg(long, default_value_t = DEFAULT_SUBSTRING_INDEX_LIMIT)]
    pub index_limit: usize,

    /// Also list the segments of each decomposition
    #[arg(long)]
    pub segments: bool,

    /// Worker threads for multi-record queries (0 = all cores)
    #[arg(short, long, default_value = "0")]
    pub threads: usize,
}

/// Annotated query record
struct RecordAnnotation<'a> {
    record: &'a SequenceRecord,
    annotation: Annotation,
}

/// Execute annotate subcommand
///
/// # Errors
///
/// Returns an error if the inputs cannot be read, the index cannot be built, or some query
/// cannot be decomposed over the reference.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: AnnotateArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let (reference, queries) = args.input.load()?;

    if verbose {
        eprintln!(
            "Reference '{}': {} symbols; {} query record(s)",
            reference.name,
            reference.sequence.len(),
            queries.len()
        );
    }

    let config = AnnotateConfig {
        strategy: args.strategy,
        substring_index_limit: args.index_limit,
    };
    let annotator = Annotator::new(reference.sequence.clone(), &config)?;

    if verbose {
        eprintln!("Index strategy: {:?}", annotator.strategy());
    }

    let results: anyhow::Result<Vec<RecordAnnotation<'_>>> = with_thread_pool(args.threads, || {
        queries
            .par_iter()
            .map(|record| {
                annotator
                    .annotate(&record.sequence)
                    .map(|annotation| RecordAnnotation { record, annotation })
                    .with_context(|| format!("Failed to annotate query '{}'", record.name))
            })
            .collect()
    })?;
    let results = results?;

    match format {
        OutputFormat::Text => print_text_results(&results, args.segments),
        OutputFormat::Json => print_json_results(&reference, &annotator, &results)?,
        OutputFormat::Tsv => print_tsv_results(&results),
    }

    Ok(())
}

fn print_text_results(results: &[RecordAnnotation<'_>], show_segments: bool) {
    let multi = results.len() > 1;
    for r in results {
        if multi {
            println!("# {}", r.record.name);
        }
        if show_segments {
            println!("Segments:");
            for seg in &r.annotation.segments {
                println!("  {seg}");
            }
        }
        for stat in &r.annotation.repeats {
            println!(
                "Position in Reference: {}, Repeat Length: {}, Repeat Count: {}, Reverse: {}",
                stat.end,
                stat.length,
                stat.count,
                stat.orientation.as_yes_no()
            );
        }
    }
}

fn print_json_results(
    reference: &SequenceRecord,
    annotator: &Annotator,
    results: &[RecordAnnotation<'_>],
) -> anyhow::Result<()> {
    let queries: Vec<serde_json::Value> = results
        .iter()
        .map(|r| {
            serde_json::json!({
                "name": r.record.name,
                "length": r.record.sequence.len(),
                "md5": sequence_digest(r.record.sequence.as_bytes()),
                "segments": r.annotation.segments,
                "repeats": r.annotation.repeats,
            })
        })
        .collect();

    let output = serde_json::json!({
        "reference": {
            "name": reference.name,
            "length": reference.sequence.len(),
            "md5": sequence_digest(reference.sequence.as_bytes()),
        },
        "strategy": format!("{:?}", annotator.strategy()).to_lowercase(),
        "queries": queries,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_results(results: &[RecordAnnotation<'_>]) {
    println!("query\tend\tlength\tcount\treverse");
    for r in results {
        for stat in &r.annotation.repeats {
            println!(
                "{}\t{}\t{}\t{}\t{}",
                r.record.name,
                stat.end,
                stat.length,
                stat.count,
                stat.orientation.is_reverse()
            );
        }
    }
}
