use clap::Args;
use rayon::prelude::*;

use crate::cli::{with_thread_pool, OutputFormat, PairInput};
use crate::core::types::TandemRepeat;
use crate::index::IndexStrategy;
use crate::matching::engine::{AnnotateConfig, Annotator};
use crate::parsing::SequenceRecord;

#[derive(Args)]
pub struct TandemArgs {
    #[command(flatten)]
    pub input: PairInput,

    /// Worker threads for multi-record queries (0 = all cores)
    #[arg(short, long, default_value = "0")]
    pub threads: usize,
}

/// Execute tandem subcommand
///
/// # Errors
///
/// Returns an error if the inputs cannot be read.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: TandemArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let (reference, queries) = args.input.load()?;

    let config = AnnotateConfig {
        strategy: IndexStrategy::Automaton,
        ..AnnotateConfig::default()
    };
    let annotator = Annotator::new(reference.sequence.clone(), &config)?;

    let results: Vec<(&SequenceRecord, Vec<TandemRepeat>)> =
        with_thread_pool(args.threads, || {
            queries
                .par_iter()
                .map(|record| (record, annotator.tandem(&record.sequence)))
                .collect()
        })?;

    if verbose {
        let total: usize = results.iter().map(|(_, repeats)| repeats.len()).sum();
        eprintln!(
            "Found {total} tandem run(s) across {} query record(s)",
            results.len()
        );
    }

    match format {
        OutputFormat::Text => print_text_results(&results),
        OutputFormat::Json => print_json_results(&results)?,
        OutputFormat::Tsv => print_tsv_results(&results),
    }

    Ok(())
}

fn print_text_results(results: &[(&SequenceRecord, Vec<TandemRepeat>)]) {
    let multi = results.len() > 1;
    for (record, repeats) in results {
        if multi {
            println!("# {}", record.name);
        }
        let spans: Vec<String> = repeats.iter().map(|r| r.span().to_string()).collect();
        println!("[\n{}\n]", spans.join(",\n"));
    }
}

fn print_json_results(results: &[(&SequenceRecord, Vec<TandemRepeat>)]) -> anyhow::Result<()> {
    let output: Vec<serde_json::Value> = results
        .iter()
        .map(|(record, repeats)| {
            serde_json::json!({
                "name": record.name,
                "length": record.sequence.len(),
                "repeats": repeats,
                "spans": repeats.iter().map(TandemRepeat::span).collect::<Vec<_>>(),
            })
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_results(results: &[(&SequenceRecord, Vec<TandemRepeat>)]) {
    println!("query\tquery_start\tquery_end\treference_start\treference_end\tlength\tcount\treverse");
    for (record, repeats) in results {
        for r in repeats {
            let span = r.span();
            println!(
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                record.name,
                span.query_start,
                span.query_end,
                span.reference_start,
                span.reference_end,
                r.length,
                r.count,
                r.orientation.is_reverse()
            );
        }
    }
}
