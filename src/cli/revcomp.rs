use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::parsing::{self, InputFormat};

#[derive(Args)]
pub struct RevcompArgs {
    /// Input file (FASTA or plain text); use '-' for stdin
    #[arg(required = true)]
    pub input: PathBuf,

    /// Input format (detected from the file extension by default)
    #[arg(long)]
    pub input_format: Option<InputFormat>,
}

/// Execute revcomp subcommand
///
/// # Errors
///
/// Returns an error if the input cannot be read.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: RevcompArgs, format: OutputFormat) -> anyhow::Result<()> {
    let records = parsing::read_sequences(&args.input, args.input_format)?;

    match format {
        OutputFormat::Text => {
            for record in &records {
                println!(">{}", record.name);
                println!("{}", record.sequence.reverse_complement());
            }
        }
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = records
                .iter()
                .map(|record| {
                    serde_json::json!({
                        "name": record.name,
                        "sequence": record.sequence.reverse_complement().to_string(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("name\tsequence");
            for record in &records {
                println!("{}\t{}", record.name, record.sequence.reverse_complement());
            }
        }
    }

    Ok(())
}
