use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::cli::track::{print_result, tsv_row};
use crate::cli::{load_registry, tsv_field, OutputFormat};
use crate::matching::engine::Tracker;
use crate::matching::scan::FindResults;

#[derive(Args)]
pub struct FindArgs {
    /// Text file to scan
    /// Use '-' or omit for stdin
    #[arg(conflicts_with = "text")]
    pub input: Option<PathBuf>,

    /// Scan this text instead of reading a file
    #[arg(short, long)]
    pub text: Option<String>,
}

/// Execute find subcommand
///
/// # Errors
///
/// Returns an error if the input or the courier definitions cannot be read.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(
    args: FindArgs,
    couriers: Option<&std::path::Path>,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let text = read_input(&args)?;
    let registry = load_registry(couriers, verbose)?;
    let found = Tracker::new(&registry).find(&text)?;

    if verbose {
        eprintln!("Scanned {} terms", text.split_whitespace().count());
    }

    match format {
        OutputFormat::Text => print_text_results(&found, verbose),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&found)?),
        OutputFormat::Tsv => print_tsv_results(&found),
    }

    Ok(())
}

fn read_input(args: &FindArgs) -> anyhow::Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }

    match &args.input {
        Some(path) if path.to_string_lossy() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            Ok(buffer)
        }
    }
}

fn print_text_results(found: &FindResults, verbose: bool) {
    if found.is_empty() {
        eprintln!("No tracking numbers found.");
        return;
    }

    println!("Found {} tracking numbers", found.len());
    for (term, results) in found {
        println!();
        println!("{term}");
        for result in results {
            print_result(result, verbose);
        }
    }
}

fn print_tsv_results(found: &FindResults) {
    println!("term\tcourier\tservice\ttracking_number\tserial_number\tcheck_digit\ttracking_url");
    for (term, results) in found {
        for result in results {
            println!("{}\t{}", tsv_field(term), tsv_row(result));
        }
    }
}
