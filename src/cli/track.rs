use clap::Args;
use serde::Serialize;

use crate::cli::{load_registry, tsv_field, OutputFormat};
use crate::core::tracking::TrackingResult;
use crate::matching::engine::Tracker;

#[derive(Args)]
pub struct TrackArgs {
    /// Tracking numbers to identify (quote numbers that contain spaces)
    #[arg(required = true, num_args = 1..)]
    pub numbers: Vec<String>,
}

/// Results for one command-line number
#[derive(Debug, Serialize)]
struct TrackReport<'a> {
    input: &'a str,
    results: Vec<TrackingResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Execute track subcommand
///
/// # Errors
///
/// Returns an error if the courier definitions cannot be loaded.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(
    args: TrackArgs,
    couriers: Option<&std::path::Path>,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let registry = load_registry(couriers, verbose)?;
    let tracker = Tracker::new(&registry);

    let reports: Vec<TrackReport<'_>> = args
        .numbers
        .iter()
        .map(|input| match tracker.track(input) {
            Ok(results) => TrackReport {
                input,
                results,
                error: None,
            },
            Err(e) => TrackReport {
                input,
                results: Vec::new(),
                error: Some(e.to_string()),
            },
        })
        .collect();

    match format {
        OutputFormat::Text => print_text_results(&reports, verbose),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
        OutputFormat::Tsv => print_tsv_results(&reports),
    }

    Ok(())
}

fn print_text_results(reports: &[TrackReport<'_>], verbose: bool) {
    for (i, report) in reports.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", report.input);

        if let Some(error) = &report.error {
            println!("  Error: {error}");
            continue;
        }
        if report.results.is_empty() {
            println!("  No matching courier service");
            continue;
        }

        for result in &report.results {
            print_result(result, verbose);
        }
    }
}

/// Print one result as an indented block
pub(crate) fn print_result(result: &TrackingResult, verbose: bool) {
    println!("  {} [{}]", result.service, result.courier);
    println!("    Tracking number: {}", result.tracking_number);
    if let Some(check_digit) = &result.check_digit {
        println!("    Check digit:     {check_digit}");
    }
    if let Some(url) = &result.tracking_url {
        println!("    Tracking URL:    {url}");
    }

    if verbose {
        println!("    Serial number:   {}", result.serial_number);
    }
    for (key, value) in &result.details {
        println!("    {key}: {value}");
    }
}

fn print_tsv_results(reports: &[TrackReport<'_>]) {
    println!("input\tcourier\tservice\ttracking_number\tserial_number\tcheck_digit\ttracking_url");
    for report in reports {
        for result in &report.results {
            println!("{}\t{}", tsv_field(report.input), tsv_row(result));
        }
    }
}

/// Result columns shared by the track and find TSV output
pub(crate) fn tsv_row(result: &TrackingResult) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}\t{}",
        result.courier,
        tsv_field(&result.service),
        result.tracking_number,
        result.serial_number,
        result.check_digit.as_deref().unwrap_or(""),
        result.tracking_url.as_deref().unwrap_or(""),
    )
}
