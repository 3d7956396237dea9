use clap::Args;

use crate::cli::{load_registry, OutputFormat};
use crate::matching::verify::{failures, verify_examples, ExampleOutcome};

#[derive(Args)]
pub struct VerifyArgs {
    /// Only report failing examples
    #[arg(long)]
    pub failures_only: bool,
}

/// Execute verify subcommand
///
/// # Errors
///
/// Returns an error if the definitions cannot be loaded or any example fails.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(
    args: VerifyArgs,
    couriers: Option<&std::path::Path>,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let registry = load_registry(couriers, verbose)?;
    let outcomes = verify_examples(&registry);

    let shown: Vec<&ExampleOutcome> = if args.failures_only {
        failures(&outcomes).collect()
    } else {
        outcomes.iter().collect()
    };

    match format {
        OutputFormat::Text => {
            for o in &shown {
                let status = if o.passed { "ok  " } else { "FAIL" };
                println!(
                    "{status} {:<18} {:<8} {}",
                    o.service_id.0,
                    o.expectation.to_string(),
                    o.number
                );
                if !o.passed || verbose {
                    match &o.error {
                        Some(error) => println!("       error: {error}"),
                        None => println!("       matched: [{}]", o.matched_services.join(", ")),
                    }
                }
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&shown)?),
        OutputFormat::Tsv => {
            println!("service_id\texpectation\tnumber\tpassed\tmatched_services");
            for o in &shown {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    o.service_id,
                    o.expectation,
                    o.number,
                    o.passed,
                    o.matched_services.join(",")
                );
            }
        }
    }

    let failed = failures(&outcomes).count();
    if failed > 0 {
        anyhow::bail!("{failed} of {} example numbers failed verification", outcomes.len());
    }

    eprintln!("All {} example numbers verified", outcomes.len());
    Ok(())
}
