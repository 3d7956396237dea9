use clap::{Args, Subcommand};

use crate::cli::{load_registry, tsv_field, OutputFormat};
use crate::core::descriptor::FormatDescriptor;
use crate::core::types::ServiceId;

#[derive(Args)]
pub struct CouriersArgs {
    #[command(subcommand)]
    pub command: CouriersCommands,
}

#[derive(Subcommand)]
pub enum CouriersCommands {
    /// List all tracking services
    List {
        /// Only show services of this courier code (e.g., "fedex")
        #[arg(long)]
        courier: Option<String>,
    },

    /// Show details of a specific tracking service
    Show {
        /// Service ID (e.g., "fedex_ground_96")
        #[arg(required = true)]
        id: String,
    },
}

/// Execute couriers subcommand
///
/// # Errors
///
/// Returns an error if the definitions cannot be loaded or the service is unknown.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(
    args: CouriersArgs,
    couriers: Option<&std::path::Path>,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let registry = load_registry(couriers, verbose)?;

    match args.command {
        CouriersCommands::List { courier } => {
            let services: Vec<&FormatDescriptor> = registry
                .iter()
                .filter(|d| courier.as_deref().map_or(true, |c| d.courier_code == c))
                .collect();
            print_list(&services, format)
        }
        CouriersCommands::Show { id } => {
            let descriptor = registry
                .get(&ServiceId::new(id.as_str()))
                .ok_or_else(|| anyhow::anyhow!("Unknown tracking service: {id}"))?;
            print_details(descriptor, format)
        }
    }
}

fn service_json(descriptor: &FormatDescriptor) -> serde_json::Value {
    serde_json::json!({
        "id": descriptor.id.0,
        "name": descriptor.name,
        "description": descriptor.description,
        "courier_code": descriptor.courier_code,
        "courier_name": descriptor.courier_name,
        "checksum": descriptor.checksum.name(),
        "tracking_url": descriptor.tracking_url,
    })
}

fn print_list(services: &[&FormatDescriptor], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            println!("{:<20} {:<30} {:<15} {:<10}", "ID", "Name", "Courier", "Checksum");
            println!("{}", "-".repeat(78));
            for d in services {
                println!(
                    "{:<20} {:<30} {:<15} {:<10}",
                    d.id.0,
                    d.name,
                    d.courier_code,
                    d.checksum.name()
                );
            }
            println!();
            println!("Total: {} tracking services", services.len());
        }
        OutputFormat::Json => {
            let output: Vec<_> = services.iter().map(|d| service_json(d)).collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("id\tname\tcourier_code\tcourier_name\tchecksum");
            for d in services {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    d.id,
                    tsv_field(&d.name),
                    d.courier_code,
                    tsv_field(&d.courier_name),
                    d.checksum.name()
                );
            }
        }
    }
    Ok(())
}

fn print_details(d: &FormatDescriptor, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let mut json = service_json(d);
            json["pattern"] = serde_json::json!(d.pattern.as_str());
            json["groups"] = serde_json::json!(d.group_names().collect::<Vec<_>>());
            let enrichment: Vec<serde_json::Value> = d
                .enrichment
                .iter()
                .map(|rule| {
                    let entries: Vec<String> = rule.entries.iter().map(ToString::to_string).collect();
                    serde_json::json!({
                        "name": rule.name,
                        "group": rule.group,
                        "entries": entries,
                    })
                })
                .collect();
            json["enrichment"] = serde_json::json!(enrichment);
            json["required_lookups"] = serde_json::json!(d.required_lookups);
            json["test_numbers"] = serde_json::json!({
                "valid": d.test_numbers.valid,
                "invalid": d.test_numbers.invalid,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Text | OutputFormat::Tsv => {
            println!("ID:           {}", d.id);
            println!("Name:         {}", d.name);
            if let Some(desc) = &d.description {
                println!("Description:  {desc}");
            }
            println!("Courier:      {} ({})", d.courier_name, d.courier_code);
            println!("Checksum:     {}", d.checksum.name());
            println!("Pattern:      {}", d.pattern.as_str());
            if let Some(prepend) = &d.prepend {
                println!(
                    "Prepend:      {} unless serial matches {}",
                    prepend.content,
                    prepend.pattern.as_str()
                );
            }
            if let Some(url) = &d.tracking_url {
                println!("Tracking URL: {url}");
            }

            for rule in &d.enrichment {
                let required = if d.required_lookups.contains(&rule.name) {
                    ", required"
                } else {
                    ""
                };
                println!();
                println!("{} ({}{required}):", rule.name, rule.group);
                for entry in &rule.entries {
                    let key = entry
                        .matches
                        .as_deref()
                        .or_else(|| entry.pattern.as_ref().map(regex::Regex::as_str))
                        .unwrap_or("");
                    println!("  {key:<12} {entry}");
                }
            }

            println!();
            println!("Valid examples:   {}", d.test_numbers.valid.join(", "));
            println!("Invalid examples: {}", d.test_numbers.invalid.join(", "));
        }
    }
    Ok(())
}
