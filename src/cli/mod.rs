//! Command-line interface for parcel-track.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **track**: Identify the courier service of one or more numbers
//! - **find**: Extract tracking numbers from free text
//! - **couriers**: List or show the loaded courier services
//! - **verify**: Check every service against its declared example numbers
//!
//! ## Usage
//!
//! ```text
//! # Identify a number
//! parcel-track track 1Z30AA330198678678
//!
//! # Scan an email for numbers
//! parcel-track find message.txt
//!
//! # Pipe from another tool
//! pbpaste | parcel-track find -
//!
//! # JSON output for scripting
//! parcel-track track RB123456785GB --format json
//!
//! # Use your own courier definitions
//! parcel-track --couriers ./my-couriers verify
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::matching::engine::TrackError;
use crate::registry::store::Registry;

pub mod couriers;
pub mod find;
pub mod track;
pub mod verify;

#[derive(Parser)]
#[command(name = "parcel-track")]
#[command(author = "The parcel-track developers")]
#[command(version)]
#[command(about = "Identify and validate parcel tracking numbers")]
#[command(
    long_about = "parcel-track recognizes which courier service issued a tracking number.\n\nEach number is matched against a registry of courier formats and its check digit is validated. The result includes:\n- Every service whose format and check digit agree\n- Details decoded from the number, such as service type or origin country\n- A tracking URL when the courier publishes one"
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

    /// Courier definitions to use instead of the embedded ones
    /// (a JSON file, or a directory of JSON files)
    #[arg(long, global = true)]
    pub couriers: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Identify the courier service of tracking numbers
    Track(track::TrackArgs),

    /// Find tracking numbers in free text
    Find(find::FindArgs),

    /// Inspect the loaded courier services
    Couriers(couriers::CouriersArgs),

    /// Check every service against its example numbers
    Verify(verify::VerifyArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Load the registry from `path`, or the embedded definitions when `None`.
///
/// # Errors
///
/// Returns an error if the definitions cannot be read or no service could be
/// loaded from them.
pub fn load_registry(path: Option<&Path>, verbose: bool) -> anyhow::Result<Registry> {
    let registry = match path {
        Some(path) => Registry::load_from_path(path)
            .with_context(|| format!("Failed to load courier definitions from {}", path.display()))?,
        None => Registry::load_embedded(),
    };

    if registry.is_empty() {
        return Err(TrackError::NoServices.into());
    }

    if verbose {
        eprintln!(
            "Loaded {} tracking services from {} couriers",
            registry.len(),
            registry.couriers().len()
        );
    }

    Ok(registry)
}

/// Replace characters that would break a TSV row
pub(crate) fn tsv_field(value: &str) -> String {
    value.replace(['\t', '\n', '\r'], " ")
}
