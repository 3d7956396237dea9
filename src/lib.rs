//! # parcel-track
//!
//! A library for recognizing parcel tracking numbers and validating their
//! check digits.
//!
//! Carriers print tracking numbers in dozens of formats, many of which
//! overlap: a 20 digit number may be a USPS label or a FedEx SSCC-18, and a
//! 12 digit number may be FedEx Express or a mistyped UPS number.
//! `parcel-track` solves this by trying a candidate against a registry of
//! courier service formats, each pairing a pattern with the check digit
//! algorithm the carrier uses.
//!
//! ## Features
//!
//! - **Checksum validation**: mod 7, mod 10, S10, ISO 7064 mod 37/36, and
//!   weighted-sum check digits
//! - **Overlap aware**: every service whose format and checksum agree is
//!   reported, in registry order
//! - **Enrichment**: lookup tables decode service types, countries, and
//!   container types from the number itself
//! - **Free-text scanning**: pulls numbers out of arbitrary text, in parallel
//! - **Data driven**: formats are JSON definitions, embedded by default and
//!   replaceable at run time
//!
//! ## Example
//!
//! ```rust
//! let results = parcel_track::track("1Z30AA330198678678").unwrap();
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].service, "UPS");
//! assert_eq!(results[0].check_digit.as_deref(), Some("8"));
//!
//! let found = parcel_track::find("Label RB123456785GB ref 42").unwrap();
//! assert_eq!(found["RB123456785GB"][0].detail("Country"), Some("United Kingdom"));
//! ```
//!
//! ## Modules
//!
//! - [`checksum`]: Check digit algorithms
//! - [`core`]: Definition, descriptor, and result types
//! - [`registry`]: Building and storing service descriptors
//! - [`matching`]: The tracker: single-number matching and text scanning
//! - [`cli`]: Command-line interface implementation

pub mod checksum;
pub mod cli;
pub mod core;
pub mod matching;
pub mod registry;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::checksum::Checksum;
pub use crate::core::descriptor::FormatDescriptor;
pub use crate::core::tracking::TrackingResult;
pub use crate::core::types::*;
pub use crate::matching::engine::{TrackError, Tracker};
pub use crate::matching::scan::FindResults;
pub use crate::registry::store::Registry;

/// Match one candidate number against the embedded courier definitions.
///
/// # Errors
///
/// Returns `TrackError::UnsupportedCharacters` if `number` contains
/// non-ASCII characters.
pub fn track(number: &str) -> Result<Vec<TrackingResult>, TrackError> {
    Tracker::new(Registry::embedded()).track(number)
}

/// Extract tracking numbers from free text using the embedded definitions.
///
/// # Errors
///
/// Only fails if the embedded registry is empty, which a release build
/// rules out.
pub fn find(text: &str) -> Result<FindResults, TrackError> {
    Tracker::new(Registry::embedded()).find(text)
}
