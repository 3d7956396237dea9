//! Tracking number matching engine.
//!
//! - [`Tracker`](engine::Tracker): classifies one candidate string
//!   ([`track`](engine::Tracker::track)) or scans free text
//!   ([`find`](engine::Tracker::find))
//! - [`enrichment`]: lookup-table fields merged into a result
//! - [`verify`]: runs every descriptor's example numbers through the tracker
//!
//! ## Matching Algorithm
//!
//! For a candidate string, after rejecting non-ASCII input and normalizing
//! (uppercase, whitespace removed), every descriptor is tried in registry
//! order:
//!
//! 1. **Pattern**: the descriptor's pattern must match; named groups are
//!    collected, trimmed, and empty ones dropped
//! 2. **Serial**: `SerialNumber` is pulled out, with the prepend rule applied
//! 3. **Checksum**: the serial must validate against `CheckDigit`
//! 4. **Required lookups**: each "exists" table must list the extracted value
//! 5. **Enrichment**: lookup tables add descriptive details
//!
//! Descriptors are independent; a number can legitimately match several.
//!
//! ## Example
//!
//! ```rust
//! use parcel_track::{Registry, Tracker};
//!
//! let tracker = Tracker::new(Registry::embedded());
//!
//! let results = tracker.track("1Z 30AA 3301 9867 8678").unwrap();
//! assert_eq!(results[0].courier, "ups");
//! assert_eq!(results[0].detail("ServiceType"), Some("01"));
//!
//! let found = tracker.find("shipped via RB123456785GB today").unwrap();
//! assert!(found.contains_key("RB123456785GB"));
//! ```

pub mod engine;
pub mod enrichment;
pub mod scan;
pub mod verify;
