//! Core data types for tracking number identification.
//!
//! - [`CourierDefinition`](definition::CourierDefinition): a courier definition
//!   as decoded from JSON, before any pattern is compiled
//! - [`FormatDescriptor`](descriptor::FormatDescriptor): one courier service's
//!   compiled matching rule
//! - [`TrackingResult`](tracking::TrackingResult): what a successful match
//!   produces
//! - [`ServiceId`](types::ServiceId) and the well-known capture group names
//!
//! ## Capture Groups
//!
//! Service patterns use named capture groups. Two names are structural:
//!
//! | Group          | Meaning                                         |
//! |----------------|-------------------------------------------------|
//! | `SerialNumber` | the part of the number the checksum runs over   |
//! | `CheckDigit`   | the expected check digit                        |
//!
//! Every other group (`ServiceType`, `CountryCode`, `ShipperId`, ...) lands in
//! the result's detail map and may be enriched through lookup tables.

pub mod definition;
pub mod descriptor;
pub mod tracking;
pub mod types;
