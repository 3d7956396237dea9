//! Registry of courier service descriptors.
//!
//! The registry holds every compiled [`FormatDescriptor`](crate::core::descriptor::FormatDescriptor)
//! in declaration order. It is built once and only read afterwards, so a
//! single instance can be shared by any number of concurrent matches.
//!
//! ## Embedded Definitions
//!
//! The default registry is compiled from the `couriers/*.json` files shipped
//! with the crate:
//!
//! - **UPS**: 1Z numbers
//! - **FedEx**: Express (12), Express (34), Ground (96), SSCC-18
//! - **USPS**: 91 (IMpb) and 20 digit numbers
//! - **S10**: UPU international postal items
//! - **DHL**, **Canada Post**, **Amazon Logistics**, **DPD**
//!
//! ## Example
//!
//! ```rust
//! use parcel_track::Registry;
//! use parcel_track::core::types::ServiceId;
//!
//! // Shared, lazily built embedded registry
//! let registry = Registry::embedded();
//!
//! for descriptor in registry.iter() {
//!     println!("{} ({})", descriptor.name, descriptor.courier_code);
//! }
//!
//! let s10 = registry.get(&ServiceId::new("s10"));
//! assert!(s10.is_some());
//! ```
//!
//! ## Custom Definitions
//!
//! ```rust,no_run
//! use parcel_track::Registry;
//! use std::path::Path;
//!
//! // A single JSON file, or a directory of them
//! let registry = Registry::load_from_path(Path::new("my_couriers/")).unwrap();
//! ```
//!
//! Definitions that fail to build (bad pattern, bad checksum parameters) are
//! skipped with a warning rather than failing the whole load.

pub mod builder;
pub mod pattern;
pub mod store;
