use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A tracking number identified by one courier service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingResult {
    /// Courier code of the matching definition (e.g. `ups`)
    pub courier: String,

    /// Service display name (e.g. `FedEx Ground (96)`)
    pub service: String,

    /// Normalized number: uppercase, whitespace removed
    pub tracking_number: String,

    /// Checksummed part of the number, after any prefix was prepended
    pub serial_number: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_digit: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_url: Option<String>,

    /// Extracted capture groups plus enrichment fields
    #[serde(default)]
    pub details: BTreeMap<String, String>,
}

impl TrackingResult {
    /// Detail value by key
    #[must_use]
    pub fn detail(&self, key: &str) -> Option<&str> {
        self.details.get(key).map(String::as_str)
    }
}
