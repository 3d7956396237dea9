//! Courier definitions as they appear in the JSON definition files.
//!
//! These types mirror the on-disk layout one-to-one and carry no compiled
//! state. [`crate::registry::builder`] turns each [`ServiceDefinition`] into a
//! [`FormatDescriptor`](crate::core::descriptor::FormatDescriptor).

use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit JSON `null` like an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One courier definition file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourierDefinition {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub courier_code: String,

    /// Services offered by this courier, each with its own number format
    #[serde(rename = "tracking_numbers", default, deserialize_with = "null_as_default")]
    pub services: Vec<ServiceDefinition>,
}

/// A single tracking number format offered by a courier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDefinition {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    /// URL template; `%s` is replaced with the tracking number
    #[serde(default, deserialize_with = "null_as_default")]
    pub tracking_url: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub regex: PatternSource,

    #[serde(default, deserialize_with = "null_as_default")]
    pub validation: ValidationDefinition,

    #[serde(default, deserialize_with = "null_as_default")]
    pub additional: Vec<AdditionalDefinition>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub test_numbers: TestNumbers,
}

/// A pattern written either as one string or as fragments joined without a
/// separator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatternSource {
    Single(String),
    Parts(Vec<String>),
}

impl PatternSource {
    /// The full pattern text
    #[must_use]
    pub fn joined(&self) -> String {
        match self {
            Self::Single(s) => s.clone(),
            Self::Parts(parts) => parts.concat(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(s) => s.is_empty(),
            Self::Parts(parts) => parts.iter().all(String::is_empty),
        }
    }
}

impl Default for PatternSource {
    fn default() -> Self {
        Self::Single(String::new())
    }
}

impl From<&str> for PatternSource {
    fn from(s: &str) -> Self {
        Self::Single(s.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationDefinition {
    #[serde(default, deserialize_with = "null_as_default")]
    pub checksum: ChecksumConfig,

    #[serde(default, deserialize_with = "null_as_default")]
    pub additional: AdditionalValidation,

    #[serde(default, deserialize_with = "null_as_default")]
    pub serial_number_format: SerialNumberFormat,
}

/// Check digit algorithm selection and parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecksumConfig {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub evens_multiplier: i64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub odds_multiplier: i64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub weightings: Vec<i64>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub modulo1: i64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub modulo2: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalValidation {
    /// Names of `additional` tables whose literal entries must contain the
    /// extracted value for a match to stand
    #[serde(default, deserialize_with = "null_as_default")]
    pub exists: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerialNumberFormat {
    #[serde(default)]
    pub prepend_if: Option<PrependIfDefinition>,
}

/// Prefix the serial number with `content` unless it matches `matches_regex`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrependIfDefinition {
    #[serde(default)]
    pub matches_regex: Option<PatternSource>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
}

/// A lookup table keyed by the value of one capture group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalDefinition {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub regex_group_name: String,

    #[serde(rename = "lookup", default, deserialize_with = "null_as_default")]
    pub lookups: Vec<LookupDefinition>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupDefinition {
    #[serde(default)]
    pub matches: Option<String>,

    #[serde(default)]
    pub matches_regex: Option<PatternSource>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub country_code: Option<String>,

    #[serde(default)]
    pub country_short_code: Option<String>,

    #[serde(default)]
    pub country: Option<String>,

    #[serde(default)]
    pub courier: Option<String>,

    #[serde(default)]
    pub courier_url: Option<String>,

    #[serde(default)]
    pub upu_reference_url: Option<String>,
}

/// Literal example numbers used by self-tests
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestNumbers {
    #[serde(default, deserialize_with = "null_as_default")]
    pub valid: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub invalid: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_source_accepts_string_or_array() {
        let single: PatternSource = serde_json::from_str(r#""^(?<SerialNumber>[0-9]{9})$""#).unwrap();
        assert_eq!(single.joined(), "^(?<SerialNumber>[0-9]{9})$");

        let parts: PatternSource =
            serde_json::from_str(r#"["^(?<SerialNumber>", "[0-9]{9}", ")$"]"#).unwrap();
        assert_eq!(parts.joined(), "^(?<SerialNumber>[0-9]{9})$");
    }

    #[test]
    fn test_pattern_source_is_empty() {
        assert!(PatternSource::default().is_empty());
        assert!(PatternSource::Parts(vec![String::new()]).is_empty());
        assert!(!PatternSource::from("x").is_empty());
    }

    #[test]
    fn test_decode_minimal_courier() {
        let json = r#"{
            "name": "Example",
            "courier_code": "example",
            "tracking_numbers": [
                { "id": "ex", "name": "Example", "regex": "^(?<SerialNumber>[0-9]+)$" }
            ]
        }"#;
        let courier: CourierDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(courier.courier_code, "example");
        assert_eq!(courier.services.len(), 1);

        let service = &courier.services[0];
        assert!(service.validation.checksum.name.is_empty());
        assert!(service.validation.serial_number_format.prepend_if.is_none());
        assert!(service.test_numbers.valid.is_empty());
    }

    #[test]
    fn test_decode_validation_block() {
        let json = r#"{
            "checksum": { "name": "mod10", "evens_multiplier": 3, "odds_multiplier": 1 },
            "additional": { "exists": ["Courier"] },
            "serial_number_format": {
                "prepend_if": { "matches_regex": "^(?!9[1-5]).+", "content": "91" }
            }
        }"#;
        let validation: ValidationDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(validation.checksum.evens_multiplier, 3);
        assert_eq!(validation.checksum.odds_multiplier, 1);
        assert_eq!(validation.additional.exists, vec!["Courier".to_string()]);

        let prepend = validation.serial_number_format.prepend_if.unwrap();
        assert_eq!(prepend.content, "91");
        assert_eq!(prepend.matches_regex.unwrap().joined(), "^(?!9[1-5]).+");
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let json = r#"{
            "name": "Example",
            "courier_code": "example",
            "tracking_numbers": [{
                "id": "ex",
                "name": "Example",
                "regex": "^x$",
                "partners": [{ "partner_type": "courier", "partner_id": "usps" }]
            }]
        }"#;
        assert!(serde_json::from_str::<CourierDefinition>(json).is_ok());
    }

    #[test]
    fn test_decode_null_fields_as_defaults() {
        let json = r#"{
            "name": "Example",
            "courier_code": "example",
            "tracking_numbers": [{
                "id": "ex",
                "name": "Example",
                "description": null,
                "tracking_url": null,
                "regex": "^x$",
                "validation": { "checksum": { "name": null, "weightings": null } },
                "additional": [{ "name": "Types", "regex_group_name": "ServiceType", "lookup": null }],
                "test_numbers": null
            }]
        }"#;
        let courier: CourierDefinition = serde_json::from_str(json).unwrap();
        let service = &courier.services[0];
        assert!(service.description.is_empty());
        assert!(service.tracking_url.is_empty());
        assert!(service.validation.checksum.name.is_empty());
        assert!(service.validation.checksum.weightings.is_empty());
        assert!(service.additional[0].lookups.is_empty());
        assert_eq!(service.test_numbers, TestNumbers::default());
    }

    #[test]
    fn test_decode_null_services() {
        let json = r#"{ "name": "Example", "courier_code": "example", "tracking_numbers": null }"#;
        let courier: CourierDefinition = serde_json::from_str(json).unwrap();
        assert!(courier.services.is_empty());
    }
}
