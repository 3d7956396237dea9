use serde::{Deserialize, Serialize};

/// Unique identifier for a courier service in the registry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceId(pub String);

impl ServiceId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

impl std::fmt::Display for ServiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Capture group holding the checksummed part of the number
pub const SERIAL_NUMBER_GROUP: &str = "SerialNumber";

/// Capture group holding the check digit
pub const CHECK_DIGIT_GROUP: &str = "CheckDigit";

/// Capture group enriched with service name and description
pub const SERVICE_TYPE_GROUP: &str = "ServiceType";

/// Capture group enriched with country and postal operator
pub const COUNTRY_CODE_GROUP: &str = "CountryCode";

/// Capture group enriched with a container type label
pub const SHIPPING_CONTAINER_TYPE_GROUP: &str = "ShippingContainerType";

/// Whether an example number is expected to match its service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expectation {
    Valid,
    Invalid,
}

impl std::fmt::Display for Expectation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Valid => write!(f, "valid"),
            Self::Invalid => write!(f, "invalid"),
        }
    }
}
