use regex::Regex;

use crate::checksum::Checksum;
use crate::core::definition::TestNumbers;
use crate::core::types::ServiceId;

/// One courier service's compiled matching rule
#[derive(Debug, Clone)]
pub struct FormatDescriptor {
    pub id: ServiceId,

    /// Service display name, reported as `TrackingResult::service`
    pub name: String,

    pub description: Option<String>,

    pub courier_code: String,

    pub courier_name: String,

    /// URL template with a single `%s` placeholder
    pub tracking_url: Option<String>,

    pub pattern: Regex,

    pub checksum: Checksum,

    /// Lookup tables, in declaration order
    pub enrichment: Vec<EnrichmentRule>,

    pub prepend: Option<PrependRule>,

    /// Names of enrichment rules that must confirm their group's value
    pub required_lookups: Vec<String>,

    pub test_numbers: TestNumbers,
}

impl FormatDescriptor {
    /// Enrichment rule by its declared name
    #[must_use]
    pub fn rule(&self, name: &str) -> Option<&EnrichmentRule> {
        self.enrichment.iter().find(|rule| rule.name == name)
    }

    /// Tracking URL for a normalized number, if the service publishes one
    #[must_use]
    pub fn tracking_url_for(&self, number: &str) -> Option<String> {
        self.tracking_url
            .as_deref()
            .map(|template| template.replacen("%s", number, 1))
    }

    /// Names of all capture groups declared by the pattern
    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.pattern.capture_names().flatten()
    }
}

/// Maps the value of one capture group to descriptive fields
#[derive(Debug, Clone)]
pub struct EnrichmentRule {
    pub name: String,

    /// Capture group whose value is looked up
    pub group: String,

    pub entries: Vec<LookupEntry>,
}

impl EnrichmentRule {
    /// First entry accepting `value`, in declaration order
    #[must_use]
    pub fn lookup(&self, value: &str) -> Option<&LookupEntry> {
        self.entries.iter().find(|entry| entry.accepts(value))
    }

    /// Whether some entry lists `value` literally; patterns do not count
    #[must_use]
    pub fn contains_literal(&self, value: &str) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.matches.as_deref() == Some(value))
    }
}

/// A single row of an enrichment table
#[derive(Debug, Clone, Default)]
pub struct LookupEntry {
    pub matches: Option<String>,
    pub pattern: Option<Regex>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub country: Option<String>,
    pub courier: Option<String>,
    pub courier_url: Option<String>,
    pub upu_reference_url: Option<String>,
}

impl LookupEntry {
    /// Exact literal equality, or a match of the secondary pattern
    #[must_use]
    pub fn accepts(&self, value: &str) -> bool {
        self.matches.as_deref() == Some(value)
            || self
                .pattern
                .as_ref()
                .is_some_and(|pattern| pattern.is_match(value))
    }
}

impl std::fmt::Display for LookupEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.name, &self.description) {
            (Some(name), Some(desc)) => write!(f, "{name} ({desc})"),
            (Some(name), None) => write!(f, "{name}"),
            (None, Some(desc)) => write!(f, "{desc}"),
            (None, None) => match (&self.matches, &self.pattern) {
                (Some(literal), _) => write!(f, "{literal}"),
                (None, Some(pattern)) => write!(f, "{}", pattern.as_str()),
                (None, None) => Ok(()),
            },
        }
    }
}

/// Prefix a serial number that does not match `pattern`
#[derive(Debug, Clone)]
pub struct PrependRule {
    pub pattern: Regex,
    pub content: String,
}

impl PrependRule {
    #[must_use]
    pub fn apply(&self, serial: String) -> String {
        if self.pattern.is_match(&serial) {
            serial
        } else {
            format!("{}{serial}", self.content)
        }
    }
}
