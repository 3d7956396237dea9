use std::collections::BTreeMap;

use thiserror::Error;

use crate::core::descriptor::FormatDescriptor;
use crate::core::tracking::TrackingResult;
use crate::core::types::{CHECK_DIGIT_GROUP, SERIAL_NUMBER_GROUP};
use crate::matching::enrichment;
use crate::registry::store::Registry;
use crate::utils::validation::{is_plain_ascii, normalize};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackError {
    /// Input contains characters outside the ASCII range
    #[error("extended characters present")]
    UnsupportedCharacters,

    /// The registry holds no descriptors
    #[error("no tracking services loaded")]
    NoServices,
}

/// Classifies candidate strings against a registry
#[derive(Debug, Clone, Copy)]
pub struct Tracker<'a> {
    registry: &'a Registry,
}

impl<'a> Tracker<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    /// Identify every service whose format and checksum accept `input`.
    ///
    /// The input is uppercased and stripped of whitespace first. An empty
    /// result means no service applies.
    ///
    /// # Errors
    ///
    /// Returns `TrackError::UnsupportedCharacters` for non-ASCII input and
    /// `TrackError::NoServices` when the registry is empty.
    pub fn track(&self, input: &str) -> Result<Vec<TrackingResult>, TrackError> {
        if !is_plain_ascii(input) {
            return Err(TrackError::UnsupportedCharacters);
        }
        if self.registry.is_empty() {
            return Err(TrackError::NoServices);
        }

        let number = normalize(input);
        Ok(self
            .registry
            .iter()
            .filter_map(|descriptor| match_descriptor(descriptor, &number))
            .collect())
    }
}

/// Evaluate one descriptor against a normalized number
pub(crate) fn match_descriptor(
    descriptor: &FormatDescriptor,
    number: &str,
) -> Option<TrackingResult> {
    let captures = descriptor.pattern.captures(number)?;

    let mut details: BTreeMap<String, String> = descriptor
        .group_names()
        .filter_map(|name| {
            let value = captures.name(name)?.as_str().trim();
            (!value.is_empty()).then(|| (name.to_string(), value.to_string()))
        })
        .collect();

    let serial_number = details
        .remove(SERIAL_NUMBER_GROUP)
        .map(|serial| match &descriptor.prepend {
            Some(rule) => rule.apply(serial),
            None => serial,
        })
        .unwrap_or_default();
    let check_digit = details.remove(CHECK_DIGIT_GROUP);

    if !descriptor
        .checksum
        .validate(&serial_number, check_digit.as_deref().unwrap_or_default())
    {
        tracing::debug!(
            "{}: {} check digit rejected for serial {serial_number}",
            descriptor.id,
            descriptor.checksum.name()
        );
        return None;
    }

    if let Some(missing) = unconfirmed_lookup(descriptor, &details) {
        tracing::debug!(
            "{}: required lookup '{missing}' not satisfied",
            descriptor.id
        );
        return None;
    }

    enrichment::enrich(descriptor, &mut details);

    Some(TrackingResult {
        courier: descriptor.courier_code.clone(),
        service: descriptor.name.clone(),
        tracking_number: number.to_string(),
        serial_number,
        check_digit,
        tracking_url: descriptor.tracking_url_for(number),
        details,
    })
}

/// First required lookup whose table does not list the extracted value.
///
/// A required name with no matching rule is never satisfied.
fn unconfirmed_lookup<'d>(
    descriptor: &'d FormatDescriptor,
    details: &BTreeMap<String, String>,
) -> Option<&'d str> {
    descriptor
        .required_lookups
        .iter()
        .find(|name| {
            !descriptor.rule(name).is_some_and(|rule| {
                details
                    .get(&rule.group)
                    .is_some_and(|value| rule.contains_literal(value))
            })
        })
        .map(String::as_str)
}
