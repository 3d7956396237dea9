//! Conversion of decoded courier definitions into compiled descriptors.

use thiserror::Error;

use crate::checksum::{Checksum, ChecksumError};
use crate::core::definition::{
    AdditionalDefinition, CourierDefinition, LookupDefinition, PatternSource,
    PrependIfDefinition, ServiceDefinition,
};
use crate::core::descriptor::{EnrichmentRule, FormatDescriptor, LookupEntry, PrependRule};
use crate::core::types::ServiceId;
use crate::registry::pattern;

#[derive(Error, Debug)]
pub enum DescriptorError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid {context} pattern: {source}")]
    Pattern {
        context: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid checksum configuration: {0}")]
    Checksum(#[from] ChecksumError),
}

fn compile(
    source: &PatternSource,
    context: impl Into<String>,
) -> Result<regex::Regex, DescriptorError> {
    pattern::compile(source).map_err(|err| DescriptorError::Pattern {
        context: context.into(),
        source: err,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Build the descriptor for one service of a courier
///
/// # Errors
///
/// Returns an error if the service has no id or pattern, a pattern does not
/// compile after rewriting, or the checksum parameters are unusable.
pub fn build_descriptor(
    courier: &CourierDefinition,
    service: &ServiceDefinition,
) -> Result<FormatDescriptor, DescriptorError> {
    if service.id.is_empty() {
        return Err(DescriptorError::MissingField("id"));
    }
    if service.regex.is_empty() {
        return Err(DescriptorError::MissingField("regex"));
    }

    let validation = &service.validation;

    let pattern = compile(&service.regex, "service")?;
    let checksum = Checksum::from_config(&validation.checksum)?;
    let enrichment = service
        .additional
        .iter()
        .map(build_rule)
        .collect::<Result<Vec<_>, _>>()?;
    let prepend = validation
        .serial_number_format
        .prepend_if
        .as_ref()
        .map(build_prepend)
        .transpose()?
        .flatten();

    Ok(FormatDescriptor {
        id: ServiceId::new(&service.id),
        name: service.name.clone(),
        description: non_empty(Some(service.description.clone())),
        courier_code: courier.courier_code.clone(),
        courier_name: courier.name.clone(),
        tracking_url: non_empty(Some(service.tracking_url.clone())),
        pattern,
        checksum,
        enrichment,
        prepend,
        required_lookups: validation.additional.exists.clone(),
        test_numbers: service.test_numbers.clone(),
    })
}

fn build_rule(additional: &AdditionalDefinition) -> Result<EnrichmentRule, DescriptorError> {
    let entries = additional
        .lookups
        .iter()
        .map(|lookup| build_entry(lookup, &additional.name))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(EnrichmentRule {
        name: additional.name.clone(),
        group: additional.regex_group_name.clone(),
        entries,
    })
}

fn build_entry(lookup: &LookupDefinition, rule: &str) -> Result<LookupEntry, DescriptorError> {
    let pattern = lookup
        .matches_regex
        .as_ref()
        .filter(|source| !source.is_empty())
        .map(|source| compile(source, format!("lookup '{rule}'")))
        .transpose()?;

    Ok(LookupEntry {
        matches: non_empty(lookup.matches.clone()),
        pattern,
        name: non_empty(lookup.name.clone()),
        description: non_empty(lookup.description.clone()),
        country: non_empty(lookup.country.clone()),
        courier: non_empty(lookup.courier.clone()),
        courier_url: non_empty(lookup.courier_url.clone()),
        upu_reference_url: non_empty(lookup.upu_reference_url.clone()),
    })
}

/// A prepend block without a pattern is inert
fn build_prepend(prepend: &PrependIfDefinition) -> Result<Option<PrependRule>, DescriptorError> {
    let Some(source) = prepend.matches_regex.as_ref().filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    Ok(Some(PrependRule {
        pattern: compile(source, "prepend_if")?,
        content: prepend.content.clone(),
    }))
}
