//! Self-test over the example numbers declared by each descriptor.
//!
//! A valid example passes when tracking it yields a result naming its
//! service. An invalid example passes when no result names its service; it
//! may still match another, overlapping service.

use serde::Serialize;

use crate::core::descriptor::FormatDescriptor;
use crate::core::types::{Expectation, ServiceId};
use crate::matching::engine::Tracker;
use crate::registry::store::Registry;

/// Outcome of tracking one declared example number
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExampleOutcome {
    pub service_id: ServiceId,
    pub service: String,
    pub number: String,
    pub expectation: Expectation,
    /// Services the number was attributed to
    pub matched_services: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub passed: bool,
}

/// Run every example of every descriptor in the registry
#[must_use]
pub fn verify_examples(registry: &Registry) -> Vec<ExampleOutcome> {
    let tracker = Tracker::new(registry);
    registry
        .iter()
        .flat_map(|descriptor| verify_descriptor(&tracker, descriptor))
        .collect()
}

/// Run the examples of a single descriptor
#[must_use]
pub fn verify_descriptor(tracker: &Tracker<'_>, descriptor: &FormatDescriptor) -> Vec<ExampleOutcome> {
    let examples = &descriptor.test_numbers;
    let valid = examples.valid.iter().map(|n| (n, Expectation::Valid));
    let invalid = examples.invalid.iter().map(|n| (n, Expectation::Invalid));

    valid
        .chain(invalid)
        .map(|(number, expectation)| check_example(tracker, descriptor, number, expectation))
        .collect()
}

fn check_example(
    tracker: &Tracker<'_>,
    descriptor: &FormatDescriptor,
    number: &str,
    expectation: Expectation,
) -> ExampleOutcome {
    let (matched_services, error) = match tracker.track(number) {
        Ok(results) => (results.into_iter().map(|r| r.service).collect(), None),
        Err(e) => (Vec::new(), Some(e.to_string())),
    };

    let attributed = matched_services.iter().any(|s| *s == descriptor.name);
    let passed = error.is_none()
        && match expectation {
            Expectation::Valid => attributed,
            Expectation::Invalid => !attributed,
        };

    if !passed {
        tracing::warn!(
            "{} example {number} for {} failed (matched: {matched_services:?})",
            expectation,
            descriptor.id
        );
    }

    ExampleOutcome {
        service_id: descriptor.id.clone(),
        service: descriptor.name.clone(),
        number: number.to_string(),
        expectation,
        matched_services,
        error,
        passed,
    }
}

/// Outcomes that did not pass
pub fn failures(outcomes: &[ExampleOutcome]) -> impl Iterator<Item = &ExampleOutcome> {
    outcomes.iter().filter(|o| !o.passed)
}
