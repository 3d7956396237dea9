//! Library-level tests against the embedded courier definitions
//!
//! These exercise the public API the way a caller would: through
//! `parcel_track::track`, `parcel_track::find`, and custom registries.

use parcel_track::core::definition::CourierDefinition;
use parcel_track::matching::verify::{failures, verify_examples};
use parcel_track::{Registry, ServiceId, TrackError, Tracker};

fn services(number: &str) -> Vec<String> {
    parcel_track::track(number)
        .unwrap()
        .into_iter()
        .map(|r| r.service)
        .collect()
}

/// Every declared valid example is attributed to its service, and no
/// declared invalid example is
#[test]
fn test_all_embedded_examples() {
    let registry = Registry::embedded();
    let tracker = Tracker::new(registry);

    for descriptor in registry {
        for number in &descriptor.test_numbers.valid {
            let results = tracker.track(number).unwrap();
            assert!(
                results.iter().any(|r| r.service == descriptor.name),
                "{number} should match {}",
                descriptor.id
            );
        }
        for number in &descriptor.test_numbers.invalid {
            let results = tracker.track(number).unwrap();
            assert!(
                results.iter().all(|r| r.service != descriptor.name),
                "{number} should not match {}",
                descriptor.id
            );
        }
    }

    let outcomes = verify_examples(registry);
    assert_eq!(failures(&outcomes).count(), 0);
}

#[test]
fn test_results_keep_registry_order() {
    let registry = Registry::embedded();
    let order: Vec<&str> = registry.iter().map(|d| d.name.as_str()).collect();

    let matched = services("00012345678901234560");
    assert_eq!(matched, vec!["FedEx Ground (SSCC-18)", "USPS 20"]);

    let positions: Vec<usize> = matched
        .iter()
        .map(|name| order.iter().position(|o| o == name).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_tracking_number_is_normalized() {
    for input in ["1Z30AA330198678678", "1z30aa330198678678", "1Z 30AA 3301 9867 8678", "\t1Z30AA330198678678\n"] {
        let results = parcel_track::track(input).unwrap();
        assert_eq!(results.len(), 1, "{input:?}");
        assert_eq!(results[0].tracking_number, "1Z30AA330198678678");
        assert!(!results[0].tracking_number.contains(char::is_whitespace));
    }
}

#[test]
fn test_track_is_idempotent() {
    for input in ["RB123456785GB", "9612019123456776543218", "nothing here", "TBA000000000000"] {
        assert_eq!(parcel_track::track(input), parcel_track::track(input));
    }
}

#[test]
fn test_check_digit_failure_yields_nothing() {
    assert!(services("986578788854").is_empty());
    assert!(services("3318810024").is_empty());
    assert!(services("01761234567890J").is_empty());
}

#[test]
fn test_non_ascii_rejected() {
    assert_eq!(
        parcel_track::track("1Z30AA33019867867８"),
        Err(TrackError::UnsupportedCharacters)
    );
}

#[test]
fn test_enrichment_fields() {
    let fedex = parcel_track::track("9612022001234500000016").unwrap();
    assert_eq!(fedex[0].detail("ServiceName"), Some("FedEx Home Delivery"));
    assert!(fedex[0].detail("ServiceDesc").is_some());

    let s10 = parcel_track::track("RB123456785GB").unwrap();
    assert_eq!(s10[0].detail("Country"), Some("United Kingdom"));
    assert_eq!(s10[0].detail("CountryCode"), Some("GB"));

    let sscc = parcel_track::track("00012345678901234560").unwrap();
    assert_eq!(
        sscc[0].detail("ShippingContainerType"),
        Some("ShippingContainerType Serial Shipping Container")
    );

    let dpd = parcel_track::track("01761234567890I").unwrap();
    assert_eq!(dpd[0].detail("DepotNumber:other"), Some("Hamburg (DPD depot 0176)"));
}

#[test]
fn test_tracking_url_substitution() {
    let results = parcel_track::track("1Z 30AA 3301 9867 8678").unwrap();
    assert_eq!(
        results[0].tracking_url.as_deref(),
        Some("https://www.ups.com/track?tracknum=1Z30AA330198678678")
    );
}

#[test]
fn test_find_in_text() {
    let text = "Order 1234 shipped.\nUPS: 1Z30AA330198678678\nPost: RB123456785GB (registered)\n";
    let found = parcel_track::find(text).unwrap();
    assert_eq!(found.len(), 2);
    assert_eq!(found["1Z30AA330198678678"][0].courier, "ups");
    assert_eq!(found["RB123456785GB"][0].courier, "s10");
}

#[test]
fn test_find_spaced_number() {
    let found = parcel_track::find("9865 7878 8855").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found["986578788855"][0].service, "FedEx Express (12)");
}

#[test]
fn test_custom_registry_from_json() {
    let json = r#"{
        "name": "Example Post",
        "courier_code": "example",
        "tracking_numbers": [{
            "id": "example_post",
            "name": "Example Post",
            "tracking_url": "https://example.com/t/%s",
            "regex": "^EX(?<SerialNumber>[0-9]{6})(?<CheckDigit>[0-9])$",
            "validation": { "checksum": { "name": "mod7" } }
        }]
    }"#;
    let registry = Registry::from_json(json).unwrap();
    assert_eq!(registry.len(), 1);

    let tracker = Tracker::new(&registry);
    // 123456 mod 7 = 4
    let results = tracker.track("EX1234564").unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].courier, "example");
    assert_eq!(results[0].tracking_url.as_deref(), Some("https://example.com/t/EX1234564"));
    assert!(tracker.track("EX1234565").unwrap().is_empty());
}

#[test]
fn test_registry_from_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::copy(
        concat!(env!("CARGO_MANIFEST_DIR"), "/couriers/ups.json"),
        dir.path().join("ups.json"),
    )
    .unwrap();
    std::fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
    std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let registry = Registry::load_from_path(dir.path()).unwrap();
    assert_eq!(registry.len(), 1);
    assert!(registry.get(&ServiceId::new("ups")).is_some());

    let tracker = Tracker::new(&registry);
    assert_eq!(tracker.track("1Z30AA330198678678").unwrap().len(), 1);
    assert!(tracker.track("RB123456785GB").unwrap().is_empty());
}

#[test]
fn test_registry_from_broken_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "[1, 2").unwrap();
    assert!(Registry::load_from_path(&path).is_err());
}

#[test]
fn test_invalid_definitions_are_skipped() {
    let definitions: Vec<CourierDefinition> = serde_json::from_str(
        r#"[{
            "name": "Broken",
            "courier_code": "broken",
            "tracking_numbers": [
                { "id": "bad_pattern", "name": "Bad", "regex": "^(?<SerialNumber>[0-9]+$" },
                { "id": "no_pattern", "name": "Empty", "regex": "" },
                { "id": "ok", "name": "Ok", "regex": "^(?<SerialNumber>OK[0-9]{3})$" }
            ]
        }]"#,
    )
    .unwrap();

    let registry = Registry::from_definitions(&definitions);
    assert_eq!(registry.len(), 1);
    assert!(registry.get(&ServiceId::new("ok")).is_some());
}

#[test]
fn test_empty_registry() {
    let registry = Registry::new();
    let tracker = Tracker::new(&registry);
    assert_eq!(tracker.track("1Z30AA330198678678"), Err(TrackError::NoServices));
    assert_eq!(tracker.find("1Z30AA330198678678"), Err(TrackError::NoServices));
}

#[test]
fn test_oversized_checksum_parameters_do_not_panic() {
    let json = r#"{
        "name": "Example Post",
        "courier_code": "example",
        "tracking_numbers": [{
            "id": "example_mod10",
            "name": "Example Mod10",
            "regex": "^(?<SerialNumber>[0-9]{3})(?<CheckDigit>[0-9])$",
            "validation": {
                "checksum": { "name": "mod10", "evens_multiplier": 9223372036854775807, "odds_multiplier": 1 }
            }
        }, {
            "id": "example_weighted",
            "name": "Example Weighted",
            "regex": "^W(?<SerialNumber>[0-9]{2})(?<CheckDigit>[0-9])$",
            "validation": {
                "checksum": {
                    "name": "sum_product_with_weightings_and_modulo",
                    "weightings": [9223372036854775807, 9223372036854775807],
                    "modulo1": 11,
                    "modulo2": 10
                }
            }
        }]
    }"#;
    let registry = Registry::from_json(json).unwrap();
    let tracker = Tracker::new(&registry);

    assert!(tracker.track("9990").unwrap().is_empty());
    assert_eq!(tracker.track("9999").unwrap().len(), 1);
    assert!(tracker.track("W990").unwrap().is_empty());
}
