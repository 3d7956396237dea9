//! Lookup-table enrichment of extracted capture groups.
//!
//! Each enrichment rule reads one capture group. The first lookup entry that
//! accepts the group's value contributes a fixed set of fields that depends
//! on the group name:
//!
//! | Group                   | Fields                                          |
//! |-------------------------|-------------------------------------------------|
//! | `ServiceType`           | `ServiceName`, `ServiceDesc`                    |
//! | `CountryCode`           | `Country`, `Courier`, `CourierURL`, `UPURefURL` |
//! | `ShippingContainerType` | `ShippingContainerType` (`"<group> <name>"`)    |
//! | any other `G`           | `G:other` (entry display text)                  |
//!
//! Derived fields are merged over the extracted groups, overwriting on key
//! collision. Existing courier definitions rely on these key names.

use std::collections::BTreeMap;

use crate::core::descriptor::{FormatDescriptor, LookupEntry};
use crate::core::types::{COUNTRY_CODE_GROUP, SERVICE_TYPE_GROUP, SHIPPING_CONTAINER_TYPE_GROUP};

/// Merge enrichment fields for every rule whose group was extracted
pub fn enrich(descriptor: &FormatDescriptor, details: &mut BTreeMap<String, String>) {
    let mut derived = BTreeMap::new();

    for rule in &descriptor.enrichment {
        let Some(value) = details.get(&rule.group) else {
            continue;
        };
        if let Some(entry) = rule.lookup(value) {
            derived.extend(derived_fields(&rule.group, entry));
        }
    }

    details.extend(derived);
}

/// Fields contributed by a lookup entry for the given group
#[must_use]
pub fn derived_fields(group: &str, entry: &LookupEntry) -> Vec<(String, String)> {
    let pairs: Vec<(&str, Option<&String>)> = match group {
        SERVICE_TYPE_GROUP => vec![
            ("ServiceName", entry.name.as_ref()),
            ("ServiceDesc", entry.description.as_ref()),
        ],
        COUNTRY_CODE_GROUP => vec![
            ("Country", entry.country.as_ref()),
            ("Courier", entry.courier.as_ref()),
            ("CourierURL", entry.courier_url.as_ref()),
            ("UPURefURL", entry.upu_reference_url.as_ref()),
        ],
        SHIPPING_CONTAINER_TYPE_GROUP => {
            return entry
                .name
                .iter()
                .map(|name| (group.to_string(), format!("{group} {name}")))
                .collect();
        }
        _ => return vec![(format!("{group}:other"), entry.to_string())],
    };

    pairs
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key.to_string(), v.clone())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ServiceId;
    use crate::registry::store::Registry;

    fn entry() -> LookupEntry {
        LookupEntry {
            matches: Some("US".to_string()),
            name: Some("Name".to_string()),
            description: Some("Desc".to_string()),
            country: Some("United States".to_string()),
            courier: Some("United States Postal Service".to_string()),
            courier_url: Some("https://www.usps.com".to_string()),
            ..LookupEntry::default()
        }
    }

    #[test]
    fn test_derived_fields_service_type() {
        let fields = derived_fields("ServiceType", &entry());
        assert_eq!(
            fields,
            vec![
                ("ServiceName".to_string(), "Name".to_string()),
                ("ServiceDesc".to_string(), "Desc".to_string()),
            ]
        );
    }

    #[test]
    fn test_derived_fields_country_code_skips_missing() {
        let fields = derived_fields("CountryCode", &entry());
        let keys: Vec<&str> = fields.iter().map(|(k, _)| k.as_str()).collect();
        // no upu_reference_url on this entry
        assert_eq!(keys, vec!["Country", "Courier", "CourierURL"]);
    }

    #[test]
    fn test_derived_fields_shipping_container_type() {
        let fields = derived_fields("ShippingContainerType", &entry());
        assert_eq!(
            fields,
            vec![(
                "ShippingContainerType".to_string(),
                "ShippingContainerType Name".to_string()
            )]
        );

        let unnamed = LookupEntry::default();
        assert!(derived_fields("ShippingContainerType", &unnamed).is_empty());
    }

    #[test]
    fn test_derived_fields_other_group() {
        let fields = derived_fields("DepotNumber", &entry());
        assert_eq!(
            fields,
            vec![("DepotNumber:other".to_string(), "Name (Desc)".to_string())]
        );
    }

    #[test]
    fn test_enrich_s10() {
        let registry = Registry::load_embedded();
        let s10 = registry.get(&ServiceId::new("s10")).unwrap();

        let mut details = BTreeMap::new();
        details.insert("ServiceType".to_string(), "EE".to_string());
        details.insert("CountryCode".to_string(), "US".to_string());
        enrich(s10, &mut details);

        assert_eq!(details["ServiceType"], "EE");
        assert_eq!(details["ServiceName"], "EMS");
        assert_eq!(details["ServiceDesc"], "Express mail service");
        assert_eq!(details["Country"], "United States");
        assert_eq!(details["Courier"], "United States Postal Service");
        assert_eq!(details["CourierURL"], "https://www.usps.com");
        assert!(details.contains_key("UPURefURL"));
    }

    #[test]
    fn test_enrich_first_entry_wins() {
        let registry = Registry::load_embedded();
        let dpd = registry.get(&ServiceId::new("dpd")).unwrap();

        let mut details = BTreeMap::new();
        details.insert("DepotNumber".to_string(), "0176".to_string());
        enrich(dpd, &mut details);
        assert_eq!(details["DepotNumber:other"], "Hamburg (DPD depot 0176)");

        let mut details = BTreeMap::new();
        details.insert("DepotNumber".to_string(), "0123".to_string());
        enrich(dpd, &mut details);
        assert_eq!(details["DepotNumber:other"], "Northern Germany");
    }

    #[test]
    fn test_enrich_unknown_value_adds_nothing() {
        let registry = Registry::load_embedded();
        let ups = registry.get(&ServiceId::new("ups")).unwrap();

        let mut details = BTreeMap::new();
        details.insert("ServiceType".to_string(), "ZZ".to_string());
        enrich(ups, &mut details);
        assert_eq!(details.len(), 1);
    }
}
