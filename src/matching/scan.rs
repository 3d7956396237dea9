//! Free-text scanning: split into terms, track each term concurrently.

use std::collections::BTreeMap;

use parking_lot::Mutex;
use rayon::prelude::*;

use crate::core::tracking::TrackingResult;
use crate::matching::engine::{TrackError, Tracker};
use crate::utils::validation::{split_terms, strip_whitespace};

/// Tracking results keyed by the text they were found in
pub type FindResults = BTreeMap<String, Vec<TrackingResult>>;

impl Tracker<'_> {
    /// Extract tracking numbers from free text.
    ///
    /// Every whitespace-delimited term is tracked on its own; terms that
    /// produce results are keyed by their original spelling. If no term
    /// matches, the whole input with whitespace removed is tried as one
    /// number, since some numbers are commonly written with spaces.
    ///
    /// Terms rejected by [`track`](Self::track) (e.g. non-ASCII words) are
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns `TrackError::NoServices` when the registry is empty.
    pub fn find(&self, text: &str) -> Result<FindResults, TrackError> {
        if self.registry().is_empty() {
            return Err(TrackError::NoServices);
        }

        let terms = split_terms(text);
        let found = Mutex::new(FindResults::new());

        terms.par_iter().for_each(|term| {
            if let Ok(results) = self.track(term) {
                if !results.is_empty() {
                    found.lock().insert((*term).to_string(), results);
                }
            }
        });

        let mut found = found.into_inner();
        tracing::debug!("{} of {} terms matched", found.len(), terms.len());

        if found.is_empty() {
            let whole = strip_whitespace(text);
            if let Ok(results) = self.track(&whole) {
                if !results.is_empty() {
                    found.insert(whole, results);
                }
            }
        }

        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use crate::matching::engine::{TrackError, Tracker};
    use crate::registry::store::Registry;

    #[test]
    fn test_find_multiple_terms() {
        let registry = Registry::load_embedded();
        let tracker = Tracker::new(&registry);

        let found = tracker
            .find("Your parcels 1Z30AA330198678678 and RB123456785GB have shipped")
            .unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found["1Z30AA330198678678"][0].courier, "ups");
        assert_eq!(found["RB123456785GB"][0].courier, "s10");
    }

    #[test]
    fn test_find_keys_by_original_term() {
        let registry = Registry::load_embedded();
        let tracker = Tracker::new(&registry);

        let found = tracker.find("tracking: rb123456785gb").unwrap();
        assert!(found.contains_key("rb123456785gb"));
        assert_eq!(found["rb123456785gb"][0].tracking_number, "RB123456785GB");
    }

    #[test]
    fn test_find_no_matches() {
        let registry = Registry::load_embedded();
        let tracker = Tracker::new(&registry);

        let found = tracker.find("ABC123 XYZ456").unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_find_falls_back_to_whole_input() {
        let registry = Registry::load_embedded();
        let tracker = Tracker::new(&registry);

        let found = tracker.find("1Z 30AA 3301 9867 8678").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found["1Z30AA330198678678"][0].service, "UPS");
    }

    #[test]
    fn test_find_fallback_keeps_case_in_key() {
        let registry = Registry::load_embedded();
        let tracker = Tracker::new(&registry);

        let found = tracker.find("rb 1234 5678 5 gb").unwrap();
        assert!(found.contains_key("rb123456785gb"));
    }

    #[test]
    fn test_find_no_fallback_when_a_term_matches() {
        let registry = Registry::load_embedded();
        let tracker = Tracker::new(&registry);

        // the joined text would be a different number; only the term is reported
        let found = tracker.find("3318810025 1Z 30AA").unwrap();
        assert_eq!(found.keys().collect::<Vec<_>>(), vec!["3318810025"]);
    }

    #[test]
    fn test_find_skips_non_ascii_terms() {
        let registry = Registry::load_embedded();
        let tracker = Tracker::new(&registry);

        let found = tracker.find("réf 3318810025").unwrap();
        assert_eq!(found.len(), 1);
        assert!(found.contains_key("3318810025"));
    }

    #[test]
    fn test_find_empty_registry() {
        let registry = Registry::new();
        let tracker = Tracker::new(&registry);
        assert_eq!(tracker.find("1Z30AA330198678678"), Err(TrackError::NoServices));
    }

    #[test]
    fn test_find_empty_text() {
        let registry = Registry::load_embedded();
        let tracker = Tracker::new(&registry);
        assert!(tracker.find("").unwrap().is_empty());
        assert!(tracker.find("   \n").unwrap().is_empty());
    }
}
