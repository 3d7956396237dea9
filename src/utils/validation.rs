//! Input checks and normalization shared by `track` and `find`.

/// Only plain ASCII input is classified; anything else is rejected up front.
#[must_use]
pub fn is_plain_ascii(input: &str) -> bool {
    input.is_ascii()
}

/// Canonical form of a candidate number: ASCII uppercase, no whitespace.
#[must_use]
pub fn normalize(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Remove every whitespace character, keeping case.
#[must_use]
pub fn strip_whitespace(input: &str) -> String {
    input.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Whitespace-delimited terms of free text.
#[must_use]
pub fn split_terms(input: &str) -> Vec<&str> {
    input.split_whitespace().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_plain_ascii() {
        assert!(is_plain_ascii("1Z30AA330198678678"));
        assert!(is_plain_ascii(""));
        assert!(!is_plain_ascii("1Z30AA33019867867８"));
        assert!(!is_plain_ascii("RB123456785GB é"));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(" 1z 30aa\t3301\n9867 8678 "), "1Z30AA330198678678");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_strip_whitespace_keeps_case() {
        assert_eq!(strip_whitespace("rb 1234\t5678 5 gb"), "rb123456785gb");
    }

    #[test]
    fn test_split_terms() {
        assert_eq!(split_terms("ABC123 XYZ456"), vec!["ABC123", "XYZ456"]);
        assert_eq!(split_terms("  a \n\tb  "), vec!["a", "b"]);
        assert!(split_terms("   ").is_empty());
    }
}
