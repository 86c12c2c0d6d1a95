//! Polarity-aware comparison of observed and expected output

use crate::normalize::normalize;
use crate::types::{Polarity, Status};

/// Decide whether a functional case passes.
///
/// Positive cases pass when both sides are non-empty and equal after
/// [`normalize`]. Negative cases pass when the trimmed raw strings differ;
/// whitespace-only differences still count as a deviation.
pub fn compare(actual: &str, expected: &str, polarity: Polarity) -> bool {
    match polarity {
        Polarity::Positive => {
            if actual.is_empty() || expected.is_empty() {
                return false;
            }
            normalize(actual) == normalize(expected)
        }
        Polarity::Negative => actual.trim() != expected.trim(),
    }
}

/// [`compare`] mapped onto a run status
pub fn evaluate(actual: &str, expected: &str, polarity: Polarity) -> Status {
    Status::from_comparison(compare(actual, expected, polarity))
}

/// Exact comparison used when capturing outputs back into the fixture
pub fn strict_match(actual: &str, expected: &str) -> bool {
    actual.trim() == expected.trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_positive_exact_match_passes() {
        let expected = "මම ගෙදර යනවා, හැබැයි වහින නිසා දැන්ම යන්නේ නෑ";
        assert_eq!(evaluate(expected, expected, Polarity::Positive), Status::Pass);
    }

    #[test]
    fn test_negative_inverted_logic() {
        let expected = "මම ගෙදර යනවා.";
        assert_eq!(evaluate(expected, expected, Polarity::Negative), Status::Fail);
        assert_eq!(
            evaluate("මමගෙදරයනවා", expected, Polarity::Negative),
            Status::Pass
        );
    }

    #[test_case("මම ගෙදර යනවා", "මම ගෙදර යනවා.", true; "trailing period ignored")]
    #[test_case("මම  ගෙදර යනවා", "මම ගෙදර යනවා", true; "double space ignored")]
    #[test_case("\u{200B}LOL", "LOL", true; "zero width ignored")]
    #[test_case("මම ගෙදර", "මම ගෙදර යනවා", false; "missing word")]
    #[test_case("", "LOL", false; "empty actual")]
    #[test_case("LOL", "", false; "empty expected")]
    #[test_case("   ", "   ", true; "whitespace only equal after normalize")]
    #[test_case(".", ".", true; "period only equal after normalize")]
    #[test_case(".", "", false; "empty expected after period")]
    fn test_positive(actual: &str, expected: &str, passes: bool) {
        assert_eq!(compare(actual, expected, Polarity::Positive), passes);
    }

    #[test_case("මම  ගෙදර යනවා", "මම ගෙදර යනවා", true; "double space is a deviation")]
    #[test_case("මම ගෙදර යනවා ", " මම ගෙදර යනවා", false; "outer whitespace trimmed")]
    #[test_case("", "එළ මචං!", true; "empty actual deviates")]
    #[test_case("", "", false; "both empty")]
    fn test_negative(actual: &str, expected: &str, passes: bool) {
        assert_eq!(compare(actual, expected, Polarity::Negative), passes);
    }

    #[test]
    fn test_positive_agrees_with_normalized_equality() {
        let pairs = [
            ("අපි හෙට එන්නම්.", "අපි හෙට එන්නම්"),
            ("online class එකක් තියෙන්නේ.", "online class එකක් තියෙන්නේ"),
            ("Rs. 500", "Rs 500"),
            ("හරි? (ඔයා)", "හරි?(ඔයා)"),
        ];
        for (a, b) in pairs {
            assert_eq!(
                compare(a, b, Polarity::Positive),
                normalize(a) == normalize(b),
                "{a:?} vs {b:?}"
            );
        }
    }

    #[test]
    fn test_negative_agrees_with_trimmed_inequality() {
        let pairs = [
            ("thnx බං!", "thanks බං!"),
            ("LVMH", "LVMH"),
            (" kiyanne naha", "kiyanne naha "),
            ("a\u{200B}", "a"),
        ];
        for (a, b) in pairs {
            assert_eq!(compare(a, b, Polarity::Negative), a.trim() != b.trim());
        }
    }

    #[test]
    fn test_strict_match() {
        assert!(strict_match(" LOL ", "LOL"));
        assert!(!strict_match("LOL.", "LOL"));
    }
}
