//! Canonicalization of transliteration output before comparison

use once_cell::sync::Lazy;
use regex::Regex;

/// Zero-width space, non-joiner, joiner and byte-order mark
static ZERO_WIDTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\u{200B}-\u{200D}\u{FEFF}]").expect("valid zero-width pattern"));

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Canonicalize text for comparison.
///
/// Removes zero-width marks, collapses whitespace runs to a single space,
/// trims both ends and strips trailing periods. Whitespace uncovered by the
/// period strip is trimmed too, which keeps the function idempotent.
pub fn normalize(text: &str) -> String {
    let visible = ZERO_WIDTH.replace_all(text, "");
    let collapsed = WHITESPACE_RUN.replace_all(&visible, " ");
    collapsed
        .trim_start()
        .trim_end_matches(|c: char| c == '.' || c.is_whitespace())
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("මම ගෙදර යනවා.", "මම ගෙදර යනවා"; "trailing period")]
    #[test_case("  මම   ගෙදර\tයනවා  ", "මම ගෙදර යනවා"; "whitespace runs")]
    #[test_case("ම\u{200B}ම\u{200D} ගෙදර\u{FEFF}", "මම ගෙදර"; "zero width marks")]
    #[test_case("Rs. 500", "Rs. 500"; "inner period kept")]
    #[test_case("hari...", "hari"; "several periods")]
    #[test_case("abc . .", "abc"; "periods separated by spaces")]
    #[test_case("", ""; "empty")]
    #[test_case("\u{200C}\u{200C}", ""; "only invisible")]
    fn test_normalize(input: &str, expected: &str) {
        assert_eq!(normalize(input), expected);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            "mama gedhara yanawa.",
            "abc .",
            " . . ",
            "\u{200B} a \u{200C}\n\n b . ",
            "ඔයා ගෙදර යනවා.මමත් එනවා",
            "hari? (oyaa)",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn test_normalize_leaves_no_runs_or_marks() {
        let noisy = "අපි\u{200B}  හෙට \u{200D}\t\tඑන්නම්\u{FEFF}  .";
        let out = normalize(noisy);
        assert!(!out.contains(['\u{200B}', '\u{200C}', '\u{200D}', '\u{FEFF}']));
        assert!(!out.contains("  "));
        assert!(!out.chars().any(|c| c.is_whitespace() && c != ' '));
    }

    #[test]
    fn test_zero_width_only_normalizes_to_empty() {
        assert_eq!(normalize("  \u{200B} "), "");
    }
}
