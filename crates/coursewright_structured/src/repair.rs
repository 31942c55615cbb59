//! Best-effort repair of informally quoted JSON.
//!
//! Models often answer with single-quoted JSON. Every `'` becomes `"`, then
//! any `"` sitting between two word characters is turned back into `'`, which
//! restores contractions such as `don't`. Apostrophes next to punctuation or
//! whitespace, and genuinely nested quotes, are not recovered; such output
//! fails to parse and is retried.

use regex::Regex;
use std::sync::LazyLock;

static WORD_INTERNAL_QUOTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(\w)"(\w)"#).expect("WORD_INTERNAL_QUOTE regex should compile")
});

/// Normalizes single quotes to double quotes, keeping word-internal apostrophes.
///
/// # Examples
///
/// ```
/// use coursewright_structured::repair_quotes;
///
/// assert_eq!(
///     repair_quotes("{'summary': 'It's a test'}"),
///     r#"{"summary": "It's a test"}"#
/// );
/// ```
pub fn repair_quotes(text: &str) -> String {
    let double_quoted = text.replace('\'', "\"");
    WORD_INTERNAL_QUOTE
        .replace_all(&double_quoted, "$1'$2")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_json_is_unchanged() {
        let text = r#"{"summary": "A test of the system", "tags": ["a", "b"]}"#;
        assert_eq!(repair_quotes(text), text);
    }

    #[test]
    fn test_repair_is_idempotent() {
        let once = repair_quotes("{'title': 'Don't panic', 'n': 'x'}");
        assert_eq!(repair_quotes(&once), once);
    }

    #[test]
    fn test_contraction_inside_double_quotes_survives() {
        let text = r#"{"summary": "It's a test."}"#;
        assert_eq!(repair_quotes(text), text);
    }

    #[test]
    fn test_single_quoted_object() {
        assert_eq!(
            repair_quotes("{'a': 'b', 'c': ['d', 'e']}"),
            r#"{"a": "b", "c": ["d", "e"]}"#
        );
    }

    #[test]
    fn test_every_contraction_restored() {
        assert_eq!(
            repair_quotes("{'note': 'we can't and won't'}"),
            r#"{"note": "we can't and won't"}"#
        );
    }

    #[test]
    fn test_possessive_before_space_is_not_recovered() {
        // The trailing apostrophe in "students'" has no word character after it.
        let repaired = repair_quotes("{'owner': 'the students' book'}");
        assert!(serde_json::from_str::<serde_json::Value>(&repaired).is_err());
    }
}
