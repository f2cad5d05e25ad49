//! Custom Askama template filters and display helpers.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// How many words of an overview are shown before truncation.
pub const OVERVIEW_WORD_LIMIT: usize = 20;

/// Formats a decimal amount as dollars.
///
/// Usage in templates: `{{ total|dollars }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn dollars(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format!("${value}"))
}

/// Truncate an overview to its first `max_words` words.
///
/// Returns `None` when the text fits within the limit (the full text should
/// be shown with no toggle). Splitting is on single spaces, matching how the
/// catalog formats overview text.
#[must_use]
pub fn truncate_words(text: &str, max_words: usize) -> Option<String> {
    let words: Vec<&str> = text.split(' ').collect();
    if words.len() <= max_words {
        return None;
    }
    let mut truncated = words
        .into_iter()
        .take(max_words)
        .collect::<Vec<_>>()
        .join(" ");
    truncated.push_str("...");
    Some(truncated)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        (0..n)
            .map(|i| format!("word{i}"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_truncate_words_short_text_untouched() {
        assert_eq!(truncate_words("", OVERVIEW_WORD_LIMIT), None);
        assert_eq!(truncate_words("one two three", OVERVIEW_WORD_LIMIT), None);
        assert_eq!(truncate_words(&words(20), OVERVIEW_WORD_LIMIT), None);
    }

    #[test]
    fn test_truncate_words_long_text_gets_ellipsis() {
        let text = words(21);
        let truncated = truncate_words(&text, OVERVIEW_WORD_LIMIT).expect("truncated");

        assert!(truncated.ends_with("..."));
        assert!(truncated.starts_with("word0 word1"));
        assert!(truncated.contains("word19"));
        assert!(!truncated.contains("word20"));
    }

    #[test]
    fn test_truncate_words_keeps_exactly_the_limit() {
        let truncated = truncate_words(&words(50), OVERVIEW_WORD_LIMIT).expect("truncated");
        let body = truncated.trim_end_matches("...");
        assert_eq!(body.split(' ').count(), OVERVIEW_WORD_LIMIT);
    }
}
