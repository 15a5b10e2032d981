//! Summarization interface.

/// Returned by summarizers when the backend fails.
pub const FALLBACK_SUMMARY: &str =
    "(Fallback summary) Document processed, but summary generation failed.";

/// Turns extracted document text into a summary.
///
/// Implementations never fail: on error they return [`FALLBACK_SUMMARY`]
/// so the caller can still render and send something.
pub trait Summarizer {
    /// Summarize `text`.
    fn summarize(&self, text: &str) -> String;
}

/// Keep at most `max_chars` characters of `text`. Zero means no limit.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    if max_chars == 0 {
        return text;
    }

    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_shorter_text_unchanged() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 5), "hello");
    }

    #[test]
    fn test_truncate_cuts_at_char_boundary() {
        assert_eq!(truncate_chars("héllo wörld", 7), "héllo w");
        assert_eq!(truncate_chars("日本語", 2), "日本");
    }

    #[test]
    fn test_truncate_zero_is_unlimited() {
        assert_eq!(truncate_chars("hello", 0), "hello");
    }
}
