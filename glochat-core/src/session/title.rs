//! Chat title generation
//!
//! The title is derived from the first user message by a replaceable
//! strategy; the default keyword heuristic classifies the message into a
//! few coarse buckets and otherwise falls back to a truncated prefix.

/// Strategy for deriving a chat title from its first user message
pub trait TitleStrategy: Send + Sync {
    fn title_for(&self, first_message: &str) -> String;
}

/// Default keyword-bucket heuristic
#[derive(Debug, Default)]
pub struct KeywordTitler;

/// Maximum length of the prefix fallback title
const MAX_PREFIX_LEN: usize = 40;

impl TitleStrategy for KeywordTitler {
    fn title_for(&self, first_message: &str) -> String {
        let query = first_message.to_lowercase();
        if query.contains("code") || query.contains("programming") {
            "Code Assistance".to_string()
        } else if query.contains("explain") || query.contains("what is") {
            "Explanation Request".to_string()
        } else if query.contains("how to") || query.contains("how do i") {
            "How-to Guide".to_string()
        } else {
            truncated_prefix(first_message)
        }
    }
}

fn truncated_prefix(message: &str) -> String {
    let trimmed = message.trim();
    if trimmed.chars().count() <= MAX_PREFIX_LEN {
        return trimmed.to_string();
    }
    let prefix: String = trimmed.chars().take(MAX_PREFIX_LEN).collect();
    format!("{}...", prefix.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_buckets() {
        let titler = KeywordTitler;
        assert_eq!(
            titler.title_for("Help me with this code"),
            "Code Assistance"
        );
        assert_eq!(
            titler.title_for("What is a monad? Explain simply"),
            "Explanation Request"
        );
        assert_eq!(titler.title_for("How do I boil an egg"), "How-to Guide");
    }

    #[test]
    fn test_prefix_fallback_short_message() {
        let titler = KeywordTitler;
        assert_eq!(titler.title_for("  good morning  "), "good morning");
    }

    #[test]
    fn test_prefix_fallback_truncates_long_message() {
        let titler = KeywordTitler;
        let long = "tell me a story about a fox that lives in the mountains";
        let title = titler.title_for(long);
        assert!(title.ends_with("..."));
        assert!(title.chars().count() <= MAX_PREFIX_LEN + 3);
    }
}
