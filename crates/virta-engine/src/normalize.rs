//! Text normalization applied to queries and corpus fields before scoring.

/// Normalize text for matching: lowercase, strip characters outside
/// word characters / whitespace / `-.?!`, collapse whitespace runs.
///
/// Idempotent: characters are stripped before whitespace is collapsed,
/// so a second pass is a no-op. Every scoring path must run both the
/// query and the item text through this function so matching stays
/// case- and punctuation-insensitive.
pub fn normalize(text: &str) -> String {
    let kept: String = text
        .to_lowercase()
        .chars()
        .filter(|c| is_kept(*c))
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_kept(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c.is_whitespace() || matches!(c, '-' | '.' | '?' | '!')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \t\n "), "");
    }

    #[test]
    fn test_lowercase_and_collapse() {
        assert_eq!(normalize("HELLO   World!!"), "hello world!!");
    }

    #[test]
    fn test_strips_special_characters() {
        assert_eq!(normalize("what's up, @user #42?"), "whats up user 42?");
        assert_eq!(normalize("a-b c.d e?f g!h"), "a-b c.d e?f g!h");
    }

    #[test]
    fn test_idempotent() {
        for s in ["HELLO   World!!", "a , b", "  Mixed\tCase\nText (here) ", ""] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once);
        }
    }
}
