//! Keyword extraction — salient terms pulled from a raw question.
//!
//! Two sources: a fixed vocabulary of course-domain terms matched by
//! substring, and a bounded scan for longer words. The result is a set;
//! order carries no meaning.

use std::collections::HashSet;

/// Domain vocabulary. Matched case-insensitively as substrings of the
/// question, so multi-word terms like "machine learning" hit too.
const TECH_TERMS: &[&str] = &[
    "python",
    "pandas",
    "numpy",
    "matplotlib",
    "seaborn",
    "sklearn",
    "jupyter",
    "notebook",
    "dataframe",
    "csv",
    "api",
    "sql",
    "database",
    "visualization",
    "plot",
    "chart",
    "regression",
    "classification",
    "machine learning",
    "ml",
    "data science",
    "statistics",
    "analysis",
];

/// Minimum token length for the generic word scan.
const MIN_WORD_LEN: usize = 4;

/// Maximum tokens taken from the generic word scan (before dedup).
const MAX_SCAN_WORDS: usize = 10;

/// Extract keywords from a raw (un-normalized) question.
pub fn extract_keywords(text: &str) -> HashSet<String> {
    let lower = text.to_lowercase();
    let mut keywords = HashSet::new();

    for term in TECH_TERMS {
        if lower.contains(term) {
            keywords.insert((*term).to_string());
        }
    }

    for word in word_tokens(&lower)
        .filter(|w| w.chars().count() >= MIN_WORD_LEN)
        .take(MAX_SCAN_WORDS)
    {
        keywords.insert(word.to_string());
    }

    keywords
}

/// Split into word-character runs (alphanumeric or underscore).
fn word_tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_hits() {
        let kw = extract_keywords("How do I merge two Pandas DataFrames?");
        assert!(kw.contains("pandas"));
        assert!(kw.contains("dataframe"));
    }

    #[test]
    fn test_long_word_scan() {
        let kw = extract_keywords("why does merge fail");
        assert!(kw.contains("merge"));
        assert!(kw.contains("does"));
        assert!(kw.contains("fail"));
        // "why" is below the length cutoff
        assert!(!kw.contains("why"));
    }

    #[test]
    fn test_scan_capped_at_ten() {
        let question = "alpha bravo charlie delta echoes foxtrot golfing hotels indigo juliet kilos limas";
        let kw = extract_keywords(question);
        // 12 long tokens in the question, only the first 10 scanned
        assert!(kw.contains("juliet"));
        assert!(!kw.contains("kilos"));
        assert!(!kw.contains("limas"));
    }

    #[test]
    fn test_deduplicated() {
        let kw = extract_keywords("pandas pandas pandas");
        assert_eq!(kw.iter().filter(|k| *k == "pandas").count(), 1);
    }

    #[test]
    fn test_empty_question() {
        assert!(extract_keywords("").is_empty());
    }
}
