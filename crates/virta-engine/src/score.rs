//! Fused similarity scoring between a question and a corpus item.
//!
//! The fuzzy component is a partial-ratio match (0–100); on top of it an
//! additive keyword bonus rewards exact domain-term overlap that the fuzzy
//! ratio under-weights. The fused score can exceed 100 — thresholds were
//! tuned against this combined scale and the arithmetic must stay as-is.

use std::collections::HashSet;

use virta_core::types::{CorpusPost, CourseContentItem};

use crate::normalize::normalize;

/// Per-keyword bonus and cap for forum posts.
const POST_KEYWORD_BONUS: f64 = 10.0;
const POST_KEYWORD_CAP: f64 = 30.0;

/// Per-keyword bonus and cap for course content. Higher than posts:
/// content descriptions are short, so exact term hits carry more signal.
const CONTENT_KEYWORD_BONUS: f64 = 15.0;
const CONTENT_KEYWORD_CAP: f64 = 40.0;

/// A forum post with its fused relevance score. Lives for one request.
#[derive(Debug, Clone)]
pub struct ScoredPost {
    pub post: CorpusPost,
    pub score: f64,
    pub title_score: f64,
    pub content_score: f64,
    pub keyword_matches: usize,
}

/// A course-content item with its fused relevance score.
#[derive(Debug, Clone)]
pub struct ScoredContent {
    pub item: CourseContentItem,
    pub score: f64,
    pub fuzzy_score: f64,
    pub keyword_matches: usize,
}

/// Partial-ratio similarity in 0–100: the best alignment of the shorter
/// string against equal-length windows of the longer one. An exact
/// substring scores 100; an empty side scores 0.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let (short, long) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };
    if short.is_empty() {
        return 0.0;
    }
    if long.contains(short) {
        return 100.0;
    }

    let long_chars: Vec<char> = long.chars().collect();
    let window_len = short.chars().count();
    let mut best = 0.0_f64;
    for window in long_chars.windows(window_len) {
        let candidate: String = window.iter().collect();
        let ratio = strsim::normalized_levenshtein(short, &candidate);
        if ratio > best {
            best = ratio;
        }
        if best >= 0.999 {
            break;
        }
    }
    best * 100.0
}

/// Score a forum post against a pre-normalized question.
///
/// The title is matched on its own and as part of the full text; the full
/// text is down-weighted so a strong title hit dominates.
pub fn score_post(
    question_norm: &str,
    keywords: &HashSet<String>,
    post: &CorpusPost,
) -> ScoredPost {
    let title_norm = normalize(&post.title);
    let body_norm = normalize(&format!("{} {}", post.title, post.content));

    let title_score = partial_ratio(question_norm, &title_norm);
    let content_score = partial_ratio(question_norm, &body_norm);
    let combined = title_score.max(content_score * 0.8);

    let keyword_matches = count_keyword_matches(keywords, &body_norm);
    let bonus = (keyword_matches as f64 * POST_KEYWORD_BONUS).min(POST_KEYWORD_CAP);

    ScoredPost {
        post: post.clone(),
        score: combined + bonus,
        title_score,
        content_score,
        keyword_matches,
    }
}

/// Score a course-content item against a pre-normalized question.
pub fn score_content(
    question_norm: &str,
    keywords: &HashSet<String>,
    item: &CourseContentItem,
) -> ScoredContent {
    let text_norm = normalize(&format!("{} {}", item.title, item.description));

    let fuzzy_score = partial_ratio(question_norm, &text_norm);
    let keyword_matches = count_keyword_matches(keywords, &text_norm);
    let bonus = (keyword_matches as f64 * CONTENT_KEYWORD_BONUS).min(CONTENT_KEYWORD_CAP);

    ScoredContent {
        item: item.clone(),
        score: fuzzy_score + bonus,
        fuzzy_score,
        keyword_matches,
    }
}

fn count_keyword_matches(keywords: &HashSet<String>, text_norm: &str) -> usize {
    keywords
        .iter()
        .filter(|k| text_norm.contains(k.as_str()))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::extract_keywords;

    fn post(title: &str, content: &str) -> CorpusPost {
        CorpusPost {
            title: title.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    fn content_item(title: &str, description: &str) -> CourseContentItem {
        CourseContentItem {
            title: title.into(),
            description: description.into(),
            url: String::new(),
        }
    }

    #[test]
    fn test_partial_ratio_exact_substring() {
        assert_eq!(partial_ratio("pandas", "using pandas daily"), 100.0);
        // argument order does not matter
        assert_eq!(partial_ratio("using pandas daily", "pandas"), 100.0);
    }

    #[test]
    fn test_partial_ratio_empty() {
        assert_eq!(partial_ratio("", "anything"), 0.0);
        assert_eq!(partial_ratio("anything", ""), 0.0);
    }

    #[test]
    fn test_partial_ratio_bounded() {
        let r = partial_ratio("how to plot charts", "visualization with matplotlib");
        assert!((0.0..=100.0).contains(&r));
    }

    #[test]
    fn test_partial_ratio_near_match_scores_high() {
        let r = partial_ratio("lode a csv file", "how to load a csv file in pandas");
        assert!(r > 80.0, "got {r}");
    }

    #[test]
    fn test_score_is_finite_and_non_negative() {
        let keywords = extract_keywords("anything about sql databases");
        let nq = normalize("anything about sql databases");
        let s = score_post(&nq, &keywords, &post("", ""));
        assert!(s.score.is_finite());
        assert!(s.score >= 0.0);
    }

    #[test]
    fn test_keyword_bonus_monotonic() {
        // Fixed question text (fuzzy component constant), growing exact
        // keyword overlap: the fused score must never decrease.
        let item = content_item("Data tools", "pandas numpy sql database notebook");
        let nq = normalize("some question text");
        let mut keywords = HashSet::new();
        let mut last = score_content(&nq, &keywords, &item).score;
        for term in ["pandas", "numpy", "sql", "database"] {
            keywords.insert(term.to_string());
            let s = score_content(&nq, &keywords, &item);
            assert!(s.score >= last, "{term}: {} < {last}", s.score);
            last = s.score;
        }
    }

    #[test]
    fn test_post_keyword_bonus_capped() {
        let p = post(
            "Everything",
            "python pandas numpy matplotlib jupyter notebook csv sql database",
        );
        let q = "python pandas numpy matplotlib jupyter notebook csv sql database";
        let s = score_post(&normalize(q), &extract_keywords(q), &p);
        // fuzzy is 100 (exact substring); bonus must be capped at 30
        assert!(s.keyword_matches > 3);
        assert!(s.score <= 130.0);
        assert!(s.score >= 100.0);
    }

    #[test]
    fn test_content_keyword_bonus_capped() {
        let c = content_item(
            "Everything",
            "python pandas numpy matplotlib jupyter notebook csv sql database",
        );
        let q = "python pandas numpy matplotlib jupyter notebook csv sql database";
        let s = score_content(&normalize(q), &extract_keywords(q), &c);
        assert!(s.score <= s.fuzzy_score + 40.0);
    }

    #[test]
    fn test_empty_question_scores_zero_fuzzy() {
        let s = score_content(
            "",
            &HashSet::new(),
            &content_item("Pandas Basics", "Introduction to dataframes"),
        );
        assert_eq!(s.fuzzy_score, 0.0);
        assert_eq!(s.score, 0.0);
    }
}
