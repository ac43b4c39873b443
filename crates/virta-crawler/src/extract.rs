//! Cooked-HTML to text extraction for Discourse post bodies.

use scraper::Html;

/// Extract readable text from a cooked (rendered) post body.
///
/// Discourse sanitizes cooked HTML, so a plain text walk of the fragment
/// is enough; whitespace runs are collapsed afterwards.
pub fn html_to_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let text: String = fragment
        .root_element()
        .text()
        .collect::<Vec<_>>()
        .join(" ");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_tags() {
        assert_eq!(html_to_text("<p>Hello <b>world</b></p>"), "Hello world");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(
            html_to_text("<p>line one</p>\n\n<p>line   two</p>"),
            "line one line two"
        );
    }

    #[test]
    fn test_code_blocks_kept_as_text() {
        let html = "<p>Run:</p><pre><code>pip install pandas</code></pre>";
        assert_eq!(html_to_text(html), "Run: pip install pandas");
    }

    #[test]
    fn test_empty() {
        assert_eq!(html_to_text(""), "");
    }
}
