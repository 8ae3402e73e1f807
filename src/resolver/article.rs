//! Readable text extraction for generic article pages.
//!
//! The page is parsed as HTML with scripting disabled, so `<noscript>` content
//! is parsed as markup rather than raw text. `script` and `style` subtrees are
//! dropped, as is the raw fallback text of `iframe`, `noembed` and `noframes`.
//! Every remaining text node is trimmed and placed on its own line. Blank-line
//! runs collapse to a single blank line and the result is capped at
//! [`MAX_ARTICLE_CHARS`] characters.

use std::collections::HashSet;
use std::sync::OnceLock;

use html5ever::driver::{self, ParseOpts};
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use regex::Regex;
use scraper::{Html, HtmlTreeSink, Node, Selector};

/// Maximum number of characters kept from an article
pub const MAX_ARTICLE_CHARS: usize = 5000;

/// Appended when the article was cut at [`MAX_ARTICLE_CHARS`]
pub const TRUNCATION_SUFFIX: &str = "\n\n[... Content truncated ...]";

fn blank_run_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\n\s*\n").expect("blank run pattern is valid"))
}

/// Elements whose text never reaches the reader
const HIDDEN_ELEMENTS: &str = "script, style, iframe, noembed, noframes";

/// Parse a document the way a client without scripting sees it
fn parse_document(html: &str) -> Html {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            scripting_enabled: false,
            ..Default::default()
        },
        ..Default::default()
    };
    driver::parse_document(HtmlTreeSink::new(Html::new_document()), opts).one(html)
}

/// Visible text of an HTML document, one trimmed text node per line
pub fn visible_text(html: &str) -> Result<String, String> {
    let document = parse_document(html);
    let hidden_selector = Selector::parse(HIDDEN_ELEMENTS).map_err(|e| e.to_string())?;
    let hidden: HashSet<_> = document.select(&hidden_selector).map(|el| el.id()).collect();

    let mut lines = Vec::new();
    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        if node.ancestors().any(|a| hidden.contains(&a.id())) {
            continue;
        }

        let trimmed = text.trim();
        if !trimmed.is_empty() {
            lines.push(trimmed);
        }
    }

    Ok(lines.join("\n"))
}

/// Collapse any run of blank lines to exactly one blank line
pub fn collapse_blank_lines(text: &str) -> String {
    blank_run_pattern().replace_all(text, "\n\n").into_owned()
}

/// Keep the first [`MAX_ARTICLE_CHARS`] characters, marking the cut
pub fn truncate(text: &str) -> String {
    match text.char_indices().nth(MAX_ARTICLE_CHARS) {
        Some((cut, _)) => format!("{}{}", &text[..cut], TRUNCATION_SUFFIX),
        None => text.to_string(),
    }
}

/// Full pipeline: HTML in, stored article text out
pub fn extract(html: &str) -> Result<String, String> {
    let text = visible_text(html)?;
    Ok(truncate(&collapse_blank_lines(&text)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripts_and_styles_are_dropped() {
        let html = r#"<html><head><title>Post</title>
            <style>body { color: red; }</style>
            <script>var tracking = 1;</script></head>
            <body><h1>Heading</h1><p>First <b>bold</b> line</p>
            <script type="module">import x from "y";</script></body></html>"#;

        let text = visible_text(html).unwrap();
        assert_eq!(text, "Post\nHeading\nFirst\nbold\nline");
        assert!(!text.contains("tracking"));
        assert!(!text.contains("color"));
    }

    #[test]
    fn test_noscript_fallback_markup_is_not_text() {
        let html = r#"<html><head><title>T</title></head><body><noscript><iframe src="https://www.googletagmanager.com/ns.html?id=GTM-X" height="0"></iframe></noscript><p>Story</p></body></html>"#;
        assert_eq!(extract(html).unwrap(), "T\nStory");
    }

    #[test]
    fn test_noscript_text_is_kept() {
        let html = "<body><noscript><p>Enable <b>JavaScript</b></p></noscript><p>Story</p></body>";
        assert_eq!(extract(html).unwrap(), "Enable\nJavaScript\nStory");
    }

    #[test]
    fn test_raw_fallback_elements_are_dropped() {
        let html = "<body><iframe><p>frame fallback</p></iframe><noembed><b>no</b></noembed>\
                    <noframes><i>frames</i></noframes><p>Story</p></body>";
        let text = extract(html).unwrap();
        assert_eq!(text, "Story");
        assert!(!text.contains('<'));
    }

    #[test]
    fn test_blank_runs_collapse_to_one_blank_line() {
        assert_eq!(collapse_blank_lines("a\n\n\n\nb"), "a\n\nb");
        assert_eq!(collapse_blank_lines("a\n  \t\n \nb"), "a\n\nb");
        assert_eq!(collapse_blank_lines("a\nb"), "a\nb");
    }

    #[test]
    fn test_preformatted_blank_lines_collapse() {
        let html = "<pre>one\n\n\n\ntwo</pre>";
        assert_eq!(extract(html).unwrap(), "one\n\ntwo");
    }

    #[test]
    fn test_truncate_at_limit() {
        let exact = "x".repeat(MAX_ARTICLE_CHARS);
        assert_eq!(truncate(&exact), exact);

        let long = "y".repeat(MAX_ARTICLE_CHARS + 1);
        let cut = truncate(&long);
        assert!(cut.ends_with(TRUNCATION_SUFFIX));
        assert_eq!(
            cut.chars().count(),
            MAX_ARTICLE_CHARS + TRUNCATION_SUFFIX.chars().count()
        );
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        let long = "é".repeat(MAX_ARTICLE_CHARS + 10);
        let cut = truncate(&long);
        let kept: String = cut.chars().take(MAX_ARTICLE_CHARS).collect();
        assert_eq!(kept, "é".repeat(MAX_ARTICLE_CHARS));
        assert!(cut.ends_with(TRUNCATION_SUFFIX));
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(extract("").unwrap(), "");
    }
}
