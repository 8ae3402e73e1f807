//! URL slugs for blog posts.

use std::sync::OnceLock;

use regex::Regex;

fn separator_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[-\s]+").expect("separator pattern is valid"))
}

/// Lowercase, ASCII-only, hyphen-separated form of a title
pub fn slugify(title: &str) -> String {
    let kept: String = title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || *c == '-' || *c == '_')
        .collect();

    separator_pattern()
        .replace_all(kept.trim(), "-")
        .trim_matches(|c| c == '-' || c == '_')
        .to_string()
}

/// Candidate slugs in the order they are tried: `base`, `base-1`, `base-2`, ...
pub fn candidates(base: &str) -> impl Iterator<Item = String> + '_ {
    std::iter::once(base.to_string()).chain((1..).map(move |n| format!("{}-{}", base, n)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("  Rust & WebAssembly: 2024!  "), "rust-webassembly-2024");
        assert_eq!(slugify("already-a-slug"), "already-a-slug");
        assert_eq!(slugify("snake_case stays"), "snake_case-stays");
        assert_eq!(slugify("--dashes -- everywhere--"), "dashes-everywhere");
        assert_eq!(slugify("Café Olé"), "caf-ol");
    }

    #[test]
    fn test_candidates() {
        let first: Vec<_> = candidates("post").take(3).collect();
        assert_eq!(first, vec!["post", "post-1", "post-2"]);
    }
}
