//! GitHub Gist embeds.

use std::sync::OnceLock;

use regex::Regex;

use super::error::ResolveError;

fn gist_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"gist\.github\.com/([^/]+)/([a-f0-9]+)").expect("gist pattern is valid")
    })
}

/// A gist identified by owner and hex id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GistRef {
    pub username: String,
    pub gist_id: String,
}

impl GistRef {
    /// Extract owner and id from anywhere in the URL
    pub fn parse(url: &str) -> Option<Self> {
        let captures = gist_pattern().captures(url)?;
        Some(Self {
            username: captures[1].to_string(),
            gist_id: captures[2].to_string(),
        })
    }

    pub fn script_url(&self) -> String {
        format!(
            "https://gist.github.com/{}/{}.js",
            self.username, self.gist_id
        )
    }

    pub fn embed_markup(&self) -> String {
        format!(r#"<script src="{}"></script>"#, self.script_url())
    }
}

/// Embed markup for a gist URL
pub fn embed(url: &str) -> Result<String, ResolveError> {
    GistRef::parse(url)
        .map(|gist| gist.embed_markup())
        .ok_or(ResolveError::GistId)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_and_id() {
        let gist = GistRef::parse("https://gist.github.com/user/deadbeef01").unwrap();
        assert_eq!(gist.username, "user");
        assert_eq!(gist.gist_id, "deadbeef01");
        assert_eq!(
            gist.script_url(),
            "https://gist.github.com/user/deadbeef01.js"
        );
    }

    #[test]
    fn test_embed_markup() {
        assert_eq!(
            embed("https://gist.github.com/octo/0a1b2c").unwrap(),
            r#"<script src="https://gist.github.com/octo/0a1b2c.js"></script>"#
        );
    }

    #[test]
    fn test_id_stops_at_first_non_hex_character() {
        let gist = GistRef::parse("https://gist.github.com/octo/abc123#file-main-rs").unwrap();
        assert_eq!(gist.gist_id, "abc123");
    }

    #[test]
    fn test_missing_id_is_extraction_failure() {
        assert!(GistRef::parse("https://gist.github.com/octo").is_none());
        assert!(GistRef::parse("https://gist.github.com/octo/").is_none());
        assert!(matches!(
            embed("https://gist.github.com/"),
            Err(ResolveError::GistId)
        ));
    }
}
