//! Source URL and derived content carried by a blog post.

use serde::Serialize;

/// A post's source URL together with the content resolved from it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContentSource {
    /// User-supplied URL
    pub source_url: Option<String>,

    /// URL seen at load time or at the last resolution (change detection only)
    #[serde(skip)]
    pub previous_source_url: Option<String>,

    /// Resolved content; `None` when never resolved or the URL was cleared
    pub derived_content: Option<String>,
}

impl ContentSource {
    /// A source that has never been resolved
    pub fn new(source_url: Option<String>) -> Self {
        Self {
            source_url: normalize(source_url),
            previous_source_url: None,
            derived_content: None,
        }
    }

    /// A source as read back from storage; the stored URL is the baseline
    pub fn loaded(source_url: Option<String>, derived_content: Option<String>) -> Self {
        let source_url = normalize(source_url);
        Self {
            previous_source_url: source_url.clone(),
            source_url,
            derived_content,
        }
    }

    /// Replace the URL. Blank input clears it.
    pub fn set_source_url(&mut self, url: Option<String>) {
        self.source_url = normalize(url);
    }
}

fn normalize(url: Option<String>) -> Option<String> {
    url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty())
}
