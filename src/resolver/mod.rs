//! Content resolution for blog post source URLs.
//!
//! A pasted source URL is classified by host into one of three kinds and
//! turned into the text or markup stored as the post's fetched content:
//!
//! | Kind             | Host                      | Output                       |
//! |------------------|---------------------------|------------------------------|
//! | `CodeEmbed`      | `gist.github.com`         | `<script>` gist embed        |
//! | `VideoEmbed`     | `youtube.com`, `youtu.be` | `<iframe>` player embed      |
//! | `GenericArticle` | anything else             | scraped, truncated page text |
//!
//! Failures never escape: each one is rendered to a message that becomes the
//! stored content. Only the generic path touches the network.

pub mod article;
pub mod error;
pub mod fetcher;
pub mod gist;
pub mod youtube;

use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info, warn};
use url::Url;

pub use error::{FetchError, ResolveError};
pub use fetcher::{HttpFetcher, PageFetcher};

use crate::config::FetchSettings;
use crate::domain::ContentSource;

/// What a source URL points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// GitHub Gist code snippet
    CodeEmbed,

    /// YouTube video
    VideoEmbed,

    /// Any other page, fetched and reduced to text
    GenericArticle,
}

impl SourceKind {
    /// Classify by host. URLs that do not parse fall through to `GenericArticle`.
    pub fn classify(url: &str) -> Self {
        let host = Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_lowercase))
            .unwrap_or_default();

        if host.contains("gist.github.com") {
            SourceKind::CodeEmbed
        } else if host.contains("youtube.com") || host.contains("youtu.be") {
            SourceKind::VideoEmbed
        } else {
            SourceKind::GenericArticle
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::CodeEmbed => write!(f, "code_embed"),
            SourceKind::VideoEmbed => write!(f, "video_embed"),
            SourceKind::GenericArticle => write!(f, "generic_article"),
        }
    }
}

/// Outcome of comparing the stored source URL with the current one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceChange {
    /// Same URL (or still none); keep existing content
    Unchanged,

    /// URL removed; content must be cleared
    Cleared,

    /// New URL that needs resolving
    Changed(String),
}

fn present(url: Option<&str>) -> Option<&str> {
    url.map(str::trim).filter(|u| !u.is_empty())
}

/// Compare previous and current source URLs. Blank URLs count as absent.
pub fn detect_change(previous: Option<&str>, current: Option<&str>) -> SourceChange {
    match (present(previous), present(current)) {
        (previous, Some(current)) if previous != Some(current) => {
            SourceChange::Changed(current.to_string())
        }
        (Some(_), None) => SourceChange::Cleared,
        _ => SourceChange::Unchanged,
    }
}

/// Turns source URLs into stored content
pub struct ContentResolver {
    fetcher: Arc<dyn PageFetcher>,
}

impl ContentResolver {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }

    /// Resolver backed by a real HTTP client
    pub fn from_settings(settings: &FetchSettings) -> Result<Self> {
        Ok(Self::new(Arc::new(HttpFetcher::new(settings)?)))
    }

    /// Resolve a URL to display content. Failures come back as their message.
    pub async fn resolve(&self, url: &str) -> String {
        match self.try_resolve(url).await {
            Ok(content) => content,
            Err(e) => {
                warn!(url, error = %e, "Source resolution failed");
                e.to_string()
            }
        }
    }

    async fn try_resolve(&self, url: &str) -> Result<String, ResolveError> {
        let kind = SourceKind::classify(url);
        debug!(url, %kind, "Classified source URL");

        match kind {
            SourceKind::CodeEmbed => gist::embed(url),
            SourceKind::VideoEmbed => youtube::embed(url),
            SourceKind::GenericArticle => self.fetch_article(url).await,
        }
    }

    async fn fetch_article(&self, url: &str) -> Result<String, ResolveError> {
        info!(url, "Fetching article");

        let html = self
            .fetcher
            .fetch(url)
            .await
            .map_err(|source| ResolveError::Fetch {
                url: url.to_string(),
                source,
            })?;

        article::extract(&html).map_err(|detail| ResolveError::Processing {
            url: url.to_string(),
            detail,
        })
    }

    /// Bring a source's derived content in line with its URL.
    ///
    /// Resolves only when the URL differs from the one seen last time, clears
    /// content when the URL was removed, and always records the current URL as
    /// the new baseline.
    pub async fn refresh(&self, source: &mut ContentSource) -> SourceChange {
        let change = detect_change(
            source.previous_source_url.as_deref(),
            source.source_url.as_deref(),
        );

        match &change {
            SourceChange::Changed(url) => {
                source.derived_content = Some(self.resolve(url).await);
            }
            SourceChange::Cleared => {
                debug!("Source URL cleared, dropping fetched content");
                source.derived_content = None;
            }
            SourceChange::Unchanged => {}
        }

        source.previous_source_url = source.source_url.clone();
        change
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingFetcher {
        body: String,
        calls: AtomicUsize,
    }

    impl CountingFetcher {
        fn new(body: &str) -> Arc<Self> {
            Arc::new(Self {
                body: body.to_string(),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PageFetcher for CountingFetcher {
        async fn fetch(&self, _url: &str) -> Result<String, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.body.clone())
        }
    }

    #[test]
    fn test_classify() {
        assert_eq!(
            SourceKind::classify("https://gist.github.com/user/deadbeef01"),
            SourceKind::CodeEmbed
        );
        assert_eq!(
            SourceKind::classify("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            SourceKind::VideoEmbed
        );
        assert_eq!(
            SourceKind::classify("https://youtu.be/dQw4w9WgXcQ"),
            SourceKind::VideoEmbed
        );
        assert_eq!(
            SourceKind::classify("https://m.youtube.com/watch?v=dQw4w9WgXcQ"),
            SourceKind::VideoEmbed
        );
        assert_eq!(
            SourceKind::classify("https://example.com/gist.github.com/user/abc"),
            SourceKind::GenericArticle
        );
        assert_eq!(
            SourceKind::classify("not a url"),
            SourceKind::GenericArticle
        );
    }

    #[test]
    fn test_detect_change() {
        assert_eq!(detect_change(None, None), SourceChange::Unchanged);
        assert_eq!(
            detect_change(Some("https://a.dev"), Some("https://a.dev")),
            SourceChange::Unchanged
        );
        assert_eq!(
            detect_change(None, Some("https://a.dev")),
            SourceChange::Changed("https://a.dev".to_string())
        );
        assert_eq!(
            detect_change(Some("https://a.dev"), Some("https://b.dev")),
            SourceChange::Changed("https://b.dev".to_string())
        );
        assert_eq!(
            detect_change(Some("https://a.dev"), None),
            SourceChange::Cleared
        );
        assert_eq!(
            detect_change(Some("https://a.dev"), Some("  ")),
            SourceChange::Cleared
        );
        assert_eq!(detect_change(Some(""), None), SourceChange::Unchanged);
    }

    #[tokio::test]
    async fn test_gist_resolves_without_fetch() {
        let fetcher = CountingFetcher::new("<p>unused</p>");
        let resolver = ContentResolver::new(fetcher.clone());

        let content = resolver
            .resolve("https://gist.github.com/user/deadbeef01")
            .await;
        assert!(content.contains("https://gist.github.com/user/deadbeef01.js"));

        let content = resolver.resolve("https://gist.github.com/user").await;
        assert_eq!(
            content,
            "Error: Could not extract Gist ID from URL. Please check the Gist URL format."
        );
        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn test_video_failure_does_not_fall_back_to_fetch() {
        let fetcher = CountingFetcher::new("<p>unused</p>");
        let resolver = ContentResolver::new(fetcher.clone());

        let content = resolver.resolve("https://www.youtube.com/feed/trending").await;
        assert_eq!(
            content,
            "Error: Could not extract YouTube video ID from URL. Please check the YouTube URL format."
        );
        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn test_generic_article_is_fetched_once() {
        let fetcher = CountingFetcher::new("<html><body><p>Hello</p><p>world</p></body></html>");
        let resolver = ContentResolver::new(fetcher.clone());

        let content = resolver.resolve("https://example.com/post").await;
        assert_eq!(content, "Hello\nworld");
        assert_eq!(fetcher.calls(), 1);
    }

    #[tokio::test]
    async fn test_refresh_lifecycle() {
        let fetcher = CountingFetcher::new("<p>Body</p>");
        let resolver = ContentResolver::new(fetcher.clone());
        let mut source = ContentSource::new(Some("https://example.com/a".to_string()));

        let change = resolver.refresh(&mut source).await;
        assert_eq!(change, SourceChange::Changed("https://example.com/a".to_string()));
        assert_eq!(source.derived_content.as_deref(), Some("Body"));
        assert_eq!(
            source.previous_source_url.as_deref(),
            Some("https://example.com/a")
        );

        // Unchanged URL: no second fetch
        assert_eq!(resolver.refresh(&mut source).await, SourceChange::Unchanged);
        assert_eq!(fetcher.calls(), 1);

        source.set_source_url(None);
        assert_eq!(resolver.refresh(&mut source).await, SourceChange::Cleared);
        assert!(source.derived_content.is_none());
        assert!(source.previous_source_url.is_none());
        assert_eq!(fetcher.calls(), 1);
    }
}
