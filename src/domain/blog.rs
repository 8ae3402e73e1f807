//! Blog posts.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::source::ContentSource;

/// Length of the fetched-content preview shown in post listings
pub const PREVIEW_CHARS: usize = 150;

/// A blog post with optional manual and fetched content
#[derive(Debug, Clone, Serialize)]
pub struct BlogPost {
    /// Row id, `None` until first saved
    pub id: Option<i64>,

    pub title: String,

    /// Unique URL slug; generated from the title when left empty
    pub slug: String,

    pub category: Option<String>,

    /// Source URL and the content fetched from it
    #[serde(flatten)]
    pub source: ContentSource,

    /// Hand-written body
    pub content_manual: Option<String>,

    pub pub_date: DateTime<Utc>,

    /// Attribution for the original source
    pub credit: Option<String>,

    /// Render fetched content before the manual body
    pub show_fetched_first: bool,
}

impl BlogPost {
    /// Create an unsaved post published now
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            slug: String::new(),
            category: None,
            source: ContentSource::default(),
            content_manual: None,
            pub_date: Utc::now(),
            credit: None,
            show_fetched_first: false,
        }
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source.set_source_url(Some(url.into()));
        self
    }

    pub fn with_manual_content(mut self, content: impl Into<String>) -> Self {
        self.content_manual = Some(content.into());
        self
    }

    pub fn with_credit(mut self, credit: impl Into<String>) -> Self {
        self.credit = Some(credit.into());
        self
    }

    pub fn with_pub_date(mut self, pub_date: DateTime<Utc>) -> Self {
        self.pub_date = pub_date;
        self
    }

    pub fn show_fetched_first(mut self, yes: bool) -> Self {
        self.show_fetched_first = yes;
        self
    }

    pub fn source_url(&self) -> Option<&str> {
        self.source.source_url.as_deref()
    }

    pub fn content_fetched(&self) -> Option<&str> {
        self.source.derived_content.as_deref()
    }

    /// Short preview of fetched content for listings, `-` when there is none
    pub fn fetched_preview(&self) -> String {
        match self.content_fetched().filter(|c| !c.is_empty()) {
            Some(content) if content.chars().count() > PREVIEW_CHARS => {
                let head: String = content.chars().take(PREVIEW_CHARS).collect();
                format!("{}...", head)
            }
            Some(content) => content.to_string(),
            None => "-".to_string(),
        }
    }

    /// Body sections in display order
    pub fn body(&self) -> Vec<&str> {
        let manual = self.content_manual.as_deref().filter(|c| !c.is_empty());
        let fetched = self.content_fetched().filter(|c| !c.is_empty());

        let ordered = if self.show_fetched_first {
            [fetched, manual]
        } else {
            [manual, fetched]
        };
        ordered.into_iter().flatten().collect()
    }

    /// Public path of the post's detail page
    pub fn absolute_path(&self) -> String {
        format!("/blog/{}/", self.slug)
    }
}

impl std::fmt::Display for BlogPost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title)
    }
}
