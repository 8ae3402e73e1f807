//! Sitemap Integration Tests
//!
//! Builds a sitemap from records stored in a real library.

use chrono::{TimeZone, Utc};
use folio::resolver::{FetchError, PageFetcher};
use folio::{sitemap, BlogPost, ContentResolver, Course, Library, Note, Project};
use std::sync::Arc;

struct OfflineFetcher;

#[async_trait::async_trait]
impl PageFetcher for OfflineFetcher {
    async fn fetch(&self, _url: &str) -> Result<String, FetchError> {
        panic!("sitemap tests never fetch");
    }
}

#[tokio::test]
async fn test_sitemap_from_library() {
    let library = Library::open_in_memory().unwrap();
    let resolver = ContentResolver::new(Arc::new(OfflineFetcher));

    let mut project = Project::new("folio", "This site").with_github_link("https://github.com/me/folio");
    library.save_project(&mut project).unwrap();

    let mut course = Course::new("Rust", "Ownership");
    library.save_course(&mut course).unwrap();

    // Notes are not part of the sitemap
    let mut note = Note::new("Lecture 1", "Intro");
    library.save_note(&mut note).unwrap();

    let mut post = BlogPost::new("First Post")
        .with_pub_date(Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap());
    library.save_post(&mut post, &resolver).await.unwrap();

    let entries = sitemap::collect(&library, "https://me.dev").unwrap();
    assert_eq!(entries.len(), 7);

    let xml = sitemap::render(&entries).unwrap();
    assert!(xml.contains("<loc>https://me.dev/projects/1/</loc>"));
    assert!(xml.contains("<loc>https://me.dev/courses/1/</loc>"));
    assert!(xml.contains("<loc>https://me.dev/blog/first-post/</loc>"));
    assert!(xml.contains("<lastmod>2024-05-01</lastmod>"));
    assert!(xml.contains("<priority>0.6</priority>"));
    assert!(xml.contains("<priority>0.5</priority>"));
    assert!(!xml.contains("/notes/"));
}
