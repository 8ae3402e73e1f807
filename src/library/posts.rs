//! Blog post persistence, search and listing.

use rusqlite::{params, OptionalExtension, Row};
use serde::Serialize;
use tracing::info;

use super::{format_timestamp, timestamp_column, Library, LibraryError};
use crate::domain::{slug, BlogPost, ContentSource};
use crate::resolver::ContentResolver;

/// Page size for post listings
pub const POSTS_PER_PAGE: usize = 25;

const POST_COLUMNS: &str = "id, title, slug, category, src, content_manual, content_fetched, \
                            pub_date, credit, show_fetched_first";

// ?1 = LIKE pattern or NULL, ?2 = category or NULL
const POST_FILTER: &str = r"(?1 IS NULL
        OR title LIKE ?1 ESCAPE '\'
        OR content_manual LIKE ?1 ESCAPE '\'
        OR src LIKE ?1 ESCAPE '\'
        OR content_fetched LIKE ?1 ESCAPE '\'
        OR credit LIKE ?1 ESCAPE '\')
    AND (?2 IS NULL OR category = ?2)";

/// Filters for listing posts
#[derive(Debug, Clone, Default)]
pub struct PostQuery {
    /// Case-insensitive substring over title, manual content, source URL,
    /// fetched content and credit
    pub search: Option<String>,

    /// Exact category
    pub category: Option<String>,

    /// 1-based page number (0 is treated as 1)
    pub page: usize,
}

impl PostQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    fn like_pattern(&self) -> Option<String> {
        self.search.as_deref().map(|term| {
            let escaped = term
                .replace('\\', "\\\\")
                .replace('%', "\\%")
                .replace('_', "\\_");
            format!("%{}%", escaped)
        })
    }

    /// Rows skipped before this page; saturates so far pages come back empty
    fn offset(&self) -> i64 {
        i64::try_from(self.page.max(1) - 1)
            .ok()
            .and_then(|skipped| skipped.checked_mul(POSTS_PER_PAGE as i64))
            .unwrap_or(i64::MAX)
    }
}

/// Title and slug of a post, as exported by `post slugs`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlugEntry {
    pub title: String,
    pub slug: String,
}

fn post_from_row(row: &Row<'_>) -> rusqlite::Result<BlogPost> {
    Ok(BlogPost {
        id: Some(row.get(0)?),
        title: row.get(1)?,
        slug: row.get(2)?,
        category: row.get(3)?,
        source: ContentSource::loaded(row.get(4)?, row.get(6)?),
        content_manual: row.get(5)?,
        pub_date: timestamp_column(row, 7)?,
        credit: row.get(8)?,
        show_fetched_first: row.get(9)?,
    })
}

impl Library {
    /// Persist a post.
    ///
    /// Assigns a unique slug when none is set, then refreshes the fetched
    /// content if the source URL changed since the post was loaded. The
    /// save goes through whatever the resolution produced.
    pub async fn save_post(
        &self,
        post: &mut BlogPost,
        resolver: &ContentResolver,
    ) -> Result<i64, LibraryError> {
        if post.slug.trim().is_empty() {
            post.slug = self.unique_slug(&post.title, post.id)?;
        }

        resolver.refresh(&mut post.source).await;

        let pub_date = format_timestamp(&post.pub_date);
        let id = match post.id {
            Some(id) => {
                let changed = self.conn().execute(
                    "UPDATE blog_posts SET title = ?1, slug = ?2, category = ?3, src = ?4,
                         content_manual = ?5, content_fetched = ?6, pub_date = ?7, credit = ?8,
                         show_fetched_first = ?9
                     WHERE id = ?10",
                    params![
                        post.title,
                        post.slug,
                        post.category,
                        post.source.source_url,
                        post.content_manual,
                        post.source.derived_content,
                        pub_date,
                        post.credit,
                        post.show_fetched_first,
                        id,
                    ],
                )?;
                if changed == 0 {
                    return Err(LibraryError::not_found("Blog post", id));
                }
                id
            }
            None => {
                self.conn().execute(
                    "INSERT INTO blog_posts (title, slug, category, src, content_manual,
                         content_fetched, pub_date, credit, show_fetched_first)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                    params![
                        post.title,
                        post.slug,
                        post.category,
                        post.source.source_url,
                        post.content_manual,
                        post.source.derived_content,
                        pub_date,
                        post.credit,
                        post.show_fetched_first,
                    ],
                )?;
                self.conn().last_insert_rowid()
            }
        };

        post.id = Some(id);
        info!(id, slug = %post.slug, "Saved blog post");
        Ok(id)
    }

    /// First free slug derived from `title`, ignoring the post `exclude`
    pub fn unique_slug(&self, title: &str, exclude: Option<i64>) -> Result<String, LibraryError> {
        let base = slug::slugify(title);
        let found = slug::candidates(&base)
            .map(|candidate| {
                self.slug_taken(&candidate, exclude)
                    .map(|taken| (!taken).then_some(candidate))
            })
            .find_map(Result::transpose)
            .unwrap_or_else(|| Ok(base.clone()));
        found
    }

    fn slug_taken(&self, slug: &str, exclude: Option<i64>) -> Result<bool, LibraryError> {
        let taken = self.conn().query_row(
            "SELECT EXISTS(SELECT 1 FROM blog_posts WHERE slug = ?1 AND (?2 IS NULL OR id != ?2))",
            params![slug, exclude],
            |row| row.get(0),
        )?;
        Ok(taken)
    }

    pub fn get_post(&self, id: i64) -> Result<BlogPost, LibraryError> {
        self.conn()
            .query_row(
                &format!("SELECT {} FROM blog_posts WHERE id = ?1", POST_COLUMNS),
                params![id],
                post_from_row,
            )
            .optional()?
            .ok_or_else(|| LibraryError::not_found("Blog post", id))
    }

    pub fn get_post_by_slug(&self, slug: &str) -> Result<BlogPost, LibraryError> {
        self.conn()
            .query_row(
                &format!("SELECT {} FROM blog_posts WHERE slug = ?1", POST_COLUMNS),
                params![slug],
                post_from_row,
            )
            .optional()?
            .ok_or_else(|| LibraryError::not_found("Blog post", slug))
    }

    /// One page of posts, newest first
    pub fn list_posts(&self, query: &PostQuery) -> Result<Vec<BlogPost>, LibraryError> {
        let sql = format!(
            "SELECT {} FROM blog_posts WHERE {} ORDER BY pub_date DESC, id DESC LIMIT ?3 OFFSET ?4",
            POST_COLUMNS, POST_FILTER
        );
        let mut stmt = self.conn().prepare(&sql)?;
        let posts = stmt
            .query_map(
                params![
                    query.like_pattern(),
                    query.category,
                    POSTS_PER_PAGE as i64,
                    query.offset()
                ],
                post_from_row,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(posts)
    }

    /// Number of posts matching the query's filters (ignores paging)
    pub fn count_posts(&self, query: &PostQuery) -> Result<usize, LibraryError> {
        let count: i64 = self.conn().query_row(
            &format!("SELECT COUNT(*) FROM blog_posts WHERE {}", POST_FILTER),
            params![query.like_pattern(), query.category],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// Every post, newest first
    pub fn all_posts(&self) -> Result<Vec<BlogPost>, LibraryError> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {} FROM blog_posts ORDER BY pub_date DESC, id DESC",
            POST_COLUMNS
        ))?;
        let posts = stmt
            .query_map([], post_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(posts)
    }

    /// Distinct non-empty categories, sorted
    pub fn post_categories(&self) -> Result<Vec<String>, LibraryError> {
        let mut stmt = self.conn().prepare(
            "SELECT DISTINCT category FROM blog_posts
             WHERE category IS NOT NULL AND category != '' ORDER BY category",
        )?;
        let categories = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(categories)
    }

    pub fn list_slugs(&self) -> Result<Vec<SlugEntry>, LibraryError> {
        let mut stmt = self
            .conn()
            .prepare("SELECT title, slug FROM blog_posts ORDER BY pub_date DESC, id DESC")?;
        let entries = stmt
            .query_map([], |row| {
                Ok(SlugEntry {
                    title: row.get(0)?,
                    slug: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(entries)
    }

    pub fn delete_post(&self, id: i64) -> Result<(), LibraryError> {
        let deleted = self
            .conn()
            .execute("DELETE FROM blog_posts WHERE id = ?1", params![id])?;
        if deleted == 0 {
            return Err(LibraryError::not_found("Blog post", id));
        }
        info!(id, "Deleted blog post");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        let query = PostQuery::new().search("100%_off\\");
        assert_eq!(
            query.like_pattern().as_deref(),
            Some("%100\\%\\_off\\\\%")
        );
        assert!(PostQuery::new().like_pattern().is_none());
    }

    #[test]
    fn test_offset() {
        assert_eq!(PostQuery::new().offset(), 0);
        assert_eq!(PostQuery::new().page(1).offset(), 0);
        assert_eq!(PostQuery::new().page(3).offset(), 50);
    }

    #[test]
    fn test_offset_saturates_for_huge_pages() {
        assert_eq!(PostQuery::new().page(1usize << 62).offset(), i64::MAX);
        assert_eq!(PostQuery::new().page(usize::MAX).offset(), i64::MAX);
    }

    #[test]
    fn test_unique_slug_skips_taken_candidates() {
        let library = Library::open_in_memory().unwrap();
        for slug in ["hello-world", "hello-world-1"] {
            library
                .conn()
                .execute(
                    "INSERT INTO blog_posts (title, slug, pub_date, show_fetched_first)
                     VALUES ('Hello World', ?1, '2024-01-01T00:00:00.000000Z', 0)",
                    params![slug],
                )
                .unwrap();
        }
        assert_eq!(
            library.unique_slug("Hello World", None).unwrap(),
            "hello-world-2"
        );
        assert_eq!(library.unique_slug("Hello World", Some(1)).unwrap(), "hello-world");
    }

    #[test]
    fn test_unique_slug_on_empty_library() {
        let library = Library::open_in_memory().unwrap();
        assert_eq!(
            library.unique_slug("Hello World", None).unwrap(),
            "hello-world"
        );
    }
}
