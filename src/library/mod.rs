//! SQLite-backed content library.
//!
//! Holds every portfolio record in a single database file.
//!
//! # Tables
//!
//! ```text
//! blog_posts  id, title, slug (unique), category, src, content_manual,
//!             content_fetched, pub_date, credit, show_fetched_first
//! courses     id, title, description, link
//! projects    id, title, description, image, link, github_link
//! notes       id, title, content, pdf_file, created_at
//! ```
//!
//! Timestamps are stored as RFC 3339 text.

pub mod posts;
pub mod records;

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, Row};
use thiserror::Error;
use tracing::debug;

pub use posts::{PostQuery, SlugEntry, POSTS_PER_PAGE};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS blog_posts (
    id                 INTEGER PRIMARY KEY AUTOINCREMENT,
    title              TEXT NOT NULL,
    slug               TEXT NOT NULL UNIQUE,
    category           TEXT,
    src                TEXT,
    content_manual     TEXT,
    content_fetched    TEXT,
    pub_date           TEXT NOT NULL,
    credit             TEXT,
    show_fetched_first INTEGER NOT NULL DEFAULT 0
);
CREATE INDEX IF NOT EXISTS blog_posts_pub_date ON blog_posts (pub_date);

CREATE TABLE IF NOT EXISTS courses (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    title       TEXT NOT NULL,
    description TEXT NOT NULL,
    link        TEXT
);

CREATE TABLE IF NOT EXISTS projects (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    title       TEXT NOT NULL,
    description TEXT NOT NULL,
    image       TEXT,
    link        TEXT,
    github_link TEXT
);

CREATE TABLE IF NOT EXISTS notes (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    title      TEXT NOT NULL,
    content    TEXT NOT NULL,
    pdf_file   TEXT,
    created_at TEXT NOT NULL
);
"#;

/// Errors that can occur in the library
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("{kind} not found: {key}")]
    NotFound { kind: &'static str, key: String },

    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LibraryError {
    pub(crate) fn not_found(kind: &'static str, key: impl ToString) -> Self {
        LibraryError::NotFound {
            kind,
            key: key.to_string(),
        }
    }
}

/// The content database
pub struct Library {
    conn: Connection,
}

impl Library {
    /// Open (creating if needed) the database at `path`
    pub fn open(path: &Path) -> Result<Self, LibraryError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        debug!(path = %path.display(), "Opening library");
        Self::init(Connection::open(path)?)
    }

    /// Throwaway in-memory database
    pub fn open_in_memory() -> Result<Self, LibraryError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, LibraryError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }
}

// Fixed width so text order matches time order
pub(crate) fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Read an RFC 3339 text column
pub(crate) fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_parent_and_schema() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("folio.sqlite3");

        Library::open(&path).unwrap();
        assert!(path.exists());

        // Re-opening an existing database is fine
        let library = Library::open(&path).unwrap();
        let tables: i64 = library
            .conn()
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN \
                 ('blog_posts', 'courses', 'projects', 'notes')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 4);
    }

    #[test]
    fn test_not_found_message() {
        let err = LibraryError::not_found("Blog post", "missing-slug");
        assert_eq!(err.to_string(), "Blog post not found: missing-slug");
    }
}
