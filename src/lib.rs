//! folio - portfolio content backend
//!
//! Stores blog posts, courses, projects and notes for a personal portfolio
//! site and generates its sitemap.
//!
//! # Content resolution
//!
//! A blog post may carry a source URL. Whenever that URL changes, the post's
//! fetched content is rebuilt from it:
//! - GitHub Gists become a script embed
//! - YouTube links become a player embed
//! - Anything else is downloaded and reduced to readable text
//!
//! Failures are stored as the content itself, so a save never fails because
//! a source could not be fetched.
//!
//! # Modules
//!
//! - `resolver`: URL classification and content resolution
//! - `domain`: Record types (BlogPost, Course, Project, Note)
//! - `library`: SQLite persistence
//! - `sitemap`: XML sitemap generation
//! - `cli`: Command-line admin interface
//!
//! # Usage
//!
//! ```bash
//! # Create a post from a YouTube link
//! folio post add --title "Talk" --src https://youtu.be/dQw4w9WgXcQ
//!
//! # Write the sitemap
//! folio sitemap --output sitemap.xml
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod library;
pub mod resolver;
pub mod sitemap;

// Re-export main types at crate root for convenience
pub use domain::{BlogPost, ContentSource, Course, Note, Project};
pub use library::{Library, LibraryError, PostQuery};
pub use resolver::{detect_change, ContentResolver, PageFetcher, SourceChange, SourceKind};
