//! Domain types for the portfolio.
//!
//! - BlogPost: posts with manual and source-derived content
//! - ContentSource: a post's source URL and what was resolved from it
//! - Course, Project, Note: plain listed records

pub mod blog;
pub mod records;
pub mod slug;
pub mod source;

// Re-export commonly used types
pub use blog::BlogPost;
pub use records::{Course, Note, Project};
pub use slug::slugify;
pub use source::ContentSource;
