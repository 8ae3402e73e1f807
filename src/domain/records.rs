//! Courses, projects and notes.
//!
//! Plain records without derived content; they are listed on the public site
//! and, except for notes, included in the sitemap.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Upload prefix for project images
pub const PROJECT_IMAGE_DIR: &str = "projects/";

/// Upload prefix for note attachments
pub const NOTE_PDF_DIR: &str = "notes_pdfs/";

/// A course taken or taught
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Course {
    pub id: Option<i64>,
    pub title: String,
    pub description: String,
    pub link: Option<String>,
}

impl Course {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: description.into(),
            link: None,
        }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Detail page path, available once saved
    pub fn absolute_path(&self) -> Option<String> {
        self.id.map(|id| format!("/courses/{}/", id))
    }
}

/// A portfolio project
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    pub id: Option<i64>,
    pub title: String,
    pub description: String,

    /// Media-relative image path, e.g. `projects/screenshot.png`
    pub image: Option<String>,

    pub link: Option<String>,
    pub github_link: Option<String>,
}

impl Project {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: description.into(),
            image: None,
            link: None,
            github_link: None,
        }
    }

    /// Attach an image; bare file names are placed under [`PROJECT_IMAGE_DIR`]
    pub fn with_image(mut self, file_name: &str) -> Self {
        self.image = Some(media_path(PROJECT_IMAGE_DIR, file_name));
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn with_github_link(mut self, link: impl Into<String>) -> Self {
        self.github_link = Some(link.into());
        self
    }

    pub fn absolute_path(&self) -> Option<String> {
        self.id.map(|id| format!("/projects/{}/", id))
    }
}

/// A study note, optionally with a PDF attachment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    pub id: Option<i64>,
    pub title: String,
    pub content: String,

    /// Media-relative PDF path, e.g. `notes_pdfs/lecture-1.pdf`
    pub pdf_file: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl Note {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            content: content.into(),
            pdf_file: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_pdf(mut self, file_name: &str) -> Self {
        self.pdf_file = Some(media_path(NOTE_PDF_DIR, file_name));
        self
    }

    pub fn absolute_path(&self) -> Option<String> {
        self.id.map(|id| format!("/notes/{}/", id))
    }
}

fn media_path(dir: &str, file_name: &str) -> String {
    if file_name.starts_with(dir) {
        file_name.to_string()
    } else {
        format!("{}{}", dir, file_name.trim_start_matches('/'))
    }
}

macro_rules! display_title {
    ($($ty:ty),*) => {
        $(impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.title)
            }
        })*
    };
}

display_title!(Course, Project, Note);
