//! XML sitemap for the public site.
//!
//! Each section has a fixed priority and change frequency:
//!
//! | Section  | Priority | Change freq | Last modified |
//! |----------|----------|-------------|---------------|
//! | static   | 0.8      | daily       | -             |
//! | projects | 0.6      | weekly      | -             |
//! | blog     | 0.7      | daily       | pub date      |
//! | courses  | 0.5      | monthly     | -             |

use std::io::Cursor;

use anyhow::Result;
use chrono::{DateTime, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::domain::{BlogPost, Course, Project};
use crate::library::Library;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Top-level pages: home, project list, blog list, course list
pub const STATIC_PATHS: [&str; 4] = ["/", "/projects/", "/blog/", "/courses/"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFreq {
    Daily,
    Weekly,
    Monthly,
}

impl std::fmt::Display for ChangeFreq {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChangeFreq::Daily => write!(f, "daily"),
            ChangeFreq::Weekly => write!(f, "weekly"),
            ChangeFreq::Monthly => write!(f, "monthly"),
        }
    }
}

/// Priority and change frequency shared by a group of pages
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Section {
    pub priority: f32,
    pub changefreq: ChangeFreq,
}

pub const STATIC_SECTION: Section = Section {
    priority: 0.8,
    changefreq: ChangeFreq::Daily,
};

pub const PROJECT_SECTION: Section = Section {
    priority: 0.6,
    changefreq: ChangeFreq::Weekly,
};

pub const BLOG_SECTION: Section = Section {
    priority: 0.7,
    changefreq: ChangeFreq::Daily,
};

pub const COURSE_SECTION: Section = Section {
    priority: 0.5,
    changefreq: ChangeFreq::Monthly,
};

/// One `<url>` element
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: Option<DateTime<Utc>>,
    pub changefreq: ChangeFreq,
    pub priority: f32,
}

impl SitemapEntry {
    fn new(base_url: &str, path: &str, section: Section) -> Self {
        Self {
            loc: format!("{}{}", base_url.trim_end_matches('/'), path),
            lastmod: None,
            changefreq: section.changefreq,
            priority: section.priority,
        }
    }

    fn with_lastmod(mut self, lastmod: DateTime<Utc>) -> Self {
        self.lastmod = Some(lastmod);
        self
    }
}

/// Entries for the given records, in section order. Unsaved records are skipped.
pub fn build_entries(
    base_url: &str,
    projects: &[Project],
    posts: &[BlogPost],
    courses: &[Course],
) -> Vec<SitemapEntry> {
    let statics = STATIC_PATHS
        .iter()
        .map(|path| SitemapEntry::new(base_url, path, STATIC_SECTION));

    let projects = projects
        .iter()
        .filter_map(Project::absolute_path)
        .map(|path| SitemapEntry::new(base_url, &path, PROJECT_SECTION));

    let posts = posts.iter().map(|post| {
        SitemapEntry::new(base_url, &post.absolute_path(), BLOG_SECTION).with_lastmod(post.pub_date)
    });

    let courses = courses
        .iter()
        .filter_map(Course::absolute_path)
        .map(|path| SitemapEntry::new(base_url, &path, COURSE_SECTION));

    statics.chain(projects).chain(posts).chain(courses).collect()
}

/// Entries for everything currently in the library
pub fn collect(library: &Library, base_url: &str) -> Result<Vec<SitemapEntry>> {
    Ok(build_entries(
        base_url,
        &library.list_projects()?,
        &library.all_posts()?,
        &library.list_courses()?,
    ))
}

fn write_text_element(writer: &mut Writer<Cursor<Vec<u8>>>, name: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Render a sitemaps.org `urlset` document
pub fn render(entries: &[SitemapEntry]) -> Result<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(
        BytesStart::new("urlset").with_attributes([("xmlns", SITEMAP_NS)]),
    ))?;

    for entry in entries {
        writer.write_event(Event::Start(BytesStart::new("url")))?;
        write_text_element(&mut writer, "loc", &entry.loc)?;
        if let Some(lastmod) = entry.lastmod {
            write_text_element(&mut writer, "lastmod", &lastmod.format("%Y-%m-%d").to_string())?;
        }
        write_text_element(&mut writer, "changefreq", &entry.changefreq.to_string())?;
        write_text_element(&mut writer, "priority", &format!("{:.1}", entry.priority))?;
        writer.write_event(Event::End(BytesEnd::new("url")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("urlset")))?;

    let xml = String::from_utf8(writer.into_inner().into_inner())?;
    Ok(xml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn saved_project(id: i64) -> Project {
        let mut project = Project::new("folio", "This site");
        project.id = Some(id);
        project
    }

    #[test]
    fn test_build_entries_sections() {
        let pub_date = Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap();
        let post = BlogPost::new("Hello")
            .with_slug("hello")
            .with_pub_date(pub_date);
        let mut course = Course::new("Rust", "Ownership");
        course.id = Some(2);

        let entries = build_entries(
            "https://example.dev/",
            &[saved_project(1), Project::new("unsaved", "skipped")],
            &[post],
            &[course],
        );

        let locs: Vec<_> = entries.iter().map(|e| e.loc.as_str()).collect();
        assert_eq!(
            locs,
            vec![
                "https://example.dev/",
                "https://example.dev/projects/",
                "https://example.dev/blog/",
                "https://example.dev/courses/",
                "https://example.dev/projects/1/",
                "https://example.dev/blog/hello/",
                "https://example.dev/courses/2/",
            ]
        );

        assert_eq!(entries[0].priority, 0.8);
        assert_eq!(entries[4].changefreq, ChangeFreq::Weekly);
        assert_eq!(entries[5].lastmod, Some(pub_date));
        assert_eq!(entries[5].priority, 0.7);
        assert_eq!(entries[6].changefreq, ChangeFreq::Monthly);
        assert!(entries[6].lastmod.is_none());
    }

    #[test]
    fn test_render() {
        let pub_date = Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap();
        let entries = build_entries(
            "https://example.dev",
            &[],
            &[BlogPost::new("Q&A").with_slug("q-a").with_pub_date(pub_date)],
            &[],
        );

        let xml = render(&entries).unwrap();
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#));
        assert!(xml.contains("<loc>https://example.dev/blog/q-a/</loc>"));
        assert!(xml.contains("<lastmod>2024-03-09</lastmod>"));
        assert!(xml.contains("<changefreq>daily</changefreq>"));
        assert!(xml.contains("<priority>0.8</priority>"));
        assert_eq!(xml.matches("<url>").count(), 5);
    }
}
