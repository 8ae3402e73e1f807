//! YouTube video embeds.

use std::sync::OnceLock;

use regex::Regex;

use super::error::ResolveError;

fn video_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?:v=|/embed/|youtu\.be/)([a-zA-Z0-9_-]{11})")
            .expect("video id pattern is valid")
    })
}

/// Pull the 11-character video id out of a watch, embed or short link
pub fn video_id(url: &str) -> Option<&str> {
    video_id_pattern()
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

pub fn embed_url(video_id: &str) -> String {
    format!("https://www.youtube.com/embed/{}", video_id)
}

/// Embed markup for a YouTube URL
pub fn embed(url: &str) -> Result<String, ResolveError> {
    let id = video_id(url).ok_or(ResolveError::VideoId)?;
    Ok(format!(
        r#"<iframe width="100%" height="315" src="{}" frameborder="0" allowfullscreen></iframe>"#,
        embed_url(id)
    ))
}
