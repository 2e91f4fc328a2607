/*!
 * YouTube video id extraction.
 *
 * Accepts a bare id or any of the usual URL shapes (`watch?v=`, `youtu.be/`,
 * `/embed/`, `/v/`). Whatever a URL pattern captures is only accepted when it
 * is exactly 11 characters of `[A-Za-z0-9_-]`, so truncated or malformed
 * matches are rejected instead of producing a broken player URL.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static VIDEO_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]{11}$").unwrap()
});

static URL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?:youtube\.com/watch\?(?:[^#\s]*&)?v=|youtu\.be/)([^&\n?#/]+)",
        r"youtube\.com/embed/([^&\n?#/]+)",
        r"youtube\.com/v/([^&\n?#/]+)",
    ]
    .iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
});

/// A validated 11-character YouTube video id
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    /// Validate a bare id
    pub fn parse(candidate: &str) -> Option<Self> {
        VIDEO_ID.is_match(candidate).then(|| Self(candidate.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Embeddable player URL
    pub fn embed_url(&self) -> String {
        format!("https://www.youtube.com/embed/{}?autoplay=1&rel=0", self.0)
    }

    /// Regular watch page URL
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extract the video id from a bare id or a YouTube URL
///
/// Returns `None` when no valid id can be found.
pub fn extract_video_id(input: &str) -> Option<VideoId> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Some(id) = VideoId::parse(input) {
        return Some(id);
    }

    URL_PATTERNS
        .iter()
        .filter_map(|pattern| pattern.captures(input))
        .filter_map(|caps| caps.get(1))
        .find_map(|m| VideoId::parse(m.as_str()))
}
