use serde::{Deserialize, Serialize};

/// Classification of an entry; decides between the image and video rendering paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self { MediaKind::Image => "image", MediaKind::Video => "video" }
    }
}

/// One day's published entry, exactly as the APOD endpoint returns it.
///
/// `date` (`YYYY-MM-DD`) is the natural key and the sort key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Apod {
    pub date: String,
    pub title: String,
    pub explanation: String,
    pub media_type: MediaKind,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hdurl: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
}

impl Apod {
    pub fn is_image(&self) -> bool { self.media_type == MediaKind::Image }
    pub fn is_video(&self) -> bool { self.media_type == MediaKind::Video }
    /// Four-digit year prefix of the date.
    pub fn year(&self) -> &str { self.date.get(..4).unwrap_or(&self.date) }
}

/// Newest first. `YYYY-MM-DD` strings order the same as the dates they name.
pub fn sort_newest_first(items: &mut [Apod]) {
    items.sort_by(|a, b| b.date.cmp(&a.date));
}

#[cfg(test)]
pub(crate) fn sample(date: &str, title: &str, kind: MediaKind) -> Apod {
    Apod {
        date: date.to_string(),
        title: title.to_string(),
        explanation: format!("Explanation for {title}"),
        media_type: kind,
        url: format!("https://apod.nasa.gov/apod/image/{date}.jpg"),
        hdurl: None,
        thumbnail_url: None,
        copyright: None,
    }
}
