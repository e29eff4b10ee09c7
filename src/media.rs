//! Media URLs: detail-view source, embeddable video links, gallery thumbnails.

use url::Url;

use crate::types::{Apod, MediaKind};

/// Placeholder thumbnail for videos with no derivable preview.
pub const FALLBACK_THUMB: &str = "data:image/svg+xml;utf8,%3Csvg%20xmlns%3D'http%3A%2F%2Fwww.w3.org%2F2000%2Fsvg'%20width%3D'600'%20height%3D'400'%3E%3Crect%20width%3D'100%25'%20height%3D'100%25'%20fill%3D'%230c1226'%2F%3E%3Ctext%20x%3D'50%25'%20y%3D'50%25'%20dominant-baseline%3D'middle'%20text-anchor%3D'middle'%20fill%3D'%23a8b3cf'%20font-family%3D'sans-serif'%20font-size%3D'24'%3EVideo%3C%2Ftext%3E%3C%2Fsvg%3E";

fn is_youtube_host(host: &str) -> bool {
    host == "youtube.com" || host.ends_with(".youtube.com") || host == "youtube-nocookie.com" || host.ends_with(".youtube-nocookie.com")
}

fn is_vimeo_host(host: &str) -> bool { host == "vimeo.com" || host.ends_with(".vimeo.com") }

fn non_empty(s: &str) -> Option<String> { (!s.is_empty()).then(|| s.to_string()) }

/// Video id from `youtube.com/watch?v=`, `/embed/<id>`, `/shorts/<id>` or `youtu.be/<id>`.
pub fn youtube_id(url: &str) -> Option<String> {
    let u = Url::parse(url).ok()?;
    let host = u.host_str()?;
    if host == "youtu.be" {
        return u.path_segments()?.next().and_then(non_empty);
    }
    if !is_youtube_host(host) {
        return None;
    }
    if u.path() == "/watch" {
        return u.query_pairs().find(|(k, _)| k == "v").and_then(|(_, v)| non_empty(&v));
    }
    let mut segs = u.path_segments()?;
    match segs.next() {
        Some("embed") | Some("shorts") => segs.next().and_then(non_empty),
        _ => None,
    }
}

/// Numeric video id from `vimeo.com/<id>` or `player.vimeo.com/video/<id>`.
pub fn vimeo_id(url: &str) -> Option<String> {
    let u = Url::parse(url).ok()?;
    if !is_vimeo_host(u.host_str()?) {
        return None;
    }
    let segs: Vec<&str> = u.path_segments()?.filter(|s| !s.is_empty()).collect();
    let candidate = match segs.as_slice() {
        ["video", id, ..] => *id,
        [id, ..] => *id,
        [] => return None,
    };
    candidate.chars().all(|c| c.is_ascii_digit()).then(|| candidate.to_string())
}

/// Player URL suitable for an iframe. Already-embeddable and unknown URLs pass through.
pub fn embed_url(url: &str) -> String {
    if let Ok(u) = Url::parse(url) {
        let host = u.host_str().unwrap_or_default();
        let already = (is_youtube_host(host) && u.path().starts_with("/embed/")) || host == "player.vimeo.com";
        if already {
            return url.to_string();
        }
    }
    if let Some(id) = youtube_id(url) {
        return format!("https://www.youtube.com/embed/{id}");
    }
    if let Some(id) = vimeo_id(url) {
        return format!("https://player.vimeo.com/video/{id}");
    }
    url.to_string()
}

/// What the detail view shows: the high-resolution image when there is one,
/// the embeddable player for videos.
pub fn media_src(apod: &Apod) -> String {
    match apod.media_type {
        MediaKind::Image => apod.hdurl.clone().unwrap_or_else(|| apod.url.clone()),
        MediaKind::Video => embed_url(&apod.url),
    }
}

/// Gallery card image: the picture itself, the API thumbnail, a YouTube
/// preview, or [`FALLBACK_THUMB`].
pub fn thumbnail(apod: &Apod) -> String {
    if apod.is_image() {
        return apod.url.clone();
    }
    if let Some(t) = apod.thumbnail_url.as_deref().filter(|t| !t.is_empty()) {
        return t.to_string();
    }
    if let Some(id) = youtube_id(&apod.url) {
        return format!("https://img.youtube.com/vi/{id}/hqdefault.jpg");
    }
    FALLBACK_THUMB.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::sample;

    #[test]
    fn youtube_ids_from_common_shapes() {
        assert_eq!(youtube_id("https://www.youtube.com/embed/abc123?rel=0").as_deref(), Some("abc123"));
        assert_eq!(youtube_id("https://www.youtube.com/watch?v=xyz&t=10").as_deref(), Some("xyz"));
        assert_eq!(youtube_id("https://youtu.be/short1").as_deref(), Some("short1"));
        assert_eq!(youtube_id("https://m.youtube.com/shorts/s9").as_deref(), Some("s9"));
        assert_eq!(youtube_id("https://www.youtube.com/watch").as_deref(), None);
        assert_eq!(youtube_id("https://notyoutube.com/embed/abc"), None);
        assert_eq!(youtube_id("not a url"), None);
    }

    #[test]
    fn vimeo_ids() {
        assert_eq!(vimeo_id("https://vimeo.com/123456").as_deref(), Some("123456"));
        assert_eq!(vimeo_id("https://player.vimeo.com/video/987?color=fff").as_deref(), Some("987"));
        assert_eq!(vimeo_id("https://vimeo.com/channels/staffpicks"), None);
        assert_eq!(vimeo_id("https://example.com/123"), None);
    }

    #[test]
    fn embed_urls() {
        assert_eq!(embed_url("https://www.youtube.com/watch?v=xyz"), "https://www.youtube.com/embed/xyz");
        assert_eq!(embed_url("https://www.youtube.com/embed/xyz?rel=0"), "https://www.youtube.com/embed/xyz?rel=0");
        assert_eq!(embed_url("https://vimeo.com/42"), "https://player.vimeo.com/video/42");
        assert_eq!(embed_url("https://apod.nasa.gov/apod/movie.mp4"), "https://apod.nasa.gov/apod/movie.mp4");
    }

    #[test]
    fn detail_source_prefers_hd_image() {
        let mut apod = sample("2024-01-01", "x", MediaKind::Image);
        assert_eq!(media_src(&apod), apod.url);
        apod.hdurl = Some("https://apod.nasa.gov/hd.jpg".into());
        assert_eq!(media_src(&apod), "https://apod.nasa.gov/hd.jpg");
    }

    #[test]
    fn thumbnails_fall_back_in_order() {
        let image = sample("2024-01-01", "img", MediaKind::Image);
        assert_eq!(thumbnail(&image), image.url);

        let mut video = sample("2024-01-02", "vid", MediaKind::Video);
        video.url = "https://www.youtube.com/embed/abc".into();
        assert_eq!(thumbnail(&video), "https://img.youtube.com/vi/abc/hqdefault.jpg");

        video.thumbnail_url = Some("https://apod.nasa.gov/thumb.jpg".into());
        assert_eq!(thumbnail(&video), "https://apod.nasa.gov/thumb.jpg");

        video.thumbnail_url = None;
        video.url = "https://vimeo.com/42".into();
        assert_eq!(thumbnail(&video), FALLBACK_THUMB);
    }
}
