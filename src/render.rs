//! Plain-text rendering of the views.

use std::fmt::Write;

use crate::{DetailView, GalleryView, ListView, View};

pub const NOT_FOUND: &str = "Not found";

pub fn render(view: &View) -> String {
    match view {
        View::List(v) => render_list(v),
        View::Gallery(v) => render_gallery(v),
        View::Detail(v) => render_detail(v),
        View::DetailError { date, message } => format!("APOD {date}\nError: {message}\n"),
        View::NotFound(path) => format!("{NOT_FOUND}: {path}\n"),
    }
}

pub fn render_list(v: &ListView) -> String {
    let mut out = String::from("NASA APOD – Search\n");
    let q = &v.query;
    let _ = writeln!(out, "filter: {:?}  sort: {} {}", q.q, q.sort.as_str(), q.dir.as_str());
    if let Some(err) = &v.error {
        let _ = writeln!(out, "Error: {err}");
    }
    for (i, apod) in v.entries.iter().enumerate() {
        let _ = writeln!(out, "{:>3}. {}  {}", i + 1, apod.date, apod.title);
    }
    if v.entries.is_empty() && v.error.is_none() {
        out.push_str("(no matching entries)\n");
    }
    out
}

pub fn render_gallery(v: &GalleryView) -> String {
    let mut out = String::from("Gallery\n");
    let year = v.filter.year.as_deref().unwrap_or("all");
    let _ = writeln!(out, "media: {}  year: {}  (years: {})", v.filter.media.as_str(), year, v.years.join(", "));
    if let Some(err) = &v.error {
        let _ = writeln!(out, "Error: {err}");
    }
    for (i, card) in v.cards.iter().enumerate() {
        let badge = if card.is_video { " [▶ video]" } else { "" };
        let _ = writeln!(out, "{:>3}. {}  {}{}", i + 1, card.date, card.title, badge);
        let _ = writeln!(out, "     {}", card.thumbnail);
    }
    if v.cards.is_empty() && v.error.is_none() {
        out.push_str("(no matching entries)\n");
    }
    out
}

pub fn render_detail(v: &DetailView) -> String {
    let a = &v.apod;
    let mut out = String::new();
    let _ = writeln!(out, "{}", a.title);
    match &a.copyright {
        Some(c) => { let _ = writeln!(out, "{} • © {}", a.date, c.trim()); }
        None => { let _ = writeln!(out, "{}", a.date); }
    }
    let label = if a.is_image() { "Image" } else { "Video" };
    let _ = writeln!(out, "{label}: {}", v.media_src);
    let _ = writeln!(out, "\n{}\n", a.explanation);
    let prev = v.prev.as_deref().unwrap_or("-");
    let next = v.next.as_deref().unwrap_or("-");
    let _ = writeln!(out, "← Previous: {prev}    Next →: {next}");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{GalleryFilter, ListQuery};
    use crate::types::{sample, MediaKind};
    use crate::Card;

    #[test]
    fn list_shows_error_and_entries() {
        let v = ListView {
            query: ListQuery::default(),
            entries: vec![sample("2024-03-01", "Galaxy", MediaKind::Image)],
            error: Some("Rate limit exceeded. Please try again later.".into()),
        };
        let out = render_list(&v);
        assert!(out.contains("Error: Rate limit exceeded"));
        assert!(out.contains("  1. 2024-03-01  Galaxy"));
    }

    #[test]
    fn empty_list_is_not_an_error() {
        let v = ListView { query: ListQuery { q: "zzz".into(), ..Default::default() }, entries: vec![], error: None };
        let out = render_list(&v);
        assert!(out.contains("(no matching entries)"));
        assert!(!out.contains("Error"));
    }

    #[test]
    fn gallery_marks_videos() {
        let v = GalleryView {
            filter: GalleryFilter::default(),
            years: vec!["2024".into()],
            cards: vec![Card { date: "2024-03-02".into(), title: "Launch".into(), thumbnail: "t.jpg".into(), is_video: true }],
            error: None,
        };
        let out = render_gallery(&v);
        assert!(out.contains("Launch [▶ video]"));
        assert!(out.contains("     t.jpg"));
    }

    #[test]
    fn detail_meta_includes_copyright_and_pager() {
        let mut apod = sample("2024-03-02", "Launch", MediaKind::Image);
        apod.copyright = Some("\nJane Doe\n".into());
        let v = DetailView { media_src: apod.url.clone(), apod, prev: Some("2024-03-03".into()), next: None };
        let out = render_detail(&v);
        assert!(out.contains("2024-03-02 • © Jane Doe"));
        assert!(out.contains("← Previous: 2024-03-03    Next →: -"));
    }

    #[test]
    fn not_found() {
        assert_eq!(render(&View::NotFound("/x".into())), "Not found: /x\n");
    }
}
