//! Path-based routing between the views.

use crate::query::{GalleryFilter, ListQuery};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`, which redirects to the search list.
    Root,
    Search(ListQuery),
    Gallery(GalleryFilter),
    /// `/apod/<date>`
    Detail(String),
    /// Anything else; carries the unmatched path.
    NotFound(String),
}

impl Route {
    /// Match `input` (`/path?query`). A configured `base_path` prefix is
    /// stripped first; a path outside it does not match anything.
    pub fn parse(input: &str, base_path: Option<&str>) -> Self {
        let input = input.trim();
        let (path, query) = input.split_once('?').unwrap_or((input, ""));

        let path = match base_path.map(|b| b.trim_end_matches('/')).filter(|b| !b.is_empty()) {
            Some(base) => match path.strip_prefix(base) {
                Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
                _ => return Self::NotFound(path.to_string()),
            },
            None => path,
        };

        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Self::Root,
            ["search"] => Self::Search(ListQuery::from_query_string(query)),
            ["gallery"] => Self::Gallery(GalleryFilter::from_query_string(query)),
            ["apod", date] => Self::Detail(date.to_string()),
            _ => Self::NotFound(path.to_string()),
        }
    }

    /// Follow the `/` redirect.
    pub fn resolve(self) -> Self {
        match self {
            Self::Root => Self::Search(ListQuery::default()),
            other => other,
        }
    }

    /// Canonical path, without any base path.
    pub fn to_path(&self) -> String {
        fn with_query(path: &str, qs: String) -> String {
            if qs.is_empty() { path.to_string() } else { format!("{path}?{qs}") }
        }
        match self {
            Self::Root => "/".to_string(),
            Self::Search(q) => with_query("/search", q.to_query_string()),
            Self::Gallery(f) => with_query("/gallery", f.to_query_string()),
            Self::Detail(date) => format!("/apod/{date}"),
            Self::NotFound(p) => p.clone(),
        }
    }
}
