//! Search-list and gallery filtering. Pure functions over the cached entries.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use url::form_urlencoded;

use crate::types::{Apod, MediaKind};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Date,
    Title,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    #[default]
    Desc,
}

impl SortKey {
    pub fn parse(s: &str) -> Option<Self> {
        match s { "date" => Some(Self::Date), "title" => Some(Self::Title), _ => None }
    }
    pub fn as_str(&self) -> &'static str {
        match self { Self::Date => "date", Self::Title => "title" }
    }
}

impl SortDir {
    pub fn parse(s: &str) -> Option<Self> {
        match s { "asc" => Some(Self::Asc), "desc" => Some(Self::Desc), _ => None }
    }
    pub fn as_str(&self) -> &'static str {
        match self { Self::Asc => "asc", Self::Desc => "desc" }
    }
}

/// State of the search list, carried in the `q`, `sort` and `dir` params.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub q: String,
    pub sort: SortKey,
    pub dir: SortDir,
}

impl ListQuery {
    /// Unknown keys are ignored; unknown values fall back to the defaults.
    pub fn from_query_string(qs: &str) -> Self {
        let mut out = Self::default();
        for (k, v) in form_urlencoded::parse(qs.trim_start_matches('?').as_bytes()) {
            match k.as_ref() {
                "q" => out.q = v.into_owned(),
                "sort" => out.sort = SortKey::parse(&v).unwrap_or_default(),
                "dir" => out.dir = SortDir::parse(&v).unwrap_or_default(),
                _ => {}
            }
        }
        out
    }

    /// Empty for the default state; default-valued params are left out.
    pub fn to_query_string(&self) -> String {
        let mut ser = form_urlencoded::Serializer::new(String::new());
        if !self.q.is_empty() { ser.append_pair("q", &self.q); }
        if self.sort != SortKey::default() { ser.append_pair("sort", self.sort.as_str()); }
        if self.dir != SortDir::default() { ser.append_pair("dir", self.dir.as_str()); }
        ser.finish()
    }

    pub fn matches(&self, apod: &Apod) -> bool {
        if self.q.is_empty() {
            return true;
        }
        let needle = self.q.to_lowercase();
        apod.title.to_lowercase().contains(&needle) || apod.explanation.to_lowercase().contains(&needle)
    }

    /// Matching entries in the requested order. No match is an empty list.
    pub fn apply<'a>(&self, items: &'a [Apod]) -> Vec<&'a Apod> {
        let mut out: Vec<&Apod> = items.iter().filter(|a| self.matches(a)).collect();
        out.sort_by(|a, b| {
            let cmp = match self.sort {
                SortKey::Title => compare_titles(&a.title, &b.title),
                SortKey::Date => a.date.cmp(&b.date),
            };
            match self.dir { SortDir::Asc => cmp, SortDir::Desc => cmp.reverse() }
        });
        out
    }
}

/// Case-insensitive first, exact text as the tie-breaker.
fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MediaFilter {
    #[default]
    All,
    Only(MediaKind),
}

impl MediaFilter {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "all" => Some(Self::All),
            "image" => Some(Self::Only(MediaKind::Image)),
            "video" => Some(Self::Only(MediaKind::Video)),
            _ => None,
        }
    }
    pub fn as_str(&self) -> &'static str {
        match self { Self::All => "all", Self::Only(k) => k.as_str() }
    }
}

/// Gallery controls: media kind and publication year.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalleryFilter {
    pub media: MediaFilter,
    /// `None` shows every year.
    pub year: Option<String>,
}

impl GalleryFilter {
    pub fn from_query_string(qs: &str) -> Self {
        let mut out = Self::default();
        for (k, v) in form_urlencoded::parse(qs.trim_start_matches('?').as_bytes()) {
            match k.as_ref() {
                "media" => out.media = MediaFilter::parse(&v).unwrap_or_default(),
                "year" if v != "all" && !v.is_empty() => out.year = Some(v.into_owned()),
                _ => {}
            }
        }
        out
    }

    pub fn to_query_string(&self) -> String {
        let mut ser = form_urlencoded::Serializer::new(String::new());
        if self.media != MediaFilter::All { ser.append_pair("media", self.media.as_str()); }
        if let Some(y) = &self.year { ser.append_pair("year", y); }
        ser.finish()
    }

    pub fn matches(&self, apod: &Apod) -> bool {
        let ok_media = match self.media { MediaFilter::All => true, MediaFilter::Only(k) => apod.media_type == k };
        let ok_year = self.year.as_deref().map_or(true, |y| apod.date.starts_with(y));
        ok_media && ok_year
    }

    /// Filtered entries, list order preserved.
    pub fn apply<'a>(&self, items: &'a [Apod]) -> Vec<&'a Apod> {
        items.iter().filter(|a| self.matches(a)).collect()
    }
}

/// Distinct years present in `items`, newest first. Feeds the year selector.
pub fn years(items: &[Apod]) -> Vec<String> {
    let set: BTreeSet<&str> = items.iter().map(Apod::year).collect();
    set.into_iter().rev().map(str::to_string).collect()
}
