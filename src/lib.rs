pub mod api;
pub mod browse;
pub mod config;
pub mod db;
pub mod error;
pub mod media;
pub mod query;
pub mod render;
pub mod routes;
pub mod storage;
pub mod store;
pub mod types;

// --- Library API for embedding ---

/// Convenience re-exports for embedders.
pub mod prelude {
    pub use crate::api::{ApodClient, HttpTransport, RetryPolicy, Transport};
    pub use crate::config::Config;
    pub use crate::error::ApiError;
    pub use crate::query::{GalleryFilter, ListQuery, MediaFilter, SortDir, SortKey};
    pub use crate::routes::Route;
    pub use crate::types::{Apod, MediaKind};
    pub use crate::{Card, DetailView, GalleryView, ListView, View, Viewer};
}

use anyhow::Result;
use chrono::{Days, NaiveDate};
use std::sync::Arc;

use crate::api::{ApodClient, HttpTransport};
use crate::config::Config;
use crate::db::Database;
use crate::query::{years, GalleryFilter, ListQuery};
use crate::routes::Route;
use crate::storage::{MemoryStorage, Storage};
use crate::store::ApodStore;
use crate::types::Apod;

// --- Data structures for the views ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub query: ListQuery,
    pub entries: Vec<Apod>,
    /// Set when the fetch made on entering the view failed.
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub date: String,
    pub title: String,
    pub thumbnail: String,
    pub is_video: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryView {
    pub filter: GalleryFilter,
    /// Options for the year selector.
    pub years: Vec<String>,
    pub cards: Vec<Card>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub apod: Apod,
    pub media_src: String,
    /// Date of the entry above this one in the cached list.
    pub prev: Option<String>,
    /// Date of the entry below this one in the cached list.
    pub next: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    List(ListView),
    Gallery(GalleryView),
    Detail(DetailView),
    DetailError { date: String, message: String },
    NotFound(String),
}

/// Library entry point. Owns the API client and the entry cache.
pub struct Viewer {
    client: ApodClient,
    store: ApodStore,
    window_days: u32,
}

impl Viewer {
    pub fn new(client: ApodClient, store: ApodStore, window_days: u32) -> Self {
        Self { client, store, window_days }
    }

    /// Build the HTTP client and open the cache. `ephemeral` keeps the cache in memory.
    pub async fn connect(cfg: &Config, ephemeral: bool) -> Result<Self> {
        let transport = HttpTransport::new(&cfg.base_url, &cfg.api_key)?;
        let client = ApodClient::new(Arc::new(transport), cfg.retry_policy());
        let storage: Arc<dyn Storage> = if ephemeral {
            Arc::new(MemoryStorage::new())
        } else {
            let db = Database::connect(cfg.database_url.as_deref()).await?;
            db.run_migrations().await?;
            Arc::new(db)
        };
        let store = ApodStore::load(storage).await;
        Ok(Self::new(client, store, cfg.window_days))
    }

    pub fn store(&self) -> &ApodStore { &self.store }

    pub async fn clear_cache(&mut self) { self.store.clear().await }

    /// First and last day of the fetch window ending at `today`.
    pub fn window(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let start = today.checked_sub_days(Days::new(u64::from(self.window_days))).unwrap_or(NaiveDate::MIN);
        (start, today)
    }

    /// Fetch the window when the cache is empty (or on `refresh`). Returns the
    /// user-facing message of a failed fetch; the cached list is left as it was.
    pub async fn ensure_loaded(&mut self, today: NaiveDate, refresh: bool) -> Option<String> {
        if !refresh && !self.store.is_empty() {
            tracing::debug!(count = self.store.len(), "using cached entries");
            return None;
        }
        let (start, end) = self.window(today);
        let (start, end) = (start.format("%Y-%m-%d").to_string(), end.format("%Y-%m-%d").to_string());
        match self.client.fetch_range(&start, &end).await {
            Ok(items) => {
                self.store.set_items(items).await;
                None
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load entries");
                Some(e.user_message())
            }
        }
    }

    pub async fn list(&mut self, query: ListQuery, today: NaiveDate, refresh: bool) -> ListView {
        let error = self.ensure_loaded(today, refresh).await;
        let entries = query.apply(self.store.items()).into_iter().cloned().collect();
        ListView { query, entries, error }
    }

    pub async fn gallery(&mut self, filter: GalleryFilter, today: NaiveDate, refresh: bool) -> GalleryView {
        let error = self.ensure_loaded(today, refresh).await;
        let items = self.store.items();
        let cards = filter
            .apply(items)
            .into_iter()
            .map(|a| Card { date: a.date.clone(), title: a.title.clone(), thumbnail: media::thumbnail(a), is_video: a.is_video() })
            .collect();
        GalleryView { years: years(items), filter, cards, error }
    }

    /// Cached entries are served without touching the network; anything else
    /// is fetched once and added to the cache.
    pub async fn detail(&mut self, date: &str) -> std::result::Result<DetailView, String> {
        let apod = match self.store.find(date) {
            Some(hit) => {
                tracing::debug!(date, "detail served from cache");
                hit.clone()
            }
            None => {
                let fetched = self.client.fetch_by_date(date).await.map_err(|e| {
                    tracing::error!(date, error = %e, "failed to load entry");
                    e.user_message()
                })?;
                self.store.insert(fetched.clone()).await;
                fetched
            }
        };
        let (prev, next) = self.store.neighbors(date);
        Ok(DetailView {
            media_src: media::media_src(&apod),
            prev: prev.map(|a| a.date.clone()),
            next: next.map(|a| a.date.clone()),
            apod,
        })
    }

    /// Render whichever view `route` names.
    pub async fn open(&mut self, route: Route, today: NaiveDate, refresh: bool) -> View {
        match route.resolve() {
            Route::Search(q) => View::List(self.list(q, today, refresh).await),
            Route::Gallery(f) => View::Gallery(self.gallery(f, today, refresh).await),
            Route::Detail(date) => match self.detail(&date).await {
                Ok(d) => View::Detail(d),
                Err(message) => View::DetailError { date, message },
            },
            Route::NotFound(p) => View::NotFound(p),
            Route::Root => View::NotFound("/".to_string()),
        }
    }
}

/// Today's date in UTC, matching the dates the feed is keyed on.
pub fn today_utc() -> NaiveDate { chrono::Utc::now().date_naive() }
