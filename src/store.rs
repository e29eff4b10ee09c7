//! In-memory entry list mirrored to a single storage key.

use std::sync::Arc;

use crate::storage::Storage;
use crate::types::{sort_newest_first, Apod};

/// Storage key holding the serialized entry list.
pub const CACHE_KEY: &str = "apod-cache";

/// The cached entries. Newest first by convention at fetch time; nothing
/// re-sorts after an arbitrary `set_items`.
pub struct ApodStore {
    items: Vec<Apod>,
    storage: Arc<dyn Storage>,
}

impl ApodStore {
    /// Read the cached list. A missing, unreadable or corrupt blob is an empty list.
    pub async fn load(storage: Arc<dyn Storage>) -> Self {
        let items = match storage.get(CACHE_KEY).await {
            Ok(Some(raw)) => serde_json::from_str::<Vec<Apod>>(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "discarding corrupt entry cache");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "entry cache unreadable");
                Vec::new()
            }
        };
        tracing::debug!(count = items.len(), "entry cache loaded");
        Self { items, storage }
    }

    pub fn items(&self) -> &[Apod] { &self.items }
    pub fn is_empty(&self) -> bool { self.items.is_empty() }
    pub fn len(&self) -> usize { self.items.len() }

    /// Replace the list and rewrite the blob. A failed write is logged only.
    pub async fn set_items(&mut self, items: Vec<Apod>) {
        self.items = items;
        self.persist().await;
    }

    pub fn find(&self, date: &str) -> Option<&Apod> { self.items.iter().find(|a| a.date == date) }

    pub fn position(&self, date: &str) -> Option<usize> { self.items.iter().position(|a| a.date == date) }

    /// `(previous, next)` around `date`: the entries just before and just
    /// after it in list order. Both are `None` when `date` is not cached.
    pub fn neighbors(&self, date: &str) -> (Option<&Apod>, Option<&Apod>) {
        match self.position(date) {
            Some(idx) => (idx.checked_sub(1).and_then(|i| self.items.get(i)), self.items.get(idx + 1)),
            None => (None, None),
        }
    }

    /// Add `apod` unless its date is already cached, then re-sort newest first.
    /// Returns whether the list changed.
    pub async fn insert(&mut self, apod: Apod) -> bool {
        if self.find(&apod.date).is_some() {
            return false;
        }
        self.items.push(apod);
        sort_newest_first(&mut self.items);
        self.persist().await;
        true
    }

    pub async fn clear(&mut self) {
        self.items.clear();
        if let Err(e) = self.storage.remove(CACHE_KEY).await {
            tracing::warn!(error = %e, "failed to clear entry cache");
        }
    }

    async fn persist(&self) {
        let payload = match serde_json::to_string(&self.items) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize entry cache");
                return;
            }
        };
        if let Err(e) = self.storage.put(CACHE_KEY, &payload).await {
            tracing::warn!(error = %e, "failed to write entry cache");
        }
    }
}
