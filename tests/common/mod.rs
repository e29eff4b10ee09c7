#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use apodview::api::{ApodClient, RetryPolicy, Transport};
use apodview::error::ApiError;
use apodview::storage::{MemoryStorage, Storage};
use apodview::store::ApodStore;
use apodview::types::{Apod, MediaKind};
use apodview::Viewer;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Fake APOD endpoint: serves a fixed catalogue, optionally failing the
/// first requests with queued statuses, and counts every request.
pub struct FakeApi {
    catalogue: Vec<Apod>,
    failures: Mutex<VecDeque<u16>>,
    requests: Mutex<Vec<Vec<(String, String)>>>,
}

impl FakeApi {
    pub fn new(catalogue: Vec<Apod>) -> Arc<Self> {
        Arc::new(Self { catalogue, failures: Mutex::new(VecDeque::new()), requests: Mutex::new(Vec::new()) })
    }

    pub fn failing(catalogue: Vec<Apod>, statuses: &[u16]) -> Arc<Self> {
        let api = Self::new(catalogue);
        api.failures.lock().unwrap().extend(statuses.iter().copied());
        api
    }

    pub fn request_count(&self) -> usize { self.requests.lock().unwrap().len() }

    pub fn requests(&self) -> Vec<Vec<(String, String)>> { self.requests.lock().unwrap().clone() }
}

fn param<'a>(query: &'a [(&str, String)], key: &str) -> Option<&'a str> {
    query.iter().find(|(k, _)| *k == key).map(|(_, v)| v.as_str())
}

#[async_trait]
impl Transport for FakeApi {
    async fn get(&self, _path: &str, query: &[(&str, String)]) -> Result<String, ApiError> {
        self.requests.lock().unwrap().push(query.iter().map(|(k, v)| (k.to_string(), v.clone())).collect());
        if let Some(status) = self.failures.lock().unwrap().pop_front() {
            return Err(ApiError::Status { status, body: String::new() });
        }
        if let Some(date) = param(query, "date") {
            return match self.catalogue.iter().find(|a| a.date == date) {
                Some(a) => Ok(serde_json::to_string(a).unwrap()),
                None => Err(ApiError::Status { status: 404, body: "not found".into() }),
            };
        }
        let start = param(query, "start_date").unwrap_or("0000-00-00");
        let end = param(query, "end_date").unwrap_or("9999-99-99");
        // Oldest first, the way the endpoint returns ranges.
        let mut hits: Vec<&Apod> = self.catalogue.iter().filter(|a| a.date.as_str() >= start && a.date.as_str() <= end).collect();
        hits.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(serde_json::to_string(&hits).unwrap())
    }
}

pub fn apod(date: &str, title: &str, kind: MediaKind) -> Apod {
    Apod {
        date: date.to_string(),
        title: title.to_string(),
        explanation: format!("About {title}."),
        media_type: kind,
        url: match kind {
            MediaKind::Image => format!("https://apod.nasa.gov/apod/image/{date}.jpg"),
            MediaKind::Video => "https://www.youtube.com/embed/vid123?rel=0".to_string(),
        },
        hdurl: None,
        thumbnail_url: None,
        copyright: None,
    }
}

pub fn catalogue() -> Vec<Apod> {
    vec![
        apod("2024-02-28", "Orion Nebula", MediaKind::Image),
        apod("2024-03-01", "Rocket Launch", MediaKind::Video),
        apod("2024-03-02", "Andromeda Galaxy", MediaKind::Image),
        apod("2023-12-25", "Winter Solstice Sun", MediaKind::Image),
    ]
}

pub fn today() -> NaiveDate { NaiveDate::from_ymd_opt(2024, 3, 2).unwrap() }

/// Zero delays keep retry tests instant.
pub fn fast_retry() -> RetryPolicy { RetryPolicy { retries: 2, base_delay: std::time::Duration::ZERO } }

pub async fn viewer_with(api: Arc<FakeApi>, storage: Arc<dyn Storage>) -> Viewer {
    let client = ApodClient::new(api, fast_retry());
    let store = ApodStore::load(storage).await;
    Viewer::new(client, store, 120)
}

pub async fn viewer(api: Arc<FakeApi>) -> Viewer {
    viewer_with(api, Arc::new(MemoryStorage::new())).await
}
