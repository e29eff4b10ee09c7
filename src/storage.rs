use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Key-value blob store backing the entry cache.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn put(&self, key: &str, payload: &str) -> Result<()>;
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Process-local store; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self { Self::default() }

    pub fn with_entry(key: &str, payload: &str) -> Self {
        let s = Self::default();
        s.lock().insert(key.to_string(), payload.to_string());
        s
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A poisoned map is still a valid map.
        self.entries.lock().unwrap_or_else(|p| p.into_inner())
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> { Ok(self.lock().get(key).cloned()) }

    async fn put(&self, key: &str, payload: &str) -> Result<()> {
        self.lock().insert(key.to_string(), payload.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_storage_overwrites_and_removes() {
        let s = MemoryStorage::with_entry("k", "one");
        assert_eq!(s.get("k").await.unwrap().as_deref(), Some("one"));
        s.put("k", "two").await.unwrap();
        assert_eq!(s.get("k").await.unwrap().as_deref(), Some("two"));
        s.remove("k").await.unwrap();
        assert_eq!(s.get("k").await.unwrap(), None);
    }
}
