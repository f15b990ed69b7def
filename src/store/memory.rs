use async_trait::async_trait;
use dashmap::DashMap;

use super::KvStore;
use crate::error::Result;

/// Process-local store used when no database is configured.
#[derive(Clone, Default)]
pub struct MemoryKvStore {
    entries: std::sync::Arc<DashMap<String, String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for MemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    async fn put(&self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}
