pub mod memory;
pub mod postgres;

pub use memory::MemoryKvStore;
pub use postgres::PgKvStore;

use crate::error::Result;
use async_trait::async_trait;

/// String-keyed blob store backing the schedule collection.
///
/// `get` returns `None` for keys that were never written; `put` overwrites.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn put(&self, key: &str, value: String) -> Result<()>;
}
