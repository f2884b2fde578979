pub mod sqlite;

use crate::app::Result;

pub use sqlite::SqliteStore;

/// The single key every snapshot is written under.
pub const TRENDING_MOVIES_KEY: &str = "TRENDING_MOVIES";

/// Minimal key-value interface over the snapshot storage.
///
/// Reads and writes are independent; nothing ties a `get` to the `put` that
/// follows it, so concurrent writers race and the last one wins.
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn put(&self, key: &str, value: &str) -> Result<()>;
}
