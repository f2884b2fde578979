use std::path::PathBuf;
use std::sync::Arc;

use crate::app::error::{MarqueeError, Result};
use crate::config::Config;
use crate::domain::Source;
use crate::extractor::{extractor_for, Extractor};
use crate::fetcher::{Fetcher, HttpFetcher};
use crate::store::SqliteStore;

pub struct AppContext {
    pub source: Source,
    pub fetcher: Arc<dyn Fetcher + Send + Sync>,
    pub extractor: Box<dyn Extractor>,
    store: Option<Arc<SqliteStore>>,
}

impl AppContext {
    pub fn new(config: &Config) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::new(&config.fetcher)?);

        let store = if config.store.enabled {
            let db_path = match &config.store.path {
                Some(p) => p.clone(),
                None => Self::default_db_path()?,
            };
            Some(Arc::new(SqliteStore::new(&db_path)?))
        } else {
            tracing::warn!("Storage is disabled; every update request will fail");
            None
        };

        Ok(Self::with_parts(config.source, fetcher, store))
    }

    pub fn with_parts(
        source: Source,
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        store: Option<Arc<SqliteStore>>,
    ) -> Self {
        Self {
            source,
            fetcher,
            extractor: extractor_for(source),
            store,
        }
    }

    /// The snapshot store, or an error when storage is not configured.
    pub fn store(&self) -> Result<&SqliteStore> {
        self.store.as_deref().ok_or(MarqueeError::StoreNotConfigured)
    }

    fn default_db_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| MarqueeError::Config("Could not find data directory".into()))?;
        let marquee_dir = data_dir.join("marquee");
        std::fs::create_dir_all(&marquee_dir)?;
        Ok(marquee_dir.join("marquee.db"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_with_store_at_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.store.path = Some(dir.path().join("marquee.db"));

        let ctx = AppContext::new(&config).unwrap();
        assert!(ctx.store().is_ok());
        assert_eq!(ctx.source, Source::FlixPatrol);
    }

    #[test]
    fn test_disabled_store_is_reported() {
        let mut config = Config::default();
        config.store.enabled = false;

        let ctx = AppContext::new(&config).unwrap();
        assert!(matches!(ctx.store(), Err(MarqueeError::StoreNotConfigured)));
    }
}
