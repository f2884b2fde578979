//! The fetch → extract → merge → cache flow shared by every trigger.

use crate::app::{AppContext, Result};
use crate::domain::{CachePolicy, MovieEntry, UpdateReport};
use crate::store::{KvStore, TRENDING_MOVIES_KEY};

/// Result of one successful update run.
#[derive(Debug, Clone)]
pub struct UpdateOutcome {
    /// Snapshot as written to the store.
    pub stored: Vec<MovieEntry>,
    /// Entries from this scrape that were not already in the snapshot.
    pub new_count: usize,
}

impl UpdateOutcome {
    pub fn message(&self, policy: CachePolicy) -> String {
        match policy {
            CachePolicy::Replace => {
                format!("Successfully updated {} movies", self.stored.len())
            }
            CachePolicy::MergeTruncate { .. } => format!(
                "Successfully updated {} movies ({} new)",
                self.stored.len(),
                self.new_count
            ),
        }
    }
}

/// Scrape the configured source and write the result under
/// [`TRENDING_MOVIES_KEY`].
pub async fn run_update(ctx: &AppContext) -> Result<UpdateOutcome> {
    let store = ctx.store()?;
    let fresh = scrape(ctx).await?;

    let outcome = match ctx.source.cache_policy() {
        CachePolicy::Replace => UpdateOutcome {
            new_count: fresh.len(),
            stored: fresh,
        },
        CachePolicy::MergeTruncate { limit } => {
            let existing = match store.get(TRENDING_MOVIES_KEY)? {
                Some(raw) => decode_snapshot(&raw)?,
                None => Vec::new(),
            };
            let (stored, new_count) = merge_entries(fresh, existing, limit);
            UpdateOutcome { stored, new_count }
        }
    };

    store.put(TRENDING_MOVIES_KEY, &serde_json::to_string(&outcome.stored)?)?;
    tracing::info!(
        "Stored {} entries from {} ({} new)",
        outcome.stored.len(),
        ctx.source,
        outcome.new_count
    );

    Ok(outcome)
}

/// Fetch the source page and extract its entries without touching the store.
pub async fn scrape(ctx: &AppContext) -> Result<Vec<MovieEntry>> {
    let html = ctx.fetcher.fetch(ctx.source.page_url()).await?;
    Ok(ctx.extractor.extract(&html))
}

/// Put fresh entries in front of `existing`, dropping any fresh entry that
/// matches an existing one on title and watcher count, then cut to `limit`.
///
/// Returns the merged list and how many fresh entries were kept.
pub fn merge_entries(
    fresh: Vec<MovieEntry>,
    existing: Vec<MovieEntry>,
    limit: usize,
) -> (Vec<MovieEntry>, usize) {
    let mut merged: Vec<MovieEntry> = fresh
        .into_iter()
        .filter(|entry| !existing.iter().any(|old| old.same_listing(entry)))
        .collect();
    let new_count = merged.len();

    merged.extend(existing);
    merged.truncate(limit);

    (merged, new_count)
}

/// Parse a stored snapshot.
pub fn decode_snapshot(raw: &str) -> Result<Vec<MovieEntry>> {
    Ok(serde_json::from_str(raw)?)
}

/// Run an update on behalf of the scheduled trigger.
pub async fn scheduled_update(ctx: &AppContext) -> UpdateReport {
    match run_update(ctx).await {
        Ok(outcome) => UpdateReport::success(outcome.message(ctx.source.cache_policy())).stamped(),
        Err(e) => {
            tracing::error!("Error in scheduled task: {}", e);
            UpdateReport::failure("Scheduled task failed", e).stamped()
        }
    }
}
