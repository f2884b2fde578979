use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of entries kept in a merged snapshot.
pub const MERGED_SNAPSHOT_LIMIT: usize = 8;

/// The chart a running instance scrapes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// FlixPatrol top-10 tables, two rows per streaming service.
    #[default]
    FlixPatrol,
    /// Trakt trending movies grid.
    Trakt,
}

/// How a fresh scrape is combined with the stored snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// The snapshot is replaced by the fresh scrape.
    Replace,
    /// Fresh entries are put in front of the snapshot, duplicates dropped,
    /// and the result cut to `limit` entries.
    MergeTruncate { limit: usize },
}

impl Source {
    pub fn page_url(&self) -> &'static str {
        match self {
            Source::FlixPatrol => "https://flixpatrol.com/top10/",
            Source::Trakt => "https://trakt.tv/movies/trending",
        }
    }

    pub fn api_path(&self) -> &'static str {
        match self {
            Source::FlixPatrol => "/api/trending",
            Source::Trakt => "/api/trending-movies",
        }
    }

    pub fn cache_policy(&self) -> CachePolicy {
        match self {
            Source::FlixPatrol => CachePolicy::Replace,
            Source::Trakt => CachePolicy::MergeTruncate {
                limit: MERGED_SNAPSHOT_LIMIT,
            },
        }
    }

    /// Whether the API route scrapes on a cold cache instead of answering 404.
    pub fn fills_cold_cache(&self) -> bool {
        matches!(self, Source::FlixPatrol)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Source::FlixPatrol => "flixpatrol",
            Source::Trakt => "trakt",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flixpatrol" => Ok(Source::FlixPatrol),
            "trakt" => Ok(Source::Trakt),
            other => Err(format!(
                "Unknown source: {}. Use 'flixpatrol' or 'trakt'",
                other
            )),
        }
    }
}
