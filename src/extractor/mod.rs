//! Chart extraction from fetched markup.
//!
//! Each [`Source`] has an [`Extractor`] that turns a page into a short list of
//! [`MovieEntry`] records using CSS selectors.
//!
//! ```text
//! HTML → Extractor → Vec<MovieEntry> → updater
//! ```
//!
//! Extraction never fails. Rows whose selectors do not match are skipped or
//! carry empty/absent fields, the same way a browser-side query would.

mod flixpatrol;
mod text;
mod trakt;

pub use flixpatrol::FlixPatrolExtractor;
pub use trakt::TraktExtractor;

use crate::domain::{MovieEntry, Source};

pub trait Extractor: Send + Sync {
    fn extract(&self, html: &str) -> Vec<MovieEntry>;
}

pub fn extractor_for(source: Source) -> Box<dyn Extractor> {
    match source {
        Source::FlixPatrol => Box::new(FlixPatrolExtractor::new()),
        Source::Trakt => Box::new(TraktExtractor::new()),
    }
}
