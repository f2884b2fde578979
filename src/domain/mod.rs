pub mod movie;
pub mod report;
pub mod source;

pub use movie::MovieEntry;
pub use report::UpdateReport;
pub use source::{CachePolicy, Source, MERGED_SNAPSHOT_LIMIT};
