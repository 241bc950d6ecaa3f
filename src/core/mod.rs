pub mod aggregator;
pub mod etl;
pub mod normalizer;
pub mod paginator;

pub use crate::domain::model::{LanguageStats, NormalizedSalary, RawListing, StatsTable};
pub use crate::domain::ports::{PageFetcher, ReportSink, Storage};
pub use crate::utils::error::Result;
