//! Client-side analytics for the tweetsense dashboard.
//!
//! Everything here is pure: explorer results are turned into derived metrics
//! and rankings ([`aggregate`]), narrowed by a free-text search ([`filter`]),
//! and batch uploads are merged with predicted labels ([`batch`]) and written
//! back out as CSV ([`export`]). Nothing is cached between calls.

pub mod aggregate;
pub mod batch;
pub mod error;
pub mod export;
pub mod filter;
pub mod record;

pub use aggregate::{aggregate, Analytics, EntityScore, SentimentCounts, Series, StackedSeries};
pub use batch::{label_counts, merge, submittable_rows, texts, BatchRow};
pub use error::AnalyticsError;
pub use export::{export_csv_file, read_csv, read_csv_file, write_csv};
pub use filter::{filter_leaderboard, filter_rows, filter_samples, Searchable};
pub use record::{Record, ToRecord};
