//! Bulk-load the MovieLens CSV dataset into the catalog database.
//!
//! This crate owns the one-shot load path: reading `movies.csv`,
//! `links.csv`, `ratings.csv`, and `tags.csv`, enforcing referential
//! integrity, and reporting per-table statistics.

pub mod csv_import;
pub mod progress;

pub use csv_import::{
    ImportError, LINKS_FILE, LoadStats, MOVIES_FILE, RATINGS_FILE, TAGS_FILE, TableStats,
    load_dataset,
};
pub use progress::{ImportProgress, LogProgress, SilentProgress};
