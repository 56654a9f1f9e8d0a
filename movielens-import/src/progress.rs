//! Import progress reporting.

/// Trait for receiving import progress updates.
pub trait ImportProgress {
    /// Called when a file starts loading (e.g., "Loading ratings.csv").
    fn on_phase(&self, message: &str);

    /// Called after each CSV record of `table` is processed.
    fn on_record(&self, table: &str, processed: u64);

    /// Called when the import is complete.
    fn on_complete(&self, message: &str);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl ImportProgress for SilentProgress {
    fn on_phase(&self, _message: &str) {}
    fn on_record(&self, _table: &str, _processed: u64) {}
    fn on_complete(&self, _message: &str) {}
}

/// A progress reporter that logs to the `log` crate.
pub struct LogProgress;

impl ImportProgress for LogProgress {
    fn on_phase(&self, message: &str) {
        log::info!("{}", message);
    }

    fn on_record(&self, table: &str, processed: u64) {
        if processed.is_multiple_of(100_000) {
            log::info!("  [{}] {} records", table, processed);
        }
    }

    fn on_complete(&self, message: &str) {
        log::info!("{}", message);
    }
}
