use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use movielens_import::{ImportProgress, LoadStats, TableStats};

use crate::CliError;

/// Load a MovieLens dataset directory into a fresh catalog database.
pub(crate) fn run_import(
    db_path: &Path,
    dir: &Path,
    force: bool,
    quiet: bool,
) -> Result<(), CliError> {
    if !dir.is_dir() {
        return Err(CliError::import(format!(
            "Dataset directory not found: {}",
            dir.display()
        )));
    }

    if db_path.exists() {
        if !force {
            return Err(CliError::import(format!(
                "Catalog database already exists at {} (use --force to replace it)",
                db_path.display()
            )));
        }
        remove_database(db_path)?;
        log::info!("Removed existing catalog at {}", db_path.display());
    }

    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let conn = movielens_db::open_database(db_path)?;

    log::info!(
        "{} {} into {}",
        "Importing".if_supports_color(Stdout, |t| t.bold()),
        dir.display(),
        db_path.display(),
    );

    let start = Instant::now();
    let progress = SpinnerProgress::new(quiet);
    let result = movielens_import::load_dataset(&conn, dir, &progress);
    progress.finish();

    let stats = match result {
        Ok(stats) => stats,
        Err(e) => {
            // Rolled back; remove the empty database file.
            drop(conn);
            if let Err(cleanup) = remove_database(db_path) {
                log::warn!("Could not remove {}: {}", db_path.display(), cleanup);
            }
            return Err(CliError::import(e.to_string()));
        }
    };

    print_summary(&stats, start.elapsed());
    Ok(())
}

/// Delete the database file and its WAL sidecars.
fn remove_database(db_path: &Path) -> Result<(), CliError> {
    for path in [
        db_path.to_path_buf(),
        sidecar(db_path, "-wal"),
        sidecar(db_path, "-shm"),
    ] {
        if path.exists() {
            fs::remove_file(&path)?;
        }
    }
    Ok(())
}

fn sidecar(db_path: &Path, suffix: &str) -> PathBuf {
    let mut name = db_path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

fn print_summary(stats: &LoadStats, elapsed: Duration) {
    log::info!("");
    log::info!(
        "{}",
        "Import complete".if_supports_color(Stdout, |t| t.green()),
    );
    print_table_line("Movies", &stats.movies);
    print_table_line("Links", &stats.links);
    print_table_line("Ratings", &stats.ratings);
    print_table_line("Tags", &stats.tags);
    log::info!(
        "  {} inserted, {} skipped in {:.1}s",
        stats.total_inserted(),
        stats.total_skipped(),
        elapsed.as_secs_f64(),
    );
}

fn print_table_line(label: &str, stats: &TableStats) {
    let line = format!("  {:<8} {:>10} inserted", label, stats.inserted);
    if stats.skipped() == 0 {
        log::info!("{}", line);
        return;
    }
    log::info!(
        "{} {}",
        line,
        format!(
            "({} duplicate, {} orphan, {} malformed)",
            stats.duplicates, stats.orphans, stats.malformed
        )
        .if_supports_color(Stdout, |t| t.dimmed()),
    );
}

/// Spinner on stderr showing the current file and record count.
struct SpinnerProgress {
    bar: ProgressBar,
}

impl SpinnerProgress {
    fn new(quiet: bool) -> Self {
        let bar = ProgressBar::new_spinner();
        if quiet {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        }
        bar.set_style(
            ProgressStyle::with_template("  {spinner:.cyan} {msg}")
                .expect("static pattern")
                .tick_chars("/-\\|"),
        );
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ImportProgress for SpinnerProgress {
    fn on_phase(&self, message: &str) {
        log::debug!("{}", message);
        self.bar.set_message(message.to_string());
    }

    fn on_record(&self, table: &str, processed: u64) {
        if processed.is_multiple_of(1_000) {
            self.bar
                .set_message(format!("Loading {}: {} records", table, processed));
        }
    }

    fn on_complete(&self, message: &str) {
        log::debug!("{}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_dataset(dir: &Path) {
        fs::write(
            dir.join("movies.csv"),
            "movieId,title,genres\n1,Toy Story (1995),Adventure|Animation\n2,Heat (1995),Action\n",
        )
        .unwrap();
        fs::write(
            dir.join("ratings.csv"),
            "userId,movieId,rating,timestamp\n1,1,4.0,964982703\n1,99,3.0,964982703\n",
        )
        .unwrap();
    }

    #[test]
    fn sidecar_appends_suffix() {
        assert_eq!(
            sidecar(Path::new("/data/movies.db"), "-wal"),
            PathBuf::from("/data/movies.db-wal")
        );
    }

    #[test]
    fn import_creates_queryable_catalog() {
        let data = tempfile::tempdir().unwrap();
        write_dataset(data.path());
        let out = tempfile::tempdir().unwrap();
        let db_path = out.path().join("nested").join("movies.db");

        run_import(&db_path, data.path(), false, true).unwrap();

        let stats = crate::commands::with_catalog(&db_path, |conn| {
            Ok(movielens_db::catalog_stats(conn)?)
        })
        .unwrap();
        assert_eq!(stats.movie_count, 2);
        assert_eq!(stats.rating_count, 1);
    }

    #[test]
    fn existing_catalog_requires_force() {
        let data = tempfile::tempdir().unwrap();
        write_dataset(data.path());
        let out = tempfile::tempdir().unwrap();
        let db_path = out.path().join("movies.db");

        run_import(&db_path, data.path(), false, true).unwrap();
        let err = run_import(&db_path, data.path(), false, true).unwrap_err();
        assert!(matches!(err, CliError::Import(_)));

        run_import(&db_path, data.path(), true, true).unwrap();
        assert!(db_path.exists());
    }

    #[test]
    fn failed_import_leaves_no_database() {
        let data = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let db_path = out.path().join("movies.db");

        let err = run_import(&db_path, data.path(), false, true).unwrap_err();
        assert!(matches!(err, CliError::Import(_)));
        assert!(!db_path.exists());
    }
}
