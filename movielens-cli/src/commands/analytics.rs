use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use movielens_catalog::CatalogStats;

use crate::CliError;
use crate::output::{OutputFormat, render_one};

use super::{stdout, with_catalog};

/// Record counts for every table.
pub(crate) fn run_analytics(db_path: &Path, format: OutputFormat) -> Result<(), CliError> {
    let stats = with_catalog(db_path, |conn| Ok(movielens_db::catalog_stats(conn)?))?;

    if format == OutputFormat::Object {
        log::info!(
            "{}",
            "Catalog Statistics".if_supports_color(Stdout, |t| t.bold()),
        );
        log::info!("  Database: {}", db_path.display());
    }
    render_one(&mut stdout(), format, &stats)
}

/// Open the catalog and report the record count of every table.
pub(crate) fn run_health(db_path: &Path) -> Result<CatalogStats, CliError> {
    let stats = with_catalog(db_path, |conn| Ok(movielens_db::catalog_stats(conn)?))?;

    log::info!(
        "{} {} ({} movies, {} ratings, {} tags, {} links)",
        "ok".if_supports_color(Stdout, |t| t.green()),
        db_path.display(),
        stats.movie_count,
        stats.rating_count,
        stats.tag_count,
        stats.link_count,
    );
    if stats.movie_count == 0 {
        log::warn!("Catalog at {} contains no movies", db_path.display());
    }
    Ok(stats)
}
