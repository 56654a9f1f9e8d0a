pub(crate) mod analytics;
pub(crate) mod config;
pub(crate) mod import;
pub(crate) mod links;
pub(crate) mod movies;
pub(crate) mod ratings;
pub(crate) mod tags;

use std::io::{self, StdoutLock};
use std::path::Path;

use rusqlite::Connection;

use movielens_db::{Page, SchemaError};

use crate::CliError;
use crate::cli_types::PageArgs;

/// Run `f` against a read-only connection that is closed when it returns.
pub(crate) fn with_catalog<T>(
    db_path: &Path,
    f: impl FnOnce(&Connection) -> Result<T, CliError>,
) -> Result<T, CliError> {
    let conn = match movielens_db::open_read_only(db_path) {
        Ok(conn) => conn,
        Err(e @ (SchemaError::Missing(_) | SchemaError::Uninitialized(_))) => {
            log::info!("Run 'movielens import <DIR>' to create one.");
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };
    log::debug!("Opened catalog {}", db_path.display());
    f(&conn)
}

/// Validate the pagination arguments before touching the store.
pub(crate) fn page(args: PageArgs) -> Result<Page, CliError> {
    Ok(Page::new(args.skip, args.limit)?)
}

pub(crate) fn stdout() -> StdoutLock<'static> {
    io::stdout().lock()
}
