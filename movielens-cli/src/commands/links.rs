use std::path::Path;

use crate::CliError;
use crate::cli_types::PageArgs;
use crate::output::{OutputFormat, render_list, render_one};

use super::{page, stdout, with_catalog};

pub(crate) fn run_link(
    db_path: &Path,
    format: OutputFormat,
    movie_id: i64,
) -> Result<(), CliError> {
    let link = with_catalog(db_path, |conn| Ok(movielens_db::get_link(conn, movie_id)?))?
        .ok_or_else(|| CliError::not_found(format!("No link found for movie {}", movie_id)))?;

    render_one(&mut stdout(), format, &link)
}

pub(crate) fn run_links(
    db_path: &Path,
    format: OutputFormat,
    page_args: PageArgs,
) -> Result<(), CliError> {
    let page = page(page_args)?;
    let links = with_catalog(db_path, |conn| Ok(movielens_db::list_links(conn, page)?))?;

    render_list(&mut stdout(), format, &links)
}
