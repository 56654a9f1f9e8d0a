use std::path::Path;

use movielens_db::MovieFilter;

use crate::CliError;
use crate::cli_types::PageArgs;
use crate::output::{OutputFormat, render_detail, render_list};

use super::{page, stdout, with_catalog};

/// Show one movie with its ratings, tags, and link.
pub(crate) fn run_movie(
    db_path: &Path,
    format: OutputFormat,
    movie_id: i64,
) -> Result<(), CliError> {
    let detail = with_catalog(db_path, |conn| Ok(movielens_db::movie_detail(conn, movie_id)?))?
        .ok_or_else(|| CliError::not_found(format!("Movie not found: {}", movie_id)))?;

    render_detail(&mut stdout(), format, &detail)
}

pub(crate) fn run_movies(
    db_path: &Path,
    format: OutputFormat,
    page_args: PageArgs,
    title: Option<String>,
    genre: Option<String>,
) -> Result<(), CliError> {
    let page = page(page_args)?;
    let filter = MovieFilter { title, genre };

    let movies = with_catalog(db_path, |conn| {
        Ok(movielens_db::list_movies(conn, page, &filter)?)
    })?;
    log::debug!(
        "{} movie(s) at skip {} limit {}",
        movies.len(),
        page.skip(),
        page.limit()
    );

    render_list(&mut stdout(), format, &movies)
}
