use std::path::Path;

use movielens_db::RatingFilter;

use crate::CliError;
use crate::cli_types::PageArgs;
use crate::output::{OutputFormat, render_list, render_one};

use super::{page, stdout, with_catalog};

pub(crate) fn run_rating(
    db_path: &Path,
    format: OutputFormat,
    user_id: i64,
    movie_id: i64,
) -> Result<(), CliError> {
    let rating = with_catalog(db_path, |conn| {
        Ok(movielens_db::get_rating(conn, user_id, movie_id)?)
    })?
    .ok_or_else(|| {
        CliError::not_found(format!(
            "No rating found for user {} and movie {}",
            user_id, movie_id
        ))
    })?;

    render_one(&mut stdout(), format, &rating)
}

pub(crate) fn run_ratings(
    db_path: &Path,
    format: OutputFormat,
    page_args: PageArgs,
    filter: RatingFilter,
) -> Result<(), CliError> {
    let page = page(page_args)?;
    let ratings = with_catalog(db_path, |conn| {
        Ok(movielens_db::list_ratings(conn, page, &filter)?)
    })?;
    log::debug!("{} rating(s)", ratings.len());

    render_list(&mut stdout(), format, &ratings)
}
