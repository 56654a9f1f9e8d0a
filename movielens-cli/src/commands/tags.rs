use std::path::Path;

use movielens_db::TagFilter;

use crate::CliError;
use crate::cli_types::PageArgs;
use crate::output::{OutputFormat, render_list, render_one};

use super::{page, stdout, with_catalog};

pub(crate) fn run_tag(
    db_path: &Path,
    format: OutputFormat,
    user_id: i64,
    movie_id: i64,
    tag: &str,
) -> Result<(), CliError> {
    let found = with_catalog(db_path, |conn| {
        Ok(movielens_db::get_tag(conn, user_id, movie_id, tag)?)
    })?
    .ok_or_else(|| {
        CliError::not_found(format!(
            "Tag not found for user {}, movie {} and tag '{}'",
            user_id, movie_id, tag
        ))
    })?;

    render_one(&mut stdout(), format, &found)
}

pub(crate) fn run_tags(
    db_path: &Path,
    format: OutputFormat,
    page_args: PageArgs,
    filter: TagFilter,
) -> Result<(), CliError> {
    let page = page(page_args)?;
    let tags = with_catalog(db_path, |conn| {
        Ok(movielens_db::list_tags(conn, page, &filter)?)
    })?;
    log::debug!("{} tag(s)", tags.len());

    render_list(&mut stdout(), format, &tags)
}
