//! Read queries for the catalog database.
//!
//! Point lookups return `Ok(None)` when nothing matches; absence is never an
//! error. Listings are paginated and always ordered by primary key so that
//! consecutive pages are disjoint and stable.

use movielens_catalog::types::*;
use rusqlite::types::ToSql;
use rusqlite::{params, Connection, OptionalExtension, Row};
use thiserror::Error;

use crate::filter::{Conditions, MovieFilter, Page, RatingFilter, TagFilter};

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

const MOVIE_COLUMNS: &str = "SELECT movie_id, title, genres FROM movies";
const RATING_COLUMNS: &str = "SELECT user_id, movie_id, rating, timestamp FROM ratings";
const TAG_COLUMNS: &str = "SELECT user_id, movie_id, tag, timestamp FROM tags";
const LINK_COLUMNS: &str = "SELECT movie_id, imdb_id, tmdb_id FROM links";

// ── Movies ──────────────────────────────────────────────────────────────────

/// Find a movie by its identifier.
pub fn get_movie(conn: &Connection, movie_id: i64) -> Result<Option<Movie>, QueryError> {
    let mut stmt = conn.prepare(&format!("{MOVIE_COLUMNS} WHERE movie_id = ?1"))?;
    stmt.query_row(params![movie_id], row_to_movie)
        .optional()
        .map_err(Into::into)
}

/// List movies, optionally filtered by title and genre.
pub fn list_movies(
    conn: &Connection,
    page: Page,
    filter: &MovieFilter,
) -> Result<Vec<Movie>, QueryError> {
    select_page(
        conn,
        MOVIE_COLUMNS,
        filter.conditions(),
        "movie_id",
        page,
        row_to_movie,
    )
}

/// A movie with its ratings, tags, and link.
pub fn movie_detail(conn: &Connection, movie_id: i64) -> Result<Option<MovieDetail>, QueryError> {
    let Some(movie) = get_movie(conn, movie_id)? else {
        return Ok(None);
    };
    Ok(Some(MovieDetail {
        ratings: ratings_for_movie(conn, movie_id)?,
        tags: tags_for_movie(conn, movie_id)?,
        link: get_link(conn, movie_id)?,
        movie,
    }))
}

// ── Ratings ─────────────────────────────────────────────────────────────────

/// Find the rating a user gave a movie.
pub fn get_rating(
    conn: &Connection,
    user_id: i64,
    movie_id: i64,
) -> Result<Option<Rating>, QueryError> {
    let mut stmt = conn.prepare(&format!(
        "{RATING_COLUMNS} WHERE user_id = ?1 AND movie_id = ?2"
    ))?;
    stmt.query_row(params![user_id, movie_id], row_to_rating)
        .optional()
        .map_err(Into::into)
}

/// List ratings, optionally filtered by movie, user, and minimum score.
pub fn list_ratings(
    conn: &Connection,
    page: Page,
    filter: &RatingFilter,
) -> Result<Vec<Rating>, QueryError> {
    select_page(
        conn,
        RATING_COLUMNS,
        filter.conditions(),
        "user_id, movie_id",
        page,
        row_to_rating,
    )
}

/// All ratings for a movie, ordered by user.
pub fn ratings_for_movie(conn: &Connection, movie_id: i64) -> Result<Vec<Rating>, QueryError> {
    let mut stmt = conn.prepare(&format!(
        "{RATING_COLUMNS} WHERE movie_id = ?1 ORDER BY user_id"
    ))?;
    let rows = stmt.query_map(params![movie_id], row_to_rating)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Tags ────────────────────────────────────────────────────────────────────

/// Find a tag by its full identity. The tag text must match exactly,
/// including case.
pub fn get_tag(
    conn: &Connection,
    user_id: i64,
    movie_id: i64,
    tag: &str,
) -> Result<Option<Tag>, QueryError> {
    let mut stmt = conn.prepare(&format!(
        "{TAG_COLUMNS} WHERE user_id = ?1 AND movie_id = ?2 AND tag = ?3"
    ))?;
    stmt.query_row(params![user_id, movie_id, tag], row_to_tag)
        .optional()
        .map_err(Into::into)
}

/// List tags, optionally filtered by movie and user.
pub fn list_tags(
    conn: &Connection,
    page: Page,
    filter: &TagFilter,
) -> Result<Vec<Tag>, QueryError> {
    select_page(
        conn,
        TAG_COLUMNS,
        filter.conditions(),
        "user_id, movie_id, tag",
        page,
        row_to_tag,
    )
}

/// All tags for a movie, ordered by user then tag text.
pub fn tags_for_movie(conn: &Connection, movie_id: i64) -> Result<Vec<Tag>, QueryError> {
    let mut stmt = conn.prepare(&format!(
        "{TAG_COLUMNS} WHERE movie_id = ?1 ORDER BY user_id, tag"
    ))?;
    let rows = stmt.query_map(params![movie_id], row_to_tag)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Links ───────────────────────────────────────────────────────────────────

/// Find the external ids for a movie.
pub fn get_link(conn: &Connection, movie_id: i64) -> Result<Option<Link>, QueryError> {
    let mut stmt = conn.prepare(&format!("{LINK_COLUMNS} WHERE movie_id = ?1"))?;
    stmt.query_row(params![movie_id], row_to_link)
        .optional()
        .map_err(Into::into)
}

/// List links. There are no filters, only pagination.
pub fn list_links(conn: &Connection, page: Page) -> Result<Vec<Link>, QueryError> {
    select_page(
        conn,
        LINK_COLUMNS,
        Conditions::default(),
        "movie_id",
        page,
        row_to_link,
    )
}

// ── Statistics ──────────────────────────────────────────────────────────────

pub fn count_movies(conn: &Connection) -> Result<i64, QueryError> {
    count(conn, "movies")
}

pub fn count_ratings(conn: &Connection) -> Result<i64, QueryError> {
    count(conn, "ratings")
}

pub fn count_tags(conn: &Connection) -> Result<i64, QueryError> {
    count(conn, "tags")
}

pub fn count_links(conn: &Connection) -> Result<i64, QueryError> {
    count(conn, "links")
}

/// Get the total number of records in each table.
pub fn catalog_stats(conn: &Connection) -> Result<CatalogStats, QueryError> {
    Ok(CatalogStats {
        movie_count: count_movies(conn)?,
        rating_count: count_ratings(conn)?,
        tag_count: count_tags(conn)?,
        link_count: count_links(conn)?,
    })
}

fn count(conn: &Connection, table: &'static str) -> Result<i64, QueryError> {
    let n: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))?;
    Ok(n)
}

// ── Paging ──────────────────────────────────────────────────────────────────

/// Run `select` with the given conditions, ordering, and window.
fn select_page<T>(
    conn: &Connection,
    select: &str,
    conditions: Conditions,
    order_by: &str,
    page: Page,
    map: fn(&Row<'_>) -> rusqlite::Result<T>,
) -> Result<Vec<T>, QueryError> {
    let sql = format!(
        "{select}{} ORDER BY {order_by} LIMIT ? OFFSET ?",
        conditions.where_clause()
    );
    let mut param_values = conditions.into_params();
    param_values.push(Box::new(page.limit()));
    param_values.push(Box::new(page.skip()));
    log::debug!("{sql} [skip={}, limit={}]", page.skip(), page.limit());

    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn ToSql> = param_values.iter().map(|v| v.as_ref()).collect();
    let rows = stmt.query_map(params.as_slice(), map)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Row Mapping Helpers ─────────────────────────────────────────────────────

fn row_to_movie(row: &Row<'_>) -> rusqlite::Result<Movie> {
    Ok(Movie {
        movie_id: row.get(0)?,
        title: row.get(1)?,
        genres: row.get(2)?,
    })
}

fn row_to_rating(row: &Row<'_>) -> rusqlite::Result<Rating> {
    Ok(Rating {
        user_id: row.get(0)?,
        movie_id: row.get(1)?,
        rating: row.get(2)?,
        timestamp: row.get(3)?,
    })
}

fn row_to_tag(row: &Row<'_>) -> rusqlite::Result<Tag> {
    Ok(Tag {
        user_id: row.get(0)?,
        movie_id: row.get(1)?,
        tag: row.get(2)?,
        timestamp: row.get(3)?,
    })
}

fn row_to_link(row: &Row<'_>) -> rusqlite::Result<Link> {
    Ok(Link {
        movie_id: row.get(0)?,
        imdb_id: row.get(1)?,
        tmdb_id: row.get(2)?,
    })
}
