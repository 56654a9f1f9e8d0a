//! Insert operations used by the bulk loader.
//!
//! The catalog is read-only once loaded; these are only called while a
//! dataset is being imported.

use movielens_catalog::types::*;
use rusqlite::{params, Connection};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Invalid rating for user {user_id}, movie {movie_id}: {source}")]
    InvalidRating {
        user_id: i64,
        movie_id: i64,
        source: ModelError,
    },
}

/// Insert a movie. Returns `false` if a movie with the same id already exists.
pub fn insert_movie(conn: &Connection, movie: &Movie) -> Result<bool, OperationError> {
    let changed = conn.execute(
        "INSERT INTO movies (movie_id, title, genres) VALUES (?1, ?2, ?3)
         ON CONFLICT(movie_id) DO NOTHING",
        params![movie.movie_id, movie.title, movie.genres],
    )?;
    Ok(changed > 0)
}

/// Insert a rating. Returns `false` if the user already rated this movie.
///
/// The movie must already exist.
pub fn insert_rating(conn: &Connection, rating: &Rating) -> Result<bool, OperationError> {
    validate_score(rating.rating).map_err(|source| OperationError::InvalidRating {
        user_id: rating.user_id,
        movie_id: rating.movie_id,
        source,
    })?;
    let changed = conn.execute(
        "INSERT INTO ratings (user_id, movie_id, rating, timestamp) VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(user_id, movie_id) DO NOTHING",
        params![rating.user_id, rating.movie_id, rating.rating, rating.timestamp],
    )?;
    Ok(changed > 0)
}

/// Insert a tag. Returns `false` if the exact `(user, movie, tag)` exists.
pub fn insert_tag(conn: &Connection, tag: &Tag) -> Result<bool, OperationError> {
    let changed = conn.execute(
        "INSERT INTO tags (user_id, movie_id, tag, timestamp) VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(user_id, movie_id, tag) DO NOTHING",
        params![tag.user_id, tag.movie_id, tag.tag, tag.timestamp],
    )?;
    Ok(changed > 0)
}

/// Insert a link. Returns `false` if the movie already has one.
pub fn insert_link(conn: &Connection, link: &Link) -> Result<bool, OperationError> {
    let changed = conn.execute(
        "INSERT INTO links (movie_id, imdb_id, tmdb_id) VALUES (?1, ?2, ?3)
         ON CONFLICT(movie_id) DO NOTHING",
        params![link.movie_id, link.imdb_id, link.tmdb_id],
    )?;
    Ok(changed > 0)
}

/// Whether any movie has been loaded yet.
pub fn is_empty(conn: &Connection) -> Result<bool, OperationError> {
    let any: bool = conn.query_row("SELECT EXISTS(SELECT 1 FROM movies)", [], |row| row.get(0))?;
    Ok(!any)
}
