//! Data model types for the movie catalog.
//!
//! These types mirror the four tables of the MovieLens dataset: movies,
//! ratings, tags, and links. Relationships are plain `movie_id` fields;
//! joined views are assembled by the query layer.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lowest score a rating may carry.
pub const MIN_SCORE: f64 = 0.0;
/// Highest score a rating may carry.
pub const MAX_SCORE: f64 = 5.0;

/// Separator between genres in [`Movie::genres`].
pub const GENRE_SEPARATOR: char = '|';

/// Placeholder the dataset uses for movies without genres.
const NO_GENRES: &str = "(no genres listed)";

#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("score {0} is outside the 0.0 to 5.0 rating scale")]
    ScoreOutOfRange(f64),
}

/// Check that a score lies within the rating scale.
pub fn validate_score(score: f64) -> Result<f64, ModelError> {
    if score.is_nan() || !(MIN_SCORE..=MAX_SCORE).contains(&score) {
        return Err(ModelError::ScoreOutOfRange(score));
    }
    Ok(score)
}

// ── Movie ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub movie_id: i64,
    pub title: String,
    /// `|`-delimited genre list, e.g. `Adventure|Animation|Comedy`.
    pub genres: String,
}

impl Movie {
    /// Split the genres field into individual genre names.
    ///
    /// The dataset placeholder `(no genres listed)` yields an empty list.
    pub fn genre_list(&self) -> Vec<&str> {
        if self.genres.trim() == NO_GENRES {
            return Vec::new();
        }
        self.genres
            .split(GENRE_SEPARATOR)
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .collect()
    }

    /// Release year parsed from a trailing `(YYYY)` in the title, if present.
    pub fn year(&self) -> Option<i32> {
        let title = self.title.trim_end();
        let inner = title.strip_suffix(')')?;
        let open = inner.rfind('(')?;
        let digits = &inner[open + 1..];
        if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Movie #{}: {}", self.movie_id, self.title)?;
        let genres = self.genre_list();
        if !genres.is_empty() {
            write!(f, " [{}]", genres.join(", "))?;
        }
        Ok(())
    }
}

// ── Rating ──────────────────────────────────────────────────────────────────

/// A user's score for a movie. Identity is `(user_id, movie_id)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub user_id: i64,
    pub movie_id: i64,
    pub rating: f64,
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
}

impl Rating {
    pub fn rated_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp, 0)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rating: user {} gave movie {} {:.1}/{:.1}",
            self.user_id, self.movie_id, self.rating, MAX_SCORE
        )?;
        if let Some(at) = self.rated_at() {
            write!(f, " on {}", format_datetime(&at))?;
        }
        Ok(())
    }
}

// ── Tag ─────────────────────────────────────────────────────────────────────

/// A free-text label a user attached to a movie.
///
/// Identity is `(user_id, movie_id, tag)`: the same user may tag the same
/// movie many times with different text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub user_id: i64,
    pub movie_id: i64,
    pub tag: String,
    pub timestamp: i64,
}

impl Tag {
    pub fn tagged_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp, 0)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tag: user {} tagged movie {} '{}'",
            self.user_id, self.movie_id, self.tag
        )?;
        if let Some(at) = self.tagged_at() {
            write!(f, " on {}", format_datetime(&at))?;
        }
        Ok(())
    }
}

// ── Link ────────────────────────────────────────────────────────────────────

/// External catalog identifiers for a movie (one per movie).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub movie_id: i64,
    pub imdb_id: Option<i64>,
    pub tmdb_id: Option<i64>,
}

impl Link {
    /// IMDb title URL (`tt` ids are zero-padded to seven digits).
    pub fn imdb_url(&self) -> Option<String> {
        self.imdb_id
            .map(|id| format!("https://www.imdb.com/title/tt{:07}/", id))
    }

    pub fn tmdb_url(&self) -> Option<String> {
        self.tmdb_id
            .map(|id| format!("https://www.themoviedb.org/movie/{}", id))
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Link: movie {} imdb={} tmdb={}",
            self.movie_id,
            opt_id(self.imdb_id),
            opt_id(self.tmdb_id),
        )
    }
}

// ── Joined Views ────────────────────────────────────────────────────────────

/// A movie together with everything that references it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    #[serde(flatten)]
    pub movie: Movie,
    pub ratings: Vec<Rating>,
    pub tags: Vec<Tag>,
    pub link: Option<Link>,
}

impl MovieDetail {
    /// Mean score over this movie's ratings, if it has any.
    pub fn average_rating(&self) -> Option<f64> {
        if self.ratings.is_empty() {
            return None;
        }
        let sum: f64 = self.ratings.iter().map(|r| r.rating).sum();
        Some(sum / self.ratings.len() as f64)
    }
}

/// Total record counts per table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub movie_count: i64,
    pub rating_count: i64,
    pub tag_count: i64,
    pub link_count: i64,
}

impl fmt::Display for CatalogStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Movies:   {:>10}", self.movie_count)?;
        writeln!(f, "Ratings:  {:>10}", self.rating_count)?;
        writeln!(f, "Tags:     {:>10}", self.tag_count)?;
        write!(f, "Links:    {:>10}", self.link_count)
    }
}

// ── Helpers ─────────────────────────────────────────────────────────────────

/// Render a timestamp the way the CLI shows it (`YYYY-MM-DD HH:MM:SS UTC`).
pub fn format_datetime(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn opt_id(id: Option<i64>) -> String {
    id.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}
