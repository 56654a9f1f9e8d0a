//! Load MovieLens CSV files into the catalog database.
//!
//! Movies are loaded first; ratings, tags, and links are then accepted only
//! for movies that were loaded, so every row in the database references an
//! existing movie. Rows that cannot be parsed are skipped and counted rather
//! than aborting the load. The whole import runs in a single transaction.

use std::collections::HashSet;
use std::fs::File;
use std::path::{Path, PathBuf};

use movielens_catalog::types::*;
use movielens_db::operations::{self, OperationError};
use rusqlite::Connection;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::progress::ImportProgress;

pub const MOVIES_FILE: &str = "movies.csv";
pub const LINKS_FILE: &str = "links.csv";
pub const RATINGS_FILE: &str = "ratings.csv";
pub const TAGS_FILE: &str = "tags.csv";

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Database error: {0}")]
    Db(#[from] OperationError),
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Required file not found: {}", .0.display())]
    MissingFile(PathBuf),
    #[error("Catalog already contains movies; import into an empty database")]
    NotEmpty,
}

/// Per-file outcome counts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TableStats {
    pub inserted: u64,
    /// Rows whose key was already loaded.
    pub duplicates: u64,
    /// Rows referencing a movie that is not in `movies.csv`.
    pub orphans: u64,
    /// Rows that failed to parse or validate.
    pub malformed: u64,
}

impl TableStats {
    pub fn processed(&self) -> u64 {
        self.inserted + self.skipped()
    }

    pub fn skipped(&self) -> u64 {
        self.duplicates + self.orphans + self.malformed
    }

    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Inserted => self.inserted += 1,
            Outcome::Duplicate => self.duplicates += 1,
            Outcome::Orphan => self.orphans += 1,
            Outcome::Malformed => self.malformed += 1,
        }
    }
}

/// Statistics from a full dataset import.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadStats {
    pub movies: TableStats,
    pub links: TableStats,
    pub ratings: TableStats,
    pub tags: TableStats,
}

impl LoadStats {
    pub fn total_inserted(&self) -> u64 {
        self.movies.inserted + self.links.inserted + self.ratings.inserted + self.tags.inserted
    }

    pub fn total_skipped(&self) -> u64 {
        self.movies.skipped() + self.links.skipped() + self.ratings.skipped() + self.tags.skipped()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Inserted,
    Duplicate,
    Orphan,
    Malformed,
}

impl Outcome {
    fn from_inserted(inserted: bool) -> Self {
        if inserted { Self::Inserted } else { Self::Duplicate }
    }
}

// ── CSV Records ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct MovieRecord {
    #[serde(rename = "movieId")]
    movie_id: i64,
    title: String,
    #[serde(default)]
    genres: String,
}

#[derive(Debug, Deserialize)]
struct RatingRecord {
    #[serde(rename = "userId")]
    user_id: i64,
    #[serde(rename = "movieId")]
    movie_id: i64,
    rating: f64,
    timestamp: i64,
}

#[derive(Debug, Deserialize)]
struct TagRecord {
    #[serde(rename = "userId")]
    user_id: i64,
    #[serde(rename = "movieId")]
    movie_id: i64,
    tag: String,
    timestamp: i64,
}

#[derive(Debug, Deserialize)]
struct LinkRecord {
    #[serde(rename = "movieId")]
    movie_id: i64,
    #[serde(rename = "imdbId")]
    imdb_id: Option<i64>,
    #[serde(rename = "tmdbId")]
    tmdb_id: Option<i64>,
}

// ── Loading ─────────────────────────────────────────────────────────────────

/// Import the dataset in `dir` into an empty catalog database.
///
/// `movies.csv` is required; `links.csv`, `ratings.csv`, and `tags.csv` are
/// loaded when present.
pub fn load_dataset(
    conn: &Connection,
    dir: &Path,
    progress: &dyn ImportProgress,
) -> Result<LoadStats, ImportError> {
    if !operations::is_empty(conn)? {
        return Err(ImportError::NotEmpty);
    }
    let movies_path = dir.join(MOVIES_FILE);
    if !movies_path.is_file() {
        return Err(ImportError::MissingFile(movies_path));
    }

    let mut stats = LoadStats::default();
    let mut known_movies: HashSet<i64> = HashSet::new();

    let tx = conn.unchecked_transaction()?;

    progress.on_phase(&format!("Loading {}", MOVIES_FILE));
    load_table(
        open_csv(&movies_path)?,
        "movies",
        &mut stats.movies,
        progress,
        |rec: MovieRecord| {
            let movie = Movie {
                movie_id: rec.movie_id,
                title: rec.title,
                genres: rec.genres,
            };
            let inserted = operations::insert_movie(&tx, &movie)?;
            if inserted {
                known_movies.insert(movie.movie_id);
            }
            Ok(Outcome::from_inserted(inserted))
        },
    )?;

    if let Some(reader) = open_optional(dir, LINKS_FILE, progress)? {
        load_table(reader, "links", &mut stats.links, progress, |rec: LinkRecord| {
            if !known_movies.contains(&rec.movie_id) {
                return Ok(Outcome::Orphan);
            }
            let link = Link {
                movie_id: rec.movie_id,
                imdb_id: rec.imdb_id,
                tmdb_id: rec.tmdb_id,
            };
            Ok(Outcome::from_inserted(operations::insert_link(&tx, &link)?))
        })?;
    }

    if let Some(reader) = open_optional(dir, RATINGS_FILE, progress)? {
        load_table(reader, "ratings", &mut stats.ratings, progress, |rec: RatingRecord| {
            if !known_movies.contains(&rec.movie_id) {
                return Ok(Outcome::Orphan);
            }
            let rating = Rating {
                user_id: rec.user_id,
                movie_id: rec.movie_id,
                rating: rec.rating,
                timestamp: rec.timestamp,
            };
            match operations::insert_rating(&tx, &rating) {
                Ok(inserted) => Ok(Outcome::from_inserted(inserted)),
                Err(e @ OperationError::InvalidRating { .. }) => {
                    log::warn!("Skipping rating: {e}");
                    Ok(Outcome::Malformed)
                }
                Err(e) => Err(e.into()),
            }
        })?;
    }

    if let Some(reader) = open_optional(dir, TAGS_FILE, progress)? {
        load_table(reader, "tags", &mut stats.tags, progress, |rec: TagRecord| {
            if !known_movies.contains(&rec.movie_id) {
                return Ok(Outcome::Orphan);
            }
            let tag = Tag {
                user_id: rec.user_id,
                movie_id: rec.movie_id,
                tag: rec.tag,
                timestamp: rec.timestamp,
            };
            Ok(Outcome::from_inserted(operations::insert_tag(&tx, &tag)?))
        })?;
    }

    tx.commit()?;

    for (table, table_stats) in [
        ("movies", &stats.movies),
        ("links", &stats.links),
        ("ratings", &stats.ratings),
        ("tags", &stats.tags),
    ] {
        if table_stats.orphans > 0 {
            log::warn!(
                "Skipped {} {} row(s) referencing unknown movies",
                table_stats.orphans,
                table
            );
        }
    }

    progress.on_complete(&format!(
        "Loaded {} records ({} skipped)",
        stats.total_inserted(),
        stats.total_skipped()
    ));

    Ok(stats)
}

/// Field values are kept byte-for-byte: tag text is part of a tag's identity.
fn open_csv(path: &Path) -> Result<csv::Reader<File>, ImportError> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_path(path)?;
    Ok(reader)
}

/// Open an optional dataset file, or log and return `None` if it is absent.
fn open_optional(
    dir: &Path,
    name: &str,
    progress: &dyn ImportProgress,
) -> Result<Option<csv::Reader<File>>, ImportError> {
    let path = dir.join(name);
    if !path.is_file() {
        log::warn!("{} not found in {}; skipping", name, dir.display());
        return Ok(None);
    }
    progress.on_phase(&format!("Loading {}", name));
    open_csv(&path).map(Some)
}

/// Deserialize each record of `reader` and hand it to `insert`.
///
/// Records that fail to parse are counted as malformed; I/O failures abort.
fn load_table<R, T, F>(
    mut reader: csv::Reader<R>,
    table: &str,
    stats: &mut TableStats,
    progress: &dyn ImportProgress,
    mut insert: F,
) -> Result<(), ImportError>
where
    R: std::io::Read,
    T: DeserializeOwned,
    F: FnMut(T) -> Result<Outcome, ImportError>,
{
    let headers = reader.headers()?.clone();
    let mut record = csv::StringRecord::new();

    loop {
        let outcome = match reader.read_record(&mut record) {
            Ok(false) => break,
            Ok(true) => match record.deserialize::<T>(Some(&headers)) {
                Ok(row) => insert(row)?,
                Err(e) => {
                    log::warn!("Skipping malformed {} row: {}", table, e);
                    Outcome::Malformed
                }
            },
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                log::warn!("Skipping unreadable {} row: {}", table, e);
                Outcome::Malformed
            }
        };
        stats.record(outcome);
        progress.on_record(table, stats.processed());
    }

    Ok(())
}
