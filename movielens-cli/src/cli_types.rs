//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use movielens_db::DEFAULT_LIMIT;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "movielens")]
#[command(
    about = "Query a MovieLens catalog of movies, ratings, tags, and links",
    long_about = None
)]
pub(crate) struct Cli {
    /// Catalog database (defaults to MOVIELENS_DB, then settings.toml, then the data directory)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Output format for query results
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Object)]
    pub format: OutputFormat,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Pagination window shared by every listing command.
#[derive(Args, Clone, Copy)]
pub(crate) struct PageArgs {
    /// Number of results to skip
    #[arg(long, default_value_t = 0)]
    pub skip: u32,

    /// Maximum number of results to return (1-1000)
    #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
    pub limit: u32,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Load a MovieLens dataset directory (movies.csv, links.csv, ratings.csv, tags.csv)
    Import {
        /// Directory containing the CSV files
        dir: PathBuf,

        /// Replace an existing catalog database
        #[arg(long)]
        force: bool,
    },

    /// Check that the catalog database is readable
    Health,

    /// Show record counts for every table
    Analytics,

    /// Show a movie with its ratings, tags, and links
    Movie {
        /// Movie ID
        movie_id: i64,
    },

    /// List movies
    Movies {
        #[command(flatten)]
        page: PageArgs,

        /// Filter by title (case-sensitive substring)
        #[arg(long)]
        title: Option<String>,

        /// Filter by genre (case-insensitive substring, e.g. comedy)
        #[arg(long)]
        genre: Option<String>,
    },

    /// Show the rating a user gave a movie
    Rating {
        /// User ID
        user_id: i64,

        /// Movie ID
        movie_id: i64,
    },

    /// List ratings
    Ratings {
        #[command(flatten)]
        page: PageArgs,

        /// Filter by movie ID
        #[arg(long = "movie")]
        movie_id: Option<i64>,

        /// Filter by user ID
        #[arg(long = "user")]
        user_id: Option<i64>,

        /// Only ratings greater than or equal to this score (0.0-5.0)
        #[arg(long, value_parser = parse_score)]
        min_rating: Option<f64>,
    },

    /// Show a specific tag
    Tag {
        /// User ID
        user_id: i64,

        /// Movie ID
        movie_id: i64,

        /// Exact tag text
        tag: String,
    },

    /// List tags
    Tags {
        #[command(flatten)]
        page: PageArgs,

        /// Filter by movie ID
        #[arg(long = "movie")]
        movie_id: Option<i64>,

        /// Filter by user ID
        #[arg(long = "user")]
        user_id: Option<i64>,
    },

    /// Show the IMDb and TMDb IDs for a movie
    Link {
        /// Movie ID
        movie_id: i64,
    },

    /// List IMDb and TMDb IDs for all movies
    Links {
        #[command(flatten)]
        page: PageArgs,
    },

    /// Manage the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show current settings and the resolved database path
    Show,

    /// Print the settings file path
    Path,

    /// Save a default catalog database path
    SetDb {
        /// Path to the catalog database
        path: PathBuf,
    },

    /// Remove the saved database path
    ClearDb,
}

fn parse_score(s: &str) -> Result<f64, String> {
    let score: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;
    movielens_catalog::validate_score(score).map_err(|e| e.to_string())
}
