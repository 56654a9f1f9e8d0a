//! SQLite persistence layer for the movie catalog.
//!
//! Provides schema creation, the paginated/filtered read queries that make
//! up the catalog query service, and the insert operations used by the bulk
//! loader. Every function takes the connection explicitly; there is no
//! global handle.

pub mod filter;
pub mod operations;
pub mod queries;
pub mod schema;

pub use filter::{
    DEFAULT_LIMIT, MAX_LIMIT, MovieFilter, Page, PageError, RatingFilter, TagFilter,
};
pub use operations::{
    OperationError, insert_link, insert_movie, insert_rating, insert_tag, is_empty,
};
pub use queries::{
    QueryError, catalog_stats, count_links, count_movies, count_ratings, count_tags, get_link,
    get_movie, get_rating, get_tag, list_links, list_movies, list_ratings, list_tags,
    movie_detail, ratings_for_movie, tags_for_movie,
};
pub use schema::{SchemaError, open_database, open_memory, open_read_only};
