//! Movie catalog data model types.
//!
//! This crate defines the MovieLens data model (movies, ratings, tags, links)
//! without any database dependencies. Consumers can use these types directly
//! for serialization, display, or passing to `movielens-db` for persistence.

pub mod types;

pub use types::*;
