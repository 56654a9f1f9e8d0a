//! Pagination windows and listing filters.
//!
//! Every filter field is an `Option`: `None` means "no constraint", and any
//! `Some` value is applied as given (a `min_rating` of `0.0` still filters).

use rusqlite::types::ToSql;
use thiserror::Error;

/// Results returned when the caller does not ask for a specific limit.
pub const DEFAULT_LIMIT: u32 = 100;
/// Largest page a listing may return.
pub const MAX_LIMIT: u32 = 1000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("limit must be at least 1")]
    ZeroLimit,
    #[error("limit {0} exceeds the maximum of {MAX}", MAX = MAX_LIMIT)]
    LimitTooLarge(u32),
}

/// A `(skip, limit)` window over a listing.
///
/// Limits above [`MAX_LIMIT`] are rejected rather than clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    skip: u32,
    limit: u32,
}

impl Page {
    pub fn new(skip: u32, limit: u32) -> Result<Self, PageError> {
        if limit == 0 {
            return Err(PageError::ZeroLimit);
        }
        if limit > MAX_LIMIT {
            return Err(PageError::LimitTooLarge(limit));
        }
        Ok(Self { skip, limit })
    }

    /// The first `limit` records.
    pub fn first(limit: u32) -> Result<Self, PageError> {
        Self::new(0, limit)
    }

    /// The window immediately after this one, with the same limit.
    pub fn next(&self) -> Self {
        Self {
            skip: self.skip.saturating_add(self.limit),
            limit: self.limit,
        }
    }

    pub fn skip(&self) -> u32 {
        self.skip
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Filters for [`list_movies`](crate::queries::list_movies).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieFilter {
    /// Case-sensitive substring of the title.
    pub title: Option<String>,
    /// Case-insensitive substring of the genres field.
    pub genre: Option<String>,
}

/// Filters for [`list_ratings`](crate::queries::list_ratings).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatingFilter {
    pub movie_id: Option<i64>,
    pub user_id: Option<i64>,
    /// Inclusive lower bound on the score. Callers check it with
    /// `validate_score`; a NaN bound matches no rating.
    pub min_rating: Option<f64>,
}

/// Filters for [`list_tags`](crate::queries::list_tags).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFilter {
    pub movie_id: Option<i64>,
    pub user_id: Option<i64>,
}

/// Accumulates `WHERE` clauses and their positional parameters.
///
/// Clauses use anonymous `?` placeholders; parameters are bound in the order
/// the clauses were pushed.
#[derive(Default)]
pub(crate) struct Conditions {
    clauses: Vec<&'static str>,
    params: Vec<Box<dyn ToSql>>,
}

impl Conditions {
    pub(crate) fn push<T: ToSql + 'static>(&mut self, clause: &'static str, value: T) {
        self.clauses.push(clause);
        self.params.push(Box::new(value));
    }

    pub(crate) fn push_opt<T: ToSql + 'static>(&mut self, clause: &'static str, value: Option<T>) {
        if let Some(v) = value {
            self.push(clause, v);
        }
    }

    pub(crate) fn where_clause(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.clauses.join(" AND "))
        }
    }

    pub(crate) fn into_params(self) -> Vec<Box<dyn ToSql>> {
        self.params
    }
}

impl MovieFilter {
    pub(crate) fn conditions(&self) -> Conditions {
        let mut c = Conditions::default();
        // LIKE ignores ASCII case; instr() does not.
        c.push_opt("instr(title, ?) > 0", self.title.clone());
        c.push_opt(
            "genres LIKE ? ESCAPE '\\'",
            self.genre.as_deref().map(contains_pattern),
        );
        c
    }
}

impl RatingFilter {
    pub(crate) fn conditions(&self) -> Conditions {
        let mut c = Conditions::default();
        c.push_opt("movie_id = ?", self.movie_id);
        c.push_opt("user_id = ?", self.user_id);
        c.push_opt("rating >= ?", self.min_rating);
        c
    }
}

impl TagFilter {
    pub(crate) fn conditions(&self) -> Conditions {
        let mut c = Conditions::default();
        c.push_opt("movie_id = ?", self.movie_id);
        c.push_opt("user_id = ?", self.user_id);
        c
    }
}

/// Build a `LIKE` pattern matching `needle` anywhere, with `%`, `_` and `\`
/// in the needle taken literally.
pub(crate) fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
