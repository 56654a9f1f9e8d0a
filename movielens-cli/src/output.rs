//! Rendering query results in the selected output format.
//!
//! - `object`: one human-readable line (or block) per record
//! - `json`: a key-value object per record; listings become arrays
//! - `table`: aligned columns with a header row

use std::fmt::Display;
use std::io::Write;

use clap::ValueEnum;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use serde::Serialize;

use movielens_catalog::types::*;

use crate::CliError;

/// Cells longer than this are truncated in table output.
const MAX_CELL_WIDTH: usize = 48;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable records
    Object,
    /// JSON objects
    Json,
    /// Aligned columns
    Table,
}

/// A record that can be laid out as one table row.
pub(crate) trait Tabular {
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

impl Tabular for Movie {
    const HEADERS: &'static [&'static str] = &["movie_id", "title", "genres"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.movie_id.to_string(),
            self.title.clone(),
            self.genres.clone(),
        ]
    }
}

impl Tabular for Rating {
    const HEADERS: &'static [&'static str] = &["user_id", "movie_id", "rating", "rated_at"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.user_id.to_string(),
            self.movie_id.to_string(),
            format!("{:.1}", self.rating),
            timestamp_cell(self.rated_at(), self.timestamp),
        ]
    }
}

impl Tabular for Tag {
    const HEADERS: &'static [&'static str] = &["user_id", "movie_id", "tag", "tagged_at"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.user_id.to_string(),
            self.movie_id.to_string(),
            self.tag.clone(),
            timestamp_cell(self.tagged_at(), self.timestamp),
        ]
    }
}

impl Tabular for Link {
    const HEADERS: &'static [&'static str] = &["movie_id", "imdb_id", "tmdb_id"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.movie_id.to_string(),
            opt_cell(self.imdb_id),
            opt_cell(self.tmdb_id),
        ]
    }
}

impl Tabular for CatalogStats {
    const HEADERS: &'static [&'static str] = &["movies", "ratings", "tags", "links"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.movie_count.to_string(),
            self.rating_count.to_string(),
            self.tag_count.to_string(),
            self.link_count.to_string(),
        ]
    }
}

/// Render a single record.
pub(crate) fn render_one<T, W>(out: &mut W, format: OutputFormat, item: &T) -> Result<(), CliError>
where
    T: Serialize + Display + Tabular,
    W: Write,
{
    match format {
        OutputFormat::Object => writeln!(out, "{}", item)?,
        OutputFormat::Json => write_json(out, item)?,
        OutputFormat::Table => write_table(out, std::slice::from_ref(item))?,
    }
    Ok(())
}

/// Render a listing. An empty listing prints nothing in `object` and `table`
/// formats and `[]` in `json`.
pub(crate) fn render_list<T, W>(
    out: &mut W,
    format: OutputFormat,
    items: &[T],
) -> Result<(), CliError>
where
    T: Serialize + Display + Tabular,
    W: Write,
{
    match format {
        OutputFormat::Object => {
            for item in items {
                writeln!(out, "{}", item)?;
            }
        }
        OutputFormat::Json => write_json(out, items)?,
        OutputFormat::Table => {
            if !items.is_empty() {
                write_table(out, items)?;
            }
        }
    }
    Ok(())
}

/// Render a movie together with its ratings, tags, and link.
pub(crate) fn render_detail<W: Write>(
    out: &mut W,
    format: OutputFormat,
    detail: &MovieDetail,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => write_json(out, detail)?,
        OutputFormat::Object => {
            writeln!(
                out,
                "{}",
                detail.movie.title.if_supports_color(Stdout, |t| t.bold())
            )?;
            writeln!(out, "  ID:       {}", detail.movie.movie_id)?;
            if let Some(year) = detail.movie.year() {
                writeln!(out, "  Year:     {}", year)?;
            }
            writeln!(out, "  Genres:   {}", detail.movie.genre_list().join(", "))?;
            match detail.average_rating() {
                Some(avg) => writeln!(
                    out,
                    "  Rating:   {:.2} ({} ratings)",
                    avg,
                    detail.ratings.len()
                )?,
                None => writeln!(out, "  Rating:   no ratings")?,
            }
            if let Some(link) = &detail.link {
                if let Some(url) = link.imdb_url() {
                    writeln!(out, "  IMDb:     {}", url)?;
                }
                if let Some(url) = link.tmdb_url() {
                    writeln!(out, "  TMDb:     {}", url)?;
                }
            }
            if !detail.tags.is_empty() {
                let tags: Vec<&str> = detail.tags.iter().map(|t| t.tag.as_str()).collect();
                writeln!(out, "  Tags:     {}", tags.join(", "))?;
            }
        }
        OutputFormat::Table => {
            write_table(out, std::slice::from_ref(&detail.movie))?;
            if let Some(link) = &detail.link {
                writeln!(out)?;
                write_table(out, std::slice::from_ref(link))?;
            }
            if !detail.ratings.is_empty() {
                writeln!(out)?;
                write_table(out, &detail.ratings)?;
            }
            if !detail.tags.is_empty() {
                writeln!(out)?;
                write_table(out, &detail.tags)?;
            }
        }
    }
    Ok(())
}

fn write_json<T: Serialize + ?Sized, W: Write>(out: &mut W, value: &T) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn write_table<T: Tabular, W: Write>(out: &mut W, rows: &[T]) -> std::io::Result<()> {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            r.cells()
                .into_iter()
                .map(|c| truncate_str(&c, MAX_CELL_WIDTH))
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = T::HEADERS.iter().map(|h| h.chars().count()).collect();
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let header = T::HEADERS
        .iter()
        .zip(&widths)
        .map(|(h, w)| pad(h, *w))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(
        out,
        "{}",
        header.trim_end().if_supports_color(Stdout, |t| t.bold())
    )?;

    for row in &cells {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(c, w)| pad(c, *w))
            .collect::<Vec<_>>()
            .join("  ");
        writeln!(out, "{}", line.trim_end())?;
    }
    Ok(())
}

fn pad(s: &str, width: usize) -> String {
    let len = s.chars().count();
    let mut padded = s.to_string();
    padded.extend(std::iter::repeat_n(' ', width.saturating_sub(len)));
    padded
}

/// Truncate a string to a maximum width in characters, appending "..." if needed.
pub(crate) fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let kept: String = s.chars().take(max - 3).collect();
        format!("{}...", kept)
    } else {
        s.chars().take(max).collect()
    }
}

fn timestamp_cell(at: Option<chrono::DateTime<chrono::Utc>>, raw: i64) -> String {
    at.map(|t| format_datetime(&t))
        .unwrap_or_else(|| raw.to_string())
}

fn opt_cell(id: Option<i64>) -> String {
    id.map(|v| v.to_string()).unwrap_or_default()
}
