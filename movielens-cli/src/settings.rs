//! Settings file and catalog database path resolution.
//!
//! Settings live in `~/.config/movielens/settings.toml`:
//!
//! ```toml
//! [database]
//! path = "/srv/movielens/movies.db"
//! ```

use std::io;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the saved database path.
pub(crate) const DB_ENV_VAR: &str = "MOVIELENS_DB";

/// Canonical path to the settings file: `~/.config/movielens/settings.toml`.
pub(crate) fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("movielens").join("settings.toml")
}

/// Default catalog location when nothing else is configured.
pub(crate) fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("movielens"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("movies.db")
}

/// Resolve the catalog database path using a priority chain:
///
/// 1. CLI override (if `Some`)
/// 2. `MOVIELENS_DB` environment variable
/// 3. Saved `database.path` in `settings.toml`
/// 4. `<data dir>/movielens/movies.db`
pub(crate) fn resolve_db_path(cli_override: Option<PathBuf>) -> PathBuf {
    if let Some(p) = cli_override {
        return p;
    }
    if let Some(p) = std::env::var_os(DB_ENV_VAR).filter(|v| !v.is_empty()) {
        return PathBuf::from(p);
    }
    if let Some(p) = saved_db_path() {
        return p;
    }
    default_db_path()
}

/// The database path saved in `settings.toml`, if any.
pub(crate) fn saved_db_path() -> Option<PathBuf> {
    load_db_path(&settings_path())
}

/// Read `database.path` from a settings file, if set.
fn load_db_path(settings: &Path) -> Option<PathBuf> {
    let contents = std::fs::read_to_string(settings).ok()?;
    db_path_from_str(&contents)
}

fn db_path_from_str(contents: &str) -> Option<PathBuf> {
    let doc: toml::Value = contents.parse().ok()?;
    let path = doc.get("database")?.get("path")?.as_str()?;
    if path.is_empty() {
        None
    } else {
        Some(PathBuf::from(path))
    }
}

/// Save (or clear) the database path in `settings.toml`.
pub(crate) fn save_db_path(path: Option<&Path>) -> io::Result<()> {
    save_db_path_to(&settings_path(), path)
}

/// Surgical update of `[database] path` so other keys are preserved.
fn save_db_path_to(settings: &Path, path: Option<&Path>) -> io::Result<()> {
    let mut doc: toml::Value = if let Ok(contents) = std::fs::read_to_string(settings) {
        contents
            .parse()
            .unwrap_or_else(|_| toml::Value::Table(Default::default()))
    } else {
        toml::Value::Table(Default::default())
    };

    let table = doc
        .as_table_mut()
        .ok_or_else(|| io::Error::other("settings.toml root is not a table"))?;
    let database = table
        .entry("database")
        .or_insert_with(|| toml::Value::Table(Default::default()));
    let db_table = database
        .as_table_mut()
        .ok_or_else(|| io::Error::other("[database] is not a table"))?;

    match path {
        Some(p) => {
            db_table.insert(
                "path".to_string(),
                toml::Value::String(p.to_string_lossy().into_owned()),
            );
        }
        None => {
            db_table.remove("path");
        }
    }

    // Write atomically
    if let Some(parent) = settings.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = toml::to_string_pretty(&doc).map_err(io::Error::other)?;
    let tmp = settings.with_extension("toml.tmp");
    std::fs::write(&tmp, &serialized)?;
    std::fs::rename(&tmp, settings)?;

    Ok(())
}

/// Load the full settings file as a pretty-printed TOML string for display.
pub(crate) fn load_settings_string() -> Option<String> {
    let contents = std::fs::read_to_string(settings_path()).ok()?;
    let doc: toml::Value = contents.parse().ok()?;
    toml::to_string_pretty(&doc).ok()
}
