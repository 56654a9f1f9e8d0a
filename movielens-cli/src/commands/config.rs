use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::settings::{
    DB_ENV_VAR, load_settings_string, resolve_db_path, save_db_path, saved_db_path,
    settings_path,
};

/// Show the settings file and where the catalog database resolves to.
pub(crate) fn run_config_show(cli_db: Option<PathBuf>) {
    let path = settings_path();

    log::info!(
        "{}",
        "MovieLens Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");

    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    let source = if cli_db.is_some() {
        "--db"
    } else if std::env::var_os(DB_ENV_VAR).is_some_and(|v| !v.is_empty()) {
        DB_ENV_VAR
    } else if saved_db_path().is_some() {
        "settings.toml"
    } else {
        "default"
    };
    let db_path = resolve_db_path(cli_db);
    log::info!(
        "  Database:      {} {}",
        db_path.display().if_supports_color(Stdout, |t| t.cyan()),
        format!("({})", source).if_supports_color(Stdout, |t| t.dimmed()),
    );
    if !db_path.exists() {
        log::info!(
            "                 {}",
            "not imported yet".if_supports_color(Stdout, |t| t.yellow()),
        );
    }

    if let Some(contents) = load_settings_string() {
        log::info!("");
        for line in contents.lines() {
            log::info!("  {}", line);
        }
    }
}

pub(crate) fn run_config_path() {
    println!("{}", settings_path().display());
}

/// Save `path` as the default catalog database.
pub(crate) fn run_config_set_db(path: &Path) -> Result<(), CliError> {
    let absolute = std::path::absolute(path)?;
    save_db_path(Some(&absolute))
        .map_err(|e| CliError::config(format!("Failed to save settings: {}", e)))?;
    log::info!(
        "{} database path to {}",
        "Saved".if_supports_color(Stdout, |t| t.green()),
        absolute.display(),
    );
    Ok(())
}

pub(crate) fn run_config_clear_db() -> Result<(), CliError> {
    save_db_path(None).map_err(|e| CliError::config(format!("Failed to save settings: {}", e)))?;
    log::info!(
        "Cleared saved database path; now using {}",
        resolve_db_path(None).display(),
    );
    Ok(())
}
