//! movielens CLI
//!
//! Command-line interface for loading and querying a MovieLens catalog of
//! movies, ratings, tags, and external links.

mod cli_types;
mod commands;
mod error;
mod logging;
mod output;
mod settings;

use clap::Parser;

use movielens_db::{RatingFilter, TagFilter};

use cli_types::{Cli, Commands, ConfigAction};
pub(crate) use error::CliError;

fn main() {
    let cli = Cli::try_parse().unwrap_or_else(|e| {
        if e.use_stderr() {
            let _ = e.print();
            std::process::exit(error::EX_USAGE);
        }
        e.exit()
    });

    if let Err(e) = logging::init_logging(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("{}", e);
        std::process::exit(e.exit_code());
    }

    if let Err(e) = run(cli) {
        log::error!("{}", e);
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let format = cli.format;
    let db_path = settings::resolve_db_path(cli.db.clone());
    log::debug!("Catalog database: {}", db_path.display());

    match cli.command {
        Commands::Import { dir, force } => {
            commands::import::run_import(&db_path, &dir, force, cli.quiet)
        }
        Commands::Health => commands::analytics::run_health(&db_path).map(|_| ()),
        Commands::Analytics => commands::analytics::run_analytics(&db_path, format),
        Commands::Movie { movie_id } => commands::movies::run_movie(&db_path, format, movie_id),
        Commands::Movies { page, title, genre } => {
            commands::movies::run_movies(&db_path, format, page, title, genre)
        }
        Commands::Rating { user_id, movie_id } => {
            commands::ratings::run_rating(&db_path, format, user_id, movie_id)
        }
        Commands::Ratings {
            page,
            movie_id,
            user_id,
            min_rating,
        } => commands::ratings::run_ratings(
            &db_path,
            format,
            page,
            RatingFilter {
                movie_id,
                user_id,
                min_rating,
            },
        ),
        Commands::Tag {
            user_id,
            movie_id,
            tag,
        } => commands::tags::run_tag(&db_path, format, user_id, movie_id, &tag),
        Commands::Tags {
            page,
            movie_id,
            user_id,
        } => commands::tags::run_tags(&db_path, format, page, TagFilter { movie_id, user_id }),
        Commands::Link { movie_id } => commands::links::run_link(&db_path, format, movie_id),
        Commands::Links { page } => commands::links::run_links(&db_path, format, page),
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                commands::config::run_config_show(cli.db);
                Ok(())
            }
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(())
            }
            ConfigAction::SetDb { path } => commands::config::run_config_set_db(&path),
            ConfigAction::ClearDb => commands::config::run_config_clear_db(),
        },
    }
}
