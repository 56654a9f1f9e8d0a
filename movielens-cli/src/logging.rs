//! Logger setup for the CLI.
//!
//! `--quiet` keeps warnings and errors, the default shows info, and
//! `--verbose` adds debug messages with timestamps. `RUST_LOG` overrides all
//! of these. With `--logfile`, everything written to stderr is also written
//! to the file with ANSI escapes removed.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use env_logger::{Builder, Target};
use log::{Level, LevelFilter};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use crate::CliError;

pub(crate) fn init_logging(
    quiet: bool,
    verbose: bool,
    logfile: Option<&Path>,
) -> Result<(), CliError> {
    let level = if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = Builder::new();
    builder.filter_level(level).parse_default_env();

    if verbose {
        builder.format_timestamp_millis();
    } else {
        builder.format(|buf, record| match record.level() {
            Level::Error => writeln!(
                buf,
                "{} {}",
                "error:".if_supports_color(Stderr, |t| t.red()),
                record.args()
            ),
            Level::Warn => writeln!(
                buf,
                "{} {}",
                "warning:".if_supports_color(Stderr, |t| t.yellow()),
                record.args()
            ),
            _ => writeln!(buf, "{}", record.args()),
        });
    }

    if let Some(path) = logfile {
        let file = File::create(path).map_err(|e| {
            CliError::config(format!("Cannot create log file {}: {}", path.display(), e))
        })?;
        builder.target(Target::Pipe(Box::new(Tee {
            stderr: io::stderr(),
            file: strip_ansi_escapes::Writer::new(file),
        })));
    }

    builder
        .try_init()
        .map_err(|e| CliError::config(format!("Logger already initialized: {}", e)))
}

/// Writes to stderr and to an ANSI-stripped log file.
struct Tee<F: Write> {
    stderr: io::Stderr,
    file: F,
}

impl<F: Write> Write for Tee<F> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.stderr.write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stderr.flush()?;
        self.file.flush()
    }
}
