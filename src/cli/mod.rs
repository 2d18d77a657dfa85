//! CLI subcommand implementations for the `sql2csv` binary.
//!
//! CLI argument parsing uses clap derive macros, with the top-level
//! [`app::Cli`] struct and [`app::Commands`] enum defined in [`app`] and
//! shared between `main.rs` and `build.rs` (for man page generation) via
//! `include!()`.
//!
//! Each subcommand module follows the same pattern: an `Options` struct holding
//! the parsed arguments and a `pub fn execute(opts, writer) -> Result<(), SqlCsvError>`
//! entry point. The `writer: &mut dyn Write` parameter allows output to be
//! captured in tests or redirected to a file via the global `--output` flag.
//!
//! # Subcommands
//!
//! | Command | Module | Purpose |
//! |---------|--------|---------|
//! | `sql2csv convert` | [`convert`] | Convert a dump to CSV or JSON, optionally into a timestamped file |
//! | `sql2csv columns` | [`columns`] | Print the table name and extracted column list |
//!
//! Warnings ("No table definition found", "No rows found") go to stderr and
//! never change the exit status. The `wprintln!` and `wprint!` macros wrap
//! `writeln!`/`write!` to convert `io::Error` into `SqlCsvError`.

pub mod app;
pub mod columns;
pub mod convert;

/// Write a line to the given writer, converting io::Error to SqlCsvError.
macro_rules! wprintln {
    ($w:expr) => {
        writeln!($w).map_err(|e| $crate::SqlCsvError::Io(e.to_string()))
    };
    ($w:expr, $($arg:tt)*) => {
        writeln!($w, $($arg)*).map_err(|e| $crate::SqlCsvError::Io(e.to_string()))
    };
}

/// Write (without newline) to the given writer, converting io::Error to SqlCsvError.
macro_rules! wprint {
    ($w:expr, $($arg:tt)*) => {
        write!($w, $($arg)*).map_err(|e| $crate::SqlCsvError::Io(e.to_string()))
    };
}

pub(crate) use wprint;
pub(crate) use wprintln;

use std::path::Path;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::SqlCsvError;

/// Read a dump file as UTF-8 text.
///
/// The path must carry the `.sql` extension. Bytes that are not valid UTF-8
/// abort the conversion.
pub(crate) fn read_dump(path: &str) -> Result<String, SqlCsvError> {
    let is_sql = Path::new(path)
        .extension()
        .is_some_and(|ext| ext == "sql");
    if !is_sql {
        return Err(SqlCsvError::Argument(format!(
            "Please supply a .sql file (got {})",
            path
        )));
    }

    let bytes =
        std::fs::read(path).map_err(|e| SqlCsvError::Io(format!("Cannot read {}: {}", path, e)))?;
    String::from_utf8(bytes)
        .map_err(|e| SqlCsvError::Parse(format!("{} is not valid UTF-8: {}", path, e)))
}

/// Print a warning line to stderr.
pub(crate) fn warn(msg: &str) {
    eprintln!("{} {}", "Warning:".yellow(), msg);
}

/// Create a styled progress bar for iterating over statements.
pub(crate) fn create_progress_bar(count: u64, unit: &str) -> ProgressBar {
    let pb = ProgressBar::new(count);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(&format!(
                "{{spinner:.green}} [{{bar:40.cyan/blue}}] {{pos}}/{{len}} {} ({{eta}})",
                unit
            ))
            .unwrap()
            .progress_chars("#>-"),
    );
    pb
}
