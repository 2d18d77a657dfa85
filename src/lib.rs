//! Single-table MySQL dump to CSV converter.
//!
//! The `sqldump-csv` crate (library name `sqlcsv`) turns a textual dump
//! script made of one `CREATE TABLE` statement and a run of
//! `INSERT INTO ... VALUES (...);` statements into a CSV table: a header line
//! with the declared columns followed by one line per insertion statement.
//!
//! # CLI Reference
//!
//! ```text
//! cargo install sqldump-csv
//! sql2csv convert -f users.sql -o users.csv
//! ```
//!
//! | Command | Purpose |
//! |---------|---------|
//! | [`sql2csv convert`](cli::app::Commands::Convert) | Convert a dump to CSV or JSON |
//! | [`sql2csv columns`](cli::app::Commands::Columns) | Show the table name and extracted column list |
//! | [`sql2csv completions`](cli::app::Commands::Completions) | Generate shell completion scripts |
//!
//! All subcommands accept `--color <auto|always|never>`, `--output <file>`
//! and `--audit-log <file>`.
//!
//! # Library API
//!
//! ```
//! use sqlcsv::dump::export::{convert, write_csv};
//!
//! let dump = "CREATE TABLE `t` (\n  `id` int,\n  `name` varchar(10)\n);\n\
//!             INSERT INTO `t` VALUES (1, 'Alice');\n";
//! let conversion = convert(dump);
//! let mut out = Vec::new();
//! write_csv(&conversion, &mut out).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "id,name\n1,Alice\n");
//! ```
//!
//! ## Key entry points
//!
//! | Type / Function | Purpose |
//! |-----------------|---------|
//! | [`extract_columns`](dump::schema::extract_columns) | Ordered column names from the `CREATE TABLE` field list |
//! | [`find_insert_statements`](dump::statement::find_insert_statements) | Every `INSERT INTO ...;` statement in document order |
//! | [`tokenize_values`](dump::values::tokenize_values) | Quote-aware split of one values tuple |
//! | [`coerce`](dump::scalar::coerce) | Token to [`ScalarValue`](dump::scalar::ScalarValue) |
//! | [`convert`](dump::export::convert) | Whole-dump conversion into a [`Conversion`](dump::export::Conversion) |
//!
//! ## Feature flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli` | on | The `sql2csv` binary and its dependencies (clap, colored, indicatif, chrono, fs2, tempfile). |

#[cfg(feature = "cli")]
pub mod cli;
pub mod dump;
pub mod util;
#[cfg(target_arch = "wasm32")]
pub mod wasm;

use thiserror::Error;

/// Errors returned by `sqlcsv` operations.
#[derive(Error, Debug)]
pub enum SqlCsvError {
    /// An I/O error occurred (file open, read, write, or persist failure).
    #[error("I/O error: {0}")]
    Io(String),

    /// Input could not be interpreted (invalid UTF-8, serialization failure).
    #[error("Parse error: {0}")]
    Parse(String),

    /// An invalid argument was supplied (wrong file extension, bad option, etc.).
    #[error("Invalid argument: {0}")]
    Argument(String),

    /// The dump has no `CREATE TABLE ...;` statement.
    #[error("No table definition found")]
    NoTableDefinition,

    /// An `INSERT` statement has no recognizable `VALUES (...);` tuple.
    #[error("No VALUES clause found")]
    NoValuesClause,
}
