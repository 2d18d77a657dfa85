//! CLI implementation for the `sql2csv columns` subcommand.
//!
//! Prints the table name and the ordered column list that `convert` would
//! use as its CSV header.

use std::io::Write;

use serde::Serialize;

use crate::cli::{read_dump, warn, wprint, wprintln};
use crate::dump::schema::{extract_schema, TableSchema};
use crate::SqlCsvError;

/// Options for the `sql2csv columns` subcommand.
pub struct ColumnsOptions {
    /// Path to the dump file (.sql).
    pub file: String,
    /// Emit output as JSON.
    pub json: bool,
}

#[derive(Serialize)]
struct ColumnsJson<'a> {
    file: &'a str,
    table: Option<&'a str>,
    columns: &'a [String],
}

/// Show the extracted schema of a dump file.
pub fn execute(opts: &ColumnsOptions, writer: &mut dyn Write) -> Result<(), SqlCsvError> {
    let dump = read_dump(&opts.file)?;

    let schema = match extract_schema(&dump) {
        Ok(schema) => schema,
        Err(SqlCsvError::NoTableDefinition) => {
            warn(&format!("No table definition found in {}.", opts.file));
            TableSchema {
                name: None,
                columns: Vec::new(),
            }
        }
        Err(e) => return Err(e),
    };

    if opts.json {
        let out = ColumnsJson {
            file: &opts.file,
            table: schema.name.as_deref(),
            columns: &schema.columns,
        };
        let json = serde_json::to_string_pretty(&out)
            .map_err(|e| SqlCsvError::Parse(format!("JSON serialization error: {}", e)))?;
        wprintln!(writer, "{}", json)?;
        return Ok(());
    }

    wprint!(writer, "Table: ")?;
    wprintln!(writer, "{}", schema.name.as_deref().unwrap_or("(unknown)"))?;
    wprintln!(writer, "Columns: {}", schema.columns.len())?;
    for (i, col) in schema.columns.iter().enumerate() {
        wprintln!(writer, "  {:>3}  {}", i + 1, col)?;
    }

    Ok(())
}
