//! CLI implementation for the `sql2csv convert` subcommand.
//!
//! Reads one dump file, extracts the column list from its `CREATE TABLE`
//! statement, decodes every `INSERT INTO` statement into a row, and writes
//! the table as CSV or JSON, either to the global writer or to a timestamped
//! file staged in `--output-dir`.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use colored::Colorize;

use crate::cli::app::OutputFormat;
use crate::cli::{create_progress_bar, read_dump, warn, wprintln};
use crate::dump::export::{write_csv, write_json, Conversion};
use crate::dump::rows::decode_statements;
use crate::dump::schema::extract_schema;
use crate::dump::statement::find_insert_statements;
use crate::util::audit::AuditLogger;
use crate::util::fs::StagedOutput;
use crate::SqlCsvError;

/// Options for the `sql2csv convert` subcommand.
pub struct ConvertOptions {
    /// Path to the dump file (.sql).
    pub file: String,
    /// Output format: CSV or JSON.
    pub format: OutputFormat,
    /// Directory receiving a timestamped output file instead of the writer.
    pub output_dir: Option<String>,
    /// Abort when the dump has no table definition.
    pub require_schema: bool,
    /// Show a progress bar over insertion statements.
    pub progress: bool,
    /// Report skipped statements and row/column mismatches on stderr.
    pub verbose: bool,
    /// Audit logger for recording conversions and written files.
    pub audit_logger: Option<Arc<AuditLogger>>,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

/// Convert a dump file.
pub fn execute(opts: &ConvertOptions, writer: &mut dyn Write) -> Result<(), SqlCsvError> {
    let dump = read_dump(&opts.file)?;

    let schema = match extract_schema(&dump) {
        Ok(schema) => Some(schema),
        Err(SqlCsvError::NoTableDefinition) if !opts.require_schema => {
            warn(&format!(
                "No table definition found in {}; rows are written without a header.",
                opts.file
            ));
            None
        }
        Err(e) => return Err(e),
    };

    if let Some(ref schema) = schema {
        if schema.columns.is_empty() {
            warn(&format!(
                "Table definition in {} declares no columns; rows are written without a header.",
                opts.file
            ));
        }
    }

    let statements = find_insert_statements(&dump);
    let pb = if opts.progress {
        Some(create_progress_bar(statements.len() as u64, "statements"))
    } else {
        None
    };
    let decoded = decode_statements(&dump, &statements, |_| {
        if let Some(ref pb) = pb {
            pb.inc(1);
        }
    });
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    let conv = Conversion::from_parts(schema, decoded);

    if conv.rows.is_empty() {
        warn(&format!("No rows found in {}.", opts.file));
    }
    if opts.verbose {
        report_details(&conv);
    }

    if let Some(ref logger) = opts.audit_logger {
        let _ = logger.log_conversion(
            &opts.file,
            conv.table_name(),
            conv.columns().len(),
            conv.statements,
            conv.rows.len(),
            conv.skipped.len(),
        );
    }

    match opts.output_dir {
        Some(ref dir) => {
            let mut staged = StagedOutput::create(Path::new(dir), opts.format.extension())?;
            write_conversion(&conv, opts.format, &mut staged)?;
            let path = staged.commit()?;
            let path = path.display().to_string();

            if let Some(ref logger) = opts.audit_logger {
                let _ = logger.log_file_write(&path, opts.format.extension(), conv.rows.len());
            }
            wprintln!(writer, "Wrote {} row(s) to {}", conv.rows.len(), path)?;
        }
        None => write_conversion(&conv, opts.format, writer)?,
    }

    Ok(())
}

fn write_conversion(
    conv: &Conversion,
    format: OutputFormat,
    writer: &mut dyn Write,
) -> Result<(), SqlCsvError> {
    match format {
        OutputFormat::Csv => write_csv(conv, writer),
        OutputFormat::Json => write_json(conv, writer),
    }
}

/// Per-statement diagnostics for `--verbose`.
fn report_details(conv: &Conversion) {
    eprintln!(
        "{} insertion statement(s), {} row(s), {} skipped",
        conv.statements,
        conv.rows.len(),
        conv.skipped.len()
    );
    for skip in &conv.skipped {
        eprintln!("  line {}: {} ({})", skip.line, "skipped".yellow(), skip.reason);
    }

    let columns = conv.columns().len();
    if columns > 0 {
        let mismatched = conv.mismatched_rows();
        if mismatched > 0 {
            eprintln!(
                "  {} row(s) do not have {} value(s); written as-is",
                mismatched, columns
            );
        }
    }
}
