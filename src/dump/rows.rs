//! Row decoding for insertion statements.
//!
//! Each `INSERT INTO ...;` statement becomes at most one row. A statement
//! without a usable values tuple is skipped and recorded in
//! [`DecodedRows::skipped`] instead of aborting the conversion, and no
//! partial row is ever produced.

use serde::Serialize;

use crate::dump::scalar::{coerce, ScalarValue};
use crate::dump::statement::{find_insert_statements, RawStatement};
use crate::dump::values::{tokenize_values, values_clause};
use crate::SqlCsvError;

/// One decoded row: a value per token, in tuple order.
pub type Row = Vec<ScalarValue>;

/// Why an insertion statement produced no row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No `VALUES (...);` tuple could be located.
    NoValuesClause,
    /// The tuple was located but held no values.
    EmptyTuple,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            SkipReason::NoValuesClause => f.write_str("no VALUES clause"),
            SkipReason::EmptyTuple => f.write_str("empty values tuple"),
        }
    }
}

/// An insertion statement that produced no row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedStatement {
    /// 1-based line number of the statement start.
    pub line: usize,
    pub reason: SkipReason,
}

/// Rows decoded from a dump, plus the statements that were skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedRows {
    pub rows: Vec<Row>,
    pub skipped: Vec<SkippedStatement>,
    /// Number of insertion statements found, decoded or not.
    pub statements: usize,
}

/// Decode one insertion statement into a row.
///
/// The row holds exactly as many values as the tuple has tokens, whatever
/// the declared column count.
pub fn decode_row(statement: &str) -> Result<Row, SqlCsvError> {
    let tuple = values_clause(statement)?;
    Ok(tokenize_values(tuple).iter().map(|t| coerce(t)).collect())
}

/// Decode every insertion statement of a dump.
pub fn decode_rows(dump: &str) -> DecodedRows {
    decode_statements(dump, &find_insert_statements(dump), |_| {})
}

/// Decode already-located insertion statements.
///
/// `on_statement` is called once per statement after it is handled, which
/// lets callers drive a progress indicator.
pub fn decode_statements<F>(
    dump: &str,
    statements: &[RawStatement<'_>],
    mut on_statement: F,
) -> DecodedRows
where
    F: FnMut(&RawStatement<'_>),
{
    let mut decoded = DecodedRows {
        statements: statements.len(),
        ..DecodedRows::default()
    };

    for stmt in statements {
        match decode_row(stmt.text) {
            Ok(row) if row.is_empty() => decoded.skipped.push(SkippedStatement {
                line: stmt.line_number(dump),
                reason: SkipReason::EmptyTuple,
            }),
            Ok(row) => decoded.rows.push(row),
            Err(_) => decoded.skipped.push(SkippedStatement {
                line: stmt.line_number(dump),
                reason: SkipReason::NoValuesClause,
            }),
        }
        on_statement(stmt);
    }

    decoded
}
