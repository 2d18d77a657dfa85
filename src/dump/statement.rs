//! Statement discovery.
//!
//! Statements are located with first-match patterns bounded by the next `;`.
//! Nothing here understands string literals, so a `;` inside a quoted value
//! ends the statement early. That boundary is kept as-is.

use std::sync::OnceLock;

use regex::Regex;

use crate::SqlCsvError;

/// One complete statement cut out of the dump text, terminator included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawStatement<'a> {
    /// Statement text from the keyword through the terminating `;`.
    pub text: &'a str,
    /// Byte offset of the statement start within the dump.
    pub offset: usize,
}

impl RawStatement<'_> {
    /// 1-based line number of the statement start within `dump`.
    pub fn line_number(&self, dump: &str) -> usize {
        line_number_at(dump, self.offset)
    }
}

fn create_table_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"CREATE TABLE[^;]+;").expect("valid create table regex"))
}

fn insert_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"INSERT INTO[^;]+;").expect("valid insert regex"))
}

/// Find the first `CREATE TABLE ...;` statement.
///
/// Only the first table definition is considered; later ones are ignored.
pub fn find_create_statement(dump: &str) -> Result<RawStatement<'_>, SqlCsvError> {
    create_table_re()
        .find(dump)
        .map(|m| RawStatement {
            text: m.as_str(),
            offset: m.start(),
        })
        .ok_or(SqlCsvError::NoTableDefinition)
}

/// Find every `INSERT INTO ...;` statement in document order.
///
/// An insertion with no terminating `;` is not matched at all.
pub fn find_insert_statements(dump: &str) -> Vec<RawStatement<'_>> {
    insert_re()
        .find_iter(dump)
        .map(|m| RawStatement {
            text: m.as_str(),
            offset: m.start(),
        })
        .collect()
}

/// 1-based line number of a byte offset.
pub fn line_number_at(text: &str, offset: usize) -> usize {
    let end = offset.min(text.len());
    text.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() + 1
}
