//! Values tuple location and tokenizing.
//!
//! [`tokenize_values`] is a single left-to-right scan with one "inside quotes"
//! flag. A quote preceded by a backslash in the token-so-far does not toggle
//! the flag. Only that one preceding character is inspected, so `'\\'` (an
//! escaped backslash before the closing quote) keeps the span open.

use std::sync::OnceLock;

use regex::Regex;

use crate::SqlCsvError;

fn values_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)VALUES\s*\((.*?)\);").expect("valid values regex"))
}

/// The inner text of the `VALUES (...)` tuple of one insertion statement.
///
/// The tuple runs from the first `(` after `VALUES` to the first `);`.
/// Fails with [`SqlCsvError::NoValuesClause`] when either is missing.
pub fn values_clause(statement: &str) -> Result<&str, SqlCsvError> {
    values_re()
        .captures(statement)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .ok_or(SqlCsvError::NoValuesClause)
}

/// Split a tuple's inner text into trimmed raw tokens.
///
/// Commas inside a quoted span belong to the token. Quote characters are
/// kept in the token; stripping them is left to
/// [`coerce`](crate::dump::scalar::coerce). Empty tokens between two commas
/// are kept, a trailing empty token is not.
pub fn tokenize_values(tuple: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in tuple.chars() {
        match c {
            '\'' => {
                if !current.ends_with('\\') {
                    in_quotes = !in_quotes;
                }
                current.push(c);
            }
            ',' if !in_quotes => {
                tokens.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }

    let last = current.trim();
    if !last.is_empty() {
        tokens.push(last.to_string());
    }
    tokens
}
