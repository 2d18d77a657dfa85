//! Column extraction from the `CREATE TABLE` field list.
//!
//! Matching is clause-oriented rather than a full DDL grammar. The field list
//! is cut into clauses at top-level commas, and a clause declares a column
//! when it opens with a backtick-quoted identifier followed by whitespace and
//! a definition word. Index and constraint clauses (`PRIMARY KEY (...)`,
//! `UNIQUE KEY ...`, `KEY ...`, `INDEX ...`, `CONSTRAINT ...`) never open with
//! a backtick, so the identifiers inside them are skipped.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::dump::statement::find_create_statement;
use crate::SqlCsvError;

/// Keywords that mark a definition as a key or constraint rather than a column.
///
/// Compared case-sensitively, the way mysqldump writes them.
pub const CONSTRAINT_KEYWORDS: [&str; 5] = ["PRIMARY", "UNIQUE", "KEY", "INDEX", "CONSTRAINT"];

/// Table name and declared columns of the dump's table definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSchema {
    /// Table name, if one could be read after `CREATE TABLE`.
    pub name: Option<String>,
    /// Column names in declaration order. Duplicates are kept.
    pub columns: Vec<String>,
}

fn field_list_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)CREATE TABLE.*?\((.*?)\)[^)]*?;").expect("valid field list regex")
    })
}

fn table_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"CREATE\s+TABLE\s+(?:IF\s+NOT\s+EXISTS\s+)?(?:`?[^`\s(]+`?\.)?`?([^`\s(]+)`?")
            .expect("valid table name regex")
    })
}

/// Extract the table schema from the first `CREATE TABLE` statement.
///
/// Fails with [`SqlCsvError::NoTableDefinition`] when the dump has no
/// creation statement. A statement whose field list cannot be located
/// yields an empty column list.
pub fn extract_schema(dump: &str) -> Result<TableSchema, SqlCsvError> {
    let stmt = find_create_statement(dump)?;
    let name = table_name_re()
        .captures(stmt.text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string());
    let columns = field_list(stmt.text)
        .map(columns_in_field_list)
        .unwrap_or_default();
    Ok(TableSchema { name, columns })
}

/// Ordered column names declared by the dump's table definition.
///
/// Returns an empty list when there is no table definition; callers treat
/// that as "schema unknown".
pub fn extract_columns(dump: &str) -> Vec<String> {
    extract_schema(dump)
        .map(|schema| schema.columns)
        .unwrap_or_default()
}

/// Table name of the dump's table definition.
pub fn extract_table_name(dump: &str) -> Option<String> {
    extract_schema(dump).ok().and_then(|schema| schema.name)
}

/// The text between the opening `(` and the last `)` before the terminator.
pub fn field_list(create_statement: &str) -> Option<&str> {
    field_list_re()
        .captures(create_statement)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Column names declared in a field list, in source order.
pub fn columns_in_field_list(fields: &str) -> Vec<String> {
    split_clauses(fields)
        .into_iter()
        .filter_map(column_name)
        .map(str::to_string)
        .collect()
}

/// Split a field list at commas outside parentheses and single quotes.
fn split_clauses(fields: &str) -> Vec<&str> {
    let mut clauses = Vec::new();
    let mut depth = 0usize;
    let mut in_quotes = false;
    let mut prev = '\0';
    let mut start = 0;

    for (i, c) in fields.char_indices() {
        match c {
            '\'' if prev != '\\' => in_quotes = !in_quotes,
            '(' if !in_quotes => depth += 1,
            ')' if !in_quotes => depth = depth.saturating_sub(1),
            ',' if !in_quotes && depth == 0 => {
                clauses.push(&fields[start..i]);
                start = i + 1;
            }
            _ => {}
        }
        prev = c;
    }
    clauses.push(&fields[start..]);
    clauses
}

/// The column declared by one clause, if it declares one.
fn column_name(clause: &str) -> Option<&str> {
    let rest = clause.trim_start().strip_prefix('`')?;
    let end = rest.find('`')?;
    let name = &rest[..end];
    if name.is_empty() || !name.chars().all(is_word_char) {
        return None;
    }

    // The identifier must be separated from its definition by whitespace.
    let after = &rest[end + 1..];
    let definition = after.trim_start();
    if definition.len() == after.len() {
        return None;
    }

    let word_end = definition
        .find(|c: char| !is_word_char(c))
        .unwrap_or(definition.len());
    let word = &definition[..word_end];
    if word.is_empty() || CONSTRAINT_KEYWORDS.contains(&word) {
        return None;
    }
    Some(name)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    const MYSQLDUMP_TABLE: &str = "\
DROP TABLE IF EXISTS `products`;
CREATE TABLE `products` (
  `id` int NOT NULL AUTO_INCREMENT,
  `name` varchar(255) NOT NULL DEFAULT '',
  `price` decimal(10,2) DEFAULT NULL,
  `created_at` datetime DEFAULT CURRENT_TIMESTAMP,
  PRIMARY KEY (`id`),
  UNIQUE KEY `uk_name` (`name`),
  KEY `idx_price` (`price`),
  CONSTRAINT `fk_owner` FOREIGN KEY (`id`) REFERENCES `owners` (`id`)
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4;
INSERT INTO `products` VALUES (1,'a',1.00,NULL);
";

    #[test]
    fn test_extract_columns_mysqldump_table() {
        assert_eq!(
            extract_columns(MYSQLDUMP_TABLE),
            vec!["id", "name", "price", "created_at"]
        );
    }

    #[test]
    fn test_extract_table_name() {
        assert_eq!(extract_table_name(MYSQLDUMP_TABLE).as_deref(), Some("products"));
        assert_eq!(
            extract_table_name("CREATE TABLE IF NOT EXISTS `shop`.`orders` (`id` int);")
                .as_deref(),
            Some("orders")
        );
        assert_eq!(
            extract_table_name("CREATE TABLE plain (`id` int);").as_deref(),
            Some("plain")
        );
    }

    #[test]
    fn test_nested_parens_do_not_end_field_list() {
        let stmt = "CREATE TABLE t (`a` decimal(10,2), `b` int);";
        assert_eq!(field_list(stmt), Some("`a` decimal(10,2), `b` int"));
        assert_eq!(columns_in_field_list(field_list(stmt).unwrap()), vec!["a", "b"]);
    }

    #[test]
    fn test_single_line_definition() {
        let dump = "CREATE TABLE t (`id` int, `name` text, PRIMARY KEY(`id`));";
        assert_eq!(extract_columns(dump), vec!["id", "name"]);
    }

    #[test]
    fn test_no_table_definition() {
        assert!(extract_columns("INSERT INTO t VALUES (1);").is_empty());
        assert!(matches!(
            extract_schema("SELECT 1;"),
            Err(SqlCsvError::NoTableDefinition)
        ));
    }

    #[test]
    fn test_missing_field_list_yields_empty_columns() {
        let schema = extract_schema("CREATE TABLE t LIKE other;").unwrap();
        assert_eq!(schema.name.as_deref(), Some("t"));
        assert!(schema.columns.is_empty());
    }

    #[test]
    fn test_duplicate_columns_pass_through() {
        let dump = "CREATE TABLE t (`a` int, `a` int);";
        assert_eq!(extract_columns(dump), vec!["a", "a"]);
    }

    #[test]
    fn test_identifier_followed_by_constraint_keyword() {
        let dump = "CREATE TABLE t (`a` int, `b` KEY, `c` text);";
        assert_eq!(extract_columns(dump), vec!["a", "c"]);
    }

    #[test]
    fn test_constraint_keywords_case_sensitive() {
        // lowercase `key` is a legitimate (if odd) type word, not a constraint
        let dump = "CREATE TABLE t (`a` key_type, `b` int);";
        assert_eq!(extract_columns(dump), vec!["a", "b"]);
    }

    #[test]
    fn test_quoted_default_with_comma() {
        let dump = "CREATE TABLE t (`a` varchar(5) DEFAULT 'x, `y` z', `b` int);";
        assert_eq!(extract_columns(dump), vec!["a", "b"]);
    }

    #[test]
    fn test_identifier_needs_whitespace_and_definition() {
        let dump = "CREATE TABLE t (`a`int, `b` (1), `c` int);";
        assert_eq!(extract_columns(dump), vec!["c"]);
    }
}
