//! Whole-dump conversion and output writers.
//!
//! [`convert`] runs schema extraction and row decoding over one dump text.
//! The resulting [`Conversion`] is written with [`write_csv`] or
//! [`write_json`].
//!
//! # Functions
//!
//! | Function | Purpose |
//! |----------|---------|
//! | [`convert`] | Extract the schema and decode every insertion statement |
//! | [`write_csv`] | Header line plus one line per row |
//! | [`write_json`] | `{table, columns, rows, skipped}` document |
//! | [`csv_escape`] | RFC 4180 CSV escaping for [`ScalarValue`] |

use std::io::Write;

use serde::Serialize;

use crate::dump::rows::{decode_rows, DecodedRows, Row, SkippedStatement};
use crate::dump::scalar::ScalarValue;
use crate::dump::schema::{extract_schema, TableSchema};
use crate::SqlCsvError;

/// Result of converting one dump.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    /// Table definition, or `None` when the dump has no `CREATE TABLE`.
    pub schema: Option<TableSchema>,
    pub rows: Vec<Row>,
    pub skipped: Vec<SkippedStatement>,
    /// Insertion statements found, including skipped ones.
    pub statements: usize,
}

impl Conversion {
    /// Combine an extracted schema with decoded rows.
    pub fn from_parts(schema: Option<TableSchema>, decoded: DecodedRows) -> Self {
        Self {
            schema,
            rows: decoded.rows,
            skipped: decoded.skipped,
            statements: decoded.statements,
        }
    }

    /// Declared columns; empty when the schema is unknown.
    pub fn columns(&self) -> &[String] {
        self.schema
            .as_ref()
            .map(|s| s.columns.as_slice())
            .unwrap_or(&[])
    }

    pub fn table_name(&self) -> Option<&str> {
        self.schema.as_ref().and_then(|s| s.name.as_deref())
    }

    pub fn has_table_definition(&self) -> bool {
        self.schema.is_some()
    }

    /// Rows whose value count differs from the declared column count.
    pub fn mismatched_rows(&self) -> usize {
        let n = self.columns().len();
        self.rows.iter().filter(|r| r.len() != n).count()
    }
}

/// Convert a dump into its schema and decoded rows.
pub fn convert(dump: &str) -> Conversion {
    Conversion::from_parts(extract_schema(dump).ok(), decode_rows(dump))
}

/// CSV-escape a scalar value per RFC 4180.
///
/// - `Null` produces an empty string.
/// - Numbers produce their string representation.
/// - Text containing commas, double quotes, or line breaks is quoted with
///   internal double quotes doubled.
pub fn csv_escape(val: &ScalarValue) -> String {
    match val {
        ScalarValue::Text(s) => csv_escape_str(s),
        other => other.to_string(),
    }
}

/// CSV-escape a plain string field.
pub fn csv_escape_str(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Join escaped fields into one CSV record (without the line terminator).
///
/// A record holding a single empty field is written as `""` so it cannot be
/// mistaken for a blank line.
fn csv_record(fields: Vec<String>) -> String {
    if fields.len() == 1 && fields[0].is_empty() {
        return "\"\"".to_string();
    }
    fields.join(",")
}

/// Write the conversion as CSV.
///
/// The header line is omitted when no columns are known: either the dump has
/// no table definition, or its definition declares no columns (for example
/// `CREATE TABLE t LIKE other;`). Rows are written as decoded, never padded
/// or truncated to the column count.
pub fn write_csv<W: Write + ?Sized>(
    conv: &Conversion,
    writer: &mut W,
) -> Result<(), SqlCsvError> {
    let columns = conv.columns();
    if !columns.is_empty() {
        let header = csv_record(columns.iter().map(|c| csv_escape_str(c)).collect());
        writeln!(writer, "{}", header).map_err(|e| SqlCsvError::Io(e.to_string()))?;
    }

    for row in &conv.rows {
        let record = csv_record(row.iter().map(csv_escape).collect());
        writeln!(writer, "{}", record).map_err(|e| SqlCsvError::Io(e.to_string()))?;
    }

    Ok(())
}

#[derive(Serialize)]
struct JsonExport<'a> {
    table: Option<&'a str>,
    columns: &'a [String],
    rows: &'a [Row],
    skipped: &'a [SkippedStatement],
}

/// Write the conversion as a pretty-printed JSON document.
///
/// Rows stay positional arrays so a row/column count mismatch survives.
pub fn write_json<W: Write + ?Sized>(
    conv: &Conversion,
    writer: &mut W,
) -> Result<(), SqlCsvError> {
    let json = to_json_string(conv)?;
    writeln!(writer, "{}", json).map_err(|e| SqlCsvError::Io(e.to_string()))
}

/// Render the conversion as CSV text.
pub fn to_csv_string(conv: &Conversion) -> Result<String, SqlCsvError> {
    let mut buf = Vec::new();
    write_csv(conv, &mut buf)?;
    String::from_utf8(buf).map_err(|e| SqlCsvError::Parse(e.to_string()))
}

/// Render the conversion as pretty-printed JSON.
pub fn to_json_string(conv: &Conversion) -> Result<String, SqlCsvError> {
    let export = JsonExport {
        table: conv.table_name(),
        columns: conv.columns(),
        rows: &conv.rows,
        skipped: &conv.skipped,
    };
    serde_json::to_string_pretty(&export)
        .map_err(|e| SqlCsvError::Parse(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DUMP: &str = "\
CREATE TABLE `items` (
  `id` int NOT NULL,
  `name` varchar(32) DEFAULT NULL,
  `price` decimal(10,2) NOT NULL,
  PRIMARY KEY (`id`)
) ENGINE=InnoDB;
INSERT INTO `items` VALUES (1, 'Alice', 9.99);
INSERT INTO `items` VALUES (2, NULL, 5);
";

    #[test]
    fn test_end_to_end_csv() {
        let conv = convert(DUMP);
        assert_eq!(conv.table_name(), Some("items"));
        assert_eq!(
            to_csv_string(&conv).unwrap(),
            "id,name,price\n1,Alice,9.99\n2,,5\n"
        );
    }

    #[test]
    fn test_csv_escape() {
        assert_eq!(csv_escape(&ScalarValue::Null), "");
        assert_eq!(csv_escape(&ScalarValue::Integer(-3)), "-3");
        assert_eq!(csv_escape(&ScalarValue::Real(5.0)), "5.0");
        assert_eq!(csv_escape(&ScalarValue::Text("plain".into())), "plain");
        assert_eq!(csv_escape(&ScalarValue::Text("a, b".into())), "\"a, b\"");
        assert_eq!(
            csv_escape(&ScalarValue::Text("say \"hi\"".into())),
            "\"say \"\"hi\"\"\""
        );
        assert_eq!(csv_escape(&ScalarValue::Text("l1\nl2".into())), "\"l1\nl2\"");
    }

    #[test]
    fn test_quoted_comma_value_round_trips_as_single_field() {
        let dump = "CREATE TABLE t (`a` text, `b` int);\nINSERT INTO t VALUES ('x, y', 1);";
        assert_eq!(to_csv_string(&convert(dump)).unwrap(), "a,b\n\"x, y\",1\n");
    }

    #[test]
    fn test_header_only_when_no_inserts() {
        let conv = convert("CREATE TABLE t (`a` int, `b` int);");
        assert_eq!(conv.statements, 0);
        assert_eq!(to_csv_string(&conv).unwrap(), "a,b\n");
    }

    #[test]
    fn test_headerless_without_table_definition() {
        let conv = convert("INSERT INTO t VALUES (1, 'x');");
        assert!(!conv.has_table_definition());
        assert_eq!(to_csv_string(&conv).unwrap(), "1,x\n");
    }

    #[test]
    fn test_headerless_when_definition_declares_no_columns() {
        let dump = "CREATE TABLE `t` LIKE `other`;\nINSERT INTO `t` VALUES (1, 'x');\n";
        let conv = convert(dump);
        assert!(conv.has_table_definition());
        assert_eq!(conv.table_name(), Some("t"));
        assert!(conv.columns().is_empty());
        assert_eq!(to_csv_string(&conv).unwrap(), "1,x\n");
    }

    #[test]
    fn test_unsigned_bigint_values_keep_their_digits() {
        let dump = "CREATE TABLE t (`id` bigint unsigned);\n\
                    INSERT INTO t VALUES (18446744073709551615);\n\
                    INSERT INTO t VALUES (9223372036854775808);\n";
        assert_eq!(
            to_csv_string(&convert(dump)).unwrap(),
            "id\n18446744073709551615\n9223372036854775808\n"
        );
    }

    #[test]
    fn test_mismatched_rows_written_as_is() {
        let dump = "CREATE TABLE t (`a` int, `b` int);\n\
                    INSERT INTO t VALUES (1);\n\
                    INSERT INTO t VALUES (1, 2, 3);\n";
        let conv = convert(dump);
        assert_eq!(conv.mismatched_rows(), 2);
        assert_eq!(to_csv_string(&conv).unwrap(), "a,b\n1\n1,2,3\n");
    }

    #[test]
    fn test_single_empty_field_record() {
        let dump = "CREATE TABLE t (`a` text);\nINSERT INTO t VALUES ('');";
        assert_eq!(to_csv_string(&convert(dump)).unwrap(), "a\n\"\"\n");
    }

    #[test]
    fn test_json_output() {
        let dump = "CREATE TABLE `t` (`a` int, `b` text);\n\
                    INSERT INTO `t` VALUES (1, NULL);\n\
                    INSERT INTO `t` VALUES (2, 'x';\n";
        let json: serde_json::Value =
            serde_json::from_str(&to_json_string(&convert(dump)).unwrap()).unwrap();
        assert_eq!(json["table"], "t");
        assert_eq!(json["columns"], serde_json::json!(["a", "b"]));
        assert_eq!(json["rows"], serde_json::json!([[1, null]]));
        assert_eq!(json["skipped"][0]["line"], 3);
        assert_eq!(json["skipped"][0]["reason"], "no_values_clause");
    }
}
