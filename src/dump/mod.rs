//! Dump script parsing.
//!
//! The submodules follow the order in which a conversion uses them: statement
//! discovery, schema extraction, value tokenizing, scalar coercion, and the
//! CSV/JSON serializer that ties them together.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`statement`] | Locate the `CREATE TABLE` statement and every `INSERT INTO` statement |
//! | [`schema`] | Extract the table name and ordered column names from the field list |
//! | [`values`] | Locate the `VALUES (...)` tuple and split it into raw tokens |
//! | [`scalar`] | Coerce raw tokens into typed [`scalar::ScalarValue`]s |
//! | [`rows`] | Decode insertion statements into rows, recording skipped statements |
//! | [`export`] | Whole-dump conversion plus CSV and JSON writers |
//!
//! The grammar handled here is deliberately shallow. Statements end at the
//! first `;` even inside string literals, and the tokenizer honors a single
//! backslash before a quote without unwinding longer escape runs.

pub mod export;
pub mod rows;
pub mod scalar;
pub mod schema;
pub mod statement;
pub mod values;
