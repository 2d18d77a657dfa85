//! WebAssembly bindings for in-browser dump conversion.
//!
//! Each exported function takes the dump text as a `&str` (via wasm-bindgen)
//! and returns a string. These are thin wrappers over the same library code
//! used by the CLI subcommands, so a static page can convert an uploaded
//! `.sql` file without sending it anywhere.

use wasm_bindgen::prelude::*;

use crate::dump::export::{convert, to_csv_string, to_json_string};
use crate::dump::schema;

fn to_js_err(e: crate::SqlCsvError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Converts dump text to CSV.
///
/// Returns the header line (omitted when the dump has no `CREATE TABLE`)
/// followed by one line per decodable `INSERT INTO` statement.
#[wasm_bindgen]
pub fn convert_to_csv(dump: &str) -> Result<String, JsValue> {
    to_csv_string(&convert(dump)).map_err(to_js_err)
}

/// Converts dump text to a JSON document.
///
/// The document has fields `table` (string or null), `columns` (array of
/// strings), `rows` (array of positional value arrays) and `skipped` (array
/// of `{line, reason}` objects for statements that produced no row).
#[wasm_bindgen]
pub fn convert_to_json(dump: &str) -> Result<String, JsValue> {
    to_json_string(&convert(dump)).map_err(to_js_err)
}

/// Returns the extracted column names as a JSON array of strings.
#[wasm_bindgen]
pub fn extract_columns(dump: &str) -> Result<String, JsValue> {
    serde_json::to_string(&schema::extract_columns(dump))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
