//! Conversion of SUBTLEX frequency norms to the profile format.
//!
//! English norms come as `{"out1g": [{"Word", "Zipf-value",
//! "Dom_PoS_SUBTLEX"}, ...]}`. Spanish norms come as `{"Subtlex-Esp": [...]}`
//! where each row packs up to three words in `Word`, `Word_1` and `Word_2`
//! with log frequencies in `Log freq.`, `Log freq._1` and `Log freq._2`.

use std::path::Path;

use lexigrade_core::{FrequencyTable, Language, LexigradeError, Result};
use serde_json::Value;
use tracing::{info, warn};

use crate::artifacts::{read_json, write_json};

const ENGLISH_ROWS: &str = "out1g";
const SPANISH_ROWS: &str = "Subtlex-Esp";
const SPANISH_SUFFIXES: [&str; 3] = ["", "_1", "_2"];

/// Builds a frequency table from raw SUBTLEX rows.
///
/// Rows without a usable word or frequency are skipped.
///
/// # Errors
///
/// Returns an invalid input error when the row array is missing.
pub fn convert_subtlex(language: Language, raw: &Value) -> Result<FrequencyTable> {
    let (key, table, skipped) = match language {
        Language::English => {
            let rows = rows(raw, ENGLISH_ROWS)?;
            let (table, skipped) = convert_english(rows);
            (ENGLISH_ROWS, table, skipped)
        }
        Language::Spanish => {
            let rows = rows(raw, SPANISH_ROWS)?;
            let (table, skipped) = convert_spanish(rows);
            (SPANISH_ROWS, table, skipped)
        }
    };
    if skipped > 0 {
        warn!(event = "subtlex_rows_skipped", source = key, skipped);
    }
    info!(event = "subtlex_converted", language = %language, words = table.len());
    Ok(table)
}

/// Converts the raw norms at `source` and writes the table to `destination`.
///
/// The two paths may be the same file.
pub fn convert_subtlex_file(
    language: Language,
    source: &Path,
    destination: &Path,
) -> Result<FrequencyTable> {
    let raw: Value = read_json(source)?;
    let table = convert_subtlex(language, &raw)?;
    write_json(destination, &table)?;
    Ok(table)
}

fn rows<'a>(raw: &'a Value, key: &str) -> Result<&'a [Value]> {
    raw.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .ok_or_else(|| {
            LexigradeError::InvalidInput(format!("SUBTLEX data has no '{key}' array"))
        })
}

fn convert_english(rows: &[Value]) -> (FrequencyTable, usize) {
    let mut table = FrequencyTable::new();
    let mut skipped = 0;
    for row in rows {
        let word = row.get("Word").and_then(Value::as_str).map(str::to_lowercase);
        let zipf = row.get("Zipf-value").and_then(number);
        match (word, zipf) {
            (Some(word), Some(zipf)) if !word.is_empty() => {
                let pos = row
                    .get("Dom_PoS_SUBTLEX")
                    .and_then(Value::as_str)
                    .unwrap_or("")
                    .to_uppercase();
                table.insert(word, zipf, pos);
            }
            _ => skipped += 1,
        }
    }
    (table, skipped)
}

fn convert_spanish(rows: &[Value]) -> (FrequencyTable, usize) {
    let mut table = FrequencyTable::new();
    let mut skipped = 0;
    for row in rows {
        for suffix in SPANISH_SUFFIXES {
            let word = row.get(format!("Word{suffix}").as_str());
            let freq = row.get(format!("Log freq.{suffix}").as_str());
            let (Some(word), Some(freq)) = (word, freq) else {
                continue;
            };
            let word = word.as_str().map(|w| w.trim().to_lowercase()).unwrap_or_default();
            if word.is_empty() {
                continue;
            }
            match number(freq) {
                Some(log_freq) => table.insert(word, log_freq, ""),
                None => skipped += 1,
            }
        }
    }
    (table, skipped)
}

/// Numbers may be stored as JSON numbers or numeric strings.
fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_english_rows() {
        let raw = json!({"out1g": [
            {"Word": "House", "Zipf-value": 5.6, "Dom_PoS_SUBTLEX": "noun"},
            {"Word": "run", "Zipf-value": "5.3"},
            {"Word": "broken", "Zipf-value": "n/a"}
        ]});
        let table = convert_subtlex(Language::English, &raw).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.zipf("house"), 5.6);
        assert_eq!(table.get("house").unwrap().pos, "NOUN");
        assert_eq!(table.get("run").unwrap().pos, "");
        assert_eq!(table.zipf("broken"), 0.0);
    }

    #[test]
    fn test_spanish_rows_unpack_three_columns() {
        let raw = json!({"Subtlex-Esp": [
            {"Word": " Casa ", "Log freq.": 3.9, "Word_1": "perro", "Log freq._1": "3.1",
             "Word_2": "", "Log freq._2": 1.0},
            {"Word": "gato", "Log freq.": "x"}
        ]});
        let table = convert_subtlex(Language::Spanish, &raw).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.zipf("casa"), 3.9);
        assert_eq!(table.zipf("perro"), 3.1);
        assert!(table.get("gato").is_none());
    }

    #[test]
    fn test_missing_rows_are_rejected() {
        let err = convert_subtlex(Language::Spanish, &json!({"out1g": []})).unwrap_err();
        assert!(matches!(err, LexigradeError::InvalidInput(_)));
    }
}
