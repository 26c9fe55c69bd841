//! Deterministic text-artifact formatting for result tables.

use std::fs;
use std::path::Path;

/// Scientific notation with 15 fractional digits, the result-file format.
pub fn format_sci_f64(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    format!("{value:.15e}")
}

/// Renders rows of (x, y) pairs as tab-separated scientific notation.
pub fn format_table_rows(rows: &[(f64, f64)]) -> String {
    let mut content = String::new();
    for (x, y) in rows {
        content.push_str(&format_sci_f64(*x));
        content.push('\t');
        content.push_str(&format_sci_f64(*y));
        content.push('\n');
    }
    content
}

pub fn normalize_text_artifact(content: &str) -> String {
    let mut normalized = content.replace("\r\n", "\n").replace('\r', "\n");
    if !normalized.is_empty() && !normalized.ends_with('\n') {
        normalized.push('\n');
    }
    normalized
}

pub fn write_text_artifact(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, normalize_text_artifact(content))
}
