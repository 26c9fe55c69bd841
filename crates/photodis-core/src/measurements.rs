//! EXFOR photoabsorption measurement tables.
//!
//! Local whitespace-delimited files with energy/value/error columns, used as
//! the published-measurement overlay in the cross-section comparison plot.

use crate::domain::{Error, Result};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeasurementSeries {
    /// Photon energy, MeV.
    pub energy_mev: Vec<f64>,
    /// Measured cross section, mb.
    pub sigma_mb: Vec<f64>,
    /// One-sigma uncertainty, mb; never negative.
    pub sigma_err_mb: Vec<f64>,
}

impl MeasurementSeries {
    pub fn len(&self) -> usize {
        self.energy_mev.len()
    }

    pub fn is_empty(&self) -> bool {
        self.energy_mev.is_empty()
    }
}

/// Reads an EXFOR-style table. `#` comments are skipped; every data line must
/// carry at least three numeric columns. Negative error columns are clamped
/// to zero, matching the reference normalization.
pub fn read_exfor_file(path: &Path) -> Result<MeasurementSeries> {
    let source = fs::read_to_string(path)?;
    let mut series = MeasurementSeries::default();

    for (index, line) in source.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let columns: Vec<f64> = trimmed
            .split_whitespace()
            .map(str::parse)
            .collect::<std::result::Result<_, _>>()
            .map_err(|error| Error::TableFormat {
                path: path.to_path_buf(),
                line: index + 1,
                reason: format!("non-numeric column: {error}"),
            })?;
        if columns.len() < 3 {
            return Err(Error::TableFormat {
                path: path.to_path_buf(),
                line: index + 1,
                reason: format!("expected 3 columns, got {}", columns.len()),
            });
        }
        series.energy_mev.push(columns[0]);
        series.sigma_mb.push(columns[1]);
        series.sigma_err_mb.push(columns[2].max(0.0));
    }

    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::read_exfor_file;
    use crate::domain::Error;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn three_column_tables_parse_with_error_clamping() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("g_O16_abs.txt");
        fs::write(&path, "# E sigma dsigma\n22.0 30.5 2.1\n24.0 28.0 -1.0\n").expect("write");

        let series = read_exfor_file(&path).expect("series");
        assert_eq!(series.len(), 2);
        assert_eq!(series.energy_mev, vec![22.0, 24.0]);
        assert_eq!(series.sigma_err_mb, vec![2.1, 0.0]);
    }

    #[test]
    fn short_rows_are_rejected_with_their_line_number() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("broken.txt");
        fs::write(&path, "22.0 30.5 2.1\n24.0 28.0\n").expect("write");

        let error = read_exfor_file(&path).expect_err("short row");
        match error {
            Error::TableFormat { line, reason, .. } => {
                assert_eq!(line, 2);
                assert!(reason.contains("3 columns"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
