//! Sweep orchestration: result-table files, model differences, and the
//! JSON sweep configuration.
//!
//! File formats follow the reference runs: two tab-separated columns in
//! `{:.15e}` scientific notation, one file per (nuclide, model) pair named
//! `interactionLength_A{A:03}Z{Z:03}_{model}.dat`.

use crate::common::nuclide::Nuclide;
use crate::domain::{Error, Result};
use crate::length::{LengthCalculator, LengthTable};
use crate::serialization::{format_sci_f64, format_table_rows, write_text_artifact};
use crate::xsection::XsModel;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// The benchmark nuclei of the reference runs.
pub const DEFAULT_NUCLIDES: [Nuclide; 5] = [
    Nuclide::new(14, 7),
    Nuclide::new(16, 8),
    Nuclide::new(28, 14),
    Nuclide::new(56, 26),
    Nuclide::new(195, 78),
];

pub fn length_table_path(dir: &Path, nuclide: Nuclide, model: XsModel) -> PathBuf {
    dir.join(format!(
        "interactionLength_{}_{}.dat",
        nuclide.file_tag(),
        model.as_str()
    ))
}

pub fn difference_path(dir: &Path, nuclide: Nuclide) -> PathBuf {
    dir.join(format!(
        "interactionLengthDifferences_{}.dat",
        nuclide.file_tag()
    ))
}

pub fn difference_percentage_path(dir: &Path, nuclide: Nuclide) -> PathBuf {
    dir.join(format!(
        "interactionLengthDifferencePercentages_{}.dat",
        nuclide.file_tag()
    ))
}

/// Writes one sweep table and reports its path.
pub fn write_length_table(
    dir: &Path,
    nuclide: Nuclide,
    model: XsModel,
    table: &LengthTable,
) -> Result<PathBuf> {
    let rows: Vec<(f64, f64)> = table
        .energy_ev
        .iter()
        .copied()
        .zip(table.length_mpc.iter().copied())
        .collect();
    let path = length_table_path(dir, nuclide, model);
    write_text_artifact(&path, &format_table_rows(&rows))?;
    Ok(path)
}

/// Reads a sweep table back; `#` comment lines are tolerated.
pub fn read_length_table(path: &Path) -> Result<LengthTable> {
    let source = fs::read_to_string(path)?;
    let mut energy_ev = Vec::new();
    let mut length_mpc = Vec::new();
    for (index, line) in source.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let mut columns = trimmed.split_whitespace();
        let (Some(energy), Some(length)) = (columns.next(), columns.next()) else {
            return Err(Error::TableFormat {
                path: path.to_path_buf(),
                line: index + 1,
                reason: "expected two columns".to_string(),
            });
        };
        let parse = |field: &str| -> Result<f64> {
            if field == "NaN" {
                return Ok(f64::NAN);
            }
            field.parse().map_err(|error| Error::TableFormat {
                path: path.to_path_buf(),
                line: index + 1,
                reason: format!("non-numeric column: {error}"),
            })
        };
        energy_ev.push(parse(energy)?);
        length_mpc.push(parse(length)?);
    }
    Ok(LengthTable {
        energy_ev,
        length_mpc,
    })
}

/// Runs the sweep for every (nuclide, model) combination and writes the
/// tables under `out_dir`. Returns the written paths.
pub fn run_sweeps(
    calculator: &LengthCalculator,
    nuclides: &[Nuclide],
    models: &[XsModel],
    out_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for &nuclide in nuclides {
        for &model in models {
            info!(%nuclide, %model, "running interaction-length sweep");
            let table = calculator.sweep(nuclide, model)?;
            written.push(write_length_table(out_dir, nuclide, model, &table)?);
        }
    }
    Ok(written)
}

/// Absolute difference `|lambda_v2r4 - lambda_TENDL|` per energy bin, from
/// previously written sweep tables.
pub fn write_difference_table(dir: &Path, nuclide: Nuclide) -> Result<PathBuf> {
    let (energy_ev, v2r4, tendl) = load_model_pair(dir, nuclide)?;
    let rows: Vec<(f64, f64)> = energy_ev
        .iter()
        .zip(v2r4.iter().zip(&tendl))
        .map(|(&energy, (&a, &b))| (energy, (a - b).abs()))
        .collect();
    let path = difference_path(dir, nuclide);
    write_text_artifact(&path, &format_table_rows(&rows))?;
    Ok(path)
}

/// Percentage relative difference against the TENDL-2023 reference; bins with
/// a non-finite ratio are written as the `NaN` literal.
pub fn write_difference_percentage_table(dir: &Path, nuclide: Nuclide) -> Result<PathBuf> {
    let (energy_ev, v2r4, tendl) = load_model_pair(dir, nuclide)?;
    let mut content = String::new();
    for ((&energy, &a), &b) in energy_ev.iter().zip(&v2r4).zip(&tendl) {
        let relative = (a - b).abs() / b;
        content.push_str(&format_sci_f64(energy));
        content.push('\t');
        if relative.is_finite() {
            content.push_str(&format_sci_f64(relative * 1.0e2));
        } else {
            content.push_str("NaN");
        }
        content.push('\n');
    }
    let path = difference_percentage_path(dir, nuclide);
    write_text_artifact(&path, &content)?;
    Ok(path)
}

fn load_model_pair(dir: &Path, nuclide: Nuclide) -> Result<(Vec<f64>, Vec<f64>, Vec<f64>)> {
    let v2r4 = read_length_table(&length_table_path(dir, nuclide, XsModel::V2r4))?;
    let tendl = read_length_table(&length_table_path(dir, nuclide, XsModel::Tendl2023))?;
    if v2r4.len() != tendl.len() {
        return Err(Error::GridMismatch {
            dir: dir.to_path_buf(),
            a: nuclide.a,
            z: nuclide.z,
        });
    }
    Ok((v2r4.energy_ev, v2r4.length_mpc, tendl.length_mpc))
}

/// JSON sweep configuration consumed by the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    pub nuclides: Vec<NuclideSpec>,
    pub models: Vec<String>,
    #[serde(default)]
    pub out_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NuclideSpec {
    pub a: u32,
    pub z: u32,
}

impl From<NuclideSpec> for Nuclide {
    fn from(spec: NuclideSpec) -> Self {
        Nuclide::new(spec.a, spec.z)
    }
}

impl SweepConfig {
    pub fn from_json(source: &str) -> Result<Self> {
        serde_json::from_str(source).map_err(|error| Error::TableFormat {
            path: PathBuf::from("<sweep config>"),
            line: error.line(),
            reason: error.to_string(),
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)?;
        let mut config = Self::from_json(&source)?;
        if config.out_dir.is_none() {
            config.out_dir = path.parent().map(Path::to_path_buf);
        }
        Ok(config)
    }

    pub fn models(&self) -> Result<Vec<XsModel>> {
        self.models.iter().map(|name| name.parse()).collect()
    }

    pub fn nuclides(&self) -> Vec<Nuclide> {
        self.nuclides.iter().copied().map(Nuclide::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{
        SweepConfig, difference_percentage_path, length_table_path, read_length_table,
        write_difference_percentage_table, write_length_table,
    };
    use crate::common::nuclide::Nuclide;
    use crate::domain::Error;
    use crate::length::LengthTable;
    use crate::xsection::XsModel;
    use std::fs;
    use tempfile::TempDir;

    fn sample_table(lengths: &[f64]) -> LengthTable {
        LengthTable {
            energy_ev: (0..lengths.len()).map(|i| 1.0e19 * (i + 1) as f64).collect(),
            length_mpc: lengths.to_vec(),
        }
    }

    #[test]
    fn length_tables_round_trip_through_the_dat_format() {
        let temp = TempDir::new().expect("tempdir");
        let nuclide = Nuclide::new(56, 26);
        let table = sample_table(&[123.456, 78.9, 0.001]);

        let path = write_length_table(temp.path(), nuclide, XsModel::V2r4, &table)
            .expect("write table");
        assert_eq!(path, length_table_path(temp.path(), nuclide, XsModel::V2r4));
        assert!(
            path.file_name()
                .and_then(|name| name.to_str())
                .expect("file name")
                .starts_with("interactionLength_A056Z026_v2r4")
        );

        let read_back = read_length_table(&path).expect("read table");
        assert_eq!(read_back.len(), table.len());
        for i in 0..table.len() {
            let energy_diff = (read_back.energy_ev[i] - table.energy_ev[i]).abs();
            let length_diff = (read_back.length_mpc[i] - table.length_mpc[i]).abs();
            assert!(energy_diff <= 1.0e-14 * table.energy_ev[i].abs());
            assert!(length_diff <= 1.0e-14 * table.length_mpc[i].abs());
        }
    }

    #[test]
    fn difference_percentages_use_the_tendl_reference_and_nan_rule() {
        let temp = TempDir::new().expect("tempdir");
        let nuclide = Nuclide::new(16, 8);
        write_length_table(
            temp.path(),
            nuclide,
            XsModel::V2r4,
            &sample_table(&[150.0, 10.0]),
        )
        .expect("v2r4 table");
        write_length_table(
            temp.path(),
            nuclide,
            XsModel::Tendl2023,
            &sample_table(&[100.0, 0.0]),
        )
        .expect("tendl table");

        let path = write_difference_percentage_table(temp.path(), nuclide).expect("differences");
        assert_eq!(path, difference_percentage_path(temp.path(), nuclide));
        let content = fs::read_to_string(&path).expect("readable");
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        // |150 - 100| / 100 * 100 = 50 %
        assert!(lines[0].split('\t').nth(1).expect("column").starts_with("5.0"));
        // zero reference divides to infinity, written as NaN
        assert_eq!(lines[1].split('\t').nth(1), Some("NaN"));
    }

    #[test]
    fn mismatched_grids_are_rejected() {
        let temp = TempDir::new().expect("tempdir");
        let nuclide = Nuclide::new(16, 8);
        write_length_table(temp.path(), nuclide, XsModel::V2r4, &sample_table(&[1.0]))
            .expect("v2r4 table");
        write_length_table(
            temp.path(),
            nuclide,
            XsModel::Tendl2023,
            &sample_table(&[1.0, 2.0]),
        )
        .expect("tendl table");

        let error = write_difference_percentage_table(temp.path(), nuclide).expect_err("mismatch");
        assert!(matches!(error, Error::GridMismatch { .. }));
    }

    #[test]
    fn malformed_result_files_report_path_and_line() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("broken.dat");
        fs::write(&path, "1.0e19\t2.0\nonly-one-column-and-not-a-number\n").expect("write");
        let error = read_length_table(&path).expect_err("malformed");
        match error {
            Error::TableFormat { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn sweep_config_parses_nuclides_and_models() {
        let config = SweepConfig::from_json(
            r#"{
                "nuclides": [{"a": 56, "z": 26}, {"a": 16, "z": 8}],
                "models": ["v2r4", "TENDL-2023"]
            }"#,
        )
        .expect("config");
        assert_eq!(config.nuclides().len(), 2);
        assert_eq!(
            config.models().expect("models"),
            vec![XsModel::V2r4, XsModel::Tendl2023]
        );
    }

    #[test]
    fn sweep_config_rejects_unknown_models() {
        let config = SweepConfig::from_json(
            r#"{"nuclides": [{"a": 16, "z": 8}], "models": ["v2r5"]}"#,
        )
        .expect("config");
        let error = config.models().expect_err("unknown model");
        assert!(matches!(error, Error::UnknownModel(name) if name == "v2r5"));
    }
}
