//! SimProp v2r4 "Model 4" parametric photodisintegration cross sections.
//!
//! Each (A, Z) row of the bundled parameter table carries, per ejectile
//! channel, a threshold, a Gaussian (height, centroid, squared width) valid up
//! to 30 MeV, and a constant plateau from 30 to 150 MeV.

use super::{Channel, CrossSection};
use crate::common::nuclide::Nuclide;
use crate::domain::{Error, Result};
use crate::numerics::logspace;

/// Gaussian-to-plateau crossover, MeV.
pub const PLATEAU_START_MEV: f64 = 30.0;
/// Upper end of the evaluation grid, MeV.
pub const GRID_MAX_MEV: f64 = 150.0;
/// Number of log-spaced grid points between 1 and `GRID_MAX_MEV`.
pub const GRID_POINTS: usize = 100;

const BUNDLED_TABLE: &str = include_str!("../../data/xsect_gauss2_talys.txt");

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitParameters {
    /// Reaction threshold, MeV.
    pub threshold: f64,
    /// Gaussian height, mb.
    pub height: f64,
    /// Gaussian centroid, MeV.
    pub centroid: f64,
    /// Squared Gaussian width, MeV^2.
    pub width_sq: f64,
    /// High-energy plateau, mb.
    pub plateau: f64,
}

impl FitParameters {
    fn from_columns(columns: &[f64]) -> Self {
        Self {
            threshold: columns[0],
            height: columns[1],
            centroid: columns[2],
            width_sq: columns[3],
            plateau: columns[4],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ParameterRow {
    a: u32,
    z: u32,
    nucleon: FitParameters,
    alpha: FitParameters,
}

/// Parsed v2r4 parameter table with per-nuclide lookup.
#[derive(Debug, Clone)]
pub struct V2r4Table {
    rows: Vec<ParameterRow>,
}

impl V2r4Table {
    /// Parses the table bundled with the crate.
    pub fn bundled() -> Result<Self> {
        Self::from_source(BUNDLED_TABLE)
    }

    /// Parses a table in the original 12-column layout; `#` lines and blank
    /// lines are skipped.
    pub fn from_source(source: &str) -> Result<Self> {
        let mut rows = Vec::new();
        for (index, line) in source.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let columns: Vec<f64> = trimmed
                .split_whitespace()
                .map(str::parse)
                .collect::<std::result::Result<_, _>>()
                .map_err(|error| Error::ParameterTable {
                    line: index + 1,
                    reason: format!("non-numeric column: {error}"),
                })?;
            if columns.len() != 12 {
                return Err(Error::ParameterTable {
                    line: index + 1,
                    reason: format!("expected 12 columns, got {}", columns.len()),
                });
            }
            rows.push(ParameterRow {
                a: columns[0] as u32,
                z: columns[1] as u32,
                nucleon: FitParameters::from_columns(&columns[2..7]),
                alpha: FitParameters::from_columns(&columns[7..12]),
            });
        }
        Ok(Self { rows })
    }

    /// Nuclides present in the table, in row order.
    pub fn nuclides(&self) -> impl Iterator<Item = Nuclide> + '_ {
        self.rows.iter().map(|row| Nuclide::new(row.a, row.z))
    }

    pub fn parameters(&self, nuclide: Nuclide, channel: Channel) -> Result<FitParameters> {
        let row = self.row(nuclide)?;
        Ok(match channel {
            Channel::Nucleon => row.nucleon,
            Channel::Alpha => row.alpha,
        })
    }

    /// Cross-section curve for one ejectile channel on the shared log grid.
    pub fn evaluate(&self, nuclide: Nuclide, channel: Channel) -> Result<CrossSection> {
        let parameters = self.parameters(nuclide, channel)?;
        let energy_mev = energy_grid();
        let sigma_mb = energy_mev
            .iter()
            .map(|&eps| evaluate_at(&parameters, eps))
            .collect();
        Ok(CrossSection::new(energy_mev, sigma_mb))
    }

    /// Pointwise sum of the nucleon and alpha channels; the curve the
    /// interaction-length integrand consumes.
    pub fn channel_sum(&self, nuclide: Nuclide) -> Result<CrossSection> {
        let nucleon = self.evaluate(nuclide, Channel::Nucleon)?;
        let alpha = self.evaluate(nuclide, Channel::Alpha)?;
        let sigma_mb = nucleon
            .sigma_mb
            .iter()
            .zip(&alpha.sigma_mb)
            .map(|(n, a)| n + a)
            .collect();
        Ok(CrossSection::new(nucleon.energy_mev, sigma_mb))
    }

    fn row(&self, nuclide: Nuclide) -> Result<&ParameterRow> {
        self.rows
            .iter()
            .find(|row| row.a == nuclide.a && row.z == nuclide.z)
            .ok_or(Error::NoParameters {
                a: nuclide.a,
                z: nuclide.z,
            })
    }
}

/// The shared evaluation grid: 100 log-spaced points over 1..=150 MeV.
pub fn energy_grid() -> Vec<f64> {
    logspace(0.0, GRID_MAX_MEV.log10(), GRID_POINTS)
}

/// Analytic fit value at rest-frame photon energy `energy_mev`.
pub fn evaluate_at(parameters: &FitParameters, energy_mev: f64) -> f64 {
    if energy_mev > parameters.threshold && energy_mev < PLATEAU_START_MEV {
        let offset = energy_mev - parameters.centroid;
        parameters.height * (-offset * offset / parameters.width_sq).exp()
    } else if energy_mev > PLATEAU_START_MEV && energy_mev < GRID_MAX_MEV {
        parameters.plateau
    } else {
        0.0
    }
}
