//! Interaction-length computation.
//!
//! For a nucleus of mass number `A` at Lorentz factor `gamma` in a thermal
//! photon bath, the interaction rate is
//!
//! ```text
//! R = integral over eps of  A c / (2 gamma^2) * eps * sigma(eps) * I(eps, gamma)  d eps
//! ```
//!
//! with `eps` the rest-frame photon energy and `I` the bath kernel. The
//! interaction length is `c / R`, reported in Mpc. Curves arrive in MeV/mb
//! and are converted to eV/m^2 here, at exactly one site.

use crate::bath::PhotonBath;
use crate::common::constants::{C_M_PER_S, EV_PER_MEV, MBARN_M2, MPC_M, NUCLEON_MASS_EV};
use crate::common::nuclide::Nuclide;
use crate::domain::{Error, Result};
use crate::numerics::{integrate_simpson, logspace};
use crate::xsection::tendl::TendlClient;
use crate::xsection::v2r4::V2r4Table;
use crate::xsection::{CrossSection, XsModel};
use tracing::debug;

/// Decade range of the Lorentz-factor sweep before division by `A`.
pub const SWEEP_EXPONENT_RANGE: (f64, f64) = (10.0, 13.0);
/// Number of sweep grid points.
pub const SWEEP_POINTS: usize = 50;

/// Resolves cross-section curves and integrates interaction lengths.
#[derive(Debug)]
pub struct LengthCalculator {
    bath: PhotonBath,
    v2r4: V2r4Table,
    tendl: TendlClient,
}

impl LengthCalculator {
    /// Bundled v2r4 table, default TENDL cache, CMB bath.
    pub fn new() -> Result<Self> {
        Ok(Self {
            bath: PhotonBath::cmb(),
            v2r4: V2r4Table::bundled()?,
            tendl: TendlClient::new()?,
        })
    }

    pub fn with_parts(bath: PhotonBath, v2r4: V2r4Table, tendl: TendlClient) -> Self {
        Self { bath, v2r4, tendl }
    }

    pub fn v2r4_table(&self) -> &V2r4Table {
        &self.v2r4
    }

    pub fn tendl_client(&self) -> &TendlClient {
        &self.tendl
    }

    /// Model-dispatched cross-section curve for a nuclide: v2r4 is the
    /// nucleon + alpha channel sum, TENDL-2023 the tabulated nonelastic
    /// curve.
    pub fn cross_section(&self, nuclide: Nuclide, model: XsModel) -> Result<CrossSection> {
        match model {
            XsModel::V2r4 => self.v2r4.channel_sum(nuclide),
            XsModel::Tendl2023 => self.tendl.fetch(nuclide),
        }
    }

    /// Interaction length in Mpc for one (nuclide, gamma, model) triple.
    pub fn interaction_length(&self, nuclide: Nuclide, gamma: f64, model: XsModel) -> Result<f64> {
        let curve = self.cross_section(nuclide, model)?;
        self.interaction_length_from_curve(nuclide, gamma, model, &curve)
    }

    /// Integrates a pre-resolved curve; sweeps use this to resolve the curve
    /// once instead of once per grid point.
    pub fn interaction_length_from_curve(
        &self,
        nuclide: Nuclide,
        gamma: f64,
        model: XsModel,
        curve: &CrossSection,
    ) -> Result<f64> {
        if !gamma.is_finite() || gamma <= 0.0 {
            return Err(Error::InvalidLorentzFactor(gamma));
        }

        let filtered = curve.filter_positive();
        if filtered.len() < 2 {
            return Err(Error::EmptyCrossSection {
                a: nuclide.a,
                z: nuclide.z,
                model: model.as_str(),
            });
        }

        let a = f64::from(nuclide.a);
        let prefactor = a * C_M_PER_S / (2.0 * gamma * gamma);
        let mut energy_ev = Vec::with_capacity(filtered.len());
        let mut integrand = Vec::with_capacity(filtered.len());
        for (eps_mev, sigma_mb) in filtered.energy_mev.iter().zip(&filtered.sigma_mb) {
            let eps_ev = eps_mev * EV_PER_MEV;
            let sigma_m2 = sigma_mb * MBARN_M2;
            let kernel = self.bath.number_density_kernel(eps_ev, gamma);
            energy_ev.push(eps_ev);
            integrand.push(prefactor * eps_ev * sigma_m2 * kernel);
        }

        let rate = integrate_simpson(&energy_ev, &integrand)?;
        debug!(%nuclide, gamma, %model, rate, "interaction rate integrated");

        // A vanishing rate means the bath cannot excite the nucleus at this
        // Lorentz factor; the interaction length is unbounded.
        if rate <= 0.0 {
            return Ok(f64::INFINITY);
        }
        Ok(C_M_PER_S / rate / MPC_M)
    }

    /// Full sweep over the Lorentz grid for one (nuclide, model) pair.
    pub fn sweep(&self, nuclide: Nuclide, model: XsModel) -> Result<LengthTable> {
        let curve = self.cross_section(nuclide, model)?;
        let a = f64::from(nuclide.a);
        let gammas = lorentz_grid(nuclide.a);

        let mut energy_ev = Vec::with_capacity(gammas.len());
        let mut length_mpc = Vec::with_capacity(gammas.len());
        for gamma in gammas {
            let length = self.interaction_length_from_curve(nuclide, gamma, model, &curve)?;
            energy_ev.push(gamma * a * NUCLEON_MASS_EV);
            length_mpc.push(length);
        }

        Ok(LengthTable {
            energy_ev,
            length_mpc,
        })
    }
}

/// Tabulated interaction lengths over the total-energy axis.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LengthTable {
    /// Total nucleus energy, eV.
    pub energy_ev: Vec<f64>,
    /// Interaction length, Mpc.
    pub length_mpc: Vec<f64>,
}

impl LengthTable {
    pub fn len(&self) -> usize {
        self.energy_ev.len()
    }

    pub fn is_empty(&self) -> bool {
        self.energy_ev.is_empty()
    }
}

/// Per-nucleus Lorentz grid: `logspace(10, 13, 50) / A`.
pub fn lorentz_grid(a: u32) -> Vec<f64> {
    let (start, end) = SWEEP_EXPONENT_RANGE;
    logspace(start, end, SWEEP_POINTS)
        .into_iter()
        .map(|gamma| gamma / f64::from(a))
        .collect()
}
