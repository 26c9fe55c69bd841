//! Photon-bath number-density kernel.
//!
//! Closed form obtained by integrating the Planck occupation number over the
//! photon angle for a nucleus moving with Lorentz factor `gamma`:
//!
//! ```text
//! I(eps, gamma) = -(kB T) / (pi^2 (hbar c)^3) * ln(1 - exp(-eps / (2 gamma kB T)))
//! ```
//!
//! `eps` is the photon energy in the nucleus rest frame, in eV.

use crate::common::constants::{C_M_PER_S, HBAR_EV_S, KB_EV_PER_K, T_CMB_K};
use std::f64::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhotonBath {
    pub temperature_k: f64,
}

impl Default for PhotonBath {
    fn default() -> Self {
        Self::cmb()
    }
}

impl PhotonBath {
    /// The cosmic microwave background at the present epoch.
    pub const fn cmb() -> Self {
        Self {
            temperature_k: T_CMB_K,
        }
    }

    pub const fn new(temperature_k: f64) -> Self {
        Self { temperature_k }
    }

    /// Kernel value for rest-frame photon energy `energy_ev` (eV) and Lorentz
    /// factor `gamma`. Non-negative for positive arguments.
    pub fn number_density_kernel(&self, energy_ev: f64, gamma: f64) -> f64 {
        let kt = KB_EV_PER_K * self.temperature_k;
        let hbar_c = HBAR_EV_S * C_M_PER_S;
        // u > 0 keeps the log argument in (0, 1); deep underflow of exp(-u)
        // collapses the kernel to zero, which the integrator tolerates.
        let u = energy_ev / (2.0 * gamma * kt);
        -(kt / (PI * PI * hbar_c.powi(3))) * (1.0 - (-u).exp()).ln()
    }
}

#[cfg(test)]
mod tests {
    use super::PhotonBath;

    #[test]
    fn kernel_is_positive_for_physical_arguments() {
        let bath = PhotonBath::cmb();
        for energy_ev in [1.0e3, 1.0e5, 1.0e7] {
            for gamma in [1.0e8, 1.0e10, 1.0e12] {
                let value = bath.number_density_kernel(energy_ev, gamma);
                assert!(value >= 0.0, "eps={energy_ev} gamma={gamma} -> {value}");
                assert!(value.is_finite() || value == 0.0);
            }
        }
    }

    #[test]
    fn kernel_grows_with_lorentz_factor() {
        let bath = PhotonBath::cmb();
        let energy_ev = 2.0e7;
        let low = bath.number_density_kernel(energy_ev, 1.0e10);
        let high = bath.number_density_kernel(energy_ev, 1.0e11);
        assert!(high > low);
    }

    #[test]
    fn kernel_falls_with_rest_frame_energy() {
        let bath = PhotonBath::cmb();
        let gamma = 1.0e10;
        let soft = bath.number_density_kernel(1.0e6, gamma);
        let hard = bath.number_density_kernel(1.0e8, gamma);
        assert!(soft > hard);
    }

    #[test]
    fn hotter_bath_yields_larger_kernel() {
        let energy_ev = 2.0e7;
        let gamma = 1.0e10;
        let cold = PhotonBath::new(2.7).number_density_kernel(energy_ev, gamma);
        let hot = PhotonBath::new(5.4).number_density_kernel(energy_ev, gamma);
        assert!(hot > cold);
    }
}
