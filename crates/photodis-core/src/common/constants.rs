//! Physical constants shared across the interaction-length pipeline.
//!
//! All unit conversions go through the named constants below so that no
//! module carries ad hoc literal factors.

/// Speed of light, m/s.
pub const C_M_PER_S: f64 = 299_792_458.0;
/// Reduced Planck constant, eV s.
pub const HBAR_EV_S: f64 = 6.582_122_0e-16;
/// Boltzmann constant, eV/K.
pub const KB_EV_PER_K: f64 = 8.617_330_3e-5;
/// CMB temperature today, K.
pub const T_CMB_K: f64 = 2.7;

/// One millibarn, m^2.
pub const MBARN_M2: f64 = 1.0e-31;
/// One megaparsec, m.
pub const MPC_M: f64 = 3.086e22;
/// One kilometre, m.
pub const KM_M: f64 = 1.0e3;
/// One MeV, eV.
pub const EV_PER_MEV: f64 = 1.0e6;

/// Nucleon rest-mass scale used for the tabulated energy axis, eV.
pub const NUCLEON_MASS_EV: f64 = 1.0e9;
/// Hubble constant, 1/s.
pub const H0_PER_S: f64 = 70.0 * KM_M / MPC_M;

/// Adiabatic-loss horizon `c / H0`, Mpc. Reference line in the length plots.
pub fn adiabatic_length_mpc() -> f64 {
    C_M_PER_S / H0_PER_S / MPC_M
}
