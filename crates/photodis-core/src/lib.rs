//! Photodisintegration cross-sections and interaction lengths for nuclei
//! propagating through the cosmic microwave background.
//!
//! Two interchangeable cross-section sources (the SimProp v2r4 parametric
//! fit and TENDL-2023 tabulated data) feed a single pipeline: photon-bath
//! kernel, Simpson quadrature over the cross-section support, and sweeps
//! over a Lorentz-factor grid that produce the result tables and figures.

pub mod bath;
pub mod common;
pub mod domain;
pub mod length;
pub mod measurements;
pub mod numerics;
pub mod plot;
pub mod serialization;
pub mod sweep;
pub mod xsection;

pub use bath::PhotonBath;
pub use common::nuclide::Nuclide;
pub use domain::{Error, Result};
pub use length::{LengthCalculator, LengthTable};
pub use xsection::{Channel, CrossSection, XsModel};
