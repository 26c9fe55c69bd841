//! Cross-section curves and the two interchangeable data sources.

pub mod tendl;
pub mod v2r4;

use crate::domain::{Error, Result};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Cross-section data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XsModel {
    /// SimProp v2r4 "Model 4" parametric Gaussian fit.
    V2r4,
    /// TENDL-2023 tabulated nonelastic cross sections.
    Tendl2023,
}

impl XsModel {
    pub const ALL: [XsModel; 2] = [XsModel::V2r4, XsModel::Tendl2023];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V2r4 => "v2r4",
            Self::Tendl2023 => "TENDL-2023",
        }
    }
}

impl Display for XsModel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

impl FromStr for XsModel {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "v2r4" => Ok(Self::V2r4),
            "TENDL-2023" => Ok(Self::Tendl2023),
            other => Err(Error::UnknownModel(other.to_string())),
        }
    }
}

/// Ejectile channel of the v2r4 parameterization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Single-nucleon emission.
    Nucleon,
    /// Alpha emission.
    Alpha,
}

impl Channel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nucleon => "N",
            Self::Alpha => "alpha",
        }
    }
}

impl Display for Channel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

impl FromStr for Channel {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "N" => Ok(Self::Nucleon),
            "alpha" => Ok(Self::Alpha),
            other => Err(Error::UnknownChannel(other.to_string())),
        }
    }
}

/// Paired photon-energy / cross-section arrays.
///
/// Energies are photon energies in the nucleus rest frame in MeV, cross
/// sections in millibarn. Conversions to SI happen once, inside the
/// interaction-length integrand.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CrossSection {
    pub energy_mev: Vec<f64>,
    pub sigma_mb: Vec<f64>,
}

impl CrossSection {
    pub fn new(energy_mev: Vec<f64>, sigma_mb: Vec<f64>) -> Self {
        debug_assert_eq!(energy_mev.len(), sigma_mb.len());
        Self {
            energy_mev,
            sigma_mb,
        }
    }

    pub fn len(&self) -> usize {
        self.energy_mev.len()
    }

    pub fn is_empty(&self) -> bool {
        self.energy_mev.is_empty()
    }

    /// Drops every sample with a non-positive cross section. The result has
    /// equal-length arrays and strictly positive `sigma_mb` values.
    pub fn filter_positive(&self) -> CrossSection {
        let mut energy_mev = Vec::with_capacity(self.len());
        let mut sigma_mb = Vec::with_capacity(self.len());
        for (energy, sigma) in self.energy_mev.iter().zip(&self.sigma_mb) {
            if *sigma > 0.0 {
                energy_mev.push(*energy);
                sigma_mb.push(*sigma);
            }
        }
        CrossSection {
            energy_mev,
            sigma_mb,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Channel, CrossSection, XsModel};
    use crate::domain::Error;

    #[test]
    fn model_names_round_trip() {
        for model in XsModel::ALL {
            let parsed: XsModel = model.as_str().parse().expect("known name");
            assert_eq!(parsed, model);
        }
    }

    #[test]
    fn unknown_model_name_is_reported_verbatim() {
        let error = "tendl-2023".parse::<XsModel>().expect_err("case-sensitive");
        match error {
            Error::UnknownModel(name) => assert_eq!(name, "tendl-2023"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn channel_names_round_trip() {
        for channel in [Channel::Nucleon, Channel::Alpha] {
            let parsed: Channel = channel.as_str().parse().expect("known name");
            assert_eq!(parsed, channel);
        }
        assert!(matches!(
            "proton".parse::<Channel>(),
            Err(Error::UnknownChannel(_))
        ));
    }

    #[test]
    fn filter_positive_keeps_only_positive_pairs() {
        let curve = CrossSection::new(
            vec![1.0, 2.0, 3.0, 4.0, 5.0],
            vec![0.0, 1.5, -0.2, 2.5, 0.0],
        );
        let filtered = curve.filter_positive();
        assert_eq!(filtered.energy_mev, vec![2.0, 4.0]);
        assert_eq!(filtered.sigma_mb, vec![1.5, 2.5]);
        assert_eq!(filtered.energy_mev.len(), filtered.sigma_mb.len());
        assert!(filtered.sigma_mb.iter().all(|sigma| *sigma > 0.0));
    }

    #[test]
    fn filter_positive_of_empty_curve_is_empty() {
        assert!(CrossSection::default().filter_positive().is_empty());
    }
}
