//! Nuclide identity and the element-symbol lookup keyed by atomic number.

use crate::domain::{Error, Result};
use std::fmt::{Display, Formatter};

const ELEMENT_SYMBOLS: [&str; 82] = [
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al", "Si", "P", "S", "Cl",
    "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge", "As",
    "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In",
    "Sn", "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd", "Tb",
    "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg", "Tl",
    "Pb",
];

pub fn element_symbol(z: u32) -> Result<&'static str> {
    if z == 0 || z as usize > ELEMENT_SYMBOLS.len() {
        return Err(Error::UnknownElement { z });
    }
    Ok(ELEMENT_SYMBOLS[z as usize - 1])
}

/// A nuclide identified by mass number `A` and atomic number `Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Nuclide {
    pub a: u32,
    pub z: u32,
}

impl Nuclide {
    pub const fn new(a: u32, z: u32) -> Self {
        Self { a, z }
    }

    pub fn symbol(&self) -> Result<&'static str> {
        element_symbol(self.z)
    }

    /// Human-readable label, e.g. `56Fe`.
    pub fn label(&self) -> Result<String> {
        Ok(format!("{}{}", self.a, self.symbol()?))
    }

    /// Zero-padded tag used in result file names, e.g. `A056Z026`.
    pub fn file_tag(&self) -> String {
        format!("A{:03}Z{:03}", self.a, self.z)
    }
}

impl Display for Nuclide {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.symbol() {
            Ok(symbol) => write!(f, "{}{}", self.a, symbol),
            Err(_) => write!(f, "A{}Z{}", self.a, self.z),
        }
    }
}
