//! Shared error type and result alias for the photodisintegration pipeline.

use crate::numerics::QuadratureError;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no element symbol for atomic number Z = {z}")]
    UnknownElement { z: u32 },

    #[error("no data found for A = {a} and Z = {z}")]
    NoParameters { a: u32, z: u32 },

    #[error("invalid particle channel '{0}', expected 'N' or 'alpha'")]
    UnknownChannel(String),

    #[error("unknown cross-section model '{0}', expected 'v2r4' or 'TENDL-2023'")]
    UnknownModel(String),

    #[error("cross section for A = {a}, Z = {z} has no positive support under model '{model}'")]
    EmptyCrossSection { a: u32, z: u32, model: &'static str },

    #[error("Lorentz factor must be finite and positive, got {0}")]
    InvalidLorentzFactor(f64),

    #[error("parameter table line {line}: {reason}")]
    ParameterTable { line: usize, reason: String },

    #[error("table file {path}: line {line}: {reason}")]
    TableFormat {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("interaction-length tables in {dir} have mismatched energy grids for A = {a}, Z = {z}")]
    GridMismatch { dir: PathBuf, a: u32, z: u32 },

    #[error("failed to retrieve data: {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("HTTP request for {url} failed: {source}")]
    HttpTransport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error(transparent)]
    Quadrature(#[from] QuadratureError),

    #[error("plot rendering failed: {0}")]
    Plot(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
