//! TENDL-2023 tabulated nonelastic cross sections.
//!
//! Tables are fetched per nuclide from the TENDL gamma-file repository and
//! cached locally; a previously cached or locally supplied file bypasses the
//! network entirely. Unknown elements and non-success HTTP responses yield an
//! empty curve with a warning, matching the reference behavior.

use super::CrossSection;
use crate::common::nuclide::Nuclide;
use crate::domain::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

pub const TENDL_BASE_URL: &str = "https://tendl.web.psi.ch/tendl_2023/gamma_file";

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Remote table URL for a nuclide's nonelastic cross section.
pub fn table_url(nuclide: Nuclide) -> Result<String> {
    let symbol = nuclide.symbol()?;
    Ok(format!(
        "{TENDL_BASE_URL}/{symbol}/{symbol}{:03}/tables/xs/nonelastic.tot",
        nuclide.a
    ))
}

/// Parses TENDL table text: `#` comment lines are skipped, each remaining
/// line is read as whitespace-separated floats and contributes its first two
/// columns. Malformed lines are logged and skipped.
pub fn parse_table(source: &str) -> CrossSection {
    let mut energy_mev = Vec::new();
    let mut sigma_mb = Vec::new();

    for line in source.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let values: std::result::Result<Vec<f64>, _> =
            trimmed.split_whitespace().map(str::parse).collect();
        match values {
            Ok(values) if values.len() >= 2 => {
                energy_mev.push(values[0]);
                sigma_mb.push(values[1]);
            }
            Ok(_) => warn!(line = trimmed, "TENDL line has fewer than two columns"),
            Err(_) => warn!(line = trimmed, "invalid data found in line"),
        }
    }

    CrossSection::new(energy_mev, sigma_mb)
}

/// Reads and parses a locally stored TENDL table.
pub fn read_table_file(path: &Path) -> Result<CrossSection> {
    let source = fs::read_to_string(path)?;
    Ok(parse_table(&source))
}

/// Blocking TENDL client with a local file cache.
#[derive(Debug)]
pub struct TendlClient {
    client: reqwest::blocking::Client,
    cache_dir: Option<PathBuf>,
}

impl TendlClient {
    /// Client caching under `~/.cache/photodis` when a home directory exists.
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: build_http_client()?,
            cache_dir: default_cache_dir(),
        })
    }

    pub fn with_cache_dir(cache_dir: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            client: build_http_client()?,
            cache_dir: Some(cache_dir.into()),
        })
    }

    /// Client that never touches the filesystem.
    pub fn without_cache() -> Result<Self> {
        Ok(Self {
            client: build_http_client()?,
            cache_dir: None,
        })
    }

    /// Provider entry point: empty curve (with a warning) on unknown element
    /// or non-success HTTP status, error only on transport or I/O failure.
    pub fn fetch(&self, nuclide: Nuclide) -> Result<CrossSection> {
        match self.fetch_strict(nuclide) {
            Ok(curve) => Ok(curve),
            Err(Error::UnknownElement { z }) => {
                warn!(z, "element with atomic number not found");
                Ok(CrossSection::default())
            }
            Err(Error::HttpStatus { status, url }) => {
                warn!(status, %url, "failed to retrieve data");
                Ok(CrossSection::default())
            }
            Err(other) => Err(other),
        }
    }

    /// Like `fetch` but surfaces unknown elements and HTTP failures as
    /// errors. Used by the `fetch` subcommand.
    pub fn fetch_strict(&self, nuclide: Nuclide) -> Result<CrossSection> {
        if let Some(path) = self.cache_path(nuclide)
            && path.is_file()
        {
            return read_table_file(&path);
        }

        let url = table_url(nuclide)?;
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|source| Error::HttpTransport {
                url: url.clone(),
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                url,
            });
        }
        let body = response.text().map_err(|source| Error::HttpTransport {
            url: url.clone(),
            source,
        })?;

        if let Some(path) = self.cache_path(nuclide) {
            write_cache_file(&path, &body)?;
        }

        Ok(parse_table(&body))
    }

    /// Downloads the table into the cache and reports the local path.
    pub fn download(&self, nuclide: Nuclide) -> Result<PathBuf> {
        let path = self
            .cache_path(nuclide)
            .ok_or_else(|| Error::Io(std::io::Error::other("no cache directory configured")))?;
        if !path.is_file() {
            self.fetch_strict(nuclide)?;
        }
        Ok(path)
    }

    fn cache_path(&self, nuclide: Nuclide) -> Option<PathBuf> {
        let symbol = nuclide.symbol().ok()?;
        let dir = self.cache_dir.as_ref()?;
        Some(dir.join(format!("tendl2023_{symbol}{:03}_nonelastic.txt", nuclide.a)))
    }
}

fn build_http_client() -> Result<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(Error::HttpClient)
}

fn default_cache_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".cache").join("photodis"))
}

// Write via a temporary file so a failed download never leaves a truncated
// table behind.
fn write_cache_file(path: &Path, body: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, body)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
