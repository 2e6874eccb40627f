//! File layout descriptions for the GDP and country-code tables
//!
//! Both are plain JSON documents so a run can be pointed at a different
//! data drop without recompiling.

use crate::error::{Error, Result};
use crate::table::Dialect;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Where the GDP table lives and how to read it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GdpInfo {
    /// Path to the GDP CSV file
    pub gdpfile: PathBuf,
    pub separator: char,
    pub quote: char,
    /// First year included in XY plots
    pub min_year: i32,
    /// Last year included in XY plots (inclusive)
    pub max_year: i32,
    /// Column holding the country display name
    pub country_name: String,
    /// Column holding the country code
    pub country_code: String,
}

impl GdpInfo {
    pub fn dialect(&self) -> Dialect {
        Dialect::new(self.separator, self.quote)
    }

    /// Load from JSON
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        load_json(path.as_ref())
    }

    /// Save as JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

impl Default for GdpInfo {
    fn default() -> Self {
        Self {
            gdpfile: PathBuf::from("isp_gdp.csv"),
            separator: ',',
            quote: '"',
            min_year: 1960,
            max_year: 2015,
            country_name: "Country Name".to_string(),
            country_code: "Country Code".to_string(),
        }
    }
}

/// Where the plot-code to data-code table lives and which columns to join
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeInfo {
    /// Path to the country code CSV file
    pub codefile: PathBuf,
    pub separator: char,
    pub quote: char,
    /// Column holding the codes used by the chart renderer
    pub plot_codes: String,
    /// Column holding the codes used by the GDP data
    pub data_codes: String,
}

impl CodeInfo {
    pub fn dialect(&self) -> Dialect {
        Dialect::new(self.separator, self.quote)
    }

    /// Load from JSON
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        load_json(path.as_ref())
    }

    /// Save as JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

impl Default for CodeInfo {
    fn default() -> Self {
        Self {
            codefile: PathBuf::from("isp_country_codes.csv"),
            separator: ',',
            quote: '"',
            plot_codes: "ISO3166-1-Alpha-2".to_string(),
            data_codes: "ISO3166-1-Alpha-3".to_string(),
        }
    }
}

fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(Error::Json)
}
