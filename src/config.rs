use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LoadError, Result};

/// Response file used when no path is supplied.
pub const DEFAULT_API_RESPONSE_FILE: &str = "api_response.json";
/// Reference workbook used when no path is supplied.
pub const DEFAULT_REFERENCE_DATA_FILE: &str = "reference_data.xlsx";

/// Locations of the two inputs merged by [`load`](crate::loader::load).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// JSON document holding the captured API response.
    pub api_response_file: PathBuf,
    /// Workbook holding the editorial reference sheets.
    pub reference_data_file: PathBuf,
}

impl LoaderConfig {
    pub fn new(api_response_file: impl Into<PathBuf>, reference_data_file: impl Into<PathBuf>) -> Self {
        Self {
            api_response_file: api_response_file.into(),
            reference_data_file: reference_data_file.into(),
        }
    }

    /// Reads a configuration previously serialised as JSON.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(LoadError::MissingInput(path.to_path_buf()));
        }
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_RESPONSE_FILE, DEFAULT_REFERENCE_DATA_FILE)
    }
}
