use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::data::filter::MAX_K;
use crate::error::ConfigError;
use crate::scale::AxisSpec;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV: &str = "KNN_SCATTER_CONFIG";

// ---------------------------------------------------------------------------
// Explorer configuration
// ---------------------------------------------------------------------------

/// Settings for the explorer. Every field has a default, so a config file
/// only needs the keys it changes:
///
/// ```json
/// { "dataset": "data/roster.csv", "default_k": 5 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// File path or http(s) URL of the dataset.
    pub dataset: String,
    /// Largest k offered, before the subset-size bound.
    pub max_k: usize,
    pub default_k: usize,
    /// Initial query on the x axis.
    pub default_query: f64,
    pub x_axis: AxisSpec,
    pub y_axis: AxisSpec,
    /// Axis titles drawn on the plot.
    pub x_title: String,
    pub y_title: String,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            dataset: "mercyhurst_lacrosse.csv".to_string(),
            max_k: MAX_K,
            default_k: 3,
            default_query: 0.0,
            x_axis: AxisSpec::X_DEFAULT,
            y_axis: AxisSpec::Y_DEFAULT,
            x_title: "Shots".to_string(),
            y_title: "Goals".to_string(),
            window_width: 1000.0,
            window_height: 680.0,
        }
    }
}

impl ExplorerConfig {
    /// Read a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the file named by [`CONFIG_ENV`], or defaults when it is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => {
                let path = PathBuf::from(path);
                log::info!("Reading config from {}", path.display());
                Self::load(&path)
            }
            None => Ok(Self::default()),
        }
    }
}
