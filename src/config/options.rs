// src/config/options.rs
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::consts::*;
use crate::error::{ReportError, Result};

/// Whole `config.json`: connection parameters plus report defaults.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub report: ReportSettings,
}

/// Connection parameters. Opaque to everything except `store`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSettings {
    #[serde(alias = "google_analytics_property_code")]
    pub ga_property_code: String,
    pub css_directory: String,
    pub css_filename: String,
    pub output_directory: String,
    pub output_filename: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            ga_property_code: String::new(),
            css_directory: format!("./{DEFAULT_CSS_DIR}"),
            css_filename: DEFAULT_CSS_FILE.to_string(),
            output_directory: format!("./{DEFAULT_OUT_DIR}"),
            output_filename: DEFAULT_OUT_FILE.to_string(),
        }
    }
}

impl ReportSettings {
    pub fn output_dir(&self) -> PathBuf {
        PathBuf::from(&self.output_directory)
    }

    /// `<output_directory>/<output_filename>`
    pub fn output_path(&self) -> PathBuf {
        self.output_dir().join(&self.output_filename)
    }

    /// `<css_directory>/<css_filename>`
    pub fn css_source(&self) -> PathBuf {
        PathBuf::from(&self.css_directory).join(&self.css_filename)
    }
}

/// Command-line overrides. `None` means the flag was not given.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReportOverrides {
    pub ga_property_code: Option<String>,
    pub css_directory: Option<String>,
    pub css_filename: Option<String>,
    pub output_directory: Option<String>,
    pub output_filename: Option<String>,
}

/// Overlay `overrides` on top of the file defaults. A given flag always wins,
/// so passing the default value explicitly resolves to that same value.
pub fn resolve_config(defaults: &ReportSettings, overrides: &ReportOverrides) -> ReportSettings {
    fn pick(default: &str, over: &Option<String>) -> String {
        match over {
            Some(v) => v.clone(),
            None => default.to_string(),
        }
    }

    ReportSettings {
        ga_property_code: pick(&defaults.ga_property_code, &overrides.ga_property_code),
        css_directory: pick(&defaults.css_directory, &overrides.css_directory),
        css_filename: pick(&defaults.css_filename, &overrides.css_filename),
        output_directory: pick(&defaults.output_directory, &overrides.output_directory),
        output_filename: pick(&defaults.output_filename, &overrides.output_filename),
    }
}

/// Parse config text. Missing keys and non-string values are configuration errors.
pub fn parse_config(text: &str) -> Result<AppConfig> {
    serde_json::from_str(text).map_err(|e| ReportError::Configuration(e.to_string()))
}

pub fn load_config_file(path: &Path) -> Result<AppConfig> {
    let text = fs::read_to_string(path).map_err(|e| {
        ReportError::Configuration(format!("cannot read {}: {e}", path.display()))
    })?;
    parse_config(&text).map_err(|e| match e {
        ReportError::Configuration(msg) => {
            ReportError::Configuration(format!("{}: {msg}", path.display()))
        }
        other => other,
    })
}
