use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// Default value functions for serde
fn default_hyphen_column_marker() -> String {
    "CDASH".to_string()
}

fn default_na_sentinel() -> String {
    "N/A".to_string()
}

fn default_alignment_exemption() -> String {
    "center aligned".to_string()
}

/// Everything a scan needs to know, passed explicitly into the scanner.
///
/// Loaded from YAML; every field is optional in the file:
///
/// ```yaml
/// options:
///   skip_line_breaks: true
/// conventions:
///   hyphen_column_marker: "CDASH"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    #[serde(default)]
    pub options: ScanOptions,
    #[serde(default)]
    pub conventions: ConventionConfig,
}

/// Switches for the optional row checks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanOptions {
    /// Don't flag cells that contain line breaks
    #[serde(default)]
    pub skip_line_breaks: bool,
    /// Don't flag centered cells that lack an alignment comment
    #[serde(default)]
    pub skip_formatting: bool,
}

/// The text conventions the checks compare against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConventionConfig {
    /// Header text (case-insensitive substring) naming the hyphen-convention column
    #[serde(default = "default_hyphen_column_marker")]
    pub hyphen_column_marker: String,
    /// Exact cell text that needs no hyphen
    #[serde(default = "default_na_sentinel")]
    pub na_sentinel: String,
    /// Phrase in a row's last cell that explains a centered cell
    #[serde(default = "default_alignment_exemption")]
    pub alignment_exemption: String,
}

impl Default for ConventionConfig {
    fn default() -> Self {
        Self {
            hyphen_column_marker: default_hyphen_column_marker(),
            na_sentinel: default_na_sentinel(),
            alignment_exemption: default_alignment_exemption(),
        }
    }
}

/// Where the active config came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    File(PathBuf),
    Defaults,
}

impl ScanConfig {
    /// Load config from a YAML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: ScanConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(config)
    }

    /// Load config with fallback to default; also says which one was used
    pub fn load_with_fallback(path: Option<&Path>) -> (Self, ConfigOrigin) {
        let Some(p) = path else {
            return (Self::default(), ConfigOrigin::Defaults);
        };
        match Self::load_from_file(p) {
            Ok(config) => (config, ConfigOrigin::File(p.to_path_buf())),
            Err(e) => {
                tracing::warn!("failed to load config from {}, using defaults: {e:#}", p.display());
                (Self::default(), ConfigOrigin::Defaults)
            }
        }
    }

    /// Command-line switches can only turn checks off, never back on
    pub fn with_overrides(mut self, skip_line_breaks: bool, skip_formatting: bool) -> Self {
        self.options.skip_line_breaks |= skip_line_breaks;
        self.options.skip_formatting |= skip_formatting;
        self
    }
}
