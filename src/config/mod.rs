//! @acp:module "Configuration"
//! @acp:summary "Project configuration loading and defaults"
//! @acp:domain cli
//! @acp:layer config

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{DraftError, Result};

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE: &str = ".prdraft.json";

/// @acp:summary "Main prdraft configuration structure"
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Domain detection limits and thresholds
    #[serde(default)]
    pub detection: DetectionConfig,

    /// Template discovery defaults
    #[serde(default)]
    pub template: TemplateConfig,

    /// Ticket link format used when the change-set carries none (`{ticket}` placeholder)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_link_format: Option<String>,

    /// Fixed section content keyed by section name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub overrides: BTreeMap<String, String>,
}

impl Config {
    /// @acp:summary "Load config from a JSON file"
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// @acp:summary "Load config from `path`, or use defaults when the file does not exist"
    ///
    /// A file that exists but cannot be read, parsed or validated is an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    fn validate(&self) -> Result<()> {
        let detection = &self.detection;
        if detection.max_depth == 0 {
            return Err(DraftError::Config("detection.maxDepth must be at least 1".into()));
        }
        if !(detection.dominance_ratio.is_finite() && detection.dominance_ratio >= 1.0) {
            return Err(DraftError::Config(format!(
                "detection.dominanceRatio must be >= 1.0, got {}",
                detection.dominance_ratio
            )));
        }
        Ok(())
    }
}

/// @acp:summary "Bounds and thresholds for domain detection"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionConfig {
    /// Maximum directory depth below the repository root
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Maximum number of entries (files and directories) examined
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,

    /// Minimum score the winning domain needs
    #[serde(default = "default_min_score")]
    pub min_score: u32,

    /// Winner must score at least this multiple of the runner-up
    #[serde(default = "default_dominance_ratio")]
    pub dominance_ratio: f64,

    /// Directory names never descended into
    #[serde(default = "default_skip_dirs")]
    pub skip_dirs: Vec<String>,

    /// Additional directory names to skip on top of `skip_dirs`
    #[serde(default)]
    pub extra_skip_dirs: Vec<String>,
}

impl DetectionConfig {
    pub fn should_skip(&self, dir_name: &str) -> bool {
        self.skip_dirs
            .iter()
            .chain(self.extra_skip_dirs.iter())
            .any(|skip| skip == dir_name)
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            max_entries: default_max_entries(),
            min_score: default_min_score(),
            dominance_ratio: default_dominance_ratio(),
            skip_dirs: default_skip_dirs(),
            extra_skip_dirs: Vec::new(),
        }
    }
}

fn default_max_depth() -> usize {
    2
}

fn default_max_entries() -> usize {
    500
}

fn default_min_score() -> u32 {
    3
}

fn default_dominance_ratio() -> f64 {
    2.0
}

fn default_skip_dirs() -> Vec<String> {
    [
        // Package managers
        "node_modules",
        "vendor",
        "bower_components",
        "Pods",
        // Virtual environments
        "venv",
        ".venv",
        "__pycache__",
        // Build outputs
        "dist",
        "build",
        "target",
        "out",
        ".next",
        ".nuxt",
        ".gradle",
        // Cache/temp
        ".cache",
        "coverage",
        ".pytest_cache",
        ".terraform",
        // VCS
        ".git",
        ".hg",
        ".svn",
        // IDE
        ".idea",
        ".vscode",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// @acp:summary "Template discovery defaults"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateConfig {
    /// Look for a committed pull request template first
    #[serde(default = "default_true")]
    pub use_repo_template: bool,

    /// Preset used instead of auto-detection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            use_repo_template: true,
            preset: None,
        }
    }
}

fn default_true() -> bool {
    true
}
