use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

use crate::rewrite::DEFAULT_THRESHOLD_DAYS;

pub const DEFAULT_TARGET_FILES: [&str; 2] = [
    "scripts/functions/auto-upgrade/normal-auto-upgrade.sh",
    "scripts/functions/auto-upgrade/emergency-auto-upgrade.sh",
];

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ExpiryConfig {
    #[serde(default = "default_target_files")]
    pub files: Vec<PathBuf>,
    #[serde(default = "default_threshold_days")]
    pub threshold_days: i64,
}

impl Default for ExpiryConfig {
    fn default() -> Self {
        Self {
            files: default_target_files(),
            threshold_days: default_threshold_days(),
        }
    }
}

impl ExpiryConfig {
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: Self = toml::from_str(input).context("failed to parse expiry config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read expiry config: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("invalid expiry config: {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.threshold_days < 0 {
            return Err(anyhow!(
                "threshold_days must not be negative: {}",
                self.threshold_days
            ));
        }
        if self.files.is_empty() {
            return Err(anyhow!("files must list at least one target file"));
        }
        if self
            .files
            .iter()
            .any(|file| file.as_os_str().to_string_lossy().trim().is_empty())
        {
            return Err(anyhow!("files must not contain empty paths"));
        }
        Ok(())
    }
}

fn default_target_files() -> Vec<PathBuf> {
    DEFAULT_TARGET_FILES.iter().map(PathBuf::from).collect()
}

fn default_threshold_days() -> i64 {
    DEFAULT_THRESHOLD_DAYS
}
