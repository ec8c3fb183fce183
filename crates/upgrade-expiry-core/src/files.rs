use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::ExpiryConfig;
use crate::rewrite::{rewrite_text, ExpiryPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Apply,
    DryRun,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Missing,
    Processed {
        expired: usize,
        markers_inserted: usize,
        written: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub status: FileStatus,
}

impl FileReport {
    pub fn expired(&self) -> usize {
        match self.status {
            FileStatus::Missing => 0,
            FileStatus::Processed { expired, .. } => expired,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub files: Vec<FileReport>,
}

impl SweepReport {
    pub fn changes_made(&self) -> bool {
        self.files.iter().any(|file| file.expired() > 0)
    }

    pub fn total_expired(&self) -> usize {
        self.files.iter().map(FileReport::expired).sum()
    }
}

pub fn rewrite_file(path: &Path, policy: &ExpiryPolicy, mode: WriteMode) -> Result<FileReport> {
    if !path.exists() {
        debug!(path = %path.display(), "target file missing, skipping");
        return Ok(FileReport {
            path: path.to_path_buf(),
            status: FileStatus::Missing,
        });
    }

    let original = fs::read_to_string(path)
        .with_context(|| format!("failed to read target file: {}", path.display()))?;
    let outcome = rewrite_text(&original, policy)
        .with_context(|| format!("failed to rewrite target file: {}", path.display()))?;
    let expired = outcome.expired;
    let markers_inserted = outcome.markers_inserted;
    let rewritten = outcome.into_text();

    let written = mode == WriteMode::Apply && rewritten != original;
    if written {
        fs::write(path, rewritten.as_bytes())
            .with_context(|| format!("failed to write target file: {}", path.display()))?;
    }

    info!(
        path = %path.display(),
        expired,
        markers_inserted,
        written,
        "processed target file"
    );
    Ok(FileReport {
        path: path.to_path_buf(),
        status: FileStatus::Processed {
            expired,
            markers_inserted,
            written,
        },
    })
}

// No per-file isolation: the first failure aborts the sweep.
pub fn sweep(
    root: &Path,
    config: &ExpiryConfig,
    policy: &ExpiryPolicy,
    mode: WriteMode,
) -> Result<SweepReport> {
    let mut report = SweepReport::default();
    for file in &config.files {
        let path = resolve_target_path(root, file);
        report.files.push(rewrite_file(&path, policy, mode)?);
    }
    Ok(report)
}

pub fn resolve_target_path(root: &Path, file: &Path) -> PathBuf {
    if file.is_absolute() {
        file.to_path_buf()
    } else {
        root.join(file)
    }
}
