use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

pub const CHANGED_OUTPUT_NAME: &str = "auto_upgrade_changed";

pub fn format_set_output_line(changed: bool) -> String {
    format!("::set-output name={CHANGED_OUTPUT_NAME}::{changed}")
}

pub fn format_github_output_entry(changed: bool) -> String {
    format!("{CHANGED_OUTPUT_NAME}={changed}\n")
}

pub fn append_github_output(path: &Path, changed: bool) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open github output file: {}", path.display()))?;
    file.write_all(format_github_output_entry(changed).as_bytes())
        .with_context(|| format!("failed to write github output file: {}", path.display()))?;
    Ok(())
}
