use std::sync::LazyLock;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use regex::Regex;

pub const LAST_UPDATED_PREFIX: &str = "# Last updated:";
const DATE_FORMAT: &str = "%Y-%m-%d";

static SECTION_START_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^# Start (Normal|Emergency) Automatic Upgrade").expect("valid regex")
});

static LAST_UPDATED_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^# Last updated: (\d{4}-\d{2}-\d{2})").expect("valid regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeKind {
    Normal,
    Emergency,
}

impl UpgradeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Emergency => "emergency",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    SectionStart(UpgradeKind),
    LastUpdated(&'a str),
    Blank,
    Comment,
    Command,
}

pub fn classify_line(line: &str) -> LineKind<'_> {
    if let Some(captures) = SECTION_START_REGEX.captures(line) {
        let kind = match &captures[1] {
            "Normal" => UpgradeKind::Normal,
            _ => UpgradeKind::Emergency,
        };
        return LineKind::SectionStart(kind);
    }
    if let Some(date) = LAST_UPDATED_REGEX.captures(line).and_then(|c| c.get(1)) {
        return LineKind::LastUpdated(date.as_str());
    }
    if line.trim().is_empty() {
        return LineKind::Blank;
    }
    if line.trim_start().starts_with('#') {
        return LineKind::Comment;
    }
    LineKind::Command
}

// Last-updated markers match by prefix here, so one with an unparseable
// date still keeps the section open.
pub fn closes_section(line: &str) -> bool {
    line.trim().is_empty() || (line.starts_with('#') && !line.starts_with(LAST_UPDATED_PREFIX))
}

pub fn parse_marker_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .with_context(|| format!("invalid last updated date '{raw}'"))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn line_ending(line: &str) -> &'static str {
    if line.ends_with("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}

pub fn render_last_updated(date: NaiveDate, ending: &str) -> String {
    format!("{LAST_UPDATED_PREFIX} {}{ending}", format_date(date))
}

pub fn render_expiry_note(date: NaiveDate, ending: &str) -> String {
    format!("# Commented out on {}{ending}", format_date(date))
}

pub fn comment_out(line: &str) -> String {
    format!("# {}", line.trim_start())
}
