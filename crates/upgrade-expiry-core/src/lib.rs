mod config;
mod files;
mod markers;
mod rewrite;
mod section;

pub use config::{ExpiryConfig, DEFAULT_TARGET_FILES};
pub use files::{
    resolve_target_path, rewrite_file, sweep, FileReport, FileStatus, SweepReport, WriteMode,
};
pub use markers::{
    classify_line, closes_section, comment_out, format_date, line_ending, parse_marker_date,
    render_expiry_note, render_last_updated, LineKind, UpgradeKind,
};
pub use rewrite::{
    rewrite_lines, rewrite_text, split_lines, ExpiryPolicy, RewriteOutcome,
    DEFAULT_THRESHOLD_DAYS,
};
pub use section::SectionState;
