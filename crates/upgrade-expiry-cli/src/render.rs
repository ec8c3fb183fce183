use std::io::IsTerminal;

use anstyle::{AnsiColor, Effects, Style};
use upgrade_expiry_core::{FileReport, FileStatus, SweepReport};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OutputStyle {
    Plain,
    Rich,
}

pub fn current_output_style() -> OutputStyle {
    if std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none() {
        OutputStyle::Rich
    } else {
        OutputStyle::Plain
    }
}

pub fn format_sweep_summary(report: &SweepReport, style: OutputStyle) -> Vec<String> {
    let mut lines = report
        .files
        .iter()
        .map(|file| format_file_line(file, style))
        .collect::<Vec<_>>();
    lines.push(format!(
        "{} expired command(s) across {} file(s)",
        report.total_expired(),
        report.files.len()
    ));
    lines
}

fn format_file_line(file: &FileReport, style: OutputStyle) -> String {
    let path = file.path.display();
    match file.status {
        FileStatus::Missing => {
            format!("{} {path}", render_status(style, "skip", skip_style()))
        }
        FileStatus::Processed {
            expired,
            markers_inserted,
            written,
        } => {
            let (status, status_style) = if expired > 0 {
                ("expired", expired_style())
            } else {
                ("ok", ok_style())
            };
            let mut line = format!(
                "{} {path}: {expired} expired, {markers_inserted} marker(s) added",
                render_status(style, status, status_style)
            );
            if !written && (expired > 0 || markers_inserted > 0) {
                line.push_str(" (not written)");
            }
            line
        }
    }
}

fn render_status(style: OutputStyle, status: &str, status_style: Style) -> String {
    let label = format!("[{status}]");
    match style {
        OutputStyle::Plain => label,
        OutputStyle::Rich => colorize(status_style, &label),
    }
}

fn ok_style() -> Style {
    Style::new().fg_color(Some(AnsiColor::BrightGreen.into()))
}

fn expired_style() -> Style {
    Style::new()
        .fg_color(Some(AnsiColor::BrightYellow.into()))
        .effects(Effects::BOLD)
}

fn skip_style() -> Style {
    Style::new().effects(Effects::DIMMED)
}

fn colorize(style: Style, text: &str) -> String {
    format!("{}{}{}", style.render(), text, style.render_reset())
}
