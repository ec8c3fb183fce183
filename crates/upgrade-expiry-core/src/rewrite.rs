use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::debug;

use crate::markers::{
    classify_line, comment_out, line_ending, parse_marker_date, render_expiry_note,
    render_last_updated, LineKind,
};
use crate::section::SectionState;

pub const DEFAULT_THRESHOLD_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryPolicy {
    pub today: NaiveDate,
    pub threshold_days: i64,
}

impl ExpiryPolicy {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            threshold_days: DEFAULT_THRESHOLD_DAYS,
        }
    }

    pub fn with_threshold_days(mut self, threshold_days: i64) -> Self {
        self.threshold_days = threshold_days;
        self
    }

    pub fn age_in_days(&self, last_updated: NaiveDate) -> i64 {
        (self.today - last_updated).num_days()
    }

    pub fn is_expired(&self, last_updated: NaiveDate) -> bool {
        self.age_in_days(last_updated) >= self.threshold_days
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteOutcome {
    pub lines: Vec<String>,
    pub expired: usize,
    pub markers_inserted: usize,
}

impl RewriteOutcome {
    pub fn changed(&self) -> bool {
        self.expired > 0
    }

    pub fn into_text(self) -> String {
        self.lines.concat()
    }
}

pub fn split_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}

pub fn rewrite_text(text: &str, policy: &ExpiryPolicy) -> Result<RewriteOutcome> {
    rewrite_lines(split_lines(text), policy)
}

pub fn rewrite_lines<'a, I>(lines: I, policy: &ExpiryPolicy) -> Result<RewriteOutcome>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut outcome = RewriteOutcome::default();
    let mut state = SectionState::default();

    for (index, line) in lines.into_iter().enumerate() {
        match classify_line(line) {
            LineKind::SectionStart(kind) => {
                debug!(line = index + 1, kind = kind.as_str(), "entering upgrade section");
                state.enter();
                outcome.lines.push(line.to_string());
                continue;
            }
            LineKind::LastUpdated(raw) if state.is_active() => {
                let date = parse_marker_date(raw).with_context(|| {
                    format!("failed to read last updated marker on line {}", index + 1)
                })?;
                state.record_update(date);
                outcome.lines.push(line.to_string());
                continue;
            }
            LineKind::Command if state.is_active() => {
                let last_updated = match state.last_updated() {
                    Some(date) => date,
                    None => {
                        debug!(line = index + 1, "synthesizing last updated marker");
                        state.record_update(policy.today);
                        outcome.lines.push(render_last_updated(policy.today, line_ending(line)));
                        outcome.markers_inserted += 1;
                        policy.today
                    }
                };

                if policy.is_expired(last_updated) {
                    debug!(
                        line = index + 1,
                        age_days = policy.age_in_days(last_updated),
                        "commenting out expired command"
                    );
                    outcome.lines.push(render_expiry_note(policy.today, line_ending(line)));
                    outcome.lines.push(comment_out(line));
                    outcome.expired += 1;
                } else {
                    outcome.lines.push(line.to_string());
                }
            }
            _ => outcome.lines.push(line.to_string()),
        }

        state.after_line(line);
    }

    Ok(outcome)
}
