use chrono::NaiveDate;

use crate::markers::closes_section;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SectionState {
    #[default]
    Idle,
    InSection { last_updated: Option<NaiveDate> },
}

impl SectionState {
    pub fn is_active(self) -> bool {
        matches!(self, Self::InSection { .. })
    }

    pub fn last_updated(self) -> Option<NaiveDate> {
        match self {
            Self::Idle => None,
            Self::InSection { last_updated } => last_updated,
        }
    }

    // A repeated start line inside an open section keeps the running date.
    pub fn enter(&mut self) {
        if let Self::Idle = self {
            *self = Self::InSection { last_updated: None };
        }
    }

    pub fn record_update(&mut self, date: NaiveDate) {
        if let Self::InSection { last_updated } = self {
            *last_updated = Some(date);
        }
    }

    pub fn close(&mut self) {
        *self = Self::Idle;
    }

    pub fn after_line(&mut self, line: &str) {
        if self.is_active() && closes_section(line) {
            self.close();
        }
    }
}
