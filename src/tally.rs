use crate::error::ReportError;
use serde::{Deserialize, Serialize};

/// Result of processing one credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Submitted,
    AlreadyReported,
    Failed(ReportError),
    /// Off-campus student with no off-campus endpoint configured. Counts toward nothing.
    OffCampusUnconfigured,
}

impl Outcome {
    pub fn kind(&self) -> &'static str {
        match self {
            Outcome::Submitted => "submitted",
            Outcome::AlreadyReported => "already_reported",
            Outcome::Failed(err) => err.kind(),
            Outcome::OffCampusUnconfigured => "off_campus_unconfigured",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Outcome::Submitted => "success.".to_string(),
            Outcome::AlreadyReported => "this student has already reported today.".to_string(),
            Outcome::Failed(err) => err.to_string(),
            Outcome::OffCampusUnconfigured => {
                "skipped: student is off campus and off-campus reporting is not configured."
                    .to_string()
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub success: u32,
    pub done: u32,
    pub fail: u32,
}

impl Tally {
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Submitted => self.success += 1,
            Outcome::AlreadyReported => self.done += 1,
            Outcome::Failed(_) => self.fail += 1,
            Outcome::OffCampusUnconfigured => {}
        }
    }

    pub fn total(&self) -> u32 {
        self.success + self.done + self.fail
    }

    pub fn summary_line(&self) -> String {
        format!(
            "Done for today: {} succeeded, {} already reported, {} failed.",
            self.success, self.done, self.fail
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub started: String,
    pub finished: String,
    pub tally: Tally,
    pub entries: Vec<EntryReport>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryReport {
    pub index: usize,
    pub fingerprint: String,
    pub outcome: String,
    pub message: String,
}
