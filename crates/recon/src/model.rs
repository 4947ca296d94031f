use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::table::{Cell, Table};

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// The two decoded input tables for one reconciliation call.
pub struct ReconInput {
    /// Expected attendees (Table1).
    pub roster: Table,
    /// Actual attendance (Table2).
    pub session_log: Table,
}

/// Minutes value after normalization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Minutes {
    Numeric(f64),
    Missing,
}

/// One session-log row with its time value normalized once.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub minutes: Minutes,
}

impl SessionRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// One roster row as the engine sees it.
#[derive(Debug, Clone)]
pub struct RosterRecord {
    pub name: String,
    pub email: String,
    pub date_of_entry: Option<NaiveDate>,
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum MatchResult {
    Email { minutes: Minutes },
    Name { minutes: Minutes, candidate: String, score: u8 },
    NoMatch,
}

impl MatchResult {
    pub fn minutes(&self) -> Option<Minutes> {
        match self {
            Self::Email { minutes } | Self::Name { minutes, .. } => Some(*minutes),
            Self::NoMatch => None,
        }
    }
}

/// How a roster row was linked to the session log, as reported in output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "by", rename_all = "snake_case")]
pub enum MatchedBy {
    Email,
    Name { candidate: String, score: u8 },
    None,
}

impl From<&MatchResult> for MatchedBy {
    fn from(m: &MatchResult) -> Self {
        match m {
            MatchResult::Email { .. } => MatchedBy::Email,
            MatchResult::Name { candidate, score, .. } => MatchedBy::Name {
                candidate: candidate.clone(),
                score: *score,
            },
            MatchResult::NoMatch => MatchedBy::None,
        }
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingStatus {
    RegistrationPending,
    TrainingPending,
    TrainingComplete,
    TrainingIncomplete,
}

impl TrainingStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::RegistrationPending => "Webinar Registration Pending",
            Self::TrainingPending => "Webinar Training Pending",
            Self::TrainingComplete => "Webinar Training Complete",
            Self::TrainingIncomplete => "Webinar Training Incomplete",
        }
    }
}

impl std::fmt::Display for TrainingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One output row. Built by mapping over roster rows; never mutated across runs.
#[derive(Debug, Clone, Serialize)]
pub struct ReconciledRow {
    pub name: String,
    pub email: String,
    pub time_in_session: String,
    pub status: TrainingStatus,
    pub matched_by: MatchedBy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_entry: Option<NaiveDate>,
    pub escalated: bool,
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReconSummary {
    pub total_rows: usize,
    pub matched_by_email: usize,
    pub matched_by_name: usize,
    pub unmatched: usize,
    pub escalated: usize,
    pub status_counts: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    pub config_name: String,
    pub engine_version: String,
    pub run_at: String,
    pub reference_date: NaiveDate,
    pub escalation_enabled: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconResult {
    pub meta: ReconMeta,
    pub summary: ReconSummary,
    pub rows: Vec<ReconciledRow>,
}

/// Output column headers, in order.
pub const OUTPUT_HEADERS: [&str; 4] = [
    "Guest Editor Name",
    "Email Address",
    "Time in Session",
    "Training status",
];

impl ReconResult {
    /// The four-column output table, one row per roster row in input order.
    pub fn to_table(&self) -> Table {
        let mut table = Table::new(OUTPUT_HEADERS.iter().map(|h| h.to_string()).collect());
        for row in &self.rows {
            table.push_row(vec![
                Cell::text(row.name.clone()),
                Cell::text(row.email.clone()),
                Cell::text(row.time_in_session.clone()),
                Cell::text(row.status.label()),
            ]);
        }
        table
    }
}
