use chrono::NaiveDate;

use crate::classify::classify;
use crate::config::{ReconConfig, RosterColumns, SessionColumns};
use crate::error::ReconError;
use crate::escalate::escalate;
use crate::evidence::compute_summary;
use crate::matcher::{match_record, SessionIndex};
use crate::model::{
    MatchedBy, ReconInput, ReconMeta, ReconResult, ReconciledRow, RosterRecord, SessionRecord,
};
use crate::table::Table;
use crate::time_parse::parse_time_in_session;

pub const ROSTER_TABLE: &str = "roster";
pub const SESSION_TABLE: &str = "session log";

/// Run reconciliation per config, escalating against today's local date
/// unless the config pins a reference date.
pub fn run(config: &ReconConfig, input: &ReconInput) -> Result<ReconResult, ReconError> {
    let today = config
        .escalation
        .reference_date
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    run_as_of(config, input, today)
}

/// Run reconciliation with an explicit reference date for escalation.
pub fn run_as_of(
    config: &ReconConfig,
    input: &ReconInput,
    today: NaiveDate,
) -> Result<ReconResult, ReconError> {
    let sessions = load_session_log(&input.session_log, &config.session.columns)?;
    let roster = load_roster(&input.roster, &config.roster.columns)?;
    let escalation_enabled = input.roster.has_column(&config.roster.columns.date_of_entry);

    let index = SessionIndex::build(&sessions);
    log::debug!(
        "session index: {} email key(s), {} name key(s) from {} row(s)",
        index.email_count(),
        index.name_count(),
        sessions.len()
    );

    let mut rows: Vec<ReconciledRow> = roster
        .into_iter()
        .map(|record| {
            let result = match_record(&record, &index, config.matching.name_threshold);
            let (time_in_session, status) = classify(&result, config.status.complete_minutes);
            ReconciledRow {
                name: record.name,
                email: record.email,
                time_in_session,
                status,
                matched_by: MatchedBy::from(&result),
                date_of_entry: record.date_of_entry,
                escalated: false,
            }
        })
        .collect();

    if escalation_enabled {
        let changed = escalate(&mut rows, today, config.escalation.stale_after_days);
        log::debug!("escalation as of {today}: {changed} row(s) changed");
    } else {
        log::info!(
            "roster has no '{}' column; escalation skipped",
            config.roster.columns.date_of_entry
        );
    }

    let summary = compute_summary(&rows);
    log::info!(
        "reconciled {} roster row(s): {} by email, {} by name, {} unmatched, {} escalated",
        summary.total_rows,
        summary.matched_by_email,
        summary.matched_by_name,
        summary.unmatched,
        summary.escalated,
    );

    Ok(ReconResult {
        meta: ReconMeta {
            config_name: config.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
            reference_date: today,
            escalation_enabled,
        },
        summary,
        rows,
    })
}

/// Decode session-log rows and normalize every time value once.
pub fn load_session_log(
    table: &Table,
    columns: &SessionColumns,
) -> Result<Vec<SessionRecord>, ReconError> {
    let email = table.require_column(SESSION_TABLE, &columns.email)?;
    let first = table.require_column(SESSION_TABLE, &columns.first_name)?;
    let last = table.require_column(SESSION_TABLE, &columns.last_name)?;
    let time = table.require_column(SESSION_TABLE, &columns.time_in_session)?;

    Ok(table
        .rows
        .iter()
        .map(|row| SessionRecord {
            email: row[email].as_text(),
            first_name: row[first].as_text(),
            last_name: row[last].as_text(),
            minutes: parse_time_in_session(&row[time]),
        })
        .collect())
}

/// Decode roster rows. The entry date is read only when its column exists.
pub fn load_roster(table: &Table, columns: &RosterColumns) -> Result<Vec<RosterRecord>, ReconError> {
    let name = table.require_column(ROSTER_TABLE, &columns.name)?;
    let email = table.require_column(ROSTER_TABLE, &columns.email)?;
    let date = table.column_index(&columns.date_of_entry);

    Ok(table
        .rows
        .iter()
        .map(|row| RosterRecord {
            name: row[name].as_text(),
            email: row[email].as_text(),
            date_of_entry: date.and_then(|i| row[i].as_date()),
        })
        .collect())
}
