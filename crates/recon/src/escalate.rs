//! Date escalation pass.
//!
//! Runs after every row has a first-pass status. Rows whose entry date is at
//! least `stale_after_days` old and whose training is not complete become
//! `TrainingIncomplete`. `TrainingComplete` is never touched, and rows
//! without a parseable date keep their status.

use chrono::NaiveDate;

use crate::model::{ReconciledRow, TrainingStatus};

/// Whole days from `entry` to `today` (negative for future dates).
pub fn elapsed_days(entry: NaiveDate, today: NaiveDate) -> i64 {
    (today - entry).num_days()
}

/// Status after escalation for a single row.
pub fn escalated_status(
    status: TrainingStatus,
    entry: Option<NaiveDate>,
    today: NaiveDate,
    stale_after_days: i64,
) -> TrainingStatus {
    match entry {
        Some(date)
            if elapsed_days(date, today) >= stale_after_days
                && status != TrainingStatus::TrainingComplete =>
        {
            TrainingStatus::TrainingIncomplete
        }
        _ => status,
    }
}

/// Apply escalation to all rows, returning the number of rows changed.
pub fn escalate(rows: &mut [ReconciledRow], today: NaiveDate, stale_after_days: i64) -> usize {
    let mut changed = 0;
    for row in rows.iter_mut() {
        let next = escalated_status(row.status, row.date_of_entry, today, stale_after_days);
        if next != row.status {
            log::debug!(
                "escalated '{}': {} -> {}",
                row.name,
                row.status,
                next
            );
            row.status = next;
            row.escalated = true;
            changed += 1;
        }
    }
    changed
}
