use std::collections::BTreeMap;

use crate::model::{MatchedBy, ReconSummary, ReconciledRow};

/// Compute summary statistics from reconciled rows.
pub fn compute_summary(rows: &[ReconciledRow]) -> ReconSummary {
    let mut status_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut matched_by_email = 0;
    let mut matched_by_name = 0;
    let mut unmatched = 0;
    let mut escalated = 0;

    for r in rows {
        *status_counts.entry(r.status.label().to_string()).or_insert(0) += 1;

        match r.matched_by {
            MatchedBy::Email => matched_by_email += 1,
            MatchedBy::Name { .. } => matched_by_name += 1,
            MatchedBy::None => unmatched += 1,
        }
        if r.escalated {
            escalated += 1;
        }
    }

    ReconSummary {
        total_rows: rows.len(),
        matched_by_email,
        matched_by_name,
        unmatched,
        escalated,
        status_counts,
    }
}
