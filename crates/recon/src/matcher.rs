use std::collections::HashMap;

use crate::model::{MatchResult, Minutes, RosterRecord, SessionRecord};
use crate::similarity::token_set_ratio;

/// Lookup structures over the session log, built once per run.
///
/// Both keys are last-write-wins on duplicates. Name candidates keep the
/// position of their first appearance, so fuzzy iteration order is the order
/// names were first seen in the log.
#[derive(Debug, Default)]
pub struct SessionIndex {
    by_email: HashMap<String, Minutes>,
    names: Vec<(String, Minutes)>,
    name_pos: HashMap<String, usize>,
}

impl SessionIndex {
    pub fn build(records: &[SessionRecord]) -> Self {
        let mut index = SessionIndex::default();
        for record in records {
            if !record.email.is_empty() {
                index.by_email.insert(record.email.clone(), record.minutes);
            }

            let full_name = record.full_name();
            match index.name_pos.get(&full_name) {
                Some(&pos) => index.names[pos].1 = record.minutes,
                None => {
                    index.name_pos.insert(full_name.clone(), index.names.len());
                    index.names.push((full_name, record.minutes));
                }
            }
        }
        index
    }

    pub fn email(&self, email: &str) -> Option<Minutes> {
        if email.is_empty() {
            return None;
        }
        self.by_email.get(email).copied()
    }

    /// Distinct full names in first-seen order.
    pub fn names(&self) -> impl Iterator<Item = (&str, Minutes)> {
        self.names.iter().map(|(n, m)| (n.as_str(), *m))
    }

    pub fn email_count(&self) -> usize {
        self.by_email.len()
    }

    pub fn name_count(&self) -> usize {
        self.names.len()
    }
}

/// Best fuzzy candidate for `name`: `(candidate, minutes, score)`.
///
/// Ties keep the first-encountered maximum.
pub fn best_name_candidate<'a>(
    name: &str,
    index: &'a SessionIndex,
) -> Option<(&'a str, Minutes, u8)> {
    index
        .names()
        .map(|(candidate, minutes)| (candidate, minutes, token_set_ratio(name, candidate)))
        .fold(None, |best, current| match best {
            Some((_, _, best_score)) if current.2 <= best_score => best,
            _ => Some(current),
        })
}

/// Link one roster row to the session log.
///
/// An email hit wins outright, even when its minutes are missing. Otherwise
/// the best-scoring name is accepted when its score reaches `threshold`.
pub fn match_record(roster: &RosterRecord, index: &SessionIndex, threshold: u8) -> MatchResult {
    if let Some(minutes) = index.email(&roster.email) {
        return MatchResult::Email { minutes };
    }

    match best_name_candidate(&roster.name, index) {
        Some((candidate, minutes, score)) if score >= threshold => {
            log::debug!(
                "name match: '{}' -> '{}' (score {})",
                roster.name,
                candidate,
                score
            );
            MatchResult::Name {
                minutes,
                candidate: candidate.to_string(),
                score,
            }
        }
        Some((candidate, _, score)) => {
            log::debug!(
                "no match for '{}': best '{}' scored {} < {}",
                roster.name,
                candidate,
                score,
                threshold
            );
            MatchResult::NoMatch
        }
        None => MatchResult::NoMatch,
    }
}
