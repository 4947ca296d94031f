use crate::model::{MatchResult, Minutes, TrainingStatus};

/// Display value for rows with no usable duration.
pub const NOT_AVAILABLE: &str = "N/A";

/// Status for a minutes value against the completion threshold.
pub fn status_for_minutes(minutes: Minutes, complete_minutes: f64) -> TrainingStatus {
    match minutes {
        Minutes::Numeric(m) if m.is_nan() => TrainingStatus::RegistrationPending,
        Minutes::Numeric(m) if m < complete_minutes => TrainingStatus::TrainingPending,
        Minutes::Numeric(_) => TrainingStatus::TrainingComplete,
        Minutes::Missing => TrainingStatus::RegistrationPending,
    }
}

/// `"<whole minutes> minutes"`, truncating toward zero, or `"N/A"`.
pub fn display_minutes(minutes: Minutes) -> String {
    match minutes {
        Minutes::Numeric(m) if m.is_finite() => format!("{} minutes", m.trunc() as i64),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// First-pass classification of a match: `(time in session, status)`.
pub fn classify(result: &MatchResult, complete_minutes: f64) -> (String, TrainingStatus) {
    match result.minutes() {
        Some(minutes) => (
            display_minutes(minutes),
            status_for_minutes(minutes, complete_minutes),
        ),
        None => (NOT_AVAILABLE.to_string(), TrainingStatus::RegistrationPending),
    }
}
