use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::ReconError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReconConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub status: StatusConfig,
    #[serde(default)]
    pub escalation: EscalationConfig,
    #[serde(default)]
    pub roster: RosterConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

fn default_name() -> String {
    "Webinar attendance".into()
}

impl Default for ReconConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            matching: MatchingConfig::default(),
            status: StatusConfig::default(),
            escalation: EscalationConfig::default(),
            roster: RosterConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Matching + Status + Escalation
// ---------------------------------------------------------------------------

/// Minimum token-set score (0..=100) for a name match to be accepted.
pub const DEFAULT_NAME_THRESHOLD: u8 = 80;

/// Minutes at or above which training counts as complete.
pub const DEFAULT_COMPLETE_MINUTES: f64 = 15.0;

/// Days since entry after which unfinished training is escalated.
pub const DEFAULT_STALE_AFTER_DAYS: i64 = 14;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatchingConfig {
    #[serde(default = "default_name_threshold")]
    pub name_threshold: u8,
}

fn default_name_threshold() -> u8 {
    DEFAULT_NAME_THRESHOLD
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            name_threshold: DEFAULT_NAME_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatusConfig {
    #[serde(default = "default_complete_minutes")]
    pub complete_minutes: f64,
}

fn default_complete_minutes() -> f64 {
    DEFAULT_COMPLETE_MINUTES
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            complete_minutes: DEFAULT_COMPLETE_MINUTES,
        }
    }
}

/// Date escalation settings.
///
/// `reference_date` pins "today" for reproducible runs; when absent the
/// caller's local date is used.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EscalationConfig {
    #[serde(default = "default_stale_after_days")]
    pub stale_after_days: i64,
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,
}

fn default_stale_after_days() -> i64 {
    DEFAULT_STALE_AFTER_DAYS
}

impl Default for EscalationConfig {
    fn default() -> Self {
        Self {
            stale_after_days: DEFAULT_STALE_AFTER_DAYS,
            reference_date: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Column mapping
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RosterConfig {
    #[serde(default)]
    pub columns: RosterColumns,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RosterColumns {
    pub name: String,
    pub email: String,
    pub date_of_entry: String,
}

impl Default for RosterColumns {
    fn default() -> Self {
        Self {
            name: "Guest Editor Name".into(),
            email: "Email Address".into(),
            date_of_entry: "Date of entry".into(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    #[serde(default)]
    pub columns: SessionColumns,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionColumns {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub time_in_session: String,
}

impl Default for SessionColumns {
    fn default() -> Self {
        Self {
            email: "Email Address".into(),
            first_name: "First Name".into(),
            last_name: "Last Name".into(),
            time_in_session: "Time in Session".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ReconConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: ReconConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if self.matching.name_threshold > 100 {
            return Err(ReconError::ConfigValidation(format!(
                "matching.name_threshold must be 0..=100, got {}",
                self.matching.name_threshold
            )));
        }

        let minutes = self.status.complete_minutes;
        if !minutes.is_finite() || minutes < 0.0 {
            return Err(ReconError::ConfigValidation(format!(
                "status.complete_minutes must be a non-negative number, got {minutes}"
            )));
        }

        if self.escalation.stale_after_days < 0 {
            return Err(ReconError::ConfigValidation(format!(
                "escalation.stale_after_days must be >= 0, got {}",
                self.escalation.stale_after_days
            )));
        }

        let r = &self.roster.columns;
        let s = &self.session.columns;
        let columns = [
            ("roster.columns.name", &r.name),
            ("roster.columns.email", &r.email),
            ("roster.columns.date_of_entry", &r.date_of_entry),
            ("session.columns.email", &s.email),
            ("session.columns.first_name", &s.first_name),
            ("session.columns.last_name", &s.last_name),
            ("session.columns.time_in_session", &s.time_in_session),
        ];
        for (key, value) in columns {
            if value.trim().is_empty() {
                return Err(ReconError::ConfigValidation(format!("{key} must not be empty")));
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
