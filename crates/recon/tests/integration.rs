use std::path::PathBuf;

use chrono::NaiveDate;
use rollcall_recon::config::ReconConfig;
use rollcall_recon::engine::run_as_of;
use rollcall_recon::model::{MatchedBy, ReconInput, ReconResult, TrainingStatus};
use rollcall_recon::{Cell, ReconError, Table};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_table(name: &str) -> Table {
    let path = fixtures_dir().join(name);
    let data = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()));
    Table::from_csv_str(&data).unwrap()
}

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 31).unwrap()
}

fn load_and_run(roster: &str, session: &str) -> ReconResult {
    let input = ReconInput {
        roster: load_table(roster),
        session_log: load_table(session),
    };
    run_as_of(&ReconConfig::default(), &input, as_of()).unwrap()
}

fn row<'a>(result: &'a ReconResult, name: &str) -> &'a rollcall_recon::ReconciledRow {
    result
        .rows
        .iter()
        .find(|r| r.name == name)
        .unwrap_or_else(|| panic!("no output row for {name}"))
}

// -------------------------------------------------------------------------
// Full roster with escalation
// -------------------------------------------------------------------------

#[test]
fn roster_reconciled_in_input_order() {
    let result = load_and_run("roster.csv", "session.csv");
    let names: Vec<&str> = result.rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Jane Doe",
            "Raj Patel",
            "Li Wei",
            "Garcia, Maria",
            "Sam Taylor",
            "Kevin OBrien",
            "Alice Wong",
        ]
    );
    assert!(result.meta.escalation_enabled);
    assert_eq!(result.meta.reference_date, as_of());
}

#[test]
fn email_matches_use_normalized_minutes() {
    let result = load_and_run("roster.csv", "session.csv");

    let jane = row(&result, "Jane Doe");
    assert_eq!(jane.time_in_session, "60 minutes");
    assert_eq!(jane.status, TrainingStatus::TrainingComplete);
    assert!(!jane.escalated, "complete rows never escalate");

    let raj = row(&result, "Raj Patel");
    assert_eq!(raj.time_in_session, "128 minutes");
    assert_eq!(raj.status, TrainingStatus::TrainingComplete);
}

#[test]
fn duplicate_email_keeps_last_row() {
    let result = load_and_run("roster.csv", "session.csv");
    let li = row(&result, "Li Wei");
    assert_eq!(li.time_in_session, "9 minutes");
    assert_eq!(li.status, TrainingStatus::TrainingPending);
    assert!(!li.escalated, "entered 6 days ago");
}

#[test]
fn reordered_partial_name_matches_fuzzily() {
    let result = load_and_run("roster.csv", "session.csv");
    let maria = row(&result, "Garcia, Maria");
    assert_eq!(
        maria.matched_by,
        MatchedBy::Name {
            candidate: "Maria Elena Garcia".into(),
            score: 100
        }
    );
    assert_eq!(maria.time_in_session, "45 minutes");
    assert_eq!(maria.status, TrainingStatus::TrainingComplete);
}

#[test]
fn matched_without_duration_is_registration_pending() {
    let result = load_and_run("roster.csv", "session.csv");

    let sam = row(&result, "Sam Taylor");
    assert_eq!(sam.matched_by, MatchedBy::Email);
    assert_eq!(sam.time_in_session, "N/A");
    assert_eq!(sam.status, TrainingStatus::RegistrationPending);

    // "0 minutes" reads as missing; the unparseable entry date skips escalation.
    let kevin = row(&result, "Kevin OBrien");
    assert_eq!(kevin.time_in_session, "N/A");
    assert_eq!(kevin.status, TrainingStatus::RegistrationPending);
    assert!(!kevin.escalated);
}

#[test]
fn stale_unmatched_row_escalates() {
    let result = load_and_run("roster.csv", "session.csv");
    let alice = row(&result, "Alice Wong");
    assert_eq!(alice.matched_by, MatchedBy::None);
    assert_eq!(alice.time_in_session, "N/A");
    assert_eq!(alice.status, TrainingStatus::TrainingIncomplete);
    assert!(alice.escalated);
}

#[test]
fn summary_counts() {
    let result = load_and_run("roster.csv", "session.csv");
    let s = &result.summary;
    assert_eq!(s.total_rows, 7);
    assert_eq!(s.matched_by_email, 5);
    assert_eq!(s.matched_by_name, 1);
    assert_eq!(s.unmatched, 1);
    assert_eq!(s.escalated, 1);
    assert_eq!(s.status_counts["Webinar Training Complete"], 3);
    assert_eq!(s.status_counts["Webinar Training Pending"], 1);
    assert_eq!(s.status_counts["Webinar Registration Pending"], 2);
    assert_eq!(s.status_counts["Webinar Training Incomplete"], 1);
}

#[test]
fn output_table_shape() {
    let result = load_and_run("roster.csv", "session.csv");
    let table = result.to_table();
    assert_eq!(
        table.headers,
        vec!["Guest Editor Name", "Email Address", "Time in Session", "Training status"]
    );
    assert_eq!(table.len(), 7);
    assert_eq!(table.rows[6][1], Cell::text("alice@example.org"));
    assert_eq!(table.rows[6][3], Cell::text("Webinar Training Incomplete"));
}

#[test]
fn json_output_is_stable() {
    let result = load_and_run("roster.csv", "session.csv");
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["meta"]["reference_date"], "2026-01-31");
    assert_eq!(json["rows"][0]["status"], "training_complete");
    assert_eq!(json["rows"][0]["matched_by"]["by"], "email");
    assert_eq!(json["rows"][3]["matched_by"]["by"], "name");
    assert_eq!(json["rows"][3]["matched_by"]["score"], 100);
    assert_eq!(json["summary"]["escalated"], 1);
}

// -------------------------------------------------------------------------
// Optional columns and structural failures
// -------------------------------------------------------------------------

#[test]
fn roster_without_date_column_never_escalates() {
    let result = load_and_run("roster_no_date.csv", "session.csv");
    assert!(!result.meta.escalation_enabled);
    assert_eq!(result.summary.escalated, 0);
    assert_eq!(row(&result, "Alice Wong").status, TrainingStatus::RegistrationPending);
    assert_eq!(row(&result, "Li Wei").status, TrainingStatus::TrainingPending);
}

#[test]
fn rerunning_is_deterministic() {
    let a = load_and_run("roster.csv", "session.csv");
    let b = load_and_run("roster.csv", "session.csv");
    assert_eq!(a.to_table(), b.to_table());
}

#[test]
fn session_without_email_column_fails() {
    let input = ReconInput {
        roster: load_table("roster.csv"),
        session_log: load_table("session_missing_email.csv"),
    };
    let err = run_as_of(&ReconConfig::default(), &input, as_of()).unwrap_err();
    assert!(matches!(err, ReconError::MissingColumn { ref column, .. } if column == "Email Address"));
}

#[test]
fn remapped_columns() {
    let config = ReconConfig::from_toml(
        r#"
[roster.columns]
name = "Editor"
email = "Mail"

[session.columns]
email = "Mail"
"#,
    )
    .unwrap();

    let roster = Table::from_csv_str("Editor,Mail\nJane Doe,jane@x.org\n").unwrap();
    let session = Table::from_csv_str(
        "Mail,First Name,Last Name,Time in Session\njane@x.org,Jane,Doe,20 Minutes\n",
    )
    .unwrap();
    let input = ReconInput { roster, session_log: session };
    let result = run_as_of(&config, &input, as_of()).unwrap();
    assert_eq!(result.rows[0].time_in_session, "20 minutes");
    assert_eq!(result.rows[0].status, TrainingStatus::TrainingComplete);
}
