//! `rollcall-recon`: webinar attendance reconciliation engine.
//!
//! Pure engine crate: receives two decoded tables (roster + session log),
//! returns the annotated roster. No CLI or IO dependencies.

pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod escalate;
pub mod evidence;
pub mod matcher;
pub mod model;
pub mod similarity;
pub mod table;
pub mod time_parse;

pub use config::ReconConfig;
pub use engine::{run, run_as_of};
pub use error::ReconError;
pub use model::{ReconInput, ReconResult, ReconciledRow, TrainingStatus};
pub use table::{Cell, Table};
