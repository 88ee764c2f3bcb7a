//! Shared application service layer for the NTP performance estimator.
//!
//! Loads reactor and study files, runs them (in parallel for batches),
//! expands parameter sweeps, and turns results into tables and files. The
//! CLI is a thin front end over this crate.

pub mod error;
pub mod export;
pub mod project_service;
pub mod report;
pub mod run_service;
pub mod sweep;

// Re-export key types for convenience
pub use error::{AppError, AppResult};
pub use export::{save_profile_csv, save_result_json, save_summary_csv, write_profile_csv};
pub use project_service::{
    ReactorSummary, build_parameters, list_reactors, load_reactor, load_study, save_reactor,
    save_study, single_reactor_study, validate_study,
};
pub use report::{SummaryRow, WallCheck, render_table, summarize, write_summary_csv};
pub use run_service::{RunOptions, StudyRun, run_reactor, run_reactor_file, run_study};
pub use sweep::{SweepDefinition, SweepParameter, SweepRun, SweepType, run_sweep};
