//! Run execution: single reactors, studies, and the shared batch driver.

use ntp_model::{SimulationResult, run_simulation};
use ntp_project::{ReactorDef, StudyDef};
use rayon::prelude::*;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::error::AppResult;
use crate::project_service;

/// Options for running reactors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Evaluate independent reactors on the rayon thread pool
    pub parallel: bool,
    /// Treat a `no_flow` nozzle as a failed run
    pub strict: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            strict: false,
        }
    }
}

/// Outcome of one reactor inside a study or sweep.
#[derive(Debug)]
pub struct StudyRun {
    pub reactor_name: String,
    pub wall_temperature_limit_k: Option<f64>,
    pub result: AppResult<SimulationResult>,
}

impl StudyRun {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Run one reactor definition.
pub fn run_reactor(reactor: &ReactorDef, options: &RunOptions) -> AppResult<SimulationResult> {
    let params = project_service::build_parameters(reactor)?;
    let started = Instant::now();
    let result = run_simulation(&params)?;
    debug!(
        reactor = %reactor.reactor_name,
        elapsed_us = started.elapsed().as_micros() as u64,
        "simulation finished"
    );

    if options.strict {
        result.nozzle().require_flow()?;
    }
    Ok(result)
}

/// Load and run a single reactor file.
pub fn run_reactor_file(path: &Path, options: &RunOptions) -> AppResult<SimulationResult> {
    let reactor = project_service::load_reactor(path)?;
    info!(path = %path.display(), reactor = %reactor.reactor_name, "running reactor file");
    run_reactor(&reactor, options)
}

/// Run every reactor of a study.
///
/// Output order matches `study.reactors`. A reactor that fails is recorded
/// in its own row and does not stop the others.
pub fn run_study(study: &StudyDef, options: &RunOptions) -> Vec<StudyRun> {
    let started = Instant::now();
    info!(
        study = %study.name,
        reactors = study.reactors.len(),
        parallel = options.parallel,
        "running study"
    );

    let runs = run_batch(&study.reactors, options);

    let failed = runs.iter().filter(|r| !r.is_ok()).count();
    info!(
        study = %study.name,
        completed = runs.len() - failed,
        failed,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "study finished"
    );
    runs
}

/// Evaluate a slice of reactor definitions, preserving order.
pub(crate) fn run_batch(reactors: &[ReactorDef], options: &RunOptions) -> Vec<StudyRun> {
    let evaluate = |reactor: &ReactorDef| {
        let result = run_reactor(reactor, options);
        if let Err(err) = &result {
            warn!(reactor = %reactor.reactor_name, %err, "reactor run failed");
        }
        StudyRun {
            reactor_name: reactor.reactor_name.clone(),
            wall_temperature_limit_k: reactor.wall_temperature_limit_k(),
            result,
        }
    };

    if options.parallel {
        reactors.par_iter().map(evaluate).collect()
    } else {
        reactors.iter().map(evaluate).collect()
    }
}
