//! Reactor and study loading, saving, validation, and introspection.

use ntp_model::{PowerShape, ReactorParameters};
use ntp_project::{LATEST_VERSION, ReactorDef, StudyDef};
use std::path::Path;

use crate::error::{AppError, AppResult};

/// Summary of a reactor definition for listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ReactorSummary {
    pub name: String,
    pub total_power_w: f64,
    pub mass_flow_kgps: f64,
    pub slice_count: usize,
    pub power_shape: String,
    pub wall_temperature_limit_k: Option<f64>,
}

pub fn load_reactor(path: &Path) -> AppResult<ReactorDef> {
    Ok(ntp_project::load_reactor(path)?)
}

pub fn save_reactor(path: &Path, reactor: &ReactorDef) -> AppResult<()> {
    Ok(ntp_project::save_reactor(path, reactor)?)
}

pub fn load_study(path: &Path) -> AppResult<StudyDef> {
    Ok(ntp_project::load_study(path)?)
}

pub fn save_study(path: &Path, study: &StudyDef) -> AppResult<()> {
    Ok(ntp_project::save_study(path, study)?)
}

/// Wrap a single reactor as a one-entry study.
pub fn single_reactor_study(reactor: ReactorDef) -> StudyDef {
    StudyDef {
        version: LATEST_VERSION,
        name: reactor.reactor_name.clone(),
        reactors: vec![reactor],
    }
}

/// Build validated model parameters for one definition.
pub fn build_parameters(reactor: &ReactorDef) -> AppResult<ReactorParameters> {
    reactor.to_parameters().map_err(|e| {
        AppError::Validation(format!("reactor '{}': {}", reactor.reactor_name, e))
    })
}

/// Full check of a study: file structure plus model construction for every
/// reactor. Stops at the first failure.
pub fn validate_study(study: &StudyDef) -> AppResult<()> {
    if study.reactors.is_empty() {
        return Err(AppError::Validation(format!(
            "study '{}' has no reactors",
            study.name
        )));
    }
    ntp_project::validate_study(study).map_err(|e| AppError::Validation(e.to_string()))?;
    for reactor in &study.reactors {
        build_parameters(reactor)?;
    }
    Ok(())
}

pub fn list_reactors(study: &StudyDef) -> Vec<ReactorSummary> {
    study
        .reactors
        .iter()
        .map(|r| ReactorSummary {
            name: r.reactor_name.clone(),
            total_power_w: r.total_power,
            mass_flow_kgps: r.mass_flow,
            slice_count: r.geometry.n_slices,
            power_shape: r.model.power_shape.to_kind().name().to_string(),
            wall_temperature_limit_k: r.wall_temperature_limit_k(),
        })
        .collect()
}
