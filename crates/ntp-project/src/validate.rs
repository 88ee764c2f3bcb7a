//! Study and reactor file validation.
//!
//! This is the file-level check: names, versions and finiteness. Physical
//! range checks live in `ntp_model::ReactorParameters` and run when a
//! definition is converted.

use crate::schema::{PowerShapeDef, ReactorDef, StudyDef};
use std::collections::HashSet;

pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Duplicate reactor name: {name} in {context}")]
    DuplicateName { name: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_study(study: &StudyDef) -> Result<(), ValidationError> {
    if study.version == 0 || study.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: study.version,
        });
    }

    let mut names = HashSet::new();
    for reactor in &study.reactors {
        if !names.insert(reactor.reactor_name.as_str()) {
            return Err(ValidationError::DuplicateName {
                name: reactor.reactor_name.clone(),
                context: format!("study '{}'", study.name),
            });
        }
        validate_reactor(reactor)?;
    }

    Ok(())
}

pub fn validate_reactor(reactor: &ReactorDef) -> Result<(), ValidationError> {
    if reactor.reactor_name.trim().is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "reactor_name".to_string(),
            value: format!("{:?}", reactor.reactor_name),
            reason: "must not be empty".to_string(),
        });
    }

    let name = &reactor.reactor_name;
    let fields = [
        ("total_power", reactor.total_power),
        ("inlet_temperature", reactor.inlet_temperature),
        ("inlet_pressure", reactor.inlet_pressure),
        ("mass_flow", reactor.mass_flow),
        ("geometry.core_length", reactor.geometry.core_length),
        ("nozzle.area_throat", reactor.nozzle.area_throat),
        ("nozzle.area_exit", reactor.nozzle.area_exit),
        ("nozzle.exit_pressure", reactor.nozzle.exit_pressure),
        ("nozzle.ambient_pressure", reactor.nozzle.ambient_pressure),
        ("properties.cp", reactor.properties.cp),
        ("properties.gamma", reactor.properties.gamma),
        ("properties.molar_mass", reactor.properties.molar_mass),
        ("properties.eta_abs", reactor.properties.eta_abs),
        ("model.wall_offset_k", reactor.model.wall_offset_k),
    ];
    for (field, value) in fields {
        validate_finite(name, field, value)?;
    }

    if let Some(limit) = reactor.wall_temperature_limit_k()
        && (!limit.is_finite() || limit <= 0.0)
    {
        return Err(ValidationError::InvalidValue {
            field: format!("reactor '{}' materials.wall_temperature_limit_k", name),
            value: limit.to_string(),
            reason: "must be positive and finite".to_string(),
        });
    }

    let shape_param = match reactor.model.power_shape {
        PowerShapeDef::Gaussian { sigma_fraction } => Some(("sigma_fraction", sigma_fraction)),
        PowerShapeDef::LinearRamp { slope } => Some(("slope", slope)),
        PowerShapeDef::ChoppedCosine {
            extrapolation_fraction,
        } => Some(("extrapolation_fraction", extrapolation_fraction)),
        PowerShapeDef::Uniform => None,
    };
    if let Some((field, value)) = shape_param {
        validate_finite(name, &format!("model.power_shape.{field}"), value)?;
    }

    Ok(())
}

fn validate_finite(reactor: &str, field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::InvalidValue {
            field: format!("reactor '{}' {}", reactor, field),
            value: value.to_string(),
            reason: "must be finite".to_string(),
        });
    }
    Ok(())
}
