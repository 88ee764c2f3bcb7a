//! ntp-project: reactor and study file formats and validation.

pub mod convert;
pub mod schema;
pub mod validate;

pub use schema::*;
pub use validate::{LATEST_VERSION, ValidationError, validate_reactor, validate_study};

use std::path::Path;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Model error: {0}")]
    Model(#[from] ntp_model::ModelError),

    #[error("Unsupported file format: {path} (expected .yaml, .yml or .json)")]
    UnsupportedFormat { path: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// On-disk encoding, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Yaml,
    Json,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> ProjectResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("yaml" | "yml") => Ok(FileFormat::Yaml),
            Some("json") => Ok(FileFormat::Json),
            _ => Err(ProjectError::UnsupportedFormat {
                path: path.display().to_string(),
            }),
        }
    }
}

fn read<T: serde::de::DeserializeOwned>(path: &Path) -> ProjectResult<T> {
    let format = FileFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)?;
    Ok(match format {
        FileFormat::Yaml => serde_yaml::from_str(&content)?,
        FileFormat::Json => serde_json::from_str(&content)?,
    })
}

fn write<T: serde::Serialize>(path: &Path, value: &T) -> ProjectResult<()> {
    let content = match FileFormat::from_path(path)? {
        FileFormat::Yaml => serde_yaml::to_string(value)?,
        FileFormat::Json => serde_json::to_string_pretty(value)?,
    };
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_reactor(path: &Path) -> ProjectResult<ReactorDef> {
    let reactor: ReactorDef = read(path)?;
    validate_reactor(&reactor)?;
    Ok(reactor)
}

pub fn save_reactor(path: &Path, reactor: &ReactorDef) -> ProjectResult<()> {
    validate_reactor(reactor)?;
    write(path, reactor)
}

pub fn load_study(path: &Path) -> ProjectResult<StudyDef> {
    let study: StudyDef = read(path)?;
    validate_study(&study)?;
    Ok(study)
}

pub fn save_study(path: &Path, study: &StudyDef) -> ProjectResult<()> {
    validate_study(study)?;
    write(path, study)
}
