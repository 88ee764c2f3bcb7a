//! Reactor and study file schema definitions.
//!
//! Field names follow the legacy parameter files (`n_slices`, `cp`,
//! `eta_abs`, `mass_flow_guess`, ...); the newer spellings are accepted as
//! aliases.

use ntp_core::units::constants::P_ATM_PA;
use ntp_model::DEFAULT_WALL_OFFSET_K;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StudyDef {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub reactors: Vec<ReactorDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReactorDef {
    pub reactor_name: String,
    /// W
    pub total_power: f64,
    /// K
    pub inlet_temperature: f64,
    /// Pa
    pub inlet_pressure: f64,
    /// kg/s
    #[serde(alias = "mass_flow_guess")]
    pub mass_flow: f64,
    pub geometry: GeometryDef,
    pub nozzle: NozzleDef,
    pub properties: PropertiesDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub materials: Option<MaterialsDef>,
    #[serde(default)]
    pub model: ModelDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeometryDef {
    /// m
    pub core_length: f64,
    #[serde(alias = "slice_count")]
    pub n_slices: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NozzleDef {
    /// m²
    pub area_throat: f64,
    /// m²
    pub area_exit: f64,
    #[serde(default = "default_p_atm")]
    pub exit_pressure: f64,
    #[serde(default = "default_p_atm")]
    pub ambient_pressure: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PropertiesDef {
    /// J/(kg·K)
    #[serde(alias = "specific_heat_cp")]
    pub cp: f64,
    pub gamma: f64,
    /// kg/mol
    pub molar_mass: f64,
    #[serde(default = "default_eta_abs", alias = "absorption_efficiency")]
    pub eta_abs: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MaterialsDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wall_material: Option<String>,
    /// Maximum allowable wall temperature, K
    #[serde(
        default,
        alias = "inconel718_Tmax",
        skip_serializing_if = "Option::is_none"
    )]
    pub wall_temperature_limit_k: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelDef {
    #[serde(default)]
    pub power_shape: PowerShapeDef,
    #[serde(default = "default_wall_offset_k")]
    pub wall_offset_k: f64,
}

impl Default for ModelDef {
    fn default() -> Self {
        Self {
            power_shape: PowerShapeDef::default(),
            wall_offset_k: default_wall_offset_k(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum PowerShapeDef {
    Gaussian {
        #[serde(default = "default_sigma_fraction")]
        sigma_fraction: f64,
    },
    LinearRamp {
        #[serde(default = "default_ramp_slope")]
        slope: f64,
    },
    ChoppedCosine {
        #[serde(default = "default_extrapolation_fraction")]
        extrapolation_fraction: f64,
    },
    Uniform,
}

impl Default for PowerShapeDef {
    fn default() -> Self {
        PowerShapeDef::Gaussian {
            sigma_fraction: default_sigma_fraction(),
        }
    }
}

impl ReactorDef {
    /// The reference hydrogen configuration used by the interactive tool:
    /// 500 MW, 15 kg/s, 1.2 m core in 100 slices.
    pub fn reference(reactor_name: impl Into<String>) -> Self {
        Self {
            reactor_name: reactor_name.into(),
            total_power: 500e6,
            inlet_temperature: 300.0,
            inlet_pressure: 3e6,
            mass_flow: 15.0,
            geometry: GeometryDef {
                core_length: 1.2,
                n_slices: 100,
            },
            nozzle: NozzleDef {
                area_throat: 0.001,
                area_exit: 0.01,
                exit_pressure: P_ATM_PA,
                ambient_pressure: P_ATM_PA,
            },
            properties: PropertiesDef {
                cp: 14_000.0,
                gamma: 1.35,
                molar_mass: 0.002,
                eta_abs: 1.0,
            },
            materials: Some(MaterialsDef {
                wall_material: Some("inconel718".to_string()),
                wall_temperature_limit_k: Some(1000.0),
            }),
            model: ModelDef::default(),
        }
    }

    pub fn wall_temperature_limit_k(&self) -> Option<f64> {
        self.materials
            .as_ref()
            .and_then(|m| m.wall_temperature_limit_k)
    }
}

fn default_p_atm() -> f64 {
    P_ATM_PA
}

fn default_eta_abs() -> f64 {
    1.0
}

fn default_wall_offset_k() -> f64 {
    DEFAULT_WALL_OFFSET_K
}

fn default_sigma_fraction() -> f64 {
    0.2
}

fn default_ramp_slope() -> f64 {
    1.0
}

fn default_extrapolation_fraction() -> f64 {
    0.1
}
