//! Conversion from file definitions to validated model parameters.

use crate::schema::{PowerShapeDef, ReactorDef};
use ntp_core::units::{dk, j_per_kg_k, k, kg_per_mol, kgps, m, m2, pa, w};
use ntp_model::{
    ChoppedCosine, CoreGeometry, Gaussian, LinearRamp, ModelOptions, ModelResult, NozzleGeometry,
    OperatingPoint, PowerShapeKind, PropellantProperties, ReactorParameters, Uniform,
};

impl PowerShapeDef {
    pub fn to_kind(&self) -> PowerShapeKind {
        match *self {
            PowerShapeDef::Gaussian { sigma_fraction } => {
                PowerShapeKind::Gaussian(Gaussian { sigma_fraction })
            }
            PowerShapeDef::LinearRamp { slope } => PowerShapeKind::LinearRamp(LinearRamp { slope }),
            PowerShapeDef::ChoppedCosine {
                extrapolation_fraction,
            } => PowerShapeKind::ChoppedCosine(ChoppedCosine {
                extrapolation_fraction,
            }),
            PowerShapeDef::Uniform => PowerShapeKind::Uniform(Uniform),
        }
    }
}

impl ReactorDef {
    /// Build validated model parameters from this definition.
    pub fn to_parameters(&self) -> ModelResult<ReactorParameters> {
        ReactorParameters::with_options(
            self.reactor_name.clone(),
            OperatingPoint {
                total_power: w(self.total_power),
                inlet_temperature: k(self.inlet_temperature),
                inlet_pressure: pa(self.inlet_pressure),
                mass_flow: kgps(self.mass_flow),
            },
            CoreGeometry {
                core_length: m(self.geometry.core_length),
                slice_count: self.geometry.n_slices,
            },
            NozzleGeometry {
                area_throat: m2(self.nozzle.area_throat),
                area_exit: m2(self.nozzle.area_exit),
                exit_pressure: pa(self.nozzle.exit_pressure),
                ambient_pressure: pa(self.nozzle.ambient_pressure),
            },
            PropellantProperties {
                specific_heat_cp: j_per_kg_k(self.properties.cp),
                gamma: self.properties.gamma,
                molar_mass: kg_per_mol(self.properties.molar_mass),
                absorption_efficiency: self.properties.eta_abs,
            },
            ModelOptions {
                power_shape: self.model.power_shape.to_kind(),
                wall_offset: dk(self.model.wall_offset_k),
            },
        )
    }
}
