//! Strongly-typed reactor run parameters.
//!
//! Geometry and flow inputs are validated once, in [`ReactorParameters::new`].
//! Propellant `gamma` and molar mass are not checked here; the nozzle reports
//! a non-physical propellant as `no_flow`.

use crate::channel::DEFAULT_WALL_OFFSET_K;
use crate::common::{check_finite, require_flow, require_geometry};
use crate::error::{ModelError, ModelResult};
use crate::power::PowerShapeKind;
use ntp_core::units::constants::P_ATM_PA;
use ntp_core::units::{
    Area, Length, MassRate, MolarMass, Power, Pressure, SpecificHeat, TempInterval, Temperature,
    dk, pa,
};

/// Reactor operating point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatingPoint {
    /// Total reactor thermal power
    pub total_power: Power,
    pub inlet_temperature: Temperature,
    /// Also taken as the nozzle stagnation pressure (no core pressure drop)
    pub inlet_pressure: Pressure,
    pub mass_flow: MassRate,
}

/// Axial discretisation of the core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoreGeometry {
    pub core_length: Length,
    pub slice_count: usize,
}

/// Nozzle areas and back-pressure conditions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NozzleGeometry {
    pub area_throat: Area,
    pub area_exit: Area,
    /// Pressure the flow is expanded to
    pub exit_pressure: Pressure,
    pub ambient_pressure: Pressure,
}

impl NozzleGeometry {
    /// Areas with sea-level exit and ambient pressure.
    pub fn new(area_throat: Area, area_exit: Area) -> Self {
        Self {
            area_throat,
            area_exit,
            exit_pressure: pa(P_ATM_PA),
            ambient_pressure: pa(P_ATM_PA),
        }
    }
}

/// Propellant properties (calorically perfect ideal gas).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropellantProperties {
    pub specific_heat_cp: SpecificHeat,
    /// Ratio of specific heats
    pub gamma: f64,
    pub molar_mass: MolarMass,
    /// Fraction of reactor power deposited in the propellant, in [0, 1]
    pub absorption_efficiency: f64,
}

/// Model policy choices for a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelOptions {
    pub power_shape: PowerShapeKind,
    pub wall_offset: TempInterval,
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            power_shape: PowerShapeKind::default(),
            wall_offset: dk(DEFAULT_WALL_OFFSET_K),
        }
    }
}

/// Validated input to [`crate::run_simulation`].
#[derive(Debug, Clone, PartialEq)]
pub struct ReactorParameters {
    reactor_name: String,
    operating: OperatingPoint,
    geometry: CoreGeometry,
    nozzle: NozzleGeometry,
    propellant: PropellantProperties,
    options: ModelOptions,
}

impl ReactorParameters {
    /// Build parameters with default model options.
    ///
    /// # Errors
    /// - `InvalidGeometry` for non-positive power, core length, nozzle
    ///   areas, or a zero slice count
    /// - `InvalidFlowParameters` for non-positive mass flow, cp, inlet
    ///   temperature or inlet pressure, or an absorption efficiency outside
    ///   `[0, 1]`
    /// - `NonFinite` for non-finite exit/ambient pressure
    pub fn new(
        reactor_name: impl Into<String>,
        operating: OperatingPoint,
        geometry: CoreGeometry,
        nozzle: NozzleGeometry,
        propellant: PropellantProperties,
    ) -> ModelResult<Self> {
        Self::with_options(
            reactor_name,
            operating,
            geometry,
            nozzle,
            propellant,
            ModelOptions::default(),
        )
    }

    /// Build parameters with explicit model options.
    pub fn with_options(
        reactor_name: impl Into<String>,
        operating: OperatingPoint,
        geometry: CoreGeometry,
        nozzle: NozzleGeometry,
        propellant: PropellantProperties,
        options: ModelOptions,
    ) -> ModelResult<Self> {
        let params = Self {
            reactor_name: reactor_name.into(),
            operating,
            geometry,
            nozzle,
            propellant,
            options,
        };
        params.validate()?;
        Ok(params)
    }

    fn validate(&self) -> ModelResult<()> {
        require_geometry(self.operating.total_power.value, "total_power")?;
        require_geometry(self.geometry.core_length.value, "core_length")?;
        if self.geometry.slice_count == 0 {
            return Err(ModelError::InvalidGeometry {
                what: "slice_count",
                value: 0.0,
            });
        }
        require_geometry(self.nozzle.area_throat.value, "area_throat")?;
        require_geometry(self.nozzle.area_exit.value, "area_exit")?;

        require_flow(self.operating.mass_flow.value, "mass_flow")?;
        require_flow(self.propellant.specific_heat_cp.value, "specific_heat_cp")?;
        require_flow(self.operating.inlet_temperature.value, "inlet_temperature")?;
        require_flow(self.operating.inlet_pressure.value, "inlet_pressure")?;
        let eta = self.propellant.absorption_efficiency;
        if !(0.0..=1.0).contains(&eta) {
            return Err(ModelError::InvalidFlowParameters {
                what: "absorption_efficiency",
                value: eta,
            });
        }

        check_finite(self.nozzle.exit_pressure.value, "exit_pressure")?;
        check_finite(self.nozzle.ambient_pressure.value, "ambient_pressure")?;
        check_finite(self.options.wall_offset.value, "wall_offset")?;
        Ok(())
    }

    pub fn reactor_name(&self) -> &str {
        &self.reactor_name
    }

    pub fn operating(&self) -> &OperatingPoint {
        &self.operating
    }

    pub fn geometry(&self) -> &CoreGeometry {
        &self.geometry
    }

    pub fn nozzle(&self) -> &NozzleGeometry {
        &self.nozzle
    }

    pub fn propellant(&self) -> &PropellantProperties {
        &self.propellant
    }

    pub fn options(&self) -> &ModelOptions {
        &self.options
    }

    /// Power actually deposited in the propellant.
    pub fn deposited_power(&self) -> Power {
        self.operating.total_power * self.propellant.absorption_efficiency
    }
}
