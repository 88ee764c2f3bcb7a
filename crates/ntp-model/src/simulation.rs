//! End-to-end run: power profile -> channel march -> nozzle expansion.

use crate::channel::{ChannelSolver, ThermalProfile};
use crate::error::ModelResult;
use crate::nozzle::{NozzleConditions, NozzleResult, ThroatPerformance, throat_performance};
use crate::params::ReactorParameters;
use crate::power::{AxialProfile, generate_power_profile_with};
use ntp_core::units::{Pressure, Temperature, k, pa};
use serde::Serialize;
use tracing::{debug, warn};

/// Nozzle inlet conditions taken from the core exit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StagnationState {
    pub temperature_k: f64,
    pub pressure_pa: f64,
}

impl StagnationState {
    pub fn temperature(&self) -> Temperature {
        k(self.temperature_k)
    }

    pub fn pressure(&self) -> Pressure {
        pa(self.pressure_pa)
    }
}

/// Everything one run produces. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    reactor_name: String,
    power_profile: AxialProfile,
    thermal: ThermalProfile,
    stagnation: StagnationState,
    nozzle: NozzleResult,
    throat: ThroatPerformance,
}

impl SimulationResult {
    pub fn reactor_name(&self) -> &str {
        &self.reactor_name
    }

    /// Name of the power shape used for this run.
    pub fn power_shape(&self) -> &str {
        self.power_profile.shape()
    }

    pub fn positions_m(&self) -> &[f64] {
        self.power_profile.positions_m()
    }

    pub fn power_profile(&self) -> &AxialProfile {
        &self.power_profile
    }

    pub fn thermal(&self) -> &ThermalProfile {
        &self.thermal
    }

    pub fn stagnation(&self) -> &StagnationState {
        &self.stagnation
    }

    pub fn nozzle(&self) -> &NozzleResult {
        &self.nozzle
    }

    pub fn throat(&self) -> &ThroatPerformance {
        &self.throat
    }
}

/// Run the full model for one reactor configuration.
///
/// Pure function of `params`: repeated calls give identical results.
///
/// # Errors
/// Geometry and flow contract violations from the power generator or the
/// channel solver. Nozzle degeneracies are reported in the result, not here.
pub fn run_simulation(params: &ReactorParameters) -> ModelResult<SimulationResult> {
    let name = params.reactor_name();
    let operating = params.operating();
    let geometry = params.geometry();
    let propellant = params.propellant();
    let nozzle_geometry = params.nozzle();
    let options = params.options();

    let power_profile = generate_power_profile_with(
        &options.power_shape,
        operating.total_power,
        geometry.core_length,
        geometry.slice_count,
    )?
    .scaled(propellant.absorption_efficiency);
    debug!(
        reactor = name,
        shape = power_profile.shape(),
        slices = power_profile.slice_count(),
        reactor_w = operating.total_power.value,
        deposited_w = params.deposited_power().value,
        "generated axial power profile"
    );

    let thermal = ChannelSolver::new(options.wall_offset).solve(
        &power_profile,
        operating.mass_flow,
        propellant.specific_heat_cp,
        operating.inlet_temperature,
    )?;
    let stagnation = StagnationState {
        temperature_k: thermal.exit_gas_temperature().value,
        pressure_pa: operating.inlet_pressure.value,
    };
    debug!(
        reactor = name,
        exit_gas_k = stagnation.temperature_k,
        max_wall_k = thermal.max_wall_temperature_k(),
        "marched channel energy balance"
    );

    let conditions = NozzleConditions::new(
        stagnation.temperature(),
        stagnation.pressure(),
        operating.mass_flow,
        propellant.gamma,
        propellant.molar_mass,
    )
    .with_exit_pressure(nozzle_geometry.exit_pressure)
    .with_ambient_pressure(nozzle_geometry.ambient_pressure)
    .with_exit_area(nozzle_geometry.area_exit);
    let nozzle = conditions.compute();
    let throat = throat_performance(&conditions, &nozzle, nozzle_geometry.area_throat);

    match nozzle.no_flow_reason {
        Some(reason) => warn!(reactor = name, %reason, "nozzle reports no flow"),
        None => debug!(
            reactor = name,
            status = %nozzle.status,
            isp_s = nozzle.specific_impulse_s,
            thrust_n = nozzle.thrust_n,
            "computed nozzle performance"
        ),
    }

    Ok(SimulationResult {
        reactor_name: name.to_string(),
        power_profile,
        thermal,
        stagnation,
        nozzle,
        throat,
    })
}
