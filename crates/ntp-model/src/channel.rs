//! 1-D lumped energy-balance march through the coolant channel.
//!
//! Each slice's deposited power raises the bulk gas temperature by
//! `q_i / (mdot * cp)`. There is no axial conduction and no loss to the
//! surroundings. The wall temperature is the gas temperature plus a fixed
//! offset; this stands in for a film-coefficient calculation and is not
//! physically derived.

use crate::common::{check_finite, require_flow};
use crate::error::ModelResult;
use crate::power::AxialProfile;
use ntp_core::units::{MassRate, SpecificHeat, TempInterval, Temperature, dk, k};
use serde::Serialize;

/// Default gas-to-wall offset, K
pub const DEFAULT_WALL_OFFSET_K: f64 = 50.0;

/// Gas and wall temperatures, one entry per slice, index-aligned with the
/// [`AxialProfile`] they were computed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThermalProfile {
    gas_temperature_k: Vec<f64>,
    wall_temperature_k: Vec<f64>,
    wall_offset_k: f64,
}

impl ThermalProfile {
    pub fn gas_temperature_k(&self) -> &[f64] {
        &self.gas_temperature_k
    }

    pub fn wall_temperature_k(&self) -> &[f64] {
        &self.wall_temperature_k
    }

    pub fn wall_offset(&self) -> TempInterval {
        dk(self.wall_offset_k)
    }

    pub fn len(&self) -> usize {
        self.gas_temperature_k.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gas_temperature_k.is_empty()
    }

    /// Gas temperature leaving the last slice: the nozzle stagnation temperature.
    pub fn exit_gas_temperature(&self) -> Temperature {
        // The march always emits one entry per slice and profiles have >= 1 slice
        k(self.gas_temperature_k.last().copied().unwrap_or(f64::NAN))
    }

    /// Hottest wall temperature along the channel.
    pub fn max_wall_temperature_k(&self) -> f64 {
        self.wall_temperature_k
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }
}

/// Forward-marching channel solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelSolver {
    /// Fixed wall-minus-gas temperature offset
    pub wall_offset: TempInterval,
}

impl Default for ChannelSolver {
    fn default() -> Self {
        Self {
            wall_offset: dk(DEFAULT_WALL_OFFSET_K),
        }
    }
}

impl ChannelSolver {
    pub fn new(wall_offset: TempInterval) -> Self {
        Self { wall_offset }
    }

    /// March the energy balance over the profile in axial order.
    ///
    /// # Errors
    /// - `InvalidFlowParameters` if `mass_flow` or `specific_heat_cp` is not
    ///   strictly positive
    /// - `NonFinite` if the inlet temperature or wall offset is not finite
    pub fn solve(
        &self,
        profile: &AxialProfile,
        mass_flow: MassRate,
        specific_heat_cp: SpecificHeat,
        inlet_temperature: Temperature,
    ) -> ModelResult<ThermalProfile> {
        let mdot = require_flow(mass_flow.value, "mass_flow")?;
        let cp = require_flow(specific_heat_cp.value, "specific_heat_cp")?;
        let t_inlet = inlet_temperature.value;
        check_finite(t_inlet, "inlet_temperature")?;
        let offset = self.wall_offset.value;
        check_finite(offset, "wall_offset")?;

        // W/K
        let capacity_rate = mdot * cp;

        let n = profile.slice_count();
        let (_, gas_temperature_k) = profile.power_w().iter().fold(
            (t_inlet, Vec::with_capacity(n)),
            |(t_prev, mut gas), &q| {
                let t = t_prev + q / capacity_rate;
                gas.push(t);
                (t, gas)
            },
        );
        let wall_temperature_k = gas_temperature_k.iter().map(|t| t + offset).collect();

        Ok(ThermalProfile {
            gas_temperature_k,
            wall_temperature_k,
            wall_offset_k: offset,
        })
    }
}

/// March with the default wall offset.
pub fn solve_channel(
    profile: &AxialProfile,
    mass_flow: MassRate,
    specific_heat_cp: SpecificHeat,
    inlet_temperature: Temperature,
) -> ModelResult<ThermalProfile> {
    ChannelSolver::default().solve(profile, mass_flow, specific_heat_cp, inlet_temperature)
}
