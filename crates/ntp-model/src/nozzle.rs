//! Ideal isentropic nozzle performance.
//!
//! Expands an ideal gas from stagnation conditions to a stated exit pressure
//! and reports exit velocity, specific impulse, thrust, choked-flow status
//! and exit Mach number.
//!
//! Degenerate inputs are not errors. They produce a `no_flow` result with
//! zeroed performance so a parameter sweep can pass through physically
//! meaningless points without aborting.
//!
//! The choked/unchoked classification is informational: the exit velocity
//! always assumes full expansion to the stated exit pressure. Shocks and
//! flow separation in over-expanded nozzles are not modelled.

use crate::common::is_positive;
use crate::error::{ModelError, ModelResult};
use ntp_core::units::constants::{G0_MPS2, P_ATM_PA, specific_gas_constant};
use ntp_core::units::{Area, MassRate, MolarMass, Pressure, Temperature, pa};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Nozzle flow classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowStatus {
    NoFlow,
    Choked,
    Unchoked,
}

impl FlowStatus {
    pub fn label(self) -> &'static str {
        match self {
            FlowStatus::NoFlow => "no_flow",
            FlowStatus::Choked => "choked",
            FlowStatus::Unchoked => "unchoked",
        }
    }
}

impl fmt::Display for FlowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which degenerate-input rule produced a `no_flow` result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NoFlowReason {
    /// Stagnation temperature, stagnation pressure or mass flow not positive
    NonPositiveInletState,
    /// `gamma <= 1` or `molar_mass <= 0`
    InvalidPropellant { gamma: f64, molar_mass: f64 },
    /// Exit pressure not below stagnation pressure (or negative)
    NoPressureRatio,
}

impl fmt::Display for NoFlowReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoFlowReason::NonPositiveInletState => {
                write!(f, "non-positive stagnation state or mass flow")
            }
            NoFlowReason::InvalidPropellant { gamma, molar_mass } => write!(
                f,
                "invalid propellant (gamma={gamma}, molar_mass={molar_mass} kg/mol)"
            ),
            NoFlowReason::NoPressureRatio => {
                write!(f, "exit pressure not below stagnation pressure")
            }
        }
    }
}

/// Inputs to the nozzle calculation.
///
/// Exit and ambient pressures default to one standard atmosphere. Pressure
/// thrust is only added when an exit area is given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NozzleConditions {
    pub stagnation_temperature: Temperature,
    pub stagnation_pressure: Pressure,
    pub mass_flow: MassRate,
    /// Ratio of specific heats
    pub gamma: f64,
    pub molar_mass: MolarMass,
    pub exit_pressure: Pressure,
    pub ambient_pressure: Pressure,
    pub exit_area: Option<Area>,
}

impl NozzleConditions {
    pub fn new(
        stagnation_temperature: Temperature,
        stagnation_pressure: Pressure,
        mass_flow: MassRate,
        gamma: f64,
        molar_mass: MolarMass,
    ) -> Self {
        Self {
            stagnation_temperature,
            stagnation_pressure,
            mass_flow,
            gamma,
            molar_mass,
            exit_pressure: pa(P_ATM_PA),
            ambient_pressure: pa(P_ATM_PA),
            exit_area: None,
        }
    }

    pub fn with_exit_pressure(mut self, exit_pressure: Pressure) -> Self {
        self.exit_pressure = exit_pressure;
        self
    }

    pub fn with_ambient_pressure(mut self, ambient_pressure: Pressure) -> Self {
        self.ambient_pressure = ambient_pressure;
        self
    }

    pub fn with_exit_area(mut self, exit_area: Area) -> Self {
        self.exit_area = Some(exit_area);
        self
    }

    pub fn compute(&self) -> NozzleResult {
        compute_nozzle_performance(self)
    }

    /// Compute, treating a `no_flow` outcome as an error.
    pub fn compute_strict(&self) -> ModelResult<NozzleResult> {
        self.compute().require_flow()
    }
}

/// Nozzle performance figures and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NozzleResult {
    pub exit_velocity_mps: f64,
    pub specific_impulse_s: f64,
    pub thrust_n: f64,
    pub is_choked: bool,
    pub exit_mach: f64,
    pub status: FlowStatus,
    /// Set only when `status` is `NoFlow`
    pub no_flow_reason: Option<NoFlowReason>,
    /// Critical (sonic-throat) pressure; absent on `no_flow`
    pub critical_pressure_pa: Option<f64>,
    /// Exit static temperature
    pub exit_temperature_k: f64,
    /// Speed of sound at exit static conditions
    pub exit_sound_speed_mps: f64,
}

impl NozzleResult {
    pub fn no_flow(reason: NoFlowReason) -> Self {
        Self {
            exit_velocity_mps: 0.0,
            specific_impulse_s: 0.0,
            thrust_n: 0.0,
            is_choked: false,
            exit_mach: 0.0,
            status: FlowStatus::NoFlow,
            no_flow_reason: Some(reason),
            critical_pressure_pa: None,
            exit_temperature_k: 0.0,
            exit_sound_speed_mps: 0.0,
        }
    }

    pub fn has_flow(&self) -> bool {
        self.status != FlowStatus::NoFlow
    }

    /// Convert a `no_flow` result into an error.
    ///
    /// # Errors
    /// - `InvalidPropellantProperties` when the propellant rule fired
    /// - `NoFlow` for the other degenerate-input rules
    pub fn require_flow(self) -> ModelResult<Self> {
        match self.no_flow_reason {
            None => Ok(self),
            Some(NoFlowReason::InvalidPropellant { gamma, molar_mass }) => {
                Err(ModelError::InvalidPropellantProperties { gamma, molar_mass })
            }
            Some(reason) => Err(ModelError::NoFlow { reason }),
        }
    }
}

/// Critical pressure ratio `(2/(gamma+1))^(gamma/(gamma-1))`.
#[inline]
pub fn critical_pressure_ratio(gamma: f64) -> f64 {
    (2.0 / (gamma + 1.0)).powf(gamma / (gamma - 1.0))
}

/// Pressure below which the flow is choked for a given stagnation pressure.
#[inline]
pub fn critical_pressure(gamma: f64, stagnation_pressure: Pressure) -> Pressure {
    pa(stagnation_pressure.value * critical_pressure_ratio(gamma))
}

/// Ideal isentropic nozzle performance.
///
/// Degenerate inputs are checked in this order and short-circuit to a
/// `no_flow` result:
/// 1. non-positive stagnation temperature, stagnation pressure or mass flow
/// 2. `gamma <= 1` or non-positive molar mass
/// 3. exit pressure at or above stagnation pressure, or negative
pub fn compute_nozzle_performance(conditions: &NozzleConditions) -> NozzleResult {
    let t0 = conditions.stagnation_temperature.value;
    let p0 = conditions.stagnation_pressure.value;
    let mdot = conditions.mass_flow.value;
    let gamma = conditions.gamma;
    let molar_mass = conditions.molar_mass.value;
    let pe = conditions.exit_pressure.value;
    let p_amb = conditions.ambient_pressure.value;

    if !is_positive(t0) || !is_positive(p0) || !is_positive(mdot) {
        return NozzleResult::no_flow(NoFlowReason::NonPositiveInletState);
    }
    if !(gamma.is_finite() && gamma > 1.0) || !is_positive(molar_mass) {
        return NozzleResult::no_flow(NoFlowReason::InvalidPropellant { gamma, molar_mass });
    }
    if !(pe >= 0.0 && pe < p0) {
        return NozzleResult::no_flow(NoFlowReason::NoPressureRatio);
    }

    let r = specific_gas_constant(molar_mass);
    let exponent = (gamma - 1.0) / gamma;
    // T_e / T0 for isentropic expansion to pe
    let temperature_ratio = (pe / p0).powf(exponent);

    let factor = 2.0 * gamma / (gamma - 1.0);
    let exit_velocity = (factor * r * t0 * (1.0 - temperature_ratio)).sqrt();
    let specific_impulse = exit_velocity / G0_MPS2;

    let mut thrust = mdot * exit_velocity;
    if let Some(ae) = conditions.exit_area.filter(|a| a.value > 0.0) {
        thrust += (pe - p_amb) * ae.value;
    }

    let p_crit = critical_pressure(gamma, conditions.stagnation_pressure).value;
    let is_choked = pe <= p_crit;

    let exit_temperature = t0 * temperature_ratio;
    let exit_sound_speed = (gamma * r * exit_temperature).sqrt();
    let exit_mach = if exit_sound_speed > 0.0 {
        exit_velocity / exit_sound_speed
    } else {
        0.0
    };

    NozzleResult {
        exit_velocity_mps: exit_velocity,
        specific_impulse_s: specific_impulse,
        thrust_n: thrust,
        is_choked,
        exit_mach,
        status: if is_choked {
            FlowStatus::Choked
        } else {
            FlowStatus::Unchoked
        },
        no_flow_reason: None,
        critical_pressure_pa: Some(p_crit),
        exit_temperature_k: exit_temperature,
        exit_sound_speed_mps: exit_sound_speed,
    }
}

/// Throat-referenced figures derived from the nozzle result.
///
/// The throat area does not enter the expansion calculation; these numbers
/// show whether the stated throat is consistent with the requested mass flow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThroatPerformance {
    /// Ideal characteristic velocity c* of the gas at stagnation conditions
    pub characteristic_velocity_mps: f64,
    /// Mass flow the throat passes when choked at the stagnation state
    pub choked_mass_flow_kgps: f64,
    /// Requested mass flow over choked throat capacity (1.0 = consistent)
    pub throat_flow_ratio: f64,
    /// Thrust coefficient `F / (P0 * A_t)`
    pub thrust_coefficient: f64,
}

impl ThroatPerformance {
    pub fn zero() -> Self {
        Self {
            characteristic_velocity_mps: 0.0,
            choked_mass_flow_kgps: 0.0,
            throat_flow_ratio: 0.0,
            thrust_coefficient: 0.0,
        }
    }
}

/// Throat metrics for a nozzle that has flow. Zero when `result` is
/// `no_flow` or the throat area is not positive.
pub fn throat_performance(
    conditions: &NozzleConditions,
    result: &NozzleResult,
    area_throat: Area,
) -> ThroatPerformance {
    let a_t = area_throat.value;
    if !result.has_flow() || !is_positive(a_t) {
        return ThroatPerformance::zero();
    }

    let t0 = conditions.stagnation_temperature.value;
    let p0 = conditions.stagnation_pressure.value;
    let mdot = conditions.mass_flow.value;
    let gamma = conditions.gamma;
    let r = specific_gas_constant(conditions.molar_mass.value);

    // (2/(gamma+1))^((gamma+1)/(2*(gamma-1)))
    let choke_factor = (2.0 / (gamma + 1.0)).powf((gamma + 1.0) / (2.0 * (gamma - 1.0)));
    let characteristic_velocity = (r * t0 / gamma).sqrt() / choke_factor;
    let choked_mass_flow = p0 * a_t / characteristic_velocity;

    ThroatPerformance {
        characteristic_velocity_mps: characteristic_velocity,
        choked_mass_flow_kgps: choked_mass_flow,
        throat_flow_ratio: mdot / choked_mass_flow,
        thrust_coefficient: result.thrust_n / (p0 * a_t),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ntp_core::units::{k, kg_per_mol, kgps, m2};
    use ntp_core::{Tolerances, nearly_equal};

    fn hydrogen(t0: f64, p0: f64) -> NozzleConditions {
        NozzleConditions::new(k(t0), pa(p0), kgps(15.0), 1.35, kg_per_mol(0.002))
    }

    #[test]
    fn isp_is_exit_velocity_over_g0() {
        let r = hydrogen(2680.0, 3e6).compute();
        assert!(r.exit_velocity_mps > 0.0);
        assert_eq!(r.specific_impulse_s, r.exit_velocity_mps / 9.80665);
        assert_eq!(r.thrust_n, 15.0 * r.exit_velocity_mps);
        assert_eq!(r.no_flow_reason, None);
    }

    #[test]
    fn expansion_to_sea_level_is_choked_and_supersonic() {
        let r = hydrogen(2680.0, 3e6).compute();
        assert!(r.is_choked);
        assert_eq!(r.status, FlowStatus::Choked);
        assert!(r.exit_mach > 1.0);
        assert!(r.exit_temperature_k < 2680.0);
        assert!(r.specific_impulse_s > 600.0 && r.specific_impulse_s < 800.0);
    }

    #[test]
    fn mild_expansion_is_unchoked_and_subsonic() {
        let r = hydrogen(2000.0, 1.2e5).compute();
        assert!(!r.is_choked);
        assert_eq!(r.status, FlowStatus::Unchoked);
        assert!(r.exit_mach > 0.0 && r.exit_mach < 1.0);
        assert!(r.exit_velocity_mps > 0.0);
    }

    #[test]
    fn choke_boundary_is_inclusive() {
        let p0 = pa(3e6);
        let gamma = 1.35;
        let p_crit = critical_pressure(gamma, p0);
        let r = hydrogen(2500.0, 3e6).with_exit_pressure(p_crit).compute();
        assert!(r.is_choked);
        assert_eq!(r.status, FlowStatus::Choked);
        assert_eq!(r.critical_pressure_pa, Some(p_crit.value));
        // Expanding exactly to the critical pressure gives sonic exit
        assert!(nearly_equal(r.exit_mach, 1.0, Tolerances { abs: 1e-9, rel: 1e-9 }));

        let just_above = pa(p_crit.value * (1.0 + 1e-12));
        let r = hydrogen(2500.0, 3e6).with_exit_pressure(just_above).compute();
        assert!(!r.is_choked);
    }

    #[test]
    fn exit_pressure_at_or_above_stagnation_is_no_flow() {
        for pe in [3e6, 4e6] {
            let r = hydrogen(2500.0, 3e6).with_exit_pressure(pa(pe)).compute();
            assert_eq!(r.status, FlowStatus::NoFlow);
            assert_eq!(r.exit_velocity_mps, 0.0);
            assert_eq!(r.specific_impulse_s, 0.0);
            assert_eq!(r.thrust_n, 0.0);
            assert_eq!(r.exit_mach, 0.0);
            assert!(!r.is_choked);
            assert_eq!(r.no_flow_reason, Some(NoFlowReason::NoPressureRatio));
            assert_eq!(r.critical_pressure_pa, None);
        }
    }

    #[test]
    fn negative_or_nan_exit_pressure_is_no_flow() {
        for pe in [-1.0, -101_325.0, f64::NAN] {
            let r = hydrogen(2500.0, 3e6).with_exit_pressure(pa(pe)).compute();
            assert_eq!(r.status, FlowStatus::NoFlow);
            assert_eq!(r.thrust_n, 0.0);
            assert_eq!(r.no_flow_reason, Some(NoFlowReason::NoPressureRatio));
        }
        // Vacuum exit is still a valid expansion
        let r = hydrogen(2500.0, 3e6).with_exit_pressure(pa(0.0)).compute();
        assert!(r.has_flow());
    }

    #[test]
    fn degenerate_rules_fire_in_order() {
        // Inlet state wins over a bad propellant
        let mut c = hydrogen(0.0, 3e6);
        c.gamma = 0.5;
        assert_eq!(
            c.compute().no_flow_reason,
            Some(NoFlowReason::NonPositiveInletState)
        );

        let mut c = hydrogen(2500.0, 3e6);
        c.mass_flow = kgps(-1.0);
        assert_eq!(
            c.compute().no_flow_reason,
            Some(NoFlowReason::NonPositiveInletState)
        );

        // Propellant wins over a bad pressure ratio
        let mut c = hydrogen(2500.0, 3e6).with_exit_pressure(pa(5e6));
        c.gamma = 1.0;
        assert_eq!(
            c.compute().no_flow_reason,
            Some(NoFlowReason::InvalidPropellant {
                gamma: 1.0,
                molar_mass: 0.002
            })
        );

        let mut c = hydrogen(2500.0, 3e6);
        c.molar_mass = kg_per_mol(-0.002);
        assert!(matches!(
            c.compute().no_flow_reason,
            Some(NoFlowReason::InvalidPropellant { .. })
        ));
    }

    #[test]
    fn nan_inputs_are_no_flow() {
        let r = hydrogen(f64::NAN, 3e6).compute();
        assert_eq!(r.status, FlowStatus::NoFlow);

        let mut c = hydrogen(2500.0, 3e6);
        c.gamma = f64::NAN;
        assert_eq!(c.compute().status, FlowStatus::NoFlow);

        let r = hydrogen(2500.0, 3e6)
            .with_exit_pressure(pa(f64::NAN))
            .compute();
        assert_eq!(r.no_flow_reason, Some(NoFlowReason::NoPressureRatio));
    }

    #[test]
    fn vacuum_expansion_has_zero_exit_temperature() {
        let r = hydrogen(2500.0, 3e6).with_exit_pressure(pa(0.0)).compute();
        assert_eq!(r.status, FlowStatus::Choked);
        assert_eq!(r.exit_temperature_k, 0.0);
        assert_eq!(r.exit_mach, 0.0);
        // Maximum (infinite area ratio) exit velocity
        let r_gas = specific_gas_constant(0.002);
        let v_max = (2.0 * 1.35 / 0.35 * r_gas * 2500.0).sqrt();
        assert!(nearly_equal(r.exit_velocity_mps, v_max, Tolerances::default()));
    }

    #[test]
    fn pressure_thrust_follows_exit_minus_ambient() {
        let base = hydrogen(2500.0, 3e6).with_exit_pressure(pa(2e5));
        let momentum = base.compute().thrust_n;

        let under = base.with_exit_area(m2(0.01)).compute();
        assert!(nearly_equal(
            under.thrust_n,
            momentum + (2e5 - 101_325.0) * 0.01,
            Tolerances::default()
        ));
        assert!(under.thrust_n >= 15.0 * under.exit_velocity_mps);

        let over = hydrogen(2500.0, 3e6)
            .with_exit_pressure(pa(5e4))
            .with_exit_area(m2(0.01))
            .compute();
        assert!(over.thrust_n < 15.0 * over.exit_velocity_mps);

        // Non-positive area means momentum thrust only
        let zero_area = base.with_exit_area(m2(0.0)).compute();
        assert_eq!(zero_area.thrust_n, momentum);
    }

    #[test]
    fn ambient_pressure_only_affects_pressure_thrust() {
        let c = hydrogen(2500.0, 3e6).with_exit_area(m2(0.02));
        let sea = c.compute();
        let vac = c.with_ambient_pressure(pa(0.0)).compute();
        assert_eq!(sea.exit_velocity_mps, vac.exit_velocity_mps);
        assert!(nearly_equal(
            vac.thrust_n - sea.thrust_n,
            101_325.0 * 0.02,
            Tolerances { abs: 1e-6, rel: 1e-9 }
        ));
    }

    #[test]
    fn strict_mode_maps_reasons_to_errors() {
        let mut c = hydrogen(2500.0, 3e6);
        c.gamma = 0.9;
        assert_eq!(
            c.compute_strict(),
            Err(ModelError::InvalidPropellantProperties {
                gamma: 0.9,
                molar_mass: 0.002
            })
        );

        let c = hydrogen(2500.0, 3e6).with_exit_pressure(pa(3e6));
        assert_eq!(
            c.compute_strict(),
            Err(ModelError::NoFlow {
                reason: NoFlowReason::NoPressureRatio
            })
        );

        assert!(hydrogen(2500.0, 3e6).compute_strict().is_ok());
    }

    #[test]
    fn throat_metrics_are_self_consistent() {
        let c = hydrogen(2680.0, 3e6).with_exit_area(m2(0.01));
        let r = c.compute();
        let throat = throat_performance(&c, &r, m2(0.001));

        let tol = Tolerances {
            abs: 1e-9,
            rel: 1e-9,
        };
        assert!(nearly_equal(
            throat.characteristic_velocity_mps,
            3e6 * 0.001 / throat.choked_mass_flow_kgps,
            tol
        ));
        assert!(nearly_equal(
            throat.throat_flow_ratio,
            15.0 / throat.choked_mass_flow_kgps,
            tol
        ));
        assert!(nearly_equal(
            throat.thrust_coefficient,
            r.thrust_n / (3e6 * 0.001),
            tol
        ));
        // Hydrogen c* at ~2700 K is close to 5 km/s
        assert!(throat.characteristic_velocity_mps > 4500.0);
        assert!(throat.characteristic_velocity_mps < 5500.0);
    }

    #[test]
    fn throat_metrics_zero_without_flow() {
        let c = hydrogen(2680.0, 3e6).with_exit_pressure(pa(3e6));
        let r = c.compute();
        assert_eq!(throat_performance(&c, &r, m2(0.001)), ThroatPerformance::zero());
    }

    #[test]
    fn status_labels() {
        assert_eq!(FlowStatus::NoFlow.to_string(), "no_flow");
        assert_eq!(FlowStatus::Choked.to_string(), "choked");
        assert_eq!(FlowStatus::Unchoked.to_string(), "unchoked");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use ntp_core::units::{k, kg_per_mol, kgps, m2};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn valid_expansion_has_positive_performance(
            t0 in 300.0_f64..3500.0,
            p0 in 2e5_f64..1e7,
            pe_frac in 0.001_f64..0.999,
            mdot in 0.1_f64..50.0,
            gamma in 1.05_f64..1.67,
            molar_mass in 0.002_f64..0.05,
            area in 1e-4_f64..1.0,
        ) {
            let pe = p0 * pe_frac;
            let c = NozzleConditions::new(k(t0), pa(p0), kgps(mdot), gamma, kg_per_mol(molar_mass))
                .with_exit_pressure(pa(pe))
                .with_ambient_pressure(pa(pe * 0.5))
                .with_exit_area(m2(area));
            let r = c.compute();

            prop_assert!(r.exit_velocity_mps > 0.0);
            prop_assert_eq!(r.specific_impulse_s, r.exit_velocity_mps / 9.80665);
            // Exit pressure above ambient: pressure thrust is non-negative
            prop_assert!(r.thrust_n >= mdot * r.exit_velocity_mps);
            prop_assert!(r.exit_mach > 0.0);
            prop_assert_eq!(r.is_choked, r.status == FlowStatus::Choked);
        }
    }
}
