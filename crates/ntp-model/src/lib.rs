//! ntp-model: steady-state performance model of a nuclear-thermal rocket.
//!
//! A linear pipeline with no feedback:
//! - [`power`]: axial power-deposition profile over the core
//! - [`channel`]: lumped 1-D energy-balance march giving gas/wall temperatures
//! - [`nozzle`]: ideal isentropic expansion, choked-flow status, thrust and Isp
//! - [`simulation`]: [`run_simulation`] chains the three for one
//!   [`ReactorParameters`]
//!
//! Everything is a pure function of its inputs; independent runs can be
//! evaluated concurrently without coordination.
//!
//! # Example
//!
//! ```no_run
//! use ntp_model::{
//!     CoreGeometry, NozzleGeometry, OperatingPoint, PropellantProperties, ReactorParameters,
//!     run_simulation,
//! };
//! use ntp_core::units::{j_per_kg_k, k, kg_per_mol, kgps, m, m2, pa, w};
//!
//! let params = ReactorParameters::new(
//!     "reference",
//!     OperatingPoint {
//!         total_power: w(500e6),
//!         inlet_temperature: k(300.0),
//!         inlet_pressure: pa(3e6),
//!         mass_flow: kgps(15.0),
//!     },
//!     CoreGeometry { core_length: m(1.2), slice_count: 100 },
//!     NozzleGeometry::new(m2(0.001), m2(0.01)),
//!     PropellantProperties {
//!         specific_heat_cp: j_per_kg_k(14_000.0),
//!         gamma: 1.35,
//!         molar_mass: kg_per_mol(0.002),
//!         absorption_efficiency: 1.0,
//!     },
//! )
//! .unwrap();
//!
//! let result = run_simulation(&params).unwrap();
//! println!("Isp: {:.1} s", result.nozzle().specific_impulse_s);
//! ```

pub mod channel;
pub mod common;
pub mod error;
pub mod nozzle;
pub mod params;
pub mod power;
pub mod simulation;
pub mod traits;

// Re-exports
pub use channel::{ChannelSolver, DEFAULT_WALL_OFFSET_K, ThermalProfile, solve_channel};
pub use error::{ModelError, ModelResult};
pub use nozzle::{
    FlowStatus, NoFlowReason, NozzleConditions, NozzleResult, ThroatPerformance,
    compute_nozzle_performance, critical_pressure, critical_pressure_ratio, throat_performance,
};
pub use params::{
    CoreGeometry, ModelOptions, NozzleGeometry, OperatingPoint, PropellantProperties,
    ReactorParameters,
};
pub use power::{
    AxialProfile, ChoppedCosine, Gaussian, LinearRamp, PowerShapeKind, Uniform,
    generate_power_profile, generate_power_profile_with,
};
pub use simulation::{SimulationResult, StagnationState, run_simulation};
pub use traits::PowerShape;
