//! One-parameter sweeps over a base reactor definition.
//!
//! A sweep expands into an ordinary list of reactor definitions, one per
//! point, and runs through the same batch driver as a study.

use ntp_core::linspace;
use ntp_project::ReactorDef;
use std::fmt;
use std::str::FromStr;
use std::time::Instant;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::run_service::{RunOptions, StudyRun, run_batch};

/// Type of sweep progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepType {
    /// Uniformly spaced points
    Linear,
    /// Logarithmically spaced points
    Logarithmic,
}

/// Reactor input a sweep may vary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepParameter {
    TotalPower,
    MassFlow,
    AreaExit,
    InletPressure,
    ExitPressure,
}

impl SweepParameter {
    pub const ALL: [SweepParameter; 5] = [
        SweepParameter::TotalPower,
        SweepParameter::MassFlow,
        SweepParameter::AreaExit,
        SweepParameter::InletPressure,
        SweepParameter::ExitPressure,
    ];

    pub fn key(self) -> &'static str {
        match self {
            SweepParameter::TotalPower => "total_power",
            SweepParameter::MassFlow => "mass_flow",
            SweepParameter::AreaExit => "area_exit",
            SweepParameter::InletPressure => "inlet_pressure",
            SweepParameter::ExitPressure => "exit_pressure",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            SweepParameter::TotalPower => "W",
            SweepParameter::MassFlow => "kg/s",
            SweepParameter::AreaExit => "m²",
            SweepParameter::InletPressure | SweepParameter::ExitPressure => "Pa",
        }
    }

    pub fn get(self, reactor: &ReactorDef) -> f64 {
        match self {
            SweepParameter::TotalPower => reactor.total_power,
            SweepParameter::MassFlow => reactor.mass_flow,
            SweepParameter::AreaExit => reactor.nozzle.area_exit,
            SweepParameter::InletPressure => reactor.inlet_pressure,
            SweepParameter::ExitPressure => reactor.nozzle.exit_pressure,
        }
    }

    pub fn set(self, reactor: &mut ReactorDef, value: f64) {
        match self {
            SweepParameter::TotalPower => reactor.total_power = value,
            SweepParameter::MassFlow => reactor.mass_flow = value,
            SweepParameter::AreaExit => reactor.nozzle.area_exit = value,
            SweepParameter::InletPressure => reactor.inlet_pressure = value,
            SweepParameter::ExitPressure => reactor.nozzle.exit_pressure = value,
        }
    }
}

impl FromStr for SweepParameter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SweepParameter::ALL
            .into_iter()
            .find(|p| p.key() == s)
            .ok_or_else(|| {
                let keys: Vec<&str> = SweepParameter::ALL.iter().map(|p| p.key()).collect();
                format!("unknown sweep parameter '{}' (expected one of: {})", s, keys.join(", "))
            })
    }
}

/// Definition of a single parameter sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepDefinition {
    pub parameter: SweepParameter,
    /// Start value in SI units
    pub start: f64,
    /// End value in SI units
    pub end: f64,
    pub num_points: usize,
    pub sweep_type: SweepType,
}

impl SweepDefinition {
    pub fn new(
        parameter: SweepParameter,
        start: f64,
        end: f64,
        num_points: usize,
        sweep_type: SweepType,
    ) -> AppResult<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(AppError::InvalidInput(
                "Sweep bounds must be finite".to_string(),
            ));
        }
        if num_points < 2 {
            return Err(AppError::InvalidInput(
                "Sweep must have at least 2 points".to_string(),
            ));
        }
        if (start - end).abs() < 1e-12 {
            return Err(AppError::InvalidInput(
                "Start and end values must be different".to_string(),
            ));
        }
        if sweep_type == SweepType::Logarithmic && (start <= 0.0 || end <= 0.0) {
            return Err(AppError::InvalidInput(
                "Logarithmic sweep bounds must be positive".to_string(),
            ));
        }

        Ok(Self {
            parameter,
            start,
            end,
            num_points,
            sweep_type,
        })
    }

    /// Generate all points in the sweep, endpoints exact.
    pub fn generate_points(&self) -> Vec<f64> {
        match self.sweep_type {
            SweepType::Linear => linspace(self.start, self.end, self.num_points),
            SweepType::Logarithmic => {
                let mut points: Vec<f64> =
                    linspace(self.start.ln(), self.end.ln(), self.num_points)
                        .into_iter()
                        .map(f64::exp)
                        .collect();
                points[0] = self.start;
                points[self.num_points - 1] = self.end;
                points
            }
        }
    }

    /// One reactor definition per point, named after the base reactor and
    /// the swept value.
    pub fn expand(&self, base: &ReactorDef) -> Vec<ReactorDef> {
        self.generate_points()
            .into_iter()
            .map(|value| {
                let mut reactor = base.clone();
                self.parameter.set(&mut reactor, value);
                reactor.reactor_name = format!(
                    "{}[{}={:.6e}]",
                    base.reactor_name,
                    self.parameter.key(),
                    value
                );
                reactor
            })
            .collect()
    }
}

impl fmt::Display for SweepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "Linear"),
            Self::Logarithmic => write!(f, "Logarithmic"),
        }
    }
}

impl fmt::Display for SweepParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl fmt::Display for SweepDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sweep {} from {} to {} {} ({} points, {})",
            self.parameter,
            self.start,
            self.end,
            self.parameter.unit(),
            self.num_points,
            self.sweep_type
        )
    }
}

/// One evaluated sweep point.
#[derive(Debug)]
pub struct SweepRun {
    pub value: f64,
    pub run: StudyRun,
}

/// Run a sweep over `base`. Output is in sweep order.
pub fn run_sweep(base: &ReactorDef, sweep: &SweepDefinition, options: &RunOptions) -> Vec<SweepRun> {
    let started = Instant::now();
    info!(reactor = %base.reactor_name, sweep = %sweep, "running sweep");

    let reactors = sweep.expand(base);
    let runs = run_batch(&reactors, options);

    info!(
        reactor = %base.reactor_name,
        points = runs.len(),
        failed = runs.iter().filter(|r| !r.is_ok()).count(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "sweep finished"
    );

    sweep
        .generate_points()
        .into_iter()
        .zip(runs)
        .map(|(value, run)| SweepRun { value, run })
        .collect()
}
