//! Axial power-distribution generator.
//!
//! Produces per-slice deposited power over the reactor core from a total
//! thermal power, a core length and a slice count. The shape of the
//! distribution is a [`PowerShape`] policy; whatever the shape, the slice
//! powers are renormalised to sum to the requested total.

use crate::common::{check_finite, require_geometry};
use crate::error::{ModelError, ModelResult};
use crate::traits::PowerShape;
use ntp_core::numeric::linspace;
use ntp_core::units::{Length, Power};
use serde::Serialize;
use std::f64::consts::PI;

/// Centre-peaked Gaussian, centred at mid-core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gaussian {
    /// Standard deviation as a fraction of core length
    pub sigma_fraction: f64,
}

impl Default for Gaussian {
    fn default() -> Self {
        Self {
            sigma_fraction: 0.2,
        }
    }
}

impl PowerShape for Gaussian {
    fn name(&self) -> &str {
        "gaussian"
    }

    fn weight(&self, xi: f64) -> f64 {
        let z = (xi - 0.5) / self.sigma_fraction;
        (-0.5 * z * z).exp()
    }
}

/// Monotonic ramp `1 + slope * xi`.
///
/// Positive slope pushes deposition toward the outlet. Slopes below -1 give
/// negative outlet weights and are rejected by the generator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRamp {
    pub slope: f64,
}

impl Default for LinearRamp {
    fn default() -> Self {
        Self { slope: 1.0 }
    }
}

impl PowerShape for LinearRamp {
    fn name(&self) -> &str {
        "linear_ramp"
    }

    fn weight(&self, xi: f64) -> f64 {
        1.0 + self.slope * xi
    }
}

/// Chopped cosine of a bare cylindrical core.
///
/// The flux vanishes at the extrapolated boundaries, which sit
/// `extrapolation_fraction * L` beyond each physical end of the core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChoppedCosine {
    pub extrapolation_fraction: f64,
}

impl Default for ChoppedCosine {
    fn default() -> Self {
        Self {
            extrapolation_fraction: 0.1,
        }
    }
}

impl PowerShape for ChoppedCosine {
    fn name(&self) -> &str {
        "chopped_cosine"
    }

    fn weight(&self, xi: f64) -> f64 {
        let extrapolated = 1.0 + 2.0 * self.extrapolation_fraction;
        (PI * (xi - 0.5) / extrapolated).cos()
    }
}

/// Flat deposition.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Uniform;

impl PowerShape for Uniform {
    fn name(&self) -> &str {
        "uniform"
    }

    fn weight(&self, _xi: f64) -> f64 {
        1.0
    }
}

/// Closed set of shipped shapes, so a deployment can pick one from
/// configuration and carry it inside [`crate::ReactorParameters`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PowerShapeKind {
    Gaussian(Gaussian),
    LinearRamp(LinearRamp),
    ChoppedCosine(ChoppedCosine),
    Uniform(Uniform),
}

impl Default for PowerShapeKind {
    /// The deployment default is the centre-peaked Gaussian with sigma = L/5.
    fn default() -> Self {
        PowerShapeKind::Gaussian(Gaussian::default())
    }
}

impl PowerShapeKind {
    fn as_shape(&self) -> &dyn PowerShape {
        match self {
            PowerShapeKind::Gaussian(s) => s,
            PowerShapeKind::LinearRamp(s) => s,
            PowerShapeKind::ChoppedCosine(s) => s,
            PowerShapeKind::Uniform(s) => s,
        }
    }
}

impl PowerShape for PowerShapeKind {
    fn name(&self) -> &str {
        self.as_shape().name()
    }

    fn weight(&self, xi: f64) -> f64 {
        self.as_shape().weight(xi)
    }
}

/// Axial positions and per-slice deposited power.
///
/// Invariants: at least one slice, positions non-decreasing in
/// `[0, core_length]`, power entries non-negative and summing to the total
/// requested from the generator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxialProfile {
    shape: String,
    positions_m: Vec<f64>,
    power_w: Vec<f64>,
}

impl AxialProfile {
    /// Name of the shape that produced this profile.
    pub fn shape(&self) -> &str {
        &self.shape
    }

    pub fn positions_m(&self) -> &[f64] {
        &self.positions_m
    }

    pub fn power_w(&self) -> &[f64] {
        &self.power_w
    }

    pub fn slice_count(&self) -> usize {
        self.power_w.len()
    }

    /// Sum of slice powers.
    pub fn total_power_w(&self) -> f64 {
        self.power_w.iter().sum()
    }

    /// Same shape with every slice multiplied by `factor`.
    pub fn scaled(mut self, factor: f64) -> Self {
        for q in &mut self.power_w {
            *q *= factor;
        }
        self
    }
}

/// Generate a profile with the default (Gaussian) shape.
pub fn generate_power_profile(
    total_power: Power,
    core_length: Length,
    slice_count: usize,
) -> ModelResult<AxialProfile> {
    generate_power_profile_with(
        &PowerShapeKind::default(),
        total_power,
        core_length,
        slice_count,
    )
}

/// Generate a profile with an explicit shape policy.
///
/// # Errors
/// - `InvalidGeometry` if `total_power` or `core_length` is not strictly
///   positive, or `slice_count` is zero
/// - `InvalidPowerShape` if the shape yields a non-finite or negative
///   weight, or weights that sum to zero
pub fn generate_power_profile_with(
    shape: &dyn PowerShape,
    total_power: Power,
    core_length: Length,
    slice_count: usize,
) -> ModelResult<AxialProfile> {
    let total_w = require_geometry(total_power.value, "total_power")?;
    let length_m = require_geometry(core_length.value, "core_length")?;
    if slice_count == 0 {
        return Err(ModelError::InvalidGeometry {
            what: "slice_count",
            value: 0.0,
        });
    }

    let positions_m = linspace(0.0, length_m, slice_count);
    let weights: Vec<f64> = positions_m
        .iter()
        .map(|&x| shape.weight(x / length_m))
        .collect();

    let invalid = |what| ModelError::InvalidPowerShape {
        shape: shape.name().to_string(),
        what,
    };
    if weights.iter().any(|w| !w.is_finite()) {
        return Err(invalid("non-finite weight"));
    }
    if weights.iter().any(|&w| w < 0.0) {
        return Err(invalid("negative weight"));
    }
    let weight_sum: f64 = weights.iter().sum();
    if !(weight_sum.is_finite() && weight_sum > 0.0) {
        return Err(invalid("weights sum to zero"));
    }

    let power_w: Vec<f64> = weights
        .iter()
        .map(|w| total_w * (w / weight_sum))
        .collect();
    for q in &power_w {
        check_finite(*q, "slice power")?;
    }

    Ok(AxialProfile {
        shape: shape.name().to_string(),
        positions_m,
        power_w,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ntp_core::units::{m, w};
    use ntp_core::{Tolerances, nearly_equal};

    #[test]
    fn scaling_keeps_positions_and_shape() {
        let full = generate_power_profile(w(1e6), m(1.0), 20).unwrap();
        let half = full.clone().scaled(0.5);
        assert_eq!(half.positions_m(), full.positions_m());
        assert_eq!(half.shape(), "gaussian");
        assert!(nearly_equal(half.total_power_w(), 0.5e6, Tolerances::default()));

        let none = full.scaled(0.0);
        assert!(none.power_w().iter().all(|&q| q == 0.0));
    }

    #[test]
    fn default_profile_sums_to_total() {
        let profile = generate_power_profile(w(500e6), m(1.2), 100).unwrap();
        assert_eq!(profile.slice_count(), 100);
        assert_eq!(profile.shape(), "gaussian");
        assert!(nearly_equal(
            profile.total_power_w(),
            500e6,
            Tolerances::default()
        ));
    }

    #[test]
    fn positions_span_core_inclusive() {
        let profile = generate_power_profile(w(1e6), m(1.2), 7).unwrap();
        let x = profile.positions_m();
        assert_eq!(x[0], 0.0);
        assert_eq!(x[6], 1.2);
        assert!(x.windows(2).all(|p| p[1] > p[0]));
    }

    #[test]
    fn single_slice_carries_full_power() {
        for shape in [
            PowerShapeKind::default(),
            PowerShapeKind::LinearRamp(LinearRamp::default()),
            PowerShapeKind::ChoppedCosine(ChoppedCosine::default()),
            PowerShapeKind::Uniform(Uniform),
        ] {
            let profile = generate_power_profile_with(&shape, w(2.5e8), m(0.8), 1).unwrap();
            assert_eq!(profile.positions_m(), &[0.0]);
            assert_eq!(profile.power_w(), &[2.5e8]);
        }
    }

    #[test]
    fn gaussian_peaks_at_mid_core() {
        let profile = generate_power_profile(w(1e6), m(1.0), 101).unwrap();
        let q = profile.power_w();
        let (peak_idx, _) = q
            .iter()
            .enumerate()
            .fold((0, f64::MIN), |acc, (i, &v)| if v > acc.1 { (i, v) } else { acc });
        assert_eq!(peak_idx, 50);
        assert!(nearly_equal(q[0], q[100], Tolerances::default()));
    }

    #[test]
    fn ramp_increases_toward_outlet() {
        let shape = LinearRamp { slope: 2.0 };
        let profile = generate_power_profile_with(&shape, w(1e6), m(1.0), 20).unwrap();
        assert!(profile.power_w().windows(2).all(|p| p[1] > p[0]));
        // Outlet weight is 3x inlet weight
        let q = profile.power_w();
        assert!(nearly_equal(q[19] / q[0], 3.0, Tolerances::default()));
    }

    #[test]
    fn chopped_cosine_is_symmetric_and_positive() {
        let shape = ChoppedCosine::default();
        let profile = generate_power_profile_with(&shape, w(1e6), m(1.0), 11).unwrap();
        let q = profile.power_w();
        assert!(q.iter().all(|&v| v > 0.0));
        assert!(nearly_equal(q[0], q[10], Tolerances::default()));
        assert!(q[5] > q[0]);
    }

    #[test]
    fn uniform_splits_evenly() {
        let profile = generate_power_profile_with(&Uniform, w(100.0), m(1.0), 4).unwrap();
        assert_eq!(profile.power_w(), &[25.0, 25.0, 25.0, 25.0]);
    }

    #[test]
    fn rejects_bad_geometry() {
        assert!(matches!(
            generate_power_profile(w(1e6), m(0.0), 10),
            Err(ModelError::InvalidGeometry {
                what: "core_length",
                ..
            })
        ));
        assert!(matches!(
            generate_power_profile(w(1e6), m(1.0), 0),
            Err(ModelError::InvalidGeometry {
                what: "slice_count",
                ..
            })
        ));
        assert!(matches!(
            generate_power_profile(w(-5.0), m(1.0), 10),
            Err(ModelError::InvalidGeometry {
                what: "total_power",
                ..
            })
        ));
        assert!(matches!(
            generate_power_profile(w(f64::NAN), m(1.0), 10),
            Err(ModelError::InvalidGeometry { .. })
        ));
    }

    #[test]
    fn rejects_negative_shape() {
        let shape = LinearRamp { slope: -3.0 };
        let err = generate_power_profile_with(&shape, w(1e6), m(1.0), 10).unwrap_err();
        assert!(matches!(err, ModelError::InvalidPowerShape { .. }));
    }

    #[test]
    fn rejects_zero_weight_shape() {
        // Vanishes at the outlet, but a single slice sits at the inlet
        let shape = LinearRamp { slope: -1.0 };
        let ok = generate_power_profile_with(&shape, w(1e6), m(1.0), 1);
        assert!(ok.is_ok());

        #[derive(Debug)]
        struct Dead;
        impl PowerShape for Dead {
            fn name(&self) -> &str {
                "dead"
            }
            fn weight(&self, _xi: f64) -> f64 {
                0.0
            }
        }
        let err = generate_power_profile_with(&Dead, w(1e6), m(1.0), 5).unwrap_err();
        assert_eq!(
            err,
            ModelError::InvalidPowerShape {
                shape: "dead".into(),
                what: "weights sum to zero"
            }
        );
    }
}
