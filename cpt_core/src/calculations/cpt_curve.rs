//! # CPT Resistance Curve
//!
//! Evaluates the NorSand correlations for one parameter set and samples the
//! dimensionless CPT resistance `Q(ψ) = k · exp(−m · ψ)` over the state
//! parameter range [-0.3, 0.3].
//!
//! ## Assumptions
//!
//! - The parameter set has already been validated by the input surface
//! - ν is carried with the case but does not enter the correlations
//! - The sample grid is fixed: 100 evenly spaced points including both ends
//!
//! ## Example
//!
//! ```rust
//! use cpt_core::calculations::cpt_curve::{calculate, CptCurveInput};
//! use cpt_core::parameters::ParameterSet;
//!
//! let input = CptCurveInput::new("Case1", ParameterSet::default());
//! let curve = calculate(&input).unwrap();
//!
//! assert_eq!(curve.points.len(), 100);
//! assert!((curve.resistance_at(0.0) - curve.k).abs() < 1e-9);
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use crate::equations::norsand::{
    dimensionless_resistance, k_coefficient, k_coupling_factor, k_csl_factor, k_friction_factor,
    k_hardening_factor, k_rigidity_factor, m_coefficient, m_coupling_factor, m_csl_factor,
    m_friction_factor, m_hardening_factor, m_rigidity_factor, K_RESIDUAL_FACTOR, M_RESIDUAL_FACTOR,
};
use crate::errors::{CalcError, CalcResult};
use crate::parameters::ParameterSet;
use crate::units::rigidity_ratio;

/// Lower end of the state parameter axis
pub const STATE_PARAMETER_MIN: f64 = -0.3;

/// Upper end of the state parameter axis
pub const STATE_PARAMETER_MAX: f64 = 0.3;

/// Number of samples along the state parameter axis
pub const SAMPLE_COUNT: usize = 100;

/// Evenly spaced state parameter samples over [-0.3, 0.3].
///
/// The first and last samples are exactly the range ends; the spacing is
/// `0.6 / 99`.
pub fn state_parameter_samples() -> Vec<f64> {
    let step = (STATE_PARAMETER_MAX - STATE_PARAMETER_MIN) / (SAMPLE_COUNT - 1) as f64;
    let mut samples: Vec<f64> = (0..SAMPLE_COUNT)
        .map(|i| STATE_PARAMETER_MIN + i as f64 * step)
        .collect();
    // Pin the end so accumulated rounding does not move it
    samples[SAMPLE_COUNT - 1] = STATE_PARAMETER_MAX;
    samples
}

/// Intermediate values of the correlations for one parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrelationFactors {
    /// G / p with both in kPa
    pub rigidity_ratio: f64,

    /// f1..f6
    pub k_factors: [f64; 6],

    /// f7..f12
    pub m_factors: [f64; 6],

    /// Resistance at ψ = 0
    pub k: f64,

    /// Exponential decay slope
    pub m: f64,
}

impl CorrelationFactors {
    /// Evaluate f1..f12, k and m.
    ///
    /// No range validation happens here. A non-positive rigidity ratio or a
    /// non-finite k or m is reported as [`CalcError::ComputationFault`].
    pub fn compute(params: &ParameterSet) -> CalcResult<Self> {
        let ratio = rigidity_ratio(params.shear_modulus(), params.mean_effective_stress());
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(CalcError::computation_fault(
                "rigidity ratio",
                format!(
                    "ln(G·1000/p) is undefined for G = {} MPa, p = {} kPa",
                    params.g_mpa(), params.p_kpa()
                ),
            ));
        }

        let k_factors = [
            k_rigidity_factor(ratio),
            k_friction_factor(params.m()),
            k_coupling_factor(params.n()),
            k_hardening_factor(params.h()),
            k_csl_factor(params.lambda()),
            K_RESIDUAL_FACTOR,
        ];
        let m_factors = [
            m_rigidity_factor(ratio),
            m_friction_factor(params.m()),
            m_coupling_factor(params.n()),
            m_hardening_factor(params.h()),
            m_csl_factor(params.lambda()),
            M_RESIDUAL_FACTOR,
        ];

        let k = k_coefficient(k_factors);
        if !k.is_finite() {
            return Err(CalcError::computation_fault(
                "k",
                format!("(f1·…·f6)^1.45 is not finite for factors {:?}", k_factors),
            ));
        }

        let m = m_coefficient(m_factors);
        if !m.is_finite() {
            return Err(CalcError::computation_fault(
                "m",
                format!("1.45·f7·…·f12 is not finite for factors {:?}", m_factors),
            ));
        }

        debug!("rigidity ratio {:.3}: k = {:.4}, m = {:.4}", ratio, k, m);

        Ok(CorrelationFactors {
            rigidity_ratio: ratio,
            k_factors,
            m_factors,
            k,
            m,
        })
    }
}

/// Input for one resistance curve.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Case1",
///   "parameters": {
///     "g_mpa": 50.0, "m": 1.4, "n": 0.3, "h": 200.0,
///     "lambda": 0.03, "nu": 0.2, "p_kpa": 100.0
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CptCurveInput {
    /// Trace label (e.g., "Case1")
    pub label: String,

    /// NorSand parameters
    pub parameters: ParameterSet,
}

impl CptCurveInput {
    pub fn new(label: impl Into<String>, parameters: ParameterSet) -> Self {
        CptCurveInput {
            label: label.into(),
            parameters,
        }
    }
}

/// One (ψ, Q) sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// State parameter ψ
    pub psi: f64,
    /// Dimensionless CPT resistance Q
    pub q: f64,
}

/// Resistance curve for one case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResistanceCurve {
    /// Trace label
    pub label: String,

    /// Resistance at ψ = 0
    pub k: f64,

    /// Exponential decay slope
    pub m: f64,

    /// f1..f12 behind k and m
    pub factors: CorrelationFactors,

    /// Samples in increasing ψ order
    pub points: Vec<CurvePoint>,
}

impl ResistanceCurve {
    /// ψ values of all samples
    pub fn psi_values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.psi).collect()
    }

    /// Q values of all samples
    pub fn q_values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.q).collect()
    }

    /// Evaluate Q at any ψ with this curve's coefficients
    pub fn resistance_at(&self, psi: f64) -> f64 {
        dimensionless_resistance(self.k, self.m, psi)
    }

    /// True when Q strictly decreases from one sample to the next
    pub fn is_strictly_decreasing(&self) -> bool {
        self.points.windows(2).all(|w| w[1].q < w[0].q)
    }
}

/// Evaluate the resistance curve for one case.
///
/// # Returns
///
/// * `Ok(ResistanceCurve)` - 100 samples over [-0.3, 0.3]
/// * `Err(CalcError::ComputationFault)` - A logarithm or power left its domain
pub fn calculate(input: &CptCurveInput) -> CalcResult<ResistanceCurve> {
    let factors = CorrelationFactors::compute(&input.parameters)?;

    let points = state_parameter_samples()
        .into_iter()
        .map(|psi| {
            let q = dimensionless_resistance(factors.k, factors.m, psi);
            if q.is_finite() {
                Ok(CurvePoint { psi, q })
            } else {
                Err(CalcError::computation_fault(
                    "Q",
                    format!("k·exp(−m·ψ) is not finite at ψ = {}", psi),
                ))
            }
        })
        .collect::<CalcResult<Vec<_>>>()?;

    debug!("{}: evaluated {} samples", input.label, points.len());

    Ok(ResistanceCurve {
        label: input.label.clone(),
        k: factors.k,
        m: factors.m,
        factors,
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::ParameterField;

    fn reference_set() -> ParameterSet {
        ParameterSet::new(50.0, 1.4, 0.3, 200.0, 0.03, 0.2, 100.0).unwrap()
    }

    fn curve_for(params: ParameterSet) -> ResistanceCurve {
        calculate(&CptCurveInput::new("Test", params)).unwrap()
    }

    #[test]
    fn test_sample_grid() {
        let samples = state_parameter_samples();
        assert_eq!(samples.len(), 100);
        assert_eq!(samples[0], -0.3);
        assert_eq!(samples[99], 0.3);

        let step = 0.6 / 99.0;
        for pair in samples.windows(2) {
            assert!((pair[1] - pair[0] - step).abs() < 1e-12);
        }
    }

    #[test]
    fn test_factors_match_hand_calculation() {
        let factors = CorrelationFactors::compute(&reference_set()).unwrap();

        // Ir = 50 * 1000 / 100 = 500
        assert!((factors.rigidity_ratio - 500.0).abs() < 1e-12);

        let f1 = 3.79 + 1.12 * 500.0_f64.ln();
        let f2 = 1.0 + 1.06 * (1.4 - 1.25);
        let f3 = 1.0 - 0.30 * (0.3 - 0.2);
        let f4 = (200.0_f64 / 100.0).powf(0.326);
        let f5 = 1.0 - 1.55 * (0.03 - 0.01);
        let f6 = 1.0;
        let k = (f1 * f2 * f3 * f4 * f5 * f6).powf(1.45);

        let f7 = 1.04 + 0.46 * 500.0_f64.ln();
        let f8 = 1.0 - 0.40 * (1.4 - 1.25);
        let f9 = 1.0 - 0.30 * (0.3 - 0.2);
        let f10 = (200.0_f64 / 100.0).powf(0.15);
        let f11 = 1.0 - 2.21 * (0.03 - 0.01);
        let f12 = 1.0;
        let m = 1.45 * f7 * f8 * f9 * f10 * f11 * f12;

        assert!((factors.k - k).abs() < 1e-9);
        assert!((factors.m - m).abs() < 1e-9);
        assert_eq!(factors.k_factors[5], 1.0);
        assert_eq!(factors.m_factors[5], 1.0);

        // k ≈ 49.1779, m ≈ 5.4665
        assert!((factors.k - 49.177877016845).abs() < 1e-6);
        assert!((factors.m - 5.466522386751).abs() < 1e-6);
    }

    #[test]
    fn test_q_at_zero_equals_k() {
        let curve = curve_for(reference_set());
        assert!((curve.resistance_at(0.0) - curve.k).abs() < 1e-9);
    }

    #[test]
    fn test_curve_shape() {
        let curve = curve_for(reference_set());
        assert_eq!(curve.points.len(), SAMPLE_COUNT);
        assert_eq!(curve.points[0].psi, STATE_PARAMETER_MIN);
        assert_eq!(curve.points[SAMPLE_COUNT - 1].psi, STATE_PARAMETER_MAX);
        assert!(curve.is_strictly_decreasing());

        // Exponential decay, not mirror symmetric about ψ = 0
        let dense = curve.resistance_at(-0.3);
        let loose = curve.resistance_at(0.3);
        assert!((dense - curve.k).abs() > (curve.k - loose).abs());
        assert!((dense * loose - curve.k * curve.k).abs() < 1e-6);
    }

    #[test]
    fn test_monotonic_at_range_corners() {
        let low = ParameterSet::new(5.0, 1.0, 0.5, 25.0, 0.07, 0.1, 800.0).unwrap();
        let high = ParameterSet::new(150.0, 1.5, 0.2, 500.0, 0.01, 0.3, 100.0).unwrap();
        for params in [low, high, ParameterSet::default()] {
            let curve = curve_for(params);
            assert!(curve.m > 0.0);
            assert!(curve.k > 0.0);
            assert!(curve.is_strictly_decreasing(), "{:?}", params);
        }
    }

    #[test]
    fn test_identical_sets_give_identical_curves() {
        let a = curve_for(reference_set());
        let b = curve_for(reference_set());
        assert_eq!(a, b);
    }

    #[test]
    fn test_poissons_ratio_does_not_change_curve() {
        let base = curve_for(reference_set());
        let other = curve_for(reference_set().with(ParameterField::PoissonsRatio, 0.3).unwrap());
        assert_eq!(base.points, other.points);
    }

    #[test]
    fn test_higher_stress_lowers_resistance() {
        let shallow = curve_for(reference_set());
        let deep = curve_for(
            reference_set()
                .with(ParameterField::MeanEffectiveStress, 800.0)
                .unwrap(),
        );
        assert!(deep.k < shallow.k);
    }

    #[test]
    fn test_zero_stress_is_computation_fault() {
        let params = ParameterSet::unchecked(50.0, 1.4, 0.3, 200.0, 0.03, 0.2, 0.0);
        let err = calculate(&CptCurveInput::new("Bad", params)).unwrap_err();
        assert_eq!(err.error_code(), "COMPUTATION_FAULT");
    }

    #[test]
    fn test_negative_modulus_is_computation_fault() {
        let params = ParameterSet::unchecked(-10.0, 1.4, 0.3, 200.0, 0.03, 0.2, 100.0);
        let err = CorrelationFactors::compute(&params).unwrap_err();
        match err {
            CalcError::ComputationFault { quantity, .. } => assert_eq!(quantity, "rigidity ratio"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_curve_serialization() {
        let curve = curve_for(reference_set());
        let json = serde_json::to_string(&curve).unwrap();
        let roundtrip: ResistanceCurve = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.label, "Test");
        assert_eq!(roundtrip.points.len(), 100);
        assert_eq!(roundtrip.factors, curve.factors);
    }

    #[test]
    fn test_curve_carries_its_factors() {
        let params = reference_set();
        let curve = curve_for(params);
        assert_eq!(curve.factors, CorrelationFactors::compute(&params).unwrap());
        assert_eq!(curve.factors.k, curve.k);
        assert_eq!(curve.factors.m, curve.m);
        assert_eq!(curve.factors.k_factors[5], 1.0);
        assert_eq!(curve.factors.m_factors[5], 1.0);
    }
}
