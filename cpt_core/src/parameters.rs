//! # NorSand Parameters
//!
//! The seven scalar inputs of one calculation case, plus the metadata an input
//! surface needs to build its controls (labels, units, ranges, defaults and
//! slider steps).
//!
//! ## Ranges
//!
//! | Field    | Symbol | Unit | Min  | Max  | Default | Step |
//! |----------|--------|------|------|------|---------|------|
//! | `g_mpa`  | G      | MPa  | 5    | 150  | 50      | -    |
//! | `m`      | M      | -    | 1.0  | 1.5  | 1.4     | 0.05 |
//! | `n`      | N      | -    | 0.2  | 0.5  | 0.3     | 0.1  |
//! | `h`      | H      | -    | 25   | 500  | 200     | -    |
//! | `lambda` | λ      | -    | 0.01 | 0.07 | 0.03    | 0.01 |
//! | `nu`     | ν      | -    | 0.1  | 0.3  | 0.2     | 0.05 |
//! | `p_kpa`  | p      | kPa  | 100  | 800  | 100     | 100  |
//!
//! Fields with a step only accept values on the slider grid `min + k·step`.
//! G and H are continuous.
//!
//! ## Example
//!
//! ```rust
//! use cpt_core::parameters::ParameterSet;
//!
//! let dense = ParameterSet::new(80.0, 1.3, 0.3, 300.0, 0.02, 0.2, 200.0).unwrap();
//! assert_eq!(dense.g_mpa(), 80.0);
//!
//! // Out of range: G above 150 MPa
//! assert!(ParameterSet::new(200.0, 1.3, 0.3, 300.0, 0.02, 0.2, 200.0).is_err());
//!
//! // Off the slider grid: p moves in steps of 100 kPa
//! assert!(ParameterSet::new(80.0, 1.3, 0.3, 300.0, 0.02, 0.2, 250.0).is_err());
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{Kilopascals, Megapascals};

/// Allowed distance from a whole number of steps, in units of the step
const STEP_TOLERANCE: f64 = 1e-9;

/// Inclusive numeric range for a parameter, with an optional slider step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterRange {
    pub min: f64,
    pub max: f64,
    pub step: Option<f64>,
}

impl ParameterRange {
    const fn new(min: f64, max: f64, step: Option<f64>) -> Self {
        ParameterRange { min, max, step }
    }

    /// True when `value` is finite and inside `[min, max]`
    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }

    /// True when `value` lies on the grid `min + k·step`. Always true without a step.
    pub fn on_step(&self, value: f64) -> bool {
        match self.step {
            Some(step) => {
                let steps = (value - self.min) / step;
                (steps - steps.round()).abs() <= STEP_TOLERANCE
            }
            None => true,
        }
    }
}

/// Identifies one field of a [`ParameterSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterField {
    /// Maximum elastic shear modulus G (MPa)
    ShearModulus,
    /// Critical state friction ratio M
    FrictionRatio,
    /// Volumetric coupling coefficient N
    VolumetricCoupling,
    /// Plastic hardening modulus H
    HardeningModulus,
    /// Slope of the critical state line λ
    CslSlope,
    /// Poisson's ratio ν
    PoissonsRatio,
    /// Mean effective stress p (kPa)
    MeanEffectiveStress,
}

impl ParameterField {
    /// All fields in input-surface order
    pub const ALL: [ParameterField; 7] = [
        ParameterField::ShearModulus,
        ParameterField::FrictionRatio,
        ParameterField::VolumetricCoupling,
        ParameterField::HardeningModulus,
        ParameterField::CslSlope,
        ParameterField::PoissonsRatio,
        ParameterField::MeanEffectiveStress,
    ];

    /// JSON key of the field in a serialized [`ParameterSet`]
    pub fn key(&self) -> &'static str {
        match self {
            ParameterField::ShearModulus => "g_mpa",
            ParameterField::FrictionRatio => "m",
            ParameterField::VolumetricCoupling => "n",
            ParameterField::HardeningModulus => "h",
            ParameterField::CslSlope => "lambda",
            ParameterField::PoissonsRatio => "nu",
            ParameterField::MeanEffectiveStress => "p_kpa",
        }
    }

    /// Short label as shown next to a slider
    pub fn label(&self) -> &'static str {
        match self {
            ParameterField::ShearModulus => "G (MPa)",
            ParameterField::FrictionRatio => "M",
            ParameterField::VolumetricCoupling => "N",
            ParameterField::HardeningModulus => "H",
            ParameterField::CslSlope => "λ",
            ParameterField::PoissonsRatio => "ν",
            ParameterField::MeanEffectiveStress => "p (kPa)",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ParameterField::ShearModulus => "Maximum elastic shear modulus",
            ParameterField::FrictionRatio => "Critical state friction ratio",
            ParameterField::VolumetricCoupling => "Volumetric coupling coefficient",
            ParameterField::HardeningModulus => "Plastic hardening modulus",
            ParameterField::CslSlope => "Slope of CSL",
            ParameterField::PoissonsRatio => "Poisson's ratio",
            ParameterField::MeanEffectiveStress => "Mean effective stress",
        }
    }

    pub fn range(&self) -> ParameterRange {
        match self {
            ParameterField::ShearModulus => ParameterRange::new(5.0, 150.0, None),
            ParameterField::FrictionRatio => ParameterRange::new(1.0, 1.5, Some(0.05)),
            ParameterField::VolumetricCoupling => ParameterRange::new(0.2, 0.5, Some(0.1)),
            ParameterField::HardeningModulus => ParameterRange::new(25.0, 500.0, None),
            ParameterField::CslSlope => ParameterRange::new(0.01, 0.07, Some(0.01)),
            ParameterField::PoissonsRatio => ParameterRange::new(0.1, 0.3, Some(0.05)),
            ParameterField::MeanEffectiveStress => ParameterRange::new(100.0, 800.0, Some(100.0)),
        }
    }

    pub fn default_value(&self) -> f64 {
        match self {
            ParameterField::ShearModulus => 50.0,
            ParameterField::FrictionRatio => 1.4,
            ParameterField::VolumetricCoupling => 0.3,
            ParameterField::HardeningModulus => 200.0,
            ParameterField::CslSlope => 0.03,
            ParameterField::PoissonsRatio => 0.2,
            ParameterField::MeanEffectiveStress => 100.0,
        }
    }

    /// Check `value` against this field's range and slider step.
    pub fn check(&self, value: f64) -> CalcResult<()> {
        let range = self.range();
        if !value.is_finite() {
            return Err(CalcError::invalid_input(
                self.key(),
                value.to_string(),
                format!("{} must be a finite number", self.description()),
            ));
        }
        if !range.contains(value) {
            return Err(CalcError::invalid_input(
                self.key(),
                value.to_string(),
                format!(
                    "{} must be between {} and {}",
                    self.description(),
                    range.min,
                    range.max
                ),
            ));
        }
        if !range.on_step(value) {
            return Err(CalcError::invalid_input(
                self.key(),
                value.to_string(),
                format!(
                    "{} must be a multiple of {} from {}",
                    self.description(),
                    range.step.unwrap_or_default(),
                    range.min
                ),
            ));
        }
        Ok(())
    }
}

/// The NorSand inputs of one calculation case.
///
/// ## JSON Example
///
/// ```json
/// {
///   "g_mpa": 50.0,
///   "m": 1.4,
///   "n": 0.3,
///   "h": 200.0,
///   "lambda": 0.03,
///   "nu": 0.2,
///   "p_kpa": 100.0
/// }
/// ```
///
/// Fields are private so a set stays valid once built. Deserialization runs
/// the same checks as [`ParameterSet::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawParameterSet")]
pub struct ParameterSet {
    /// Maximum elastic shear modulus G in MPa
    g_mpa: f64,

    /// Critical state friction ratio M
    m: f64,

    /// Volumetric coupling coefficient N
    n: f64,

    /// Plastic hardening modulus H
    h: f64,

    /// Slope of the critical state line λ
    lambda: f64,

    /// Poisson's ratio ν. Carried with the case but not used by the CPT correlations.
    nu: f64,

    /// Mean effective stress p in kPa
    p_kpa: f64,
}

/// Unvalidated wire form of a [`ParameterSet`]
#[derive(Deserialize)]
struct RawParameterSet {
    g_mpa: f64,
    m: f64,
    n: f64,
    h: f64,
    lambda: f64,
    nu: f64,
    p_kpa: f64,
}

impl TryFrom<RawParameterSet> for ParameterSet {
    type Error = CalcError;

    fn try_from(raw: RawParameterSet) -> CalcResult<Self> {
        ParameterSet::new(raw.g_mpa, raw.m, raw.n, raw.h, raw.lambda, raw.nu, raw.p_kpa)
    }
}

impl ParameterSet {
    /// Build a validated parameter set.
    ///
    /// Returns [`CalcError::InvalidInput`] naming the first field outside its range or slider grid.
    #[allow(clippy::too_many_arguments)]
    pub fn new(g_mpa: f64, m: f64, n: f64, h: f64, lambda: f64, nu: f64, p_kpa: f64) -> CalcResult<Self> {
        let set = ParameterSet {
            g_mpa,
            m,
            n,
            h,
            lambda,
            nu,
            p_kpa,
        };
        set.validate()?;
        Ok(set)
    }

    /// Build a set without validation, for exercising the evaluator outside its contract.
    #[cfg(test)]
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn unchecked(g_mpa: f64, m: f64, n: f64, h: f64, lambda: f64, nu: f64, p_kpa: f64) -> Self {
        ParameterSet {
            g_mpa,
            m,
            n,
            h,
            lambda,
            nu,
            p_kpa,
        }
    }

    /// Validate every field against its documented range and step.
    pub fn validate(&self) -> CalcResult<()> {
        for field in ParameterField::ALL {
            field.check(self.get(field))?;
        }
        Ok(())
    }

    /// Read a field by identifier
    pub fn get(&self, field: ParameterField) -> f64 {
        match field {
            ParameterField::ShearModulus => self.g_mpa,
            ParameterField::FrictionRatio => self.m,
            ParameterField::VolumetricCoupling => self.n,
            ParameterField::HardeningModulus => self.h,
            ParameterField::CslSlope => self.lambda,
            ParameterField::PoissonsRatio => self.nu,
            ParameterField::MeanEffectiveStress => self.p_kpa,
        }
    }

    /// Return a copy with one field replaced, validating the new value.
    ///
    /// ```rust
    /// use cpt_core::parameters::{ParameterField, ParameterSet};
    ///
    /// let deeper = ParameterSet::default()
    ///     .with(ParameterField::MeanEffectiveStress, 400.0)
    ///     .unwrap();
    /// assert_eq!(deeper.p_kpa(), 400.0);
    /// ```
    pub fn with(mut self, field: ParameterField, value: f64) -> CalcResult<Self> {
        field.check(value)?;
        match field {
            ParameterField::ShearModulus => self.g_mpa = value,
            ParameterField::FrictionRatio => self.m = value,
            ParameterField::VolumetricCoupling => self.n = value,
            ParameterField::HardeningModulus => self.h = value,
            ParameterField::CslSlope => self.lambda = value,
            ParameterField::PoissonsRatio => self.nu = value,
            ParameterField::MeanEffectiveStress => self.p_kpa = value,
        }
        Ok(self)
    }

    pub fn g_mpa(&self) -> f64 {
        self.g_mpa
    }

    pub fn m(&self) -> f64 {
        self.m
    }

    pub fn n(&self) -> f64 {
        self.n
    }

    pub fn h(&self) -> f64 {
        self.h
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    pub fn nu(&self) -> f64 {
        self.nu
    }

    pub fn p_kpa(&self) -> f64 {
        self.p_kpa
    }

    pub fn shear_modulus(&self) -> Megapascals {
        Megapascals(self.g_mpa)
    }

    pub fn mean_effective_stress(&self) -> Kilopascals {
        Kilopascals(self.p_kpa)
    }
}

impl Default for ParameterSet {
    fn default() -> Self {
        ParameterSet {
            g_mpa: ParameterField::ShearModulus.default_value(),
            m: ParameterField::FrictionRatio.default_value(),
            n: ParameterField::VolumetricCoupling.default_value(),
            h: ParameterField::HardeningModulus.default_value(),
            lambda: ParameterField::CslSlope.default_value(),
            nu: ParameterField::PoissonsRatio.default_value(),
            p_kpa: ParameterField::MeanEffectiveStress.default_value(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let set = ParameterSet::default();
        assert!(set.validate().is_ok());
        assert_eq!(set.g_mpa(), 50.0);
        assert_eq!(set.p_kpa(), 100.0);
        assert_eq!(set.nu(), 0.2);
    }

    #[test]
    fn test_range_endpoints_accepted() {
        let low = ParameterSet::new(5.0, 1.0, 0.2, 25.0, 0.01, 0.1, 100.0);
        let high = ParameterSet::new(150.0, 1.5, 0.5, 500.0, 0.07, 0.3, 800.0);
        assert!(low.is_ok());
        assert!(high.is_ok());
    }

    #[test]
    fn test_out_of_range_rejected_with_field_name() {
        let err = ParameterSet::new(50.0, 1.4, 0.3, 200.0, 0.03, 0.2, 900.0).unwrap_err();
        match err {
            CalcError::InvalidInput { field, .. } => assert_eq!(field, "p_kpa"),
            other => panic!("unexpected error: {other:?}"),
        }

        let err = ParameterSet::new(4.0, 1.4, 0.3, 200.0, 0.03, 0.2, 100.0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(ParameterSet::new(f64::NAN, 1.4, 0.3, 200.0, 0.03, 0.2, 100.0).is_err());
        assert!(ParameterSet::new(50.0, 1.4, 0.3, f64::INFINITY, 0.03, 0.2, 100.0).is_err());
    }

    #[test]
    fn test_with_replaces_single_field() {
        let base = ParameterSet::default();
        let updated = base.with(ParameterField::HardeningModulus, 350.0).unwrap();
        assert_eq!(updated.h(), 350.0);
        assert_eq!(updated.g_mpa(), base.g_mpa());
        assert!(base.with(ParameterField::CslSlope, 0.2).is_err());
    }

    #[test]
    fn test_field_metadata_consistent() {
        for field in ParameterField::ALL {
            let range = field.range();
            assert!(range.min < range.max, "{}", field.key());
            assert!(range.contains(field.default_value()), "{}", field.key());
            assert!(range.on_step(field.default_value()), "{}", field.key());
            assert_eq!(ParameterSet::default().get(field), field.default_value());
        }
    }

    #[test]
    fn test_serialization_keys() {
        let json = serde_json::to_value(ParameterSet::default()).unwrap();
        for field in ParameterField::ALL {
            assert!(json.get(field.key()).is_some(), "missing {}", field.key());
        }
        let roundtrip: ParameterSet = serde_json::from_value(json).unwrap();
        assert_eq!(roundtrip, ParameterSet::default());
    }

    #[test]
    fn test_off_grid_values_rejected() {
        assert!(ParameterSet::new(50.0, 1.37, 0.33, 200.0, 0.025, 0.17, 150.0).is_err());

        let base = ParameterSet::default();
        for (field, value) in [
            (ParameterField::FrictionRatio, 1.37),
            (ParameterField::VolumetricCoupling, 0.33),
            (ParameterField::CslSlope, 0.025),
            (ParameterField::PoissonsRatio, 0.17),
            (ParameterField::MeanEffectiveStress, 150.0),
        ] {
            match base.with(field, value).unwrap_err() {
                CalcError::InvalidInput { field: name, reason, .. } => {
                    assert_eq!(name, field.key());
                    assert!(reason.contains("multiple of"), "{}", reason);
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn test_every_grid_point_accepted() {
        for field in ParameterField::ALL {
            let range = field.range();
            let Some(step) = range.step else { continue };
            let count = ((range.max - range.min) / step).round() as usize;
            for k in 0..=count {
                let value = (range.min + k as f64 * step).min(range.max);
                assert!(field.check(value).is_ok(), "{} = {}", field.key(), value);
            }
        }
    }

    #[test]
    fn test_continuous_fields_have_no_grid() {
        assert!(ParameterField::ShearModulus.check(37.25).is_ok());
        assert!(ParameterField::HardeningModulus.check(123.4).is_ok());
    }

    #[test]
    fn test_deserialization_validates() {
        let mut json = serde_json::to_value(ParameterSet::default()).unwrap();
        json["p_kpa"] = serde_json::json!(250.0);
        let err = serde_json::from_value::<ParameterSet>(json).unwrap_err();
        assert!(err.to_string().contains("p_kpa"), "{}", err);

        let mut json = serde_json::to_value(ParameterSet::default()).unwrap();
        json["g_mpa"] = serde_json::json!(500.0);
        assert!(serde_json::from_value::<ParameterSet>(json).is_err());
    }
}
