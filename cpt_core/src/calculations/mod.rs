//! # Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result`/output type - Calculation results (JSON-serializable)
//! - `calculate(input) -> Result<_, CalcError>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`cpt_curve`] - NorSand dimensionless CPT resistance curve

pub mod cpt_curve;

pub use cpt_curve::{
    calculate, state_parameter_samples, CorrelationFactors, CptCurveInput, CurvePoint,
    ResistanceCurve, SAMPLE_COUNT, STATE_PARAMETER_MAX, STATE_PARAMETER_MIN,
};
