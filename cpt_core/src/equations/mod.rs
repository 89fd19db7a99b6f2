//! # NorSand CPT Equations
//!
//! All correlations used to turn NorSand parameters into a CPT resistance curve
//! live here, so they can be checked against the published source in one place.
//!
//! ## Modules
//!
//! - [`norsand`] - Correction factors, k, m and Q(ψ)
//! - [`registry`] - Equation metadata for reports
//!
//! ## References
//!
//! - Jefferies, M. and Been, K. (2015). Soil liquefaction: a critical state
//!   approach, 2nd edition. CRC Press.

pub mod norsand;
pub mod registry;

pub use norsand::{
    dimensionless_resistance,
    k_coefficient,
    k_coupling_factor,
    k_csl_factor,
    k_friction_factor,
    k_hardening_factor,
    k_rigidity_factor,
    m_coefficient,
    m_coupling_factor,
    m_csl_factor,
    m_friction_factor,
    m_hardening_factor,
    m_rigidity_factor,
    K_RESIDUAL_FACTOR,
    M_RESIDUAL_FACTOR,
};

pub use registry::{generate_equations_markdown, Equation, EquationMetadata, Reference, ALL_EQUATIONS};
