//! # NorSand CPT Correlations
//!
//! Closed-form correlations between NorSand soil properties and the
//! normalized cone resistance, after Jefferies & Been (2015), *Soil
//! liquefaction: a critical state approach*, CRC Press.
//!
//! ## Notation
//!
//! - `Ir` = Rigidity ratio `G / p` (both in kPa)
//! - `M` = Critical state friction ratio
//! - `N` = Volumetric coupling coefficient
//! - `H` = Plastic hardening modulus
//! - `λ` = Slope of the critical state line
//! - `ψ` = State parameter
//! - `Q` = Dimensionless CPT resistance
//!
//! The resistance curve has the form `Q(ψ) = k · exp(−m · ψ)`, where `k` and
//! `m` are each a power/product of six correction factors. The sixth factor in
//! each group is fixed at 1.

// =============================================================================
// FACTORS FOR k
// =============================================================================

/// Rigidity factor for k: `f1 = 3.79 + 1.12·ln(Ir)`
///
/// Returns NaN for `Ir < 0` and −∞ for `Ir = 0`.
#[inline]
pub fn k_rigidity_factor(rigidity_ratio: f64) -> f64 {
    3.79 + 1.12 * rigidity_ratio.ln()
}

/// Friction factor for k: `f2 = 1 + 1.06·(M − 1.25)`
#[inline]
pub fn k_friction_factor(m: f64) -> f64 {
    1.0 + 1.06 * (m - 1.25)
}

/// Coupling factor for k: `f3 = 1 − 0.30·(N − 0.2)`
#[inline]
pub fn k_coupling_factor(n: f64) -> f64 {
    1.0 - 0.30 * (n - 0.2)
}

/// Hardening factor for k: `f4 = (H / 100)^0.326`
#[inline]
pub fn k_hardening_factor(h: f64) -> f64 {
    (h / 100.0).powf(0.326)
}

/// CSL slope factor for k: `f5 = 1 − 1.55·(λ − 0.01)`
#[inline]
pub fn k_csl_factor(lambda: f64) -> f64 {
    1.0 - 1.55 * (lambda - 0.01)
}

/// Residual factor for k: `f6 = 1`
pub const K_RESIDUAL_FACTOR: f64 = 1.0;

/// Exponent applied to the product of the k factors
pub const K_EXPONENT: f64 = 1.45;

/// `k = (f1·f2·f3·f4·f5·f6)^1.45`
#[inline]
pub fn k_coefficient(factors: [f64; 6]) -> f64 {
    factors.iter().product::<f64>().powf(K_EXPONENT)
}

// =============================================================================
// FACTORS FOR m
// =============================================================================

/// Rigidity factor for m: `f7 = 1.04 + 0.46·ln(Ir)`
#[inline]
pub fn m_rigidity_factor(rigidity_ratio: f64) -> f64 {
    1.04 + 0.46 * rigidity_ratio.ln()
}

/// Friction factor for m: `f8 = 1 − 0.40·(M − 1.25)`
#[inline]
pub fn m_friction_factor(m: f64) -> f64 {
    1.0 - 0.40 * (m - 1.25)
}

/// Coupling factor for m: `f9 = 1 − 0.30·(N − 0.2)`
#[inline]
pub fn m_coupling_factor(n: f64) -> f64 {
    1.0 - 0.30 * (n - 0.2)
}

/// Hardening factor for m: `f10 = (H / 100)^0.15`
#[inline]
pub fn m_hardening_factor(h: f64) -> f64 {
    (h / 100.0).powf(0.15)
}

/// CSL slope factor for m: `f11 = 1 − 2.21·(λ − 0.01)`
#[inline]
pub fn m_csl_factor(lambda: f64) -> f64 {
    1.0 - 2.21 * (lambda - 0.01)
}

/// Residual factor for m: `f12 = 1`
pub const M_RESIDUAL_FACTOR: f64 = 1.0;

/// Multiplier applied to the product of the m factors
pub const M_MULTIPLIER: f64 = 1.45;

/// `m = 1.45·f7·f8·f9·f10·f11·f12`
#[inline]
pub fn m_coefficient(factors: [f64; 6]) -> f64 {
    M_MULTIPLIER * factors.iter().product::<f64>()
}

// =============================================================================
// RESISTANCE CURVE
// =============================================================================

/// Dimensionless CPT resistance at state parameter ψ: `Q = k · exp(−m·ψ)`
///
/// At ψ = 0 this is exactly `k`.
#[inline]
pub fn dimensionless_resistance(k: f64, m: f64, psi: f64) -> f64 {
    k * (-m * psi).exp()
}
