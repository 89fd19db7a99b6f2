//! # Unit Types
//!
//! Lightweight newtype wrappers for the stress units that appear in the
//! NorSand inputs. They keep the MPa/kPa conversion in one place while
//! serializing as plain numbers.
//!
//! - Shear modulus G is entered in megapascals (MPa)
//! - Mean effective stress p is entered in kilopascals (kPa)
//!
//! The correlations use the dimensionless rigidity ratio `G / p` with both
//! quantities in the same unit, which is where the factor of 1000 comes from.
//!
//! ## Example
//!
//! ```rust
//! use cpt_core::units::{Kilopascals, Megapascals, rigidity_ratio};
//!
//! let g = Megapascals(50.0);
//! let g_kpa: Kilopascals = g.into();
//! assert_eq!(g_kpa.0, 50_000.0);
//!
//! assert_eq!(rigidity_ratio(g, Kilopascals(100.0)), 500.0);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Stress Units
// ============================================================================

/// Stress or modulus in megapascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Megapascals(pub f64);

/// Stress or modulus in kilopascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilopascals(pub f64);

impl From<Megapascals> for Kilopascals {
    fn from(mpa: Megapascals) -> Self {
        Kilopascals(mpa.0 * 1000.0)
    }
}

/// Rigidity ratio `G / p` with both terms in kPa (i.e. `G[MPa] * 1000 / p[kPa]`).
///
/// Non-positive `p` yields a zero, negative or infinite ratio; callers that take
/// its logarithm must check the domain themselves.
#[inline]
pub fn rigidity_ratio(shear_modulus: Megapascals, mean_stress: Kilopascals) -> f64 {
    let g_kpa: Kilopascals = shear_modulus.into();
    g_kpa.0 / mean_stress.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mpa_to_kpa() {
        let g = Megapascals(12.5);
        let kpa: Kilopascals = g.into();
        assert_eq!(kpa.0, 12_500.0);
        assert_eq!(Kilopascals::from(Megapascals(0.0)), Kilopascals::default());
    }

    #[test]
    fn test_rigidity_ratio() {
        assert_eq!(rigidity_ratio(Megapascals(150.0), Kilopascals(800.0)), 187.5);
        assert_eq!(rigidity_ratio(Megapascals(5.0), Kilopascals(100.0)), 50.0);
    }

    #[test]
    fn test_rigidity_ratio_zero_stress_is_infinite() {
        assert!(rigidity_ratio(Megapascals(50.0), Kilopascals(0.0)).is_infinite());
    }

    #[test]
    fn test_serialization() {
        let g = Megapascals(50.0);
        let json = serde_json::to_string(&g).unwrap();
        assert_eq!(json, "50.0");

        let roundtrip: Megapascals = serde_json::from_str(&json).unwrap();
        assert_eq!(g, roundtrip);
    }
}
