//! # Equation Registry
//!
//! Catalogue of the correlations used to build a resistance curve, with the
//! metadata needed to print them in reports or an equations reference.
//!
//! ## Usage
//!
//! ```rust
//! use cpt_core::equations::registry::Equation;
//!
//! let meta = Equation::KCoefficient.metadata();
//! assert_eq!(meta.formula_plain, "k = (f1·f2·f3·f4·f5·f6)^1.45");
//! println!("{} ({})", meta.name, meta.reference.citation());
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// References
// ============================================================================

/// Published source of a correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reference {
    /// Jefferies, M. and Been, K., Soil liquefaction: a critical state approach
    JefferiesBeen { edition: u8, year: u16 },
    /// Plain algebraic definition
    Definition,
}

impl Reference {
    /// Format the reference for display in reports
    pub fn citation(&self) -> String {
        match self {
            Reference::JefferiesBeen { edition, year } => {
                format!(
                    "Jefferies & Been ({}), Soil Liquefaction: A Critical State Approach, {}ed, CRC Press",
                    year, edition
                )
            }
            Reference::Definition => "Definition".to_string(),
        }
    }

    /// Short form for inline references
    pub fn short_form(&self) -> &'static str {
        match self {
            Reference::JefferiesBeen { .. } => "Jefferies & Been",
            Reference::Definition => "Definition",
        }
    }
}

const JEFFERIES_BEEN: Reference = Reference::JefferiesBeen { edition: 2, year: 2015 };

// ============================================================================
// Metadata
// ============================================================================

/// Metadata for one correlation.
#[derive(Debug, Clone, PartialEq)]
pub struct EquationMetadata {
    /// Human-readable name
    pub name: &'static str,
    /// The formula in plain text
    pub formula_plain: &'static str,
    /// Published source
    pub reference: Reference,
    /// Function implementing the equation
    pub source_function: &'static str,
}

impl EquationMetadata {
    const fn new(
        name: &'static str,
        formula_plain: &'static str,
        reference: Reference,
        source_function: &'static str,
    ) -> Self {
        Self {
            name,
            formula_plain,
            reference,
            source_function,
        }
    }
}

// ============================================================================
// Equation Enum
// ============================================================================

/// Every correlation evaluated for a resistance curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Equation {
    /// G / p with both in kPa
    RigidityRatio,
    /// f1
    KRigidityFactor,
    /// f2
    KFrictionFactor,
    /// f3
    KCouplingFactor,
    /// f4
    KHardeningFactor,
    /// f5
    KCslFactor,
    /// k from f1..f6
    KCoefficient,
    /// f7
    MRigidityFactor,
    /// f8
    MFrictionFactor,
    /// f9
    MCouplingFactor,
    /// f10
    MHardeningFactor,
    /// f11
    MCslFactor,
    /// m from f7..f12
    MCoefficient,
    /// Q(ψ)
    DimensionlessResistance,
}

/// All equations in evaluation order
pub const ALL_EQUATIONS: [Equation; 14] = [
    Equation::RigidityRatio,
    Equation::KRigidityFactor,
    Equation::KFrictionFactor,
    Equation::KCouplingFactor,
    Equation::KHardeningFactor,
    Equation::KCslFactor,
    Equation::KCoefficient,
    Equation::MRigidityFactor,
    Equation::MFrictionFactor,
    Equation::MCouplingFactor,
    Equation::MHardeningFactor,
    Equation::MCslFactor,
    Equation::MCoefficient,
    Equation::DimensionlessResistance,
];

impl Equation {
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            Equation::RigidityRatio => EquationMetadata::new(
                "Rigidity ratio",
                "Ir = G·1000 / p",
                Reference::Definition,
                "units::rigidity_ratio",
            ),
            Equation::KRigidityFactor => EquationMetadata::new(
                "Rigidity factor for k",
                "f1 = 3.79 + 1.12·ln(Ir)",
                JEFFERIES_BEEN,
                "norsand::k_rigidity_factor",
            ),
            Equation::KFrictionFactor => EquationMetadata::new(
                "Friction factor for k",
                "f2 = 1 + 1.06·(M − 1.25)",
                JEFFERIES_BEEN,
                "norsand::k_friction_factor",
            ),
            Equation::KCouplingFactor => EquationMetadata::new(
                "Coupling factor for k",
                "f3 = 1 − 0.30·(N − 0.2)",
                JEFFERIES_BEEN,
                "norsand::k_coupling_factor",
            ),
            Equation::KHardeningFactor => EquationMetadata::new(
                "Hardening factor for k",
                "f4 = (H / 100)^0.326",
                JEFFERIES_BEEN,
                "norsand::k_hardening_factor",
            ),
            Equation::KCslFactor => EquationMetadata::new(
                "CSL slope factor for k",
                "f5 = 1 − 1.55·(λ − 0.01)",
                JEFFERIES_BEEN,
                "norsand::k_csl_factor",
            ),
            Equation::KCoefficient => EquationMetadata::new(
                "Resistance at critical state",
                "k = (f1·f2·f3·f4·f5·f6)^1.45",
                JEFFERIES_BEEN,
                "norsand::k_coefficient",
            ),
            Equation::MRigidityFactor => EquationMetadata::new(
                "Rigidity factor for m",
                "f7 = 1.04 + 0.46·ln(Ir)",
                JEFFERIES_BEEN,
                "norsand::m_rigidity_factor",
            ),
            Equation::MFrictionFactor => EquationMetadata::new(
                "Friction factor for m",
                "f8 = 1 − 0.40·(M − 1.25)",
                JEFFERIES_BEEN,
                "norsand::m_friction_factor",
            ),
            Equation::MCouplingFactor => EquationMetadata::new(
                "Coupling factor for m",
                "f9 = 1 − 0.30·(N − 0.2)",
                JEFFERIES_BEEN,
                "norsand::m_coupling_factor",
            ),
            Equation::MHardeningFactor => EquationMetadata::new(
                "Hardening factor for m",
                "f10 = (H / 100)^0.15",
                JEFFERIES_BEEN,
                "norsand::m_hardening_factor",
            ),
            Equation::MCslFactor => EquationMetadata::new(
                "CSL slope factor for m",
                "f11 = 1 − 2.21·(λ − 0.01)",
                JEFFERIES_BEEN,
                "norsand::m_csl_factor",
            ),
            Equation::MCoefficient => EquationMetadata::new(
                "Decay slope",
                "m = 1.45·f7·f8·f9·f10·f11·f12",
                JEFFERIES_BEEN,
                "norsand::m_coefficient",
            ),
            Equation::DimensionlessResistance => EquationMetadata::new(
                "Dimensionless CPT resistance",
                "Q(ψ) = k·exp(−m·ψ)",
                JEFFERIES_BEEN,
                "norsand::dimensionless_resistance",
            ),
        }
    }
}

/// Render all equations as a markdown reference.
pub fn generate_equations_markdown() -> String {
    let mut output = String::with_capacity(4_096);

    output.push_str("# NorSand CPT Equations Reference\n\n");
    output.push_str("| # | Name | Formula | Reference | Function |\n");
    output.push_str("|---|------|---------|-----------|----------|\n");

    for (index, equation) in ALL_EQUATIONS.iter().enumerate() {
        let meta = equation.metadata();
        output.push_str(&format!(
            "| {} | {} | `{}` | {} | `{}` |\n",
            index + 1,
            meta.name,
            meta.formula_plain,
            meta.reference.short_form(),
            meta.source_function
        ));
    }

    output.push_str("\nf6 and f12 are fixed at 1.\n\n");
    output.push_str(&format!("**Reference:** {}\n", JEFFERIES_BEEN.citation()));

    output
}
