//! # cpt_core - NorSand CPT Resistance Engine
//!
//! `cpt_core` maps NorSand soil parameters through the Jefferies & Been
//! correlations into a dimensionless CPT resistance curve `Q(ψ)`, and
//! assembles two such curves into a chart description. All inputs and
//! outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Every render is a pure function of the two parameter sets
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use cpt_core::{render, ParameterSet};
//!
//! let loose = ParameterSet::default();
//! let dense = ParameterSet::new(100.0, 1.3, 0.3, 300.0, 0.02, 0.2, 200.0).unwrap();
//!
//! let chart = render(&loose, &dense).unwrap();
//! let json = chart.to_json().unwrap();
//! assert!(json.contains("NorSand CPT"));
//! ```
//!
//! ## Modules
//!
//! - [`parameters`] - NorSand parameter sets and their ranges
//! - [`equations`] - The correlations and their metadata
//! - [`calculations`] - Resistance curve evaluation
//! - [`chart`] - Chart assembly (Plotly figure JSON)
//! - [`session`] - Two-case session container
//! - [`file_io`] - Session and chart files with atomic saves
//! - [`units`] - Stress unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod chart;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod parameters;
pub mod session;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{CptCurveInput, ResistanceCurve};
pub use chart::{assemble_chart, render, render_with_curves, ChartArtifact, Rendering};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_session, save_chart, save_session};
pub use parameters::{ParameterField, ParameterSet};
pub use session::{CaseId, Session};
