//! # Session Data Structures
//!
//! A `Session` holds the two parameter cases compared on one chart. Sessions
//! serialize to human-readable JSON and are the configuration format of the
//! command line front end.
//!
//! ## Structure
//!
//! ```text
//! Session
//! ├── meta: SessionMetadata (version, title, timestamps)
//! ├── case1: ParameterSet
//! └── case2: ParameterSet
//! ```
//!
//! ## Example
//!
//! ```rust
//! use cpt_core::session::Session;
//!
//! let session = Session::new("Loose vs dense sand");
//! let chart = session.render().unwrap();
//! assert_eq!(chart.data.len(), 2);
//!
//! let json = serde_json::to_string_pretty(&session).unwrap();
//! assert!(json.contains("Loose vs dense sand"));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::chart::{self, ChartArtifact, Rendering};
use crate::errors::CalcResult;
use crate::parameters::{ParameterField, ParameterSet};

/// Current schema version for session files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Selects one of the two cases of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaseId {
    Case1,
    Case2,
}

impl CaseId {
    pub const ALL: [CaseId; 2] = [CaseId::Case1, CaseId::Case2];

    pub fn label(&self) -> &'static str {
        match self {
            CaseId::Case1 => chart::CASE1_LABEL,
            CaseId::Case2 => chart::CASE2_LABEL,
        }
    }
}

/// Root session container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Session metadata (version, title, timestamps)
    pub meta: SessionMetadata,

    /// Parameters of the first case (drawn blue)
    pub case1: ParameterSet,

    /// Parameters of the second case (drawn red)
    pub case2: ParameterSet,
}

impl Session {
    /// Create a session with both cases at their default values.
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Session {
            meta: SessionMetadata {
                version: SCHEMA_VERSION.to_string(),
                title: title.into(),
                created: now,
                modified: now,
            },
            case1: ParameterSet::default(),
            case2: ParameterSet::default(),
        }
    }

    pub fn case(&self, id: CaseId) -> &ParameterSet {
        match id {
            CaseId::Case1 => &self.case1,
            CaseId::Case2 => &self.case2,
        }
    }

    /// Replace a whole case.
    pub fn set_case(&mut self, id: CaseId, params: ParameterSet) {
        match id {
            CaseId::Case1 => self.case1 = params,
            CaseId::Case2 => self.case2 = params,
        }
        self.touch();
    }

    /// Change a single field of one case.
    ///
    /// ```rust
    /// use cpt_core::parameters::ParameterField;
    /// use cpt_core::session::{CaseId, Session};
    ///
    /// let mut session = Session::default();
    /// session.set_value(CaseId::Case2, ParameterField::ShearModulus, 100.0).unwrap();
    /// assert_eq!(session.case2.g_mpa(), 100.0);
    /// assert!(session.set_value(CaseId::Case2, ParameterField::ShearModulus, 1.0).is_err());
    /// ```
    pub fn set_value(&mut self, id: CaseId, field: ParameterField, value: f64) -> CalcResult<()> {
        let updated = self.case(id).with(field, value)?;
        self.set_case(id, updated);
        Ok(())
    }

    /// Evaluate both cases and assemble the chart.
    pub fn render(&self) -> CalcResult<ChartArtifact> {
        chart::render(&self.case1, &self.case2)
    }

    /// Evaluate both cases, keeping the curves alongside the chart.
    pub fn render_with_curves(&self) -> CalcResult<Rendering> {
        chart::render_with_curves(&self.case1, &self.case2)
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new("")
    }
}

/// Session metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Free-text title
    pub title: String,

    /// When the session was created
    pub created: DateTime<Utc>,

    /// When the session was last modified
    pub modified: DateTime<Utc>,
}
