//! # File I/O Module
//!
//! Reads and writes session and chart files:
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent truncated files
//! - **Version validation**: Reject sessions written by an incompatible schema
//! - **Input validation**: Loaded parameter sets are checked against their ranges and slider steps
//!
//! ## Example
//!
//! ```rust,no_run
//! use cpt_core::file_io::{load_session, save_chart, save_session};
//! use cpt_core::session::Session;
//! use std::path::Path;
//!
//! let session = Session::new("Site A");
//! save_session(&session, Path::new("site_a.json"))?;
//!
//! let loaded = load_session(Path::new("site_a.json"))?;
//! save_chart(&loaded.render()?, Path::new("site_a_chart.json"))?;
//! # Ok::<(), cpt_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::chart::ChartArtifact;
use crate::errors::{CalcError, CalcResult};
use crate::session::{Session, SCHEMA_VERSION};

/// Temporary sibling path used during an atomic write
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp_path = path.to_path_buf();
    let extension = tmp_path
        .extension()
        .map(|e| format!("{}.tmp", e.to_string_lossy()))
        .unwrap_or_else(|| "tmp".to_string());
    tmp_path.set_extension(extension);
    tmp_path
}

/// Write `contents` to `path` with atomic replace semantics.
///
/// 1. Write to a temporary file next to the target
/// 2. Sync to disk
/// 3. Rename over the target
fn write_atomic(path: &Path, contents: &str) -> CalcResult<()> {
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(contents.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    drop(tmp_file);

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    debug!("wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

/// Save a session as pretty JSON.
pub fn save_session(session: &Session, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(session).map_err(|e| CalcError::serialization(e.to_string()))?;
    write_atomic(path, &json)
}

/// Load a session, checking its schema version and both parameter sets.
///
/// The version is read before the body is decoded, so a file from a newer
/// schema is reported as such even when its layout has changed.
///
/// # Returns
///
/// * `Ok(Session)` - Successfully loaded session
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON, or a stored parameter
///   outside its range or slider grid
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_session(path: &Path) -> CalcResult<Session> {
    let mut file = File::open(path)
        .map_err(|e| CalcError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    let document: serde_json::Value = serde_json::from_str(&contents)
        .map_err(|e| CalcError::serialization(format!("Invalid JSON in {}: {}", path.display(), e)))?;

    let version = document
        .pointer("/meta/version")
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| CalcError::serialization(format!("{} has no meta.version", path.display())))?;
    validate_version(version)?;
    if version != SCHEMA_VERSION {
        warn!(
            "{} was written with schema {}, current is {}",
            path.display(),
            version,
            SCHEMA_VERSION
        );
    }

    serde_json::from_value(document)
        .map_err(|e| CalcError::serialization(format!("Invalid session in {}: {}", path.display(), e)))
}

/// Save a chart as pretty JSON for a plotting host.
pub fn save_chart(chart: &ChartArtifact, path: &Path) -> CalcResult<()> {
    let json = chart.to_json_pretty()?;
    write_atomic(path, &json)
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    // For 0.x versions a newer minor may contain breaking changes
    if current_parts[0] == 0
        && file_parts.len() > 1
        && current_parts.len() > 1
        && file_parts[1] > current_parts[1]
    {
        return Err(mismatch());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::{ParameterField, ParameterSet};
    use crate::session::CaseId;
    use std::env::temp_dir;

    fn temp_path(name: &str) -> PathBuf {
        temp_dir().join(format!("norsand_cpt_test_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_tmp_path_generation() {
        assert_eq!(
            tmp_path_for(Path::new("/path/to/session.json")),
            Path::new("/path/to/session.json.tmp")
        );
        assert_eq!(tmp_path_for(Path::new("/path/to/session")), Path::new("/path/to/session.tmp"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_path("roundtrip");

        let mut session = Session::new("Roundtrip");
        session
            .set_value(CaseId::Case2, ParameterField::HardeningModulus, 400.0)
            .unwrap();
        save_session(&session, &path).unwrap();

        let loaded = load_session(&path).unwrap();
        assert_eq!(loaded.meta.title, "Roundtrip");
        assert_eq!(loaded.case1, session.case1);
        assert_eq!(loaded.case2.h(), 400.0);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let path = temp_path("atomic");
        save_session(&Session::default(), &path).unwrap();

        assert!(!tmp_path_for(&path).exists());
        assert!(path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_rejects_out_of_range_parameters() {
        let path = temp_path("out_of_range");

        let mut document = serde_json::to_value(Session::default()).unwrap();
        document["case1"]["g_mpa"] = serde_json::json!(500.0);
        fs::write(&path, document.to_string()).unwrap();

        let err = load_session(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
        assert!(err.to_string().contains("g_mpa"), "{}", err);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_rejects_off_grid_parameters() {
        let path = temp_path("off_grid");

        let mut document = serde_json::to_value(Session::default()).unwrap();
        document["case2"]["lambda"] = serde_json::json!(0.025);
        fs::write(&path, document.to_string()).unwrap();

        let err = load_session(&path).unwrap_err();
        assert!(err.to_string().contains("lambda"), "{}", err);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_rejects_newer_schema() {
        let path = temp_path("newer_schema");

        let mut session = Session::new("From the future");
        session.meta.version = "0.2.0".to_string();
        save_session(&session, &path).unwrap();

        match load_session(&path).unwrap_err() {
            CalcError::VersionMismatch {
                file_version,
                expected_version,
            } => {
                assert_eq!(file_version, "0.2.0");
                assert_eq!(expected_version, SCHEMA_VERSION);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_newer_schema_reported_before_layout_errors() {
        let path = temp_path("newer_layout");
        fs::write(&path, r#"{"meta": {"version": "0.3.0"}, "cases": []}"#).unwrap();

        let err = load_session(&path).unwrap_err();
        assert_eq!(err.error_code(), "VERSION_MISMATCH");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_accepts_older_schema() {
        let path = temp_path("older_patch");

        let mut session = Session::new("Older");
        session.meta.version = "0.0.9".to_string();
        save_session(&session, &path).unwrap();

        let loaded = load_session(&path).unwrap();
        assert_eq!(loaded.meta.version, "0.0.9");
        assert_eq!(loaded.case1, ParameterSet::default());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_rejects_missing_version() {
        let path = temp_path("no_version");
        fs::write(&path, r#"{"case1": {}}"#).unwrap();

        let err = load_session(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_rejects_invalid_json() {
        let path = temp_path("invalid_json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_session(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_session(&temp_path("does_not_exist")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_save_chart() {
        let path = temp_path("chart");
        let chart = Session::default().render().unwrap();
        save_chart(&chart, &path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let loaded: ChartArtifact = serde_json::from_str(&contents).unwrap();
        assert_eq!(loaded.data.len(), 2);
        assert!(loaded.layout.yaxis.is_log());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.7").is_ok());
        assert!(validate_version("0.0.9").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("garbage").is_err());
    }
}
