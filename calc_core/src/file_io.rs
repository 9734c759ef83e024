//! # File I/O Module
//!
//! Persists [`CalculatorSettings`] with safety features:
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent corruption
//! - **Version validation**: Ensure schema compatibility
//!
//! ## Example
//!
//! ```rust,no_run
//! use calc_core::file_io::{load_settings, save_settings};
//! use calc_core::settings::CalculatorSettings;
//! use std::path::Path;
//!
//! let path = Path::new("omnicalc.json");
//! save_settings(&CalculatorSettings::default(), path).unwrap();
//! let settings = load_settings(path).unwrap();
//! assert_eq!(settings.display_precision, 4);
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use chrono::Utc;
use tracing::debug;

use crate::errors::{CalcError, CalcResult};
use crate::settings::{CalculatorSettings, SCHEMA_VERSION};

/// Save settings to a file with atomic write semantics.
///
/// The save process:
/// 1. Stamp `saved_at` and serialize to JSON
/// 2. Write to a temporary file (.tmp)
/// 3. Sync to disk (fsync)
/// 4. Rename .tmp over the target
pub fn save_settings(settings: &CalculatorSettings, path: &Path) -> CalcResult<()> {
    let mut stamped = settings.clone();
    stamped.version = SCHEMA_VERSION.to_string();
    stamped.saved_at = Some(Utc::now());

    let json = serde_json::to_string_pretty(&stamped).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })?;

    let tmp_path = path.with_extension("tmp");

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    debug!(path = %path.display(), "settings saved");
    Ok(())
}

/// Load settings from a file.
///
/// # Returns
///
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_settings(path: &Path) -> CalcResult<CalculatorSettings> {
    let mut file = File::open(path)
        .map_err(|e| CalcError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    let settings: CalculatorSettings =
        serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;

    validate_version(&settings.version)?;
    settings.validate()?;

    debug!(path = %path.display(), version = %settings.version, "settings loaded");
    Ok(settings)
}

/// Load settings, or the defaults when the file does not exist.
///
/// A file that exists but cannot be read or parsed is still an error.
pub fn load_settings_or_default(path: &Path) -> CalcResult<CalculatorSettings> {
    if !path.exists() {
        debug!(path = %path.display(), "no settings file, using defaults");
        return Ok(CalculatorSettings::default());
    }
    load_settings(path)
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version.split('.').filter_map(|p| p.parse().ok()).collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION.split('.').filter_map(|p| p.parse().ok()).collect();

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    // For 0.x versions a newer minor may carry breaking changes
    if current_parts[0] == 0 && file_parts.len() > 1 && current_parts.len() > 1 && file_parts[1] > current_parts[1] {
        return Err(mismatch());
    }

    Ok(())
}
