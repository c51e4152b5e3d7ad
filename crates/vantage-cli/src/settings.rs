//! Settings persistence
//!
//! Handles loading and saving the projection mode and parameters between
//! sessions. Settings are stored in `{config_dir}/vantage/settings.json`
//! unless a path is given explicitly.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use vantage_core::{ProjectionMode, ProjectionParameters};

/// Projection settings that persist across sessions
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Active projection mode
    pub mode: ProjectionMode,
    /// Parameter values for every mode
    pub parameters: ProjectionParameters,
}

/// Get the path to the default settings file
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("vantage").join("settings.json"))
}

/// Load and validate settings from `path`
pub fn load_settings(path: &Path) -> Result<Settings> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings from {}", path.display()))?;

    let settings: Settings = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse settings in {}", path.display()))?;

    settings
        .parameters
        .validate()
        .with_context(|| format!("Invalid parameters in {}", path.display()))?;

    Ok(settings)
}

/// Load settings from an explicit path, or the default location if it exists
///
/// Falls back to defaults when no path is given and no default file exists.
pub fn resolve_settings(explicit: Option<&Path>) -> Result<Settings> {
    if let Some(path) = explicit {
        return load_settings(path);
    }

    match default_settings_path() {
        Some(path) if path.exists() => load_settings(&path),
        _ => Ok(Settings::default()),
    }
}

/// Save settings to `path`, creating parent directories as needed
pub fn save_settings(settings: &Settings, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    let json = serde_json::to_string_pretty(settings).context("Failed to serialize settings")?;

    fs::write(path, json).context("Failed to write settings file")
}

/// Path `save` should use when none is given
pub fn save_target(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    let Some(path) = default_settings_path() else {
        bail!("Could not determine config directory");
    };
    Ok(path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("vantage_test_{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("round_trip.json");
        let settings = Settings {
            mode: ProjectionMode::Isometric,
            parameters: ProjectionParameters {
                ortho_width: 1024.0,
                ..Default::default()
            },
        };

        save_settings(&settings, &path).unwrap();
        let loaded = load_settings(&path).unwrap();
        assert_eq!(loaded, settings);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "mode": "orthographic" }"#).unwrap();
        assert_eq!(settings.mode, ProjectionMode::Orthographic);
        assert_eq!(settings.parameters, ProjectionParameters::default());
    }

    #[test]
    fn test_invalid_parameters_rejected_on_load() {
        let path = temp_path("invalid.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(
            &path,
            r#"{ "parameters": { "near_clip": 5.0, "far_clip": 5.0 } }"#,
        )
        .unwrap();

        assert!(load_settings(&path).is_err());

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let path = temp_path("does_not_exist.json");
        assert!(resolve_settings(Some(&path)).is_err());
    }
}
