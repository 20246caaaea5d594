use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::controller::DEFAULT_PAN_STEP;
use crate::error::SettingsError;
use crate::hit_test::{DEFAULT_EDGE_TOLERANCE, DEFAULT_SNAP_MARGIN};
use crate::render::DEFAULT_SELECTION_OFFSET;
use crate::viewport::DEFAULT_ZOOM_STEP;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub zoom_step: f32,
    pub min_scale: f32,
    pub pan_step: f32,
    pub edge_hit_tolerance: f32,
    pub snap_margin: f32,
    pub selection_offset: f32,
    pub reset_translation_on_zoom_reset: bool,
    pub show_help_on_start: bool,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            zoom_step: DEFAULT_ZOOM_STEP,
            min_scale: 0.0,
            pan_step: DEFAULT_PAN_STEP,
            edge_hit_tolerance: DEFAULT_EDGE_TOLERANCE,
            snap_margin: DEFAULT_SNAP_MARGIN,
            selection_offset: DEFAULT_SELECTION_OFFSET,
            reset_translation_on_zoom_reset: false,
            show_help_on_start: false,
        }
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "toml")
}

/// Parses a settings file. TOML files fall back to JSON and vice versa; the
/// error reported is the one for the format the extension names.
pub fn load_settings(path: impl AsRef<Path>) -> Result<EditorSettings, SettingsError> {
    let path = path.as_ref();
    let s = std::fs::read_to_string(path).map_err(|e| SettingsError::io(path, e))?;
    if is_toml(path) {
        toml::from_str::<EditorSettings>(&s)
            .or_else(|e| serde_json::from_str::<EditorSettings>(&s).map_err(|_| e.into()))
    } else {
        serde_json::from_str::<EditorSettings>(&s)
            .or_else(|e| toml::from_str::<EditorSettings>(&s).map_err(|_| e.into()))
    }
}

pub fn save_settings(path: impl AsRef<Path>, settings: &EditorSettings) -> Result<(), SettingsError> {
    let path = path.as_ref();
    let text = if is_toml(path) {
        toml::to_string_pretty(settings)?
    } else {
        serde_json::to_string_pretty(settings)?
    };
    std::fs::write(path, text).map_err(|e| SettingsError::io(path, e))
}

/// `$HOME/.config/graphpad.toml`, then `graphpad.toml` and `graphpad.json` in
/// the working directory.
pub fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(home) = std::env::var_os("HOME") {
        paths.push(PathBuf::from(home).join(".config").join("graphpad.toml"));
    }
    paths.push(PathBuf::from("graphpad.toml"));
    paths.push(PathBuf::from("graphpad.json"));
    paths
}

/// First readable settings file among `paths`, or defaults.
pub fn load_first(paths: &[PathBuf]) -> EditorSettings {
    for path in paths {
        if !path.exists() {
            continue;
        }
        match load_settings(path) {
            Ok(settings) => {
                debug!(path = %path.display(), "settings loaded");
                return settings;
            }
            Err(err) => warn!(%err, "ignoring settings file"),
        }
    }
    EditorSettings::default()
}
