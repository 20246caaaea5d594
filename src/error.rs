//! Error types.
//!
//! Nothing in the editing core is fatal: geometry errors are turned into logged
//! no-ops by [`crate::model::DiagramModel`], and settings errors only decide
//! whether defaults are used.

use std::path::PathBuf;
use thiserror::Error;

/// Reasons a node or edge geometry is refused.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum GeometryError {
    /// A coordinate or extent is NaN or infinite.
    #[error("geometry field `{field}` is not finite")]
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
    },

    /// A radius, width or height is below zero.
    #[error("geometry extent `{field}` is negative ({value})")]
    NegativeExtent {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },
}

/// Errors raised while reading or writing the settings file.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML settings: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to encode settings as TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("invalid JSON settings: {0}")]
    Json(#[from] serde_json::Error),
}

impl SettingsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
