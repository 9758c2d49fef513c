//! Configuration for overlap resolution and shape limits.
//!
//! Supports JSON and TOML files, selected by file extension. Missing
//! sections and fields fall back to the built-in defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::*;
use crate::error::{ConfigError, ConfigResult};
use crate::shape::ShapeKind;

/// Tuning for the overlap resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Trimmed area below this (square meters) is treated as erased.
    pub min_area_m2: f64,
    /// Vertex count of the polygon approximating a circle.
    pub circle_steps: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            min_area_m2: DEFAULT_MIN_AREA_M2,
            circle_steps: DEFAULT_CIRCLE_STEPS,
        }
    }
}

/// Maximum number of stored shapes per kind. `None` means unlimited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeLimits {
    pub polygon: Option<usize>,
    pub rectangle: Option<usize>,
    pub circle: Option<usize>,
    pub line: Option<usize>,
}

impl Default for ShapeLimits {
    fn default() -> Self {
        Self {
            polygon: Some(DEFAULT_POLYGON_LIMIT),
            rectangle: Some(DEFAULT_RECTANGLE_LIMIT),
            circle: Some(DEFAULT_CIRCLE_LIMIT),
            line: None,
        }
    }
}

impl ShapeLimits {
    pub fn unlimited() -> Self {
        Self {
            polygon: None,
            rectangle: None,
            circle: None,
            line: None,
        }
    }

    pub fn limit_for(&self, kind: ShapeKind) -> Option<usize> {
        match kind {
            ShapeKind::Polygon => self.polygon,
            ShapeKind::Rectangle => self.rectangle,
            ShapeKind::Circle => self.circle,
            ShapeKind::Line => self.line,
        }
    }

    /// Whether one more shape of `kind` fits when `current` are stored.
    pub fn allows(&self, kind: ShapeKind, current: usize) -> bool {
        self.limit_for(kind).map_or(true, |limit| current < limit)
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub resolver: ResolverConfig,
    pub limits: ShapeLimits,
}

impl Config {
    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Config = match extension(path) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> ConfigResult<()> {
        self.validate()?;

        let content = match extension(path) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let min_area = self.resolver.min_area_m2;
        if !min_area.is_finite() || min_area < 0.0 {
            return Err(ConfigError::Invalid {
                key: "resolver.min_area_m2".to_string(),
                reason: format!("must be a finite, non-negative number, got {}", min_area),
            });
        }

        if self.resolver.circle_steps < MIN_CIRCLE_STEPS {
            return Err(ConfigError::Invalid {
                key: "resolver.circle_steps".to_string(),
                reason: format!("must be at least {}", MIN_CIRCLE_STEPS),
            });
        }

        Ok(())
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}
