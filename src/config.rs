// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotator configuration.
//!
//! Settings are read from an optional YAML file. Any field left out of the
//! file keeps its default value.

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Zoom range and step per wheel tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min: 0.5,
            max: 3.0,
            step: 0.1,
        }
    }
}

/// All user-tunable settings of the annotator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotatorConfig {
    pub zoom: ZoomConfig,
    /// Boxes narrower or shorter than this (image pixels) are discarded
    pub min_box_size: f64,
    /// Maximum number of undo snapshots kept per image
    pub history_depth: usize,
    /// Labels offered in the species picker
    pub species: Vec<String>,
    /// File the saved annotations are appended to
    pub output: PathBuf,
    /// Default log filter, overridden by `RUST_LOG`
    pub log_level: String,
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self {
            zoom: ZoomConfig::default(),
            min_box_size: 10.0,
            history_depth: 50,
            species: default_species(),
            output: PathBuf::from("annotations.jsonl"),
            log_level: "info".to_string(),
        }
    }
}

fn default_species() -> Vec<String> {
    [
        "deer",
        "roe deer",
        "moose",
        "wild boar",
        "fox",
        "lynx",
        "hare",
        "badger",
        "raccoon dog",
        "bird",
        "human",
        "other",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl AnnotatorConfig {
    /// Load and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&yaml)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the editor relies on.
    pub fn validate(&self) -> Result<()> {
        let zoom = &self.zoom;
        ensure!(
            zoom.min.is_finite() && zoom.max.is_finite(),
            "zoom bounds must be finite"
        );
        ensure!(zoom.min > 0.0, "zoom.min must be positive, got {}", zoom.min);
        ensure!(
            zoom.min <= zoom.max,
            "zoom.min ({}) must not exceed zoom.max ({})",
            zoom.min,
            zoom.max
        );
        ensure!(
            zoom.step.is_finite() && zoom.step > 0.0,
            "zoom.step must be positive, got {}",
            zoom.step
        );
        ensure!(self.history_depth >= 1, "history_depth must be at least 1");
        ensure!(
            self.min_box_size.is_finite() && self.min_box_size >= 0.0,
            "min_box_size must be non-negative, got {}",
            self.min_box_size
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = AnnotatorConfig::default();
        config.validate().unwrap();
        assert_eq!(config.zoom, ZoomConfig { min: 0.5, max: 3.0, step: 0.1 });
        assert_eq!(config.history_depth, 50);
        assert_eq!(config.min_box_size, 10.0);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "zoom:\n  max: 4.0\nspecies: [deer, moose]").unwrap();

        let config = AnnotatorConfig::load(file.path()).unwrap();
        assert_eq!(config.zoom.max, 4.0);
        assert_eq!(config.zoom.min, 0.5);
        assert_eq!(config.species, vec!["deer", "moose"]);
        assert_eq!(config.history_depth, 50);
    }

    #[test]
    fn test_invalid_zoom_range_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "zoom:\n  min: 2.0\n  max: 1.0").unwrap();

        let err = AnnotatorConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("zoom.min"));
    }

    #[test]
    fn test_zero_history_depth_is_rejected() {
        let config = AnnotatorConfig {
            history_depth: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = AnnotatorConfig::load(Path::new("/nonexistent/riista.yaml")).unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/riista.yaml"));
    }
}
