//! Application configuration.
//!
//! The configuration is loaded from a JSON file, by default
//! `$XDG_CONFIG_HOME/wsgrid/config.json`.  Every section is optional; a
//! minimal `{}` file is valid and all sections fall back to their
//! compiled-in defaults.  Unknown keys are ignored so the file can grow new
//! sections without breaking older builds.
//!
//! # Example
//!
//! ```json
//! {
//!   "grid": { "rows": 2, "columns": 3, "wraparound": true },
//!   "popup": {
//!     "show_workspace_labels": true,
//!     "item_spacing": 8.0,
//!     "workspace_names": ["web", "code", "chat"]
//!   },
//!   "visualizer": { "linger_ms": 600, "fade_out_ms": 100 }
//! }
//! ```

use crate::grid::{GridShape, Wrap, MAX_DIMENSION};
use crate::layout::LayoutParams;
use crate::traits::SettingsProvider;
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Grid shape and navigation settings.
    #[serde(default)]
    pub grid: GridConfig,

    /// Popup contents and spacing.
    #[serde(default)]
    pub popup: PopupConfig,

    /// Popup display timing.
    #[serde(default)]
    pub visualizer: VisualizerConfig,
}

/// Grid shape and navigation settings.
///
/// `rows` and `columns` below 1 are accepted in the file but clamped to 1
/// when read through [`SettingsProvider::grid_shape`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub rows: usize,
    pub columns: usize,
    /// Stepping off an edge re-enters from the opposite edge.
    pub wraparound: bool,
    /// With wraparound, stay on the same row/column.
    pub wrap_to_same: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 2,
            columns: 2,
            wraparound: false,
            wrap_to_same: false,
        }
    }
}

/// Popup contents and spacing.  Lengths are in pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupConfig {
    pub show_workspace_labels: bool,
    /// Names shown when labels are on.  Missing entries get "Workspace N".
    pub workspace_names: Vec<String>,
    /// Gap between adjacent cells.
    pub item_spacing: f64,
    /// Natural cell height before scaling to the screen's aspect ratio.
    pub item_natural_height: f64,
    /// Total vertical padding around the grid.
    pub vertical_padding: f64,
    /// Total horizontal padding around the grid.
    pub horizontal_padding: f64,
}

impl Default for PopupConfig {
    fn default() -> Self {
        let params = LayoutParams::default();
        Self {
            show_workspace_labels: false,
            workspace_names: Vec::new(),
            item_spacing: params.spacing,
            item_natural_height: params.item_natural_height,
            vertical_padding: params.vertical_padding,
            horizontal_padding: params.horizontal_padding,
        }
    }
}

/// Popup display timing.
///
/// All durations are in **milliseconds**.  Set `fade_out_ms` to `0` for an
/// instant hide.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizerConfig {
    /// How long the popup stays fully opaque after the last switch.
    pub linger_ms: u64,
    /// Duration of the fade-out animation.
    pub fade_out_ms: u64,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            linger_ms: 600,
            fade_out_ms: 100,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: Some(path.to_path_buf()),
                source,
            },
            other => other,
        })
    }

    /// Parse configuration from a JSON string.
    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(contents)
            .map_err(|source| ConfigError::Parse { path: None, source })?;
        config.warn_on_clamped_values();
        Ok(config)
    }

    /// Layout tuning derived from the popup section.
    pub fn layout_params(&self) -> LayoutParams {
        LayoutParams {
            spacing: self.popup.item_spacing.max(0.0),
            item_natural_height: self.popup.item_natural_height.max(0.0),
            vertical_padding: self.popup.vertical_padding,
            horizontal_padding: self.popup.horizontal_padding,
            aspect_ratio: None,
        }
    }

    fn warn_on_clamped_values(&self) {
        for (key, value) in [("grid.rows", self.grid.rows), ("grid.columns", self.grid.columns)] {
            if value == 0 {
                warn!("{} is 0, using 1", key);
            } else if value > MAX_DIMENSION {
                warn!("{} is {}, using {}", key, value, MAX_DIMENSION);
            }
        }
        if self.popup.item_spacing < 0.0 {
            warn!("popup.item_spacing is negative, using 0");
        }
    }
}

impl SettingsProvider for Config {
    fn grid_shape(&self) -> GridShape {
        GridShape::new(self.grid.rows, self.grid.columns)
    }

    fn show_workspace_labels(&self) -> bool {
        self.popup.show_workspace_labels
    }

    fn wrap(&self) -> Wrap {
        Wrap {
            wraparound: self.grid.wraparound,
            wrap_to_same: self.grid.wrap_to_same,
        }
    }
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", display_origin(.path))]
    Parse {
        path: Option<PathBuf>,
        source: serde_json::Error,
    },
}

fn display_origin(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => p.display().to_string(),
        None => "<inline>".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_full_config() {
        let json = r#"{
            "grid": { "rows": 3, "columns": 4, "wraparound": true, "wrap_to_same": true },
            "popup": {
                "show_workspace_labels": true,
                "workspace_names": ["a", "b"],
                "item_spacing": 6.0,
                "item_natural_height": 40.0,
                "vertical_padding": 24.0,
                "horizontal_padding": 20.0
            },
            "visualizer": { "linger_ms": 750, "fade_out_ms": 0 }
        }"#;
        let cfg = Config::from_json(json).unwrap();
        assert_eq!(cfg.grid_shape(), GridShape::new(3, 4));
        assert_eq!(cfg.wrap(), Wrap::SAME_LINE);
        assert!(cfg.show_workspace_labels());
        assert_eq!(cfg.popup.workspace_names, vec!["a", "b"]);
        let p = cfg.layout_params();
        assert_eq!(p.spacing, 6.0);
        assert_eq!(p.item_natural_height, 40.0);
        assert_eq!(p.vertical_padding, 24.0);
        assert_eq!(p.horizontal_padding, 20.0);
        assert_eq!(cfg.visualizer.linger_ms, 750);
        assert_eq!(cfg.visualizer.fade_out_ms, 0);
    }

    #[test]
    fn deserialize_empty_uses_defaults() {
        let cfg = Config::from_json("{}").unwrap();
        assert_eq!(cfg.grid_shape(), GridShape::new(2, 2));
        assert_eq!(cfg.wrap(), Wrap::NONE);
        assert!(!cfg.show_workspace_labels());
        assert_eq!(cfg.layout_params(), LayoutParams::default());
        let vd = VisualizerConfig::default();
        assert_eq!(cfg.visualizer.linger_ms, vd.linger_ms);
        assert_eq!(cfg.visualizer.fade_out_ms, vd.fade_out_ms);
    }

    #[test]
    fn deserialize_partial_grid() {
        let cfg = Config::from_json(r#"{ "grid": { "columns": 5 } }"#).unwrap();
        assert_eq!(cfg.grid.rows, GridConfig::default().rows);
        assert_eq!(cfg.grid.columns, 5);
    }

    #[test]
    fn zero_rows_and_columns_are_clamped() {
        let cfg = Config::from_json(r#"{ "grid": { "rows": 0, "columns": 0 } }"#).unwrap();
        assert_eq!(cfg.grid_shape(), GridShape::new(1, 1));
    }

    #[test]
    fn oversized_grid_is_clamped() {
        let cfg = Config::from_json(r#"{ "grid": { "rows": 18446744073709551615, "columns": 2 } }"#)
            .unwrap();
        let shape = cfg.grid_shape();
        assert_eq!((shape.rows(), shape.columns()), (MAX_DIMENSION, 2));
        assert_eq!(shape.capacity(), MAX_DIMENSION * 2);

        let popup = crate::popup::SwitcherPopup::from_config(&cfg);
        assert_eq!(popup.workspace_count(), MAX_DIMENSION * 2);
        assert_eq!(popup.indicators().len(), MAX_DIMENSION * 2);
    }

    #[test]
    fn negative_spacing_is_clamped() {
        let cfg = Config::from_json(r#"{ "popup": { "item_spacing": -4.0 } }"#).unwrap();
        assert_eq!(cfg.layout_params().spacing, 0.0);
    }

    #[test]
    fn unknown_top_level_keys_ignored() {
        let json = r#"{ "grid": {}, "future_section": { "key": 42 } }"#;
        assert!(Config::from_json(json).is_ok());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = Config::from_json("{ grid: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { path: None, .. }));
        assert!(err.to_string().contains("<inline>"));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = Config::load(Path::new("/nonexistent/wsgrid/config.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/wsgrid/config.json"));
    }
}
