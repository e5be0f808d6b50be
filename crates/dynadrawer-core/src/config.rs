//! Drawer configuration.
//!
//! Every value can be changed at any time; the simulation reads the dynamics
//! parameters on each step.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DrawerError, DrawerResult};

/// Default reveal width for drawers on the horizontal axis.
pub const DEFAULT_REVEAL_WIDTH_HORIZONTAL: f64 = 267.0;
/// Default reveal width for drawers on the vertical axis.
pub const DEFAULT_REVEAL_WIDTH_VERTICAL: f64 = 300.0;

/// Physical parameters of the pane simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DynamicsConfig {
    /// Gravity pulling the pane toward its target. A magnitude of `1.0`
    /// is an acceleration of 1000 points/s².
    pub gravity_magnitude: f64,
    /// Elasticity of collisions, from `0.0` (no bounce) to `1.0`.
    pub elasticity: f64,
    /// Elasticity used while the pane is bounced open.
    pub bounce_elasticity: f64,
    /// Magnitude of the push applied when the pane is bounced open.
    pub bounce_magnitude: f64,
    /// Distance the pane travels past the container edge when open wide.
    pub open_wide_edge_offset: f64,
}

impl Default for DynamicsConfig {
    fn default() -> Self {
        Self {
            gravity_magnitude: 2.0,
            elasticity: 0.0,
            bounce_elasticity: 0.5,
            bounce_magnitude: 60.0,
            open_wide_edge_offset: 20.0,
        }
    }
}

/// Gesture handling options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Only pans that begin at a screen edge may open a closed pane.
    pub pane_drag_requires_screen_edge_pan: bool,
    /// Pans beginning at the edge of an enabled drawer take precedence over
    /// conflicting gestures.
    pub screen_edge_pan_cancels_conflicting_gestures: bool,
    /// Width of the band along each container edge that counts as the edge.
    pub screen_edge_margin: f64,
    /// Release speed (points/s) above which a drag counts as a flick.
    pub flick_velocity: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            pane_drag_requires_screen_edge_pan: false,
            screen_edge_pan_cancels_conflicting_gestures: true,
            screen_edge_margin: 40.0,
            flick_velocity: 500.0,
        }
    }
}

/// Complete drawer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawerConfig {
    pub dynamics: DynamicsConfig,
    pub gestures: GestureConfig,
    /// Reveal width used for left/right drawers without an explicit width.
    pub reveal_width_horizontal: f64,
    /// Reveal width used for top/bottom drawers without an explicit width.
    pub reveal_width_vertical: f64,
    /// Slide the old pane off screen before replacing it.
    pub pane_view_slide_off_animation_enabled: bool,
}

impl Default for DrawerConfig {
    fn default() -> Self {
        Self {
            dynamics: DynamicsConfig::default(),
            gestures: GestureConfig::default(),
            reveal_width_horizontal: DEFAULT_REVEAL_WIDTH_HORIZONTAL,
            reveal_width_vertical: DEFAULT_REVEAL_WIDTH_VERTICAL,
            pane_view_slide_off_animation_enabled: false,
        }
    }
}

impl DrawerConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> DrawerResult<Self> {
        let config: DrawerConfig =
            serde_json::from_str(json).map_err(|e| DrawerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to pretty-printed JSON.
    pub fn to_json(&self) -> DrawerResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| DrawerError::Config(e.to_string()))
    }

    /// Load a configuration from a JSON file.
    pub fn load(path: &Path) -> DrawerResult<Self> {
        let json = fs::read_to_string(path).map_err(|e| {
            DrawerError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::from_json(&json)?;
        log::debug!("Loaded drawer configuration from {}", path.display());
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> DrawerResult<()> {
        let d = &self.dynamics;
        for (name, value) in [("elasticity", d.elasticity), ("bounce_elasticity", d.bounce_elasticity)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(DrawerError::Config(format!(
                    "{name} must be within 0.0..=1.0, got {value}"
                )));
            }
        }
        for (name, value) in [
            ("gravity_magnitude", d.gravity_magnitude),
            ("bounce_magnitude", d.bounce_magnitude),
            ("open_wide_edge_offset", d.open_wide_edge_offset),
            ("reveal_width_horizontal", self.reveal_width_horizontal),
            ("reveal_width_vertical", self.reveal_width_vertical),
            ("screen_edge_margin", self.gestures.screen_edge_margin),
            ("flick_velocity", self.gestures.flick_velocity),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(DrawerError::Config(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if d.gravity_magnitude == 0.0 {
            return Err(DrawerError::Config("gravity_magnitude must be positive".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = DrawerConfig::default();
        assert!((config.dynamics.gravity_magnitude - 2.0).abs() < f64::EPSILON);
        assert!(config.dynamics.elasticity.abs() < f64::EPSILON);
        assert!((config.dynamics.bounce_elasticity - 0.5).abs() < f64::EPSILON);
        assert!((config.dynamics.bounce_magnitude - 60.0).abs() < f64::EPSILON);
        assert!((config.dynamics.open_wide_edge_offset - 20.0).abs() < f64::EPSILON);
        assert!(!config.gestures.pane_drag_requires_screen_edge_pan);
        assert!(config.gestures.screen_edge_pan_cancels_conflicting_gestures);
        assert!(!config.pane_view_slide_off_animation_enabled);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = DrawerConfig::from_json(r#"{ "dynamics": { "elasticity": 0.3 } }"#).unwrap();
        assert!((config.dynamics.elasticity - 0.3).abs() < f64::EPSILON);
        assert!((config.dynamics.gravity_magnitude - 2.0).abs() < f64::EPSILON);
        assert!((config.reveal_width_horizontal - DEFAULT_REVEAL_WIDTH_HORIZONTAL).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejects_out_of_range_elasticity() {
        let err = DrawerConfig::from_json(r#"{ "dynamics": { "elasticity": 1.5 } }"#).unwrap_err();
        assert!(matches!(err, DrawerError::Config(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            DrawerConfig::from_json("{ not json"),
            Err(DrawerError::Config(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "pane_view_slide_off_animation_enabled": true, "gestures": {{ "flick_velocity": 800.0 }} }}"#
        )
        .unwrap();

        let config = DrawerConfig::load(file.path()).unwrap();
        assert!(config.pane_view_slide_off_animation_enabled);
        assert!((config.gestures.flick_velocity - 800.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = DrawerConfig::load(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(DrawerError::Config(_))));
    }

    #[test]
    fn test_json_roundtrip_preserves_values() {
        let mut config = DrawerConfig::default();
        config.dynamics.bounce_magnitude = 42.0;
        let json = config.to_json().unwrap();
        assert_eq!(DrawerConfig::from_json(&json).unwrap(), config);
    }
}
