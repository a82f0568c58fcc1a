//! Editor configuration
//!
//! # Sections
//!
//! - `logging`: default log filter
//! - `interaction`: gesture tuning (rotate modifier, rotation rate, floor)
//! - `assets`: import gating, export file name, normalization size
//! - `camera`: default viewport camera

use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};
use crate::foundation::math::{constants::PI, Vec3};
use crate::input::ModifierKey;

/// Top-level editor configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Gesture settings
    pub interaction: InteractionConfig,
    /// Import/export settings
    pub assets: AssetConfig,
    /// Default camera
    pub camera: CameraConfig,
}

impl Config for EditorConfig {}

impl EditorConfig {
    /// Builder: set the rotate modifier
    pub fn with_rotate_modifier(mut self, modifier: ModifierKey) -> Self {
        self.interaction.rotate_modifier = modifier;
        self
    }

    /// Builder: set the export file name
    pub fn with_export_file_name(mut self, name: impl Into<String>) -> Self {
        self.assets.export_file_name = name.into();
        self
    }

    /// Builder: set the log filter
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.logging.level = level.into();
        self
    }

    /// Validate ranges that serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        let assets = &self.assets;
        if !(assets.normalized_size.is_finite() && assets.normalized_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "assets.normalized_size must be positive, got {}",
                assets.normalized_size
            )));
        }
        if assets.export_file_name.trim().is_empty() {
            return Err(ConfigError::Invalid("assets.export_file_name is empty".to_string()));
        }
        if assets.import_extension.trim().is_empty() {
            return Err(ConfigError::Invalid("assets.import_extension is empty".to_string()));
        }
        if !self.interaction.rotation_per_ndc.is_finite() {
            return Err(ConfigError::Invalid("interaction.rotation_per_ndc must be finite".to_string()));
        }
        if !self.interaction.floor_height.is_finite() {
            return Err(ConfigError::Invalid("interaction.floor_height must be finite".to_string()));
        }

        let camera = &self.camera;
        if !(camera.near > 0.0 && camera.far > camera.near) {
            return Err(ConfigError::Invalid(format!(
                "camera planes must satisfy 0 < near < far (near {}, far {})",
                camera.near, camera.far
            )));
        }
        if !(camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "camera.fov_degrees out of range: {}",
                camera.fov_degrees
            )));
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// env_logger filter used when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string() }
    }
}

/// Gesture configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Modifier that turns a drag into a rotation
    pub rotate_modifier: ModifierKey,
    /// Radians of Y rotation per unit of horizontal NDC travel
    pub rotation_per_ndc: f32,
    /// Lowest Y that walls and furniture may be dragged to
    pub floor_height: f32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            rotate_modifier: ModifierKey::Alt,
            rotation_per_ndc: PI,
            floor_height: 0.0,
        }
    }
}

/// Import/export configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Accepted import file extension (case-insensitive, no dot)
    pub import_extension: String,
    /// File name written by the export surface
    pub export_file_name: String,
    /// Largest dimension of an imported asset after normalization
    pub normalized_size: f32,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            import_extension: "glb".to_string(),
            export_file_name: "scene.glb".to_string(),
            normalized_size: 2.0,
        }
    }
}

/// Default viewport camera
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Eye position
    pub position: Vec3,
    /// Look-at target
    pub target: Vec3,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 2.0, 5.0),
            target: Vec3::zeros(),
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EditorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.assets.export_file_name, "scene.glb");
        assert_eq!(config.interaction.rotate_modifier, ModifierKey::Alt);
    }

    #[test]
    fn test_rejects_zero_normalized_size() {
        let mut config = EditorConfig::default();
        config.assets.normalized_size = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_inverted_camera_planes() {
        let mut config = EditorConfig::default();
        config.camera.far = 0.05;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: EditorConfig = toml::from_str(
            "[interaction]\nrotate_modifier = \"shift\"\n\n[assets]\nexport_file_name = \"room.glb\"\n",
        )
        .unwrap();
        assert_eq!(config.interaction.rotate_modifier, ModifierKey::Shift);
        assert_eq!(config.assets.export_file_name, "room.glb");
        assert_eq!(config.assets.import_extension, "glb");
        assert_eq!(config.camera, CameraConfig::default());
    }

    #[test]
    fn test_toml_and_ron_files_round_trip() {
        let dir = std::env::temp_dir().join(format!("room_engine_config_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let config = EditorConfig::default()
            .with_rotate_modifier(ModifierKey::Control)
            .with_log_level("debug");

        for name in ["editor.toml", "editor.ron"] {
            let path = dir.join(name);
            config.save_to_file(&path).unwrap();
            let loaded = EditorConfig::load_from_file(&path).unwrap();
            assert_eq!(loaded, config);
        }

        let bad = dir.join("editor.yaml");
        assert!(matches!(
            config.save_to_file(&bad),
            Err(ConfigError::UnsupportedFormat(_))
        ));
        std::fs::remove_dir_all(&dir).ok();
    }
}
