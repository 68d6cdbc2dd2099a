use std::{fs, path::Path};

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_TEXTURE_PATH: &str = "assets/cracks.png";

const DEFAULT_ROTATION_SPEED_X: f32 = 0.0;
const DEFAULT_ROTATION_SPEED_Y: f32 = 0.001;
const DEFAULT_SIZE: f64 = 200.0;
const DEFAULT_CAMERA_Z: f32 = 250.0;
const DEFAULT_FIELD_OF_VIEW: f32 = 1.0;
const DEFAULT_NEAR_CLIPPING: f32 = 1.0;
const DEFAULT_FAR_CLIPPING: f32 = 1000.0;

/// Inputs of the sphere view. Read once before mount, never rebound after.
///
/// Rotation speeds are radians per tick. `size` is a hint the view itself
/// ignores; the shell uses it as the window's logical side length.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub rotation_speed_x: f32,
    pub rotation_speed_y: f32,
    pub size: f64,
    pub texture_path: String,
    pub camera_z: f32,
    pub field_of_view: f32,
    pub near_clipping: f32,
    pub far_clipping: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            rotation_speed_x: DEFAULT_ROTATION_SPEED_X,
            rotation_speed_y: DEFAULT_ROTATION_SPEED_Y,
            size: DEFAULT_SIZE,
            texture_path: DEFAULT_TEXTURE_PATH.to_string(),
            camera_z: DEFAULT_CAMERA_Z,
            field_of_view: DEFAULT_FIELD_OF_VIEW,
            near_clipping: DEFAULT_NEAR_CLIPPING,
            far_clipping: DEFAULT_FAR_CLIPPING,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("near clipping plane ({near}) must be closer than far clipping plane ({far})")]
    ClipPlaneOrder { near: f32, far: f32 },
    #[error("field of view must be positive, got {0}")]
    FieldOfView(f32),
}

impl RenderConfig {
    /// Read a config file, falling back to the defaults when there is none.
    /// Keys absent from the file keep their default values.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.near_clipping >= self.far_clipping {
            return Err(ConfigError::ClipPlaneOrder {
                near: self.near_clipping,
                far: self.far_clipping,
            });
        }
        if self.field_of_view <= 0.0 {
            return Err(ConfigError::FieldOfView(self.field_of_view));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_declared_inputs() {
        let config = RenderConfig::default();
        assert_eq!(config.rotation_speed_x, 0.0);
        assert_eq!(config.rotation_speed_y, 0.001);
        assert_eq!(config.size, 200.0);
        assert_eq!(config.texture_path, DEFAULT_TEXTURE_PATH);
        assert_eq!(config.camera_z, 250.0);
        assert_eq!(config.field_of_view, 1.0);
        assert_eq!(config.near_clipping, 1.0);
        assert_eq!(config.far_clipping, 1000.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = RenderConfig::load(Path::new("definitely/not/here.toml")).unwrap();
        assert_eq!(config.rotation_speed_y, 0.001);
    }

    #[test]
    fn toml_keys_override_defaults() {
        let config: RenderConfig =
            toml::from_str("rotation_speed_y = 0.5\nfield_of_view = 45.0").unwrap();
        assert_eq!(config.rotation_speed_y, 0.5);
        assert_eq!(config.field_of_view, 45.0);
        // untouched keys keep their defaults
        assert_eq!(config.camera_z, 250.0);
        assert_eq!(config.texture_path, DEFAULT_TEXTURE_PATH);
    }

    #[test]
    fn unknown_toml_keys_are_rejected() {
        assert!(toml::from_str::<RenderConfig>("rotation_speed = 0.5").is_err());
    }

    #[test]
    fn swapped_clip_planes_are_rejected() {
        let config = RenderConfig {
            near_clipping: 1000.0,
            far_clipping: 1.0,
            ..RenderConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ClipPlaneOrder { .. })
        ));
    }

    #[test]
    fn equal_clip_planes_are_rejected() {
        let config = RenderConfig {
            near_clipping: 10.0,
            far_clipping: 10.0,
            ..RenderConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn non_positive_field_of_view_is_rejected() {
        let config = RenderConfig {
            field_of_view: 0.0,
            ..RenderConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::FieldOfView(_))
        ));
    }
}
