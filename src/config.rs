//! Scene configuration.
//!
//! Loads settings from `config/scene.json` or creates a default file if missing.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::engine::graphics::shader::ShaderKind;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub light: LightConfig,
    pub material: MaterialConfig,
    pub drive: DriveConfig,
    pub layout: LayoutConfig,
    pub assets: AssetConfig,
    pub shading: ShadingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub eye: [f32; 3],
    pub target: [f32; 3],
    /// Near clip distance of the viewing frustum
    pub near: f32,
    /// Far clip distance of the viewing frustum
    pub far: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    pub position: [f32; 3],
    pub color: [f32; 3],
    /// Start with the light orbiting the Y axis
    pub rotate: bool,
    /// Radians added to the orbit angle each frame
    pub rotation_step: f32,
    /// Angle at which the orbit restarts from zero
    pub wrap_angle: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialConfig {
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    pub shininess: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveConfig {
    /// Steer/throttle inputs below this magnitude snap to zero
    pub dead_zone: f32,
    pub max_throttle: f32,
    pub accel_gain: f32,
    pub steer_divisor: f32,
    pub distance_divisor: f32,
    /// Distance from the eye to the look-at target
    pub look_ahead: f32,
    /// Distance from the eye to the player car
    pub car_lead: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub player_start: [f32; 3],
    pub traffic: Vec<[f32; 3]>,
    pub road_half_extent: f32,
    pub max_scale: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub road_mesh: Option<PathBuf>,
    pub car_mesh: Option<PathBuf>,
    pub road_textures: Vec<PathBuf>,
    pub car_textures: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadingConfig {
    pub shader: ShaderKind,
    pub textures_enabled: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            light: LightConfig::default(),
            material: MaterialConfig::default(),
            drive: DriveConfig::default(),
            layout: LayoutConfig::default(),
            assets: AssetConfig::default(),
            shading: ShadingConfig::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Road Scene".into(),
            width: 1280,
            height: 720,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: [0.0, 10.0, 25.0],
            target: [0.0, 0.0, 0.0],
            near: 0.5,
            far: 40.0,
        }
    }
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            position: [30.0, 0.0, 10.0],
            color: [0.5, 0.5, 0.5],
            rotate: false,
            rotation_step: 0.000005,
            wrap_angle: 6.2,
        }
    }
}

impl Default for MaterialConfig {
    fn default() -> Self {
        Self {
            ambient: [0.45, 0.45, 0.45, 1.0],
            diffuse: [0.6, 0.6, 0.6, 1.0],
            specular: [0.9, 0.9, 0.9, 1.0],
            shininess: 5.0,
        }
    }
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            dead_zone: 2.0,
            max_throttle: 250.0,
            accel_gain: 2.0,
            steer_divisor: 50.0,
            distance_divisor: 1000.0,
            look_ahead: 25.0,
            car_lead: 5.0,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            player_start: [0.0, 5.0, 20.0],
            traffic: vec![
                [-10.0, 5.0, 10.0],
                [-5.0, 5.0, -10.0],
                [10.0, 5.0, 0.0],
                [50.0, 5.0, 15.0],
            ],
            road_half_extent: 20.0,
            max_scale: 1.4,
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            road_mesh: Some("assets/road.glb".into()),
            car_mesh: Some("assets/car.glb".into()),
            road_textures: Vec::new(),
            car_textures: vec![
                "assets/diffuse_old.png".into(),
                "assets/diffusenormalmap_deepbig.png".into(),
            ],
        }
    }
}

impl Default for ShadingConfig {
    fn default() -> Self {
        Self {
            shader: ShaderKind::Gouraud,
            textures_enabled: true,
        }
    }
}

impl SceneConfig {
    /// Load configuration from `config/scene.json`, writing the defaults there if
    /// the file does not exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            warn!("No config file found, creating default at: {}", path.display());
            let config = Self::default();
            config.save_to(&path)?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: SceneConfig = serde_json::from_str(&content)?;
        info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        info!("Saved configuration to: {}", path.display());
        Ok(())
    }

    fn config_path() -> PathBuf {
        Path::new("config").join("scene.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SceneConfig::default();
        assert_eq!(config.camera.eye, [0.0, 10.0, 25.0]);
        assert_eq!(config.camera.near, 0.5);
        assert_eq!(config.camera.far, 40.0);
        assert_eq!(config.layout.traffic.len(), 4);
        assert_eq!(config.shading.shader, ShaderKind::Gouraud);
    }

    #[test]
    fn test_serialize_deserialize() {
        let config = SceneConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: SceneConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: SceneConfig =
            serde_json::from_str(r#"{ "shading": { "shader": "phong" }, "light": { "rotate": true } }"#).unwrap();
        assert_eq!(config.shading.shader, ShaderKind::Phong);
        assert!(config.shading.textures_enabled);
        assert!(config.light.rotate);
        assert_eq!(config.light.position, [30.0, 0.0, 10.0]);
        assert_eq!(config.drive, DriveConfig::default());
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = std::env::temp_dir().join(format!("road_scene_config_{}", std::process::id()));
        let path = dir.join("scene.json");
        let mut config = SceneConfig::default();
        config.window.width = 640;
        config.save_to(&path).unwrap();
        let loaded = SceneConfig::load_from(&path).unwrap();
        assert_eq!(loaded.window.width, 640);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let err = serde_json::from_str::<SceneConfig>("{ \"window\": 3 }");
        assert!(err.is_err());
    }
}
