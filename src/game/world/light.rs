use glam::{Vec3, Vec4};
use log::info;

use crate::config::{LightConfig, MaterialConfig};

/// The single point light of the scene, optionally orbiting the Y axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub base_position: Vec4,
    pub position: Vec4,
    pub color: Vec3,
    pub angle: f32,
    pub rotating: bool,
    pub rotation_step: f32,
    pub wrap_angle: f32,
}

impl Default for Light {
    fn default() -> Self {
        Self::from_config(&LightConfig::default())
    }
}

impl Light {
    pub fn from_config(config: &LightConfig) -> Self {
        let position = Vec3::from(config.position).extend(1.0);
        Self {
            base_position: position,
            position,
            color: Vec3::from(config.color),
            angle: 0.0,
            rotating: config.rotate,
            rotation_step: config.rotation_step,
            wrap_angle: config.wrap_angle,
        }
    }

    /// Advances the orbit by one frame. No-op while rotation is paused.
    ///
    /// The position is always the base position rotated by the accumulated angle,
    /// so the orbit speed stays constant instead of compounding frame over frame.
    pub fn update(&mut self) {
        if !self.rotating {
            return;
        }
        self.angle += self.rotation_step;
        if self.angle >= self.wrap_angle {
            self.angle = 0.0;
        }

        let (sin, cos) = self.angle.sin_cos();
        let base = self.base_position;
        self.position = Vec4::new(cos * base.x - sin * base.z, base.y, sin * base.x + cos * base.z, base.w);
    }

    pub fn toggle_rotation(&mut self) {
        self.rotating = !self.rotating;
        if self.rotating {
            info!("Light rotation resumed");
        } else {
            info!("Light rotation paused");
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub ambient: Vec4,
    pub diffuse: Vec4,
    pub specular: Vec4,
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self::from_config(&MaterialConfig::default())
    }
}

impl Material {
    pub fn from_config(config: &MaterialConfig) -> Self {
        Self {
            ambient: Vec4::from(config.ambient),
            diffuse: Vec4::from(config.diffuse),
            specular: Vec4::from(config.specular),
            shininess: config.shininess,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paused_light_does_not_move() {
        let mut light = Light::default();
        for _ in 0..100 {
            light.update();
        }
        assert_eq!(light.position, Vec4::new(30.0, 0.0, 10.0, 1.0));
        assert_eq!(light.angle, 0.0);
    }

    #[test]
    fn test_rotation_about_y_axis() {
        let mut light = Light::default();
        light.rotating = true;
        light.rotation_step = std::f32::consts::FRAC_PI_2;
        light.update();
        // (30, 0, 10) rotated a quarter turn
        assert!((light.position - Vec4::new(-10.0, 0.0, 30.0, 1.0)).length() < 1e-4);
        let radius = Vec3::new(light.position.x, 0.0, light.position.z).length();
        assert!((radius - 1000.0f32.sqrt()).abs() < 1e-3);
    }

    #[test]
    fn test_angle_wraps_to_zero() {
        let mut light = Light::default();
        light.rotating = true;
        light.rotation_step = 3.5;
        light.update();
        assert_eq!(light.angle, 3.5);
        light.update();
        assert_eq!(light.angle, 0.0);
        light.update();
        assert_eq!(light.angle, 3.5);
        light.update();
        assert_eq!(light.angle, 0.0);
        assert!((light.position - light.base_position).length() < 1e-5);
    }

    #[test]
    fn test_toggle_rotation() {
        let mut light = Light::default();
        light.toggle_rotation();
        assert!(light.rotating);
        light.toggle_rotation();
        assert!(!light.rotating);
    }

    #[test]
    fn test_default_material() {
        let material = Material::default();
        assert_eq!(material.diffuse, Vec4::new(0.6, 0.6, 0.6, 1.0));
        assert_eq!(material.specular, Vec4::new(0.9, 0.9, 0.9, 1.0));
        assert_eq!(material.shininess, 5.0);
    }
}
