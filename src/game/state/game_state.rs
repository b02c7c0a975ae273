//! User-controlled render state: current shader, current object, texturing and
//! scale, plus the FPS counter.

use std::time::Instant;

use log::{info, warn};

use crate::config::ShadingConfig;
use crate::engine::graphics::shader::ShaderKind;
use crate::game::world::scene::ObjectId;

pub struct GameState {
    pub current_shader: ShaderKind,
    pub current_object: ObjectId,
    pub enable_texture: bool,
    pub scale: f32,
    pub max_scale: f32,
    pub show_fps: bool,
    pub last_fps_print: Instant,
    pub frame_count: u32,
    pub last_fps: u32,
}

impl GameState {
    pub fn new(shading: &ShadingConfig, max_scale: f32) -> Self {
        Self {
            current_shader: shading.shader,
            current_object: ObjectId::Car,
            enable_texture: shading.textures_enabled,
            scale: 1.0,
            max_scale,
            show_fps: false,
            last_fps_print: Instant::now(),
            frame_count: 0,
            last_fps: 0,
        }
    }

    pub fn set_shader(&mut self, shader: ShaderKind) {
        if self.current_shader != shader {
            info!("Shader: {}", shader);
        }
        self.current_shader = shader;
    }

    pub fn set_object(&mut self, object: ObjectId) {
        self.current_object = object;
    }

    /// Turns texturing on or off. Warns when it is switched on while the current
    /// object has nothing to show.
    pub fn flip_texturing(&mut self, current_has_texture: bool) {
        self.enable_texture = !self.enable_texture;
        if self.enable_texture && !current_has_texture {
            warn!("Object does not have associated texture");
        }
    }

    /// Multiplies the scale by `factor` unless that would exceed `max_scale`.
    pub fn change_scale(&mut self, factor: f32) {
        if self.scale * factor > self.max_scale {
            return;
        }
        self.scale *= factor;
        info!("Scale: {}", self.scale);
    }

    pub fn update_frame_count(&mut self) {
        self.frame_count += 1;
    }

    pub fn update_fps_display(&mut self) -> Option<u32> {
        if !self.show_fps {
            return None;
        }

        let now = Instant::now();
        let elapsed = now.duration_since(self.last_fps_print);

        if elapsed.as_secs_f32() >= 1.0 {
            self.last_fps = self.frame_count;
            self.frame_count = 0;
            self.last_fps_print = now;
            Some(self.last_fps)
        } else {
            None
        }
    }

    pub fn toggle_fps_display(&mut self) {
        self.show_fps = !self.show_fps;
        self.frame_count = 0;
        self.last_fps_print = Instant::now();
        info!("Show FPS: {}", self.show_fps);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn state() -> GameState {
        GameState::new(&ShadingConfig::default(), 1.4)
    }

    #[test]
    fn test_initial_state() {
        let state = state();
        assert_eq!(state.current_shader, ShaderKind::Gouraud);
        assert_eq!(state.current_object, ObjectId::Car);
        assert!(state.enable_texture);
        assert_eq!(state.scale, 1.0);
    }

    #[test]
    fn test_scale_is_capped() {
        let mut state = state();
        state.change_scale(1.2);
        assert!((state.scale - 1.2).abs() < 1e-6);
        state.change_scale(1.2);
        assert!((state.scale - 1.2).abs() < 1e-6);
        state.change_scale(0.5);
        assert!((state.scale - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_flip_texturing() {
        let mut state = state();
        state.flip_texturing(true);
        assert!(!state.enable_texture);
        state.flip_texturing(false);
        assert!(state.enable_texture);
    }

    #[test]
    fn test_set_shader_and_object() {
        let mut state = state();
        state.set_shader(ShaderKind::NormalMap);
        state.set_object(ObjectId::Road);
        assert_eq!(state.current_shader, ShaderKind::NormalMap);
        assert_eq!(state.current_object, ObjectId::Road);
    }

    #[test]
    fn test_fps_reported_once_per_second() {
        let mut state = state();
        assert_eq!(state.update_fps_display(), None);
        state.toggle_fps_display();
        for _ in 0..30 {
            state.update_frame_count();
        }
        assert_eq!(state.update_fps_display(), None);
        state.last_fps_print -= Duration::from_secs(2);
        assert_eq!(state.update_fps_display(), Some(30));
        assert_eq!(state.frame_count, 0);
    }
}
