use winit::dpi::PhysicalPosition;
use winit::keyboard::KeyCode;
use log::debug;

use crate::engine::graphics::shader::ShaderKind;
use crate::game::player::driver::Driver;
use crate::game::world::scene::ObjectId;

/// What a key press asks the scene to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    SelectShader(ShaderKind),
    SelectObject(ObjectId),
    FlipTexturing,
    ToggleLight,
    Scale(f32),
    ToggleFps,
    Steer(f32),
    Throttle(f32),
    ResetThrottle,
    Exit,
}

impl Command {
    /// Whether holding the key should keep applying the command. Toggles,
    /// selections and scaling fire once per press.
    pub fn repeats(&self) -> bool {
        matches!(self, Command::Steer(_) | Command::Throttle(_))
    }
}

pub struct InputHandler {
    pub drag_sensitivity: f32,
    pub key_step: f32,
    dragging: bool,
    last_cursor: Option<PhysicalPosition<f64>>,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self {
            drag_sensitivity: 1.0,
            key_step: 10.0,
            dragging: false,
            last_cursor: None,
        }
    }
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn command_for(&self, keycode: KeyCode) -> Option<Command> {
        use KeyCode::*;
        let command = match keycode {
            Digit1 => Command::SelectShader(ShaderKind::Gouraud),
            Digit2 => Command::SelectShader(ShaderKind::Phong),
            Digit3 => Command::SelectShader(ShaderKind::NormalMap),
            KeyR => Command::SelectObject(ObjectId::Road),
            KeyC => Command::SelectObject(ObjectId::Car),
            KeyT => Command::FlipTexturing,
            KeyL => Command::ToggleLight,
            Equal | NumpadAdd => Command::Scale(1.1),
            Minus | NumpadSubtract => Command::Scale(0.9),
            KeyF => Command::ToggleFps,
            ArrowLeft => Command::Steer(-self.key_step),
            ArrowRight => Command::Steer(self.key_step),
            ArrowUp => Command::Throttle(-self.key_step),
            ArrowDown => Command::Throttle(self.key_step),
            Space => Command::ResetThrottle,
            Escape => Command::Exit,
            _ => return None,
        };
        Some(command)
    }

    pub fn handle_mouse_button(&mut self, pressed: bool) {
        self.dragging = pressed;
        if !pressed {
            self.last_cursor = None;
        }
    }

    /// While dragging, horizontal motion steers and vertical motion throttles.
    pub fn handle_cursor_moved(&mut self, position: PhysicalPosition<f64>, driver: &mut Driver) {
        if self.dragging {
            if let Some(last) = self.last_cursor {
                let dx = (position.x - last.x) as f32 * self.drag_sensitivity;
                let dy = (position.y - last.y) as f32 * self.drag_sensitivity;
                driver.add_steer(dx);
                driver.add_throttle(dy);
                debug!("Drag: steer {} throttle {}", driver.steer, driver.throttle);
            }
            self.last_cursor = Some(position);
        }
    }
}
