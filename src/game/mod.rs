//! Scene-specific logic: the driven car, the camera, the light and the fixed
//! object layout.

pub mod player;
pub mod state;
pub mod world;

// Re-export commonly used types
pub use world::{app::App, camera::Camera, scene::Scene};
