//! Road scene renderer: a road, a player car and traffic lit by a single
//! moving light, drawn with one of three shader variants.

pub mod config;
pub mod engine;
pub mod error;
pub mod game;

// Re-export main types for convenience
pub use config::SceneConfig;
pub use error::{Result, SceneError};
pub use game::App;
