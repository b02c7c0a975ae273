//! Input handling module
//! Maps keyboard and pointer-drag events to scene commands and driver input.

pub mod handler;

pub use handler::{Command, InputHandler};
