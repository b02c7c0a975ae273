//! Application entry point.

use winit::event_loop::{ControlFlow, EventLoop};
use log::{info, error};

use road_scene::{App, SceneConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    info!("Logger initialized");

    let config = SceneConfig::load().unwrap_or_else(|e| {
        error!("Failed to load config: {}, using defaults", e);
        SceneConfig::default()
    });

    let event_loop = EventLoop::new().map_err(|e| {
        error!("Failed to create event loop: {:?}", e);
        e
    })?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    if let Err(e) = event_loop.run_app(&mut app) {
        error!("Application error: {:?}", e);
        return Err(Box::new(e));
    }

    Ok(())
}
