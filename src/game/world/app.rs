use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};
use log::{error, info, warn};

use crate::config::SceneConfig;
use crate::engine::graphics::renderer::{FrameData, Renderer};
use crate::engine::graphics::uniforms::FrameUniform;
use crate::engine::input::{Command, InputHandler};
use crate::error::{Result, SceneError};
use crate::game::player::driver::Driver;
use crate::game::state::game_state::GameState;
use crate::game::world::camera::{Camera, Projection};
use crate::game::world::light::{Light, Material};
use crate::game::world::scene::{Scene, SceneLayout};

pub struct App {
    config: SceneConfig,
    window: Option<Arc<Window>>,
    surface: Option<wgpu::Surface<'static>>,
    renderer: Option<Renderer>,
    scene: Option<Scene>,
    camera: Camera,
    projection: Projection,
    driver: Driver,
    light: Light,
    material: Material,
    layout: SceneLayout,
    state: GameState,
    input_handler: InputHandler,
}

impl Default for App {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}

impl App {
    pub fn new(config: SceneConfig) -> Self {
        let camera = Camera::from_config(&config.camera);
        let projection = Projection::new(config.window.width, config.window.height, config.camera.near, config.camera.far);
        let driver = Driver::new(config.drive.clone(), camera.eye);
        Self {
            window: None,
            surface: None,
            renderer: None,
            scene: None,
            camera,
            projection,
            driver,
            light: Light::from_config(&config.light),
            material: Material::from_config(&config.material),
            layout: SceneLayout::from_config(&config.layout),
            state: GameState::new(&config.shading, config.layout.max_scale),
            input_handler: InputHandler::new(),
            config,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attributes = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(winit::dpi::PhysicalSize::new(self.config.window.width, self.config.window.height));
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("Failed to create window: {:?}", e);
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        if let Err(e) = pollster::block_on(self.init_wgpu(window)) {
            error!("Failed to initialise graphics: {}", e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::Resized(physical_size) => {
                self.resize(physical_size);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed {
                    if let winit::keyboard::PhysicalKey::Code(keycode) = event.physical_key {
                        if let Some(command) = self.input_handler.command_for(keycode) {
                            if !event.repeat || command.repeats() {
                                self.apply_command(command, event_loop);
                            }
                        }
                    }
                }
            }
            WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => {
                self.input_handler.handle_mouse_button(state == ElementState::Pressed);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.input_handler.handle_cursor_moved(position, &mut self.driver);
            }
            _ => (),
        }
    }
}

impl App {
    async fn init_wgpu(&mut self, window: Arc<Window>) -> Result<()> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(SceneError::NoAdapter)?;
        info!("Using adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps.formats.iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = Renderer::new(device, queue, config, self.layout.draw_count());
        let scene = Scene::load(&renderer.texture_context(), &self.config.assets, &self.config.layout);
        self.projection.resize(size.width, size.height);

        self.surface = Some(surface);
        self.renderer = Some(renderer);
        self.scene = Some(scene);
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        self.state.update_frame_count();
        if let Some(fps) = self.state.update_fps_display() {
            info!("FPS: {}", fps);
        }

        self.light.update();
        let player = self.driver.update(&mut self.camera, self.layout.player_start);
        let draws = self.layout.draw_list(player, self.state.scale);

        let (Some(renderer), Some(surface), Some(scene)) = (self.renderer.as_mut(), self.surface.as_ref(), self.scene.as_ref()) else {
            return;
        };
        let frame = FrameData {
            shader: self.state.current_shader,
            uniform: FrameUniform::new(&self.light, &self.material, self.camera.eye),
            view_proj: self.projection.view_proj(&self.camera),
            draws: &draws,
            enable_texture: self.state.enable_texture,
        };

        match renderer.render(surface, &frame, scene) {
            Ok(()) => {}
            Err(SceneError::Surface(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                warn!("Surface lost, reconfiguring");
                surface.configure(&renderer.device, &renderer.config);
            }
            Err(SceneError::Surface(wgpu::SurfaceError::OutOfMemory)) => {
                error!("Out of GPU memory, exiting");
                event_loop.exit();
            }
            Err(e) => {
                error!("Render error: {}", e);
            }
        }
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if self.projection.resize(new_size.width, new_size.height) {
            if let (Some(renderer), Some(surface)) = (self.renderer.as_mut(), self.surface.as_ref()) {
                renderer.resize(new_size, surface);
            }
        }
    }

    fn apply_command(&mut self, command: Command, event_loop: &ActiveEventLoop) {
        match command {
            Command::SelectShader(kind) => self.state.set_shader(kind),
            Command::SelectObject(object) => self.state.set_object(object),
            Command::FlipTexturing => {
                let has_texture = self
                    .scene
                    .as_ref()
                    .map(|scene| scene.get(self.state.current_object).has_texture())
                    .unwrap_or(false);
                self.state.flip_texturing(has_texture);
            }
            Command::ToggleLight => self.light.toggle_rotation(),
            Command::Scale(factor) => self.state.change_scale(factor),
            Command::ToggleFps => self.state.toggle_fps_display(),
            Command::Steer(delta) => self.driver.add_steer(delta),
            Command::Throttle(delta) => self.driver.add_throttle(delta),
            Command::ResetThrottle => self.driver.reset_throttle(),
            Command::Exit => event_loop.exit(),
        }
    }
}
