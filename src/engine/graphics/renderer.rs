use bytemuck::Zeroable;
use glam::Mat4;
use log::{debug, info};
use wgpu;
use wgpu::util::DeviceExt;

use crate::engine::graphics::shader::{Shader, ShaderKind, DEPTH_FORMAT};
use crate::engine::graphics::texture::{Placeholders, TextureSet};
use crate::engine::graphics::uniforms::{object_slot_stride, texture_flag, FrameUniform, ObjectUniform};
use crate::error::{Result, SceneError};
use crate::game::world::scene::{DrawCall, Scene, TextureContext};

pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

/// Everything the renderer needs to know about one frame.
pub struct FrameData<'a> {
    pub shader: ShaderKind,
    pub uniform: FrameUniform,
    pub view_proj: Mat4,
    pub draws: &'a [DrawCall],
    pub enable_texture: bool,
}

pub struct Renderer {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    shaders: Vec<Shader>,
    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    object_layout: wgpu::BindGroupLayout,
    object_buffer: wgpu::Buffer,
    object_bind_group: wgpu::BindGroup,
    object_stride: u64,
    object_slots: usize,
    texture_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    placeholders: Placeholders,
    depth_view: wgpu::TextureView,
}

impl Renderer {
    pub fn new(
        device: wgpu::Device,
        queue: wgpu::Queue,
        config: wgpu::SurfaceConfiguration,
        draw_slots: usize,
    ) -> Self {
        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Frame Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<FrameUniform>() as u64),
                },
                count: None,
            }],
        });

        let frame_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Frame Uniform Buffer"),
            contents: bytemuck::bytes_of(&FrameUniform::zeroed()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Frame Bind Group"),
            layout: &frame_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });

        let object_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Object Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<ObjectUniform>() as u64),
                },
                count: None,
            }],
        });

        let object_stride = object_slot_stride(device.limits().min_uniform_buffer_offset_alignment);
        let draw_slots = draw_slots.max(1);
        let (object_buffer, object_bind_group) =
            Self::create_object_slots(&device, &object_layout, object_stride, draw_slots);

        let texture_layout = TextureSet::bind_group_layout(&device);
        let sampler = TextureSet::create_sampler(&device);
        let placeholders = Placeholders::new(&device, &queue);

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[&frame_layout, &object_layout, &texture_layout],
            push_constant_ranges: &[],
        });
        let shaders = ShaderKind::ALL
            .iter()
            .map(|&kind| {
                let shader = Shader::new(&device, kind, &pipeline_layout, config.format);
                debug!("Built {} pipeline", shader.kind);
                shader
            })
            .collect();

        let depth_view = Self::create_depth_view(&device, config.width, config.height);
        info!("Renderer ready: {} shaders, {} draw slots of {} bytes", ShaderKind::ALL.len(), draw_slots, object_stride);

        Self {
            device,
            queue,
            config,
            shaders,
            frame_buffer,
            frame_bind_group,
            object_layout,
            object_buffer,
            object_bind_group,
            object_stride,
            object_slots: draw_slots,
            texture_layout,
            sampler,
            placeholders,
            depth_view,
        }
    }

    fn create_object_slots(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        stride: u64,
        slots: usize,
    ) -> (wgpu::Buffer, wgpu::BindGroup) {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Object Uniform Buffer"),
            size: stride * slots as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Object Bind Group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(std::mem::size_of::<ObjectUniform>() as u64),
                }),
            }],
        });
        (buffer, bind_group)
    }

    fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
        let depth_texture = device.create_texture(&wgpu::TextureDescriptor {
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            label: Some("Depth Texture"),
            view_formats: &[],
        });
        depth_texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    /// Shared GPU state for uploading object textures.
    pub fn texture_context(&self) -> TextureContext<'_> {
        TextureContext {
            device: &self.device,
            queue: &self.queue,
            layout: &self.texture_layout,
            sampler: &self.sampler,
            placeholders: &self.placeholders,
        }
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>, surface: &wgpu::Surface) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            surface.configure(&self.device, &self.config);
            self.depth_view = Self::create_depth_view(&self.device, new_size.width, new_size.height);
        }
    }

    fn ensure_object_slots(&mut self, needed: usize) {
        if needed <= self.object_slots {
            return;
        }
        debug!("Growing object slots from {} to {}", self.object_slots, needed);
        let (buffer, bind_group) =
            Self::create_object_slots(&self.device, &self.object_layout, self.object_stride, needed);
        self.object_buffer = buffer;
        self.object_bind_group = bind_group;
        self.object_slots = needed;
    }

    /// Clears, binds the selected shader, uploads frame and per-draw uniforms and
    /// issues the draws in order.
    pub fn render(&mut self, surface: &wgpu::Surface, frame: &FrameData, scene: &Scene) -> Result<()> {
        self.ensure_object_slots(frame.draws.len());

        let output = surface.get_current_texture()?;
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

        self.device.push_error_scope(wgpu::ErrorFilter::Validation);

        self.queue
            .write_buffer(&self.frame_buffer, 0, bytemuck::bytes_of(&frame.uniform));

        let stride = self.object_stride as usize;
        let mut slots = vec![0u8; stride * frame.draws.len()];
        for (slot, draw) in frame.draws.iter().enumerate() {
            let object = scene.get(draw.object);
            let uniform = ObjectUniform::new(frame.view_proj, draw.model, texture_flag(object.has_texture(), frame.enable_texture));
            let bytes = bytemuck::bytes_of(&uniform);
            slots[slot * stride..slot * stride + bytes.len()].copy_from_slice(bytes);
        }
        if !slots.is_empty() {
            self.queue.write_buffer(&self.object_buffer, 0, &slots);
        }

        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Render Encoder"),
        });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.shaders[frame.shader.index()].pipeline);
            render_pass.set_bind_group(0, &self.frame_bind_group, &[]);
            for (slot, draw) in frame.draws.iter().enumerate() {
                let object = scene.get(draw.object);
                let offset = (slot * stride) as wgpu::DynamicOffset;
                render_pass.push_debug_group(&object.name);
                render_pass.set_bind_group(1, &self.object_bind_group, &[offset]);
                render_pass.set_bind_group(2, &object.textures.bind_group, &[]);
                render_pass.set_vertex_buffer(0, object.mesh.vertex_buffer.slice(..));
                render_pass.set_index_buffer(object.mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                render_pass.draw_indexed(0..object.mesh.index_count, 0, 0..1);
                render_pass.pop_debug_group();
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        if let Some(error) = pollster::block_on(self.device.pop_error_scope()) {
            return Err(SceneError::Validation {
                op: "draw_indexed",
                message: error.to_string(),
            });
        }
        output.present();
        Ok(())
    }
}
