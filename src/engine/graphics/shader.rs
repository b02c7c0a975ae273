use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use wgpu;

use crate::engine::graphics::vertex::Vertex;

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Fixed shader slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShaderKind {
    Gouraud = 0,
    Phong = 1,
    NormalMap = 2,
}

impl ShaderKind {
    pub const ALL: [ShaderKind; 3] = [ShaderKind::Gouraud, ShaderKind::Phong, ShaderKind::NormalMap];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn source(self) -> &'static str {
        match self {
            ShaderKind::Gouraud => include_str!("../shaders/gouraud.wgsl"),
            ShaderKind::Phong => include_str!("../shaders/phong.wgsl"),
            ShaderKind::NormalMap => include_str!("../shaders/normal_map.wgsl"),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ShaderKind::Gouraud => "Gouraud",
            ShaderKind::Phong => "Phong",
            ShaderKind::NormalMap => "Normal Map",
        }
    }
}

impl fmt::Display for ShaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A compiled vertex + fragment pair bound as one pipeline.
pub struct Shader {
    pub kind: ShaderKind,
    pub pipeline: wgpu::RenderPipeline,
}

impl Shader {
    pub fn new(
        device: &wgpu::Device,
        kind: ShaderKind,
        layout: &wgpu::PipelineLayout,
        color_format: wgpu::TextureFormat,
    ) -> Self {
        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(kind.label()),
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(kind.source())),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&format!("{} Pipeline", kind.label())),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: &module,
                entry_point: "vs_main",
                buffers: &[Vertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &module,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        Self { kind, pipeline }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_are_fixed() {
        for (slot, kind) in ShaderKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), slot);
        }
    }

    #[test]
    fn test_sources_declare_shared_bindings() {
        for kind in ShaderKind::ALL {
            let src = kind.source();
            assert!(src.contains("fn vs_main"), "{} has no vertex entry", kind);
            assert!(src.contains("fn fs_main"), "{} has no fragment entry", kind);
            assert!(src.contains("@group(0) @binding(0) var<uniform> frame"));
            assert!(src.contains("@group(1) @binding(0) var<uniform> object"));
            assert!(src.contains("@group(2) @binding(0) var texture1"));
            assert!(src.contains("@group(2) @binding(1) var texture2"));
        }
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&ShaderKind::NormalMap).unwrap(), "\"normal_map\"");
        let kind: ShaderKind = serde_json::from_str("\"gouraud\"").unwrap();
        assert_eq!(kind, ShaderKind::Gouraud);
    }
}
