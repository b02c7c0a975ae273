use std::path::Path;

use glam::Vec3;
use log::{info, warn};
use wgpu::util::DeviceExt;

use crate::engine::graphics::vertex::Vertex;
use crate::error::{Result, SceneError};

/// CPU-side mesh: interleaved vertices plus 16-bit triangle indices.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub name: String,
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

impl Mesh {
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| SceneError::InvalidMesh {
            name: self.name.clone(),
            reason,
        };
        if self.vertices.is_empty() || self.indices.is_empty() {
            return Err(invalid("mesh has no geometry".into()));
        }
        if self.indices.len() % 3 != 0 {
            return Err(invalid(format!("{} indices is not a triangle list", self.indices.len())));
        }
        if let Some(&bad) = self.indices.iter().find(|&&i| i as usize >= self.vertices.len()) {
            return Err(invalid(format!(
                "index {} out of range for {} vertices",
                bad,
                self.vertices.len()
            )));
        }
        Ok(())
    }

    /// Flat road quad on the y = 0 plane facing +Y.
    pub fn road(half_extent: f32, uv_repeat: f32) -> Self {
        let h = half_extent;
        let n = [0.0, 1.0, 0.0];
        let vertices = vec![
            Vertex::new([-h, 0.0, h], n, [0.0, 0.0]),
            Vertex::new([h, 0.0, h], n, [uv_repeat, 0.0]),
            Vertex::new([h, 0.0, -h], n, [uv_repeat, uv_repeat]),
            Vertex::new([-h, 0.0, -h], n, [0.0, uv_repeat]),
        ];
        Self {
            name: "road".into(),
            vertices,
            indices: vec![0, 1, 2, 2, 3, 0],
        }
    }

    /// Axis-aligned cube centred on the origin, counter-clockwise seen from outside.
    pub fn cube(size: f32) -> Self {
        // (normal, u, v) with u x v == normal
        let faces = [
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
            (Vec3::X, Vec3::NEG_Z, Vec3::Y),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::X, Vec3::NEG_Z),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        ];
        let half = size * 0.5;
        let corners = [(-1.0, -1.0, [0.0, 1.0]), (1.0, -1.0, [1.0, 1.0]), (1.0, 1.0, [1.0, 0.0]), (-1.0, 1.0, [0.0, 0.0])];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        for (normal, u, v) in faces {
            let base = vertices.len() as u16;
            for (su, sv, uv) in corners {
                let p = (normal + u * su + v * sv) * half;
                vertices.push(Vertex::new(p.to_array(), normal.to_array(), uv));
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
        }

        Self {
            name: "cube".into(),
            vertices,
            indices,
        }
    }

    /// Reads every triangle primitive of the first mesh in a glTF/GLB file.
    pub fn load_gltf(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let (document, buffers, _images) = gltf::import(path)?;
        let gltf_mesh = document
            .meshes()
            .next()
            .ok_or_else(|| SceneError::NoMesh(path.to_path_buf()))?;
        let name = gltf_mesh
            .name()
            .map(str::to_owned)
            .unwrap_or_else(|| path.display().to_string());

        let mut vertices = Vec::new();
        let mut indices = Vec::new();
        for primitive in gltf_mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                warn!("[mesh] {}: skipping {:?} primitive", name, primitive.mode());
                continue;
            }
            let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));
            let Some(positions) = reader.read_positions() else {
                continue;
            };
            let positions: Vec<[f32; 3]> = positions.collect();
            let normals: Vec<[f32; 3]> = reader
                .read_normals()
                .map(|iter| iter.collect())
                .unwrap_or_else(|| vec![[0.0, 1.0, 0.0]; positions.len()]);
            let tex_coords: Vec<[f32; 2]> = reader
                .read_tex_coords(0)
                .map(|iter| iter.into_f32().collect())
                .unwrap_or_else(|| vec![[0.0, 0.0]; positions.len()]);

            let base = vertices.len() as u32;
            let primitive_indices: Vec<u32> = match reader.read_indices() {
                Some(iter) => iter.into_u32().collect(),
                None => (0..positions.len() as u32).collect(),
            };
            for index in primitive_indices {
                let index = u16::try_from(base + index).map_err(|_| SceneError::InvalidMesh {
                    name: name.clone(),
                    reason: format!("index {} does not fit 16 bits", base + index),
                })?;
                indices.push(index);
            }

            vertices.extend(
                positions
                    .iter()
                    .zip(normals.iter().chain(std::iter::repeat(&[0.0, 1.0, 0.0])))
                    .zip(tex_coords.iter().chain(std::iter::repeat(&[0.0, 0.0])))
                    .map(|((p, n), uv)| Vertex::new(*p, *n, *uv)),
            );
        }

        let mesh = Self { name, vertices, indices };
        mesh.validate()?;
        info!(
            "[mesh] Loaded {} from {}: {} vertices, {} triangles",
            mesh.name,
            path.display(),
            mesh.vertices.len(),
            mesh.indices.len() / 3
        );
        Ok(mesh)
    }
}

/// GPU copy of a [`Mesh`].
pub struct MeshBuffers {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

impl MeshBuffers {
    pub fn upload(device: &wgpu::Device, mesh: &Mesh) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Vertex Buffer", mesh.name)),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Index Buffer", mesh.name)),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        }
    }
}
