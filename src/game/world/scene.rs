use glam::{Mat4, Vec3};
use log::{info, warn};

use crate::config::{AssetConfig, LayoutConfig};
use crate::engine::graphics::mesh::{Mesh, MeshBuffers};
use crate::engine::graphics::texture::{unit_format, unit_name, Placeholders, Texture, TextureSet};

/// Fixed object slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectId {
    Road = 0,
    Car = 1,
}

/// A mesh plus its texture set, rendered with one draw call.
pub struct Object3D {
    pub name: String,
    pub mesh: MeshBuffers,
    pub textures: TextureSet,
}

impl Object3D {
    pub fn has_texture(&self) -> bool {
        self.textures.count > 0
    }
}

pub struct Scene {
    pub road: Object3D,
    pub car: Object3D,
}

/// GPU objects shared by every texture set.
pub struct TextureContext<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub layout: &'a wgpu::BindGroupLayout,
    pub sampler: &'a wgpu::Sampler,
    pub placeholders: &'a Placeholders,
}

impl Scene {
    pub fn load(ctx: &TextureContext, assets: &AssetConfig, layout: &LayoutConfig) -> Self {
        let road_mesh = load_mesh(assets.road_mesh.as_deref(), || Mesh::road(layout.road_half_extent, 4.0));
        let car_mesh = load_mesh(assets.car_mesh.as_deref(), || Mesh::cube(2.0));
        Self {
            road: Object3D::upload(ctx, "road", &road_mesh, &assets.road_textures),
            car: Object3D::upload(ctx, "car", &car_mesh, &assets.car_textures),
        }
    }

    pub fn get(&self, id: ObjectId) -> &Object3D {
        match id {
            ObjectId::Road => &self.road,
            ObjectId::Car => &self.car,
        }
    }
}

impl Object3D {
    /// Uploads `mesh` and the textures at `paths`. If any texture fails to load the
    /// object is left untextured.
    pub fn upload(ctx: &TextureContext, name: &str, mesh: &Mesh, paths: &[std::path::PathBuf]) -> Self {
        let loaded: Result<Vec<Texture>, _> = paths
            .iter()
            .take(2)
            .enumerate()
            .map(|(unit, path)| Texture::load(ctx.device, ctx.queue, path, unit_format(unit)))
            .collect();
        let textures = loaded.unwrap_or_else(|e| {
            warn!("Failed to load textures for {}: {}, rendering untextured", name, e);
            Vec::new()
        });
        for unit in 0..textures.len() {
            info!("Attached {} to {}", unit_name(unit), name);
        }

        let refs: Vec<&Texture> = textures.iter().collect();
        let textures = TextureSet::new(
            ctx.device,
            ctx.layout,
            ctx.sampler,
            &refs,
            ctx.placeholders,
            &format!("{} Texture Set", name),
        );

        Self {
            name: name.to_owned(),
            mesh: MeshBuffers::upload(ctx.device, mesh),
            textures,
        }
    }
}

fn load_mesh(path: Option<&std::path::Path>, fallback: impl FnOnce() -> Mesh) -> Mesh {
    match path {
        Some(path) => Mesh::load_gltf(path).unwrap_or_else(|e| {
            warn!("Failed to load mesh {}: {}, using built-in geometry", path.display(), e);
            fallback()
        }),
        None => fallback(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub object: ObjectId,
    pub model: Mat4,
}

/// Where the cars stand. The player car moves; traffic is static.
#[derive(Debug, Clone)]
pub struct SceneLayout {
    pub player_start: Vec3,
    pub traffic: Vec<Vec3>,
}

impl SceneLayout {
    pub fn from_config(config: &LayoutConfig) -> Self {
        Self {
            player_start: Vec3::from(config.player_start),
            traffic: config.traffic.iter().copied().map(Vec3::from).collect(),
        }
    }

    pub fn draw_count(&self) -> usize {
        self.traffic.len() + 2
    }

    /// Draws for one frame: the player car, each traffic car, then the road.
    pub fn draw_list(&self, player: Vec3, scale: f32) -> Vec<DrawCall> {
        let car = |position: Vec3| DrawCall {
            object: ObjectId::Car,
            model: Mat4::from_translation(position) * Mat4::from_scale(Vec3::splat(scale)),
        };

        let mut draws = Vec::with_capacity(self.draw_count());
        draws.push(car(player));
        draws.extend(self.traffic.iter().map(|&position| car(position)));
        draws.push(DrawCall {
            object: ObjectId::Road,
            model: Mat4::IDENTITY,
        });
        draws
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_draw_order() {
        let layout = SceneLayout::from_config(&LayoutConfig::default());
        let draws = layout.draw_list(Vec3::new(5.0, 5.0, 25.0), 1.0);
        let order: Vec<_> = draws.iter().map(|d| d.object).collect();
        assert_eq!(
            order,
            vec![ObjectId::Car, ObjectId::Car, ObjectId::Car, ObjectId::Car, ObjectId::Car, ObjectId::Road]
        );
        assert_eq!(draws.len(), layout.draw_count());
    }

    #[test]
    fn test_cars_are_translated() {
        let layout = SceneLayout::from_config(&LayoutConfig::default());
        let draws = layout.draw_list(Vec3::new(5.0, 5.0, 25.0), 1.0);
        let origin = |d: &DrawCall| d.model.transform_point3(Vec3::ZERO);
        assert_eq!(origin(&draws[0]), Vec3::new(5.0, 5.0, 25.0));
        assert_eq!(origin(&draws[1]), Vec3::new(-10.0, 5.0, 10.0));
        assert_eq!(origin(&draws[4]), Vec3::new(50.0, 5.0, 15.0));
        assert_eq!(draws[5].model, Mat4::IDENTITY);
    }

    #[test]
    fn test_scale_applies_to_cars_only() {
        let layout = SceneLayout::from_config(&LayoutConfig::default());
        let draws = layout.draw_list(Vec3::ZERO, 1.2);
        let corner = draws[0].model.transform_point3(Vec3::ONE);
        assert!((corner - Vec3::splat(1.2)).length() < 1e-6);
        assert_eq!(draws.last().unwrap().model, Mat4::IDENTITY);
    }
}
