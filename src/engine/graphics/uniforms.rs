//! Uniform blocks shared by all shader variants.
//!
//! Layouts mirror the WGSL structs in `shaders/`: every vec3 is widened to a vec4
//! and scalar tails are padded to 16 bytes.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::game::world::light::{Light, Material};

/// Light, material and eye position. Written once per frame.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct FrameUniform {
    pub light_pos: [f32; 4],
    pub light_color: [f32; 4],
    pub mat_ambient: [f32; 4],
    pub mat_diffuse: [f32; 4],
    pub mat_specular: [f32; 4],
    pub eye_pos: [f32; 4],
    pub mat_shininess: f32,
    pub _padding: [f32; 3],
}

impl FrameUniform {
    pub fn new(light: &Light, material: &Material, eye: Vec3) -> Self {
        Self {
            light_pos: light.position.to_array(),
            light_color: light.color.extend(1.0).to_array(),
            mat_ambient: material.ambient.to_array(),
            mat_diffuse: material.diffuse.to_array(),
            mat_specular: material.specular.to_array(),
            eye_pos: eye.extend(1.0).to_array(),
            mat_shininess: material.shininess,
            _padding: [0.0; 3],
        }
    }
}

/// Per-draw transforms. One slot per draw in a dynamic-offset buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ObjectUniform {
    pub mvp: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    pub has_texture: f32,
    pub _padding: [f32; 3],
}

impl ObjectUniform {
    pub fn new(view_proj: Mat4, model: Mat4, has_texture: bool) -> Self {
        Self {
            mvp: (view_proj * model).to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            normal_matrix: normal_matrix(model).to_cols_array_2d(),
            has_texture: if has_texture { 1.0 } else { 0.0 },
            _padding: [0.0; 3],
        }
    }
}

/// Textures are sampled only when the object has some and texturing is on.
pub fn texture_flag(object_has_texture: bool, enabled: bool) -> bool {
    object_has_texture && enabled
}

/// Inverse-transpose of the model matrix, for transforming normals to world space.
pub fn normal_matrix(model: Mat4) -> Mat4 {
    model.inverse().transpose()
}

/// Size of one object slot once rounded up to the device's offset alignment.
pub fn object_slot_stride(min_alignment: u32) -> u64 {
    let size = std::mem::size_of::<ObjectUniform>() as u64;
    let align = min_alignment.max(1) as u64;
    size.div_ceil(align) * align
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_sizes_match_wgsl() {
        assert_eq!(std::mem::size_of::<FrameUniform>(), 112);
        assert_eq!(std::mem::size_of::<ObjectUniform>(), 208);
    }

    #[test]
    fn test_object_slot_stride_rounds_up() {
        assert_eq!(object_slot_stride(256), 256);
        assert_eq!(object_slot_stride(64), 256);
        assert_eq!(object_slot_stride(16), 208);
        assert_eq!(object_slot_stride(0), 208);
    }

    #[test]
    fn test_mvp_composes_projection_view_model() {
        let view_proj = Mat4::from_scale(Vec3::splat(2.0));
        let model = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let uniform = ObjectUniform::new(view_proj, model, false);
        let mvp = Mat4::from_cols_array_2d(&uniform.mvp);
        let p = mvp.transform_point3(Vec3::ZERO);
        assert!((p - Vec3::new(2.0, 4.0, 6.0)).length() < 1e-5);
    }

    #[test]
    fn test_normal_matrix_ignores_translation() {
        let model = Mat4::from_translation(Vec3::new(5.0, 0.0, -3.0));
        let n = normal_matrix(model).transform_vector3(Vec3::Y);
        assert!((n - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn test_normal_matrix_undoes_non_uniform_scale() {
        let model = Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0));
        // Surface normal of the plane x = y before scaling.
        let n = normal_matrix(model).transform_vector3(Vec3::new(1.0, -1.0, 0.0));
        let tangent = model.transform_vector3(Vec3::new(1.0, 1.0, 0.0));
        assert!(n.dot(tangent).abs() < 1e-5);
    }

    #[test]
    fn test_has_texture_flag() {
        assert_eq!(ObjectUniform::new(Mat4::IDENTITY, Mat4::IDENTITY, true).has_texture, 1.0);
        assert_eq!(ObjectUniform::new(Mat4::IDENTITY, Mat4::IDENTITY, false).has_texture, 0.0);
    }

    #[test]
    fn test_texture_flag_needs_texture_and_switch() {
        assert!(texture_flag(true, true));
        assert!(!texture_flag(true, false));
        assert!(!texture_flag(false, true));
        assert!(!texture_flag(false, false));
        let untextured = ObjectUniform::new(Mat4::IDENTITY, Mat4::IDENTITY, texture_flag(false, true));
        assert_eq!(untextured.has_texture, 0.0);
    }

    #[test]
    fn test_frame_uniform_packs_light_and_material() {
        let light = Light::default();
        let material = Material::default();
        let frame = FrameUniform::new(&light, &material, Vec3::new(0.0, 10.0, 25.0));
        assert_eq!(frame.light_pos, [30.0, 0.0, 10.0, 1.0]);
        assert_eq!(frame.light_color, [0.5, 0.5, 0.5, 1.0]);
        assert_eq!(frame.mat_ambient, [0.45, 0.45, 0.45, 1.0]);
        assert_eq!(frame.eye_pos, [0.0, 10.0, 25.0, 1.0]);
        assert_eq!(frame.mat_shininess, 5.0);
    }
}
