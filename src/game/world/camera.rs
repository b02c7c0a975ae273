use glam::{Mat4, Vec3, Vec4};

use crate::config::CameraConfig;

pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

impl Camera {
    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            eye: Vec3::from(config.eye),
            target: Vec3::from(config.target),
            up: Vec3::Y,
        }
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
}

/// Off-axis perspective frustum. Left/right span `-ratio..ratio`, bottom/top `-1..1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    pub fn new(width: u32, height: u32, near: f32, far: f32) -> Self {
        Self {
            ratio: width.max(1) as f32 / height.max(1) as f32,
            near,
            far,
        }
    }

    /// Zero-sized (minimised) surfaces keep the previous ratio.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.ratio = width as f32 / height as f32;
        true
    }

    pub fn matrix(&self) -> Mat4 {
        frustum_rh(-self.ratio, self.ratio, -1.0, 1.0, self.near, self.far)
    }

    pub fn view_proj(&self, camera: &Camera) -> Mat4 {
        self.matrix() * camera.view()
    }
}

/// Right-handed perspective frustum mapping view-space depth `-near..-far`
/// to clip depth `0..1`.
pub fn frustum_rh(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
    let width = right - left;
    let height = top - bottom;
    let depth = near - far;
    Mat4::from_cols(
        Vec4::new(2.0 * near / width, 0.0, 0.0, 0.0),
        Vec4::new(0.0, 2.0 * near / height, 0.0, 0.0),
        Vec4::new((right + left) / width, (top + bottom) / height, far / depth, -1.0),
        Vec4::new(0.0, 0.0, near * far / depth, 0.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(m: Mat4, p: Vec3) -> Vec3 {
        m.project_point3(p)
    }

    #[test]
    fn test_default_camera_looks_at_origin() {
        let camera = Camera::default();
        let view_origin = camera.view().transform_point3(Vec3::ZERO);
        assert!(view_origin.x.abs() < 1e-5 && view_origin.y.abs() < 1e-5);
        assert!((view_origin.z + 725.0f32.sqrt()).abs() < 1e-4);
    }

    #[test]
    fn test_frustum_depth_range() {
        let m = frustum_rh(-1.0, 1.0, -1.0, 1.0, 0.5, 40.0);
        assert!(project(m, Vec3::new(0.0, 0.0, -0.5)).z.abs() < 1e-6);
        assert!((project(m, Vec3::new(0.0, 0.0, -40.0)).z - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_frustum_edges_hit_ndc_bounds() {
        let projection = Projection::new(1600, 800, 0.5, 40.0);
        assert_eq!(projection.ratio, 2.0);
        let m = projection.matrix();
        // The near-plane corner (ratio, 1) lands on the clip-space corner.
        let corner = project(m, Vec3::new(2.0, 1.0, -0.5));
        assert!((corner.x - 1.0).abs() < 1e-5);
        assert!((corner.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_resize_updates_ratio() {
        let mut projection = Projection::new(800, 600, 0.5, 40.0);
        projection.resize(600, 600);
        assert_eq!(projection.ratio, 1.0);
        projection.resize(600, 0);
        assert!(projection.ratio.is_finite());
    }

    #[test]
    fn test_zero_size_keeps_ratio() {
        let mut projection = Projection::new(800, 400, 0.5, 40.0);
        assert!(!projection.resize(0, 600));
        assert!(!projection.resize(600, 0));
        assert_eq!(projection.ratio, 2.0);
        assert!(projection.matrix().is_finite());
    }

    #[test]
    fn test_zero_width_window_gives_finite_matrix() {
        let projection = Projection::new(0, 600, 0.5, 40.0);
        assert!(projection.ratio > 0.0);
        assert!(projection.matrix().is_finite());
    }

    #[test]
    fn test_view_proj_keeps_origin_visible() {
        let camera = Camera::default();
        let projection = Projection::new(800, 600, 0.5, 40.0);
        let ndc = project(projection.view_proj(&camera), Vec3::ZERO);
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }
}
