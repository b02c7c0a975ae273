pub mod app;
pub mod camera;
pub mod light;
pub mod scene;

pub use app::App;
pub use camera::{Camera, Projection};
pub use light::{Light, Material};
pub use scene::{DrawCall, Object3D, ObjectId, Scene, SceneLayout};
