//! Crate-wide error type.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode image: {0}")]
    Image(#[from] image::ImageError),
    #[error("Failed to import glTF: {0}")]
    Gltf(#[from] gltf::Error),
    #[error("Invalid config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("Surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
    #[error("Failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("Failed to request device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("No suitable graphics adapter found")]
    NoAdapter,
    #[error("File {0:?} contains no mesh")]
    NoMesh(PathBuf),
    #[error("Mesh {name:?} is invalid: {reason}")]
    InvalidMesh { name: String, reason: String },
    #[error("{op}: GPU validation error: {message}")]
    Validation { op: &'static str, message: String },
}

pub type Result<T> = std::result::Result<T, SceneError>;
