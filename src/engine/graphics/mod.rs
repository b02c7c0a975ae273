pub mod mesh;
pub mod renderer;
pub mod shader;
pub mod texture;
pub mod uniforms;
pub mod vertex;

pub use mesh::{Mesh, MeshBuffers};
pub use renderer::Renderer;
pub use shader::{Shader, ShaderKind};
pub use texture::{Texture, TextureSet};
pub use vertex::Vertex;
