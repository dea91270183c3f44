//! This module contains the thin layer over SDL2 and OpenGL shared by the
//! programs: application setup and the render loop, input, shaders, meshes
//! and textures.

pub mod app;
pub mod input;
pub mod mesh;
pub mod shader;
pub mod texture;

pub use app::*;
pub use input::*;
pub use mesh::*;
pub use shader::*;
pub use texture::*;
