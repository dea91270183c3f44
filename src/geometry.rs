//! The fixed shapes drawn by the programs, in normalized device coordinates.

use glam::Vec4;

use crate::abs::{PositionVertex, TexturedVertex};

pub const TRIANGLE_VERTICES: [PositionVertex; 3] = [
    PositionVertex { position: [-0.5, -0.5, 0.0] },
    PositionVertex { position: [0.5, -0.5, 0.0] },
    PositionVertex { position: [0.0, 0.5, 0.0] },
];

/// Corners of the rectangle: top right, bottom right, bottom left, top left.
pub const RECTANGLE_VERTICES: [PositionVertex; 4] = [
    PositionVertex { position: [0.5, 0.5, 0.0] },
    PositionVertex { position: [0.5, -0.5, 0.0] },
    PositionVertex { position: [-0.5, -0.5, 0.0] },
    PositionVertex { position: [-0.5, 0.5, 0.0] },
];

/// Two triangles sharing the 1-3 diagonal.
pub const QUAD_INDICES: [u32; 6] = [0, 1, 3, 1, 2, 3];

/// Solid fill of the rectangle, written by its vertex shader.
pub const RECTANGLE_COLOR: Vec4 = Vec4::new(0.5, 0.0, 0.5, 1.0);

#[rustfmt::skip]
pub const TEXTURED_QUAD_VERTICES: [TexturedVertex; 4] = [
    // top right
    TexturedVertex { position: [0.5, 0.5, 0.0], color: [1.0, 0.0, 0.0], tex_coord: [1.0, 1.0] },
    // bottom right
    TexturedVertex { position: [0.5, -0.5, 0.0], color: [0.0, 1.0, 0.0], tex_coord: [1.0, 0.0] },
    // bottom left
    TexturedVertex { position: [-0.5, -0.5, 0.0], color: [0.0, 0.0, 1.0], tex_coord: [0.0, 0.0] },
    // top left
    TexturedVertex { position: [-0.5, 0.5, 0.0], color: [1.0, 1.0, 0.0], tex_coord: [0.0, 1.0] },
];
