//! Mesh management module.
//!
//! This module defines the [`Mesh`] struct for managing mesh data on the GPU side.
//! Vertices implement the [`Vertex`] trait, which describes their interleaved layout.

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glow::HasContext;

/// One vertex channel bound to a shader input slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    pub location: u32,
    /// Number of `f32` components.
    pub components: i32,
    /// Byte offset of the channel within one vertex.
    pub offset: i32,
}

/// Trait that defines the memory layout of a vertex.
pub trait Vertex: Pod {
    /// Channels in location order.
    const ATTRIBUTES: &'static [VertexAttribute];

    /// Byte distance between consecutive vertices.
    fn stride() -> i32 {
        std::mem::size_of::<Self>() as i32
    }

    /// Sets up the vertex attribute pointers for the currently bound buffer.
    fn vertex_attribs(gl: &glow::Context) {
        for attribute in Self::ATTRIBUTES {
            unsafe {
                gl.vertex_attrib_pointer_f32(
                    attribute.location,
                    attribute.components,
                    glow::FLOAT,
                    false,
                    Self::stride(),
                    attribute.offset,
                );
                gl.enable_vertex_attrib_array(attribute.location);
            }
        }
    }
}

/// Position only.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PositionVertex {
    pub position: [f32; 3],
}

impl Vertex for PositionVertex {
    const ATTRIBUTES: &'static [VertexAttribute] = &[VertexAttribute {
        location: 0,
        components: 3,
        offset: std::mem::offset_of!(PositionVertex, position) as i32,
    }];
}

/// Position, color and texture coordinate, interleaved.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct TexturedVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub tex_coord: [f32; 2],
}

impl Vertex for TexturedVertex {
    const ATTRIBUTES: &'static [VertexAttribute] = &[
        VertexAttribute {
            location: 0,
            components: 3,
            offset: std::mem::offset_of!(TexturedVertex, position) as i32,
        },
        VertexAttribute {
            location: 1,
            components: 3,
            offset: std::mem::offset_of!(TexturedVertex, color) as i32,
        },
        VertexAttribute {
            location: 2,
            components: 2,
            offset: std::mem::offset_of!(TexturedVertex, tex_coord) as i32,
        },
    ];
}

/// Passes `result` through, running `release` first if it is an error. Used to
/// free the objects created before a failing allocation.
fn or_release<T>(result: Result<T, String>, release: impl FnOnce()) -> Result<T, String> {
    if result.is_err() {
        release();
    }
    result
}

/// Represents a mesh stored on the GPU side.
///
/// Without an index list the mesh is drawn with `glDrawArrays`, otherwise
/// with `glDrawElements` over `u32` indices.
pub struct Mesh {
    gl: Arc<glow::Context>,
    draw_mode: u32,
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    ebo: Option<glow::Buffer>,
    count: usize,
}

impl Mesh {
    /// Uploads the vertex data, and the index data if any, into static
    /// buffers and records the vertex layout in a new vertex array.
    pub fn new<V: Vertex>(
        gl: &Arc<glow::Context>,
        vertices: &[V],
        indices: Option<&[u32]>,
        draw_mode: u32,
    ) -> Result<Self, String> {
        unsafe {
            let vao = gl.create_vertex_array()?;
            let vbo = or_release(gl.create_buffer(), || gl.delete_vertex_array(vao))?;
            let ebo = match indices {
                Some(_) => Some(or_release(gl.create_buffer(), || {
                    gl.delete_buffer(vbo);
                    gl.delete_vertex_array(vao);
                })?),
                None => None,
            };

            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(vertices),
                glow::STATIC_DRAW,
            );

            if let (Some(ebo), Some(indices)) = (ebo, indices) {
                gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
                gl.buffer_data_u8_slice(
                    glow::ELEMENT_ARRAY_BUFFER,
                    bytemuck::cast_slice(indices),
                    glow::STATIC_DRAW,
                );
            }

            V::vertex_attribs(gl);

            // The element buffer binding is part of the vertex array state, so
            // the vertex array has to be unbound first.
            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None);

            let count = indices.map_or(vertices.len(), <[u32]>::len);
            log::debug!(
                "uploaded {} vertices ({} bytes each), {} indices",
                vertices.len(),
                V::stride(),
                indices.map_or(0, <[u32]>::len)
            );

            Ok(Self {
                gl: Arc::clone(gl),
                draw_mode,
                vao,
                vbo,
                ebo,
                count,
            })
        }
    }

    /// Draws the mesh.
    pub fn draw(&self) {
        unsafe {
            self.gl.bind_vertex_array(Some(self.vao));
            if self.ebo.is_some() {
                self.gl.draw_elements(self.draw_mode, self.count as i32, glow::UNSIGNED_INT, 0);
            } else {
                self.gl.draw_arrays(self.draw_mode, 0, self.count as i32);
            }
            self.gl.bind_vertex_array(None);
        }
    }
}

impl Drop for Mesh {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_buffer(self.vbo);
            if let Some(ebo) = self.ebo {
                self.gl.delete_buffer(ebo);
            }
            self.gl.delete_vertex_array(self.vao);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_allocation_releases_earlier_objects() {
        let mut released = 0;
        let result: Result<u32, String> =
            or_release(Err("out of memory".to_string()), || released += 1);
        assert_eq!(result.unwrap_err(), "out of memory");
        assert_eq!(released, 1);
    }

    #[test]
    fn successful_allocation_keeps_earlier_objects() {
        let mut released = 0;
        assert_eq!(or_release(Ok(7), || released += 1), Ok(7));
        assert_eq!(released, 0);
    }

    #[test]
    fn textured_vertex_layout() {
        assert_eq!(TexturedVertex::stride(), 8 * 4);
        let offsets: Vec<i32> = TexturedVertex::ATTRIBUTES.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, [0, 12, 24]);
        let components: Vec<i32> = TexturedVertex::ATTRIBUTES
            .iter()
            .map(|a| a.components)
            .collect();
        assert_eq!(components, [3, 3, 2]);
    }

    #[test]
    fn position_vertex_layout() {
        assert_eq!(PositionVertex::stride(), 3 * 4);
        assert_eq!(
            PositionVertex::ATTRIBUTES,
            &[VertexAttribute {
                location: 0,
                components: 3,
                offset: 0
            }]
        );
    }

    #[test]
    fn locations_are_sequential() {
        for (i, attribute) in TexturedVertex::ATTRIBUTES.iter().enumerate() {
            assert_eq!(attribute.location, i as u32);
        }
    }

    #[test]
    fn channels_fill_the_stride() {
        let covered: i32 = TexturedVertex::ATTRIBUTES
            .iter()
            .map(|a| a.components * 4)
            .sum();
        assert_eq!(covered, TexturedVertex::stride());
    }
}
