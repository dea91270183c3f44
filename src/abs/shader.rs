//! OpenGL Shaders
//!
//! This module defines the [`Shader`] and [`ShaderProgram`] structs for managing OpenGL shaders.
//! This module also provides the [`Uniform`] trait for setting uniform variables in shader
//! programs.

use std::path::Path;
use std::sync::Arc;

use glow::HasContext;

use crate::error::ShaderError;

/// Upper bound on the driver log carried by a [`ShaderError`].
pub const INFO_LOG_LIMIT: usize = 512;

/// Truncates a driver info log to [`INFO_LOG_LIMIT`] bytes without splitting a
/// UTF-8 sequence.
pub fn bounded_log(mut log: String) -> String {
    if log.len() > INFO_LOG_LIMIT {
        let mut end = INFO_LOG_LIMIT;
        while !log.is_char_boundary(end) {
            end -= 1;
        }
        log.truncate(end);
    }
    log.truncate(log.trim_end().len());
    log
}

fn stage_name(shader_type: u32) -> &'static str {
    match shader_type {
        glow::VERTEX_SHADER => "vertex",
        glow::FRAGMENT_SHADER => "fragment",
        glow::GEOMETRY_SHADER => "geometry",
        _ => "unknown",
    }
}

/// Represents an individual OpenGL shader.
pub struct Shader {
    gl: Arc<glow::Context>,
    id: glow::Shader,
}

impl Shader {
    /// Compiles a new shader from the given source code.
    pub fn new(
        gl: &Arc<glow::Context>,
        shader_type: u32,
        source: &str,
    ) -> Result<Self, ShaderError> {
        unsafe {
            let shader = gl.create_shader(shader_type).map_err(ShaderError::Create)?;
            gl.shader_source(shader, source);
            gl.compile_shader(shader);

            if !gl.get_shader_compile_status(shader) {
                let log = bounded_log(gl.get_shader_info_log(shader));
                gl.delete_shader(shader);
                return Err(ShaderError::Compile {
                    stage: stage_name(shader_type),
                    log,
                });
            }

            log::debug!("compiled {} shader", stage_name(shader_type));
            Ok(Self {
                gl: Arc::clone(gl),
                id: shader,
            })
        }
    }

    /// Reads the source text from `path` and compiles it.
    pub fn from_file(
        gl: &Arc<glow::Context>,
        shader_type: u32,
        path: &Path,
    ) -> Result<Self, ShaderError> {
        let source = std::fs::read_to_string(path).map_err(|source| ShaderError::Source {
            path: path.to_path_buf(),
            source,
        })?;
        Self::new(gl, shader_type, &source)
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_shader(self.id);
        }
    }
}

/// Represents a uniform variable in a shader program.
pub trait Uniform {
    /// Sets the value of the uniform variable in the given shader program.
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str);
}

impl Uniform for i32 {
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str) {
        unsafe {
            let location = gl.get_uniform_location(program, name);
            if let Some(loc) = location {
                gl.uniform_1_i32(Some(&loc), *self);
            }
        }
    }
}

/// Represents an OpenGL shader program composed of multiple shaders.
pub struct ShaderProgram {
    gl: Arc<glow::Context>,
    id: glow::Program,
}

impl ShaderProgram {
    /// Links a new shader program from the given shaders.
    pub fn new(gl: &Arc<glow::Context>, shaders: &[&Shader]) -> Result<Self, ShaderError> {
        unsafe {
            let program = gl.create_program().map_err(ShaderError::Create)?;

            for shader in shaders {
                gl.attach_shader(program, shader.id);
            }

            gl.link_program(program);

            if !gl.get_program_link_status(program) {
                let log = bounded_log(gl.get_program_info_log(program));
                gl.delete_program(program);
                return Err(ShaderError::Link { log });
            }

            for shader in shaders {
                gl.detach_shader(program, shader.id);
            }

            Ok(Self {
                gl: Arc::clone(gl),
                id: program,
            })
        }
    }

    /// Compiles a vertex and a fragment stage and links them. The stage
    /// objects are deleted as soon as the program is linked.
    pub fn from_sources(
        gl: &Arc<glow::Context>,
        vertex: &str,
        fragment: &str,
    ) -> Result<Self, ShaderError> {
        let vert = Shader::new(gl, glow::VERTEX_SHADER, vertex)?;
        let frag = Shader::new(gl, glow::FRAGMENT_SHADER, fragment)?;
        Self::new(gl, &[&vert, &frag])
    }

    /// Same as [`ShaderProgram::from_sources`], reading both stages from disk.
    pub fn from_files(
        gl: &Arc<glow::Context>,
        vertex: &Path,
        fragment: &Path,
    ) -> Result<Self, ShaderError> {
        let vert = Shader::from_file(gl, glow::VERTEX_SHADER, vertex)?;
        let frag = Shader::from_file(gl, glow::FRAGMENT_SHADER, fragment)?;
        log::debug!("linking {} + {}", vertex.display(), fragment.display());
        Self::new(gl, &[&vert, &frag])
    }

    /// Binds the shader program for use.
    pub fn use_program(&self) {
        unsafe {
            self.gl.use_program(Some(self.id));
        }
    }

    /// Sets a uniform variable in the shader program.
    pub fn set_uniform<T: Uniform>(&self, name: &str, value: T) {
        value.set_uniform(&self.gl, self.id, name);
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_program(self.id);
        }
    }
}
