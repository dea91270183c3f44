//! Error types.
//!
//! Each stage of a program has its own error enum; [`Error`] wraps them so a
//! binary's `main` can propagate everything with `?` and report it once.

use std::path::PathBuf;

/// Failures while bringing up the window and the GL context.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("failed to initialize SDL: {0}")]
    Sdl(String),
    #[error("failed to initialize the video subsystem: {0}")]
    Video(String),
    #[error("failed to create window: {0}")]
    Window(#[from] sdl2::video::WindowBuildError),
    #[error("failed to create GL {major}.{minor} core context: {reason}")]
    Context { major: u8, minor: u8, reason: String },
    #[error("failed to resolve GL entry point `{0}`")]
    Loader(&'static str),
    #[error("failed to acquire the event pump: {0}")]
    EventPump(String),
}

/// Failures while compiling or linking a shader program.
#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("failed to create GL object: {0}")]
    Create(String),
    #[error("{stage} shader compilation failed\n{log}")]
    Compile { stage: &'static str, log: String },
    #[error("shader program link failed\n{log}")]
    Link { log: String },
    #[error("failed to read shader source {}: {source}", .path.display())]
    Source {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failures while locating or decoding an asset on disk.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("asset root {} does not exist", .0.display())]
    MissingRoot(PathBuf),
    #[error("asset {} does not exist", .path.display())]
    Missing { path: PathBuf },
    #[error("failed to read asset {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to load texture from path {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Failures while reading the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Bootstrap(#[from] BootstrapError),
    #[error(transparent)]
    Shader(#[from] ShaderError),
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to create GL object: {0}")]
    Gl(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
