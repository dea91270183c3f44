//! Introductory OpenGL programs and the small amount of plumbing they share.
//!
//! Each binary under `src/bin` opens a window, builds a shader program,
//! uploads a fixed shape and renders it until the window is closed or escape
//! is pressed.

pub mod abs;
pub mod config;
pub mod error;
pub mod geometry;
pub mod logging;

pub use error::{Error, Result};

/// Exit status reported for any failure before or during setup.
pub const FAILURE_EXIT_CODE: i32 = -1;

/// Shared `main` body: loads configuration, installs logging and runs
/// `program`, exiting with [`FAILURE_EXIT_CODE`] if anything fails.
pub fn launch<F>(program: F)
where
    F: FnOnce(&config::Config) -> Result<()>,
{
    let config = match config::Config::load() {
        Ok(config) => config,
        Err(e) => {
            logging::init_logging("info");
            log::error!("{e}");
            std::process::exit(FAILURE_EXIT_CODE);
        }
    };
    logging::init_logging(&config.log_level);

    if let Err(e) = program(&config) {
        log::error!("{e}");
        std::process::exit(FAILURE_EXIT_CODE);
    }
}

/// Builds a [`abs::ShaderProgram`] from the `vert.glsl`/`frag.glsl` pair
/// embedded from `src/shaders/<name>/`.
#[macro_export]
macro_rules! shader_program {
    ($gl:expr, $name:ident) => {
        $crate::abs::ShaderProgram::from_sources(
            &$gl,
            include_str!(concat!(
                env!("CARGO_MANIFEST_DIR"),
                "/src/shaders/",
                stringify!($name),
                "/vert.glsl"
            )),
            include_str!(concat!(
                env!("CARGO_MANIFEST_DIR"),
                "/src/shaders/",
                stringify!($name),
                "/frag.glsl"
            )),
        )
    };
}
