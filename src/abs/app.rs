//! SDL2 and OpenGL application management.
//!
//! This module defines the [`App`] struct which owns the window, the GL
//! context bound to the calling thread, and the render loop that drives a
//! program until its close flag is set.

use std::sync::Arc;

use glam::Vec4;
use glow::HasContext;
use sdl2::event::Event;
use sdl2::keyboard::Scancode;

use crate::abs::input::{CloseFlag, FrameSurface, ResizeSubscribers, drive_frames};
use crate::config::WindowConfig;
use crate::error::BootstrapError;

/// Background color every program clears to.
pub const CLEAR_COLOR: Vec4 = Vec4::new(0.2, 0.3, 0.3, 1.0);

/// The [`App`] struct encapsulates the SDL2 and OpenGL context.
pub struct App {
    pub sdl: sdl2::Sdl,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub window: sdl2::video::Window,
    pub gl_context: sdl2::video::GLContext,
    pub gl: Arc<glow::Context>,
    pub event_pump: sdl2::EventPump,
    close: CloseFlag,
    resize: ResizeSubscribers,
}

impl App {
    /// Creates the window, makes a core-profile context of the requested
    /// version current and loads the GL function table through SDL.
    pub fn new(config: &WindowConfig) -> Result<Self, BootstrapError> {
        let sdl = sdl2::init().map_err(BootstrapError::Sdl)?;
        let video_subsystem = sdl.video().map_err(BootstrapError::Video)?;

        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(sdl2::video::GLProfile::Core);
        gl_attr.set_context_version(config.gl_major, config.gl_minor);

        let window = video_subsystem
            .window(&config.title, config.width, config.height)
            .opengl()
            .resizable()
            .build()?;

        let context_error = |reason: String| BootstrapError::Context {
            major: config.gl_major,
            minor: config.gl_minor,
            reason,
        };
        let gl_context = window.gl_create_context().map_err(context_error)?;
        window.gl_make_current(&gl_context).map_err(context_error)?;

        if video_subsystem.gl_get_proc_address("glGetString").is_null() {
            return Err(BootstrapError::Loader("glGetString"));
        }
        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                video_subsystem.gl_get_proc_address(s) as *const _
            })
        };
        let gl = Arc::new(gl);

        let interval = if config.vsync {
            sdl2::video::SwapInterval::VSync
        } else {
            sdl2::video::SwapInterval::Immediate
        };
        if let Err(e) = video_subsystem.gl_set_swap_interval(interval) {
            log::warn!("could not set swap interval: {e}");
        }

        let event_pump = sdl.event_pump().map_err(BootstrapError::EventPump)?;

        unsafe {
            log::info!(
                "created {}x{} window, GL {}",
                config.width,
                config.height,
                gl.get_parameter_string(glow::VERSION)
            );
            gl.viewport(0, 0, config.width as i32, config.height as i32);
        }

        let mut resize = ResizeSubscribers::default();
        let viewport_gl = Arc::clone(&gl);
        resize.subscribe(move |width, height| unsafe {
            viewport_gl.viewport(0, 0, width as i32, height as i32);
        });

        Ok(Self {
            sdl,
            video_subsystem,
            window,
            gl_context,
            gl,
            event_pump,
            close: CloseFlag::default(),
            resize,
        })
    }

    /// Registers a handler called with the drawable size in pixels whenever
    /// the window is resized. The viewport handler is always registered first.
    pub fn on_resize<F>(&mut self, handler: F)
    where
        F: FnMut(u32, u32) + 'static,
    {
        self.resize.subscribe(handler);
    }

    /// Runs the render loop until the close flag is set and returns the
    /// number of frames presented.
    ///
    /// Each frame handles input, clears to [`CLEAR_COLOR`], calls `draw`,
    /// processes window events and swaps buffers.
    pub fn run<F>(&mut self, mut draw: F) -> u64
    where
        F: FnMut(&glow::Context),
    {
        let frames = drive_frames(self, |app| draw(&*app.gl));
        log::debug!("render loop closed after {frames} frames");
        frames
    }
}

impl FrameSurface for App {
    fn close_flag(&mut self) -> &mut CloseFlag {
        &mut self.close
    }

    fn escape_down(&self) -> bool {
        self.event_pump
            .keyboard_state()
            .is_scancode_pressed(Scancode::Escape)
    }

    fn clear(&self) {
        unsafe {
            self.gl.clear_color(CLEAR_COLOR.x, CLEAR_COLOR.y, CLEAR_COLOR.z, CLEAR_COLOR.w);
            self.gl.clear(glow::COLOR_BUFFER_BIT);
        }
    }

    fn pending_events(&mut self) -> Vec<Event> {
        self.event_pump.poll_iter().collect()
    }

    /// Forwards the drawable size in pixels, which differs from the window
    /// size on high-DPI displays.
    fn resized(&mut self) {
        let (width, height) = self.window.drawable_size();
        log::debug!("drawable resized to {width}x{height}");
        self.resize.emit(width, height);
    }

    fn present(&mut self) {
        self.window.gl_swap_window();
    }
}
