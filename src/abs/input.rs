//! Close flag, loop state, window event translation and the frame loop.
//!
//! Kept free of any live SDL or GL handle so the render loop's state machine
//! can be exercised without a display.

use sdl2::event::{Event, WindowEvent};

/// The two states of a program's render loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Closed,
}

/// The window's "should close" flag. Starts cleared and is never cleared
/// again once set.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CloseFlag(bool);

impl CloseFlag {
    pub fn is_set(&self) -> bool {
        self.0
    }

    pub fn set(&mut self) {
        self.0 = true;
    }

    /// Per-frame keyboard check. Holding escape re-asserts the flag.
    pub fn apply_escape(&mut self, escape_down: bool) {
        if escape_down {
            self.set();
        }
    }

    pub fn state(&self) -> LoopState {
        if self.0 {
            LoopState::Closed
        } else {
            LoopState::Running
        }
    }
}

/// The window events a program reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowSignal {
    CloseRequested,
    Resized,
}

/// Maps an SDL event onto a [`WindowSignal`], ignoring everything else.
pub fn translate(event: &Event) -> Option<WindowSignal> {
    match event {
        Event::Quit { .. } => Some(WindowSignal::CloseRequested),
        Event::Window { win_event, .. } => match win_event {
            WindowEvent::Close => Some(WindowSignal::CloseRequested),
            WindowEvent::SizeChanged(..) => Some(WindowSignal::Resized),
            _ => None,
        },
        _ => None,
    }
}

/// Applies a batch of pending events to the close flag. Returns whether any
/// of them resized the window.
pub fn apply_events<'a, I>(flag: &mut CloseFlag, events: I) -> bool
where
    I: IntoIterator<Item = &'a Event>,
{
    let mut resized = false;
    for event in events {
        match translate(event) {
            Some(WindowSignal::CloseRequested) => flag.set(),
            Some(WindowSignal::Resized) => resized = true,
            None => {}
        }
    }
    resized
}

/// A window the frame loop can drive.
pub trait FrameSurface {
    fn close_flag(&mut self) -> &mut CloseFlag;
    fn escape_down(&self) -> bool;
    fn clear(&self);
    /// Drains the window system's event queue.
    fn pending_events(&mut self) -> Vec<Event>;
    fn resized(&mut self);
    fn present(&mut self);
}

/// Runs frames until the close flag is set and returns how many were
/// presented.
///
/// Each frame: escape check, clear, `draw`, event processing, present.
pub fn drive_frames<S, F>(surface: &mut S, mut draw: F) -> u64
where
    S: FrameSurface,
    F: FnMut(&S),
{
    let mut frames = 0;
    while surface.close_flag().state() == LoopState::Running {
        let escape_down = surface.escape_down();
        surface.close_flag().apply_escape(escape_down);

        surface.clear();
        draw(&*surface);

        let events = surface.pending_events();
        if apply_events(surface.close_flag(), &events) {
            surface.resized();
        }
        surface.present();
        frames += 1;
    }
    frames
}

type ResizeHandler = Box<dyn FnMut(u32, u32)>;

/// Handlers called with the new drawable size, in registration order.
#[derive(Default)]
pub struct ResizeSubscribers {
    handlers: Vec<ResizeHandler>,
}

impl ResizeSubscribers {
    pub fn subscribe<F>(&mut self, handler: F)
    where
        F: FnMut(u32, u32) + 'static,
    {
        self.handlers.push(Box::new(handler));
    }

    pub fn emit(&mut self, width: u32, height: u32) {
        for handler in &mut self.handlers {
            handler(width, height);
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
