//! The application owning the one [`Window`].

use crate::{
    config::WindowSettings,
    display::Display,
    error::Result,
    gui::Window,
    time::{RealTime, TimeSource},
};

/// An application with exactly one window.
pub struct Application<D: Display, T: TimeSource = RealTime> {
    window: Window<D, T>,
}

impl<D: Display> Application<D> {
    /// Creates the application and its window.
    pub fn new(settings: WindowSettings) -> Result<Self> {
        Ok(Self {
            window: Window::new(settings)?,
        })
    }
}

impl<D: Display, T: TimeSource> Application<D, T> {
    /// Creates an application around an existing window.
    pub fn with_window(window: Window<D, T>) -> Self {
        Self { window }
    }

    pub fn window(&self) -> &Window<D, T> {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut Window<D, T> {
        &mut self.window
    }

    /// Opens the window. The window keeps ticking through [`Application::run`] or
    /// [`Window::step`]; this returns as soon as it is open.
    pub fn start(&mut self) {
        self.window.open();
    }

    /// Starts the application and runs it until the window closes. Returns the number of
    /// frames that were run.
    pub fn run(&mut self) -> u64 {
        self.run_frames(None)
    }

    /// Starts the application and runs it until the window closes or `limit` frames have
    /// been run. A frame that fails is logged and the loop carries on.
    pub fn run_frames(&mut self, limit: Option<u64>) -> u64 {
        self.start();

        let mut frames = 0;
        while limit.is_none_or(|limit| frames < limit) {
            match self.window.step() {
                Ok(true) => frames += 1,
                Ok(false) => break,
                Err(e) => {
                    frames += 1;
                    log::warn!("Frame {} failed: {}", frames, e);
                }
            }
        }

        log::info!("Application stopped after {} frames", frames);
        frames
    }
}
