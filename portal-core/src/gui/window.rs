//! The window of an [`Application`](crate::app::Application).

use std::time::Duration;

use crate::{
    config::WindowSettings,
    display::{BACKGROUND, Camera3D, Display},
    error::Result,
    time::{Clock, RealTime, Tick, TimeSource},
};

use super::{Component, Container};

/// The lifecycle of a [`Window`]. `Closed` is terminal.
///
/// `Closing` only lasts while [`Window::draw`] tears the window down, so callers see a
/// window go straight from `Open` to `Closed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowPhase {
    Constructed,
    Open,
    Closing,
    Closed,
}

/// A window that ticks and draws its menu at a fixed rate.
///
/// Every firing of the clock runs [`Window::tick`] and then [`Window::draw`]; the next firing
/// is only looked at once both have returned.
pub struct Window<D: Display, T: TimeSource = RealTime> {
    display: D,
    camera: Camera3D,
    clock: Clock<T>,
    menu: Option<Container>,
    settings: WindowSettings,
    phase: WindowPhase,
}

impl<D: Display> Window<D> {
    /// Creates the display described by `settings` and a window around it.
    pub fn new(settings: WindowSettings) -> Result<Self> {
        let display = D::create(&settings)?;
        Ok(Self::with_display(display, settings))
    }

    /// Creates a window around an existing display.
    pub fn with_display(display: D, settings: WindowSettings) -> Self {
        Self::with_time_source(display, settings, RealTime)
    }
}

impl<D: Display, T: TimeSource> Window<D, T> {
    /// Creates a window around an existing display whose clock reads time from `source`.
    pub fn with_time_source(display: D, settings: WindowSettings, source: T) -> Self {
        Self {
            display,
            camera: Camera3D::default(),
            clock: Clock::with_source(source),
            menu: None,
            settings,
            phase: WindowPhase::Constructed,
        }
    }

    /// Opens the window and starts its clock.
    pub fn open(&mut self) {
        if self.phase == WindowPhase::Closed {
            log::warn!("Window {:?} is closed and cannot be opened again", self.title());
            return;
        }

        let title = self.display.title().to_owned();
        self.clock.start(self.settings.tick_rate, move || {
            log::trace!("Window {:?} ticked", title);
        });
        self.phase = WindowPhase::Open;

        log::info!(
            "Window {:?} opened at {}x{}, {} ticks/s",
            self.display.title(),
            self.display.width(),
            self.display.height(),
            self.settings.tick_rate
        );
    }

    /// Updates the window. Ticks the menu, if there is one.
    pub fn tick(&mut self, delta: Duration) {
        if let Some(menu) = &mut self.menu {
            menu.tick(delta);
        }
    }

    /// Draws a frame, or closes the window if the display asked for it.
    pub fn draw(&mut self) -> Result<()> {
        if self.phase == WindowPhase::Closed {
            return Ok(());
        }

        if self.display.should_close() {
            self.close();
            return Ok(());
        }

        self.display.begin_frame()?;
        self.display.begin_mode_3d(&self.camera);
        self.display.clear(BACKGROUND);

        if let Some(menu) = &self.menu {
            menu.draw(&mut self.display);
        }

        self.display.end_mode_3d();
        self.display.end_frame()
    }

    fn close(&mut self) {
        self.phase = WindowPhase::Closing;
        self.clock.stop();
        self.display.close();
        self.phase = WindowPhase::Closed;

        log::info!(
            "Window {:?} closed after {} ticks",
            self.settings.title,
            self.clock.ticks()
        );
    }

    fn run_tick(&mut self, tick: Tick) -> Result<()> {
        self.tick(tick.delta);
        self.draw()
    }

    /// Waits for the next firing of the clock and runs it. Returns whether the window is
    /// still open afterwards.
    pub fn step(&mut self) -> Result<bool> {
        if self.phase != WindowPhase::Open {
            return Ok(false);
        }
        let Some(tick) = self.clock.wait() else {
            return Ok(false);
        };
        self.run_tick(tick)?;
        Ok(self.phase == WindowPhase::Open)
    }

    /// Runs every firing that is due without waiting. Returns how many were run.
    pub fn run_pending(&mut self) -> Result<usize> {
        let mut count = 0;
        while self.phase == WindowPhase::Open {
            let Some(tick) = self.clock.poll() else {
                break;
            };
            self.run_tick(tick)?;
            count += 1;
        }
        Ok(count)
    }

    /// Whether the window is open and the display has not asked to close.
    pub fn is_open(&mut self) -> bool {
        self.phase == WindowPhase::Open && !self.display.should_close()
    }

    pub fn phase(&self) -> WindowPhase {
        self.phase
    }

    pub fn width(&self) -> u32 {
        self.display.width()
    }

    pub fn height(&self) -> u32 {
        self.display.height()
    }

    pub fn title(&self) -> &str {
        self.display.title()
    }

    pub fn camera(&self) -> &Camera3D {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera3D {
        &mut self.camera
    }

    /// The container that is currently shown.
    pub fn menu(&self) -> Option<&Container> {
        self.menu.as_ref()
    }

    pub fn menu_mut(&mut self) -> Option<&mut Container> {
        self.menu.as_mut()
    }

    /// Shows `menu`, returning the one that was shown before.
    pub fn set_menu(&mut self, menu: Container) -> Option<Container> {
        self.menu.replace(menu)
    }

    pub fn take_menu(&mut self) -> Option<Container> {
        self.menu.take()
    }

    pub fn clock(&self) -> &Clock<T> {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut Clock<T> {
        &mut self.clock
    }

    pub fn settings(&self) -> &WindowSettings {
        &self.settings
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }
}
