//! A display that renders nothing and remembers every call made to it.

use glam::{Mat4, Vec4};

use crate::{
    config::WindowSettings,
    display::{Camera3D, Display},
    error::{PortalError, Result},
};

/// A single call made to a [`HeadlessDisplay`].
#[derive(Clone, Debug, PartialEq)]
pub enum DisplayCall {
    BeginFrame,
    EndFrame,
    BeginMode3D(Camera3D),
    EndMode3D,
    Clear(Vec4),
    Close,
}

/// An in-memory [`Display`], used for headless runs and tests.
#[derive(Debug)]
pub struct HeadlessDisplay {
    width: u32,
    height: u32,
    title: String,
    calls: Vec<DisplayCall>,
    frames: u64,
    view_projection: Option<Mat4>,
    close_after: Option<u64>,
    close_requested: bool,
    fail_next_frame: bool,
    closed: bool,
}

impl HeadlessDisplay {
    pub fn new(width: u32, height: u32, title: &str) -> Self {
        Self {
            width,
            height,
            title: title.to_owned(),
            calls: Vec::new(),
            frames: 0,
            view_projection: None,
            close_after: None,
            close_requested: false,
            fail_next_frame: false,
            closed: false,
        }
    }

    /// Makes the display ask to close once `frames` frames have been presented.
    pub fn close_after(mut self, frames: u64) -> Self {
        self.close_after = Some(frames);
        self
    }

    /// Asks the display to close, as if the user had clicked the close button.
    pub fn request_close(&mut self) {
        self.close_requested = true;
    }

    /// Makes the next [`Display::begin_frame`] fail.
    pub fn fail_next_frame(&mut self) {
        self.fail_next_frame = true;
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Every call recorded so far.
    pub fn calls(&self) -> &[DisplayCall] {
        &self.calls
    }

    /// Returns and forgets every call recorded so far.
    pub fn take_calls(&mut self) -> Vec<DisplayCall> {
        std::mem::take(&mut self.calls)
    }

    /// Number of frames presented.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// The camera matrix set by the last [`Display::begin_mode_3d`], until 3D mode ends.
    pub fn view_projection(&self) -> Option<Mat4> {
        self.view_projection
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Display for HeadlessDisplay {
    fn create(settings: &WindowSettings) -> Result<Self> {
        Ok(Self::new(settings.width, settings.height, &settings.title))
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn should_close(&mut self) -> bool {
        self.closed
            || self.close_requested
            || self.close_after.is_some_and(|frames| self.frames >= frames)
    }

    fn begin_frame(&mut self) -> Result<()> {
        if self.closed {
            return Err(PortalError::Display("display is closed".to_string()));
        }
        if std::mem::take(&mut self.fail_next_frame) {
            return Err(PortalError::Display("frame could not be started".to_string()));
        }
        self.calls.push(DisplayCall::BeginFrame);
        Ok(())
    }

    fn end_frame(&mut self) -> Result<()> {
        self.calls.push(DisplayCall::EndFrame);
        self.frames += 1;
        Ok(())
    }

    fn begin_mode_3d(&mut self, camera: &Camera3D) {
        self.view_projection = Some(camera.view_projection(self.width, self.height));
        self.calls.push(DisplayCall::BeginMode3D(*camera));
    }

    fn end_mode_3d(&mut self) {
        self.view_projection = None;
        self.calls.push(DisplayCall::EndMode3D);
    }

    fn clear(&mut self, color: Vec4) {
        self.calls.push(DisplayCall::Clear(color));
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.calls.push(DisplayCall::Close);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_from_settings() {
        let display = HeadlessDisplay::create(&WindowSettings::default()).unwrap();
        assert_eq!(display.width(), 640);
        assert_eq!(display.height(), 480);
        assert_eq!(display.title(), "Portal");
    }

    #[test]
    fn test_close_after_frames() {
        let mut display = HeadlessDisplay::new(10, 10, "test").close_after(2);
        for _ in 0..2 {
            assert!(!display.should_close());
            display.begin_frame().unwrap();
            display.end_frame().unwrap();
        }
        assert!(display.should_close());
    }

    #[test]
    fn test_failed_frame_only_once() {
        let mut display = HeadlessDisplay::new(10, 10, "test");
        display.fail_next_frame();
        assert!(display.begin_frame().is_err());
        assert!(display.begin_frame().is_ok());
        assert_eq!(display.calls(), &[DisplayCall::BeginFrame]);
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut display = HeadlessDisplay::new(10, 10, "test");
        display.close();
        display.close();
        assert!(display.should_close());
        assert!(display.begin_frame().is_err());
        assert_eq!(display.take_calls(), vec![DisplayCall::Close]);
        assert!(display.calls().is_empty());
    }

    #[test]
    fn test_mode_3d_uses_camera_matrix() {
        let mut display = HeadlessDisplay::new(200, 100, "test");
        let camera = Camera3D::default();
        assert!(display.view_projection().is_none());

        display.begin_mode_3d(&camera);
        assert_eq!(display.view_projection(), Some(camera.view_projection(200, 100)));

        display.end_mode_3d();
        assert!(display.view_projection().is_none());
    }
}
