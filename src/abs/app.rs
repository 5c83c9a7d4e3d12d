//! SDL2 and OpenGL application management.
//!
//! This module defines the [`App`] struct which encapsulates the SDL2 and OpenGL context
//! necessary for a windowed application, and implements [`Display`] on top of it.

use std::sync::Arc;

use glam::{Mat4, Vec4};
use glow::HasContext;
use portal_core::{Camera3D, Display, PortalError, WindowSettings};

/// The [`App`] struct encapsulates the SDL2 and OpenGL context.
pub struct App {
    _sdl: sdl2::Sdl,
    _video_subsystem: sdl2::VideoSubsystem,
    window: Option<sdl2::video::Window>,
    gl_context: Option<sdl2::video::GLContext>,
    gl: Arc<glow::Context>,
    event_pump: sdl2::EventPump,
    title: String,
    quit_requested: bool,
    view_projection: Mat4,
}

impl App {
    /// Creates a new [`App`] instance with the specified title, width, and height.
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, String> {
        let sdl = sdl2::init()?;
        let video_subsystem = sdl.video()?;
        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(sdl2::video::GLProfile::Core);
        gl_attr.set_context_version(3, 3);
        let window = video_subsystem
            .window(title, width, height)
            .opengl()
            .resizable()
            .build()
            .map_err(|e| e.to_string())?;
        let gl_context = window.gl_create_context()?;
        window.gl_make_current(&gl_context)?;
        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                video_subsystem.gl_get_proc_address(s) as *const _
            })
        };
        let event_pump = sdl.event_pump()?;
        let gl = Arc::new(gl);

        unsafe {
            gl.viewport(0, 0, width as i32, height as i32);
        }

        Ok(Self {
            _sdl: sdl,
            _video_subsystem: video_subsystem,
            window: Some(window),
            gl_context: Some(gl_context),
            gl,
            event_pump,
            title: title.to_owned(),
            quit_requested: false,
            view_projection: Mat4::IDENTITY,
        })
    }

    fn window(&self) -> portal_core::Result<&sdl2::video::Window> {
        self.window
            .as_ref()
            .ok_or_else(|| PortalError::Display("window is closed".to_string()))
    }
}

impl Display for App {
    fn create(settings: &WindowSettings) -> portal_core::Result<Self> {
        Self::new(&settings.title, settings.width, settings.height).map_err(PortalError::Display)
    }

    fn width(&self) -> u32 {
        self.window.as_ref().map_or(0, |window| window.size().0)
    }

    fn height(&self) -> u32 {
        self.window.as_ref().map_or(0, |window| window.size().1)
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn should_close(&mut self) -> bool {
        for event in self.event_pump.poll_iter() {
            match event {
                sdl2::event::Event::Quit { .. } => self.quit_requested = true,
                sdl2::event::Event::Window {
                    win_event: sdl2::event::WindowEvent::Resized(width, height),
                    ..
                } => unsafe {
                    self.gl.viewport(0, 0, width, height);
                },
                _ => {}
            }
        }
        self.quit_requested || self.window.is_none()
    }

    fn begin_frame(&mut self) -> portal_core::Result<()> {
        self.window()?;
        Ok(())
    }

    fn end_frame(&mut self) -> portal_core::Result<()> {
        self.window()?.gl_swap_window();
        Ok(())
    }

    fn begin_mode_3d(&mut self, camera: &Camera3D) {
        self.view_projection = camera.view_projection(self.width(), self.height());
        log::trace!(
            "3D mode from {} looking at {} ({:?}): {}",
            camera.position,
            camera.target,
            camera.projection,
            self.view_projection
        );
        unsafe {
            self.gl.enable(glow::DEPTH_TEST);
        }
    }

    fn end_mode_3d(&mut self) {
        self.view_projection = Mat4::IDENTITY;
        unsafe {
            self.gl.disable(glow::DEPTH_TEST);
        }
    }

    fn clear(&mut self, color: Vec4) {
        unsafe {
            self.gl.clear_color(color.x, color.y, color.z, color.w);
            self.gl
                .clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }
    }

    fn close(&mut self) {
        self.gl_context.take();
        if self.window.take().is_some() {
            log::info!("SDL window {:?} destroyed", self.title);
        }
    }
}
