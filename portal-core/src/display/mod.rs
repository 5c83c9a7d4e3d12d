//! The display capability a [`Window`](crate::gui::Window) renders through.
//!
//! Windowing libraries keep process-wide state, so the core never calls one directly. A
//! backend implements [`Display`] and is handed to the window instead.

use glam::{Mat4, Vec3, Vec4};

use crate::{config::WindowSettings, error::Result};

pub mod headless;

pub use headless::*;

/// The color a frame is cleared to.
pub const BACKGROUND: Vec4 = Vec4::new(0.0, 0.0, 0.0, 1.0);

const NEAR_PLANE: f32 = 0.01;
const FAR_PLANE: f32 = 1000.0;

/// How a [`Camera3D`] projects the scene.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Projection {
    Perspective,
    #[default]
    Orthographic,
}

/// A camera looking at the scene in 3D mode.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera3D {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Field of view in degrees for perspective cameras, view height in world units for
    /// orthographic ones.
    pub fovy: f32,
    pub projection: Projection,
}

impl Default for Camera3D {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, -5.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fovy: 60.0,
            projection: Projection::Orthographic,
        }
    }
}

impl Camera3D {
    /// Returns the view matrix of the camera.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Returns the projection matrix of the camera for a viewport with the given aspect ratio.
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        match self.projection {
            Projection::Perspective => {
                Mat4::perspective_rh_gl(self.fovy.to_radians(), aspect, NEAR_PLANE, FAR_PLANE)
            }
            Projection::Orthographic => {
                let top = self.fovy / 2.0;
                let right = top * aspect;
                Mat4::orthographic_rh_gl(-right, right, -top, top, NEAR_PLANE, FAR_PLANE)
            }
        }
    }

    /// Returns the projection matrix times the view matrix for a `width` x `height` viewport.
    pub fn view_projection(&self, width: u32, height: u32) -> Mat4 {
        let aspect = width as f32 / height.max(1) as f32;
        self.projection_matrix(aspect) * self.view_matrix()
    }
}

/// A surface frames are drawn to.
pub trait Display {
    /// Creates the surface described by `settings`.
    fn create(settings: &WindowSettings) -> Result<Self>
    where
        Self: Sized;

    /// Current width of the surface in pixels.
    fn width(&self) -> u32;

    /// Current height of the surface in pixels.
    fn height(&self) -> u32;

    fn title(&self) -> &str;

    /// Whether the user (or the system) asked for the surface to close.
    fn should_close(&mut self) -> bool;

    fn begin_frame(&mut self) -> Result<()>;

    /// Presents the frame.
    fn end_frame(&mut self) -> Result<()>;

    fn begin_mode_3d(&mut self, camera: &Camera3D);

    fn end_mode_3d(&mut self);

    fn clear(&mut self, color: Vec4);

    /// Releases the surface. Calling this more than once does nothing.
    fn close(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_camera() {
        let camera = Camera3D::default();
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, -5.0));
        assert_eq!(camera.target, Vec3::ZERO);
        assert_eq!(camera.up, Vec3::Y);
        assert_eq!(camera.fovy, 60.0);
        assert_eq!(camera.projection, Projection::Orthographic);
    }

    #[test]
    fn test_view_matrix_moves_target_in_front() {
        let camera = Camera3D::default();
        let target = camera.view_matrix().transform_point3(camera.target);
        assert!((target - Vec3::new(0.0, 0.0, -5.0)).length() < 1e-5);
    }

    #[test]
    fn test_orthographic_uses_fovy_as_height() {
        let camera = Camera3D::default();
        let projection = camera.projection_matrix(2.0);
        let corner = projection.project_point3(Vec3::new(60.0, 30.0, -1.0));
        assert!((corner.x - 1.0).abs() < 1e-5);
        assert!((corner.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_perspective_projection() {
        let camera = Camera3D {
            projection: Projection::Perspective,
            fovy: 90.0,
            ..Default::default()
        };
        let projection = camera.projection_matrix(1.0);
        let edge = projection.project_point3(Vec3::new(0.0, 1.0, -1.0));
        assert!((edge.y - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_view_projection_combines_both_matrices() {
        let camera = Camera3D::default();
        let expected = camera.projection_matrix(2.0) * camera.view_matrix();
        assert!(camera.view_projection(200, 100).abs_diff_eq(expected, 1e-6));

        // The target sits in the middle of the viewport.
        let center = camera.view_projection(200, 100).project_point3(camera.target);
        assert!(center.x.abs() < 1e-5 && center.y.abs() < 1e-5);

        // A zero height viewport must not produce NaNs.
        assert!(!camera.view_projection(200, 0).is_nan());
    }
}
