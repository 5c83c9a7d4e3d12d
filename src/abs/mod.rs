//! This module contains the SDL2 and OpenGL backend the window renders through.

pub mod app;

pub use app::*;
