//! The core of the Portal application shell. This crate contains the fixed-rate tick
//! scheduling, the GUI component tree it drives every frame and the window and application
//! types that tie both to a display backend.
//!
//! Nothing in here talks to a windowing library directly. Backends implement the
//! [`display::Display`] trait; [`display::HeadlessDisplay`] is the in-memory one.

pub mod app;
pub mod config;
pub mod display;
pub mod error;
pub mod gui;
pub mod time;

#[cfg(test)]
pub(crate) mod testing;

pub use app::Application;
pub use config::{Settings, WindowSettings};
pub use display::{Camera3D, Display, HeadlessDisplay, Projection};
pub use error::{PortalError, Result};
pub use gui::{Component, ComponentTable, Container, Window, WindowPhase};
pub use time::{Clock, RealTime, Tick, TickRate, TimeSource};
