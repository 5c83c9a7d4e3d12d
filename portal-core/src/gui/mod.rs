//! The GUI component tree and the window that drives it.
//!
//! A [`Window`] owns a root [`Container`] (its menu). Containers keep their children in a
//! [`ComponentTable`] keyed by component id and forward every tick and draw to them.

use std::{any::Any, time::Duration};

use crate::{
    display::Display,
    error::{PortalError, Result},
};

pub mod container;
pub mod counter;
pub mod table;
pub mod window;

pub use container::*;
pub use counter::*;
pub use table::*;
pub use window::*;

/// Ids starting with this prefix are reserved and rejected by containers.
pub const RESERVED_ID_PREFIX: &str = "__";

/// A unit of the GUI that is ticked and drawn every frame.
pub trait Component {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// The id the component is stored under in its container.
    fn id(&self) -> &str;

    /// Updates the component. `delta` is the time since the clock was started.
    fn tick(&mut self, _delta: Duration) {}

    /// Draws the component.
    fn draw(&self, _display: &mut dyn Display) {}
}

/// Checks that `id` can be used as a key in a [`ComponentTable`].
pub fn validate_id(id: &str) -> Result<()> {
    let reason = if id.is_empty() {
        "id must not be empty"
    } else if id.starts_with(RESERVED_ID_PREFIX) {
        "ids starting with \"__\" are reserved"
    } else if id.chars().any(|c| c.is_whitespace() || c.is_control()) {
        "id must not contain whitespace or control characters"
    } else {
        return Ok(());
    };

    Err(PortalError::InvalidComponent {
        id: id.to_owned(),
        reason,
    })
}
