//! A component that holds other components.

use std::{any::Any, time::Duration};

use crate::{display::Display, error::Result};

use super::{Component, ComponentTable, validate_id};

/// A component holding child components, keyed by id. Ticking or drawing a container ticks
/// or draws every child in the order they were added.
pub struct Container {
    id: String,
    components: ComponentTable,
}

impl Container {
    /// Creates an empty container.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            components: ComponentTable::new(),
        }
    }

    /// The table the children are stored in.
    pub fn components(&self) -> &ComponentTable {
        &self.components
    }

    /// Adds a component, replacing any child with the same id.
    pub fn add_component<T: Component + 'static>(&mut self, component: T) -> Result<()> {
        self.add_components([Box::new(component) as Box<dyn Component>])
    }

    /// Adds several components. `None` items are skipped. If any component has an invalid
    /// id nothing is added at all.
    pub fn add_components<I>(&mut self, components: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Option<Box<dyn Component>>>,
    {
        let components: Vec<Box<dyn Component>> =
            components.into_iter().filter_map(Into::into).collect();

        for component in &components {
            validate_id(component.id())?;
        }

        for component in components {
            if let Some(replaced) = self.components.set_component(component) {
                log::debug!("{}: replaced component {:?}", self.id, replaced.id());
            }
        }
        Ok(())
    }

    /// Removes the child with the given id and returns it. Fails on ids no child could have.
    pub fn remove_component(&mut self, id: &str) -> Result<Option<Box<dyn Component>>> {
        validate_id(id)?;
        Ok(self.components.remove_component(id))
    }

    /// Removes several children by id. `None` items are skipped. If any id is invalid nothing
    /// is removed at all. Returns the removed children.
    pub fn remove_components<'a, I>(&mut self, ids: I) -> Result<Vec<Box<dyn Component>>>
    where
        I: IntoIterator,
        I::Item: Into<Option<&'a str>>,
    {
        let ids: Vec<&str> = ids.into_iter().filter_map(Into::into).collect();

        for id in &ids {
            validate_id(id)?;
        }

        Ok(ids
            .into_iter()
            .filter_map(|id| self.components.remove_component(id))
            .collect())
    }

    pub fn get_component_by_id(&self, id: &str) -> Option<&dyn Component> {
        self.components.get_component(id)
    }

    pub fn get_component_by_id_mut(&mut self, id: &str) -> Option<&mut dyn Component> {
        self.components.get_component_mut(id)
    }

    /// Gets a child of type `T` by id.
    pub fn get<T: Component + 'static>(&self, id: &str) -> Option<&T> {
        self.get_component_by_id(id)?.as_any().downcast_ref::<T>()
    }

    /// Gets a child of type `T` by id as mutable.
    pub fn get_mut<T: Component + 'static>(&mut self, id: &str) -> Option<&mut T> {
        self.get_component_by_id_mut(id)?
            .as_any_mut()
            .downcast_mut::<T>()
    }

    /// Traverses through nested containers by id to find a component of type `T`.
    pub fn find<T: Component + 'static>(&self, path: &[&str]) -> Option<&T> {
        let (last, parents) = path.split_last()?;
        let mut container = self;
        for id in parents {
            container = container.get::<Container>(id)?;
        }
        container.get::<T>(last)
    }

    /// Traverses through nested containers by id to find a component of type `T` and returns
    /// a mutable reference.
    pub fn find_mut<T: Component + 'static>(&mut self, path: &[&str]) -> Option<&mut T> {
        let (last, parents) = path.split_last()?;
        let mut container = self;
        for id in parents {
            container = container.get_mut::<Container>(id)?;
        }
        container.get_mut::<T>(last)
    }
}

impl Component for Container {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn tick(&mut self, delta: Duration) {
        for component in self.components.values_mut() {
            component.tick(delta);
        }
    }

    fn draw(&self, display: &mut dyn Display) {
        for component in self.components.values() {
            component.draw(display);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        display::HeadlessDisplay,
        error::PortalError,
        gui::TickCounter,
    };

    fn boxed(id: &str) -> Box<dyn Component> {
        Box::new(TickCounter::new(id))
    }

    #[test]
    fn test_none_items_are_skipped() {
        let mut container = Container::new("menu");
        let nothing: [Option<Box<dyn Component>>; 2] = [None, None];
        container.add_components(nothing).unwrap();
        assert!(container.components().is_empty());

        container
            .add_components([Some(boxed("play")), None])
            .unwrap();
        assert_eq!(container.components().len(), 1);
    }

    #[test]
    fn test_invalid_component_leaves_table_unchanged() {
        let mut container = Container::new("menu");
        container.add_component(TickCounter::new("play")).unwrap();

        let result = container.add_components([boxed("options"), boxed("__proto__")]);
        assert!(matches!(
            result,
            Err(PortalError::InvalidComponent { ref id, .. }) if id == "__proto__"
        ));
        assert_eq!(container.components().len(), 1);
        assert!(container.get_component_by_id("options").is_none());

        assert!(container.add_component(TickCounter::new("")).is_err());
        assert_eq!(container.components().len(), 1);
    }

    #[test]
    fn test_add_overwrites_same_id() {
        let mut container = Container::new("menu");
        container.add_component(TickCounter::new("play")).unwrap();
        container.get_mut::<TickCounter>("play").unwrap().tick(Duration::ZERO);

        container.add_component(TickCounter::new("play")).unwrap();
        assert_eq!(container.components().len(), 1);
        assert_eq!(container.get::<TickCounter>("play").unwrap().ticks(), 0);
    }

    #[test]
    fn test_get_component_by_id() {
        let mut container = Container::new("menu");
        container.add_component(TickCounter::new("play")).unwrap();

        assert_eq!(container.get_component_by_id("play").unwrap().id(), "play");
        assert!(container.get_component_by_id("missing").is_none());
        assert!(container.get::<Container>("play").is_none());
    }

    #[test]
    fn test_remove_components() {
        let mut container = Container::new("menu");
        container
            .add_components([boxed("a"), boxed("b"), boxed("c")])
            .unwrap();

        assert!(container.remove_components([Some("a"), Some("two words")]).is_err());
        assert_eq!(container.components().len(), 3);

        let removed = container
            .remove_components([Some("a"), None, Some("missing"), Some("c")])
            .unwrap();
        assert_eq!(removed.len(), 2);
        assert_eq!(container.components().ids().collect::<Vec<_>>(), ["b"]);

        assert!(container.remove_component("b").unwrap().is_some());
        assert!(container.remove_component("b").unwrap().is_none());
    }

    #[test]
    fn test_remove_component_validates_id() {
        let mut container = Container::new("menu");
        container.add_component(TickCounter::new("play")).unwrap();

        for id in ["", "__proto__", "two words"] {
            assert!(matches!(
                container.remove_component(id),
                Err(PortalError::InvalidComponent { .. })
            ));
        }
        assert_eq!(container.components().len(), 1);
    }

    #[test]
    fn test_find_through_nested_containers() {
        let mut footer = Container::new("footer");
        footer.add_component(TickCounter::new("version")).unwrap();
        let mut menu = Container::new("menu");
        menu.add_component(footer).unwrap();

        assert_eq!(
            menu.find::<TickCounter>(&["footer", "version"]).unwrap().id(),
            "version"
        );
        assert!(menu.find::<TickCounter>(&["version"]).is_none());
        assert!(menu.find::<TickCounter>(&[]).is_none());

        menu.find_mut::<TickCounter>(&["footer", "version"])
            .unwrap()
            .tick(Duration::ZERO);
        assert_eq!(
            menu.find::<TickCounter>(&["footer", "version"]).unwrap().ticks(),
            1
        );
    }

    #[test]
    fn test_tick_and_draw_reach_every_descendant() {
        let mut footer = Container::new("footer");
        footer.add_component(TickCounter::new("version")).unwrap();
        let mut menu = Container::new("menu");
        menu.add_component(TickCounter::new("play")).unwrap();
        menu.add_component(footer).unwrap();

        let mut display = HeadlessDisplay::new(10, 10, "test");
        menu.tick(Duration::from_millis(50));
        menu.draw(&mut display);
        menu.draw(&mut display);

        for path in [&["play"][..], &["footer", "version"][..]] {
            let counter = menu.find::<TickCounter>(path).unwrap();
            assert_eq!(counter.ticks(), 1);
            assert_eq!(counter.draws(), 2);
            assert_eq!(counter.last_delta(), Duration::from_millis(50));
        }
    }
}
