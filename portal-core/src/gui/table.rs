//! The lookup table a [`Container`](super::Container) keeps its children in.

use fxhash::FxBuildHasher;
use indexmap::{IndexMap, map};

use super::Component;

/// Components keyed by their id.
///
/// Iteration follows insertion order, which is also the order children are drawn in.
/// Replacing a component keeps its position.
#[derive(Default)]
pub struct ComponentTable {
    entries: IndexMap<String, Box<dyn Component>, FxBuildHasher>,
}

impl ComponentTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `component` under its id and returns the component it replaced, if any.
    pub fn set_component(&mut self, component: Box<dyn Component>) -> Option<Box<dyn Component>> {
        let id = component.id().to_owned();
        self.entries.insert(id, component)
    }

    pub fn get_component(&self, id: &str) -> Option<&dyn Component> {
        Some(self.entries.get(id)?.as_ref())
    }

    pub fn get_component_mut(&mut self, id: &str) -> Option<&mut dyn Component> {
        Some(self.entries.get_mut(id)?.as_mut())
    }

    /// Removes the component stored under `id`. Does nothing if there is none.
    pub fn remove_component(&mut self, id: &str) -> Option<Box<dyn Component>> {
        self.entries.shift_remove(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> map::Keys<'_, String, Box<dyn Component>> {
        self.entries.keys()
    }

    pub fn iter(&self) -> map::Iter<'_, String, Box<dyn Component>> {
        self.entries.iter()
    }

    pub fn values(&self) -> map::Values<'_, String, Box<dyn Component>> {
        self.entries.values()
    }

    pub fn values_mut(&mut self) -> map::ValuesMut<'_, String, Box<dyn Component>> {
        self.entries.values_mut()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::TickCounter;

    fn address(component: &dyn Component) -> *const () {
        std::ptr::from_ref(component).cast::<()>()
    }

    #[test]
    fn test_set_then_get_returns_same_instance() {
        let mut table = ComponentTable::new();
        let component: Box<dyn Component> = Box::new(TickCounter::new("play"));
        let expected = address(component.as_ref());

        assert!(table.set_component(component).is_none());
        let stored = table.get_component("play").unwrap();
        assert_eq!(address(stored), expected);
        assert!(table.get_component("options").is_none());
    }

    #[test]
    fn test_remove_then_get_returns_none() {
        let mut table = ComponentTable::new();
        table.set_component(Box::new(TickCounter::new("play")));

        assert!(table.remove_component("play").is_some());
        assert!(table.get_component("play").is_none());
        assert!(table.remove_component("play").is_none());
        assert!(table.is_empty());
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut table = ComponentTable::new();
        table.set_component(Box::new(TickCounter::new("a")));
        table.set_component(Box::new(TickCounter::new("b")));
        table.set_component(Box::new(TickCounter::new("c")));

        let replaced = table.set_component(Box::new(TickCounter::new("a")));
        assert!(replaced.is_some());
        assert_eq!(table.len(), 3);
        assert_eq!(table.ids().collect::<Vec<_>>(), ["a", "b", "c"]);

        table.remove_component("b");
        assert_eq!(table.ids().collect::<Vec<_>>(), ["a", "c"]);
    }

    #[test]
    fn test_get_component_mut() {
        let mut table = ComponentTable::new();
        table.set_component(Box::new(TickCounter::new("ticks")));

        let component = table.get_component_mut("ticks").unwrap();
        component.tick(std::time::Duration::from_millis(50));
        let counter = component.as_any().downcast_ref::<TickCounter>().unwrap();
        assert_eq!(counter.ticks(), 1);
    }
}
