//! Tool registry with lazy, memoized construction

use super::{Icon, Tool, ToolCategory};
use crate::events::{AppEvent, EventBus};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::info;

/// Factory that builds a tool instance
pub type ToolConstructor = Arc<dyn Fn() -> Arc<dyn Tool> + Send + Sync>;

/// Static metadata about a tool and how to build it
#[derive(Clone)]
pub struct ToolDescriptor {
    pub name: String,
    pub category: ToolCategory,
    pub icon: Icon,
    constructor: ToolConstructor,
}

impl ToolDescriptor {
    pub fn new<F>(name: impl Into<String>, category: ToolCategory, icon: Icon, constructor: F) -> Self
    where
        F: Fn() -> Arc<dyn Tool> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            category,
            icon,
            constructor: Arc::new(constructor),
        }
    }

    fn construct(&self) -> Arc<dyn Tool> {
        (self.constructor)()
    }
}

impl fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("name", &self.name)
            .field("category", &self.category)
            .field("icon", &self.icon.label())
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
struct RegistryState {
    descriptors: HashMap<String, ToolDescriptor>,
    instances: HashMap<String, Arc<dyn Tool>>,
    order: Vec<String>,
}

/// Maps tool names to descriptors and caches constructed instances
///
/// Each tool is built at most once per registry, on its first `get`. The
/// registry lock is held while a constructor runs, so constructors must not
/// call back into the registry.
#[derive(Default)]
pub struct ToolRegistry {
    state: Mutex<RegistryState>,
    events: Option<EventBus>,
}

impl ToolRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry that announces constructions on `events`
    #[must_use]
    pub fn with_events(events: EventBus) -> Self {
        Self {
            state: Mutex::default(),
            events: Some(events),
        }
    }

    /// Insert or replace a descriptor
    ///
    /// A name keeps the position of its first registration. An instance that
    /// was already built for the name stays cached.
    pub fn register(&self, descriptor: ToolDescriptor) {
        let mut state = self.lock();
        if !state.descriptors.contains_key(&descriptor.name) {
            state.order.push(descriptor.name.clone());
        }
        info!(tool = %descriptor.name, category = %descriptor.category, "Registered tool");
        state.descriptors.insert(descriptor.name.clone(), descriptor);
    }

    /// Get the tool instance for `name`, building it on first request
    ///
    /// Returns `None` for an unknown name; no constructor runs in that case.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        let mut state = self.lock();
        if let Some(instance) = state.instances.get(name) {
            return Some(Arc::clone(instance));
        }

        let instance = state.descriptors.get(name)?.construct();
        state.instances.insert(name.to_string(), Arc::clone(&instance));
        drop(state);

        info!(tool = name, "Instantiated tool");
        if let Some(events) = &self.events {
            events.publish(AppEvent::ToolInstantiated {
                name: name.to_string(),
            });
        }
        Some(instance)
    }

    /// All descriptors in first-registration order
    #[must_use]
    pub fn all_descriptors(&self) -> Vec<ToolDescriptor> {
        let state = self.lock();
        state
            .order
            .iter()
            .filter_map(|name| state.descriptors.get(name).cloned())
            .collect()
    }

    /// Descriptors grouped by category, in the fixed category order
    ///
    /// Categories without tools are left out.
    #[must_use]
    pub fn by_category(&self) -> Vec<(ToolCategory, Vec<ToolDescriptor>)> {
        let descriptors = self.all_descriptors();
        ToolCategory::ALL
            .into_iter()
            .filter_map(|category| {
                let tools: Vec<_> = descriptors
                    .iter()
                    .filter(|d| d.category == category)
                    .cloned()
                    .collect();
                (!tools.is_empty()).then_some((category, tools))
            })
            .collect()
    }

    /// Whether the tool has been built yet
    #[must_use]
    pub fn is_instantiated(&self, name: &str) -> bool {
        self.lock().instances.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().order.is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, RegistryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::Surface;

    struct Dummy(&'static str);

    impl Tool for Dummy {
        fn name(&self) -> &str {
            self.0
        }
        fn description(&self) -> &str {
            "dummy"
        }
        fn category(&self) -> ToolCategory {
            ToolCategory::Text
        }
        fn icon(&self) -> Icon {
            Icon::Default
        }
        fn ui_surface(&self) -> Surface {
            Surface::new(self.0)
        }
    }

    fn descriptor(name: &'static str, category: ToolCategory) -> ToolDescriptor {
        ToolDescriptor::new(name, category, Icon::Default, move || {
            Arc::new(Dummy(name)) as Arc<dyn Tool>
        })
    }

    #[test]
    fn test_by_category_uses_fixed_order() {
        let registry = ToolRegistry::new();
        registry.register(descriptor("ping", ToolCategory::Network));
        registry.register(descriptor("merge", ToolCategory::Files));
        registry.register(descriptor("upper", ToolCategory::Text));
        registry.register(descriptor("split", ToolCategory::Files));

        let grouped = registry.by_category();
        let categories: Vec<_> = grouped.iter().map(|(c, _)| *c).collect();
        assert_eq!(
            categories,
            vec![ToolCategory::Files, ToolCategory::Text, ToolCategory::Network]
        );
        let files: Vec<_> = grouped[0].1.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(files, vec!["merge", "split"]);
    }

    #[test]
    fn test_len_and_instantiation_flag() {
        let registry = ToolRegistry::new();
        assert!(registry.is_empty());
        registry.register(descriptor("a", ToolCategory::System));
        assert_eq!(registry.len(), 1);
        assert!(!registry.is_instantiated("a"));
        registry.get("a").unwrap();
        assert!(registry.is_instantiated("a"));
    }

    #[test]
    fn test_construction_is_announced_once() {
        let bus = EventBus::new(8);
        let mut rx = bus.subscribe();
        let registry = ToolRegistry::with_events(bus);
        registry.register(descriptor("a", ToolCategory::System));

        registry.get("a").unwrap();
        registry.get("a").unwrap();

        assert_eq!(
            rx.try_recv().unwrap(),
            AppEvent::ToolInstantiated { name: "a".into() }
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_descriptor_debug_omits_constructor() {
        let text = format!("{:?}", descriptor("a", ToolCategory::System));
        assert!(text.contains("\"a\""));
        assert!(text.contains(".."));
    }
}
