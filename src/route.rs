//! Route modules and component discovery.
//!
//! A [`RouteModule`] is the in-process form of a route file: its top-level
//! bindings in declaration order. Discovery scans them backwards, since the
//! exported component is conventionally declared last.

use crate::component::Component;

/// A top-level binding of a route module.
#[derive(Debug, Clone, PartialEq)]
pub enum Export {
    Component(Component),
    /// A nested import, by module name.
    Module(String),
    /// A registered reference, by name.
    Reference(String),
    /// Any other value, by a short description.
    Value(String),
}

impl Export {
    pub fn kind(&self) -> &'static str {
        match self {
            Export::Component(_) => "component",
            Export::Module(_) => "module",
            Export::Reference(_) => "reference",
            Export::Value(_) => "value",
        }
    }
}

impl From<Component> for Export {
    fn from(component: Component) -> Self {
        Export::Component(component)
    }
}

/// The bindings exposed by one route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteModule {
    path: String,
    exports: Vec<(String, Export)>,
}

impl RouteModule {
    /// Create a route. The path is given a leading `/` if it lacks one.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let path = if path.starts_with('/') {
            path
        } else {
            format!("/{path}")
        };
        Self {
            path,
            exports: Vec::new(),
        }
    }

    /// Declare a binding (builder).
    pub fn export(mut self, name: impl Into<String>, value: impl Into<Export>) -> Self {
        self.exports.push((name.into(), value.into()));
        self
    }

    /// Declare a binding.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<Export>) {
        self.exports.push((name.into(), value.into()));
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// The module name this route is imported as (path without the slash).
    pub fn module_name(&self) -> &str {
        self.path.trim_start_matches('/')
    }

    pub fn exports(&self) -> &[(String, Export)] {
        &self.exports
    }

    /// Names of the modules this route imports, in declaration order.
    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.exports.iter().filter_map(|(_, export)| match export {
            Export::Module(module) => Some(module.as_str()),
            _ => None,
        })
    }

    /// All components, in declaration order.
    pub fn components(&self) -> impl Iterator<Item = (&str, &Component)> {
        self.exports.iter().filter_map(|(name, export)| match export {
            Export::Component(component) => Some((name.as_str(), component)),
            _ => None,
        })
    }

    /// Mutable access to the discovered component.
    pub fn component_mut(&mut self) -> Option<&mut Component> {
        self.exports
            .iter_mut()
            .rev()
            .find_map(|(_, export)| match export {
                Export::Component(component) => Some(component),
                _ => None,
            })
    }
}

/// The route's component: the last component-typed binding.
pub fn discover_component(route: &RouteModule) -> Option<(&str, &Component)> {
    route
        .exports
        .iter()
        .rev()
        .find_map(|(name, export)| match export {
            Export::Component(component) => Some((name.as_str(), component)),
            _ => None,
        })
}
