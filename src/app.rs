//! Application: routes, the reference registry, discovery and build.
//!
//! [`Application`] owns the session's [`Registry`] and the route modules. It
//! discovers each route's component, renders single routes on demand, and
//! builds every route into a [`BuildOutput`].

use indexmap::IndexMap;

use crate::component::Page;
use crate::html::RenderOptions;
use crate::reactive::{ReferenceSummary, Registry, RegistryError};
use crate::route::{discover_component, RouteModule};

// ---------------------------------------------------------------------------
// AppConfig
// ---------------------------------------------------------------------------

/// Configuration for the application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Page title. Falls back to the route path when unset.
    pub title: Option<String>,
    /// Document language attribute.
    pub lang: Option<String>,
    /// Options for every render pass.
    pub render: RenderOptions,
}

impl AppConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title (builder).
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the document language (builder).
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    /// Set the render options (builder).
    pub fn with_render(mut self, render: RenderOptions) -> Self {
        self.render = render;
        self
    }

    /// Toggle text escaping (builder).
    pub fn with_escape_text(mut self, escape_text: bool) -> Self {
        self.render.escape_text = escape_text;
        self
    }
}

// ---------------------------------------------------------------------------
// Errors and reports
// ---------------------------------------------------------------------------

/// Non-fatal discovery problems. The affected route is skipped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiscoveryWarning {
    #[error("route `{route}` does not contain a component; it was not loaded")]
    NoComponent { route: String },
}

/// Errors from application operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error("unknown route `{0}`")]
    UnknownRoute(String),
    #[error("route `{0}` is already registered")]
    DuplicateRoute(String),
    #[error(transparent)]
    Discovery(#[from] DiscoveryWarning),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Result of scanning every route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryReport {
    /// `(route path, component binding name)` for each loaded route.
    pub components: Vec<(String, String)>,
    /// Routes that were skipped.
    pub warnings: Vec<DiscoveryWarning>,
    /// Modules imported by routes that are not routes themselves.
    pub imported_modules: Vec<String>,
}

/// Everything a production build produces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOutput {
    /// Rendered documents keyed by route path, in route order.
    pub pages: IndexMap<String, String>,
    pub warnings: Vec<DiscoveryWarning>,
    /// The session's references with their compact aliases.
    pub references: Vec<ReferenceSummary>,
}

// ---------------------------------------------------------------------------
// Application
// ---------------------------------------------------------------------------

/// The main application struct.
#[derive(Debug, Default)]
pub struct Application {
    /// Application configuration.
    pub config: AppConfig,
    routes: IndexMap<String, RouteModule>,
    references: Registry,
}

impl Application {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            routes: IndexMap::new(),
            references: Registry::new(),
        }
    }

    // -- routes ------------------------------------------------------------

    /// Register a route. Paths must be unique.
    pub fn add_route(&mut self, route: RouteModule) -> Result<(), AppError> {
        if self.routes.contains_key(route.path()) {
            return Err(AppError::DuplicateRoute(route.path().to_owned()));
        }
        tracing::debug!(route = route.path(), exports = route.exports().len(), "added route");
        self.routes.insert(route.path().to_owned(), route);
        Ok(())
    }

    /// Swap in a freshly loaded version of a route, returning the old one.
    pub fn replace_route(&mut self, route: RouteModule) -> Option<RouteModule> {
        tracing::debug!(route = route.path(), "reloaded route");
        self.routes.insert(route.path().to_owned(), route)
    }

    /// Remove a route.
    pub fn remove_route(&mut self, path: &str) -> Option<RouteModule> {
        self.routes.shift_remove(path)
    }

    pub fn route(&self, path: &str) -> Option<&RouteModule> {
        self.routes.get(path)
    }

    /// Registered routes in registration order.
    pub fn routes(&self) -> impl Iterator<Item = &RouteModule> {
        self.routes.values()
    }

    // -- references --------------------------------------------------------

    /// The session's reference registry.
    pub fn references(&self) -> &Registry {
        &self.references
    }

    pub fn references_mut(&mut self) -> &mut Registry {
        &mut self.references
    }

    /// Start a new session: every reference and computation is dropped.
    pub fn reset_session(&mut self) {
        tracing::debug!(references = self.references.len(), "reset session");
        self.references.clear();
    }

    // -- discovery ---------------------------------------------------------

    /// Find each route's component and partition imported modules.
    pub fn discover(&self) -> DiscoveryReport {
        let mut report = DiscoveryReport::default();

        for route in self.routes.values() {
            match discover_component(route) {
                Some((name, _)) => {
                    report
                        .components
                        .push((route.path().to_owned(), name.to_owned()));
                }
                None => {
                    let warning = DiscoveryWarning::NoComponent {
                        route: route.path().to_owned(),
                    };
                    tracing::warn!("{warning}");
                    report.warnings.push(warning);
                }
            }

            for module in route.modules() {
                let is_route = self.routes.values().any(|r| r.module_name() == module);
                if !is_route && !report.imported_modules.iter().any(|m| m == module) {
                    report.imported_modules.push(module.to_owned());
                }
            }
        }

        report
    }

    // -- rendering ---------------------------------------------------------

    /// Render one route's page.
    ///
    /// Rendering consumes the component's configuration; reload the route
    /// with [`replace_route`](Self::replace_route) before rendering it again.
    pub fn render_route(&mut self, path: &str) -> Result<String, AppError> {
        let route = self
            .routes
            .get_mut(path)
            .ok_or_else(|| AppError::UnknownRoute(path.to_owned()))?;
        let component = route
            .component_mut()
            .ok_or_else(|| DiscoveryWarning::NoComponent {
                route: path.to_owned(),
            })?;

        let title = self
            .config
            .title
            .clone()
            .unwrap_or_else(|| path.to_owned());
        let mut page = Page::new(title, std::mem::take(component));
        if let Some(lang) = &self.config.lang {
            page = page.with_lang(lang.as_str());
        }
        let markup = page.render(&self.config.render);
        *component = std::mem::take(page.body_mut());
        Ok(markup)
    }

    /// Render every route. Routes without a component are skipped and
    /// reported; the build continues.
    pub fn build(&mut self) -> BuildOutput {
        let mut output = BuildOutput::default();
        let paths: Vec<String> = self.routes.keys().cloned().collect();

        for path in paths {
            match self.render_route(&path) {
                Ok(markup) => {
                    output.pages.insert(path, markup);
                }
                Err(AppError::Discovery(warning)) => {
                    tracing::warn!("{warning}");
                    output.warnings.push(warning);
                }
                Err(err) => {
                    tracing::warn!(route = %path, error = %err, "route failed to build");
                }
            }
        }

        output.references = self.references.manifest();
        tracing::debug!(
            pages = output.pages.len(),
            warnings = output.warnings.len(),
            "build finished"
        );
        output
    }
}

// ===========================================================================
// Tests
// ===========================================================================
