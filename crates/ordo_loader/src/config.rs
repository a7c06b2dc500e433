//! Run configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::context::Context;

/// Serializable settings for an [`Orchestrator`](crate::Orchestrator) run.
///
/// Capabilities that cannot be serialized (the ignore predicate, the module
/// hook, lifecycle hooks) are attached to the orchestrator instead.
///
/// # Example
///
/// ```
/// use ordo_loader::LoaderConfig;
///
/// let config = LoaderConfig::new()
///     .with_root("/srv/app")
///     .with_base_component("manager")
///     .with_ignored_packages(["app.legacy"])
///     .with_ignored_modules(["models"]);
///
/// assert!(config.verbose);
/// assert_eq!(config.base_component.as_deref(), Some("manager"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoaderConfig {
    /// Root locations enumerated in order.
    pub roots: Vec<PathBuf>,
    /// Default early unit for packages that do not name one.
    pub base_component: Option<String>,
    /// Log progress at `info` instead of `debug`.
    pub verbose: bool,
    /// Package patterns excluded with their subtree.
    pub ignored_packages: Vec<String>,
    /// Module patterns matched against trailing name segments.
    pub ignored_modules: Vec<String>,
    /// Initial values of the shared context.
    pub context: Context,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            base_component: None,
            verbose: true,
            ignored_packages: Vec::new(),
            ignored_modules: Vec::new(),
            context: Context::new(),
        }
    }
}

impl LoaderConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a root.
    #[must_use]
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.roots.push(root.into());
        self
    }

    /// Appends several roots.
    #[must_use]
    pub fn with_roots<I, P>(mut self, roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.roots.extend(roots.into_iter().map(Into::into));
        self
    }

    /// Sets the default early unit.
    #[must_use]
    pub fn with_base_component(mut self, component: impl Into<String>) -> Self {
        self.base_component = Some(component.into());
        self
    }

    /// Sets progress verbosity.
    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Appends ignored package patterns.
    #[must_use]
    pub fn with_ignored_packages<I, S>(mut self, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_packages
            .extend(packages.into_iter().map(Into::into));
        self
    }

    /// Appends ignored module patterns.
    #[must_use]
    pub fn with_ignored_modules<I, S>(mut self, modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_modules
            .extend(modules.into_iter().map(Into::into));
        self
    }

    /// Replaces the initial context.
    #[must_use]
    pub fn with_context(mut self, context: Context) -> Self {
        self.context = context;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_by_default() {
        let config: LoaderConfig = serde_json::from_str("{}").unwrap();
        assert!(config.verbose);
        assert!(config.roots.is_empty());
    }

    #[test]
    fn context_reads_as_plain_object() {
        let config: LoaderConfig =
            serde_json::from_str(r#"{"roots": ["a"], "context": {"env": "test"}}"#).unwrap();
        assert_eq!(config.roots, [PathBuf::from("a")]);
        assert_eq!(config.context.get_as::<String>("env").as_deref(), Some("test"));
    }
}
