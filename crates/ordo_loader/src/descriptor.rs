//! Per-package descriptors.
//!
//! A descriptor is the optional metadata a package declares about itself. A
//! package without one takes part in the run with no dependencies, enabled,
//! and with the global `base_component` as its early unit.

use ordo_graph::{PackageNode, name};
use serde::{Deserialize, Serialize};

/// Metadata declared by a package.
///
/// Deserializes from a table such as:
///
/// ```toml
/// name = "app.api"
/// depends = ["app.db"]
/// enabled = true
/// component_name = "manager"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PackageDescriptor {
    /// Fully-qualified name. Must equal the discovered name when present.
    pub name: Option<String>,
    /// Fully-qualified names of packages to load first.
    pub depends: Vec<String>,
    /// Disabled packages exclude their whole subtree.
    pub enabled: bool,
    /// Module loaded before its siblings. Overrides `base_component`.
    pub component_name: Option<String>,
}

impl Default for PackageDescriptor {
    fn default() -> Self {
        Self {
            name: None,
            depends: Vec::new(),
            enabled: true,
            component_name: None,
        }
    }
}

impl PackageDescriptor {
    /// Creates an enabled descriptor with no dependencies.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the declared name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Adds dependencies.
    #[must_use]
    pub fn with_depends<I, S>(mut self, depends: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.depends.extend(depends.into_iter().map(Into::into));
        self
    }

    /// Sets the enabled flag.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Forces a component module.
    #[must_use]
    pub fn with_component_name(mut self, component: impl Into<String>) -> Self {
        self.component_name = Some(component.into());
        self
    }

    /// Returns the forced component reduced to its last segment.
    #[must_use]
    pub fn component(&self) -> Option<&str> {
        self.component_name.as_deref().map(name::last_segment)
    }

    /// Builds the graph node for the package discovered as `name`.
    #[must_use]
    pub fn to_node(&self, name: &str, enabled: bool) -> PackageNode {
        PackageNode::new(name)
            .with_depends(self.depends.iter().cloned())
            .with_enabled(enabled && self.enabled)
            .with_early_unit(self.component())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_enabled_and_empty() {
        let descriptor: PackageDescriptor = serde_json::from_str("{}").unwrap();
        assert_eq!(descriptor, PackageDescriptor::new());
        assert!(descriptor.enabled);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let parsed = serde_json::from_str::<PackageDescriptor>(r#"{"dependz": []}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn dotted_component_is_reduced() {
        let descriptor = PackageDescriptor::new().with_component_name("app.api.manager");
        assert_eq!(descriptor.component(), Some("manager"));
    }

    #[test]
    fn node_carries_descriptor_fields() {
        let node = PackageDescriptor::new()
            .with_depends(["app.db"])
            .with_component_name("manager")
            .to_node("app.api", true);
        assert_eq!(node.name(), "app.api");
        assert!(node.depends().contains("app.db"));
        assert_eq!(node.early_unit(), Some("manager"));
        assert!(node.enabled());
    }

    #[test]
    fn inherited_disable_wins() {
        let node = PackageDescriptor::new().to_node("app.api", false);
        assert!(!node.enabled());
        let node = PackageDescriptor::new().with_enabled(false).to_node("app.api", true);
        assert!(!node.enabled());
    }
}
