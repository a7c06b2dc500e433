//! Package nodes and module references.

use indexmap::IndexSet;

use crate::name;

// ─────────────────────────────────────────────────────────────────────────────
// PackageNode
// ─────────────────────────────────────────────────────────────────────────────

/// A package registered in the [`DependencyGraph`](crate::DependencyGraph).
///
/// Nodes are assembled with the `with_*` builder methods and become immutable
/// once added to a graph: the graph only hands out shared references.
///
/// # Example
///
/// ```
/// use ordo_graph::PackageNode;
///
/// let node = PackageNode::new("app.api")
///     .with_depends(["app.db", "app.logging"])
///     .with_early_unit(Some("manager"));
///
/// assert_eq!(node.name(), "app.api");
/// assert!(node.has_dependencies());
/// assert_eq!(node.early_unit(), Some("manager"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageNode {
    /// Fully-qualified dotted name, unique within a graph.
    name: String,
    /// Fully-qualified names this package must be loaded after.
    depends: IndexSet<String>,
    /// Disabled nodes (and their subtrees) are never loaded.
    enabled: bool,
    /// Module loaded before any sibling, relative to this package.
    early_unit: Option<String>,
}

impl PackageNode {
    /// Creates an enabled node with no dependencies and no early unit.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            depends: IndexSet::new(),
            enabled: true,
            early_unit: None,
        }
    }

    /// Adds declared dependencies. Duplicates collapse to one entry.
    #[must_use]
    pub fn with_depends<I, S>(mut self, depends: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.depends.extend(depends.into_iter().map(Into::into));
        self
    }

    /// Sets whether the node is enabled.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Sets the early-load unit.
    #[must_use]
    pub fn with_early_unit(mut self, early_unit: Option<impl Into<String>>) -> Self {
        self.early_unit = early_unit.map(Into::into);
        self
    }

    /// Returns the fully-qualified name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared dependencies in declaration order.
    #[must_use]
    pub fn depends(&self) -> &IndexSet<String> {
        &self.depends
    }

    /// Returns true if the node declares at least one dependency.
    #[must_use]
    pub fn has_dependencies(&self) -> bool {
        !self.depends.is_empty()
    }

    /// Returns true if the node is enabled.
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the early-load unit, if declared on this package.
    #[must_use]
    pub fn early_unit(&self) -> Option<&str> {
        self.early_unit.as_deref()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ModuleRef
// ─────────────────────────────────────────────────────────────────────────────

/// A loadable leaf unit inside a package.
///
/// Holds the owning package by name only; look the package up in the graph
/// when its metadata is needed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleRef {
    qualified_name: String,
    owning_package: String,
}

impl ModuleRef {
    /// Creates a reference to module `module` (unqualified) inside `package`.
    #[must_use]
    pub fn new(package: &str, module: &str) -> Self {
        Self {
            qualified_name: name::join(package, module),
            owning_package: package.to_string(),
        }
    }

    /// Returns the fully-qualified module name.
    #[must_use]
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// Returns the fully-qualified name of the owning package.
    #[must_use]
    pub fn owning_package(&self) -> &str {
        &self.owning_package
    }

    /// Returns the unqualified module name.
    #[must_use]
    pub fn short_name(&self) -> &str {
        name::last_segment(&self.qualified_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_depends_collapse() {
        let node = PackageNode::new("a").with_depends(["b", "c", "b"]);
        let depends: Vec<&str> = node.depends().iter().map(String::as_str).collect();
        assert_eq!(depends, ["b", "c"]);
    }

    #[test]
    fn nodes_are_enabled_by_default() {
        let node = PackageNode::new("a");
        assert!(node.enabled());
        assert!(!node.has_dependencies());
        assert_eq!(node.early_unit(), None);
    }

    #[test]
    fn module_ref_qualifies_name() {
        let module = ModuleRef::new("app.db", "models");
        assert_eq!(module.qualified_name(), "app.db.models");
        assert_eq!(module.owning_package(), "app.db");
        assert_eq!(module.short_name(), "models");
    }
}
