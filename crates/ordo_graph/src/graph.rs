//! Dependency graph of package nodes.
//!
//! The graph stores every discovered package, enabled or not, in discovery
//! order. Names excluded by filters are remembered separately so that a
//! dependency on them can be reported precisely.

use hashbrown::HashSet;
use indexmap::IndexMap;

use crate::error::{GraphError, UnresolvedReason};
use crate::name;
use crate::node::PackageNode;

/// A directed graph of packages keyed by fully-qualified name.
///
/// Edges are implied by each node's declared [`depends`](PackageNode::depends)
/// plus an implicit edge from every package to its nearest enabled ancestor
/// package, so sub-packages are always ordered after their parents.
///
/// # Example
///
/// ```
/// use ordo_graph::{DependencyGraph, GraphError, PackageNode};
///
/// let mut graph = DependencyGraph::new();
/// graph.add(PackageNode::new("app"))?;
/// graph.add(PackageNode::new("app.api").with_depends(["app.db"]))?;
///
/// assert!(matches!(
///     graph.resolve_order_inputs(),
///     Err(GraphError::UnresolvedDependency { .. })
/// ));
/// # Ok::<(), GraphError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// All registered nodes, in insertion (discovery) order.
    nodes: IndexMap<String, PackageNode>,
    /// Names that were discovered but excluded by filters.
    excluded: HashSet<String>,
}

impl DependencyGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a node.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateName`] if a node with the same name was
    /// already added.
    pub fn add(&mut self, node: PackageNode) -> Result<(), GraphError> {
        if self.nodes.contains_key(node.name()) {
            return Err(GraphError::DuplicateName {
                name: node.name().to_string(),
            });
        }
        self.nodes.insert(node.name().to_string(), node);
        Ok(())
    }

    /// Records a discovered name that filters excluded from loading.
    pub fn exclude(&mut self, name: impl Into<String>) {
        self.excluded.insert(name.into());
    }

    /// Returns true if `name` was recorded as excluded.
    #[must_use]
    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded.contains(name)
    }

    /// Gets a node by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PackageNode> {
        self.nodes.get(name)
    }

    /// Returns true if a node with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    /// Returns the number of registered nodes, enabled or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if no node was registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over all nodes in discovery order.
    pub fn nodes(&self) -> impl Iterator<Item = &PackageNode> {
        self.nodes.values()
    }

    /// Iterates over enabled nodes in discovery order.
    pub fn enabled_nodes(&self) -> impl Iterator<Item = &PackageNode> {
        self.nodes.values().filter(|node| node.enabled())
    }

    /// Returns true if any enabled node declares a dependency.
    #[must_use]
    pub fn has_declared_dependencies(&self) -> bool {
        self.enabled_nodes().any(PackageNode::has_dependencies)
    }

    /// Returns the nearest enabled ancestor package of `name` in this graph.
    #[must_use]
    pub fn implicit_parent(&self, name: &str) -> Option<&str> {
        let mut current = name::parent(name);
        while let Some(candidate) = current {
            if let Some(node) = self.nodes.get(candidate)
                && node.enabled()
            {
                return Some(node.name());
            }
            current = name::parent(candidate);
        }
        None
    }

    /// Returns every name `name` must be loaded after.
    ///
    /// Declared dependencies come first, in declaration order, followed by the
    /// implicit parent when it is not already declared.
    #[must_use]
    pub fn dependencies_of(&self, name: &str) -> Vec<&str> {
        let Some(node) = self.nodes.get(name) else {
            return Vec::new();
        };

        let mut dependencies: Vec<&str> = node.depends().iter().map(String::as_str).collect();
        if let Some(parent) = self.implicit_parent(name)
            && !dependencies.contains(&parent)
        {
            dependencies.push(parent);
        }
        dependencies
    }

    /// Validates every declared dependency of every enabled node.
    ///
    /// Checks run in discovery order and stop at the first problem.
    ///
    /// # Errors
    ///
    /// - [`GraphError::SelfDependency`] if a node depends on itself
    /// - [`GraphError::SubPackageDependency`] if a node depends on a descendant
    /// - [`GraphError::UnresolvedDependency`] if a target is absent, disabled
    ///   or excluded by filters
    pub fn resolve_order_inputs(&self) -> Result<(), GraphError> {
        for node in self.enabled_nodes() {
            for target in node.depends() {
                self.validate_dependency(node.name(), target)?;
            }
        }
        Ok(())
    }

    fn validate_dependency(&self, requester: &str, target: &str) -> Result<(), GraphError> {
        if requester == target {
            return Err(GraphError::SelfDependency {
                name: requester.to_string(),
            });
        }

        if name::is_strict_ancestor_of(requester, target) {
            return Err(GraphError::SubPackageDependency {
                package: requester.to_string(),
                child: target.to_string(),
            });
        }

        let reason = match self.nodes.get(target) {
            Some(node) if node.enabled() => return Ok(()),
            Some(_) => UnresolvedReason::Disabled,
            None if self.excluded.contains(target) => UnresolvedReason::Ignored,
            None => UnresolvedReason::Missing,
        };

        Err(GraphError::UnresolvedDependency {
            requester: requester.to_string(),
            target: target.to_string(),
            reason,
        })
    }
}
