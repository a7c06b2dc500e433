//! Deterministic load-order scheduling.
//!
//! The [`Scheduler`] turns a validated [`DependencyGraph`] into one linear
//! order in which every package appears after everything it depends on.
//!
//! # Determinism
//!
//! Kahn's algorithm is run with a ready set ordered by fully-qualified name:
//! whenever several packages are free to go next, the lexicographically
//! smallest one is taken. The same graph always yields the same order.
//!
//! # Discovery-order fallback
//!
//! When no enabled package declares any dependency, the scheduler (unless
//! [`strict`](Scheduler::strict)) skips sorting and returns packages in the
//! order they were discovered, with one adjustment: a package listed before
//! its implicit parent is emitted right after that parent. That order comes
//! from the discovery source (e.g. directory enumeration) and may differ
//! between runs or platforms. Callers that need reproducibility should
//! declare dependencies or use a strict scheduler.

use std::collections::BTreeSet;

use hashbrown::{HashMap, HashSet};

use crate::error::GraphError;
use crate::graph::DependencyGraph;
use crate::node::PackageNode;

/// How a [`Schedule`] was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleMode {
    /// Topologically sorted with lexicographic tie-breaking.
    Resolved,
    /// Discovery order, parents first; no dependency declarations were present.
    DiscoveryOrder,
}

/// A linear load order over the enabled packages of a graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    order: Vec<String>,
    mode: ScheduleMode,
}

impl Schedule {
    /// Returns the package names in load order.
    #[must_use]
    pub fn order(&self) -> &[String] {
        &self.order
    }

    /// Returns how the order was produced.
    #[must_use]
    pub fn mode(&self) -> ScheduleMode {
        self.mode
    }

    /// Returns the number of scheduled packages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if nothing was scheduled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Consumes the schedule, returning the ordered names.
    #[must_use]
    pub fn into_order(self) -> Vec<String> {
        self.order
    }
}

/// Produces load orders from dependency graphs.
///
/// # Example
///
/// ```
/// use ordo_graph::{DependencyGraph, PackageNode, Scheduler};
///
/// let mut graph = DependencyGraph::new();
/// graph.add(PackageNode::new("a").with_depends(["b"]))?;
/// graph.add(PackageNode::new("b").with_depends(["c"]))?;
/// graph.add(PackageNode::new("c"))?;
///
/// let schedule = Scheduler::new().schedule(&graph)?;
/// assert_eq!(schedule.order(), ["c", "b", "a"]);
/// # Ok::<(), ordo_graph::GraphError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Scheduler {
    allow_fallback: bool,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self {
            allow_fallback: true,
        }
    }
}

impl Scheduler {
    /// Creates a scheduler that falls back to discovery order when no
    /// dependencies are declared.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scheduler that always sorts, even without declarations.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            allow_fallback: false,
        }
    }

    /// Computes the load order for all enabled nodes of `graph`.
    ///
    /// # Errors
    ///
    /// Returns the first validation error from
    /// [`DependencyGraph::resolve_order_inputs`], or
    /// [`GraphError::CyclicDependency`] with the cycle path.
    pub fn schedule(&self, graph: &DependencyGraph) -> Result<Schedule, GraphError> {
        graph.resolve_order_inputs()?;

        if self.allow_fallback && !graph.has_declared_dependencies() {
            tracing::debug!(
                packages = graph.enabled_nodes().count(),
                "no dependencies declared, keeping discovery order"
            );
            return Ok(Schedule {
                order: parent_first_order(graph),
                mode: ScheduleMode::DiscoveryOrder,
            });
        }

        let order = topological_order(graph)?;
        tracing::debug!(packages = order.len(), "resolved load order");
        Ok(Schedule {
            order,
            mode: ScheduleMode::Resolved,
        })
    }
}

/// Discovery order, except that a package never precedes its implicit parent.
///
/// A package whose parent has not been emitted yet pulls the parent chain in
/// ahead of itself; everything else keeps its discovery position.
fn parent_first_order(graph: &DependencyGraph) -> Vec<String> {
    let mut placed: HashSet<&str> = HashSet::new();
    let mut order: Vec<String> = Vec::new();

    for node in graph.enabled_nodes() {
        let mut chain: Vec<&str> = Vec::new();
        let mut current = Some(node.name());
        while let Some(name) = current {
            if placed.contains(name) {
                break;
            }
            chain.push(name);
            current = graph.implicit_parent(name);
        }
        for name in chain.into_iter().rev() {
            placed.insert(name);
            order.push(name.to_string());
        }
    }

    order
}

/// Kahn's algorithm with a name-ordered ready set.
fn topological_order(graph: &DependencyGraph) -> Result<Vec<String>, GraphError> {
    let names: Vec<&str> = graph.enabled_nodes().map(PackageNode::name).collect();
    let index: HashMap<&str, usize> = names.iter().enumerate().map(|(i, &n)| (n, i)).collect();

    let n = names.len();
    let mut in_degree = vec![0usize; n];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); n];

    for (i, &name) in names.iter().enumerate() {
        for dependency in graph.dependencies_of(name) {
            // Validation guarantees declared targets are enabled nodes; the
            // implicit parent is enabled by construction.
            if let Some(&dep_idx) = index.get(dependency) {
                dependents[dep_idx].push(i);
                in_degree[i] += 1;
            }
        }
    }

    let mut ready: BTreeSet<&str> = names
        .iter()
        .zip(&in_degree)
        .filter(|(_, deg)| **deg == 0)
        .map(|(&name, _)| name)
        .collect();

    let mut order: Vec<String> = Vec::with_capacity(n);
    while let Some(name) = ready.pop_first() {
        order.push(name.to_string());
        for &dependent in &dependents[index[name]] {
            in_degree[dependent] -= 1;
            if in_degree[dependent] == 0 {
                ready.insert(names[dependent]);
            }
        }
    }

    if order.len() != n {
        let placed: HashSet<&str> = order.iter().map(String::as_str).collect();
        let remaining: BTreeSet<&str> = names
            .iter()
            .copied()
            .filter(|name| !placed.contains(name))
            .collect();
        return Err(GraphError::CyclicDependency {
            path: find_cycle(graph, &remaining),
        });
    }

    Ok(order)
}

/// Extracts one cycle from the nodes Kahn's algorithm could not place.
///
/// Every remaining node has at least one remaining dependency, so following
/// the smallest remaining dependency from the smallest remaining node must
/// revisit a node on the current path.
fn find_cycle(graph: &DependencyGraph, remaining: &BTreeSet<&str>) -> Vec<String> {
    let mut path: Vec<&str> = Vec::new();
    let mut position: HashMap<&str, usize> = HashMap::new();
    let mut current = remaining.first().copied();

    while let Some(name) = current {
        if let Some(&start) = position.get(name) {
            let mut cycle: Vec<String> = path[start..].iter().map(|s| (*s).to_string()).collect();
            cycle.push(name.to_string());
            return cycle;
        }
        position.insert(name, path.len());
        path.push(name);
        current = graph
            .dependencies_of(name)
            .into_iter()
            .filter(|dep| remaining.contains(dep))
            .min();
    }

    // Unreachable for a stalled Kahn run; report what was walked.
    path.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(nodes: impl IntoIterator<Item = PackageNode>) -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        for node in nodes {
            graph.add(node).unwrap();
        }
        graph
    }

    #[test]
    fn ties_break_lexicographically() {
        let graph = graph([
            PackageNode::new("zeta"),
            PackageNode::new("alpha").with_depends(["zeta"]),
            PackageNode::new("beta"),
        ]);
        let schedule = Scheduler::new().schedule(&graph).unwrap();
        assert_eq!(schedule.mode(), ScheduleMode::Resolved);
        assert_eq!(schedule.order(), ["beta", "zeta", "alpha"]);
    }

    #[test]
    fn fallback_keeps_discovery_order() {
        let graph = graph([
            PackageNode::new("zeta"),
            PackageNode::new("alpha"),
            PackageNode::new("beta"),
        ]);
        let schedule = Scheduler::new().schedule(&graph).unwrap();
        assert_eq!(schedule.mode(), ScheduleMode::DiscoveryOrder);
        assert_eq!(schedule.order(), ["zeta", "alpha", "beta"]);
    }

    #[test]
    fn fallback_moves_sub_packages_after_their_parent() {
        let graph = graph([
            PackageNode::new("app.api"),
            PackageNode::new("lib"),
            PackageNode::new("app"),
        ]);
        let schedule = Scheduler::new().schedule(&graph).unwrap();
        assert_eq!(schedule.mode(), ScheduleMode::DiscoveryOrder);
        assert_eq!(schedule.order(), ["app", "app.api", "lib"]);
    }

    #[test]
    fn fallback_pulls_in_the_whole_ancestor_chain() {
        let graph = graph([
            PackageNode::new("app.api.v1"),
            PackageNode::new("app.api"),
            PackageNode::new("app"),
            PackageNode::new("app.db"),
        ]);
        let schedule = Scheduler::new().schedule(&graph).unwrap();
        assert_eq!(schedule.order(), ["app", "app.api", "app.api.v1", "app.db"]);
    }

    #[test]
    fn strict_scheduler_sorts_without_declarations() {
        let graph = graph([PackageNode::new("zeta"), PackageNode::new("alpha")]);
        let schedule = Scheduler::strict().schedule(&graph).unwrap();
        assert_eq!(schedule.mode(), ScheduleMode::Resolved);
        assert_eq!(schedule.order(), ["alpha", "zeta"]);
    }

    #[test]
    fn disabled_nodes_are_not_scheduled() {
        let graph = graph([
            PackageNode::new("a").with_depends(["b"]),
            PackageNode::new("b"),
            PackageNode::new("c").with_enabled(false),
        ]);
        let schedule = Scheduler::new().schedule(&graph).unwrap();
        assert_eq!(schedule.order(), ["b", "a"]);
    }

    #[test]
    fn sub_packages_follow_their_parent() {
        let graph = graph([
            PackageNode::new("app.api"),
            PackageNode::new("app").with_depends(["lib"]),
            PackageNode::new("lib"),
        ]);
        let schedule = Scheduler::new().schedule(&graph).unwrap();
        assert_eq!(schedule.order(), ["lib", "app", "app.api"]);
    }

    #[test]
    fn two_node_cycle_is_reported() {
        let graph = graph([
            PackageNode::new("a").with_depends(["b"]),
            PackageNode::new("b").with_depends(["a"]),
        ]);
        let err = Scheduler::new().schedule(&graph).unwrap_err();
        assert_eq!(
            err,
            GraphError::CyclicDependency {
                path: vec!["a".into(), "b".into(), "a".into()],
            }
        );
    }

    #[test]
    fn cycle_through_parent_edge_is_reported() {
        let graph = graph([
            PackageNode::new("app").with_depends(["lib"]),
            PackageNode::new("app.db"),
            PackageNode::new("lib").with_depends(["app.db"]),
        ]);
        let err = Scheduler::new().schedule(&graph).unwrap_err();
        assert_eq!(
            err,
            GraphError::CyclicDependency {
                path: vec!["app".into(), "lib".into(), "app.db".into(), "app".into()],
            }
        );
    }
}
