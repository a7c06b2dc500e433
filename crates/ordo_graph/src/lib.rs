//! Dependency graph and load scheduling primitives for Ordo.
//!
//! `ordo_graph` knows nothing about discovery or loading. It models packages
//! as nodes keyed by fully-qualified dotted names and turns them into a single
//! linear load order.
//!
//! # Core Concepts
//!
//! - [`name`] - Dotted name helpers (ancestry, segments, patterns)
//! - [`PackageNode`] - A package with its declared dependencies
//! - [`DependencyGraph`] - Validated set of package nodes
//! - [`Scheduler`] - Deterministic topological ordering with cycle reporting
//!
//! # Example
//!
//! ```
//! use ordo_graph::{DependencyGraph, PackageNode, Scheduler};
//!
//! let mut graph = DependencyGraph::new();
//! graph.add(PackageNode::new("app.api").with_depends(["app.db"]))?;
//! graph.add(PackageNode::new("app.db"))?;
//!
//! let schedule = Scheduler::new().schedule(&graph)?;
//! assert_eq!(schedule.order(), ["app.db", "app.api"]);
//! # Ok::<(), ordo_graph::GraphError>(())
//! ```

/// Errors raised while building or resolving the graph.
pub mod error;

/// Dependency graph storage and validation.
pub mod graph;

/// Dotted name helpers.
pub mod name;

/// Package nodes and module references.
pub mod node;

/// Topological scheduling.
pub mod schedule;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::error::{GraphError, UnresolvedReason};
    pub use crate::graph::DependencyGraph;
    pub use crate::node::{ModuleRef, PackageNode};
    pub use crate::schedule::{Schedule, ScheduleMode, Scheduler};
}

pub use error::{GraphError, UnresolvedReason};
pub use graph::DependencyGraph;
pub use node::{ModuleRef, PackageNode};
pub use schedule::{Schedule, ScheduleMode, Scheduler};
