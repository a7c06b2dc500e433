//! # Ordo Internal Library
//!
//! Re-exports the core Ordo crates for convenience.

/// Names, dependency graph and load scheduling.
pub use ordo_graph;

/// Filters, hooks and the run orchestrator.
pub use ordo_loader;

/// Filesystem discovery, configuration files and tracing setup.
pub use ordo_core;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use ordo_core::prelude::*;
    pub use ordo_graph::prelude::*;
}
