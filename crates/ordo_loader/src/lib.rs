//! Startup orchestration for Ordo.
//!
//! `ordo_loader` drives a run from a discovered package tree to loaded units:
//!
//! - [`discovery`] - Discovery contract and the discovered tree
//! - [`filter`] - Ignore lists and the pluggable ignore predicate
//! - [`loader`] - The capability that actually loads a unit
//! - [`hooks`] - Lifecycle callbacks around package loading
//! - [`orchestrator`] - The run state machine tying everything together
//!
//! # Lifecycle
//!
//! A run moves through `Init → Discovering → Resolving → Loading → Done`.
//! Any fatal error moves it to `Failed`, which is final:
//!
//! 1. **Discovering** - Every root is enumerated through [`Discovery`]
//! 2. **Resolving** - Packages surviving the filters are registered in a
//!    [`DependencyGraph`](ordo_graph::DependencyGraph) and scheduled
//! 3. **Loading** - Each package loads its early unit, then its other
//!    modules, in the scheduled order
//!
//! # Example
//!
//! ```
//! use ordo_loader::prelude::*;
//!
//! let discovery = MemoryDiscovery::new().with_root(
//!     "/srv/app",
//!     [DiscoveredPackage::new("app")
//!         .with_module("manager")
//!         .with_module("api")
//!         .with_descriptor(PackageDescriptor::new().with_component_name("manager"))],
//! );
//!
//! let loader = |name: &str| Ok::<_, std::convert::Infallible>(name.len());
//! let config = LoaderConfig::new().with_root("/srv/app").with_verbose(false);
//!
//! let mut orchestrator = Orchestrator::new(config, discovery, loader);
//! orchestrator.load_components()?;
//!
//! assert!(orchestrator.is_package_loaded("app"));
//! assert_eq!(orchestrator.get_loaded_modules(), ["app.manager", "app.api"]);
//! # Ok::<(), ordo_loader::LoadError>(())
//! ```

/// Run configuration.
pub mod config;

/// Shared key/value context.
pub mod context;

/// Per-package descriptors.
pub mod descriptor;

/// Discovery contract.
pub mod discovery;

/// Error types.
pub mod error;

/// Ignore filters.
pub mod filter;

/// Lifecycle hooks.
pub mod hooks;

/// Loading capability.
pub mod loader;

/// Run orchestration.
pub mod orchestrator;

/// Load bookkeeping.
pub mod state;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::config::LoaderConfig;
    pub use crate::context::Context;
    pub use crate::descriptor::PackageDescriptor;
    pub use crate::discovery::{DiscoveredPackage, Discovery, MemoryDiscovery};
    pub use crate::error::{DiscoveryError, LoadError};
    pub use crate::filter::Filter;
    pub use crate::hooks::LoadHook;
    pub use crate::loader::Loader;
    pub use crate::orchestrator::{Orchestrator, RunState};
    pub use crate::state::LoadState;
}

pub use config::LoaderConfig;
pub use context::Context;
pub use descriptor::PackageDescriptor;
pub use discovery::{DiscoveredPackage, Discovery, MemoryDiscovery};
pub use error::{DiscoveryError, LoadError};
pub use filter::Filter;
pub use hooks::LoadHook;
pub use loader::Loader;
pub use orchestrator::{Orchestrator, RunState};
pub use state::LoadState;
