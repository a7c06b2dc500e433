//! Deterministic, dependency-ordered startup loading of packages and modules.
//!
//! A run discovers a tree of packages, drops what the ignore filters exclude,
//! orders the rest so every package follows its dependencies and its parent,
//! then loads each package's early component before its other modules. Every
//! unit is loaded at most once.
//!
//! ```no_run
//! use ordo::prelude::*;
//!
//! let config = LoaderConfig::new().with_root("src/my_app").with_base_component("manager");
//! let loader = |name: &str| Ok::<_, std::convert::Infallible>(name.to_string());
//!
//! let mut orchestrator = Orchestrator::new(config, FsDiscovery::new(), loader);
//! orchestrator.load_components()?;
//! println!("{:?}", orchestrator.get_loaded_packages());
//! # Ok::<(), LoadError>(())
//! ```

pub use ordo_internal::*;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use ordo_internal::prelude::*;
}
