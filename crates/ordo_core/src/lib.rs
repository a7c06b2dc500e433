//! Host-side building blocks for Ordo.
//!
//! `ordo_loader` never touches the filesystem or installs a subscriber. This
//! crate provides the pieces a binary needs around it:
//!
//! - [`fs`] - [`FsDiscovery`], enumerating package trees on disk
//! - [`config`] - Reading a [`LoaderConfig`](ordo_loader::LoaderConfig) from a TOML file
//! - [`tracing_setup`] - Installing a `tracing` subscriber
//!
//! # Example
//!
//! ```no_run
//! use ordo_core::prelude::*;
//!
//! TracingConfig::new().with_format(TracingFormat::Compact).init();
//!
//! let config = load_config("ordo.toml")?;
//! let loader = |name: &str| Ok::<_, std::convert::Infallible>(name.to_string());
//! let mut orchestrator = Orchestrator::new(config, FsDiscovery::new(), loader);
//! orchestrator.load_components()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Configuration files.
pub mod config;

/// Filesystem discovery.
pub mod fs;

/// Subscriber installation.
pub mod tracing_setup;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::config::{ConfigError, load_config};
    pub use crate::fs::{DESCRIPTOR_FILE, FsDiscovery};
    pub use crate::tracing_setup::{TracingConfig, TracingFormat};
    pub use ordo_loader::prelude::*;
}

pub use config::{ConfigError, load_config, parse_config};
pub use fs::{DESCRIPTOR_FILE, FsDiscovery};
pub use tracing_setup::{TracingConfig, TracingFormat};
