//! Dry-run planning built with Ordo.
//!
//! [`plan`] runs a full orchestration with a [`DryRunLoader`], which records
//! every unit it is asked to load instead of loading anything. The result is
//! the exact order a real loader would see.

use std::convert::Infallible;
use std::path::Path;

use ordo_core::{ConfigError, load_config};
use ordo_loader::{Discovery, LoadError, Loader, LoaderConfig, Orchestrator};

/// Loader that accepts every unit and remembers its position.
#[derive(Debug, Default)]
pub struct DryRunLoader {
    next: usize,
}

impl Loader for DryRunLoader {
    /// Position of the unit in load order, starting at zero.
    type Unit = usize;
    type Error = Infallible;

    fn load(&mut self, name: &str) -> Result<usize, Infallible> {
        let position = self.next;
        self.next += 1;
        tracing::debug!(unit = name, position, "dry-run load");
        Ok(position)
    }
}

/// The order a run would load things in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    /// Packages, in load order.
    pub packages: Vec<String>,
    /// Units, in load order.
    pub modules: Vec<String>,
}

/// Runs `config` against `discovery` without loading anything.
///
/// # Errors
///
/// Returns the first fatal discovery, resolution or component error.
pub fn plan<D: Discovery>(config: LoaderConfig, discovery: D) -> Result<Plan, LoadError> {
    let mut orchestrator = Orchestrator::new(config, discovery, DryRunLoader::default());
    orchestrator.load_components()?;
    Ok(Plan {
        packages: orchestrator.get_loaded_packages(),
        modules: orchestrator.get_loaded_modules(),
    })
}

/// Builds the configuration for a command-line target.
///
/// A `.toml` file is read as a configuration file; anything else is taken as
/// a single root directory.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the configuration file cannot be used.
pub fn config_for(target: &Path) -> Result<LoaderConfig, ConfigError> {
    if target.extension().is_some_and(|ext| ext == "toml") {
        load_config(target)
    } else {
        Ok(LoaderConfig::new().with_root(target))
    }
}
