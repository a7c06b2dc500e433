//! Load bookkeeping.

use indexmap::{IndexMap, IndexSet};

/// What a run has loaded so far.
///
/// Both collections keep insertion order, so iteration follows load order.
/// A package appears in `loaded_packages` only after every surviving module
/// directly inside it has loaded.
#[derive(Debug)]
pub struct LoadState<U> {
    loaded_packages: IndexSet<String>,
    units: IndexMap<String, U>,
}

impl<U> Default for LoadState<U> {
    fn default() -> Self {
        Self {
            loaded_packages: IndexSet::new(),
            units: IndexMap::new(),
        }
    }
}

impl<U> LoadState<U> {
    /// Creates an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a fully loaded package. Returns false if it was already recorded.
    pub fn mark_package(&mut self, package: impl Into<String>) -> bool {
        self.loaded_packages.insert(package.into())
    }

    /// Records a loaded module and its unit.
    ///
    /// An already recorded module keeps its first unit; returns false then.
    pub fn record_module(&mut self, module: impl Into<String>, unit: U) -> bool {
        let module = module.into();
        if self.units.contains_key(&module) {
            return false;
        }
        self.units.insert(module, unit);
        true
    }

    /// Returns true if the package is fully loaded.
    #[must_use]
    pub fn is_package_loaded(&self, package: &str) -> bool {
        self.loaded_packages.contains(package)
    }

    /// Returns true if the module is loaded.
    #[must_use]
    pub fn is_module_loaded(&self, module: &str) -> bool {
        self.units.contains_key(module)
    }

    /// Gets the unit produced for a module.
    #[must_use]
    pub fn unit(&self, module: &str) -> Option<&U> {
        self.units.get(module)
    }

    /// Iterates over loaded package names in load order.
    pub fn packages(&self) -> impl Iterator<Item = &str> {
        self.loaded_packages.iter().map(String::as_str)
    }

    /// Iterates over loaded module names in load order.
    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.units.keys().map(String::as_str)
    }

    /// Returns the number of loaded packages.
    #[must_use]
    pub fn package_count(&self) -> usize {
        self.loaded_packages.len()
    }
}
