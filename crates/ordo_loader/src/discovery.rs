//! Discovery contract.
//!
//! Discovery turns a root location into a tree of [`DiscoveredPackage`]s. The
//! orchestrator never touches the filesystem itself; it only consumes the
//! tree, in the order the source returned it.

use std::path::{Path, PathBuf};

use hashbrown::HashMap;

use crate::descriptor::PackageDescriptor;
use crate::error::DiscoveryError;

/// A package found by discovery, with its direct modules and sub-packages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredPackage {
    /// Fully-qualified name.
    pub name: String,
    /// Declared metadata, if the package has a descriptor.
    pub descriptor: Option<PackageDescriptor>,
    /// Unqualified names of modules directly inside the package.
    pub modules: Vec<String>,
    /// Direct sub-packages.
    pub packages: Vec<DiscoveredPackage>,
}

impl DiscoveredPackage {
    /// Creates an empty package without a descriptor.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descriptor: None,
            modules: Vec::new(),
            packages: Vec::new(),
        }
    }

    /// Sets the descriptor.
    #[must_use]
    pub fn with_descriptor(mut self, descriptor: PackageDescriptor) -> Self {
        self.descriptor = Some(descriptor);
        self
    }

    /// Adds a module by its unqualified name.
    #[must_use]
    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.modules.push(module.into());
        self
    }

    /// Adds a sub-package. Its name must already be fully qualified.
    #[must_use]
    pub fn with_package(mut self, package: DiscoveredPackage) -> Self {
        self.packages.push(package);
        self
    }

    /// Counts this package and every package below it.
    #[must_use]
    pub fn package_count(&self) -> usize {
        1 + self
            .packages
            .iter()
            .map(DiscoveredPackage::package_count)
            .sum::<usize>()
    }
}

/// Enumerates the package tree under a root.
///
/// Implementations return entries in whatever order the underlying source
/// yields them; no sorting is expected.
pub trait Discovery {
    /// Enumerates the top-level packages found at `root`.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscoveryError`] if the root is invalid or cannot be read.
    fn enumerate(&self, root: &Path) -> Result<Vec<DiscoveredPackage>, DiscoveryError>;

    /// Enumerates `root` without descending into any of `excluded`.
    ///
    /// Used when several roots are configured and one lies inside another:
    /// the inner root is enumerated on its own and must not also show up as
    /// a sub-package of the outer one. Sources without a notion of nested
    /// locations keep the default, which ignores `excluded`.
    ///
    /// # Errors
    ///
    /// Same as [`enumerate`](Discovery::enumerate).
    fn enumerate_excluding(
        &self,
        root: &Path,
        excluded: &[&Path],
    ) -> Result<Vec<DiscoveredPackage>, DiscoveryError> {
        let _ = excluded;
        self.enumerate(root)
    }
}

impl<D: Discovery + ?Sized> Discovery for &D {
    fn enumerate(&self, root: &Path) -> Result<Vec<DiscoveredPackage>, DiscoveryError> {
        (**self).enumerate(root)
    }

    fn enumerate_excluding(
        &self,
        root: &Path,
        excluded: &[&Path],
    ) -> Result<Vec<DiscoveredPackage>, DiscoveryError> {
        (**self).enumerate_excluding(root, excluded)
    }
}

/// Discovery over trees built in memory.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use ordo_loader::{DiscoveredPackage, Discovery, MemoryDiscovery};
///
/// let discovery = MemoryDiscovery::new()
///     .with_root("/srv/app", [DiscoveredPackage::new("app").with_module("api")]);
///
/// let tree = discovery.enumerate(Path::new("/srv/app"))?;
/// assert_eq!(tree[0].modules, ["api"]);
/// assert!(discovery.enumerate(Path::new("/srv/other")).is_err());
/// # Ok::<(), ordo_loader::DiscoveryError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryDiscovery {
    roots: HashMap<PathBuf, Vec<DiscoveredPackage>>,
}

impl MemoryDiscovery {
    /// Creates a discovery with no roots.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the packages found at `root`.
    #[must_use]
    pub fn with_root(
        mut self,
        root: impl Into<PathBuf>,
        packages: impl IntoIterator<Item = DiscoveredPackage>,
    ) -> Self {
        self.roots
            .entry(root.into())
            .or_default()
            .extend(packages);
        self
    }
}

impl Discovery for MemoryDiscovery {
    fn enumerate(&self, root: &Path) -> Result<Vec<DiscoveredPackage>, DiscoveryError> {
        self.roots
            .get(root)
            .cloned()
            .ok_or_else(|| DiscoveryError::InvalidRoot {
                path: root.to_path_buf(),
                reason: "no tree registered for this root".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_count_includes_descendants() {
        let tree = DiscoveredPackage::new("app")
            .with_package(DiscoveredPackage::new("app.api").with_package(DiscoveredPackage::new("app.api.v1")))
            .with_package(DiscoveredPackage::new("app.db"));
        assert_eq!(tree.package_count(), 4);
    }

    #[test]
    fn roots_accumulate() {
        let discovery = MemoryDiscovery::new()
            .with_root("/a", [DiscoveredPackage::new("one")])
            .with_root("/a", [DiscoveredPackage::new("two")]);
        let names: Vec<_> = discovery
            .enumerate(Path::new("/a"))
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, ["one", "two"]);
    }

    #[test]
    fn unknown_root_is_invalid() {
        let err = MemoryDiscovery::new().enumerate(Path::new("/nowhere")).unwrap_err();
        assert!(matches!(err, DiscoveryError::InvalidRoot { .. }));
    }
}
