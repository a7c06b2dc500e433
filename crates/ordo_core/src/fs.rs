//! Filesystem discovery.
//!
//! [`FsDiscovery`] maps a directory tree onto packages and modules:
//!
//! | On disk | Becomes |
//! |---------|---------|
//! | the root directory | the top-level package, named after the directory |
//! | a sub-directory with a valid name | a sub-package |
//! | a regular file | a module named by its file stem |
//! | `package.toml` | the descriptor of the directory it sits in |
//!
//! Hidden entries (leading `.`) are skipped, as are symlinks and entries
//! whose names are not valid name segments. Entries are reported in
//! `read_dir` order, which is platform-dependent and not sorted.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use ordo_graph::name;
use ordo_loader::{DiscoveredPackage, Discovery, DiscoveryError, PackageDescriptor};

/// File holding a package's descriptor.
pub const DESCRIPTOR_FILE: &str = "package.toml";

/// Discovery over directories on disk.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use ordo_core::FsDiscovery;
/// use ordo_loader::Discovery;
///
/// let discovery = FsDiscovery::new().with_extension("py");
/// let tree = discovery.enumerate(Path::new("src/my_app"))?;
/// assert_eq!(tree[0].name, "my_app");
/// # Ok::<(), ordo_loader::DiscoveryError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct FsDiscovery {
    extension: Option<String>,
}

impl FsDiscovery {
    /// Creates a discovery treating every regular file as a module.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Only treats files with this extension (without the dot) as modules.
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    fn walk(
        &self,
        dir: &Path,
        qualified: String,
        excluded: &[PathBuf],
    ) -> Result<DiscoveredPackage, DiscoveryError> {
        let mut package = DiscoveredPackage::new(qualified);

        let descriptor_path = dir.join(DESCRIPTOR_FILE);
        if descriptor_path.is_file() {
            package.descriptor = Some(read_descriptor(&descriptor_path)?);
        }

        let entries = fs::read_dir(dir).map_err(|e| io_error(dir, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| io_error(dir, e))?;
            let path = entry.path();
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                tracing::debug!(path = %path.display(), "skipping non UTF-8 entry");
                continue;
            };
            if file_name.starts_with('.') || file_name == DESCRIPTOR_FILE {
                continue;
            }

            let file_type = entry.file_type().map_err(|e| io_error(&path, e))?;
            if file_type.is_dir() {
                if !name::is_valid_segment(file_name) {
                    tracing::debug!(path = %path.display(), "skipping directory with invalid name");
                    continue;
                }
                if excluded.contains(&path) {
                    tracing::debug!(path = %path.display(), "skipping directory enumerated as its own root");
                    continue;
                }
                let child = self.walk(&path, name::join(&package.name, file_name), excluded)?;
                package.packages.push(child);
            } else if file_type.is_file()
                && let Some(module) = self.module_name(&path)
            {
                package.modules.push(module.to_string());
            }
        }

        Ok(package)
    }

    fn module_name<'a>(&self, path: &'a Path) -> Option<&'a str> {
        if let Some(extension) = &self.extension
            && path.extension().and_then(OsStr::to_str) != Some(extension.as_str())
        {
            return None;
        }
        path.file_stem()
            .and_then(OsStr::to_str)
            .filter(|stem| name::is_valid_segment(stem))
    }
}

impl Discovery for FsDiscovery {
    fn enumerate(&self, root: &Path) -> Result<Vec<DiscoveredPackage>, DiscoveryError> {
        self.enumerate_excluding(root, &[])
    }

    /// Skips sub-directories that resolve to one of `excluded`. Excluded
    /// paths that do not exist, or that resolve to `root` itself, are ignored.
    fn enumerate_excluding(
        &self,
        root: &Path,
        excluded: &[&Path],
    ) -> Result<Vec<DiscoveredPackage>, DiscoveryError> {
        if !root.is_dir() {
            return Err(DiscoveryError::InvalidRoot {
                path: root.to_path_buf(),
                reason: "not a directory".to_string(),
            });
        }

        let canonical = root.canonicalize().map_err(|e| io_error(root, e))?;
        let top = canonical
            .file_name()
            .and_then(OsStr::to_str)
            .ok_or_else(|| DiscoveryError::InvalidRoot {
                path: root.to_path_buf(),
                reason: "directory has no usable name".to_string(),
            })?;
        if !name::is_valid_segment(top) {
            return Err(DiscoveryError::InvalidName {
                name: top.to_string(),
            });
        }

        let excluded: Vec<PathBuf> = excluded
            .iter()
            .filter_map(|path| path.canonicalize().ok())
            .filter(|path| *path != canonical)
            .collect();
        let package = self.walk(&canonical, top.to_string(), &excluded)?;
        tracing::debug!(
            root = %root.display(),
            packages = package.package_count(),
            "directory tree enumerated"
        );
        Ok(vec![package])
    }
}

fn read_descriptor(path: &Path) -> Result<PackageDescriptor, DiscoveryError> {
    let contents = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    toml::from_str(&contents).map_err(|e| DiscoveryError::InvalidDescriptor {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn io_error(path: &Path, source: std::io::Error) -> DiscoveryError {
    DiscoveryError::Io {
        path: path.to_path_buf(),
        source,
    }
}
