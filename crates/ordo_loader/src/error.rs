//! Error types for discovery and loading.

use std::path::PathBuf;

use ordo_graph::GraphError;

/// Boxed error returned by a [`Loader`](crate::Loader).
pub type BoxedError = Box<dyn core::error::Error + Send + Sync + 'static>;

/// Errors raised while enumerating a root.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    /// The root does not exist or is not a package location.
    #[error("invalid discovery root '{}': {reason}", path.display())]
    InvalidRoot {
        /// The offending root.
        path: PathBuf,
        /// What is wrong with it.
        reason: String,
    },

    /// Reading the tree failed.
    #[error("failed to read '{}'", path.display())]
    Io {
        /// The path being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A package descriptor could not be parsed.
    #[error("invalid package descriptor '{}': {message}", path.display())]
    InvalidDescriptor {
        /// The descriptor file.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// A discovered entry does not form a valid dotted name.
    #[error("'{name}' is not a valid package or module name")]
    InvalidName {
        /// The rejected name.
        name: String,
    },
}

/// Errors raised by an [`Orchestrator`](crate::Orchestrator) run.
///
/// Every variant is fatal: the run moves to
/// [`RunState::Failed`](crate::RunState::Failed) and nothing more is loaded.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Enumerating a root failed.
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    /// The dependency graph could not be built or ordered.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// The loader reported a failure for a unit.
    #[error("failed to load '{unit}'")]
    LoadFailure {
        /// Fully-qualified name of the unit.
        unit: String,
        /// The loader's error.
        #[source]
        source: BoxedError,
    },

    /// A package forces a component module that it does not contain.
    #[error("component module '{component}' of package '{package}' was not found")]
    ComponentNotFound {
        /// The package declaring the component.
        package: String,
        /// The forced component name.
        component: String,
    },

    /// A descriptor declares a name other than the package's location.
    #[error("descriptor declares name '{declared}' but the package was discovered as '{discovered}'")]
    DescriptorNameMismatch {
        /// Name derived from the tree.
        discovered: String,
        /// Name written in the descriptor.
        declared: String,
    },

    /// A previous run failed; the orchestrator cannot be reused.
    #[error("a previous run failed; create a new orchestrator to retry")]
    RunFailed,
}

impl LoadError {
    /// Wraps a loader error for `unit`.
    pub fn load_failure(unit: impl Into<String>, source: impl Into<BoxedError>) -> Self {
        Self::LoadFailure {
            unit: unit.into(),
            source: source.into(),
        }
    }
}
