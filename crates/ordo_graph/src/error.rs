//! Graph construction and resolution errors.
//!
//! Every variant is fatal. Resolution fails on the first problem found,
//! before anything is loaded.

use core::fmt;

/// Why a declared dependency could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnresolvedReason {
    /// No package with that name was discovered.
    Missing,
    /// The package exists but it (or one of its ancestors) is disabled.
    Disabled,
    /// The package was excluded by ignore filters.
    Ignored,
}

impl fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "does not exist"),
            Self::Disabled => write!(f, "is disabled"),
            Self::Ignored => write!(f, "is ignored by filters"),
        }
    }
}

/// Errors raised while building or resolving a [`DependencyGraph`](crate::DependencyGraph).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// Two packages share the same fully-qualified name.
    #[error("package '{name}' is declared more than once")]
    DuplicateName {
        /// The duplicated name.
        name: String,
    },

    /// A declared dependency is absent, disabled or ignored.
    #[error("dependency '{target}' required by package '{requester}' {reason}")]
    UnresolvedDependency {
        /// The package declaring the dependency.
        requester: String,
        /// The dependency that could not be resolved.
        target: String,
        /// Why it could not be resolved.
        reason: UnresolvedReason,
    },

    /// A package lists itself as a dependency.
    #[error("package '{name}' depends on itself")]
    SelfDependency {
        /// The offending package.
        name: String,
    },

    /// A package depends on one of its own sub-packages.
    #[error("package '{package}' depends on its own sub-package '{child}'")]
    SubPackageDependency {
        /// The parent package declaring the dependency.
        package: String,
        /// The sub-package it depends on.
        child: String,
    },

    /// The dependency relation contains a cycle.
    ///
    /// `path` starts and ends with the same name, e.g. `[a, b, c, a]` where
    /// `a` depends on `b`, `b` on `c` and `c` on `a`.
    #[error("circular dependency detected: {}", path.join(" -> "))]
    CyclicDependency {
        /// The names forming the cycle.
        path: Vec<String>,
    },
}
