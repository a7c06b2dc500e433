//! Ignore filters.
//!
//! A [`Filter`] decides whether a package or module is excluded from loading.
//! It combines two static lists with an optional user predicate:
//!
//! | Input | Matches when |
//! |-------|--------------|
//! | package | an `ignored_packages` pattern matches its leading segments (the package or any ancestor; `*` matches one segment) |
//! | module | an `ignored_modules` pattern matches its trailing segments (`models`, `api.models` or the full name) |
//! | either | the predicate returns `true` |

use core::fmt;

use ordo_graph::name;

use crate::context::Context;

/// Predicate deciding whether a name is ignored.
///
/// Called with the fully-qualified name, whether it names a module, and the
/// run [`Context`].
pub type IgnoredDetector = Box<dyn Fn(&str, bool, &Context) -> bool>;

/// Decides which packages and modules are excluded from loading.
///
/// # Example
///
/// ```
/// use ordo_loader::{Context, Filter};
///
/// let filter = Filter::new(["app.legacy"], ["models"]);
/// let ctx = Context::new();
///
/// assert!(filter.is_ignored("app.legacy.v1", false, &ctx));
/// assert!(filter.is_ignored("app.billing.models", true, &ctx));
/// assert!(!filter.is_ignored("app.billing", false, &ctx));
/// ```
#[derive(Default)]
pub struct Filter {
    ignored_packages: Vec<String>,
    ignored_modules: Vec<String>,
    detector: Option<IgnoredDetector>,
}

impl Filter {
    /// Creates a filter from the two static lists.
    #[must_use]
    pub fn new<P, M>(
        ignored_packages: impl IntoIterator<Item = P>,
        ignored_modules: impl IntoIterator<Item = M>,
    ) -> Self
    where
        P: Into<String>,
        M: Into<String>,
    {
        Self {
            ignored_packages: ignored_packages.into_iter().map(Into::into).collect(),
            ignored_modules: ignored_modules.into_iter().map(Into::into).collect(),
            detector: None,
        }
    }

    /// Sets the user predicate consulted after the static lists.
    #[must_use]
    pub fn with_detector<F>(mut self, detector: F) -> Self
    where
        F: Fn(&str, bool, &Context) -> bool + 'static,
    {
        self.detector = Some(Box::new(detector));
        self
    }

    /// Replaces the user predicate.
    pub fn set_detector(&mut self, detector: IgnoredDetector) {
        self.detector = Some(detector);
    }

    /// Returns true if `name` must not be loaded.
    ///
    /// `is_module` selects which static list applies. The predicate, if any,
    /// is only consulted when the static lists did not match.
    #[must_use]
    pub fn is_ignored(&self, name: &str, is_module: bool, context: &Context) -> bool {
        let listed = if is_module {
            self.is_listed_module(name)
        } else {
            self.is_listed_package(name)
        };

        listed
            || self
                .detector
                .as_ref()
                .is_some_and(|detect| detect(name, is_module, context))
    }

    /// Returns true if `name` or one of its ancestors is in the package list.
    #[must_use]
    pub fn is_listed_package(&self, package: &str) -> bool {
        self.ignored_packages
            .iter()
            .any(|pattern| name::matches_prefix(pattern, package))
    }

    /// Returns true if the module list matches `module`.
    #[must_use]
    pub fn is_listed_module(&self, module: &str) -> bool {
        self.ignored_modules
            .iter()
            .any(|pattern| name::matches_suffix(pattern, module))
    }

    /// Returns the ignored package patterns.
    #[must_use]
    pub fn ignored_packages(&self) -> &[String] {
        &self.ignored_packages
    }

    /// Returns the ignored module patterns.
    #[must_use]
    pub fn ignored_modules(&self) -> &[String] {
        &self.ignored_modules
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("ignored_packages", &self.ignored_packages)
            .field("ignored_modules", &self.ignored_modules)
            .field("detector", &self.detector.is_some())
            .finish()
    }
}
