//! Lifecycle hooks.
//!
//! A [`LoadHook`] observes a run without taking part in ordering decisions.
//! Every method has a no-op default, so a hook only implements what it needs.
//!
//! | Method | Called |
//! |--------|--------|
//! | [`before_package`](LoadHook::before_package) | right before a package's modules load |
//! | [`package_loaded`](LoadHook::package_loaded) | after a package is fully loaded |
//! | [`after_packages_loaded`](LoadHook::after_packages_loaded) | once, after the last package |
//!
//! Hooks run in registration order. A panicking hook aborts the run.

use ordo_graph::PackageNode;

use crate::context::Context;

/// Observer of a load run.
///
/// # Example
///
/// ```
/// use ordo_loader::{Context, LoadHook};
///
/// struct Announce;
///
/// impl LoadHook for Announce {
///     fn package_loaded(&mut self, package: &str, _context: &Context) {
///         println!("ready: {package}");
///     }
/// }
/// ```
pub trait LoadHook {
    /// Called before any module of `package` is loaded.
    ///
    /// This is the place to load per-package settings into the context's
    /// consumers.
    fn before_package(&mut self, package: &PackageNode, context: &Context) {
        let _ = (package, context);
    }

    /// Called after every surviving module of `package` has loaded.
    fn package_loaded(&mut self, package: &str, context: &Context) {
        let _ = (package, context);
    }

    /// Called once after every scheduled package has loaded.
    fn after_packages_loaded(&mut self, packages: &[String], context: &Context) {
        let _ = (packages, context);
    }
}
