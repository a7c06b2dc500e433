//! The loading capability.
//!
//! How a unit is actually brought to life is up to the host. The orchestrator
//! only calls [`Loader::load`] at most once per fully-qualified name and treats
//! any error as fatal.

/// Loads a single unit by its fully-qualified name.
///
/// Any `FnMut(&str) -> Result<U, E>` closure is a loader:
///
/// ```
/// use ordo_loader::Loader;
///
/// let mut seen = Vec::new();
/// let mut loader = |name: &str| {
///     seen.push(name.to_string());
///     Ok::<_, std::io::Error>(())
/// };
/// loader.load("app.api").unwrap();
/// drop(loader);
/// assert_eq!(seen, ["app.api"]);
/// ```
pub trait Loader {
    /// What a successful load produces.
    type Unit;

    /// The failure type.
    type Error: core::error::Error + Send + Sync + 'static;

    /// Loads the unit named `name`.
    ///
    /// # Errors
    ///
    /// Returns the implementation's error if the unit cannot be loaded.
    fn load(&mut self, name: &str) -> Result<Self::Unit, Self::Error>;
}

impl<F, U, E> Loader for F
where
    F: FnMut(&str) -> Result<U, E>,
    E: core::error::Error + Send + Sync + 'static,
{
    type Unit = U;
    type Error = E;

    fn load(&mut self, name: &str) -> Result<U, E> {
        self(name)
    }
}
