//! Run orchestration.
//!
//! The [`Orchestrator`] owns one run from discovered tree to loaded units. It
//! holds the configuration, the two external capabilities ([`Discovery`] and
//! [`Loader`]) and everything the run produces.
//!
//! # Run states
//!
//! ```text
//! Init ─► Discovering ─► Resolving ─► Loading ─► Done
//!              │              │           │
//!              └──────────────┴───────────┴────► Failed
//! ```
//!
//! `Done` and `Failed` are final. Calling
//! [`load_components`](Orchestrator::load_components) again in `Done` is a
//! no-op; in `Failed` it returns [`LoadError::RunFailed`].
//!
//! # Per-package loading
//!
//! Packages load in the order computed by the [`Scheduler`]. For each one:
//!
//! 1. [`LoadHook::before_package`] runs for every hook
//! 2. The early unit loads, if one is configured and not filtered out
//! 3. The remaining surviving modules load in name order
//! 4. The package is recorded and [`LoadHook::package_loaded`] runs
//!
//! Sub-packages are scheduled on their own and never loaded as part of their
//! parent.

use std::path::Path;
use std::time::Instant;

use hashbrown::HashMap;
use ordo_graph::{DependencyGraph, ModuleRef, PackageNode, ScheduleMode, Scheduler, name};

use crate::config::LoaderConfig;
use crate::context::Context;
use crate::discovery::{DiscoveredPackage, Discovery};
use crate::error::{DiscoveryError, LoadError};
use crate::filter::Filter;
use crate::hooks::LoadHook;
use crate::loader::Loader;
use crate::state::LoadState;

/// Emits a progress event at `info` when verbose, `debug` otherwise.
macro_rules! progress {
    ($verbose:expr, $($arg:tt)+) => {
        if $verbose {
            tracing::info!($($arg)+);
        } else {
            tracing::debug!($($arg)+);
        }
    };
}

/// Where a run currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    /// Nothing has happened yet.
    #[default]
    Init,
    /// Roots are being enumerated.
    Discovering,
    /// The graph is being built and ordered.
    Resolving,
    /// Units are being loaded.
    Loading,
    /// Every scheduled package loaded.
    Done,
    /// A fatal error stopped the run.
    Failed,
}

/// Callback invoked once per unit after its first successful load.
pub type ModuleHook<U> = Box<dyn FnMut(&str, &U, &Context)>;

/// Drives discovery, resolution and loading for one run.
///
/// # Example
///
/// ```
/// use ordo_loader::prelude::*;
///
/// let discovery = MemoryDiscovery::new().with_root(
///     "/srv",
///     [
///         DiscoveredPackage::new("api")
///             .with_descriptor(PackageDescriptor::new().with_depends(["db"]))
///             .with_module("routes"),
///         DiscoveredPackage::new("db").with_module("pool"),
///     ],
/// );
/// let loader = |_: &str| Ok::<_, std::convert::Infallible>(());
///
/// let mut orchestrator =
///     Orchestrator::new(LoaderConfig::new().with_root("/srv"), discovery, loader);
/// orchestrator.load_components()?;
///
/// assert_eq!(orchestrator.get_loaded_packages(), ["db", "api"]);
/// assert_eq!(orchestrator.state(), RunState::Done);
/// # Ok::<(), ordo_loader::LoadError>(())
/// ```
pub struct Orchestrator<D, L: Loader> {
    config: LoaderConfig,
    discovery: D,
    loader: L,
    filter: Filter,
    context: Context,
    hooks: Vec<Box<dyn LoadHook>>,
    module_hook: Option<ModuleHook<L::Unit>>,
    state: LoadState<L::Unit>,
    run_state: RunState,
    order: Vec<String>,
}

impl<D: Discovery, L: Loader> Orchestrator<D, L> {
    /// Creates an orchestrator in [`RunState::Init`].
    ///
    /// The filter and the context are seeded from `config`.
    #[must_use]
    pub fn new(config: LoaderConfig, discovery: D, loader: L) -> Self {
        let filter = Filter::new(
            config.ignored_packages.iter().cloned(),
            config.ignored_modules.iter().cloned(),
        );
        let context = config.context.clone();
        Self {
            config,
            discovery,
            loader,
            filter,
            context,
            hooks: Vec::new(),
            module_hook: None,
            state: LoadState::new(),
            run_state: RunState::Init,
            order: Vec::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Configuration
    // ─────────────────────────────────────────────────────────────────────────

    /// Sets the predicate consulted after the static ignore lists.
    #[must_use]
    pub fn with_ignored_detector<F>(mut self, detector: F) -> Self
    where
        F: Fn(&str, bool, &Context) -> bool + 'static,
    {
        self.filter.set_detector(Box::new(detector));
        self
    }

    /// Sets the callback run once per unit after its first load.
    #[must_use]
    pub fn with_module_hook<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&str, &L::Unit, &Context) + 'static,
    {
        self.module_hook = Some(Box::new(hook));
        self
    }

    /// Replaces the shared context.
    #[must_use]
    pub fn with_context(mut self, context: Context) -> Self {
        self.context = context;
        self
    }

    /// Registers a lifecycle hook. Hooks run in registration order.
    pub fn register_hook<H: LoadHook + 'static>(&mut self, hook: H) -> &mut Self {
        self.hooks.push(Box::new(hook));
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Running
    // ─────────────────────────────────────────────────────────────────────────

    /// Discovers, orders and loads every package under the configured roots.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error; the run then stays in
    /// [`RunState::Failed`]. Nothing is loaded if discovery or resolution
    /// fails. A failed orchestrator returns [`LoadError::RunFailed`].
    pub fn load_components(&mut self) -> Result<(), LoadError> {
        match self.run_state {
            RunState::Done => return Ok(()),
            RunState::Failed => return Err(LoadError::RunFailed),
            _ => {}
        }

        let started = Instant::now();
        if let Err(err) = self.run() {
            self.run_state = RunState::Failed;
            tracing::error!(error = %err, state = ?RunState::Failed, "component loading failed");
            return Err(err);
        }

        self.run_state = RunState::Done;
        progress!(
            self.config.verbose,
            packages = self.state.package_count(),
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "components loaded"
        );
        Ok(())
    }

    /// Loads one unit by its fully-qualified name, bypassing discovery.
    ///
    /// Loading an already loaded unit is a no-op. Filters do not apply here.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::LoadFailure`] if the loader fails. The run state
    /// is left untouched.
    pub fn load(&mut self, name: &str) -> Result<(), LoadError> {
        self.load_unit(name).map(|_| ())
    }

    fn run(&mut self) -> Result<(), LoadError> {
        self.run_state = RunState::Discovering;
        let mut tree = Vec::new();
        for (index, root) in self.config.roots.iter().enumerate() {
            // A root nested inside another is enumerated only as its own root.
            let other_roots: Vec<&Path> = self
                .config
                .roots
                .iter()
                .enumerate()
                .filter(|&(other, _)| other != index)
                .map(|(_, other)| other.as_path())
                .collect();
            let packages = self.discovery.enumerate_excluding(root, &other_roots)?;
            tracing::debug!(root = %root.display(), packages = packages.len(), "root enumerated");
            tree.extend(packages);
        }

        self.run_state = RunState::Resolving;
        let mut graph = DependencyGraph::new();
        let mut modules: HashMap<String, Vec<ModuleRef>> = HashMap::new();
        for package in &tree {
            self.register(package, true, &mut graph, &mut modules)?;
        }
        self.exclude_ignored_targets(&mut graph);

        let schedule = Scheduler::new().schedule(&graph)?;
        if schedule.mode() == ScheduleMode::DiscoveryOrder {
            tracing::debug!("no package declares dependencies, loading in discovery order");
        }
        self.order = schedule.into_order();

        self.run_state = RunState::Loading;
        for package in &self.order.clone() {
            let Some(node) = graph.get(package) else {
                continue;
            };
            let surviving = modules.remove(package).unwrap_or_default();
            self.load_package(node, surviving)?;
        }

        for hook in &mut self.hooks {
            hook.after_packages_loaded(&self.order, &self.context);
        }
        Ok(())
    }

    /// Registers `package` and its subtree into `graph`.
    ///
    /// `parent_enabled` is false below a disabled package. Surviving module
    /// names of enabled packages are collected into `modules`, sorted.
    fn register(
        &self,
        package: &DiscoveredPackage,
        parent_enabled: bool,
        graph: &mut DependencyGraph,
        modules: &mut HashMap<String, Vec<ModuleRef>>,
    ) -> Result<(), LoadError> {
        let package_name = package.name.as_str();
        if !name::is_valid(package_name) {
            return Err(DiscoveryError::InvalidName {
                name: package_name.to_string(),
            }
            .into());
        }

        if self.filter.is_ignored(package_name, false, &self.context) {
            tracing::debug!(package = package_name, "package ignored");
            exclude_subtree(package, graph);
            return Ok(());
        }

        let node = match &package.descriptor {
            Some(descriptor) => {
                if let Some(declared) = descriptor.name.as_deref()
                    && declared != package_name
                {
                    return Err(LoadError::DescriptorNameMismatch {
                        discovered: package_name.to_string(),
                        declared: declared.to_string(),
                    });
                }
                descriptor.to_node(package_name, parent_enabled)
            }
            None => PackageNode::new(package_name).with_enabled(parent_enabled),
        };
        let enabled = node.enabled();
        graph.add(node)?;

        if enabled {
            let mut surviving = Vec::with_capacity(package.modules.len());
            for module in &package.modules {
                if !name::is_valid_segment(module) {
                    return Err(DiscoveryError::InvalidName {
                        name: name::join(package_name, module),
                    }
                    .into());
                }
                let module = ModuleRef::new(package_name, module);
                if self.filter.is_ignored(module.qualified_name(), true, &self.context) {
                    tracing::debug!(module = module.qualified_name(), "module ignored");
                } else {
                    surviving.push(module);
                }
            }
            surviving.sort_by(|a, b| a.qualified_name().cmp(b.qualified_name()));
            surviving.dedup();
            modules.insert(package_name.to_string(), surviving);
        } else {
            tracing::debug!(package = package_name, "package disabled");
        }

        for child in &package.packages {
            self.register(child, enabled, graph, modules)?;
        }
        Ok(())
    }

    /// Marks undiscovered dependency targets the filter ignores, so they are
    /// reported as ignored rather than missing.
    fn exclude_ignored_targets(&self, graph: &mut DependencyGraph) {
        let ignored: Vec<String> = graph
            .enabled_nodes()
            .flat_map(PackageNode::depends)
            .filter(|target| !graph.contains(target) && !graph.is_excluded(target))
            .filter(|target| self.filter.is_ignored(target, false, &self.context))
            .cloned()
            .collect();
        for target in ignored {
            tracing::debug!(package = %target, "dependency target ignored");
            graph.exclude(target);
        }
    }

    fn load_package(
        &mut self,
        node: &PackageNode,
        mut modules: Vec<ModuleRef>,
    ) -> Result<(), LoadError> {
        let package = node.name();
        let module_count = modules.len();
        for hook in &mut self.hooks {
            hook.before_package(node, &self.context);
        }

        let forced = node.early_unit();
        let early = forced
            .or_else(|| self.config.base_component.as_deref().map(name::last_segment))
            .map(str::to_string);

        if let Some(early) = early {
            if let Some(position) = modules.iter().position(|module| module.short_name() == early) {
                let module = modules.remove(position);
                self.load_unit(module.qualified_name())?;
            } else if let Some(component) = forced
                && !self
                    .filter
                    .is_ignored(&name::join(package, &early), true, &self.context)
            {
                return Err(LoadError::ComponentNotFound {
                    package: package.to_string(),
                    component: component.to_string(),
                });
            }
        }

        for module in &modules {
            self.load_unit(module.qualified_name())?;
        }

        self.state.mark_package(package);
        for hook in &mut self.hooks {
            hook.package_loaded(package, &self.context);
        }
        progress!(
            self.config.verbose,
            package,
            modules = module_count,
            "package loaded"
        );
        Ok(())
    }

    /// Loads a unit unless it is already loaded. Returns true if it was loaded now.
    fn load_unit(&mut self, unit_name: &str) -> Result<bool, LoadError> {
        if self.state.is_module_loaded(unit_name) {
            return Ok(false);
        }

        let unit = self
            .loader
            .load(unit_name)
            .map_err(|err| LoadError::load_failure(unit_name, err))?;
        if let Some(hook) = self.module_hook.as_mut() {
            hook(unit_name, &unit, &self.context);
        }
        self.state.record_module(unit_name, unit);
        tracing::trace!(module = unit_name, "module loaded");
        Ok(true)
    }
}

impl<D, L: Loader> Orchestrator<D, L> {
    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the names of all fully loaded packages, in load order.
    #[must_use]
    pub fn get_loaded_packages(&self) -> Vec<String> {
        self.state.packages().map(str::to_string).collect()
    }

    /// Returns true if `package` is fully loaded.
    #[must_use]
    pub fn is_package_loaded(&self, package: &str) -> bool {
        self.state.is_package_loaded(package)
    }

    /// Returns the names of all loaded units, in load order.
    #[must_use]
    pub fn get_loaded_modules(&self) -> Vec<String> {
        self.state.modules().map(str::to_string).collect()
    }

    /// Returns true if the unit is loaded.
    #[must_use]
    pub fn is_module_loaded(&self, module: &str) -> bool {
        self.state.is_module_loaded(module)
    }

    /// Gets the unit the loader produced for `module`.
    #[must_use]
    pub fn get_unit(&self, module: &str) -> Option<&L::Unit> {
        self.state.unit(module)
    }

    /// Returns a copy of the shared context.
    #[must_use]
    pub fn get_context(&self) -> Context {
        self.context.clone()
    }

    /// Returns the current run state.
    #[must_use]
    pub fn state(&self) -> RunState {
        self.run_state
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Returns the package order of the last resolution.
    #[must_use]
    pub fn resolved_order(&self) -> &[String] {
        &self.order
    }

    /// Returns the load bookkeeping.
    #[must_use]
    pub fn load_state(&self) -> &LoadState<L::Unit> {
        &self.state
    }
}

fn exclude_subtree(package: &DiscoveredPackage, graph: &mut DependencyGraph) {
    graph.exclude(package.name.as_str());
    for child in &package.packages {
        exclude_subtree(child, graph);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::MemoryDiscovery;
    use crate::descriptor::PackageDescriptor;
    use core::convert::Infallible;

    fn orchestrator(
        packages: impl IntoIterator<Item = DiscoveredPackage>,
    ) -> Orchestrator<MemoryDiscovery, impl Loader<Unit = String>> {
        let discovery = MemoryDiscovery::new().with_root("/root", packages);
        let loader = |name: &str| Ok::<_, Infallible>(name.to_uppercase());
        Orchestrator::new(
            LoaderConfig::new().with_root("/root").with_verbose(false),
            discovery,
            loader,
        )
    }

    #[test]
    fn starts_in_init() {
        let orchestrator = orchestrator(Vec::new());
        assert_eq!(orchestrator.state(), RunState::Init);
        assert!(orchestrator.get_loaded_packages().is_empty());
    }

    #[test]
    fn units_are_retained() {
        let mut orchestrator = orchestrator([DiscoveredPackage::new("app").with_module("api")]);
        orchestrator.load_components().unwrap();
        assert_eq!(orchestrator.get_unit("app.api").map(String::as_str), Some("APP.API"));
        assert_eq!(orchestrator.resolved_order(), ["app"]);
    }

    #[test]
    fn base_component_loads_first() {
        let discovery = MemoryDiscovery::new().with_root(
            "/root",
            [DiscoveredPackage::new("app")
                .with_module("api")
                .with_module("manager")
                .with_module("db")],
        );
        let loader = |_: &str| Ok::<_, Infallible>(());
        let config = LoaderConfig::new()
            .with_root("/root")
            .with_base_component("manager")
            .with_verbose(false);
        let mut orchestrator = Orchestrator::new(config, discovery, loader);
        orchestrator.load_components().unwrap();
        assert_eq!(
            orchestrator.get_loaded_modules(),
            ["app.manager", "app.api", "app.db"]
        );
    }

    #[test]
    fn missing_base_component_is_skipped() {
        let discovery = MemoryDiscovery::new()
            .with_root("/root", [DiscoveredPackage::new("app").with_module("api")]);
        let loader = |_: &str| Ok::<_, Infallible>(());
        let config = LoaderConfig::new()
            .with_root("/root")
            .with_base_component("manager")
            .with_verbose(false);
        let mut orchestrator = Orchestrator::new(config, discovery, loader);
        orchestrator.load_components().unwrap();
        assert!(orchestrator.is_package_loaded("app"));
    }

    #[test]
    fn descriptor_name_must_match_location() {
        let mut orchestrator = orchestrator([DiscoveredPackage::new("app")
            .with_descriptor(PackageDescriptor::new().with_name("other"))]);
        let err = orchestrator.load_components().unwrap_err();
        assert!(matches!(err, LoadError::DescriptorNameMismatch { .. }));
        assert_eq!(orchestrator.state(), RunState::Failed);
    }

    #[test]
    fn invalid_module_name_is_rejected() {
        let mut orchestrator = orchestrator([DiscoveredPackage::new("app").with_module("a.b")]);
        let err = orchestrator.load_components().unwrap_err();
        assert!(matches!(
            err,
            LoadError::Discovery(DiscoveryError::InvalidName { .. })
        ));
    }

    #[test]
    fn discovery_failure_fails_the_run() {
        let loader = |_: &str| Ok::<_, Infallible>(());
        let config = LoaderConfig::new().with_root("/missing");
        let mut orchestrator = Orchestrator::new(config, MemoryDiscovery::new(), loader);
        assert!(matches!(
            orchestrator.load_components(),
            Err(LoadError::Discovery(DiscoveryError::InvalidRoot { .. }))
        ));
        assert_eq!(orchestrator.state(), RunState::Failed);
        assert!(matches!(
            orchestrator.load_components(),
            Err(LoadError::RunFailed)
        ));
    }

    #[test]
    fn context_is_returned_as_copy() {
        let orchestrator = orchestrator(Vec::new()).with_context(Context::new().with("env", "test"));
        let mut copy = orchestrator.get_context();
        copy.insert("env", "changed");
        assert_eq!(
            orchestrator.get_context().get_as::<String>("env").as_deref(),
            Some("test")
        );
    }
}
