//! The loader context.
//!
//! A [`LoaderContext`] owns everything that must outlive a single scan: the
//! registry of loaded modules and the two sets of already-invoked hooks. It
//! is created once per process and every scan root is loaded through it, so
//! a hook is never invoked twice even if its module is reachable from more
//! than one root.

use std::path::{ Path, PathBuf };
use itertools::Itertools ;
use pipe_trait::Pipe ;
use tracing::{ debug, info };

use crate::ModulePath ;
use crate::config::LoaderConfig ;
use crate::dependencies::DependencySource ;
use crate::discovery::scan_modules ;
use crate::hooks::{ HookId, HookInvocationSet, HookNames, HookPhase };
use crate::load_error::LoadError ;
use crate::loader::{ ModuleLoader, LoadedModule };
use crate::registry::ModuleRegistry ;
use crate::resolver::{ Resolver, UnresolvedDependency };
use crate::utils::{ PartialSuccess, Merge };



/// What one scan did.
#[derive( Debug, Default )]
pub struct ScanReport {
    /// The directory scanned, if the candidates came from a directory.
    pub root: Option<PathBuf>,
    /// Number of distinct candidates considered.
    pub discovered: usize,
    /// Modules loaded by this scan, in load order.
    pub loaded: Vec<ModulePath>,
    /// Modules whose init hook ran, in invocation order.
    pub init_invoked: Vec<ModulePath>,
    /// Modules whose exec hook ran, in invocation order.
    pub exec_invoked: Vec<ModulePath>,
    /// Dependency edges that matched no known module and were skipped.
    pub unresolved: Vec<UnresolvedDependency>,
}

/// Loads modules, dependencies first, and dispatches their lifecycle hooks.
///
/// # Type Parameters
/// - `L`: [`ModuleLoader`] mapping modules into the process
/// - `D`: [`DependencySource`] providing each module's declared dependencies
pub struct LoaderContext<L: ModuleLoader, D: DependencySource> {
    loader: L,
    dependencies: D,
    hook_names: HookNames,
    extension: String,
    registry: ModuleRegistry<L::Module>,
    init_hooks: HookInvocationSet,
    exec_hooks: HookInvocationSet,
}

impl<L: ModuleLoader, D: DependencySource> LoaderContext<L, D> {

    /// Creates a context with the default hook names and the platform's
    /// shared library extension.
    pub fn new( loader: L, dependencies: D ) -> Self {
        Self {
            loader,
            dependencies,
            hook_names: HookNames::default(),
            extension: std::env::consts::DLL_EXTENSION.to_string(),
            registry: ModuleRegistry::new(),
            init_hooks: HookInvocationSet::new(),
            exec_hooks: HookInvocationSet::new(),
        }
    }

    pub fn from_config( loader: L, dependencies: D, config: &LoaderConfig ) -> Self {
        Self::new( loader, dependencies )
            .with_hook_names( config.hooks.clone() )
            .with_extension( config.extension.clone() )
    }

    pub fn with_hook_names( mut self, hook_names: HookNames ) -> Self {
        self.hook_names = hook_names ;
        self
    }

    /// Sets the file extension (without the dot) that marks a module.
    pub fn with_extension( mut self, extension: impl Into<String> ) -> Self {
        self.extension = extension.into();
        self
    }

    /// Scans `root` and loads everything found there.
    ///
    /// Does nothing if `root` does not exist or is not a directory. Otherwise
    /// runs the load phase over the discovered modules and then the exec
    /// phase over the whole registry.
    ///
    /// # Partial Success
    /// Per-module failures never abort the scan; they are returned alongside
    /// the report. See [`LoadError`].
    pub fn load_directory( &mut self, root: &Path ) -> PartialSuccess<ScanReport, LoadError> {

        if !root.is_dir() {
            debug!( "Skipping scan root '{}': not a directory", root.display() );
            return ( ScanReport { root: Some( root.to_path_buf() ), ..ScanReport::default() }, Vec::with_capacity( 0 ));
        }

        info!( "Loading modules from '{}'", root.display() );
        let ( candidates, discovery_errors ) = scan_modules( root, &self.extension );
        let discovery_errors = discovery_errors.into_iter().map( LoadError::from ).collect::<Vec<_>>();

        self.load_candidates( candidates )
            .pipe(|( report, errors )| ( ScanReport { root: Some( root.to_path_buf() ), ..report }, discovery_errors.merge_all( errors )))

    }

    /// Loads the given candidates, in the given order as far as dependencies
    /// allow, then runs the exec phase.
    pub fn load_candidates( &mut self, candidates: impl IntoIterator<Item = ModulePath> ) -> PartialSuccess<ScanReport, LoadError> {

        let candidates = candidates.into_iter().unique().collect::<Vec<_>>();
        let discovered = candidates.len();

        let ( outcome, errors ) = Resolver {
            loader: &self.loader,
            dependencies: &self.dependencies,
            hook_names: &self.hook_names,
            registry: &mut self.registry,
            init_hooks: &mut self.init_hooks,
        }.load_all( candidates );

        let exec_invoked = self.dispatch_exec();

        let report = ScanReport {
            root: None,
            discovered,
            loaded: outcome.loaded,
            init_invoked: outcome.init_invoked,
            exec_invoked,
            unresolved: outcome.unresolved,
        };

        info!( "Loaded {} of {} modules", report.loaded.len(), report.discovered );
        ( report, errors )

    }

    /// Invokes the exec hook of every registered module, in load order,
    /// skipping entry points that already ran.
    fn dispatch_exec( &mut self ) -> Vec<ModulePath> {

        let symbol = self.hook_names.symbol( HookPhase::Exec );
        let mut invoked = Vec::new();

        for registered in &self.registry {
            let Some( hook ) = registered.module().hook( symbol ) else { continue };
            // SAFETY: registered modules are never unloaded, so the hook is still mapped.
            match unsafe { self.exec_hooks.invoke_once( hook ) } {
                true => {
                    debug!( "Invoked {} hook of {} at {}", HookPhase::Exec, registered.path().stem(), HookId::from( hook ));
                    invoked.push( registered.path().clone() );
                },
                false => debug!( "{} hook of {} at {} already invoked", HookPhase::Exec, registered.path().stem(), HookId::from( hook )),
            }
        }

        invoked

    }

    pub fn registry( &self ) -> &ModuleRegistry<L::Module> { &self.registry }

    pub fn init_hooks( &self ) -> &HookInvocationSet { &self.init_hooks }

    pub fn exec_hooks( &self ) -> &HookInvocationSet { &self.exec_hooks }

    pub fn hook_names( &self ) -> &HookNames { &self.hook_names }

    pub fn extension( &self ) -> &str { &self.extension }

}
