//! Dependency-ordered loading.
//!
//! Every candidate of a scan starts out [`NodeState::Pending`]. Candidates are
//! taken as roots in the order given; from each root the resolver walks the
//! declared dependencies depth first with an explicit stack, so that every
//! module is loaded (and its init hook invoked) only after all of its
//! pending dependencies. A node is marked [`NodeState::InProgress`] while it
//! sits on the stack; reaching such a node again through a dependency edge
//! means the edge closes a cycle.

use std::collections::HashMap ;
use nonempty_collections::NEVec ;
use tracing::{ debug, info, warn };

use crate::ModulePath ;
use crate::dependencies::DependencySource ;
use crate::hooks::{ HookId, HookInvocationSet, HookNames, HookPhase };
use crate::load_error::{ LoadError, ModuleCycle };
use crate::loader::{ ModuleLoader, LoadedModule };
use crate::registry::ModuleRegistry ;
use crate::utils::PartialSuccess ;



#[derive( Debug, Clone, Copy, PartialEq, Eq )]
enum NodeState {
    /// Discovered, not yet visited.
    Pending,
    /// On the resolution stack; its dependencies are being loaded.
    InProgress,
    /// Loaded and registered.
    Done,
    /// Failed to load, or part of a dependency cycle.
    Failed,
}

/// A dependency edge that pointed at no module of the scan or the registry.
#[derive( Debug, Clone, PartialEq, Eq )]
pub struct UnresolvedDependency {
    /// The module declaring the dependency.
    pub module: ModulePath,
    /// The identifier as declared.
    pub identifier: String,
    /// Where the identifier was looked for.
    pub resolved: ModulePath,
}

/// What the load phase of a scan did, in order.
#[derive( Debug, Default )]
pub(crate) struct LoadOutcome {
    pub loaded: Vec<ModulePath>,
    pub init_invoked: Vec<ModulePath>,
    pub unresolved: Vec<UnresolvedDependency>,
}

struct Frame {
    module: ModulePath,
    dependencies: std::vec::IntoIter<( String, ModulePath )>,
    in_cycle: bool,
}

/// Borrowed view of a [`LoaderContext`]( crate::LoaderContext ) for the
/// duration of one load phase.
pub(crate) struct Resolver<'a, L: ModuleLoader, D: DependencySource> {
    pub loader: &'a L,
    pub dependencies: &'a D,
    pub hook_names: &'a HookNames,
    pub registry: &'a mut ModuleRegistry<L::Module>,
    pub init_hooks: &'a mut HookInvocationSet,
}

struct Pass {
    states: HashMap<ModulePath, NodeState>,
    outcome: LoadOutcome,
    errors: Vec<LoadError>,
}

impl<L: ModuleLoader, D: DependencySource> Resolver<'_, L, D> {

    /// Loads every candidate exactly once, dependencies first.
    ///
    /// Candidates already in the registry count as loaded.
    pub fn load_all( mut self, candidates: impl IntoIterator<Item = ModulePath> ) -> PartialSuccess<LoadOutcome, LoadError> {

        let candidates = candidates.into_iter().collect::<Vec<_>>();

        let mut pass = Pass {
            states: candidates.iter()
                .map(| candidate | ( candidate.clone(), match self.registry.contains( candidate ) {
                    true => NodeState::Done,
                    false => NodeState::Pending,
                }))
                .collect(),
            outcome: LoadOutcome::default(),
            errors: Vec::new(),
        };

        for candidate in candidates {
            if pass.states.get( &candidate ) == Some( &NodeState::Pending ) {
                self.resolve_and_load( &mut pass, candidate );
            }
        }

        ( pass.outcome, pass.errors )

    }

    fn resolve_and_load( &mut self, pass: &mut Pass, root: ModulePath ) {

        let mut stack = vec![ self.enter( pass, root ) ];

        while let Some( frame ) = stack.last_mut() {

            let Some(( identifier, dependency )) = frame.dependencies.next() else {
                if let Some( frame ) = stack.pop() { self.finish( pass, frame ) }
                continue ;
            };

            match pass.states.get( &dependency ).copied() {
                Some( NodeState::Pending ) => {
                    let frame = self.enter( pass, dependency );
                    stack.push( frame );
                },
                Some( NodeState::InProgress ) => close_cycle( pass, &mut stack, &dependency ),
                Some( NodeState::Done | NodeState::Failed ) =>
                    debug!( "{} -> {}: already considered", frame.module.stem(), dependency.stem() ),
                None if self.registry.contains( &dependency ) =>
                    debug!( "{} -> {}: loaded by an earlier scan", frame.module.stem(), dependency.stem() ),
                None => {
                    debug!( "{} -> {}: not a known module, skipping", frame.module.stem(), identifier );
                    pass.outcome.unresolved.push( UnresolvedDependency {
                        module: frame.module.clone(),
                        identifier,
                        resolved: dependency,
                    });
                },
            }

        }

    }

    fn enter( &self, pass: &mut Pass, module: ModulePath ) -> Frame {

        pass.states.insert( module.clone(), NodeState::InProgress );

        let dependencies = match self.dependencies.dependencies( &module ) {
            Ok( identifiers ) => identifiers.into_iter()
                .map(| identifier | {
                    let resolved = module.resolve_dependency( &identifier );
                    ( identifier, resolved )
                })
                .collect::<Vec<_>>(),
            Err( err ) => {
                let err = LoadError::DependencyExtraction { module: module.clone(), source: Box::new( err ) };
                warn!( "{}", err );
                pass.errors.push( err );
                Vec::with_capacity( 0 )
            },
        };

        Frame { module, dependencies: dependencies.into_iter(), in_cycle: false }

    }

    fn finish( &mut self, pass: &mut Pass, frame: Frame ) {

        if frame.in_cycle {
            pass.states.insert( frame.module, NodeState::Failed );
            return ;
        }

        info!( "Loading module: {}", frame.module.stem() );
        let module = match self.loader.load( &frame.module ) {
            Ok( module ) => module,
            Err( err ) => {
                let err = LoadError::LoadFailed { module: frame.module.clone(), source: Box::new( err ) };
                warn!( "{}", err );
                pass.errors.push( err );
                pass.states.insert( frame.module, NodeState::Failed );
                return ;
            },
        };

        pass.states.insert( frame.module.clone(), NodeState::Done );
        pass.outcome.loaded.push( frame.module.clone() );

        let registered = self.registry.register( frame.module, module );
        let Some( hook ) = registered.module().hook( self.hook_names.symbol( HookPhase::Init )) else { return };

        // SAFETY: the hook was resolved from a module that stays registered,
        // and therefore mapped, for the rest of the process.
        match unsafe { self.init_hooks.invoke_once( hook ) } {
            true => {
                debug!( "Invoked {} hook of {} at {}", HookPhase::Init, registered.path().stem(), HookId::from( hook ));
                pass.outcome.init_invoked.push( registered.path().clone() );
            },
            false => debug!( "{} hook of {} at {} already invoked through another module", HookPhase::Init, registered.path().stem(), HookId::from( hook )),
        }

    }

}

/// Marks every module on the stack from `entry` upwards as a cycle member and
/// reports the cycle once. An edge closing a cycle whose members are all
/// already marked (a repeated dependency) reports nothing.
fn close_cycle( pass: &mut Pass, stack: &mut [Frame], entry: &ModulePath ) {

    let Some( start ) = stack.iter().position(| frame | &frame.module == entry ) else { return };
    if stack[start..].iter().all(| frame | frame.in_cycle ) {
        debug!( "Cycle through {} already reported", entry.stem() );
        return ;
    }

    let Some(( first, rest )) = stack[start..].split_first_mut() else { return };
    first.in_cycle = true ;
    let mut members = NEVec::new( first.module.clone() );
    for frame in rest {
        frame.in_cycle = true ;
        members.push( frame.module.clone() );
    }

    let err = LoadError::CycleDetected( ModuleCycle::new( members ));
    warn!( "{}", err );
    pass.errors.push( err );

}
