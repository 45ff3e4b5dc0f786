use nonempty_collections::NEVec ;
use thiserror::Error ;

use crate::ModulePath ;
use crate::discovery::DiscoveryError ;



type BoxedError = Box<dyn std::error::Error + Send + Sync> ;

/// Failures absorbed while scanning and loading a directory.
///
/// None of these stop a scan. Each one affects at most the module it names
/// (or, for a cycle, the modules forming the cycle); every other candidate
/// is still loaded. They are returned alongside the [`ScanReport`]( crate::ScanReport )
/// as the error half of a [`PartialSuccess`]( crate::PartialSuccess ).
#[derive( Debug, Error )]
pub enum LoadError {

    /// Part of the scan root could not be walked.
    #[error( "Discovery failure: {0}" )]
    Discovery( #[from] DiscoveryError ),

    /// The dependency list of a module could not be read. The module is
    /// treated as having no dependencies and is still loaded.
    #[error( "Failed to read dependencies of {}: {source}", module.stem() )]
    DependencyExtraction { module: ModulePath, #[source] source: BoxedError },

    /// The dynamic loader rejected the module. It is left out of the registry.
    #[error( "Failed to load {}: {source}", module.stem() )]
    LoadFailed { module: ModulePath, #[source] source: BoxedError },

    /// The modules depend on each other in a loop. None of them is loaded.
    #[error( "Dependency cycle detected: {0}" )]
    CycleDetected( ModuleCycle ),

}

impl LoadError {
    /// The module a per-module failure concerns.
    pub fn module( &self ) -> Option<&ModulePath> {
        match self {
            Self::DependencyExtraction { module, .. } | Self::LoadFailed { module, .. } => Some( module ),
            Self::CycleDetected( cycle ) => Some( cycle.entry() ),
            Self::Discovery( _ ) => None,
        }
    }
}

/// Modules that (transitively) depend on themselves, in dependency order:
/// each member depends on the next, and the last depends on the first.
#[derive( Debug, Clone )]
pub struct ModuleCycle( NEVec<ModulePath> );

impl ModuleCycle {

    pub(crate) fn new( members: NEVec<ModulePath> ) -> Self { Self( members ) }

    /// The member through which the cycle was entered.
    pub fn entry( &self ) -> &ModulePath { self.0.first() }

    pub fn contains( &self, path: &ModulePath ) -> bool {
        self.members().any(| member | member == path )
    }

    pub fn members( &self ) -> impl Iterator<Item = &ModulePath> { self.0.iter().into_iter() }

    pub fn member_count( &self ) -> usize { self.members().count() }

}

impl std::fmt::Display for ModuleCycle {
    fn fmt( &self, f: &mut std::fmt::Formatter ) -> Result<(), std::fmt::Error> {
        for member in self.members() {
            write!( f, "{} -> ", member.stem() )?;
        }
        write!( f, "{}", self.entry().stem() )
    }
}
