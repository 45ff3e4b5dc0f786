//! Dependency extraction.
//!
//! The resolver only needs one thing from a module's binary: the ordered list
//! of identifiers it declares as dependencies. Each identifier is resolved
//! against the directory containing the module (see
//! [`ModulePath::resolve_dependency`]). How the list is obtained is up to the
//! [`DependencySource`] implementation.

use std::collections::HashMap ;
use std::convert::Infallible ;

use crate::ModulePath ;

mod elf_needed ;

pub use elf_needed::{ ElfNeeded, ElfError, needed_libraries };



/// Source of the declared dependencies of a module.
///
/// Implementations are treated as pure functions of the path: the resolver
/// asks at most once per module and scan, and never assumes the path exists.
pub trait DependencySource {
    /// Failure to read the dependency list. Reported as a warning, after
    /// which the module is treated as having no dependencies.
    type Error: std::error::Error + Send + Sync + 'static ;

    fn dependencies( &self, module: &ModulePath ) -> Result<Vec<String>, Self::Error> ;
}

/// Every module is a leaf.
#[derive( Debug, Default, Clone, Copy )]
pub struct NoDependencies ;

impl DependencySource for NoDependencies {
    type Error = Infallible ;
    fn dependencies( &self, _: &ModulePath ) -> Result<Vec<String>, Self::Error> { Ok( Vec::with_capacity( 0 )) }
}

/// A fixed table. Modules missing from the table have no dependencies.
impl DependencySource for HashMap<ModulePath, Vec<String>> {
    type Error = Infallible ;
    fn dependencies( &self, module: &ModulePath ) -> Result<Vec<String>, Self::Error> {
        Ok( self.get( module ).cloned().unwrap_or_default() )
    }
}

impl<T: DependencySource> DependencySource for &T {
    type Error = T::Error ;
    fn dependencies( &self, module: &ModulePath ) -> Result<Vec<String>, Self::Error> {
        ( **self ).dependencies( module )
    }
}
