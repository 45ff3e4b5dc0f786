//! The seam between the resolution algorithm and the operating system.
//!
//! [`ModuleLoader`] maps a module into the process; [`LoadedModule`] resolves
//! hook symbols inside it. [`NativeLoader`] is the implementation backed by
//! the platform's dynamic linker.

use crate::ModulePath ;
use crate::hooks::HookFn ;

mod native ;

pub use native::{ NativeLoader, NativeModule };



/// Maps modules into the process.
pub trait ModuleLoader {
    type Module: LoadedModule ;
    /// The underlying loader diagnostic for a module that could not be mapped.
    type Error: std::error::Error + Send + Sync + 'static ;

    fn load( &self, path: &ModulePath ) -> Result<Self::Module, Self::Error> ;
}

/// A module mapped into the process.
///
/// Handles are kept by the [`ModuleRegistry`]( crate::ModuleRegistry ) for
/// the rest of the process lifetime; nothing is ever unloaded, so resolved
/// hooks stay callable.
pub trait LoadedModule {
    /// Resolves an exported no-argument function by name. A missing symbol is
    /// not an error.
    fn hook( &self, symbol: &str ) -> Option<HookFn> ;
}
