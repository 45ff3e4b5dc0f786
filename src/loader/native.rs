use libloading::Library ;
use tracing::debug ;

use crate::ModulePath ;
use crate::hooks::HookFn ;
use super::{ ModuleLoader, LoadedModule };



/// Loads modules with the platform's dynamic linker.
///
/// On unix the library is opened with `RTLD_NOW | RTLD_LOCAL`, so unresolved
/// symbols fail the load immediately instead of at first call.
///
/// Loading a module runs its static constructors and calling a hook runs
/// arbitrary code; modules are trusted.
#[derive( Debug, Default, Clone, Copy )]
pub struct NativeLoader ;

/// A shared library mapped by [`NativeLoader`].
#[derive( Debug )]
pub struct NativeModule {
    library: Library,
}

impl ModuleLoader for NativeLoader {
    type Module = NativeModule ;
    type Error = libloading::Error ;

    fn load( &self, path: &ModulePath ) -> Result<Self::Module, Self::Error> {
        // SAFETY: module initialisers run here. Modules under the scan roots
        // are trusted to be well-formed shared libraries.
        let library = unsafe { open( path )? };
        Ok( NativeModule { library })
    }
}

#[cfg( unix )]
unsafe fn open( path: &ModulePath ) -> Result<Library, libloading::Error> {
    use libloading::os::unix::{ Library as UnixLibrary, RTLD_LOCAL, RTLD_NOW };
    // SAFETY: upheld by the caller.
    unsafe { UnixLibrary::open( Some( path.as_path() ), RTLD_NOW | RTLD_LOCAL ).map( Library::from ) }
}

#[cfg( not( unix ))]
unsafe fn open( path: &ModulePath ) -> Result<Library, libloading::Error> {
    // SAFETY: upheld by the caller.
    unsafe { Library::new( path.as_path() ) }
}

impl LoadedModule for NativeModule {
    fn hook( &self, symbol: &str ) -> Option<HookFn> {
        // SAFETY: hook symbols are declared as `extern "C" fn()`. The library
        // is never unloaded, so copying the function pointer out of the
        // borrowed symbol does not outlive the mapping.
        match unsafe { self.library.get::<HookFn>( symbol.as_bytes() ) } {
            Ok( hook ) => Some( *hook ),
            Err( err ) => {
                debug!( "No '{}' symbol: {}", symbol, err );
                None
            },
        }
    }
}
