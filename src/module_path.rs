use std::ffi::OsStr ;
use std::path::{ Path, PathBuf };



/// Filesystem location of a candidate module.
///
/// This is the identity key used by the scanner, the resolver and the
/// registry: two modules are the same module exactly when their paths compare
/// equal. No canonicalisation happens, so a file reachable through two
/// different paths (e.g. a symlinked directory) is two candidates. Hook
/// deduplication by entry point address covers that case.
#[derive( Eq, Hash, PartialEq, Ord, PartialOrd, Debug, Clone )]
pub struct ModulePath( PathBuf );

impl ModulePath {

    pub fn new( path: impl Into<PathBuf> ) -> Self { Self( path.into() ) }

    pub fn as_path( &self ) -> &Path { &self.0 }

    /// Resolves a declared dependency identifier against the directory
    /// containing this module.
    pub fn resolve_dependency( &self, identifier: &str ) -> ModulePath {
        match self.0.parent() {
            Some( parent ) => Self( parent.join( identifier )),
            None => Self( PathBuf::from( identifier )),
        }
    }

    /// File name without its extension, used when reporting on a module.
    pub fn stem( &self ) -> &str {
        self.0.file_stem().and_then( OsStr::to_str ).unwrap_or( "<unnamed>" )
    }

    pub fn has_extension( &self, extension: &str ) -> bool {
        self.0.extension().is_some_and(| ext | ext == extension )
    }

}

impl std::fmt::Display for ModulePath {
    fn fmt( &self, f: &mut std::fmt::Formatter ) -> Result<(), std::fmt::Error> {
        std::fmt::Display::fmt( &self.0.display(), f )
    }
}

impl AsRef<Path> for ModulePath {
    fn as_ref( &self ) -> &Path { &self.0 }
}

impl From<PathBuf> for ModulePath {
    fn from( path: PathBuf ) -> Self { Self( path ) }
}

impl From<&Path> for ModulePath {
    fn from( path: &Path ) -> Self { Self( path.to_path_buf() ) }
}

impl From<&str> for ModulePath {
    fn from( path: &str ) -> Self { Self( PathBuf::from( path )) }
}
