//! Module discovery.
//!
//! Walks a scan root, following symbolic links, and collects every regular
//! file carrying the module extension. The walk is best effort: an
//! unreadable directory or a symlink loop becomes a warning and the rest of
//! the tree is still scanned.

use std::collections::BTreeSet ;
use std::path::{ Path, PathBuf };
use itertools::Itertools ;
use thiserror::Error ;
use walkdir::WalkDir ;

use crate::ModulePath ;
use crate::utils::PartialSuccess ;



/// A part of the scan root that could not be walked.
#[derive( Debug, Error )]
#[error( "Failed to scan '{}': {source}", path.display() )]
pub struct DiscoveryError {
    pub path: PathBuf,
    #[source] pub source: walkdir::Error,
}

/// Collects the candidate modules under `root`.
///
/// A missing root, or a root that is not a directory, is not an error: the
/// result is simply empty. Enumeration order carries no meaning; the set is
/// ordered by path only so that repeated runs behave identically.
pub fn scan_modules( root: &Path, extension: &str ) -> PartialSuccess<BTreeSet<ModulePath>, DiscoveryError> {

    if !root.is_dir() { return ( BTreeSet::new(), Vec::with_capacity( 0 )) }

    let ( entries, errors ) = WalkDir::new( root )
        .follow_links( true )
        .into_iter()
        .map(| entry | entry.map_err(| source | DiscoveryError {
            path: source.path().map_or_else(|| root.to_path_buf(), Path::to_path_buf ),
            source,
        }))
        .partition_result::<Vec<_>, Vec<_>, _, _>();

    let modules = entries.into_iter()
        .filter(| entry | entry.file_type().is_file())
        .map(| entry | ModulePath::from( entry.into_path() ))
        .filter(| path | path.has_extension( extension ))
        .collect();

    ( modules, errors )

}
