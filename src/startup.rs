//! Process start: every configured root in sequence, then the hosting bridge.

use std::convert::Infallible ;
use thiserror::Error ;
use tracing::info ;

use crate::config::LoaderConfig ;
use crate::context::{ LoaderContext, ScanReport };
use crate::dependencies::DependencySource ;
use crate::load_error::LoadError ;
use crate::loader::ModuleLoader ;
use crate::utils::{ PartialSuccess, Merge };



/// Whatever the host launches once native modules are in place.
///
/// Launched exactly once, after the last root has finished its exec phase.
pub trait HostBridge {
    type Error: std::error::Error + Send + Sync + 'static ;
    fn launch( &mut self ) -> Result<(), Self::Error> ;
}

/// A host with nothing to launch.
#[derive( Debug, Default, Clone, Copy )]
pub struct NoBridge ;

impl HostBridge for NoBridge {
    type Error = Infallible ;
    fn launch( &mut self ) -> Result<(), Self::Error> { Ok(()) }
}

/// The only failure that aborts startup.
#[derive( Debug, Error )]
pub enum StartupError {
    #[error( "Host bridge failed to launch: {0}" )]
    Bridge( #[source] Box<dyn std::error::Error + Send + Sync> ),
}

/// Loads every root of `config` through `context`, in order, then launches
/// `bridge`.
///
/// Each root is scanned and dispatched on its own; roots that do not exist
/// are skipped. Module failures are collected, not fatal.
pub fn startup<L, D, B>(
    config: &LoaderConfig,
    context: &mut LoaderContext<L, D>,
    bridge: &mut B,
) -> Result<PartialSuccess<Vec<ScanReport>, LoadError>, StartupError>
where
    L: ModuleLoader,
    D: DependencySource,
    B: HostBridge,
{

    let ( reports, errors ) = config.roots.iter().fold(
        ( Vec::with_capacity( config.roots.len() ), Vec::new() ),
        |( reports, errors ): ( Vec<_>, Vec<_> ), root | {
            let ( report, new_errors ) = context.load_directory( root );
            ( reports.merge( report ), errors.merge_all( new_errors ))
        },
    );

    info!( "Native modules loaded: {} in registry", context.registry().len() );
    bridge.launch().map_err(| err | StartupError::Bridge( Box::new( err )))?;

    Ok(( reports, errors ))

}
