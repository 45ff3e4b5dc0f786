use std::path::PathBuf ;
use std::process::ExitCode ;
use clap::Parser ;
use tracing::{ error, info, warn };
use tracing_subscriber::EnvFilter ;

use native_link::{ startup, LoaderConfig, LoaderContext, NativeLoader, NoBridge };



/// ELF platforms record module dependencies as `DT_NEEDED` entries. Elsewhere
/// every module is loaded as a leaf, in discovery order.
#[cfg( all( unix, not( target_vendor = "apple" )))]
type ModuleDependencies = native_link::ElfNeeded ;
#[cfg( not( all( unix, not( target_vendor = "apple" ))))]
type ModuleDependencies = native_link::NoDependencies ;

/// Loads native modules from the configured roots, dependencies first.
#[derive( Debug, Parser )]
#[command( name = "native-link", version )]
struct Cli {
    /// TOML configuration file.
    #[arg( long )]
    config: Option<PathBuf>,
    /// Scan root; may be repeated. Replaces the configured roots.
    #[arg( long = "root", value_name = "DIR" )]
    roots: Vec<PathBuf>,
    /// Module file extension, without the dot.
    #[arg( long )]
    extension: Option<String>,
}

fn main() -> ExitCode {

    tracing_subscriber::fmt()
        .with_env_filter( EnvFilter::try_from_default_env().unwrap_or_else(| _ | EnvFilter::new( "info" )))
        .init();

    let cli = Cli::parse();

    let mut config = match cli.config {
        Some( path ) => match LoaderConfig::from_file( &path ) {
            Ok( config ) => config,
            Err( err ) => {
                error!( "{}", err );
                return ExitCode::FAILURE ;
            },
        },
        None => LoaderConfig::default(),
    };
    if !cli.roots.is_empty() { config.roots = cli.roots }
    if let Some( extension ) = cli.extension { config.extension = extension }

    match std::env::current_exe() {
        Ok( executable ) if !config.applies_to( &executable ) => {
            info!( "Not running inside '{}', skipping module loading", config.host_executable.as_deref().unwrap_or_default() );
            return ExitCode::SUCCESS ;
        },
        Ok( _ ) => {},
        Err( err ) => warn!( "Could not determine current executable: {}", err ),
    }

    let mut context = LoaderContext::from_config( NativeLoader, ModuleDependencies::default(), &config );

    match startup( &config, &mut context, &mut NoBridge ) {
        Ok(( reports, errors )) => {
            reports.iter().for_each(| report | info!(
                "{}: {} discovered, {} loaded, {} init hooks, {} exec hooks",
                report.root.as_deref().map_or_else(|| "<candidates>".into(), | root | root.display().to_string() ),
                report.discovered,
                report.loaded.len(),
                report.init_invoked.len(),
                report.exec_invoked.len(),
            ));
            if !errors.is_empty() { warn!( "{} module failures during startup", errors.len() ) }
            ExitCode::SUCCESS
        },
        Err( err ) => {
            error!( "{}", err );
            ExitCode::FAILURE
        },
    }

}
