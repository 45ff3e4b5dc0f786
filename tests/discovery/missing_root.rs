use std::path::Path ;
use native_link::{ scan_modules, LoaderContext };
use crate::mock::MockLoader ;

#[test]
fn discovery_missing_root_is_empty() {

	let ( modules, warnings ) = scan_modules( Path::new( "/nonexistent/native-link/mods" ), "so" );
	assert_no_warnings!( warnings );
	assert!( modules.is_empty() );

}

#[test]
fn discovery_file_root_is_empty() {

	let dir = tempfile::tempdir().unwrap();
	let file = dir.path().join( "mods.so" );
	std::fs::write( &file, b"" ).unwrap();

	let ( modules, warnings ) = scan_modules( &file, "so" );
	assert_no_warnings!( warnings );
	assert!( modules.is_empty() );

}

#[test]
fn discovery_missing_root_skips_scan() {

	let mut context = LoaderContext::new( MockLoader::new(), native_link::NoDependencies );

	let ( report, warnings ) = context.load_directory( Path::new( "/nonexistent/native-link/mods" ));
	assert_no_warnings!( warnings );

	assert_eq!( report.root.as_deref(), Some( Path::new( "/nonexistent/native-link/mods" )));
	assert_eq!( report.discovered, 0 );
	assert!( report.loaded.is_empty() );
	assert!( crate::mock::events().is_empty() );

}
