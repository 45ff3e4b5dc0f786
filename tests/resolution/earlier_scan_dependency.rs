use native_link::LoaderContext ;
use crate::mock::{ MockLoader, module_path, dependency_table, count };

#[test]
fn resolution_dependency_loaded_by_earlier_scan() {

	let loader = MockLoader::with_modules( &[ "base", "addon" ]);
	let dependencies = dependency_table( &[( "addon", &[ "base" ])]);
	let mut context = LoaderContext::new( loader, dependencies );

	let ( first, warnings ) = context.load_candidates([ module_path( "base" )]);
	assert_no_warnings!( warnings );
	assert_eq!( first.loaded, [ module_path( "base" )]);

	let ( second, warnings ) = context.load_candidates([ module_path( "addon" ), module_path( "base" )]);
	assert_no_warnings!( warnings );

	assert_eq!( second.loaded, [ module_path( "addon" )]);
	assert!( second.unresolved.is_empty() );
	assert_eq!( count( "load:base" ), 1 );
	assert_eq!( context.registry().len(), 2 );

}
