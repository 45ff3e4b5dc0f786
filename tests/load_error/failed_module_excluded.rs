use native_link::{ LoaderContext, LoadError };
use crate::mock::{ MockLoader, MockModule, module_path, count };

#[test]
fn load_error_failed_module_excluded() {

	let loader = MockLoader::new()
		.module( "a", MockModule::new() )
		.failing( "b", "corrupt image" )
		.module( "c", MockModule::new() );
	let mut context = LoaderContext::new( loader, native_link::NoDependencies );

	let ( report, warnings ) = context.load_candidates([ "a", "b", "c" ].map( module_path ));

	match warnings.as_slice() {
		[ err @ LoadError::LoadFailed { module, .. } ] => {
			assert_eq!( module, &module_path( "b" ));
			assert_eq!( err.to_string(), "Failed to load b: corrupt image" );
			assert_eq!( err.module(), Some( &module_path( "b" )));
		},
		other => panic!( "Expected a single load failure, found: {:?}", other ),
	}

	assert_eq!( report.loaded, [ module_path( "a" ), module_path( "c" )]);
	assert!( !context.registry().contains( &module_path( "b" )));
	assert_eq!( count( "load:b" ), 1 );

}

#[test]
fn load_error_failed_module_not_retried_in_scan() {

	let loader = MockLoader::new()
		.failing( "b", "corrupt image" )
		.module( "a", MockModule::new() )
		.module( "c", MockModule::new() );
	let dependencies = crate::mock::dependency_table( &[
		( "a", &[ "b" ]),
		( "c", &[ "b" ]),
	]);
	let mut context = LoaderContext::new( loader, dependencies );

	let ( _, warnings ) = context.load_candidates([ "a", "b", "c" ].map( module_path ));

	assert_eq!( warnings.len(), 1 );
	assert_eq!( count( "load:b" ), 1 );

}
