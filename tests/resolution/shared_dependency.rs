use native_link::LoaderContext ;
use crate::mock::{ MockLoader, MockModule, module_path, dependency_table, count, position };

hook!( init_a => "init:a" );
hook!( init_b => "init:b" );
hook!( init_c => "init:c" );

#[test]
fn resolution_shared_dependency_loaded_once() {

	let loader = MockLoader::new()
		.module( "a", MockModule::new().with_init( init_a ))
		.module( "b", MockModule::new().with_init( init_b ))
		.module( "c", MockModule::new().with_init( init_c ));
	let dependencies = dependency_table( &[
		( "a", &[ "b" ]),
		( "c", &[ "b" ]),
	]);
	let mut context = LoaderContext::new( loader, dependencies );

	// Discovered as { C, A, B }.
	let ( report, warnings ) = context.load_candidates([ "c", "a", "b" ].map( module_path ));
	assert_no_warnings!( warnings );

	assert_eq!( report.loaded, [ "b", "c", "a" ].map( module_path ));
	assert_eq!( count( "load:b" ), 1 );
	assert_eq!( count( "init:b" ), 1 );
	assert!( position( "init:b" ) < position( "load:a" ));
	assert!( position( "init:b" ) < position( "load:c" ));

}
