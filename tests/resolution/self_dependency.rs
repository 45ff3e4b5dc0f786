use native_link::{ LoaderContext, LoadError };
use crate::mock::{ MockLoader, module_path, dependency_table };

#[test]
fn resolution_self_dependency_is_a_cycle() {

	let loader = MockLoader::with_modules( &[ "a" ]);
	let mut context = LoaderContext::new( loader, dependency_table( &[( "a", &[ "a" ])]));

	let ( report, warnings ) = context.load_candidates([ module_path( "a" )]);

	match warnings.as_slice() {
		[ LoadError::CycleDetected( cycle ) ] => {
			assert_eq!( cycle.member_count(), 1 );
			assert_eq!( cycle.entry(), &module_path( "a" ));
		},
		other => panic!( "Expected a single cycle, found: {:?}", other ),
	}
	assert!( report.loaded.is_empty() );

}
