use native_link::LoaderContext ;
use crate::mock::{ MockLoader, MockModule, module_path, count };

hook!( exec_shared => "exec:shared" );
hook!( exec_own => "exec:own" );

#[test]
fn hooks_shared_exec_invoked_once() {

	let loader = MockLoader::new()
		.module( "primary", MockModule::new().with_exec( exec_shared ))
		.module( "alias", MockModule::new().with_exec( exec_shared ))
		.module( "other", MockModule::new().with_exec( exec_own ));
	let mut context = LoaderContext::new( loader, native_link::NoDependencies );

	let ( report, warnings ) = context.load_candidates([ "primary", "alias", "other" ].map( module_path ));
	assert_no_warnings!( warnings );

	assert_eq!( count( "exec:shared" ), 1 );
	assert_eq!( count( "exec:own" ), 1 );
	assert_eq!( report.exec_invoked, [ module_path( "primary" ), module_path( "other" )]);
	assert_eq!( context.exec_hooks().len(), 2 );

}
