use native_link::LoaderContext ;
use crate::mock::{ MockLoader, MockModule, module_path, count };

hook!( exec_only => "exec:only" );

#[test]
fn hooks_missing_hooks_skipped() {

	let loader = MockLoader::new()
		.module( "bare", MockModule::new() )
		.module( "exec_only", MockModule::new().with_exec( exec_only ));
	let mut context = LoaderContext::new( loader, native_link::NoDependencies );

	let ( report, warnings ) = context.load_candidates([ module_path( "bare" ), module_path( "exec_only" )]);
	assert_no_warnings!( warnings );

	assert_eq!( report.loaded.len(), 2 );
	assert!( report.init_invoked.is_empty() );
	assert_eq!( report.exec_invoked, [ module_path( "exec_only" )]);
	assert_eq!( count( "exec:only" ), 1 );
	assert!( context.init_hooks().is_empty() );

}
