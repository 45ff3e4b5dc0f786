use native_link::LoaderContext ;
use crate::mock::{ MockLoader, MockModule, module_path, count };

hook!( exec_first => "exec:first" );
hook!( exec_second => "exec:second" );

#[test]
fn hooks_exec_once_across_scans() {

	let loader = MockLoader::new()
		.module( "first", MockModule::new().with_exec( exec_first ))
		.module( "second", MockModule::new().with_exec( exec_second ));
	let mut context = LoaderContext::new( loader, native_link::NoDependencies );

	let ( report, warnings ) = context.load_candidates([ module_path( "first" )]);
	assert_no_warnings!( warnings );
	assert_eq!( report.exec_invoked, [ module_path( "first" )]);

	// The second exec phase walks the whole registry again.
	let ( report, warnings ) = context.load_candidates([ module_path( "second" )]);
	assert_no_warnings!( warnings );
	assert_eq!( report.exec_invoked, [ module_path( "second" )]);

	assert_eq!( count( "exec:first" ), 1 );
	assert_eq!( count( "exec:second" ), 1 );

}
