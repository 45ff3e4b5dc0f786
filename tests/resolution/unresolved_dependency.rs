use native_link::LoaderContext ;
use crate::mock::{ MockLoader, module_path, dependency_table };

#[test]
fn resolution_unresolved_dependency_skipped() {

	let loader = MockLoader::with_modules( &[ "a", "b" ]);
	let dependencies = dependency_table( &[( "a", &[ "libc", "b" ])]);
	let mut context = LoaderContext::new( loader, dependencies );

	let ( report, warnings ) = context.load_candidates([ module_path( "a" ), module_path( "b" )]);
	assert_no_warnings!( warnings );

	assert_eq!( report.loaded, [ "b", "a" ].map( module_path ));
	assert_eq!( report.unresolved.len(), 1 );
	assert_eq!( report.unresolved[0].module, module_path( "a" ));
	assert_eq!( report.unresolved[0].identifier, "libc.so" );
	assert_eq!( report.unresolved[0].resolved, module_path( "libc" ));

}

#[test]
fn resolution_dependency_resolved_relative_to_module() {

	let nested = native_link::ModulePath::new( "/mods/nested/tool.so" );
	let sibling = native_link::ModulePath::new( "/mods/nested/helper.so" );
	let loader = MockLoader::new()
		.module_at( nested.clone(), crate::mock::MockModule::new() )
		.module_at( sibling.clone(), crate::mock::MockModule::new() );
	let dependencies = std::collections::HashMap::from([( nested.clone(), vec![ "helper.so".to_string() ])]);
	let mut context = LoaderContext::new( loader, dependencies );

	let ( report, warnings ) = context.load_candidates([ nested.clone(), sibling.clone() ]);
	assert_no_warnings!( warnings );

	assert_eq!( report.loaded, vec![ sibling, nested ]);
	assert!( report.unresolved.is_empty() );

}
