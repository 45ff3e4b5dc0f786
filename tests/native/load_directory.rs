use native_link::{ ElfNeeded, LoadedModule, LoaderContext, LoadError, ModulePath, NativeLoader };
use crate::system_library ;

#[test]
fn native_load_directory() {

	let Some( libm ) = system_library( "libm.so.6" ) else {
		eprintln!( "libm.so.6 not found, skipping" );
		return ;
	};

	let dir = tempfile::tempdir().unwrap();
	let root = dir.path();
	std::os::unix::fs::symlink( &libm, root.join( "m.so" )).unwrap();
	std::fs::write( root.join( "junk.so" ), b"not a library" ).unwrap();
	let m = ModulePath::new( root.join( "m.so" ));
	let junk = ModulePath::new( root.join( "junk.so" ));

	let mut context = LoaderContext::new( NativeLoader, ElfNeeded ).with_extension( "so" );
	let ( report, warnings ) = context.load_directory( root );

	assert_eq!( report.discovered, 2 );
	assert_eq!( report.loaded, vec![ m.clone() ]);
	assert!( report.init_invoked.is_empty() );
	assert!( report.exec_invoked.is_empty() );

	// The dependencies of libm live outside the scan root.
	assert!( report.unresolved.iter().any(| edge | edge.module == m && edge.identifier == "libc.so.6" ));

	assert!( warnings.iter().any(| err | matches!( err, LoadError::DependencyExtraction { module, .. } if module == &junk )));
	assert!( warnings.iter().any(| err | matches!( err, LoadError::LoadFailed { module, .. } if module == &junk )));
	assert_eq!( warnings.len(), 2 );

	let cos = context.registry().get( &m ).and_then(| module | module.hook( "cos" ));
	assert!( cos.is_some() );
	assert!( context.registry().get( &junk ).is_none() );

}
