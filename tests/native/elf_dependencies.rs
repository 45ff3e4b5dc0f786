use native_link::{ DependencySource, ElfError, ElfNeeded, ModulePath };
use crate::system_library ;

#[test]
fn native_elf_dependencies_of_system_library() {

	let Some( libm ) = system_library( "libm.so.6" ) else {
		eprintln!( "libm.so.6 not found, skipping" );
		return ;
	};

	let needed = ElfNeeded.dependencies( &ModulePath::new( libm )).unwrap();
	assert!( needed.iter().any(| name | name == "libc.so.6" ), "Unexpected DT_NEEDED entries: {:?}", needed );

}

#[test]
fn native_elf_dependencies_of_non_elf_file() {

	let dir = tempfile::tempdir().unwrap();
	let script = dir.path().join( "script.so" );
	std::fs::write( &script, b"#!/bin/sh\nexit 0\n" ).unwrap();

	assert!( matches!( ElfNeeded.dependencies( &ModulePath::new( script )), Err( ElfError::BadMagic )));

}

#[test]
fn native_elf_dependencies_of_missing_file() {

	let missing = ModulePath::new( "/nonexistent/native-link/missing.so" );
	assert!( matches!( ElfNeeded.dependencies( &missing ), Err( ElfError::Io( _, _ ))));

}
