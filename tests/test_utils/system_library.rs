/// Locates a shared library of the running system by file name.
#[allow( dead_code )]
fn system_library( file: &str ) -> Option<std::path::PathBuf> {
	[
		"/lib/x86_64-linux-gnu",
		"/usr/lib/x86_64-linux-gnu",
		"/lib/aarch64-linux-gnu",
		"/usr/lib/aarch64-linux-gnu",
		"/lib64",
		"/usr/lib64",
		"/lib",
		"/usr/lib",
	].iter()
		.map(| dir | std::path::Path::new( dir ).join( file ))
		.find(| path | path.is_file() )
}
