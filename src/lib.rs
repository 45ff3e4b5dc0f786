//! A dependency-aware loader for native plugin modules.
//!
//! Modules are shared libraries found under one or more scan roots. Each may
//! depend on other modules (for ELF objects, through their `DT_NEEDED`
//! entries) and may export two lifecycle hooks. `native_link` loads every
//! module exactly once, dependencies first, and invokes each hook entry point
//! exactly once per process.
//!
//! # Core Concepts
//!
//! - [`ModulePath`]: Identity of a candidate module. Dependency identifiers are
//! 	resolved relative to the directory of the module declaring them.
//!
//! - [`DependencySource`]: Provides a module's declared dependencies. [`ElfNeeded`]
//! 	reads them from the dynamic section of the binary.
//!
//! - [`ModuleLoader`]: Maps a module into the process. [`NativeLoader`] uses the
//! 	platform's dynamic linker.
//!
//! - [`LoaderContext`]: Owns the [`ModuleRegistry`] and the hook bookkeeping for
//! 	the lifetime of the process. Every scan goes through it.
//!
//! - **Hooks**: `module_init` runs as soon as its module is loaded, so always
//! 	after the init hooks of the module's dependencies. `module_exec` runs once
//! 	every module of the scan has been loaded. Both are `extern "C" fn()`, both
//! 	are optional, and both are deduplicated by entry point address: two
//! 	modules resolving to the same function invoke it once between them.
//!
//! # Failure Handling
//!
//! A scan always runs to completion. A module that fails to load, or that is
//! part of a dependency cycle, is left out of the registry and reported as a
//! [`LoadError`] next to the [`ScanReport`]; every other module is still
//! loaded. A declared dependency that matches no discovered module is skipped
//! and recorded in [`ScanReport::unresolved`].
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path ;
//! use native_link::{ LoaderContext, NativeLoader, ElfNeeded };
//!
//! let mut context = LoaderContext::new( NativeLoader, ElfNeeded );
//!
//! for root in [ "core", "mods" ] {
//! 	let ( report, errors ) = context.load_directory( Path::new( root ));
//! 	errors.iter().for_each(| err | eprintln!( "{}", err ));
//! 	println!( "{}: loaded {} of {}", root, report.loaded.len(), report.discovered );
//! }
//! ```
//!
//! A module participates by exporting the hooks it needs:
//!
//! ```ignore
//! #[no_mangle]
//! pub extern "C" fn module_init() { /* register with the host */ }
//!
//! #[no_mangle]
//! pub extern "C" fn module_exec() { /* every module is loaded by now */ }
//! ```

mod module_path ;
mod discovery ;
mod dependencies ;
mod loader ;
mod hooks ;
mod registry ;
mod resolver ;
mod load_error ;
mod context ;
mod config ;
mod startup ;
mod utils ;

pub use module_path::ModulePath ;
pub use discovery::{ scan_modules, DiscoveryError };
pub use dependencies::{ DependencySource, NoDependencies, ElfNeeded, ElfError, needed_libraries };
pub use loader::{ ModuleLoader, LoadedModule, NativeLoader, NativeModule };
pub use hooks::{ HookFn, HookId, HookPhase, HookNames, HookInvocationSet };
pub use registry::{ ModuleRegistry, RegisteredModule };
pub use resolver::UnresolvedDependency ;
pub use load_error::{ LoadError, ModuleCycle };
pub use context::{ LoaderContext, ScanReport };
pub use config::{ LoaderConfig, ConfigError };
pub use startup::{ startup, HostBridge, NoBridge, StartupError };
pub use utils::PartialSuccess ;
