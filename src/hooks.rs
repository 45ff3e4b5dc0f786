//! Lifecycle hooks.
//!
//! A module may export two no-argument entry points. The init hook runs as
//! soon as its module is loaded; the exec hook runs once every module of a
//! scan has been loaded. Several modules can resolve a hook symbol to the
//! same function (aliased or symlinked binaries, or a symbol bound to a
//! shared dependency), so invocations are deduplicated by entry point
//! address rather than by module.

use std::collections::HashSet ;
use serde::Deserialize ;



/// Signature of both lifecycle hooks.
pub type HookFn = unsafe extern "C" fn();

/// Identity of a resolved hook: its entry point address.
#[derive( Eq, Hash, PartialEq, Ord, PartialOrd, Debug, Clone, Copy )]
pub struct HookId( usize );

impl From<HookFn> for HookId {
    fn from( hook: HookFn ) -> Self { Self( hook as usize ) }
}

impl std::fmt::Display for HookId {
    fn fmt( &self, f: &mut std::fmt::Formatter ) -> Result<(), std::fmt::Error> {
        write!( f, "{:#x}", self.0 )
    }
}

/// The two points in a module's life at which a hook is called.
#[derive( Debug, Clone, Copy, PartialEq, Eq )]
pub enum HookPhase {
    /// Right after the module itself was loaded.
    Init,
    /// After every module of the scan was loaded or failed.
    Exec,
}

impl std::fmt::Display for HookPhase {
    fn fmt( &self, f: &mut std::fmt::Formatter ) -> Result<(), std::fmt::Error> {
        match self {
            Self::Init => write!( f, "init" ),
            Self::Exec => write!( f, "exec" ),
        }
    }
}

/// Exported symbol names looked up for each phase.
#[derive( Debug, Clone, PartialEq, Eq, Deserialize )]
#[serde( default )]
pub struct HookNames {
    pub init: String,
    pub exec: String,
}

impl HookNames {
    pub fn symbol( &self, phase: HookPhase ) -> &str {
        match phase {
            HookPhase::Init => &self.init,
            HookPhase::Exec => &self.exec,
        }
    }
}

impl Default for HookNames {
    fn default() -> Self {
        Self { init: "module_init".to_string(), exec: "module_exec".to_string() }
    }
}

/// Entry points already invoked for one phase.
#[derive( Debug, Default )]
pub struct HookInvocationSet {
    invoked: HashSet<HookId>,
}

impl HookInvocationSet {

    pub fn new() -> Self { Self::default() }

    /// Calls `hook` unless a function at the same address has already been
    /// called through this set. Returns whether the hook ran.
    ///
    /// # Safety
    /// `hook` must point to a function with the [`HookFn`] signature whose
    /// code stays mapped for the duration of the call.
    pub unsafe fn invoke_once( &mut self, hook: HookFn ) -> bool {
        if !self.invoked.insert( HookId::from( hook )) { return false }
        // SAFETY: upheld by the caller.
        unsafe { hook() };
        true
    }

    pub fn contains( &self, hook: HookFn ) -> bool {
        self.invoked.contains( &HookId::from( hook ))
    }

    pub fn len( &self ) -> usize { self.invoked.len() }

    pub fn is_empty( &self ) -> bool { self.invoked.is_empty() }

}
