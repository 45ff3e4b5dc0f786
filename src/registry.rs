use crate::ModulePath ;



/// A module that was mapped successfully.
#[derive( Debug )]
pub struct RegisteredModule<M> {
    path: ModulePath,
    module: M,
}

impl<M> RegisteredModule<M> {
    pub fn path( &self ) -> &ModulePath { &self.path }
    pub fn module( &self ) -> &M { &self.module }
}

/// Every module loaded by a [`LoaderContext`]( crate::LoaderContext ), in load order.
///
/// Append-only. Handles are never released, which keeps every resolved hook
/// valid until the process exits.
#[derive( Debug )]
pub struct ModuleRegistry<M> {
    modules: Vec<RegisteredModule<M>>,
}

impl<M> ModuleRegistry<M> {

    pub fn new() -> Self { Self { modules: Vec::new() } }

    pub(crate) fn register( &mut self, path: ModulePath, module: M ) -> &RegisteredModule<M> {
        self.modules.push( RegisteredModule { path, module });
        &self.modules[ self.modules.len() - 1 ]
    }

    pub fn contains( &self, path: &ModulePath ) -> bool {
        self.modules.iter().any(| registered | &registered.path == path )
    }

    pub fn get( &self, path: &ModulePath ) -> Option<&M> {
        self.modules.iter().find(| registered | &registered.path == path ).map(| registered | &registered.module )
    }

    pub fn iter( &self ) -> std::slice::Iter<'_, RegisteredModule<M>> { self.modules.iter() }

    pub fn paths( &self ) -> impl Iterator<Item = &ModulePath> { self.modules.iter().map(| registered | &registered.path ) }

    pub fn len( &self ) -> usize { self.modules.len() }

    pub fn is_empty( &self ) -> bool { self.modules.is_empty() }

}

impl<M> Default for ModuleRegistry<M> {
    fn default() -> Self { Self::new() }
}

impl<'a, M> IntoIterator for &'a ModuleRegistry<M> {
    type Item = &'a RegisteredModule<M>;
    type IntoIter = std::slice::Iter<'a, RegisteredModule<M>>;
    fn into_iter( self ) -> Self::IntoIter { self.modules.iter() }
}
