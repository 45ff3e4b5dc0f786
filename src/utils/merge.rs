
/// Builder-style appends for the error lists threaded through [`PartialSuccess`].
///
/// [`PartialSuccess`]: crate::PartialSuccess
pub trait Merge<T> {
    fn merge( self, item: T ) -> Self ;
    fn merge_all( self, items: impl IntoIterator<Item = T> ) -> Self ;
}

impl<T> Merge<T> for Vec<T> {

    fn merge( mut self, item: T ) -> Self {
        self.push( item );
        self
    }

    fn merge_all( mut self, items: impl IntoIterator<Item = T> ) -> Self {
        self.extend( items );
        self
    }

}
