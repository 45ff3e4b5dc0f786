mod partial_success ;
mod merge ;

pub use partial_success::PartialSuccess ;
pub(crate) use merge::Merge ;
