//! Type alias for operations that keep going when individual items fail.
//! A scan never aborts because one module misbehaves, so most of the
//! crate reports its outcome as a result plus the failures it absorbed.

/// Represents an operation that completed even though some parts of it failed.
/// The `Vec<E>` contains errors from the failed parts that were handled gracefully.
pub type PartialSuccess<T, E> = ( T, Vec<E> );
