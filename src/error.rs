//! Errors reported by the tree.

/// The errors that can arise when constructing, mutating, or querying a
/// [`Gnat`](crate::Gnat).
///
/// All errors are reported to the caller at the point of detection and none
/// are retried internally. A failed mutation leaves the tree in a valid
/// state, though its distance bounds may be looser than tight.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GnatError {
    /// The construction parameters were invalid.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// The operation requires a non-empty tree.
    #[error("the tree is empty")]
    EmptyTree,

    /// A query argument was invalid, e.g. `k == 0` or a negative radius.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The distance function returned a value that is not a finite,
    /// non-negative number.
    #[error("the distance function returned {0}, which is not a finite non-negative number")]
    DistanceFunction(f64),
}
