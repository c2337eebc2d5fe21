//! Errors raised by tree operations.

use thiserror::Error;

/// Errors raised by [`OrderedTree`][crate::OrderedTree] operations. All of these are contract
/// violations by the caller; nothing is retried and the tree is left as it was.
#[derive(Error, Debug)]
pub enum TreeError {
    /// The comparator did not report a freshly stored value as equal to itself.
    #[error("comparator must report a value as equal to itself")]
    InvalidComparator,

    /// The comparator could not order two values during `insert`.
    #[error("comparator returned a result outside of less, equal, or greater")]
    InvalidComparisonResult,

    /// A record (at any depth) had no middle value.
    #[error("missing middle value at path [{path}]; an absent value is read as a leaf")]
    MissingValue {
        /// Keys walked from the root record, ending in the middle key.
        path: String,
    },

    /// A record's middle value could not be decoded into the tree's value type.
    #[error("could not decode middle value at path [{path}]: {source}")]
    Decode {
        /// Keys walked from the root record, ending in the middle key.
        path: String,
        /// The underlying decoding failure.
        #[source]
        source: serde_json::Error,
    },
}

/// Result type alias for tree operations.
pub type Result<T> = std::result::Result<T, TreeError>;
