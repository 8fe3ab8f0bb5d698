//! Probabilistic binary search tree where each node also maintains the heap invariant.

mod config;
mod map;
mod node;
mod tree;

pub use self::config::TreapConfig;
pub use self::map::Treap;

use std::error;
use std::fmt;
use std::result;

/// The ways an operation on a `Treap` can fail. A failed operation leaves the treap unchanged.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// The key being inserted is already in the treap.
    DuplicateKey,
    /// The key being removed is not in the treap.
    KeyNotFound,
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::DuplicateKey => write!(f, "key already exists in the treap"),
            Error::KeyNotFound => write!(f, "key does not exist in the treap"),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn test_error_display() {
        assert_eq!(Error::DuplicateKey.to_string(), "key already exists in the treap");
        assert_eq!(Error::KeyNotFound.to_string(), "key does not exist in the treap");
    }
}
