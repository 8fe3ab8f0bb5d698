//! A randomized treap whose nodes keep links to their parents.
//!
//! Nodes are stored in an [`arena::Arena`] and reference each other by handle, so the tree owns
//! every node exclusively while parent links stay plain, non-owning indices. Rebalancing is done
//! with single rotations, upward after an insertion and downward before a removal.
//!
//! # Examples
//!
//! ```
//! use linked_treap::{Error, Treap};
//!
//! let mut t = Treap::with_seed([1, 2, 3, 4]);
//! t.insert(1, "one").unwrap();
//! t.insert(2, "two").unwrap();
//!
//! assert_eq!(t.insert(1, "uno"), Err(Error::DuplicateKey));
//! assert_eq!(t.search(&2), ("two", true));
//! assert_eq!(t.remove(&1), Ok((1, "one")));
//! assert_eq!(t.remove(&1), Err(Error::KeyNotFound));
//! ```

pub mod arena;
mod search_tree;
pub mod treap;

pub use crate::search_tree::SearchTree;
pub use crate::treap::{Error, Result, Treap, TreapConfig};
