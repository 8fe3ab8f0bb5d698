use crate::treap::Result;

/// The minimal capability set of an ordered, unique-key search tree.
///
/// Code that only needs these operations should depend on this trait rather than on `Treap`.
///
/// # Examples
///
/// ```
/// use linked_treap::{SearchTree, Treap};
///
/// fn load<S: SearchTree<u32, u32>>(tree: &mut S) {
///     for i in 0..10 {
///         tree.insert(i, i * i).unwrap();
///     }
/// }
///
/// let mut t = Treap::new();
/// load(&mut t);
/// assert_eq!(SearchTree::search(&t, &3), (9, true));
/// ```
pub trait SearchTree<T, U> {
    /// Returns `true` if the tree holds no keys.
    fn is_empty(&self) -> bool;

    /// Returns the value associated with `key` and `true`, or a default value and `false` if the
    /// key is absent.
    fn search(&self, key: &T) -> (U, bool);

    /// Inserts a key-value pair. Fails with `Error::DuplicateKey` if the key is already present.
    fn insert(&mut self, key: T, value: U) -> Result<()>;

    /// Removes a key and returns its key-value pair. Fails with `Error::KeyNotFound` if the key is
    /// absent.
    fn remove(&mut self, key: &T) -> Result<(T, U)>;
}
