use crate::arena::Arena;
use crate::search_tree::SearchTree;
use crate::treap::config::{TreapConfig, DEFAULT_CHUNK_SIZE};
use crate::treap::node::{Link, Node};
use crate::treap::tree::{self, Nodes, Position};
use crate::treap::{Error, Result};
use log::debug;
use rand::{Rng, SeedableRng, XorShiftRng};
use std::mem;

/// An ordered map implemented by a treap whose nodes link back to their parents.
///
/// A treap is a tree that satisfies both the binary search tree property and a heap property. Each
/// node has a key, a value, and a priority. The key of any node is greater than all keys in its
/// left subtree and less than all keys occuring in its right subtree. The priority of a node is
/// greater than or equal to the priority of its children. Priorities are drawn from a random
/// generator owned by the treap, so the expected height of the tree is proportional to the
/// logarithm of the number of keys.
///
/// Insertion attaches a leaf and rotates it upward while it outranks its parent. Removal rotates
/// the node downward, lifting its higher-priority child each time, and detaches it once it is a
/// leaf. Keys are unique: inserting a present key or removing an absent one is an error and
/// leaves the treap untouched.
///
/// # Examples
///
/// ```
/// use linked_treap::{Error, Treap};
///
/// let mut t = Treap::new();
/// t.insert(0, 1).unwrap();
/// t.insert(3, 4).unwrap();
///
/// assert_eq!(t.get(&0), Some(&1));
/// assert_eq!(t.search(&1), (0, false));
/// assert_eq!(t.len(), 2);
///
/// *t.get_mut(&0).unwrap() = 2;
/// assert_eq!(t.remove(&0), Ok((0, 2)));
/// assert_eq!(t.remove(&1), Err(Error::KeyNotFound));
/// ```
pub struct Treap<T, U, R = XorShiftRng> {
    root: Link,
    nodes: Nodes<T, U>,
    rng: R,
}

impl<T: Ord, U> Treap<T, U> {
    /// Constructs a new, empty `Treap<T, U>` whose priorities are seeded from the operating
    /// system.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_treap::Treap;
    ///
    /// let t: Treap<u32, u32> = Treap::new();
    /// ```
    pub fn new() -> Self {
        Self::with_config(TreapConfig::default())
    }

    /// Constructs a new, empty `Treap<T, U>` from a `TreapConfig`.
    ///
    /// # Panics
    ///
    /// Panics if the configured chunk size is zero or the configured seed is all zeros.
    pub fn with_config(config: TreapConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => XorShiftRng::from_seed(seed),
            None => rand::weak_rng(),
        };
        Treap {
            root: None,
            nodes: Arena::new(config.chunk_size),
            rng,
        }
    }

    /// Constructs a new, empty `Treap<T, U>` with a deterministic priority sequence. Two treaps
    /// built with the same seed and the same operations have the same shape.
    ///
    /// # Panics
    ///
    /// Panics if `seed` is all zeros.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_treap::Treap;
    ///
    /// let mut t = Treap::with_seed([1, 1, 1, 1]);
    /// let mut u = Treap::with_seed([1, 1, 1, 1]);
    /// for i in 0..100 {
    ///     t.insert(i, ()).unwrap();
    ///     u.insert(i, ()).unwrap();
    /// }
    /// assert_eq!(t.height(), u.height());
    /// ```
    pub fn with_seed(seed: [u32; 4]) -> Self {
        Self::with_config(TreapConfig::new().seed(seed))
    }
}

impl<T: Ord, U, R: Rng> Treap<T, U, R> {
    /// Constructs a new, empty treap that draws its priorities from `rng`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_treap::Treap;
    /// use rand::{SeedableRng, StdRng};
    ///
    /// let rng: StdRng = SeedableRng::from_seed(&[7usize][..]);
    /// let mut t = Treap::with_rng(rng);
    /// t.insert("key", "value").unwrap();
    /// assert_eq!(t.get(&"key"), Some(&"value"));
    /// ```
    pub fn with_rng(rng: R) -> Self {
        Self::with_rng_and_chunk_size(rng, DEFAULT_CHUNK_SIZE)
    }

    /// Constructs a new, empty treap that draws its priorities from `rng` and allocates
    /// `chunk_size` nodes at a time.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_treap::Treap;
    /// use rand::{SeedableRng, XorShiftRng};
    ///
    /// let rng: XorShiftRng = SeedableRng::from_seed([5, 6, 7, 8]);
    /// let mut t = Treap::with_rng_and_chunk_size(rng, 16);
    /// t.insert(1, 1).unwrap();
    /// assert_eq!(t.len(), 1);
    /// ```
    pub fn with_rng_and_chunk_size(rng: R, chunk_size: usize) -> Self {
        Treap {
            root: None,
            nodes: Arena::new(chunk_size),
            rng,
        }
    }

    /// Returns `true` if the treap holds no keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_treap::Treap;
    ///
    /// let mut t = Treap::new();
    /// assert!(t.is_empty());
    /// t.insert(1, 1).unwrap();
    /// assert!(!t.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of keys in the treap.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Inserts a key-value pair into the treap. Returns `Error::DuplicateKey` without modifying
    /// the treap if the key already exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_treap::{Error, Treap};
    ///
    /// let mut t = Treap::new();
    /// assert_eq!(t.insert(1, 1), Ok(()));
    /// assert_eq!(t.insert(1, 2), Err(Error::DuplicateKey));
    /// assert_eq!(t.get(&1), Some(&1));
    /// ```
    pub fn insert(&mut self, key: T, value: U) -> Result<()> {
        let slot = match tree::locate(&self.nodes, self.root, &key) {
            Position::Vacant(slot) => slot,
            Position::Occupied(_) => {
                debug!("rejected duplicate key");
                return Err(Error::DuplicateKey);
            }
        };
        let Treap {
            ref mut root,
            ref mut nodes,
            ref mut rng,
        } = *self;
        let parent = slot.map(|(parent, _)| parent);
        let handle = nodes.allocate(Node::new(key, value, rng.next_u32(), parent));
        tree::attach(nodes, root, handle, slot);
        tree::sift_up(nodes, root, handle);
        Ok(())
    }

    /// Removes a key from the treap and returns its key-value pair. Returns
    /// `Error::KeyNotFound` if the key does not exist, which is always the case for an empty
    /// treap.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_treap::{Error, Treap};
    ///
    /// let mut t = Treap::new();
    /// t.insert(1, 1).unwrap();
    /// assert_eq!(t.remove(&1), Ok((1, 1)));
    /// assert_eq!(t.remove(&1), Err(Error::KeyNotFound));
    /// ```
    pub fn remove(&mut self, key: &T) -> Result<(T, U)> {
        let handle = match tree::find(&self.nodes, self.root, key) {
            Some(handle) => handle,
            None => {
                debug!("rejected removal of a missing key");
                return Err(Error::KeyNotFound);
            }
        };
        let Treap {
            ref mut root,
            ref mut nodes,
            ..
        } = *self;
        tree::sift_down(nodes, root, handle);
        let Node { key, value, .. } = tree::detach(nodes, root, handle);
        Ok((key, value))
    }

    /// Looks up a key. Returns a clone of the associated value and `true` if the key exists,
    /// otherwise a default value and `false`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_treap::Treap;
    ///
    /// let mut t = Treap::new();
    /// t.insert(50, String::from("root")).unwrap();
    /// assert_eq!(t.search(&50), (String::from("root"), true));
    /// assert_eq!(t.search(&100), (String::new(), false));
    /// ```
    pub fn search(&self, key: &T) -> (U, bool)
    where
        U: Clone + Default,
    {
        match self.get(key) {
            Some(value) => (value.clone(), true),
            None => (U::default(), false),
        }
    }

    /// Checks if a key exists in the treap.
    pub fn contains(&self, key: &T) -> bool {
        tree::find(&self.nodes, self.root, key).is_some()
    }

    /// Returns an immutable reference to the value associated with a particular key, or `None` if
    /// the key does not exist.
    pub fn get(&self, key: &T) -> Option<&U> {
        tree::find(&self.nodes, self.root, key).map(|handle| &self.nodes[handle].value)
    }

    /// Returns a mutable reference to the value associated with a particular key, or `None` if
    /// the key does not exist.
    pub fn get_mut(&mut self, key: &T) -> Option<&mut U> {
        let handle = tree::find(&self.nodes, self.root, key)?;
        Some(&mut self.nodes[handle].value)
    }

    /// Returns the number of nodes on the longest path from the root to a leaf, or 0 for an empty
    /// treap. The whole tree is walked on every call.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_treap::Treap;
    ///
    /// let mut t = Treap::new();
    /// assert_eq!(t.height(), 0);
    /// t.insert(10, 100).unwrap();
    /// assert_eq!(t.height(), 1);
    /// ```
    pub fn height(&self) -> usize {
        tree::height(&self.nodes, self.root)
    }

    /// Removes every key from the treap, releasing children before their parents.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_treap::Treap;
    ///
    /// let mut t = Treap::new();
    /// t.insert(1, 1).unwrap();
    /// t.clear();
    /// assert!(t.is_empty());
    /// assert_eq!(t.len(), 0);
    /// ```
    pub fn clear(&mut self) {
        let root = self.root.take();
        let released = tree::clear(&mut self.nodes, root);
        debug!("cleared treap of {} nodes", released);
    }

    /// Exchanges the contents of two treaps, including their priority generators, without
    /// copying any node.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_treap::Treap;
    ///
    /// let mut t = Treap::new();
    /// t.insert(1, 100).unwrap();
    /// let mut u = Treap::new();
    /// u.insert(3, 300).unwrap();
    ///
    /// t.swap(&mut u);
    /// assert_eq!(t.get(&3), Some(&300));
    /// assert_eq!(u.get(&1), Some(&100));
    /// ```
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }
}

impl<T, U, R> Clone for Treap<T, U, R>
where
    T: Ord + Clone,
    U: Clone,
    R: Rng + Clone,
{
    /// Returns a deep copy: every node is freshly allocated with the same key, value and priority,
    /// and the copy has the same shape as `self`.
    fn clone(&self) -> Self {
        let mut nodes = Arena::new(self.nodes.chunk_size());
        let root = tree::copy(&self.nodes, self.root, None, &mut nodes);
        debug!("copied treap of {} nodes", nodes.len());
        Treap {
            root,
            nodes,
            rng: self.rng.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        let mut copy = source.clone();
        self.swap(&mut copy);
    }
}

impl<T, U, R> Drop for Treap<T, U, R> {
    fn drop(&mut self) {
        let root = self.root.take();
        tree::clear(&mut self.nodes, root);
    }
}

impl<T: Ord, U> Default for Treap<T, U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, U, R> SearchTree<T, U> for Treap<T, U, R>
where
    T: Ord,
    U: Clone + Default,
    R: Rng,
{
    fn is_empty(&self) -> bool {
        Treap::is_empty(self)
    }

    fn search(&self, key: &T) -> (U, bool) {
        Treap::search(self, key)
    }

    fn insert(&mut self, key: T, value: U) -> Result<()> {
        Treap::insert(self, key, value)
    }

    fn remove(&mut self, key: &T) -> Result<(T, U)> {
        Treap::remove(self, key)
    }
}
