/// Number of nodes allocated per arena chunk when none is configured.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Construction parameters for a `Treap`.
///
/// # Examples
///
/// ```
/// use linked_treap::{Treap, TreapConfig};
///
/// let config = TreapConfig::new().chunk_size(64).seed([1, 1, 1, 1]);
/// let mut t = Treap::with_config(config);
/// t.insert(0, 0).unwrap();
/// assert_eq!(t.len(), 1);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TreapConfig {
    pub(crate) chunk_size: usize,
    pub(crate) seed: Option<[u32; 4]>,
}

impl TreapConfig {
    /// Returns the default configuration: chunks of `DEFAULT_CHUNK_SIZE` nodes and a priority
    /// generator seeded from the operating system.
    pub fn new() -> Self {
        TreapConfig {
            chunk_size: DEFAULT_CHUNK_SIZE,
            seed: None,
        }
    }

    /// Sets the number of nodes allocated at a time. Must be positive.
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Seeds the priority generator so that the shape of the treap is reproducible.
    ///
    /// # Panics
    ///
    /// Panics if `seed` is all zeros.
    pub fn seed(mut self, seed: [u32; 4]) -> Self {
        assert!(
            seed.iter().any(|word| *word != 0),
            "Error: seed must not be all zeros."
        );
        self.seed = Some(seed);
        self
    }
}

impl Default for TreapConfig {
    fn default() -> Self {
        Self::new()
    }
}
