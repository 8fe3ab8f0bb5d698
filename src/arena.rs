//! Chunked allocator that backs the nodes of a treap.

use std::mem;
use std::ops::{Index, IndexMut};
use std::vec::Vec;

/// A handle to an object stored in an `Arena<T>`.
///
/// Handles are plain indices: copying one never copies or owns the object behind it.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Handle {
    chunk: usize,
    offset: usize,
}

enum Slot<T> {
    Occupied(T),
    Vacant(Option<Handle>),
}

/// An allocator for a single type of object.
///
/// Objects are stored in fixed-size chunks that are never reallocated once created. Freed slots
/// are threaded onto a free list and reused by later allocations. Every object is dropped when
/// the arena is dropped.
///
/// # Examples
///
/// ```
/// use linked_treap::arena::Arena;
///
/// let mut arena = Arena::new(16);
///
/// let x = arena.allocate(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena.free(x), 2);
/// assert!(arena.is_empty());
/// ```
pub struct Arena<T> {
    free_head: Option<Handle>,
    chunks: Vec<Vec<Slot<T>>>,
    chunk_size: usize,
    len: usize,
    capacity: usize,
}

impl<T> Arena<T> {
    /// Constructs a new, empty `Arena<T>` that grows by `chunk_size` objects at a time.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    pub fn new(chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "Error: chunk size must be positive.");
        Arena {
            free_head: None,
            chunks: Vec::new(),
            chunk_size,
            len: 0,
            capacity: 0,
        }
    }

    fn slot(&self, handle: Handle) -> Option<&Slot<T>> {
        self.chunks
            .get(handle.chunk)
            .and_then(|chunk| chunk.get(handle.offset))
    }

    fn slot_mut(&mut self, handle: Handle) -> Option<&mut Slot<T>> {
        self.chunks
            .get_mut(handle.chunk)
            .and_then(|chunk| chunk.get_mut(handle.offset))
    }

    /// Stores `value` in the arena and returns the handle used to reach it.
    pub fn allocate(&mut self, value: T) -> Handle {
        self.len += 1;

        if let Some(handle) = self.free_head.take() {
            let slot = self
                .slot_mut(handle)
                .expect("Error: free list points outside of the arena.");
            match mem::replace(slot, Slot::Occupied(value)) {
                Slot::Vacant(next) => self.free_head = next,
                Slot::Occupied(_) => panic!("Error: free list points to an occupied slot."),
            }
            return handle;
        }

        if self.len > self.capacity {
            self.chunks.push(Vec::with_capacity(self.chunk_size));
            self.capacity += self.chunk_size;
        }
        let chunk = self.chunks.len() - 1;
        let last_chunk = &mut self.chunks[chunk];
        last_chunk.push(Slot::Occupied(value));
        Handle {
            chunk,
            offset: last_chunk.len() - 1,
        }
    }

    /// Releases the object behind `handle` and returns it. The slot is reused by a later
    /// allocation.
    ///
    /// # Panics
    ///
    /// Panics if `handle` does not point to a live object.
    pub fn free(&mut self, handle: Handle) -> T {
        let next = self.free_head;
        let slot = self
            .slot_mut(handle)
            .expect("Error: attempting to free invalid slot.");
        match mem::replace(slot, Slot::Vacant(next)) {
            Slot::Occupied(value) => {
                self.len -= 1;
                self.free_head = Some(handle);
                value
            }
            Slot::Vacant(previous) => {
                *slot = Slot::Vacant(previous);
                panic!("Error: attempting to free vacant slot.");
            }
        }
    }

    /// Returns a reference to the object behind `handle`, or `None` if it is not live.
    pub fn get(&self, handle: Handle) -> Option<&T> {
        match self.slot(handle) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to the object behind `handle`, or `None` if it is not live.
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        match self.slot_mut(handle) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns the number of live objects.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no object is live.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of objects per chunk.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }
}

impl<T> Index<Handle> for Arena<T> {
    type Output = T;

    fn index(&self, handle: Handle) -> &Self::Output {
        self.get(handle).expect("Error: dangling arena handle.")
    }
}

impl<T> IndexMut<Handle> for Arena<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        self.get_mut(handle).expect("Error: dangling arena handle.")
    }
}
