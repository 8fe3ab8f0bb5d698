use crate::arena::Handle;

/// A link to another node of the same treap. Following a link never transfers ownership: every
/// node is owned by the arena of the treap it belongs to.
pub type Link = Option<Handle>;

/// A struct representing an internal node of a treap.
pub struct Node<T, U> {
    pub key: T,
    pub value: U,
    pub priority: u32,
    pub parent: Link,
    pub left: Link,
    pub right: Link,
}

impl<T, U> Node<T, U> {
    pub fn new(key: T, value: U, priority: u32, parent: Link) -> Self {
        Node {
            key,
            value,
            priority,
            parent,
            left: None,
            right: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}
