use crate::arena::{Arena, Handle};
use crate::treap::node::{Link, Node};
use log::trace;
use std::cmp::{self, Ordering};

pub type Nodes<T, U> = Arena<Node<T, U>>;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Side {
    Left,
    Right,
}

/// Where a key lives in a treap, or the empty child slot it would be attached to.
pub enum Position {
    Occupied(Handle),
    Vacant(Option<(Handle, Side)>),
}

enum RemovalCase {
    RotateUp(Handle),
    Detach,
}

pub fn locate<T: Ord, U>(nodes: &Nodes<T, U>, root: Link, key: &T) -> Position {
    let mut curr = match root {
        Some(handle) => handle,
        None => return Position::Vacant(None),
    };
    loop {
        let node = &nodes[curr];
        let (next, side) = match key.cmp(&node.key) {
            Ordering::Less => (node.left, Side::Left),
            Ordering::Greater => (node.right, Side::Right),
            Ordering::Equal => return Position::Occupied(curr),
        };
        match next {
            Some(child) => curr = child,
            None => return Position::Vacant(Some((curr, side))),
        }
    }
}

pub fn find<T: Ord, U>(nodes: &Nodes<T, U>, root: Link, key: &T) -> Link {
    match locate(nodes, root, key) {
        Position::Occupied(handle) => Some(handle),
        Position::Vacant(_) => None,
    }
}

/// Links a freshly allocated node into the slot returned by `locate`.
pub fn attach<T, U>(
    nodes: &mut Nodes<T, U>,
    root: &mut Link,
    handle: Handle,
    slot: Option<(Handle, Side)>,
) {
    match slot {
        Some((parent, Side::Left)) => nodes[parent].left = Some(handle),
        Some((parent, Side::Right)) => nodes[parent].right = Some(handle),
        None => *root = Some(handle),
    }
}

/// Unlinks a leaf from its parent and releases it.
///
/// # Panics
///
/// Panics if the node still has children.
pub fn detach<T, U>(nodes: &mut Nodes<T, U>, root: &mut Link, handle: Handle) -> Node<T, U> {
    assert!(nodes[handle].is_leaf(), "Error: only a leaf can be detached.");
    match nodes[handle].parent {
        Some(parent) => {
            let parent_node = &mut nodes[parent];
            if parent_node.left == Some(handle) {
                parent_node.left = None;
            } else {
                parent_node.right = None;
            }
        }
        None => *root = None,
    }
    nodes.free(handle)
}

/// Moves `handle` one level up, above its parent. A left child takes its parent's place through
/// a right rotation, a right child through a left rotation. In-order key order is preserved and
/// every parent link touched is rewritten.
///
/// # Panics
///
/// Panics if `handle` is the root.
pub fn rotate<T, U>(nodes: &mut Nodes<T, U>, root: &mut Link, handle: Handle) {
    let parent = nodes[handle]
        .parent
        .expect("Expected rotated node to have a parent.");
    let grandparent = nodes[parent].parent;

    let middle = if nodes[parent].left == Some(handle) {
        let middle = nodes[handle].right;
        nodes[parent].left = middle;
        nodes[handle].right = Some(parent);
        middle
    } else {
        let middle = nodes[handle].left;
        nodes[parent].right = middle;
        nodes[handle].left = Some(parent);
        middle
    };

    if let Some(middle) = middle {
        nodes[middle].parent = Some(parent);
    }
    nodes[parent].parent = Some(handle);
    nodes[handle].parent = grandparent;

    match grandparent {
        Some(grandparent) => {
            let grandparent_node = &mut nodes[grandparent];
            if grandparent_node.left == Some(parent) {
                grandparent_node.left = Some(handle);
            } else {
                grandparent_node.right = Some(handle);
            }
        }
        None => *root = Some(handle),
    }
    trace!("rotated {:?} above {:?}", handle, parent);
}

/// Rotates a newly attached node upward until its parent's priority is at least its own.
pub fn sift_up<T, U>(nodes: &mut Nodes<T, U>, root: &mut Link, handle: Handle) {
    while let Some(parent) = nodes[handle].parent {
        if nodes[parent].priority >= nodes[handle].priority {
            break;
        }
        rotate(nodes, root, handle);
    }
}

fn get_removal_case<T, U>(nodes: &Nodes<T, U>, handle: Handle) -> RemovalCase {
    let node = &nodes[handle];
    match (node.left, node.right) {
        (Some(left), Some(right)) => {
            // Equal priorities favour the left child.
            if nodes[left].priority >= nodes[right].priority {
                RemovalCase::RotateUp(left)
            } else {
                RemovalCase::RotateUp(right)
            }
        }
        (Some(child), None) | (None, Some(child)) => RemovalCase::RotateUp(child),
        (None, None) => RemovalCase::Detach,
    }
}

/// Rotates `handle` downward, always lifting its higher-priority child, until it is a leaf.
pub fn sift_down<T, U>(nodes: &mut Nodes<T, U>, root: &mut Link, handle: Handle) {
    while let RemovalCase::RotateUp(child) = get_removal_case(nodes, handle) {
        rotate(nodes, root, child);
    }
}

pub fn height<T, U>(nodes: &Nodes<T, U>, link: Link) -> usize {
    match link {
        Some(handle) => {
            let node = &nodes[handle];
            1 + cmp::max(height(nodes, node.left), height(nodes, node.right))
        }
        None => 0,
    }
}

/// Releases every node of the subtree at `link`, children before their parent, and returns the
/// number of nodes released.
pub fn clear<T, U>(nodes: &mut Nodes<T, U>, link: Link) -> usize {
    match link {
        Some(handle) => {
            let (left, right) = (nodes[handle].left, nodes[handle].right);
            let released = clear(nodes, left) + clear(nodes, right);
            nodes.free(handle);
            released + 1
        }
        None => 0,
    }
}

/// Copies the subtree at `link` from `src` into `dst`, hanging it below `parent`. Keys, values,
/// priorities and shape are reproduced exactly.
pub fn copy<T, U>(src: &Nodes<T, U>, link: Link, parent: Link, dst: &mut Nodes<T, U>) -> Link
where
    T: Clone,
    U: Clone,
{
    link.map(|handle| {
        let node = &src[handle];
        let new_handle = dst.allocate(Node::new(
            node.key.clone(),
            node.value.clone(),
            node.priority,
            parent,
        ));
        let left = copy(src, node.left, Some(new_handle), dst);
        let right = copy(src, node.right, Some(new_handle), dst);
        let new_node = &mut dst[new_handle];
        new_node.left = left;
        new_node.right = right;
        new_handle
    })
}

/// Asserts the search tree, heap and parent link invariants of the subtree at `root` and returns
/// its size.
#[cfg(test)]
pub fn assert_invariants<T: Ord, U>(nodes: &Nodes<T, U>, root: Link) -> usize {
    fn check<T: Ord, U>(
        nodes: &Nodes<T, U>,
        link: Link,
        parent: Link,
        lower: Option<&T>,
        upper: Option<&T>,
    ) -> usize {
        let handle = match link {
            Some(handle) => handle,
            None => return 0,
        };
        let node = &nodes[handle];
        assert_eq!(node.parent, parent);
        if let Some(lower) = lower {
            assert!(node.key > *lower);
        }
        if let Some(upper) = upper {
            assert!(node.key < *upper);
        }
        for child in node.left.iter().chain(node.right.iter()) {
            assert!(nodes[*child].priority <= node.priority);
        }
        1 + check(nodes, node.left, link, lower, Some(&node.key))
            + check(nodes, node.right, link, Some(&node.key), upper)
    }
    check(nodes, root, None, None, None)
}

#[cfg(test)]
mod tests {
    use super::{
        assert_invariants, attach, clear, copy, detach, height, locate, rotate, sift_down, sift_up,
        Nodes, Position,
    };
    use crate::arena::{Arena, Handle};
    use crate::treap::node::{Link, Node};

    fn insert(nodes: &mut Nodes<u32, u32>, root: &mut Link, key: u32, priority: u32) -> Handle {
        let slot = match locate(nodes, *root, &key) {
            Position::Vacant(slot) => slot,
            Position::Occupied(_) => panic!("duplicate key in test fixture"),
        };
        let handle = nodes.allocate(Node::new(key, key * 10, priority, slot.map(|s| s.0)));
        attach(nodes, root, handle, slot);
        handle
    }

    // Builds    2
    //          / \
    //         1   4
    //            / \
    //           3   5
    fn fixture() -> (Nodes<u32, u32>, Link, [Handle; 5]) {
        let mut nodes = Arena::new(4);
        let mut root = None;
        let h2 = insert(&mut nodes, &mut root, 2, 50);
        let h1 = insert(&mut nodes, &mut root, 1, 40);
        let h4 = insert(&mut nodes, &mut root, 4, 30);
        let h3 = insert(&mut nodes, &mut root, 3, 20);
        let h5 = insert(&mut nodes, &mut root, 5, 10);
        (nodes, root, [h1, h2, h3, h4, h5])
    }

    #[test]
    fn test_locate() {
        let (nodes, root, [_, h2, h3, _, _]) = fixture();
        match locate(&nodes, root, &3) {
            Position::Occupied(handle) => assert_eq!(handle, h3),
            Position::Vacant(_) => panic!("expected key 3 to be present"),
        }
        match locate(&nodes, root, &0) {
            Position::Vacant(slot) => assert_eq!(slot.map(|s| s.0), nodes[h2].left),
            Position::Occupied(_) => panic!("expected key 0 to be absent"),
        }
    }

    #[test]
    fn test_rotate_left_at_root() {
        let (mut nodes, mut root, [h1, h2, h3, h4, h5]) = fixture();
        rotate(&mut nodes, &mut root, h4);

        assert_eq!(root, Some(h4));
        assert_eq!(nodes[h4].parent, None);
        assert_eq!(nodes[h4].left, Some(h2));
        assert_eq!(nodes[h4].right, Some(h5));
        assert_eq!(nodes[h2].parent, Some(h4));
        assert_eq!(nodes[h2].left, Some(h1));
        assert_eq!(nodes[h2].right, Some(h3));
        assert_eq!(nodes[h3].parent, Some(h2));
        assert_eq!(height(&nodes, root), 3);
    }

    #[test]
    fn test_rotate_right_below_root() {
        let (mut nodes, mut root, [_, h2, h3, h4, h5]) = fixture();
        rotate(&mut nodes, &mut root, h3);

        assert_eq!(root, Some(h2));
        assert_eq!(nodes[h2].right, Some(h3));
        assert_eq!(nodes[h3].parent, Some(h2));
        assert_eq!(nodes[h3].left, None);
        assert_eq!(nodes[h3].right, Some(h4));
        assert_eq!(nodes[h4].parent, Some(h3));
        assert_eq!(nodes[h4].left, None);
        assert_eq!(nodes[h4].right, Some(h5));
        assert_eq!(height(&nodes, root), 4);
    }

    #[test]
    fn test_rotate_round_trip() {
        let (mut nodes, mut root, [_, h2, _, h4, _]) = fixture();
        rotate(&mut nodes, &mut root, h4);
        rotate(&mut nodes, &mut root, h2);
        assert_eq!(root, Some(h2));
        assert_eq!(assert_invariants(&nodes, root), 5);
    }

    #[test]
    fn test_sift_up() {
        let (mut nodes, mut root, _) = fixture();
        let h6 = insert(&mut nodes, &mut root, 6, 45);
        sift_up(&mut nodes, &mut root, h6);

        assert_eq!(nodes[h6].parent, root);
        assert_eq!(assert_invariants(&nodes, root), 6);
    }

    #[test]
    fn test_sift_up_to_root() {
        let (mut nodes, mut root, _) = fixture();
        let h0 = insert(&mut nodes, &mut root, 0, 99);
        sift_up(&mut nodes, &mut root, h0);

        assert_eq!(root, Some(h0));
        assert_eq!(assert_invariants(&nodes, root), 6);
    }

    #[test]
    fn test_sift_down_and_detach() {
        let (mut nodes, mut root, [_, h2, _, _, _]) = fixture();
        sift_down(&mut nodes, &mut root, h2);
        assert!(nodes[h2].is_leaf());

        let node = detach(&mut nodes, &mut root, h2);
        assert_eq!((node.key, node.value), (2, 20));
        assert_eq!(nodes.len(), 4);
        assert_eq!(assert_invariants(&nodes, root), 4);
    }

    #[test]
    fn test_sift_down_prefers_left_on_tie() {
        let mut nodes = Arena::new(4);
        let mut root = None;
        let h2 = insert(&mut nodes, &mut root, 2, 50);
        let h1 = insert(&mut nodes, &mut root, 1, 10);
        insert(&mut nodes, &mut root, 3, 10);

        sift_down(&mut nodes, &mut root, h2);
        assert_eq!(root, Some(h1));
    }

    #[test]
    fn test_detach_root() {
        let mut nodes = Arena::new(4);
        let mut root = None;
        let handle = insert(&mut nodes, &mut root, 1, 1);
        detach(&mut nodes, &mut root, handle);
        assert_eq!(root, None);
        assert!(nodes.is_empty());
    }

    #[test]
    #[should_panic]
    fn test_detach_inner_node() {
        let (mut nodes, mut root, [_, h2, _, _, _]) = fixture();
        detach(&mut nodes, &mut root, h2);
    }

    #[test]
    fn test_height() {
        let (nodes, root, [h1, _, _, h4, _]) = fixture();
        assert_eq!(height(&nodes, None), 0);
        assert_eq!(height(&nodes, Some(h1)), 1);
        assert_eq!(height(&nodes, Some(h4)), 2);
        assert_eq!(height(&nodes, root), 3);
    }

    #[test]
    fn test_clear() {
        let (mut nodes, root, [_, h2, _, h4, _]) = fixture();
        assert_eq!(clear(&mut nodes, Some(h4)), 3);
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes.get(h4).map(|node| node.key), None);

        nodes[h2].right = None;
        assert_eq!(clear(&mut nodes, root), 2);
        assert!(nodes.is_empty());
    }

    #[test]
    fn test_copy() {
        let (nodes, root, _) = fixture();
        let mut copied = Arena::new(2);
        let copied_root = copy(&nodes, root, None, &mut copied);

        assert_eq!(copied.len(), 5);
        assert_eq!(assert_invariants(&copied, copied_root), 5);
        assert_eq!(height(&copied, copied_root), height(&nodes, root));

        let (src_root, dst_root) = (&nodes[root.unwrap()], &copied[copied_root.unwrap()]);
        assert_eq!(src_root.key, dst_root.key);
        assert_eq!(src_root.priority, dst_root.priority);
        let src_right = &nodes[src_root.right.unwrap()];
        let dst_right = &copied[dst_root.right.unwrap()];
        assert_eq!(
            (src_right.key, src_right.value, src_right.priority),
            (dst_right.key, dst_right.value, dst_right.priority),
        );
    }
}
