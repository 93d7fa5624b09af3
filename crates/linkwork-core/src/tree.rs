//! Unbalanced binary search tree with parent links
//!
//! Nodes live in a contiguous arena and refer to each other by
//! [`NodeIndex`]. The parent link is a plain index, so it never owns the
//! parent and no reference cycle exists.
//!
//! Ordering: for every node, keys in the left subtree are `<` the node's key
//! and keys in the right subtree are `>=` it. Equal keys therefore route
//! right on insert.

use std::cmp::Ordering;
use std::fmt;

use crate::error::{Error, Result};

/// Index of a node in the tree's arena.
///
/// Indices are only stable until the next [`SearchTree::delete`], which
/// compacts the arena.
pub type NodeIndex = usize;

#[derive(Debug, Clone)]
struct Node<K> {
    key: K,
    left: Option<NodeIndex>,
    right: Option<NodeIndex>,
    parent: Option<NodeIndex>,
}

impl<K> Node<K> {
    fn new(key: K, parent: Option<NodeIndex>) -> Self {
        Self {
            key,
            left: None,
            right: None,
            parent,
        }
    }
}

/// Binary search tree over totally ordered keys.
///
/// No rebalancing is performed, so a sorted insertion sequence degrades the
/// tree into a list of depth `n`.
#[derive(Debug, Clone)]
pub struct SearchTree<K> {
    /// Live nodes; every slot is reachable from `root`
    nodes: Vec<Node<K>>,
    root: Option<NodeIndex>,
}

impl<K> Default for SearchTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> SearchTree<K> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Root node, if the tree is not empty
    pub fn root(&self) -> Option<NodeRef<'_, K>> {
        self.root.map(|index| NodeRef { tree: self, index })
    }

    /// Keys in ascending order.
    ///
    /// The iterator is lazy; call again to restart from the smallest key.
    pub fn inorder_traversal(&self) -> InOrder<'_, K> {
        InOrder::new(&self.nodes, self.root)
    }

    /// Alias for [`SearchTree::inorder_traversal`]
    pub fn iter(&self) -> InOrder<'_, K> {
        self.inorder_traversal()
    }

    /// Number of nodes on the longest root-to-leaf path (0 when empty)
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(NodeIndex, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();
        while let Some((index, depth)) = stack.pop() {
            height = height.max(depth);
            let node = &self.nodes[index];
            stack.extend(node.left.map(|l| (l, depth + 1)));
            stack.extend(node.right.map(|r| (r, depth + 1)));
        }
        height
    }

    /// Smallest key
    pub fn min(&self) -> Option<&K> {
        self.root.map(|root| &self.nodes[self.minimum(root)].key)
    }

    /// Largest key
    pub fn max(&self) -> Option<&K> {
        let mut current = self.root?;
        while let Some(right) = self.nodes[current].right {
            current = right;
        }
        Some(&self.nodes[current].key)
    }

    fn minimum(&self, mut index: NodeIndex) -> NodeIndex {
        while let Some(left) = self.nodes[index].left {
            index = left;
        }
        index
    }

    /// Replaces the subtree rooted at `u` with the subtree rooted at `v`,
    /// fixing the link from `u`'s parent and `v`'s parent link.
    fn transplant(&mut self, u: NodeIndex, v: Option<NodeIndex>) {
        let parent = self.nodes[u].parent;
        match parent {
            None => self.root = v,
            Some(p) if self.nodes[p].left == Some(u) => self.nodes[p].left = v,
            Some(p) => self.nodes[p].right = v,
        }
        if let Some(v) = v {
            self.nodes[v].parent = parent;
        }
    }

    /// Removes an unlinked node from the arena and returns its key.
    ///
    /// The last node is moved into the vacated slot, so every link to it is
    /// rewritten to the new index.
    fn release(&mut self, index: NodeIndex) -> K {
        let last = self.nodes.len() - 1;
        let removed = self.nodes.swap_remove(index);
        if index != last {
            let moved = &self.nodes[index];
            let (parent, left, right) = (moved.parent, moved.left, moved.right);
            match parent {
                None => self.root = Some(index),
                Some(p) if self.nodes[p].left == Some(last) => self.nodes[p].left = Some(index),
                Some(p) => self.nodes[p].right = Some(index),
            }
            for child in [left, right].into_iter().flatten() {
                self.nodes[child].parent = Some(index);
            }
        }
        removed.key
    }
}

impl<K: Ord> SearchTree<K> {
    /// Inserts `key`; duplicates are kept and placed in the right subtree.
    pub fn insert(&mut self, key: K) {
        let index = self.nodes.len();
        let Some(mut current) = self.root else {
            self.nodes.push(Node::new(key, None));
            self.root = Some(index);
            return;
        };

        loop {
            let node = &self.nodes[current];
            let next = if key < node.key { node.left } else { node.right };
            match next {
                Some(child) => current = child,
                None => break,
            }
        }

        let goes_left = key < self.nodes[current].key;
        self.nodes.push(Node::new(key, Some(current)));
        if goes_left {
            self.nodes[current].left = Some(index);
        } else {
            self.nodes[current].right = Some(index);
        }
    }

    /// Finds the topmost node holding `key`
    pub fn search(&self, key: &K) -> Option<NodeRef<'_, K>> {
        self.find(key).map(|index| NodeRef { tree: self, index })
    }

    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    fn find(&self, key: &K) -> Option<NodeIndex> {
        let mut current = self.root;
        while let Some(index) = current {
            let node = &self.nodes[index];
            current = match key.cmp(&node.key) {
                Ordering::Equal => return Some(index),
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        None
    }

    /// Deletes the topmost node holding `key` and returns its key.
    ///
    /// Returns `None` when the key is absent; the tree is left untouched.
    pub fn delete(&mut self, key: &K) -> Option<K> {
        let target = self.find(key)?;
        let Node { left, right, .. } = self.nodes[target];

        match (left, right) {
            (None, _) => self.transplant(target, right),
            (_, None) => self.transplant(target, left),
            (Some(left), Some(right)) => {
                let successor = self.minimum(right);
                if successor != right {
                    let successor_right = self.nodes[successor].right;
                    self.transplant(successor, successor_right);
                    self.nodes[successor].right = Some(right);
                    self.nodes[right].parent = Some(successor);
                }
                self.transplant(target, Some(successor));
                self.nodes[successor].left = Some(left);
                self.nodes[left].parent = Some(successor);
            }
        }

        tracing::trace!("Deleted node {} ({} remaining)", target, self.nodes.len() - 1);
        Some(self.release(target))
    }

    /// Checks the ordering and parent-link invariants over the whole tree.
    pub fn validate(&self) -> Result<()> {
        let Some(root) = self.root else {
            return if self.nodes.is_empty() {
                Ok(())
            } else {
                Err(Error::InvariantViolation(format!(
                    "empty root with {} stored nodes",
                    self.nodes.len()
                )))
            };
        };
        if self.nodes[root].parent.is_some() {
            return Err(Error::InvariantViolation("root has a parent".to_string()));
        }

        // (node, inclusive lower bound, exclusive upper bound)
        let mut stack: Vec<(NodeIndex, Option<&K>, Option<&K>)> = vec![(root, None, None)];
        let mut reached = 0;
        while let Some((index, lower, upper)) = stack.pop() {
            reached += 1;
            if reached > self.nodes.len() {
                return Err(Error::InvariantViolation("cycle in child links".to_string()));
            }
            let node = &self.nodes[index];
            if lower.is_some_and(|lower| node.key < *lower)
                || upper.is_some_and(|upper| node.key >= *upper)
            {
                return Err(Error::InvariantViolation(format!(
                    "node {index} is out of order"
                )));
            }
            for (child, bounds) in [
                (node.left, (lower, Some(&node.key))),
                (node.right, (Some(&node.key), upper)),
            ] {
                if let Some(child) = child {
                    if self.nodes[child].parent != Some(index) {
                        return Err(Error::InvariantViolation(format!(
                            "node {child} does not point back to parent {index}"
                        )));
                    }
                    stack.push((child, bounds.0, bounds.1));
                }
            }
        }

        if reached != self.nodes.len() {
            return Err(Error::InvariantViolation(format!(
                "{} of {} nodes reachable from root",
                reached,
                self.nodes.len()
            )));
        }
        Ok(())
    }
}

impl<K: Ord> FromIterator<K> for SearchTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord> Extend<K> for SearchTree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K> IntoIterator for &'a SearchTree<K> {
    type Item = &'a K;
    type IntoIter = InOrder<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.inorder_traversal()
    }
}

impl<K: fmt::Display> fmt::Display for SearchTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, key) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", key)?;
        }
        write!(f, "]")
    }
}

// ============================================================================
// Node view
// ============================================================================

/// Borrowed view of a node, returned by [`SearchTree::search`].
pub struct NodeRef<'a, K> {
    tree: &'a SearchTree<K>,
    index: NodeIndex,
}

impl<'a, K> NodeRef<'a, K> {
    fn at(&self, index: Option<NodeIndex>) -> Option<NodeRef<'a, K>> {
        index.map(|index| NodeRef {
            tree: self.tree,
            index,
        })
    }

    pub fn index(&self) -> NodeIndex {
        self.index
    }

    pub fn key(&self) -> &'a K {
        &self.tree.nodes[self.index].key
    }

    pub fn parent(&self) -> Option<NodeRef<'a, K>> {
        self.at(self.tree.nodes[self.index].parent)
    }

    pub fn left(&self) -> Option<NodeRef<'a, K>> {
        self.at(self.tree.nodes[self.index].left)
    }

    pub fn right(&self) -> Option<NodeRef<'a, K>> {
        self.at(self.tree.nodes[self.index].right)
    }

    pub fn is_root(&self) -> bool {
        self.tree.root == Some(self.index)
    }
}

impl<K> Clone for NodeRef<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for NodeRef<'_, K> {}

impl<K> PartialEq for NodeRef<'_, K> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.index == other.index
    }
}

impl<K: fmt::Debug> fmt::Debug for NodeRef<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("index", &self.index)
            .field("key", self.key())
            .finish()
    }
}

// ============================================================================
// In-order iterator
// ============================================================================

/// Ascending key iterator over a [`SearchTree`].
pub struct InOrder<'a, K> {
    nodes: &'a [Node<K>],
    /// Nodes whose key has not been yielded and whose left subtree is done
    stack: Vec<NodeIndex>,
}

impl<'a, K> InOrder<'a, K> {
    fn new(nodes: &'a [Node<K>], root: Option<NodeIndex>) -> Self {
        let mut iter = Self {
            nodes,
            stack: Vec::new(),
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut current: Option<NodeIndex>) {
        while let Some(index) = current {
            self.stack.push(index);
            current = self.nodes[index].left;
        }
    }
}

impl<'a, K> Iterator for InOrder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let node = &self.nodes[index];
        self.push_left_spine(node.right);
        Some(&node.key)
    }
}

impl<K> Clone for InOrder<'_, K> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            stack: self.stack.clone(),
        }
    }
}
