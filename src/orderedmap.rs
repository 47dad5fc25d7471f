use std::cmp::Ordering;

use crate::entry::{Entry, OccupiedEntry, VacantEntry};
use crate::index::{DefaultIx, IndexType, NodeIndex};
use crate::iter::Iter;
use crate::node::{Color, Node};

/// An ordered key-value map backed by a red-black tree.
///
/// Nodes are stored in a vector and linked by indices, with the slot at
/// index 0 acting as the shared black sentinel for absent children.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderedMap<K, V, Ix = DefaultIx> {
    /// Vector that stores nodes
    pub(crate) nodes: Vec<Node<K, V, Ix>>,
    /// Root of the tree
    pub(crate) root: NodeIndex<Ix>,
    /// Number of elements in the map
    pub(crate) len: usize,
}

impl<K, V, Ix> OrderedMap<K, V, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    /// Creates a new `OrderedMap` with estimated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = vec![Self::new_sentinel()];
        nodes.reserve(capacity);
        OrderedMap {
            nodes,
            root: Self::sentinel(),
            len: 0,
        }
    }

    /// Insert a key-value pair into the map.
    /// If the key exists, overwrite its value in place and return the
    /// previous value; the tree structure and colors are left untouched.
    ///
    /// # Panics
    ///
    /// This method panics when the tree is at the maximum number of nodes for its index
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// assert_eq!(map.insert(5, 1), None);
    /// assert_eq!(map.insert(5, 2), Some(1));
    /// assert_eq!(map.insert(5, 3), Some(2));
    /// ```
    #[inline]
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let mut y = Self::sentinel();
        let mut x = self.root;

        while !self.node_ref(x, Node::is_sentinel) {
            y = x;
            match key.cmp(self.node_ref(x, Node::key)) {
                Ordering::Equal => return Some(self.node_mut(x, Node::set_value(value))),
                Ordering::Less => x = self.node_ref(x, Node::left),
                Ordering::Greater => x = self.node_ref(x, Node::right),
            }
        }

        let z = self.new_node(key, value);
        self.node_mut(z, Node::set_parent(y));
        if self.node_ref(y, Node::is_sentinel) {
            // first node becomes the black root, nothing to rebalance
            self.root = z;
            self.node_mut(z, Node::set_color(Color::Black));
        } else {
            if self.node_ref(z, Node::key) < self.node_ref(y, Node::key) {
                self.node_mut(y, Node::set_left(z));
            } else {
                self.node_mut(y, Node::set_right(z));
            }
            self.insert_fixup(z);
        }

        self.len = self.len.wrapping_add(1);
        None
    }

    /// Return a reference to the value corresponding to the key.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(1, "a");
    /// map.insert(7, "b");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&7), Some(&"b"));
    /// assert_eq!(map.get(&5), None);
    /// ```
    #[inline]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.search_exact(key)
            .map(|idx| self.node_ref(idx, Node::value))
    }

    /// Return a mutable reference to the value corresponding to the key.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(3, 0);
    /// map.get_mut(&3).map(|v| *v += 1);
    /// assert_eq!(map.get(&3), Some(&1));
    /// ```
    #[inline]
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.search_exact(key)
            .map(|idx| self.node_mut(idx, Node::value_mut))
    }

    /// Return `true` if the map contains a value for the given key.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(2, ());
    /// assert!(map.contains_key(&2));
    /// assert!(!map.contains_key(&3));
    /// ```
    #[inline]
    pub fn contains_key(&self, key: &K) -> bool {
        self.search_exact(key).is_some()
    }

    /// Return the entry with the smallest key, or `None` if the map is empty.
    #[inline]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        if self.node_ref(self.root, Node::is_sentinel) {
            return None;
        }
        let idx = self.tree_minimum(self.root);
        Some(self.node_ref(idx, Node::key_value))
    }

    /// Return the entry with the largest key, or `None` if the map is empty.
    #[inline]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        if self.node_ref(self.root, Node::is_sentinel) {
            return None;
        }
        let idx = self.tree_maximum(self.root);
        Some(self.node_ref(idx, Node::key_value))
    }

    /// Get an iterator over the entries of the map, sorted by key.
    ///
    /// Each call starts a fresh in-order traversal from the smallest key.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V, Ix> {
        Iter::new(self)
    }

    /// Get the given key's corresponding entry in the map for in-place manipulation.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::{Entry, OrderedMap};
    ///
    /// let mut map = OrderedMap::new();
    ///
    /// assert!(matches!(map.entry(1), Entry::Vacant(_)));
    /// map.entry(1).or_insert(0);
    /// assert!(matches!(map.entry(1), Entry::Occupied(_)));
    /// map.entry(1).and_modify(|v| *v += 1);
    /// assert_eq!(map.get(&1), Some(&1));
    /// ```
    #[inline]
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V, Ix> {
        match self.search_exact(&key) {
            Some(node_idx) => Entry::Occupied(OccupiedEntry {
                map_ref: self,
                node_idx,
            }),
            None => Entry::Vacant(VacantEntry { map_ref: self, key }),
        }
    }

    /// Remove all elements from the map
    #[inline]
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.nodes.push(Self::new_sentinel());
        self.root = Self::sentinel();
        self.len = 0;
    }

    /// Return the number of elements in the map.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return `true` if the map contains no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, V> OrderedMap<K, V>
where
    K: Ord,
{
    /// Create an empty `OrderedMap`
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Self::new_sentinel()],
            root: Self::sentinel(),
            len: 0,
        }
    }
}

impl<K, V> Default for OrderedMap<K, V>
where
    K: Ord,
{
    #[inline]
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<K, V, Ix> OrderedMap<K, V, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    /// Create a new sentinel node
    fn new_sentinel() -> Node<K, V, Ix> {
        Node {
            key: None,
            value: None,
            left: None,
            right: None,
            parent: None,
            color: Color::Black,
        }
    }

    /// Allocate a new red tree node in the arena and return its index.
    fn new_node(&mut self, key: K, value: V) -> NodeIndex<Ix> {
        let node_idx = NodeIndex::new(self.nodes.len());
        // check for max capacity, except if we use usize
        assert!(
            <Ix as IndexType>::max().index() == !0 || NodeIndex::end() != node_idx,
            "Reached maximum number of nodes"
        );
        self.nodes.push(Node {
            key: Some(key),
            value: Some(value),
            left: Some(Self::sentinel()),
            right: Some(Self::sentinel()),
            parent: Some(Self::sentinel()),
            color: Color::Red,
        });
        node_idx
    }

    /// Get the sentinel node index
    fn sentinel() -> NodeIndex<Ix> {
        NodeIndex::new(0)
    }
}

impl<K, V, Ix> OrderedMap<K, V, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    /// Search for the node with exactly the given key.
    fn search_exact(&self, key: &K) -> Option<NodeIndex<Ix>> {
        let mut x = self.root;
        while !self.node_ref(x, Node::is_sentinel) {
            match key.cmp(self.node_ref(x, Node::key)) {
                Ordering::Equal => return Some(x),
                Ordering::Less => x = self.node_ref(x, Node::left),
                Ordering::Greater => x = self.node_ref(x, Node::right),
            }
        }
        None
    }

    /// Restore red-black tree properties after an insert.
    ///
    /// The inserted node is red, so only the red-red property can be
    /// violated, and only between `z` and its parent. A red uncle is
    /// resolved by recoloring and retrying at the grandparent; a black
    /// or absent uncle by at most two rotations, which terminate the loop.
    fn insert_fixup(&mut self, mut z: NodeIndex<Ix>) {
        while self.parent_ref(z, Node::is_red) {
            if self.grand_parent_ref(z, Node::is_sentinel) {
                break;
            }
            if self.is_left_child(self.node_ref(z, Node::parent)) {
                let y = self.grand_parent_ref(z, Node::right);
                if self.node_ref(y, Node::is_red) {
                    self.parent_mut(z, Node::set_color(Color::Black));
                    self.node_mut(y, Node::set_color(Color::Black));
                    self.grand_parent_mut(z, Node::set_color(Color::Red));
                    z = self.parent_ref(z, Node::parent);
                } else {
                    if self.is_right_child(z) {
                        z = self.node_ref(z, Node::parent);
                        self.left_rotate(z);
                    }
                    self.parent_mut(z, Node::set_color(Color::Black));
                    self.grand_parent_mut(z, Node::set_color(Color::Red));
                    self.right_rotate(self.parent_ref(z, Node::parent));
                }
            } else {
                let y = self.grand_parent_ref(z, Node::left);
                if self.node_ref(y, Node::is_red) {
                    self.parent_mut(z, Node::set_color(Color::Black));
                    self.node_mut(y, Node::set_color(Color::Black));
                    self.grand_parent_mut(z, Node::set_color(Color::Red));
                    z = self.parent_ref(z, Node::parent);
                } else {
                    if self.is_left_child(z) {
                        z = self.node_ref(z, Node::parent);
                        self.right_rotate(z);
                    }
                    self.parent_mut(z, Node::set_color(Color::Black));
                    self.grand_parent_mut(z, Node::set_color(Color::Red));
                    self.left_rotate(self.parent_ref(z, Node::parent));
                }
            }
        }
        self.node_mut(self.root, Node::set_color(Color::Black));
    }

    /// Binary tree left rotate.
    ///
    /// Requires a non-sentinel right child; colors are not touched.
    fn left_rotate(&mut self, x: NodeIndex<Ix>) {
        if self.right_ref(x, Node::is_sentinel) {
            return;
        }
        let y = self.node_ref(x, Node::right);
        self.node_mut(x, Node::set_right(self.node_ref(y, Node::left)));
        if !self.left_ref(y, Node::is_sentinel) {
            self.left_mut(y, Node::set_parent(x));
        }

        self.replace_parent(x, y);
        self.node_mut(y, Node::set_left(x));
    }

    /// Binary tree right rotate.
    ///
    /// Requires a non-sentinel left child; colors are not touched.
    fn right_rotate(&mut self, x: NodeIndex<Ix>) {
        if self.left_ref(x, Node::is_sentinel) {
            return;
        }
        let y = self.node_ref(x, Node::left);
        self.node_mut(x, Node::set_left(self.node_ref(y, Node::right)));
        if !self.right_ref(y, Node::is_sentinel) {
            self.right_mut(y, Node::set_parent(x));
        }

        self.replace_parent(x, y);
        self.node_mut(y, Node::set_right(x));
    }

    /// Replace parent during a rotation.
    fn replace_parent(&mut self, x: NodeIndex<Ix>, y: NodeIndex<Ix>) {
        self.node_mut(y, Node::set_parent(self.node_ref(x, Node::parent)));
        if self.parent_ref(x, Node::is_sentinel) {
            self.root = y;
        } else if self.is_left_child(x) {
            self.parent_mut(x, Node::set_left(y));
        } else {
            self.parent_mut(x, Node::set_right(y));
        }
        self.node_mut(x, Node::set_parent(y));
    }

    /// Find the node with the minimum key in the subtree rooted at `x`.
    fn tree_minimum(&self, mut x: NodeIndex<Ix>) -> NodeIndex<Ix> {
        while !self.left_ref(x, Node::is_sentinel) {
            x = self.node_ref(x, Node::left);
        }
        x
    }

    /// Find the node with the maximum key in the subtree rooted at `x`.
    fn tree_maximum(&self, mut x: NodeIndex<Ix>) -> NodeIndex<Ix> {
        while !self.right_ref(x, Node::is_sentinel) {
            x = self.node_ref(x, Node::right);
        }
        x
    }

    /// Check if a node is a left child of its parent.
    fn is_left_child(&self, node: NodeIndex<Ix>) -> bool {
        self.parent_ref(node, Node::left) == node
    }

    /// Check if a node is a right child of its parent.
    fn is_right_child(&self, node: NodeIndex<Ix>) -> bool {
        self.parent_ref(node, Node::right) == node
    }
}

// Convenient methods for reference or mutate current/parent/left/right node
impl<'a, K, V, Ix> OrderedMap<K, V, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn node_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, V, Ix>) -> R,
    {
        op(&self.nodes[node.index()])
    }

    pub(crate) fn node_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, V, Ix>) -> R,
    {
        op(&mut self.nodes[node.index()])
    }

    pub(crate) fn left_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, V, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].left().index();
        op(&self.nodes[idx])
    }

    pub(crate) fn right_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, V, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].right().index();
        op(&self.nodes[idx])
    }

    fn parent_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, V, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].parent().index();
        op(&self.nodes[idx])
    }

    fn grand_parent_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, V, Ix>) -> R,
    {
        let parent_idx = self.nodes[node.index()].parent().index();
        let grand_parent_idx = self.nodes[parent_idx].parent().index();
        op(&self.nodes[grand_parent_idx])
    }

    fn left_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, V, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].left().index();
        op(&mut self.nodes[idx])
    }

    fn right_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, V, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].right().index();
        op(&mut self.nodes[idx])
    }

    fn parent_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, V, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].parent().index();
        op(&mut self.nodes[idx])
    }

    fn grand_parent_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, V, Ix>) -> R,
    {
        let parent_idx = self.nodes[node.index()].parent().index();
        let grand_parent_idx = self.nodes[parent_idx].parent().index();
        op(&mut self.nodes[grand_parent_idx])
    }
}
