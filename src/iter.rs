use crate::index::{IndexType, NodeIndex};
use crate::node::Node;
use crate::orderedmap::OrderedMap;

/// Pushes a link of nodes on the left to stack.
fn left_link<K, V, Ix>(map_ref: &OrderedMap<K, V, Ix>, mut x: NodeIndex<Ix>) -> Vec<NodeIndex<Ix>>
where
    K: Ord,
    Ix: IndexType,
{
    let mut nodes = vec![];
    while !map_ref.node_ref(x, Node::is_sentinel) {
        nodes.push(x);
        x = map_ref.node_ref(x, Node::left);
    }
    nodes
}

/// An iterator over the entries of an `OrderedMap`, in ascending key order.
///
/// The traversal is in-order and driven by an explicit stack, so deep
/// trees cannot overflow the call stack.
#[derive(Debug)]
pub struct Iter<'a, K, V, Ix>
where
    K: Ord,
{
    /// Reference to the map
    map_ref: &'a OrderedMap<K, V, Ix>,
    /// Stack for iteration
    stack: Vec<NodeIndex<Ix>>,
}

impl<'a, K, V, Ix> Iter<'a, K, V, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    pub(crate) fn new(map_ref: &'a OrderedMap<K, V, Ix>) -> Self {
        Iter {
            map_ref,
            stack: left_link(map_ref, map_ref.root),
        }
    }
}

impl<'a, K, V, Ix> Iterator for Iter<'a, K, V, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let x = self.stack.pop()?;
        self.stack.extend(left_link(
            self.map_ref,
            self.map_ref.node_ref(x, Node::right),
        ));
        Some(self.map_ref.node_ref(x, Node::key_value))
    }
}

/// An owning iterator over the entries of an `OrderedMap`, in ascending key order.
#[derive(Debug)]
pub struct IntoIter<K, V, Ix>
where
    K: Ord,
{
    /// The consumed map
    map: OrderedMap<K, V, Ix>,
    /// Stack for iteration
    stack: Vec<NodeIndex<Ix>>,
}

impl<K, V, Ix> IntoIter<K, V, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    pub(crate) fn new(map: OrderedMap<K, V, Ix>) -> Self {
        let stack = left_link(&map, map.root);
        IntoIter { map, stack }
    }
}

impl<K, V, Ix> Iterator for IntoIter<K, V, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    type Item = (K, V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let x = self.stack.pop()?;
        self.stack
            .extend(left_link(&self.map, self.map.node_ref(x, Node::right)));
        let node = &mut self.map.nodes[x.index()];
        Some((node.key.take().unwrap(), node.value.take().unwrap()))
    }
}

impl<'a, K, V, Ix> IntoIterator for &'a OrderedMap<K, V, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, Ix>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, Ix> IntoIterator for OrderedMap<K, V, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    type Item = (K, V);
    type IntoIter = IntoIter<K, V, Ix>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}
