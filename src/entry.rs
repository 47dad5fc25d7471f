use crate::index::{IndexType, NodeIndex};
use crate::node::Node;
use crate::orderedmap::OrderedMap;

/// A view into a single entry in a map, which may either be vacant or occupied.
#[derive(Debug)]
pub enum Entry<'a, K, V, Ix>
where
    K: Ord,
{
    /// An occupied entry.
    Occupied(OccupiedEntry<'a, K, V, Ix>),
    /// A vacant entry.
    Vacant(VacantEntry<'a, K, V, Ix>),
}

/// A view into an occupied entry in an `OrderedMap`.
/// It is part of the [`Entry`] enum.
#[derive(Debug)]
pub struct OccupiedEntry<'a, K, V, Ix>
where
    K: Ord,
{
    /// Reference to the map
    pub map_ref: &'a mut OrderedMap<K, V, Ix>,
    /// The entry node
    pub node_idx: NodeIndex<Ix>,
}

/// A view into a vacant entry in an `OrderedMap`.
/// It is part of the [`Entry`] enum.
#[derive(Debug)]
pub struct VacantEntry<'a, K, V, Ix>
where
    K: Ord,
{
    /// Mutable reference to the map
    pub map_ref: &'a mut OrderedMap<K, V, Ix>,
    /// The key of this entry
    pub key: K,
}

impl<'a, K, V, Ix> Entry<'a, K, V, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    /// Ensures a value is in the entry by inserting the default if empty, and returns
    /// a mutable reference to the value in the entry.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::{Entry, OrderedMap};
    ///
    /// let mut map = OrderedMap::new();
    /// assert!(matches!(map.entry(1), Entry::Vacant(_)));
    /// map.entry(1).or_insert(3);
    /// assert!(matches!(map.entry(1), Entry::Occupied(_)));
    /// assert_eq!(map.get(&1), Some(&3));
    /// ```
    #[inline]
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.map_ref.node_mut(entry.node_idx, Node::value_mut),
            Entry::Vacant(entry) => {
                // a fresh node is always pushed at the back of the arena
                let entry_idx = NodeIndex::new(entry.map_ref.nodes.len());
                let _ignore = entry.map_ref.insert(entry.key, default);
                entry.map_ref.node_mut(entry_idx, Node::value_mut)
            }
        }
    }

    /// Provides in-place mutable access to an occupied entry before any
    /// potential inserts into the map.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::{Entry, OrderedMap};
    ///
    /// let mut map = OrderedMap::new();
    ///
    /// map.insert(6, 3);
    /// assert!(matches!(map.entry(6), Entry::Occupied(_)));
    /// map.entry(6).and_modify(|v| *v += 1);
    /// assert_eq!(map.get(&6), Some(&4));
    /// ```
    #[inline]
    #[must_use]
    pub fn and_modify<F>(self, f: F) -> Self
    where
        F: FnOnce(&mut V),
    {
        match self {
            Entry::Occupied(entry) => {
                f(entry.map_ref.node_mut(entry.node_idx, Node::value_mut));
                Self::Occupied(entry)
            }
            Entry::Vacant(entry) => Self::Vacant(entry),
        }
    }
}
