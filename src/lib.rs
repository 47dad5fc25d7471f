//! `rb-ordered-map` is an ordered key-value map based on a red-black tree.
//!
//! It implements the standard red-black insertion algorithm, ensuring that
//! every modification keeps the tree height within O(logN) and that an
//! in-order traversal yields keys in ascending order.
//!
//! To safely and efficiently handle the parent-child references of the
//! red-black tree in Rust, `rb-ordered-map` uses an array to simulate
//! pointers: nodes live in a vector and link to each other by index, with
//! a shared sentinel slot standing in for every absent child. This also
//! gives the map the `Send` and `Unpin` traits, allowing it to be safely
//! transferred between threads and to maintain a fixed memory location
//! during asynchronous operations.
//!
//! # Example
//!
//! ```rust
//! use rb_ordered_map::OrderedMap;
//!
//! let mut map = OrderedMap::new();
//! map.insert(2, "two");
//! map.insert(1, "one");
//! map.insert(3, "three");
//! assert_eq!(map.get(&2), Some(&"two"));
//!
//! let keys: Vec<_> = map.iter().map(|(k, _)| *k).collect();
//! assert_eq!(keys, [1, 2, 3]);
//! ```

mod entry;
#[cfg(feature = "graphviz")]
mod graphviz;
mod index;
mod iter;
mod node;
mod orderedmap;

#[cfg(test)]
mod tests;

pub use entry::{Entry, OccupiedEntry, VacantEntry};
pub use index::{DefaultIx, IndexType, NodeIndex};
pub use iter::{IntoIter, Iter};
pub use orderedmap::OrderedMap;
