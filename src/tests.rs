use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::index::NodeIndex;
use crate::node::{Color, Node};

use super::*;

struct KeyGenerator {
    rng: StdRng,
    unique: HashSet<i32>,
    limit: i32,
}

impl KeyGenerator {
    fn new(seed: [u8; 32]) -> Self {
        const LIMIT: i32 = 100_000;
        Self {
            rng: SeedableRng::from_seed(seed),
            unique: HashSet::new(),
            limit: LIMIT,
        }
    }

    fn next(&mut self) -> i32 {
        self.rng.gen_range(0..self.limit)
    }

    fn next_unique(&mut self) -> i32 {
        let mut key = self.next();
        while self.unique.contains(&key) {
            key = self.next();
        }
        self.unique.insert(key);
        key
    }
}

impl<V> OrderedMap<i32, V> {
    /// 1. Every node is either red or black.
    /// 2. The root is black.
    /// 3. Every leaf (NIL) is black.
    /// 4. If a node is red, then both its children are black.
    /// 5. For each node, all simple paths from the node to descendant leaves contain the
    ///    same number of black nodes.
    fn check_rb_properties(&self) {
        assert!(matches!(
            self.node_ref(self.root, Node::color),
            Color::Black
        ));
        self.check_children_color(self.root);
        self.check_black_height(self.root);
    }

    fn check_children_color(&self, x: NodeIndex<u32>) {
        if self.node_ref(x, Node::is_sentinel) {
            return;
        }
        self.check_children_color(self.node_ref(x, Node::left));
        self.check_children_color(self.node_ref(x, Node::right));
        if self.node_ref(x, Node::is_red) {
            assert!(matches!(self.left_ref(x, Node::color), Color::Black));
            assert!(matches!(self.right_ref(x, Node::color), Color::Black));
        }
    }

    fn check_black_height(&self, x: NodeIndex<u32>) -> usize {
        if self.node_ref(x, Node::is_sentinel) {
            return 0;
        }
        let lefth = self.check_black_height(self.node_ref(x, Node::left));
        let righth = self.check_black_height(self.node_ref(x, Node::right));
        assert_eq!(lefth, righth);
        if self.node_ref(x, Node::is_black) {
            return lefth + 1;
        }
        lefth
    }

    fn height(&self) -> usize {
        self.height_inner(self.root)
    }

    fn height_inner(&self, x: NodeIndex<u32>) -> usize {
        if self.node_ref(x, Node::is_sentinel) {
            return 0;
        }
        let lefth = self.height_inner(self.node_ref(x, Node::left));
        let righth = self.height_inner(self.node_ref(x, Node::right));
        lefth.max(righth) + 1
    }

    fn key_of(&self, x: NodeIndex<u32>) -> i32 {
        self.node_ref(x, |n| *n.key())
    }

    /// Arena snapshot of links, colors and keys, values excluded.
    fn structure(&self) -> Vec<Structure> {
        self.nodes
            .iter()
            .map(|n| Structure {
                left: n.left,
                right: n.right,
                parent: n.parent,
                red: matches!(n.color, Color::Red),
                key: n.key,
            })
            .collect()
    }
}

#[derive(Debug, PartialEq)]
struct Structure {
    left: Option<NodeIndex<u32>>,
    right: Option<NodeIndex<u32>>,
    parent: Option<NodeIndex<u32>>,
    red: bool,
    key: Option<i32>,
}

fn with_map_and_generator<V>(test_fn: impl Fn(OrderedMap<i32, V>, KeyGenerator)) {
    let seeds = vec![[0; 32], [1; 32], [2; 32]];
    for seed in seeds {
        let gen = KeyGenerator::new(seed);
        let map = OrderedMap::new();
        test_fn(map, gen);
    }
}

/// Expected shape after inserting {10, 20, 30} in any of the orders that
/// trigger a single rebalancing: black root 20 with red children 10 and 30.
fn assert_three_node_shape(map: &OrderedMap<i32, i32>) {
    let root = map.root;
    assert_eq!(map.key_of(root), 20);
    assert!(map.node_ref(root, Node::is_black));

    let left = map.node_ref(root, Node::left);
    assert_eq!(map.key_of(left), 10);
    assert!(map.node_ref(left, Node::is_red));

    let right = map.node_ref(root, Node::right);
    assert_eq!(map.key_of(right), 30);
    assert!(map.node_ref(right, Node::is_red));
}

#[test]
fn red_black_tree_properties_is_satisfied() {
    with_map_and_generator(|mut map, mut gen| {
        let keys: Vec<_> = std::iter::repeat_with(|| gen.next_unique())
            .take(1000)
            .collect();
        for k in keys {
            let _ignore = map.insert(k, ());
        }
        map.check_rb_properties();
    });
}

#[test]
fn properties_hold_after_every_insert() {
    with_map_and_generator(|mut map, mut gen| {
        for _ in 0..200 {
            let _ignore = map.insert(gen.next_unique(), ());
            map.check_rb_properties();
        }
    });
}

#[test]
fn map_len_will_update() {
    with_map_and_generator(|mut map, mut gen| {
        let keys: Vec<_> = std::iter::repeat_with(|| gen.next_unique())
            .take(100)
            .collect();
        for k in keys.clone() {
            let _ignore = map.insert(k, ());
        }
        assert_eq!(map.len(), 100);
        // overwriting existing keys adds no elements
        for k in keys {
            let _ignore = map.insert(k, ());
        }
        assert_eq!(map.len(), 100);
    });
}

#[test]
fn iterate_through_map_is_sorted() {
    with_map_and_generator(|mut map, mut gen| {
        let mut keys: Vec<_> = std::iter::repeat_with(|| gen.next_unique())
            .enumerate()
            .take(1000)
            .collect();
        for (v, k) in keys.clone() {
            let _ignore = map.insert(k, v);
        }
        keys.sort_unstable_by(|a, b| a.1.cmp(&b.1));

        for ((ek, ev), (v, k)) in map.iter().zip(keys.iter()) {
            assert_eq!(ek, k);
            assert_eq!(ev, v);
        }
    });
}

#[test]
fn traversal_is_strictly_ascending() {
    with_map_and_generator(|mut map, mut gen| {
        for _ in 0..1000 {
            let _ignore = map.insert(gen.next(), ());
        }
        let keys: Vec<_> = map.iter().map(|(k, _)| *k).collect();
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
    });
}

#[test]
fn iter_is_restartable() {
    let mut map = OrderedMap::new();
    for k in [4, 2, 6, 1, 3] {
        map.insert(k, ());
    }
    let first: Vec<_> = map.iter().map(|(k, _)| *k).collect();
    let second: Vec<_> = map.iter().map(|(k, _)| *k).collect();
    assert_eq!(first, second);
    assert_eq!(first, [1, 2, 3, 4, 6]);
}

#[test]
fn ascending_insert_rotates_left_around_root() {
    let mut map = OrderedMap::new();
    map.insert(10, 0);
    map.insert(20, 0);
    map.insert(30, 0);
    assert_three_node_shape(&map);
    map.check_rb_properties();
}

#[test]
fn descending_insert_rotates_right_around_root() {
    let mut map = OrderedMap::new();
    map.insert(30, 0);
    map.insert(20, 0);
    map.insert(10, 0);
    assert_three_node_shape(&map);
    map.check_rb_properties();
}

#[test]
fn zigzag_insert_double_rotates() {
    let mut map = OrderedMap::new();
    map.insert(10, 0);
    map.insert(30, 0);
    map.insert(20, 0);
    assert_three_node_shape(&map);
    map.check_rb_properties();
}

#[test]
fn zagzig_insert_double_rotates() {
    let mut map = OrderedMap::new();
    map.insert(30, 0);
    map.insert(10, 0);
    map.insert(20, 0);
    assert_three_node_shape(&map);
    map.check_rb_properties();
}

#[test]
fn seven_ascending_keys_stay_balanced() {
    let mut map = OrderedMap::new();
    for k in [10, 20, 30, 40, 50, 60, 70] {
        map.insert(k, k * 10);
        map.check_rb_properties();
    }
    let entries: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(
        entries,
        [
            (10, 100),
            (20, 200),
            (30, 300),
            (40, 400),
            (50, 500),
            (60, 600),
            (70, 700)
        ]
    );
}

#[test]
fn overwrite_changes_value_only() {
    with_map_and_generator(|mut map, mut gen| {
        let keys: Vec<_> = std::iter::repeat_with(|| gen.next_unique())
            .take(500)
            .collect();
        for k in keys.clone() {
            let _ignore = map.insert(k, 0);
        }
        let before = map.structure();

        let k = keys[250];
        assert_eq!(map.insert(k, 1), Some(0));
        assert_eq!(map.structure(), before);
        assert_eq!(map.len(), 500);
        assert_eq!(map.get(&k), Some(&1));
    });
}

#[test]
fn reinsert_same_pairs_is_idempotent() {
    with_map_and_generator(|mut map, mut gen| {
        let mut pairs: Vec<_> = std::iter::repeat_with(|| gen.next_unique())
            .take(500)
            .map(|k| (k, k.wrapping_mul(3)))
            .collect();
        for (k, v) in pairs.clone() {
            let _ignore = map.insert(k, v);
        }
        let before = map.structure();

        pairs.shuffle(&mut gen.rng);
        for (k, v) in pairs {
            assert_eq!(map.insert(k, v), Some(v));
        }
        assert_eq!(map.structure(), before);
    });
}

#[test]
fn height_is_logarithmic() {
    with_map_and_generator(|mut map, mut gen| {
        for n in 1..=1000usize {
            let _ignore = map.insert(gen.next_unique(), ());
            let bound = 2.0 * ((n + 1) as f64).log2();
            assert!(
                (map.height() as f64) <= bound,
                "height {} exceeds bound {} for {} keys",
                map.height(),
                bound,
                n
            );
        }
    });
}

#[test]
fn get_mut_and_contains_key_are_ok() {
    let mut map = OrderedMap::new();
    assert_eq!(map.get(&1), None);
    map.insert(1, 10);
    map.insert(2, 20);
    assert!(map.contains_key(&1));
    assert!(!map.contains_key(&3));
    if let Some(v) = map.get_mut(&2) {
        *v += 1;
    }
    assert_eq!(map.get(&2), Some(&21));
}

#[test]
fn first_and_last_key_value_are_ok() {
    let mut map = OrderedMap::new();
    assert_eq!(map.first_key_value(), None);
    assert_eq!(map.last_key_value(), None);
    for k in [5, 9, 1, 7, 3] {
        map.insert(k, k * 2);
    }
    assert_eq!(map.first_key_value(), Some((&1, &2)));
    assert_eq!(map.last_key_value(), Some((&9, &18)));
}

#[test]
fn entry_api_is_ok() {
    let mut map = OrderedMap::new();
    assert!(matches!(map.entry(1), Entry::Vacant(_)));
    *map.entry(1).or_insert(0) += 5;
    assert!(matches!(map.entry(1), Entry::Occupied(_)));
    map.entry(1).and_modify(|v| *v += 1).or_insert(100);
    assert_eq!(map.get(&1), Some(&6));
    map.entry(2).and_modify(|v| *v += 1).or_insert(100);
    assert_eq!(map.get(&2), Some(&100));
}

#[test]
fn into_iter_is_sorted_and_complete() {
    let mut map = OrderedMap::new();
    for k in [4, 2, 6, 1, 3, 5, 7] {
        map.insert(k, k.to_string());
    }
    let entries: Vec<_> = map.into_iter().collect();
    let keys: Vec<_> = entries.iter().map(|(k, _)| *k).collect();
    assert_eq!(keys, [1, 2, 3, 4, 5, 6, 7]);
    for (k, v) in entries {
        assert_eq!(v, k.to_string());
    }
}

#[test]
fn ordered_map_clear_is_ok() {
    let mut map = OrderedMap::new();
    map.insert(1, 1);
    map.insert(2, 2);
    map.insert(6, 3);
    assert_eq!(map.len(), 3);
    map.clear();
    assert_eq!(map.len(), 0);
    assert!(map.is_empty());
    assert_eq!(map.nodes.len(), 1);
    assert!(map.nodes[0].is_sentinel());
    assert_eq!(map.iter().next(), None::<(&i32, &i32)>);
}

#[test]
fn string_keys_are_ok() {
    let mut map = OrderedMap::new();
    map.insert("pear".to_string(), 3);
    map.insert("apple".to_string(), 1);
    map.insert("orange".to_string(), 2);
    assert_eq!(map.get(&"apple".to_string()), Some(&1));
    let keys: Vec<_> = map.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, ["apple", "orange", "pear"]);
}

#[cfg(feature = "serde")]
#[test]
fn test_serde_ordered_map() {
    use serde_json::{json, Value};

    let mut map = OrderedMap::<i32, i32>::new();
    map.insert(1, 10);
    map.insert(2, 20);
    map.insert(3, 30);

    // Serialize the map to JSON
    let serialized = serde_json::to_string(&map).unwrap();
    let expected = json!({
        "nodes": [
            // sentinel node
            {
                "left": null,
                "right": null,
                "parent": null,
                "color": "Black",
                "key": null,
                "value": null
            },
            {
                "left": 0,
                "right": 0,
                "parent": 2,
                "color": "Red",
                "key": 1,
                "value": 10
            },
            {
                "left": 1,
                "right": 3,
                "parent": 0,
                "color": "Black",
                "key": 2,
                "value": 20
            },
            {
                "left": 0,
                "right": 0,
                "parent": 2,
                "color": "Red",
                "key": 3,
                "value": 30
            }
        ],
        "root": 2,
        "len": 3
    });
    let actual: Value = serde_json::from_str(&serialized).unwrap();
    assert_eq!(expected, actual);

    // Deserialize the map from JSON
    let deserialized: OrderedMap<i32, i32> = serde_json::from_str(&serialized).unwrap();
    let dv: Vec<_> = deserialized.iter().map(|(k, v)| (*k, *v)).collect();
    let ev: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();

    assert_eq!(ev, dv);
}

#[cfg(feature = "graphviz")]
#[test]
fn ordered_map_draw_is_ok() {
    let mut map = OrderedMap::new();
    for k in [16, 8, 0, 5, 6, 15, 17, 25, 26, 19] {
        map.insert(k, k);
    }

    let path = std::env::temp_dir().join("rb_ordered_map_draw.dot");
    map.draw(&path).unwrap();
    let dot = std::fs::read_to_string(&path).unwrap();
    assert!(dot.starts_with("digraph"));

    map.draw_without_value(&path).unwrap();
}
