use std::fmt::Display;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::index::IndexType;
use crate::orderedmap::OrderedMap;

impl<K, V, Ix> OrderedMap<K, V, Ix>
where
    K: Ord + Display,
    V: Display,
    Ix: IndexType,
{
    /// Write the tree to a Graphviz DOT file, labeling each node with
    /// its key and value and filling it with its red-black color.
    #[inline]
    pub fn draw(&self, path: impl AsRef<Path>) -> io::Result<()> {
        self.draw_inner(path, true)
    }

    /// Same as [`draw`](Self::draw) but labels nodes with keys only.
    #[inline]
    pub fn draw_without_value(&self, path: impl AsRef<Path>) -> io::Result<()> {
        self.draw_inner(path, false)
    }

    fn draw_inner(&self, path: impl AsRef<Path>, with_value: bool) -> io::Result<()> {
        let mut file = File::create(path)?;
        writeln!(file, "digraph rbtree {{")?;
        writeln!(
            file,
            "    node [shape=circle, style=filled, fontcolor=white];"
        )?;
        // slot 0 is the sentinel and is not drawn
        for (idx, node) in self.nodes.iter().enumerate().skip(1) {
            let fill = if node.is_red() { "red" } else { "black" };
            if with_value {
                writeln!(
                    file,
                    "    n{} [label=\"{}\\n{}\", fillcolor={}];",
                    idx,
                    node.key(),
                    node.value(),
                    fill
                )?;
            } else {
                writeln!(
                    file,
                    "    n{} [label=\"{}\", fillcolor={}];",
                    idx,
                    node.key(),
                    fill
                )?;
            }
            for child in [node.left(), node.right()] {
                if child.index() != 0 {
                    writeln!(file, "    n{} -> n{};", idx, child.index())?;
                }
            }
        }
        writeln!(file, "}}")
    }
}
