//! Structural copies of menu trees.
//!
//! A snapshot owns fresh containers at every depth (child lists, labels,
//! ids) while action closures stay shared with the source: they stand for
//! behavior that must exist once. Consumers mutate snapshots freely; the
//! published tree never changes shape after it is built.

use super::{MenuNode, Tree};

/// Copies a list of sibling nodes, preserving order and length.
pub fn snapshot(nodes: &[MenuNode]) -> Tree {
    nodes.iter().map(snapshot_node).collect()
}

/// Copies one node and its whole subtree.
pub fn snapshot_node(node: &MenuNode) -> MenuNode {
    node.clone()
}
