//! Assigns position-derived ids to every node of a menu tree.

use super::{MenuId, MenuNode};

/// Stamps `prefix + index` on every node, depth-first and pre-order. Children
/// of a node with id `"2"` get `"2-0"`, `"2-1"`, and so on.
///
/// Ids depend only on the tree shape, never on labels, so they must be
/// regenerated after any structural change.
pub fn assign_ids(nodes: &mut [MenuNode], prefix: &str) {
    for (index, node) in nodes.iter_mut().enumerate() {
        let id = format!("{prefix}{index}");
        if let Some(children) = node.children_mut() {
            assign_ids(children, &format!("{id}-"));
        }
        node.id = Some(MenuId::new(id));
    }
}
