//! Defines the error type for building, adapting and activating menus.

use thiserror::Error;

use super::{ItemKey, MenuTag};

/// The primary error type for the menu layer.
///
/// The structural variants describe a menu definition that does not match
/// what a platform transform expects. They indicate a defect in the menu
/// definition and are never recovered from.
#[derive(Debug, Error)]
pub enum MenuError {
    /// A transform step looked for a top-level menu that is not in the tree.
    #[error("top-level menu `{0}` not found")]
    MissingMenu(MenuTag),

    /// A transform step looked for an item that is not in its menu.
    #[error("item `{item}` not found in the `{menu}` menu")]
    MissingItem { menu: MenuTag, item: ItemKey },

    /// The platform transform was applied to a tree it already rewrote.
    #[error("menu tree has already been adapted to its platform")]
    AlreadyAdapted,

    #[error("no menu item with id `{0}`")]
    UnknownId(String),

    #[error("menu item `{0}` is disabled")]
    Disabled(String),

    /// The node is a separator, a role, a submenu, or an item with nothing to run.
    #[error("menu item `{0}` cannot be activated")]
    NotActivatable(String),

    /// A failure raised by the controller or the host shell while running an action.
    #[error(transparent)]
    Action(#[from] anyhow::Error),
}
