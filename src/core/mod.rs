//! The menu tree model and the algorithms that run over it.
//!
//! A menu is an ordered list of [`MenuNode`]s. Every node is one of the
//! [`NodeKind`] variants; submenus and some roles own child lists. Nodes gain
//! an [`MenuId`] only after [`assign_ids`] has walked the final tree shape.

pub mod builder;
pub mod collaborators;
pub mod error;
pub mod i18n;
pub mod ids;
pub mod snapshot;

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

pub use builder::canonical_tree;
pub use collaborators::{
    AppIdentity, Collaborators, Controller, ControllerState, HostShell, MainAction,
    SettingsStore,
};
pub use error::MenuError;
pub use i18n::{Catalog, IdentityTranslator, LabelParams, Translator};
pub use ids::assign_ids;
pub use snapshot::{snapshot, snapshot_node};

/// An ordered list of sibling nodes.
pub type Tree = Vec<MenuNode>;

/// Position-derived identifier, e.g. `"2-1"` for the second child of the third
/// top-level menu. Only meaningful for the tree it was assigned on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MenuId(String);

impl MenuId {
    pub(crate) fn new(id: String) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MenuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A zero-argument callback run when an item is activated.
///
/// Cloning an `Action` shares the closure; two clones compare equal.
#[derive(Clone)]
pub struct Action(Arc<dyn Fn() -> anyhow::Result<()> + Send + Sync>);

impl Action {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn run(&self) -> anyhow::Result<()> {
        (self.0)()
    }

    /// `true` if both handles point at the same closure.
    pub fn same_as(&self, other: &Action) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Action(..)")
    }
}

impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

/// Platform-native predefined menu behavior, forwarded verbatim to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    About,
    Services,
    Cut,
    Copy,
    Paste,
    SelectAll,
    Hide,
    HideOthers,
    Quit,
    Minimize,
    #[serde(rename = "front")]
    BringAllToFront,
    Window,
}

impl Role {
    /// The native role name understood by the host shell.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::About => "about",
            Role::Services => "services",
            Role::Cut => "cut",
            Role::Copy => "copy",
            Role::Paste => "paste",
            Role::SelectAll => "selectall",
            Role::Hide => "hide",
            Role::HideOthers => "hideothers",
            Role::Quit => "quit",
            Role::Minimize => "minimize",
            Role::BringAllToFront => "front",
            Role::Window => "window",
        }
    }
}

/// Internal tag of a top-level menu, used to locate menus while adapting the
/// tree to a platform. Never serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuTag {
    Application,
    File,
    Play,
    Edit,
    Find,
    Navigation,
    Engines,
    Tools,
    View,
    Window,
    Help,
}

impl MenuTag {
    pub fn as_str(self) -> &'static str {
        match self {
            MenuTag::Application => "application",
            MenuTag::File => "file",
            MenuTag::Play => "play",
            MenuTag::Edit => "edit",
            MenuTag::Find => "find",
            MenuTag::Navigation => "navigation",
            MenuTag::Engines => "engines",
            MenuTag::Tools => "tools",
            MenuTag::View => "view",
            MenuTag::Window => "window",
            MenuTag::Help => "help",
        }
    }
}

impl fmt::Display for MenuTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Marks the items a platform transform relocates or removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKey {
    AppInfo,
    CheckForUpdates,
    Preferences,
    ToggleMenuBar,
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ItemKey::AppInfo => "app-info",
            ItemKey::CheckForUpdates => "check-for-updates",
            ItemKey::Preferences => "preferences",
            ItemKey::ToggleMenuBar => "toggle-menu-bar",
        };
        f.write_str(name)
    }
}

/// A clickable leaf.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accelerator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip)]
    pub action: Option<Action>,
    /// Action executed by the privileged host process instead of locally.
    #[serde(rename = "clickMain", skip_serializing_if = "Option::is_none")]
    pub main_action: Option<MainAction>,
    #[serde(skip)]
    pub key: Option<ItemKey>,
}

impl ActionItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            accelerator: None,
            enabled: None,
            action: None,
            main_action: None,
            key: None,
        }
    }

    pub fn with_accelerator(mut self, accelerator: &str) -> Self {
        self.accelerator = Some(accelerator.to_string());
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    pub fn with_main_action(mut self, main_action: MainAction) -> Self {
        self.main_action = Some(main_action);
        self
    }

    pub fn with_key(mut self, key: ItemKey) -> Self {
        self.key = Some(key);
        self
    }

    /// Items are enabled unless explicitly disabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }
}

/// A checkable leaf whose state lives in the settings store, not on the node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToggleItem {
    #[serde(flatten)]
    pub item: ActionItem,
    /// Boolean setting key read at render time.
    #[serde(rename = "checked")]
    pub setting: String,
}

impl ToggleItem {
    pub fn is_checked(&self, settings: &dyn SettingsStore) -> bool {
        settings
            .get(&self.setting)
            .and_then(|value| value.as_bool())
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleItem {
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submenu: Option<Tree>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submenu {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip)]
    pub tag: Option<MenuTag>,
    #[serde(rename = "submenu")]
    pub children: Tree,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeKind {
    Action(ActionItem),
    Toggle(ToggleItem),
    Separator,
    Role(RoleItem),
    Submenu(Submenu),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuNode {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<MenuId>,
    #[serde(flatten)]
    pub kind: NodeKind,
}

impl MenuNode {
    fn from_kind(kind: NodeKind) -> Self {
        Self { id: None, kind }
    }

    pub fn separator() -> Self {
        Self::from_kind(NodeKind::Separator)
    }

    pub fn role(role: Role) -> Self {
        Self::from_kind(NodeKind::Role(RoleItem {
            role,
            submenu: None,
        }))
    }

    pub fn role_with_submenu(role: Role, children: Tree) -> Self {
        Self::from_kind(NodeKind::Role(RoleItem {
            role,
            submenu: Some(children),
        }))
    }

    pub fn toggle(item: ActionItem, setting: &str) -> Self {
        Self::from_kind(NodeKind::Toggle(ToggleItem {
            item,
            setting: setting.to_string(),
        }))
    }

    pub fn submenu(label: impl Into<String>, children: Tree) -> Self {
        Self::from_kind(NodeKind::Submenu(Submenu {
            label: label.into(),
            role: None,
            tag: None,
            children,
        }))
    }

    /// A tagged top-level menu.
    pub fn menu(tag: MenuTag, label: impl Into<String>, children: Tree) -> Self {
        Self::from_kind(NodeKind::Submenu(Submenu {
            label: label.into(),
            role: None,
            tag: Some(tag),
            children,
        }))
    }

    pub fn tag(&self) -> Option<MenuTag> {
        match &self.kind {
            NodeKind::Submenu(submenu) => submenu.tag,
            _ => None,
        }
    }

    pub fn item_key(&self) -> Option<ItemKey> {
        self.item().and_then(|item| item.key)
    }

    /// The clickable part of action and toggle nodes.
    pub fn item(&self) -> Option<&ActionItem> {
        match &self.kind {
            NodeKind::Action(item) => Some(item),
            NodeKind::Toggle(toggle) => Some(&toggle.item),
            NodeKind::Separator | NodeKind::Role(_) | NodeKind::Submenu(_) => None,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Action(item) => Some(&item.label),
            NodeKind::Toggle(toggle) => Some(&toggle.item.label),
            NodeKind::Submenu(submenu) => Some(&submenu.label),
            NodeKind::Separator | NodeKind::Role(_) => None,
        }
    }

    pub fn children(&self) -> Option<&[MenuNode]> {
        match &self.kind {
            NodeKind::Submenu(submenu) => Some(&submenu.children),
            NodeKind::Role(role) => role.submenu.as_deref(),
            NodeKind::Action(_) | NodeKind::Toggle(_) | NodeKind::Separator => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Tree> {
        match &mut self.kind {
            NodeKind::Submenu(submenu) => Some(&mut submenu.children),
            NodeKind::Role(role) => role.submenu.as_mut(),
            NodeKind::Action(_) | NodeKind::Toggle(_) | NodeKind::Separator => None,
        }
    }

    pub fn is_separator(&self) -> bool {
        matches!(self.kind, NodeKind::Separator)
    }
}

impl From<ActionItem> for MenuNode {
    fn from(item: ActionItem) -> Self {
        Self::from_kind(NodeKind::Action(item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_items_are_enabled_by_default() {
        assert!(ActionItem::new("Open").is_enabled());
        assert!(!ActionItem::new("Info").with_enabled(false).is_enabled());
    }

    #[test]
    fn test_action_clones_share_the_closure() {
        let action = Action::new(|| Ok(()));
        let other = Action::new(|| Ok(()));
        assert!(action.same_as(&action.clone()));
        assert_ne!(action, other);
    }

    #[test]
    fn test_serialization_skips_internal_fields() {
        let node = MenuNode::menu(
            MenuTag::File,
            "&File",
            vec![
                ActionItem::new("&New")
                    .with_accelerator("CmdOrCtrl+N")
                    .with_action(Action::new(|| Ok(())))
                    .into(),
                MenuNode::separator(),
                ActionItem::new("New &Window")
                    .with_main_action(MainAction::NewWindow)
                    .with_enabled(true)
                    .into(),
                MenuNode::toggle(ActionItem::new("Show &Coordinates"), "view.show_coordinates"),
                MenuNode::role_with_submenu(Role::Services, vec![]),
                MenuNode::role(Role::BringAllToFront),
            ],
        );

        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "submenu",
                "label": "&File",
                "submenu": [
                    {"type": "action", "label": "&New", "accelerator": "CmdOrCtrl+N"},
                    {"type": "separator"},
                    {
                        "type": "action",
                        "label": "New &Window",
                        "enabled": true,
                        "clickMain": "newWindow"
                    },
                    {
                        "type": "toggle",
                        "label": "Show &Coordinates",
                        "checked": "view.show_coordinates"
                    },
                    {"type": "role", "role": "services", "submenu": []},
                    {"type": "role", "role": "front"}
                ]
            })
        );
    }

    #[test]
    fn test_children_cover_submenus_and_roles() {
        let mut services = MenuNode::role_with_submenu(Role::Services, vec![]);
        assert_eq!(services.children().map(<[MenuNode]>::len), Some(0));
        assert!(services.children_mut().is_some());
        assert!(MenuNode::role(Role::Quit).children().is_none());
        assert!(MenuNode::separator().children().is_none());
    }
}
