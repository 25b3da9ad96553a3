//! The published menu: built once, adapted once, then read-only.

use std::fmt;
use std::sync::Arc;

use crate::core::i18n::strip_mnemonic;
use crate::core::{
    assign_ids, canonical_tree, snapshot, Collaborators, HostShell, MenuError, MenuNode,
    NodeKind, SettingsStore, Tree,
};
use crate::platform::{self, Platform};

/// A finished menu tree together with the collaborators needed to activate it.
///
/// The tree shape is frozen; hand [`Menu::snapshot`] to consumers that need
/// to mutate or serialize it.
pub struct Menu {
    nodes: Tree,
    platform: Platform,
    settings: Arc<dyn SettingsStore>,
    host: Arc<dyn HostShell>,
}

impl fmt::Debug for Menu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Menu")
            .field("platform", &self.platform)
            .field("nodes", &self.nodes)
            .finish_non_exhaustive()
    }
}

/// Builds the canonical tree, adapts it to `platform`, then assigns ids.
pub fn build_menu(platform: Platform, collaborators: Collaborators) -> Result<Menu, MenuError> {
    let canonical = canonical_tree(platform, &collaborators);
    let mut nodes = platform::adapt(canonical, platform, &collaborators)?;
    assign_ids(&mut nodes, "");

    tracing::info!(
        "Published menu for {} with {} top-level menus",
        platform,
        nodes.len()
    );
    Ok(Menu {
        nodes,
        platform,
        settings: collaborators.settings,
        host: collaborators.host,
    })
}

impl Menu {
    pub fn nodes(&self) -> &[MenuNode] {
        &self.nodes
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// An independent copy of the whole tree.
    pub fn snapshot(&self) -> Tree {
        snapshot(&self.nodes)
    }

    /// Serializes a snapshot for a consumer in another process.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self.snapshot())
    }

    /// Looks a node up by id. Ids encode the path, so this walks one branch.
    pub fn find(&self, id: &str) -> Option<&MenuNode> {
        let mut level: &[MenuNode] = &self.nodes;
        let mut found = None;
        for segment in id.split('-') {
            let index: usize = segment.parse().ok()?;
            let node = level.get(index)?;
            level = node.children().unwrap_or_default();
            found = Some(node);
        }
        found.filter(|node| node.id.as_ref().is_some_and(|node_id| node_id.as_str() == id))
    }

    /// Checked state of a toggle, read from the settings store now.
    /// `None` for nodes that are not toggles.
    pub fn is_checked(&self, id: &str) -> Option<bool> {
        match &self.find(id)?.kind {
            NodeKind::Toggle(toggle) => Some(toggle.is_checked(self.settings.as_ref())),
            _ => None,
        }
    }

    /// Runs the item's local action, then forwards its host action if any.
    ///
    /// Controller and host failures are returned as [`MenuError::Action`]
    /// unchanged.
    pub fn activate(&self, id: &str) -> Result<(), MenuError> {
        let node = self
            .find(id)
            .ok_or_else(|| MenuError::UnknownId(id.to_string()))?;
        let item = node
            .item()
            .ok_or_else(|| MenuError::NotActivatable(id.to_string()))?;
        if !item.is_enabled() {
            return Err(MenuError::Disabled(id.to_string()));
        }
        if item.action.is_none() && item.main_action.is_none() {
            return Err(MenuError::NotActivatable(id.to_string()));
        }

        tracing::debug!("Activating menu item {} ({})", id, item.label);
        if let Some(action) = &item.action {
            action.run()?;
        }
        if let Some(main_action) = item.main_action {
            self.host.forward(main_action)?;
        }
        Ok(())
    }

    /// One line per node, indented by depth: `id  label`.
    pub fn outline(&self) -> Vec<String> {
        let mut lines = Vec::new();
        outline_into(&self.nodes, 0, &mut lines);
        lines
    }
}

fn outline_into(nodes: &[MenuNode], depth: usize, lines: &mut Vec<String>) {
    for node in nodes {
        let id = node.id.as_ref().map(|id| id.as_str()).unwrap_or("?");
        let text = match &node.kind {
            NodeKind::Separator => "---".to_string(),
            NodeKind::Role(role) => format!("<{}>", role.role.as_str()),
            NodeKind::Toggle(toggle) => format!("[ ] {}", strip_mnemonic(&toggle.item.label)),
            NodeKind::Action(item) => strip_mnemonic(&item.label),
            NodeKind::Submenu(submenu) => format!("{} >", strip_mnemonic(&submenu.label)),
        };
        lines.push(format!("{}{:<8}{}", "  ".repeat(depth), id, text));
        if let Some(children) = node.children() {
            outline_into(children, depth + 1, lines);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::collaborators::keys;
    use crate::core::MainAction;
    use crate::utils::test_helpers::Fixture;

    fn linux_menu(fixture: &Fixture) -> Menu {
        build_menu(Platform::Linux, fixture.collaborators.clone()).unwrap()
    }

    #[test]
    fn test_find_by_id() {
        let fixture = Fixture::new();
        let menu = linux_menu(&fixture);

        assert_eq!(menu.platform(), Platform::Linux);
        assert_eq!(menu.find("0").and_then(MenuNode::label), Some("&File"));
        assert_eq!(menu.find("0-1").and_then(MenuNode::label), Some("New &Window"));
        assert_eq!(
            menu.find("0-7-1").and_then(MenuNode::label),
            Some("&Copy SGF")
        );
        assert!(menu.find("0-2").unwrap().is_separator());
        assert!(menu.find("42").is_none());
        assert!(menu.find("0-x").is_none());
        assert!(menu.find("").is_none());
    }

    #[test]
    fn test_activate_runs_action() {
        let fixture = Fixture::new();
        let menu = linux_menu(&fixture);

        menu.activate("2-0").unwrap();
        assert_eq!(fixture.controller.journal(), vec!["undo"]);
    }

    #[test]
    fn test_activate_forwards_main_action() {
        let fixture = Fixture::new();
        let menu = linux_menu(&fixture);

        menu.activate("0-1").unwrap();
        assert_eq!(
            *fixture.host.forwarded.lock().unwrap(),
            vec![MainAction::NewWindow]
        );
        assert!(fixture.controller.journal().is_empty());
    }

    #[test]
    fn test_activate_rejects_what_cannot_run() {
        let fixture = Fixture::new();
        let menu = linux_menu(&fixture);

        assert!(matches!(menu.activate("nope"), Err(MenuError::UnknownId(_))));
        assert!(matches!(menu.activate("0"), Err(MenuError::NotActivatable(_))));
        assert!(matches!(menu.activate("0-2"), Err(MenuError::NotActivatable(_))));
        // Help > version info
        assert!(matches!(menu.activate("8-0"), Err(MenuError::Disabled(_))));
    }

    #[test]
    fn test_controller_failure_is_returned_unchanged() {
        let fixture = Fixture::new();
        let menu = linux_menu(&fixture);
        fixture.controller.fail_on("undo");

        let err = menu.activate("2-0").unwrap_err();
        assert!(matches!(err, MenuError::Action(_)));
        assert_eq!(err.to_string(), "undo failed");
    }

    #[test]
    fn test_is_checked_reads_live_settings() {
        let fixture = Fixture::new();
        let menu = linux_menu(&fixture);
        let coordinates = "7-3";

        assert_eq!(menu.is_checked(coordinates), Some(false));
        menu.activate(coordinates).unwrap();
        assert_eq!(menu.is_checked(coordinates), Some(true));

        fixture
            .settings
            .set(keys::SHOW_COORDINATES, serde_json::Value::Bool(false));
        assert_eq!(menu.is_checked(coordinates), Some(false));
        assert_eq!(menu.is_checked("7-1"), None);
    }

    #[test]
    fn test_snapshot_is_independent() {
        let fixture = Fixture::new();
        let menu = linux_menu(&fixture);

        let mut copy = menu.snapshot();
        copy.truncate(1);
        copy[0].children_mut().unwrap().clear();

        assert_eq!(menu.nodes().len(), 9);
        assert_eq!(menu.find("0-0").and_then(MenuNode::label), Some("&New"));
    }

    #[test]
    fn test_json_carries_ids() {
        let fixture = Fixture::new();
        let menu = linux_menu(&fixture);

        let json = menu.to_json().unwrap();
        assert_eq!(json[0]["id"], "0");
        assert_eq!(json[0]["submenu"][1]["id"], "0-1");
        assert_eq!(json[0]["submenu"][1]["clickMain"], "newWindow");
        assert_eq!(json[7]["submenu"][3]["checked"], keys::SHOW_COORDINATES);
    }

    #[test]
    fn test_outline() {
        let fixture = Fixture::new();
        let menu = linux_menu(&fixture);

        let outline = menu.outline();
        assert_eq!(outline[0], "0       File >");
        assert_eq!(outline[1], "  0-0     New");
        assert_eq!(outline[3], "  0-2     ---");
        assert!(outline.contains(&"  7-3     [ ] Show Coordinates".to_string()));
    }
}
