//! macOS menu conventions.
//!
//! The global menu bar carries an application menu holding About,
//! Preferences, Services, Hide and Quit, plus a Window menu before Help.
//! There is no in-window menu bar to toggle.

use super::{drop_separator_at, menu_children, menu_position, take_item, Step, Working};
use crate::core::{
    ActionItem, Collaborators, ItemKey, MainAction, MenuError, MenuNode, MenuTag, NodeKind, Role,
    Submenu,
};

pub(super) const STEPS: &[Step] = &[
    Step {
        name: "stash-help-info",
        apply: stash_help_info,
    },
    Step {
        name: "create-application-menu",
        apply: create_application_menu,
    },
    Step {
        name: "stash-preferences",
        apply: stash_preferences,
    },
    Step {
        name: "complete-application-menu",
        apply: complete_application_menu,
    },
    Step {
        name: "insert-window-menu",
        apply: insert_window_menu,
    },
    Step {
        name: "remove-menu-bar-toggle",
        apply: remove_menu_bar_toggle,
    },
];

/// Takes the version info and update check out of Help, with the separator
/// that follows them.
fn stash_help_info(mut working: Working, _: &Collaborators) -> Result<Working, MenuError> {
    let help = menu_children(&mut working.menus, MenuTag::Help)?;
    let (_, info) = take_item(help, MenuTag::Help, ItemKey::AppInfo)?;
    let (index, updates) = take_item(help, MenuTag::Help, ItemKey::CheckForUpdates)?;
    drop_separator_at(help, index);

    working.stash.extend([info, updates]);
    Ok(working)
}

/// Opens the menu list with the application menu: About, then the stashed
/// help entries.
fn create_application_menu(
    mut working: Working,
    ctx: &Collaborators,
) -> Result<Working, MenuError> {
    let mut children = vec![MenuNode::role(Role::About)];
    children.append(&mut working.stash);

    let label = ctx.t(&ctx.identity.name);
    working
        .menus
        .insert(0, MenuNode::menu(MenuTag::Application, label, children));
    Ok(working)
}

/// Takes Preferences out of File, dropping the separator above it.
fn stash_preferences(mut working: Working, _: &Collaborators) -> Result<Working, MenuError> {
    let file = menu_children(&mut working.menus, MenuTag::File)?;
    let (index, preferences) = take_item(file, MenuTag::File, ItemKey::Preferences)?;
    if index > 0 {
        drop_separator_at(file, index - 1);
    }

    working.stash.push(preferences);
    Ok(working)
}

fn complete_application_menu(
    mut working: Working,
    ctx: &Collaborators,
) -> Result<Working, MenuError> {
    let preferences = working.stash.pop().ok_or(MenuError::MissingItem {
        menu: MenuTag::File,
        item: ItemKey::Preferences,
    })?;
    let text = MenuNode::submenu(
        ctx.t("Text"),
        vec![
            MenuNode::role(Role::Cut),
            MenuNode::role(Role::Copy),
            MenuNode::role(Role::Paste),
            MenuNode::role(Role::SelectAll),
        ],
    );

    let app = menu_children(&mut working.menus, MenuTag::Application)?;
    app.extend([
        MenuNode::separator(),
        preferences,
        MenuNode::separator(),
        MenuNode::role_with_submenu(Role::Services, Vec::new()),
        text,
        MenuNode::separator(),
        MenuNode::role(Role::Hide),
        MenuNode::role(Role::HideOthers),
        MenuNode::separator(),
        MenuNode::role(Role::Quit),
    ]);
    Ok(working)
}

/// Inserts the Window menu right before Help.
fn insert_window_menu(mut working: Working, ctx: &Collaborators) -> Result<Working, MenuError> {
    let help = menu_position(&working.menus, MenuTag::Help)?;
    let window = MenuNode {
        id: None,
        kind: NodeKind::Submenu(Submenu {
            label: ctx.t("Window"),
            role: Some(Role::Window),
            tag: Some(MenuTag::Window),
            children: vec![
                ActionItem::new(ctx.t("New Window"))
                    .with_main_action(MainAction::NewWindow)
                    .with_enabled(true)
                    .into(),
                MenuNode::role(Role::Minimize),
                MenuNode::separator(),
                MenuNode::role(Role::BringAllToFront),
            ],
        }),
    };

    working.menus.insert(help, window);
    Ok(working)
}

/// The global menu bar cannot be hidden.
fn remove_menu_bar_toggle(mut working: Working, _: &Collaborators) -> Result<Working, MenuError> {
    let view = menu_children(&mut working.menus, MenuTag::View)?;
    take_item(view, MenuTag::View, ItemKey::ToggleMenuBar)?;
    Ok(working)
}
