//! Platform profiles and the structural rewrites they need.
//!
//! Keep OS conventions here to avoid leaking them into the menu definition.
//! A profile maps to an ordered list of [`Step`]s that run exactly once over
//! the canonical tree, before ids are assigned.

mod macos;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::{Collaborators, ItemKey, MenuError, MenuNode, MenuTag, Tree};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[serde(alias = "darwin")]
    MacOs,
    #[serde(alias = "win32")]
    Windows,
    Linux,
    Other,
}

impl Platform {
    /// The platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOs
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "linux") {
            Platform::Linux
        } else {
            Platform::Other
        }
    }

    /// The transform steps for this platform, in application order.
    pub fn steps(self) -> &'static [Step] {
        match self {
            Platform::MacOs => macos::STEPS,
            Platform::Windows | Platform::Linux | Platform::Other => &[],
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::MacOs => "macos",
            Platform::Windows => "windows",
            Platform::Linux => "linux",
            Platform::Other => "other",
        };
        f.write_str(name)
    }
}

impl FromStr for Platform {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "macos" | "darwin" => Ok(Platform::MacOs),
            "windows" | "win32" => Ok(Platform::Windows),
            "linux" => Ok(Platform::Linux),
            "other" => Ok(Platform::Other),
            _ => Err(anyhow::anyhow!("unknown platform `{s}`")),
        }
    }
}

/// The tree being rewritten, plus nodes set aside by one step for a later one.
#[derive(Debug)]
pub struct Working {
    pub menus: Tree,
    stash: Vec<MenuNode>,
}

impl Working {
    fn new(menus: Tree) -> Self {
        Self {
            menus,
            stash: Vec::new(),
        }
    }
}

/// One named rewrite of the pipeline.
pub struct Step {
    pub name: &'static str,
    pub apply: fn(Working, &Collaborators) -> Result<Working, MenuError>,
}

/// Rewrites the canonical tree for `platform`. A no-op for platforms without
/// divergent conventions.
///
/// Fails with [`MenuError::AlreadyAdapted`] when the tree already carries the
/// output of a previous run, and with a structural error when a menu or item
/// a step relocates is missing.
pub fn adapt(menus: Tree, platform: Platform, ctx: &Collaborators) -> Result<Tree, MenuError> {
    let steps = platform.steps();
    if steps.is_empty() {
        tracing::debug!("No menu transform needed for {}", platform);
        return Ok(menus);
    }
    if menus.iter().any(|menu| menu.tag() == Some(MenuTag::Application)) {
        return Err(MenuError::AlreadyAdapted);
    }

    let working = steps
        .iter()
        .try_fold(Working::new(menus), |working, step| {
            tracing::debug!("Applying menu transform step `{}`", step.name);
            (step.apply)(working, ctx)
        })?;
    debug_assert!(working.stash.is_empty(), "transform left stashed items");

    tracing::info!(
        "Adapted menu for {} ({} steps, {} top-level menus)",
        platform,
        steps.len(),
        working.menus.len()
    );
    Ok(working.menus)
}

/// The child list of the top-level menu tagged `tag`.
fn menu_children(menus: &mut Tree, tag: MenuTag) -> Result<&mut Tree, MenuError> {
    menus
        .iter_mut()
        .find(|menu| menu.tag() == Some(tag))
        .and_then(MenuNode::children_mut)
        .ok_or(MenuError::MissingMenu(tag))
}

/// Position of the top-level menu tagged `tag`.
fn menu_position(menus: &[MenuNode], tag: MenuTag) -> Result<usize, MenuError> {
    menus
        .iter()
        .position(|menu| menu.tag() == Some(tag))
        .ok_or(MenuError::MissingMenu(tag))
}

/// Removes the item keyed `key` from `children`, returning it and the index it
/// occupied.
fn take_item(
    children: &mut Tree,
    menu: MenuTag,
    key: ItemKey,
) -> Result<(usize, MenuNode), MenuError> {
    let index = children
        .iter()
        .position(|node| node.item_key() == Some(key))
        .ok_or(MenuError::MissingItem { menu, item: key })?;
    Ok((index, children.remove(index)))
}

/// Removes the node at `index` if it is a separator.
fn drop_separator_at(children: &mut Tree, index: usize) {
    if children.get(index).is_some_and(MenuNode::is_separator) {
        children.remove(index);
    }
}
