//! Builds the canonical, platform-neutral menu tree.
//!
//! The tree is plain data: labels go through the translator once, at build
//! time, and every action closure captures a clone of the [`Collaborators`]
//! so it reads live controller state and settings when it runs.

use anyhow::Result;
use serde_json::Value;

use super::collaborators::{
    keys, toggle_setting, ContentFormat, Direction, Drawer, FindQuery, GenerateMoveOptions, Mode,
    NewFileOptions, PreferencesTab, Rotation, Sign, Tool, TreePosition,
};
use super::{
    Action, ActionItem, Collaborators, ItemKey, LabelParams, MainAction, MenuNode, MenuTag, Tree,
};
use crate::platform::Platform;

/// Builds the top-level menu list: File, Play, Edit, Find, Navigation,
/// Engines, Tools, View, Help.
pub fn canonical_tree(platform: Platform, ctx: &Collaborators) -> Tree {
    let menus = vec![
        file_menu(ctx),
        play_menu(ctx),
        edit_menu(platform, ctx),
        find_menu(ctx),
        navigation_menu(ctx),
        engines_menu(ctx),
        tools_menu(ctx),
        view_menu(platform, ctx),
        help_menu(ctx),
    ];
    tracing::debug!("Built canonical menu with {} top-level menus", menus.len());
    menus
}

/// An item whose action runs `f` against the collaborators.
fn click<F>(ctx: &Collaborators, label: &str, f: F) -> ActionItem
where
    F: Fn(&Collaborators) -> Result<()> + Send + Sync + 'static,
{
    let bound = ctx.clone();
    ActionItem::new(ctx.t(label)).with_action(Action::new(move || f(&bound)))
}

/// A checkable item bound to the boolean setting `key`. Activating it flips
/// the setting, then runs `f`.
fn toggle<F>(
    ctx: &Collaborators,
    label: &str,
    key: &'static str,
    accelerator: Option<&str>,
    f: F,
) -> MenuNode
where
    F: Fn(&Collaborators) -> Result<()> + Send + Sync + 'static,
{
    let mut item = click(ctx, label, move |c| {
        toggle_setting(c.settings.as_ref(), key);
        f(c)
    });
    if let Some(accelerator) = accelerator {
        item = item.with_accelerator(accelerator);
    }
    MenuNode::toggle(item, key)
}

fn position(c: &Collaborators) -> TreePosition {
    c.controller.state().tree_position
}

/// Switches to `mode`, or back to play mode when already in it.
fn toggle_mode(c: &Collaborators, mode: Mode) -> Result<()> {
    let next = if c.controller.state().mode == mode {
        Mode::Play
    } else {
        mode
    };
    c.controller.set_mode(next)
}

fn select_tool(c: &Collaborators, tool: Tool) -> Result<()> {
    c.controller.set_mode(Mode::Edit)?;
    c.controller.select_tool(tool)
}

fn find_query(c: &Collaborators) -> FindQuery {
    let state = c.controller.state();
    FindQuery {
        vertex: state.find_vertex,
        text: state.find_text,
    }
}

fn zoom_factor(c: &Collaborators) -> f64 {
    c.settings
        .get(keys::ZOOM_FACTOR)
        .and_then(|value| value.as_f64())
        .unwrap_or(1.0)
}

fn set_zoom_factor(c: &Collaborators, factor: f64) {
    c.settings.set(keys::ZOOM_FACTOR, Value::from(factor));
}

fn file_menu(ctx: &Collaborators) -> MenuNode {
    MenuNode::menu(
        MenuTag::File,
        ctx.t("&File"),
        vec![
            click(ctx, "&New", |c| {
                c.controller.new_file(NewFileOptions {
                    play_sound: true,
                    show_info: true,
                })
            })
            .with_accelerator("CmdOrCtrl+N")
            .into(),
            ActionItem::new(ctx.t("New &Window"))
                .with_accelerator("CmdOrCtrl+Shift+N")
                .with_main_action(MainAction::NewWindow)
                .with_enabled(true)
                .into(),
            MenuNode::separator(),
            click(ctx, "&Open…", |c| c.controller.load_file())
                .with_accelerator("CmdOrCtrl+O")
                .into(),
            click(ctx, "&Save", |c| {
                let filename = c.controller.state().represented_filename;
                c.controller.save_file(filename.as_deref())
            })
            .with_accelerator("CmdOrCtrl+S")
            .into(),
            click(ctx, "Sa&ve As…", |c| c.controller.save_file(None))
                .with_accelerator("CmdOrCtrl+Shift+S")
                .into(),
            MenuNode::separator(),
            MenuNode::submenu(
                ctx.t("&Clipboard"),
                vec![
                    click(ctx, "&Load SGF", |c| {
                        let content = c.host.read_clipboard()?;
                        c.controller.load_content(&content, ContentFormat::Sgf)
                    })
                    .into(),
                    click(ctx, "&Copy SGF", |c| {
                        let sgf = c.controller.sgf()?;
                        c.host.write_clipboard(&sgf)
                    })
                    .into(),
                    click(ctx, "Copy &ASCII Diagram", |c| {
                        let diagram = c.controller.ascii_diagram(position(c))?;
                        c.host.write_clipboard(&diagram)
                    })
                    .into(),
                ],
            ),
            MenuNode::separator(),
            click(ctx, "Game &Info", |c| c.controller.open_drawer(Drawer::Info))
                .with_accelerator("CmdOrCtrl+I")
                .into(),
            click(ctx, "&Manage Games…", |c| {
                c.controller.open_drawer(Drawer::GameChooser)
            })
            .with_accelerator("CmdOrCtrl+Shift+M")
            .into(),
            MenuNode::separator(),
            click(ctx, "&Preferences…", |c| {
                c.controller.open_drawer(Drawer::Preferences)
            })
            .with_accelerator("CmdOrCtrl+,")
            .with_key(ItemKey::Preferences)
            .into(),
        ],
    )
}

fn play_menu(ctx: &Collaborators) -> MenuNode {
    MenuNode::menu(
        MenuTag::Play,
        ctx.t("&Play"),
        vec![
            click(ctx, "&Toggle Player", |c| {
                let at = position(c);
                let player = c.controller.player(at)?;
                c.controller.set_player(at, player.opposite())
            })
            .into(),
            MenuNode::separator(),
            click(ctx, "&Select Point", |c| {
                match c.controller.prompt("Enter a coordinate to select a point")? {
                    Some(vertex) => c.controller.click_vertex(&vertex),
                    None => Ok(()),
                }
            })
            .with_accelerator("CmdOrCtrl+L")
            .into(),
            click(ctx, "&Pass", |c| {
                let auto_genmove = c
                    .settings
                    .get(keys::AUTO_GENMOVE)
                    .and_then(|value| value.as_bool())
                    .unwrap_or(false);
                c.controller.pass(auto_genmove)
            })
            .with_accelerator("CmdOrCtrl+P")
            .into(),
            click(ctx, "&Resign", |c| c.controller.resign()).into(),
            MenuNode::separator(),
            click(ctx, "&Estimate", |c| c.controller.set_mode(Mode::Estimator)).into(),
            click(ctx, "Sc&ore", |c| c.controller.set_mode(Mode::Scoring)).into(),
        ],
    )
}

fn edit_menu(platform: Platform, ctx: &Collaborators) -> MenuNode {
    let redo = if platform == Platform::Windows {
        "CmdOrCtrl+Y"
    } else {
        "CmdOrCtrl+Shift+Z"
    };
    let remove_node = if platform == Platform::MacOs {
        "CmdOrCtrl+Backspace"
    } else {
        "CmdOrCtrl+Delete"
    };

    MenuNode::menu(
        MenuTag::Edit,
        ctx.t("&Edit"),
        vec![
            click(ctx, "&Undo", |c| c.controller.undo())
                .with_accelerator("CmdOrCtrl+Z")
                .into(),
            click(ctx, "Re&do", |c| c.controller.redo())
                .with_accelerator(redo)
                .into(),
            MenuNode::separator(),
            click(ctx, "Toggle &Edit Mode", |c| toggle_mode(c, Mode::Edit))
                .with_accelerator("CmdOrCtrl+E")
                .into(),
            MenuNode::submenu(ctx.t("&Select Tool"), tool_items(ctx)),
            MenuNode::separator(),
            click(ctx, "&Copy Variation", |c| {
                c.controller.copy_variation(position(c))
            })
            .into(),
            click(ctx, "Cu&t Variation", |c| {
                c.controller.cut_variation(position(c))
            })
            .into(),
            click(ctx, "&Paste Variation", |c| {
                c.controller.paste_variation(position(c))
            })
            .into(),
            MenuNode::separator(),
            click(ctx, "Make Main &Variation", |c| {
                c.controller.make_main_variation(position(c))
            })
            .into(),
            click(ctx, "Shift &Left", |c| {
                c.controller.shift_variation(position(c), Direction::Previous)
            })
            .into(),
            click(ctx, "Shift Ri&ght", |c| {
                c.controller.shift_variation(position(c), Direction::Next)
            })
            .into(),
            MenuNode::separator(),
            click(ctx, "&Flatten", |c| {
                c.controller.flatten_variation(position(c))
            })
            .into(),
            click(ctx, "&Remove Node", |c| c.controller.remove_node(position(c)))
                .with_accelerator(remove_node)
                .into(),
            click(ctx, "Remove &Other Variations", |c| {
                c.controller.remove_other_variations(position(c))
            })
            .into(),
        ],
    )
}

fn tool_items(ctx: &Collaborators) -> Tree {
    // Re-selecting the stone tool in edit mode switches the stone color.
    let stone = click(ctx, "&Stone Tool", |c| {
        let state = c.controller.state();
        let black = Tool::Stone(Sign::Black);
        let tool = if state.mode != Mode::Edit || state.selected_tool != black {
            black
        } else {
            Tool::Stone(Sign::White)
        };
        select_tool(c, tool)
    })
    .with_accelerator("CmdOrCtrl+1");

    let others = [
        ("&Cross Tool", Tool::Cross),
        ("&Triangle Tool", Tool::Triangle),
        ("S&quare Tool", Tool::Square),
        ("C&ircle Tool", Tool::Circle),
        ("&Line Tool", Tool::Line),
        ("&Arrow Tool", Tool::Arrow),
        ("La&bel Tool", Tool::Label),
        ("&Number Tool", Tool::Number),
    ];

    std::iter::once(stone.into())
        .chain(others.into_iter().enumerate().map(|(i, (label, tool))| {
            click(ctx, label, move |c| select_tool(c, tool))
                .with_accelerator(&format!("CmdOrCtrl+{}", i + 2))
                .into()
        }))
        .collect()
}

fn find_menu(ctx: &Collaborators) -> MenuNode {
    MenuNode::menu(
        MenuTag::Find,
        ctx.t("Fin&d"),
        vec![
            click(ctx, "Toggle &Find Mode", |c| toggle_mode(c, Mode::Find))
                .with_accelerator("CmdOrCtrl+F")
                .into(),
            click(ctx, "Find &Next", |c| {
                c.controller.set_mode(Mode::Find)?;
                c.controller.find_move(Direction::Next, find_query(c))
            })
            .with_accelerator("F3")
            .into(),
            click(ctx, "Find &Previous", |c| {
                c.controller.set_mode(Mode::Find)?;
                c.controller.find_move(Direction::Previous, find_query(c))
            })
            .with_accelerator("Shift+F3")
            .into(),
            MenuNode::separator(),
            click(ctx, "Toggle &Hotspot", |c| {
                let at = position(c);
                let hotspot = c.controller.is_hotspot(at)?;
                c.controller.set_hotspot(at, !hotspot)
            })
            .with_accelerator("CmdOrCtrl+B")
            .into(),
            click(ctx, "Jump to Ne&xt Hotspot", |c| {
                c.controller.find_hotspot(Direction::Next)
            })
            .with_accelerator("F2")
            .into(),
            click(ctx, "Jump to Pre&vious Hotspot", |c| {
                c.controller.find_hotspot(Direction::Previous)
            })
            .with_accelerator("Shift+F2")
            .into(),
        ],
    )
}

fn navigation_menu(ctx: &Collaborators) -> MenuNode {
    MenuNode::menu(
        MenuTag::Navigation,
        ctx.t("&Navigation"),
        vec![
            click(ctx, "&Back", |c| c.controller.go_step(Direction::Previous))
                .with_accelerator("Up")
                .into(),
            click(ctx, "&Forward", |c| c.controller.go_step(Direction::Next))
                .with_accelerator("Down")
                .into(),
            MenuNode::separator(),
            click(ctx, "Go to &Previous Fork", |c| {
                c.controller.go_to_previous_fork()
            })
            .with_accelerator("CmdOrCtrl+Up")
            .into(),
            click(ctx, "Go to &Next Fork", |c| c.controller.go_to_next_fork())
                .with_accelerator("CmdOrCtrl+Down")
                .into(),
            MenuNode::separator(),
            click(ctx, "Go to Previous Commen&t", |c| {
                c.controller.go_to_comment(Direction::Previous)
            })
            .with_accelerator("CmdOrCtrl+Shift+Up")
            .into(),
            click(ctx, "Go to Next &Comment", |c| {
                c.controller.go_to_comment(Direction::Next)
            })
            .with_accelerator("CmdOrCtrl+Shift+Down")
            .into(),
            MenuNode::separator(),
            click(ctx, "Go to Be&ginning", |c| c.controller.go_to_beginning())
                .with_accelerator("Home")
                .into(),
            click(ctx, "Go to &End", |c| c.controller.go_to_end())
                .with_accelerator("End")
                .into(),
            MenuNode::separator(),
            click(ctx, "Go to &Main Variation", |c| {
                c.controller.go_to_main_variation()
            })
            .with_accelerator("CmdOrCtrl+Left")
            .into(),
            click(ctx, "Go to Previous &Variation", |c| {
                c.controller.go_to_sibling_variation(Direction::Previous)
            })
            .with_accelerator("Left")
            .into(),
            click(ctx, "Go to Next Va&riation", |c| {
                c.controller.go_to_sibling_variation(Direction::Next)
            })
            .with_accelerator("Right")
            .into(),
            MenuNode::separator(),
            click(ctx, "Go to Move N&umber", |c| {
                match c.controller.prompt("Enter a move number to go to")? {
                    Some(number) => {
                        c.controller.close_drawer()?;
                        c.controller.go_to_move_number(&number)
                    }
                    None => Ok(()),
                }
            })
            .with_accelerator("CmdOrCtrl+G")
            .into(),
            MenuNode::separator(),
            click(ctx, "Go to Ne&xt Game", |c| {
                c.controller.go_to_sibling_game(Direction::Next)
            })
            .with_accelerator("CmdOrCtrl+PageDown")
            .into(),
            click(ctx, "Go to Previou&s Game", |c| {
                c.controller.go_to_sibling_game(Direction::Previous)
            })
            .with_accelerator("CmdOrCtrl+PageUp")
            .into(),
        ],
    )
}

fn engines_menu(ctx: &Collaborators) -> MenuNode {
    MenuNode::menu(
        MenuTag::Engines,
        ctx.t("Eng&ines"),
        vec![
            click(ctx, "Manage &Engines…", |c| {
                c.controller.set_preferences_tab(PreferencesTab::Engines)?;
                c.controller.open_drawer(Drawer::Preferences)
            })
            .into(),
            MenuNode::separator(),
            click(ctx, "&Attach…", |c| c.controller.open_drawer(Drawer::Info)).into(),
            click(ctx, "&Detach", |c| c.controller.detach_engines()).into(),
            click(ctx, "&Suspend", |c| c.controller.suspend_engines())
                .with_enabled(true)
                .into(),
            MenuNode::separator(),
            click(ctx, "S&ynchronize", |c| c.controller.sync_engines())
                .with_accelerator("F6")
                .into(),
            click(ctx, "Toggle A&nalysis", |c| {
                if c.controller.state().analysis_running {
                    c.controller.stop_analysis()
                } else {
                    c.controller.close_drawer()?;
                    c.controller.set_mode(Mode::Play)?;
                    c.controller.start_analysis()
                }
            })
            .with_accelerator("F4")
            .into(),
            click(ctx, "Start &Playing", |c| {
                c.controller.generate_move(GenerateMoveOptions {
                    analyze: c.controller.state().analysis_available,
                    follow_up: true,
                })
            })
            .with_accelerator("F5")
            .into(),
            click(ctx, "Generate &Move", |c| {
                c.controller.generate_move(GenerateMoveOptions {
                    analyze: c.controller.state().analysis_available,
                    follow_up: false,
                })
            })
            .with_accelerator("F10")
            .into(),
            MenuNode::separator(),
            click(ctx, "Toggle &GTP Console", |c| {
                toggle_setting(c.settings.as_ref(), keys::SHOW_LEFT_SIDEBAR);
                c.controller.toggle_console()
            })
            .into(),
            click(ctx, "&Clear Console", |c| c.controller.clear_console()).into(),
        ],
    )
}

fn tools_menu(ctx: &Collaborators) -> MenuNode {
    MenuNode::menu(
        MenuTag::Tools,
        ctx.t("&Tools"),
        vec![
            click(ctx, "Toggle Auto&play Mode", |c| {
                toggle_mode(c, Mode::Autoplay)
            })
            .into(),
            click(ctx, "Toggle &Guess Mode", |c| toggle_mode(c, Mode::Guess)).into(),
            MenuNode::separator(),
            click(ctx, "Clean &Markup…", |c| {
                c.controller.open_drawer(Drawer::CleanMarkup)
            })
            .into(),
            click(ctx, "&Edit SGF Properties…", |c| {
                c.controller.open_drawer(Drawer::AdvancedProperties)
            })
            .into(),
            MenuNode::separator(),
            click(ctx, "&Rotate Clockwise", |c| {
                c.controller.rotate_board(Rotation::Clockwise)
            })
            .into(),
            click(ctx, "Rotate &Anticlockwise", |c| {
                c.controller.rotate_board(Rotation::Anticlockwise)
            })
            .into(),
        ],
    )
}

fn view_menu(platform: Platform, ctx: &Collaborators) -> MenuNode {
    let full_screen = if platform == Platform::MacOs {
        "CmdOrCtrl+Shift+F"
    } else {
        "F11"
    };
    let show = |label: &str, key: &'static str| toggle(ctx, label, key, None, |_| Ok(()));

    MenuNode::menu(
        MenuTag::View,
        ctx.t("&View"),
        vec![
            click(ctx, "Toggle Menu &Bar", |c| {
                toggle_setting(c.settings.as_ref(), keys::SHOW_MENUBAR);
                Ok(())
            })
            .with_key(ItemKey::ToggleMenuBar)
            .into(),
            click(ctx, "Toggle &Full Screen", |c| c.controller.toggle_full_screen())
                .with_accelerator(full_screen)
                .into(),
            MenuNode::separator(),
            toggle(
                ctx,
                "Show &Coordinates",
                keys::SHOW_COORDINATES,
                Some("CmdOrCtrl+Shift+C"),
                |_| Ok(()),
            ),
            show("Show Move N&umbers", keys::SHOW_MOVE_NUMBERS),
            show("Show Move Colori&zation", keys::SHOW_MOVE_COLORIZATION),
            show("Show &Next Moves", keys::SHOW_NEXT_MOVES),
            show("Show &Sibling Variations", keys::SHOW_SIBLINGS),
            MenuNode::separator(),
            toggle(
                ctx,
                "Show Game &Tree",
                keys::SHOW_GRAPH,
                Some("CmdOrCtrl+T"),
                |c| c.controller.toggle_game_graph(),
            ),
            toggle(
                ctx,
                "Show Co&mments",
                keys::SHOW_COMMENTS,
                Some("CmdOrCtrl+Shift+T"),
                |c| c.controller.toggle_comment_box(),
            ),
            MenuNode::separator(),
            MenuNode::submenu(
                ctx.t("Z&oom"),
                vec![
                    click(ctx, "&Increase", |c| {
                        set_zoom_factor(c, zoom_factor(c) + 0.1);
                        Ok(())
                    })
                    .with_accelerator("CmdOrCtrl+Plus")
                    .into(),
                    click(ctx, "&Decrease", |c| {
                        set_zoom_factor(c, (zoom_factor(c) - 0.1).max(0.0));
                        Ok(())
                    })
                    .with_accelerator("CmdOrCtrl+-")
                    .into(),
                    click(ctx, "&Reset", |c| {
                        set_zoom_factor(c, 1.0);
                        Ok(())
                    })
                    .with_accelerator("CmdOrCtrl+0")
                    .into(),
                ],
            ),
        ],
    )
}

fn help_menu(ctx: &Collaborators) -> MenuNode {
    let mut params = LabelParams::new();
    params.insert("appName".to_string(), ctx.identity.name.clone());
    params.insert("version".to_string(), ctx.identity.version.clone());
    let info = ctx.translator.translate_template(
        &|p| {
            let get = |key: &str| p.get(key).map(String::as_str).unwrap_or_default();
            format!("{} v{}", get("appName"), get("version"))
        },
        &params,
    );

    MenuNode::menu(
        MenuTag::Help,
        ctx.t("&Help"),
        vec![
            ActionItem::new(info)
                .with_enabled(false)
                .with_key(ItemKey::AppInfo)
                .into(),
            ActionItem::new(ctx.t("Check for &Updates"))
                .with_main_action(MainAction::CheckForUpdates)
                .with_enabled(true)
                .with_key(ItemKey::CheckForUpdates)
                .into(),
            MenuNode::separator(),
            click(ctx, "GitHub &Repository", |c| {
                c.host.open_external(&c.identity.repository)
            })
            .into(),
            click(ctx, "Report &Issue", |c| {
                c.host
                    .open_external(&format!("{}/issues", c.identity.repository))
            })
            .into(),
        ],
    )
}
