//! Integration tests for the published menu.
//!
//! The host side runs through the real `ShellHost`, backed by a channel in
//! place of the tao event loop, so forwarded actions can be observed as the
//! `UserEvent`s the host binary would receive.

use goban_menu::app::events::UserEvent;
use goban_menu::app::{
    build_menu, DetachedProxy, EventProxy, HeadlessController, Menu, ShellHost,
};
use goban_menu::config::{AppConfig, MemorySettings};
use goban_menu::core::{
    assign_ids, canonical_tree, Catalog, Collaborators, IdentityTranslator, MainAction,
    MenuError, MenuNode, MenuTag, NodeKind, Translator,
};
use goban_menu::platform::{adapt, Platform};
use std::collections::HashSet;
use std::sync::mpsc;
use std::sync::Arc;

/// Contains the test infrastructure.
mod helpers {
    use super::*;

    /// A test double for the `EventLoopProxy` using a std MPSC channel.
    #[derive(Clone)]
    pub struct TestEventProxy {
        pub sender: mpsc::Sender<UserEvent>,
    }

    impl EventProxy for TestEventProxy {
        fn send_event(&self, event: UserEvent) {
            if let Err(e) = self.sender.send(event) {
                // Panic in a test if the receiver is dropped, as it indicates a test setup error.
                panic!("Test receiver dropped: {}", e);
            }
        }
    }

    /// `TestHarness` wires the menu to a headless controller, in-memory
    /// settings and a channel-backed host.
    pub struct TestHarness {
        pub controller: Arc<HeadlessController>,
        pub settings: Arc<MemorySettings>,
        pub collaborators: Collaborators,
        pub event_rx: mpsc::Receiver<UserEvent>,
    }

    impl TestHarness {
        pub fn new() -> Self {
            Self::with_translator(Arc::new(IdentityTranslator))
        }

        pub fn with_translator(translator: Arc<dyn Translator>) -> Self {
            let config = AppConfig::default();
            let (event_tx, event_rx) = mpsc::channel();
            let controller = Arc::new(HeadlessController::default());
            let settings = Arc::new(MemorySettings::from_config(&config));
            let collaborators = Collaborators {
                controller: controller.clone(),
                settings: settings.clone(),
                translator,
                host: Arc::new(ShellHost::new(TestEventProxy { sender: event_tx })),
                identity: config.identity(),
            };

            Self {
                controller,
                settings,
                collaborators,
                event_rx,
            }
        }

        pub fn build(&self, platform: Platform) -> Menu {
            build_menu(platform, self.collaborators.clone()).expect("menu should build")
        }

        pub fn events(&self) -> Vec<UserEvent> {
            self.event_rx.try_iter().collect()
        }
    }

    /// The id of the top-level menu tagged `tag`.
    pub fn menu_id(menu: &Menu, tag: MenuTag) -> String {
        let node = menu
            .nodes()
            .iter()
            .find(|node| node.tag() == Some(tag))
            .expect("menu present");
        node.id.as_ref().expect("id assigned").to_string()
    }

    /// The id of the first node labeled `label`, depth first.
    pub fn id_of(nodes: &[MenuNode], label: &str) -> Option<String> {
        nodes.iter().find_map(|node| {
            if node.label() == Some(label) {
                node.id.as_ref().map(ToString::to_string)
            } else {
                node.children().and_then(|children| id_of(children, label))
            }
        })
    }

    pub fn collect_ids(nodes: &[MenuNode], ids: &mut Vec<String>) {
        for node in nodes {
            ids.push(node.id.as_ref().expect("id assigned").to_string());
            if let Some(children) = node.children() {
                collect_ids(children, ids);
            }
        }
    }
}

use helpers::{collect_ids, id_of, menu_id, TestHarness};

#[test]
fn test_macos_menu_bar_layout() {
    let harness = TestHarness::new();
    let menu = harness.build(Platform::MacOs);

    let labels: Vec<_> = menu.nodes().iter().filter_map(MenuNode::label).collect();
    insta::assert_json_snapshot!(labels, @r###"
    [
      "Goban",
      "&File",
      "&Play",
      "&Edit",
      "Fin&d",
      "&Navigation",
      "Eng&ines",
      "&Tools",
      "&View",
      "Window",
      "&Help"
    ]
    "###);
    assert_eq!(menu_id(&menu, MenuTag::Application), "0");
    assert_eq!(menu_id(&menu, MenuTag::Window), "9");
}

#[test]
fn test_ids_are_unique_and_hierarchical() {
    let harness = TestHarness::new();
    for platform in [Platform::MacOs, Platform::Windows, Platform::Linux] {
        let menu = harness.build(platform);
        let mut ids = Vec::new();
        collect_ids(menu.nodes(), &mut ids);

        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len(), "duplicate ids on {platform}");
        for id in &ids {
            assert!(menu.find(id).is_some(), "{id} does not resolve on {platform}");
        }
    }
}

#[test]
fn test_neutral_platforms_match_canonical_tree() {
    let harness = TestHarness::new();
    for platform in [Platform::Windows, Platform::Linux] {
        let menu = harness.build(platform);
        let mut expected = canonical_tree(platform, &harness.collaborators);
        assign_ids(&mut expected, "");

        // Actions are rebuilt, so compare the serialized shape.
        assert_eq!(
            menu.to_json().unwrap(),
            serde_json::to_value(&expected).unwrap()
        );
    }
}

#[test]
fn test_adapting_twice_fails() {
    let harness = TestHarness::new();
    let menu = harness.build(Platform::MacOs);

    let err = adapt(menu.snapshot(), Platform::MacOs, &harness.collaborators).unwrap_err();
    assert!(matches!(err, MenuError::AlreadyAdapted));
}

#[test]
fn test_window_menu_forwards_new_window() {
    let harness = TestHarness::new();
    let menu = harness.build(Platform::MacOs);
    let window = menu_id(&menu, MenuTag::Window);

    menu.activate(&format!("{window}-0")).unwrap();

    assert_eq!(
        harness.events(),
        vec![UserEvent::Forward(MainAction::NewWindow)]
    );
    assert!(harness.controller.journal().is_empty());
}

#[test]
fn test_relocated_update_check_still_forwards() {
    let harness = TestHarness::new();
    let menu = harness.build(Platform::MacOs);

    menu.activate("0-2").unwrap();
    assert_eq!(
        harness.events(),
        vec![UserEvent::Forward(MainAction::CheckForUpdates)]
    );

    let err = menu.activate("0-1").unwrap_err();
    assert!(matches!(err, MenuError::Disabled(id) if id == "0-1"));
}

#[test]
fn test_relocated_preferences_open_the_drawer() {
    let harness = TestHarness::new();
    let menu = harness.build(Platform::MacOs);
    let preferences = id_of(menu.nodes(), "&Preferences…").unwrap();
    assert_eq!(preferences, "0-4");

    menu.activate(&preferences).unwrap();
    assert_eq!(harness.controller.journal(), vec!["open_drawer(Preferences)"]);
}

#[test]
fn test_menu_bar_toggle_only_off_macos() {
    let harness = TestHarness::new();

    let linux = harness.build(Platform::Linux);
    let toggle = id_of(linux.nodes(), "Toggle Menu &Bar").unwrap();
    linux.activate(&toggle).unwrap();
    assert_eq!(
        harness.settings.export().get("view.show_menubar"),
        Some(&serde_json::Value::Bool(false))
    );

    let mac = harness.build(Platform::MacOs);
    assert_eq!(id_of(mac.nodes(), "Toggle Menu &Bar"), None);
}

#[test]
fn test_application_menu_roles_and_text_submenu() {
    let harness = TestHarness::new();
    let menu = harness.build(Platform::MacOs);

    let services = menu.find("0-6").unwrap();
    let NodeKind::Role(role) = &services.kind else {
        panic!("services is not a role");
    };
    assert_eq!(role.submenu.as_deref().map(<[MenuNode]>::len), Some(0));
    let text = menu.find("0-7").unwrap();
    assert_eq!(text.label(), Some("Text"));
    assert_eq!(menu.find("0-7-3").map(|node| node.id.is_some()), Some(true));
}

#[test]
fn test_failures_surface_to_the_caller() {
    let harness = TestHarness::new();
    let menu = harness.build(Platform::Linux);
    harness.controller.fail_on("go_to_end");
    let end = id_of(menu.nodes(), "Go to &End").unwrap();

    let err = menu.activate(&end).unwrap_err();
    assert_eq!(err.to_string(), "go_to_end failed");
    assert_eq!(harness.controller.journal(), vec!["go_to_end"]);
}

#[test]
fn test_labels_are_translated_at_build_time() {
    let catalog = Catalog::from_json(
        r#"{"&File": "&Datei", "Window": "Fenster", "Goban": "Goban DE"}"#,
    )
    .unwrap();
    let harness = TestHarness::with_translator(Arc::new(catalog));
    let menu = harness.build(Platform::MacOs);

    let labels: Vec<_> = menu.nodes().iter().filter_map(MenuNode::label).collect();
    assert_eq!(labels[0], "Goban DE");
    assert_eq!(labels[1], "&Datei");
    assert_eq!(labels[9], "Fenster");
    assert_eq!(labels[10], "&Help");
}

#[test]
fn test_malformed_tree_is_rejected() {
    let harness = TestHarness::new();
    let mut tree = canonical_tree(Platform::MacOs, &harness.collaborators);
    tree.retain(|menu| menu.tag() != Some(MenuTag::Help));

    let err = adapt(tree, Platform::MacOs, &harness.collaborators).unwrap_err();
    assert_eq!(err.to_string(), "top-level menu `help` not found");
}

#[test]
fn test_menu_prints_without_an_event_loop() {
    let config = AppConfig::default();
    let collaborators = Collaborators {
        controller: Arc::new(HeadlessController::default()),
        settings: Arc::new(MemorySettings::from_config(&config)),
        translator: config.translator(),
        host: Arc::new(ShellHost::new(DetachedProxy)),
        identity: config.identity(),
    };

    let menu = build_menu(Platform::Linux, collaborators).unwrap();
    let printed = serde_json::to_string_pretty(&menu.to_json().unwrap()).unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&printed).unwrap();
    assert_eq!(parsed[0]["label"], "&File");
    assert_eq!(parsed.as_array().map(Vec::len), Some(9));
    menu.activate("0-1").unwrap();
}
