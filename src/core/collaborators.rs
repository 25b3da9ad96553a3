//! Interfaces of the collaborators the menu binds its actions to.
//!
//! The menu never owns application state. Every action closure captures the
//! [`Collaborators`] handed to the builder and calls into them when activated.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::i18n::Translator;

/// Setting keys read or written by menu actions.
pub mod keys {
    pub const SHOW_MENUBAR: &str = "view.show_menubar";
    pub const SHOW_COORDINATES: &str = "view.show_coordinates";
    pub const SHOW_MOVE_NUMBERS: &str = "view.show_move_numbers";
    pub const SHOW_MOVE_COLORIZATION: &str = "view.show_move_colorization";
    pub const SHOW_NEXT_MOVES: &str = "view.show_next_moves";
    pub const SHOW_SIBLINGS: &str = "view.show_siblings";
    pub const SHOW_GRAPH: &str = "view.show_graph";
    pub const SHOW_COMMENTS: &str = "view.show_comments";
    pub const SHOW_LEFT_SIDEBAR: &str = "view.show_leftsidebar";
    pub const ZOOM_FACTOR: &str = "app.zoom_factor";
    pub const AUTO_GENMOVE: &str = "gtp.auto_genmove";
}

/// Action executed by the privileged host process rather than locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MainAction {
    NewWindow,
    CheckForUpdates,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Play,
    Edit,
    Find,
    Estimator,
    Scoring,
    Autoplay,
    Guess,
}

/// Stone color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Black,
    White,
}

impl Sign {
    pub fn opposite(self) -> Self {
        match self {
            Sign::Black => Sign::White,
            Sign::White => Sign::Black,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Stone(Sign),
    Cross,
    Triangle,
    Square,
    Circle,
    Line,
    Arrow,
    Label,
    Number,
}

impl Default for Tool {
    fn default() -> Self {
        Tool::Stone(Sign::Black)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Drawer {
    Info,
    GameChooser,
    Preferences,
    CleanMarkup,
    AdvancedProperties,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferencesTab {
    Engines,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentFormat {
    Sgf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Clockwise,
    Anticlockwise,
}

/// A node of a game tree: the game index and the node within that game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TreePosition {
    pub game: usize,
    pub node: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewFileOptions {
    pub play_sound: bool,
    pub show_info: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FindQuery {
    pub vertex: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateMoveOptions {
    pub analyze: bool,
    pub follow_up: bool,
}

/// Snapshot of the controller state that actions consult when they run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ControllerState {
    pub mode: Mode,
    pub selected_tool: Tool,
    pub represented_filename: Option<PathBuf>,
    pub tree_position: TreePosition,
    pub find_vertex: Option<String>,
    pub find_text: String,
    /// An analysis is currently running.
    pub analysis_running: bool,
    /// Analysis data exists for the current position.
    pub analysis_available: bool,
}

/// The application object every menu action delegates to.
pub trait Controller: Send + Sync {
    fn state(&self) -> ControllerState;

    /// Shows a modal input box and returns the entered text, `None` if dismissed.
    fn prompt(&self, message: &str) -> Result<Option<String>>;

    // File
    fn new_file(&self, options: NewFileOptions) -> Result<()>;
    fn load_file(&self) -> Result<()>;
    /// Saves to `path`, or asks for a location when `None`.
    fn save_file(&self, path: Option<&Path>) -> Result<()>;
    fn load_content(&self, content: &str, format: ContentFormat) -> Result<()>;
    fn sgf(&self) -> Result<String>;
    fn ascii_diagram(&self, position: TreePosition) -> Result<String>;
    fn open_drawer(&self, drawer: Drawer) -> Result<()>;
    fn close_drawer(&self) -> Result<()>;
    fn set_preferences_tab(&self, tab: PreferencesTab) -> Result<()>;

    // Play
    fn player(&self, position: TreePosition) -> Result<Sign>;
    fn set_player(&self, position: TreePosition, sign: Sign) -> Result<()>;
    fn click_vertex(&self, vertex: &str) -> Result<()>;
    fn pass(&self, send_to_engine: bool) -> Result<()>;
    fn resign(&self) -> Result<()>;
    fn set_mode(&self, mode: Mode) -> Result<()>;

    // Edit
    fn undo(&self) -> Result<()>;
    fn redo(&self) -> Result<()>;
    fn select_tool(&self, tool: Tool) -> Result<()>;
    fn copy_variation(&self, position: TreePosition) -> Result<()>;
    fn cut_variation(&self, position: TreePosition) -> Result<()>;
    fn paste_variation(&self, position: TreePosition) -> Result<()>;
    fn make_main_variation(&self, position: TreePosition) -> Result<()>;
    fn shift_variation(&self, position: TreePosition, direction: Direction) -> Result<()>;
    fn flatten_variation(&self, position: TreePosition) -> Result<()>;
    fn remove_node(&self, position: TreePosition) -> Result<()>;
    fn remove_other_variations(&self, position: TreePosition) -> Result<()>;

    // Find
    fn find_move(&self, direction: Direction, query: FindQuery) -> Result<()>;
    fn is_hotspot(&self, position: TreePosition) -> Result<bool>;
    fn set_hotspot(&self, position: TreePosition, hotspot: bool) -> Result<()>;
    fn find_hotspot(&self, direction: Direction) -> Result<()>;

    // Navigation
    fn go_step(&self, direction: Direction) -> Result<()>;
    fn go_to_previous_fork(&self) -> Result<()>;
    fn go_to_next_fork(&self) -> Result<()>;
    fn go_to_comment(&self, direction: Direction) -> Result<()>;
    fn go_to_beginning(&self) -> Result<()>;
    fn go_to_end(&self) -> Result<()>;
    fn go_to_main_variation(&self) -> Result<()>;
    fn go_to_sibling_variation(&self, direction: Direction) -> Result<()>;
    fn go_to_move_number(&self, number: &str) -> Result<()>;
    fn go_to_sibling_game(&self, direction: Direction) -> Result<()>;

    // Engines
    fn detach_engines(&self) -> Result<()>;
    fn suspend_engines(&self) -> Result<()>;
    fn sync_engines(&self) -> Result<()>;
    fn start_analysis(&self) -> Result<()>;
    fn stop_analysis(&self) -> Result<()>;
    fn generate_move(&self, options: GenerateMoveOptions) -> Result<()>;
    fn toggle_console(&self) -> Result<()>;
    fn clear_console(&self) -> Result<()>;

    // Tools
    fn rotate_board(&self, rotation: Rotation) -> Result<()>;

    // View
    fn toggle_full_screen(&self) -> Result<()>;
    fn toggle_game_graph(&self) -> Result<()>;
    fn toggle_comment_box(&self) -> Result<()>;
}

/// Process-wide key/value settings. Implementations synchronize internally.
pub trait SettingsStore: Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&self, key: &str, value: Value);
}

/// Flips a boolean setting; a missing or non-boolean value counts as `false`.
pub fn toggle_setting(settings: &dyn SettingsStore, key: &str) {
    let current = settings
        .get(key)
        .and_then(|value| value.as_bool())
        .unwrap_or(false);
    settings.set(key, Value::Bool(!current));
}

/// The shell hosting the application.
pub trait HostShell: Send + Sync {
    /// Asks the privileged host process to run `action`.
    fn forward(&self, action: MainAction) -> Result<()>;
    fn open_external(&self, url: &str) -> Result<()>;
    fn read_clipboard(&self) -> Result<String>;
    fn write_clipboard(&self, text: &str) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppIdentity {
    pub name: String,
    pub version: String,
    pub repository: String,
}

/// Everything the menu builder binds actions to.
#[derive(Clone)]
pub struct Collaborators {
    pub controller: Arc<dyn Controller>,
    pub settings: Arc<dyn SettingsStore>,
    pub translator: Arc<dyn Translator>,
    pub host: Arc<dyn HostShell>,
    pub identity: AppIdentity,
}

impl Collaborators {
    pub fn t(&self, key: &str) -> String {
        self.translator.translate(key)
    }
}
