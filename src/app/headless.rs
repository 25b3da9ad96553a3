//! A controller without a board: it keeps the little state menu actions read
//! and journals every call.
//!
//! The host binary uses it to drive the menu from its control channel, and
//! tests use the journal to check which controller calls an item makes.

use anyhow::Result;
use std::collections::{HashSet, VecDeque};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use crate::core::collaborators::{
    ContentFormat, Direction, Drawer, FindQuery, GenerateMoveOptions, Mode, NewFileOptions,
    PreferencesTab, Rotation, Sign, Tool, TreePosition,
};
use crate::core::{Controller, ControllerState};

#[derive(Default)]
struct Inner {
    state: ControllerState,
    player: Option<Sign>,
    hotspots: HashSet<TreePosition>,
    prompt_responses: VecDeque<String>,
    journal: Vec<String>,
    failing: Option<String>,
}

#[derive(Default)]
pub struct HeadlessController {
    inner: Mutex<Inner>,
}

impl HeadlessController {
    /// Queues the text the next `prompt` returns.
    pub fn push_prompt_response(&self, response: &str) {
        self.lock().prompt_responses.push_back(response.to_string());
    }

    /// Makes every later call to `method` fail.
    pub fn fail_on(&self, method: &str) {
        self.lock().failing = Some(method.to_string());
    }

    pub fn journal(&self) -> Vec<String> {
        self.lock().journal.clone()
    }

    pub fn update_state(&self, update: impl FnOnce(&mut ControllerState)) {
        update(&mut self.lock().state);
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .expect("Mutex was poisoned. This should not happen.")
    }

    /// Journals `call` under `method` and fails if `method` was marked failing.
    fn record(&self, method: &str, call: String) -> Result<()> {
        let mut inner = self.lock();
        tracing::info!("controller: {}", call);
        inner.journal.push(call);
        if inner.failing.as_deref() == Some(method) {
            anyhow::bail!("{method} failed");
        }
        Ok(())
    }

    fn call(&self, method: &str) -> Result<()> {
        self.record(method, method.to_string())
    }
}

impl Controller for HeadlessController {
    fn state(&self) -> ControllerState {
        self.lock().state.clone()
    }

    fn prompt(&self, message: &str) -> Result<Option<String>> {
        self.record("prompt", format!("prompt({message})"))?;
        Ok(self.lock().prompt_responses.pop_front())
    }

    fn new_file(&self, options: NewFileOptions) -> Result<()> {
        self.record("new_file", format!("new_file({options:?})"))
    }

    fn load_file(&self) -> Result<()> {
        self.call("load_file")
    }

    fn save_file(&self, path: Option<&Path>) -> Result<()> {
        self.record("save_file", format!("save_file({path:?})"))
    }

    fn load_content(&self, content: &str, format: ContentFormat) -> Result<()> {
        self.record("load_content", format!("load_content({content:?}, {format:?})"))
    }

    fn sgf(&self) -> Result<String> {
        self.call("sgf")?;
        Ok("(;GM[1]FF[4])".to_string())
    }

    fn ascii_diagram(&self, position: TreePosition) -> Result<String> {
        self.record("ascii_diagram", format!("ascii_diagram({position:?})"))?;
        Ok(String::new())
    }

    fn open_drawer(&self, drawer: Drawer) -> Result<()> {
        self.record("open_drawer", format!("open_drawer({drawer:?})"))
    }

    fn close_drawer(&self) -> Result<()> {
        self.call("close_drawer")
    }

    fn set_preferences_tab(&self, tab: PreferencesTab) -> Result<()> {
        self.record("set_preferences_tab", format!("set_preferences_tab({tab:?})"))
    }

    fn player(&self, position: TreePosition) -> Result<Sign> {
        self.record("player", format!("player({position:?})"))?;
        Ok(self.lock().player.unwrap_or(Sign::Black))
    }

    fn set_player(&self, position: TreePosition, sign: Sign) -> Result<()> {
        self.record("set_player", format!("set_player({position:?}, {sign:?})"))?;
        self.lock().player = Some(sign);
        Ok(())
    }

    fn click_vertex(&self, vertex: &str) -> Result<()> {
        self.record("click_vertex", format!("click_vertex({vertex})"))
    }

    fn pass(&self, send_to_engine: bool) -> Result<()> {
        self.record("pass", format!("pass({send_to_engine})"))
    }

    fn resign(&self) -> Result<()> {
        self.call("resign")
    }

    fn set_mode(&self, mode: Mode) -> Result<()> {
        self.record("set_mode", format!("set_mode({mode:?})"))?;
        self.lock().state.mode = mode;
        Ok(())
    }

    fn undo(&self) -> Result<()> {
        self.call("undo")
    }

    fn redo(&self) -> Result<()> {
        self.call("redo")
    }

    fn select_tool(&self, tool: Tool) -> Result<()> {
        self.record("select_tool", format!("select_tool({tool:?})"))?;
        self.lock().state.selected_tool = tool;
        Ok(())
    }

    fn copy_variation(&self, position: TreePosition) -> Result<()> {
        self.record("copy_variation", format!("copy_variation({position:?})"))
    }

    fn cut_variation(&self, position: TreePosition) -> Result<()> {
        self.record("cut_variation", format!("cut_variation({position:?})"))
    }

    fn paste_variation(&self, position: TreePosition) -> Result<()> {
        self.record("paste_variation", format!("paste_variation({position:?})"))
    }

    fn make_main_variation(&self, position: TreePosition) -> Result<()> {
        self.record(
            "make_main_variation",
            format!("make_main_variation({position:?})"),
        )
    }

    fn shift_variation(&self, position: TreePosition, direction: Direction) -> Result<()> {
        self.record(
            "shift_variation",
            format!("shift_variation({position:?}, {direction:?})"),
        )
    }

    fn flatten_variation(&self, position: TreePosition) -> Result<()> {
        self.record("flatten_variation", format!("flatten_variation({position:?})"))
    }

    fn remove_node(&self, position: TreePosition) -> Result<()> {
        self.record("remove_node", format!("remove_node({position:?})"))
    }

    fn remove_other_variations(&self, position: TreePosition) -> Result<()> {
        self.record(
            "remove_other_variations",
            format!("remove_other_variations({position:?})"),
        )
    }

    fn find_move(&self, direction: Direction, query: FindQuery) -> Result<()> {
        self.record("find_move", format!("find_move({direction:?}, {query:?})"))
    }

    fn is_hotspot(&self, position: TreePosition) -> Result<bool> {
        self.record("is_hotspot", format!("is_hotspot({position:?})"))?;
        Ok(self.lock().hotspots.contains(&position))
    }

    fn set_hotspot(&self, position: TreePosition, hotspot: bool) -> Result<()> {
        self.record("set_hotspot", format!("set_hotspot({position:?}, {hotspot})"))?;
        let mut inner = self.lock();
        if hotspot {
            inner.hotspots.insert(position);
        } else {
            inner.hotspots.remove(&position);
        }
        Ok(())
    }

    fn find_hotspot(&self, direction: Direction) -> Result<()> {
        self.record("find_hotspot", format!("find_hotspot({direction:?})"))
    }

    fn go_step(&self, direction: Direction) -> Result<()> {
        self.record("go_step", format!("go_step({direction:?})"))
    }

    fn go_to_previous_fork(&self) -> Result<()> {
        self.call("go_to_previous_fork")
    }

    fn go_to_next_fork(&self) -> Result<()> {
        self.call("go_to_next_fork")
    }

    fn go_to_comment(&self, direction: Direction) -> Result<()> {
        self.record("go_to_comment", format!("go_to_comment({direction:?})"))
    }

    fn go_to_beginning(&self) -> Result<()> {
        self.call("go_to_beginning")
    }

    fn go_to_end(&self) -> Result<()> {
        self.call("go_to_end")
    }

    fn go_to_main_variation(&self) -> Result<()> {
        self.call("go_to_main_variation")
    }

    fn go_to_sibling_variation(&self, direction: Direction) -> Result<()> {
        self.record(
            "go_to_sibling_variation",
            format!("go_to_sibling_variation({direction:?})"),
        )
    }

    fn go_to_move_number(&self, number: &str) -> Result<()> {
        self.record("go_to_move_number", format!("go_to_move_number({number})"))
    }

    fn go_to_sibling_game(&self, direction: Direction) -> Result<()> {
        self.record(
            "go_to_sibling_game",
            format!("go_to_sibling_game({direction:?})"),
        )
    }

    fn detach_engines(&self) -> Result<()> {
        self.call("detach_engines")
    }

    fn suspend_engines(&self) -> Result<()> {
        self.call("suspend_engines")
    }

    fn sync_engines(&self) -> Result<()> {
        self.call("sync_engines")
    }

    fn start_analysis(&self) -> Result<()> {
        self.call("start_analysis")?;
        self.lock().state.analysis_running = true;
        Ok(())
    }

    fn stop_analysis(&self) -> Result<()> {
        self.call("stop_analysis")?;
        self.lock().state.analysis_running = false;
        Ok(())
    }

    fn generate_move(&self, options: GenerateMoveOptions) -> Result<()> {
        self.record("generate_move", format!("generate_move({options:?})"))
    }

    fn toggle_console(&self) -> Result<()> {
        self.call("toggle_console")
    }

    fn clear_console(&self) -> Result<()> {
        self.call("clear_console")
    }

    fn rotate_board(&self, rotation: Rotation) -> Result<()> {
        self.record("rotate_board", format!("rotate_board({rotation:?})"))
    }

    fn toggle_full_screen(&self) -> Result<()> {
        self.call("toggle_full_screen")
    }

    fn toggle_game_graph(&self) -> Result<()> {
        self.call("toggle_game_graph")
    }

    fn toggle_comment_box(&self) -> Result<()> {
        self.call("toggle_comment_box")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_journal_and_state_updates() {
        let controller = HeadlessController::default();
        controller.set_mode(Mode::Edit).unwrap();
        controller.select_tool(Tool::Cross).unwrap();

        let state = controller.state();
        assert_eq!(state.mode, Mode::Edit);
        assert_eq!(state.selected_tool, Tool::Cross);
        assert_eq!(
            controller.journal(),
            vec!["set_mode(Edit)", "select_tool(Cross)"]
        );
    }

    #[test]
    fn test_failing_method_still_journals() {
        let controller = HeadlessController::default();
        controller.fail_on("undo");
        let err = controller.undo().unwrap_err();
        assert_eq!(err.to_string(), "undo failed");
        assert_eq!(controller.journal(), vec!["undo"]);
        assert!(controller.redo().is_ok());
    }

    #[test]
    fn test_prompt_returns_queued_responses() {
        let controller = HeadlessController::default();
        controller.push_prompt_response("D4");
        assert_eq!(controller.prompt("where?").unwrap().as_deref(), Some("D4"));
        assert_eq!(controller.prompt("where?").unwrap(), None);
    }
}
