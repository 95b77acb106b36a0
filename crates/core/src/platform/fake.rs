use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::LaunchError;
use crate::types::*;
use super::Platform;

pub const CONSOLE_ID: WindowId = 1;
pub const CONSOLE_TITLE: &str = "qk console";

#[derive(Default)]
struct State {
    windows: Vec<(WindowId, String)>,
    /// Spawned windows waiting for `appear_after_scans` scans
    pending: Vec<(WindowId, String)>,
    bounds: HashMap<WindowId, Rect>,
    spawned: Vec<String>,
    scripts_run: Vec<String>,
    scans: u32,
    next_id: WindowId,
}

/// Scriptable platform for tests. Failures are keyed by slot title.
pub struct FakePlatform {
    pub monitors: Result<Vec<Monitor>, LaunchError>,
    pub current: Option<WindowId>,
    pub fail_dispatch: Vec<String>,
    pub never_appear: Vec<String>,
    pub fail_position: Vec<String>,
    pub fail_picker: bool,
    pub appear_after_scans: u32,
    /// Appended to spawned window titles, like a shell name
    pub title_suffix: String,
    state: Mutex<State>,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self {
            monitors: Ok(Vec::new()),
            current: Some(CONSOLE_ID),
            fail_dispatch: Vec::new(),
            never_appear: Vec::new(),
            fail_position: Vec::new(),
            fail_picker: false,
            appear_after_scans: 0,
            title_suffix: " - PowerShell".into(),
            state: Mutex::new(State {
                windows: vec![(CONSOLE_ID, CONSOLE_TITLE.into())],
                next_id: 100,
                ..State::default()
            }),
        }
    }

    pub fn with_monitors(monitors: Vec<Monitor>) -> Self {
        Self { monitors: Ok(monitors), ..Self::new() }
    }

    pub fn add_window(&self, id: WindowId, title: &str) {
        self.state.lock().unwrap().windows.push((id, title.into()));
    }

    pub fn bounds_of(&self, id: WindowId) -> Option<Rect> {
        self.state.lock().unwrap().bounds.get(&id).copied()
    }

    /// Bounds of the window whose text contains `title`.
    pub fn bounds_for_title(&self, title: &str) -> Option<Rect> {
        let state = self.state.lock().unwrap();
        let (id, _) = state.windows.iter().find(|(_, t)| t.contains(title))?;
        state.bounds.get(id).copied()
    }

    pub fn spawned(&self) -> Vec<String> {
        self.state.lock().unwrap().spawned.clone()
    }

    pub fn scripts_run(&self) -> Vec<String> {
        self.state.lock().unwrap().scripts_run.clone()
    }

    pub fn scans(&self) -> u32 {
        self.state.lock().unwrap().scans
    }

    fn title_of(&self, id: WindowId) -> Option<String> {
        let state = self.state.lock().unwrap();
        state.windows.iter().find(|(w, _)| *w == id).map(|(_, t)| t.clone())
    }
}

impl Platform for FakePlatform {
    fn monitors(&self) -> Result<Vec<Monitor>, LaunchError> {
        self.monitors.clone()
    }

    fn windows(&self) -> Vec<(WindowId, String)> {
        let mut state = self.state.lock().unwrap();
        state.scans += 1;
        if state.scans >= self.appear_after_scans {
            let pending = std::mem::take(&mut state.pending);
            state.windows.extend(pending);
        }
        state.windows.clone()
    }

    fn set_bounds(&self, window: WindowId, rect: Rect) -> Result<(), LaunchError> {
        let title = self
            .title_of(window)
            .ok_or_else(|| LaunchError::PositionFailed(format!("no window #{}", window)))?;
        if self.fail_position.iter().any(|t| title.contains(t.as_str())) {
            return Err(LaunchError::PositionFailed(format!("refused to move '{}'", title)));
        }
        self.state.lock().unwrap().bounds.insert(window, rect);
        Ok(())
    }

    fn current_window(&self) -> Option<WindowId> {
        self.current
    }

    fn spawn_terminal(&self, title: &str, _working_dir: &str, _script: &str) -> Result<(), LaunchError> {
        if self.fail_dispatch.iter().any(|t| t == title) {
            return Err(LaunchError::DispatchFailed("wt not found".into()));
        }
        let mut state = self.state.lock().unwrap();
        state.spawned.push(title.to_string());
        if !self.never_appear.iter().any(|t| t == title) {
            let id = state.next_id;
            state.next_id += 1;
            state.pending.push((id, format!("{}{}", title, self.title_suffix)));
        }
        Ok(())
    }

    fn open_tab(&self, _working_dir: &str, script: &str) -> Result<(), LaunchError> {
        self.state.lock().unwrap().scripts_run.push(script.to_string());
        Ok(())
    }

    fn run_script(&self, script: &str) -> Result<(), LaunchError> {
        if self.fail_picker {
            return Err(LaunchError::PickerFailed("powershell exited with 1".into()));
        }
        self.state.lock().unwrap().scripts_run.push(script.to_string());
        Ok(())
    }
}
