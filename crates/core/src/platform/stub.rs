use std::sync::Mutex;

use crate::error::LaunchError;
use crate::logger;
use crate::types::*;
use super::Platform;

const CONSOLE_ID: WindowId = 1;

/// In-memory platform for dry runs and non-Windows hosts. Spawned terminals
/// show up in its window table with a shell suffix, the way Windows Terminal
/// decorates titles.
pub struct StubPlatform {
    windows: Mutex<Vec<(WindowId, String)>>,
}

impl StubPlatform {
    pub fn new() -> Self {
        Self {
            windows: Mutex::new(vec![(CONSOLE_ID, "qk".into())]),
        }
    }
}

impl Default for StubPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for StubPlatform {
    fn monitors(&self) -> Result<Vec<Monitor>, LaunchError> {
        // Not in x order; detect() sorts.
        Ok(vec![
            Monitor { name: "STUB2".into(), x: 1920, y: 0, width: 2560, height: 1440, primary: false },
            Monitor { name: "STUB1".into(), x: 0, y: 0, width: 1920, height: 1080, primary: true },
        ])
    }

    fn windows(&self) -> Vec<(WindowId, String)> {
        self.windows.lock().map(|w| w.clone()).unwrap_or_default()
    }

    fn set_bounds(&self, window: WindowId, rect: Rect) -> Result<(), LaunchError> {
        logger::info_p(
            "stub",
            &format!("win({}).set_bounds({}, {}, {}x{})", window, rect.x, rect.y, rect.width, rect.height),
        );
        Ok(())
    }

    fn current_window(&self) -> Option<WindowId> {
        Some(CONSOLE_ID)
    }

    fn spawn_terminal(&self, title: &str, working_dir: &str, script: &str) -> Result<(), LaunchError> {
        logger::info_p(
            "stub",
            &format!("spawn_terminal(\"{}\", \"{}\", {} byte script)", title, working_dir, script.len()),
        );
        let mut windows = self
            .windows
            .lock()
            .map_err(|_| LaunchError::DispatchFailed("window table poisoned".into()))?;
        let id = windows.iter().map(|(id, _)| *id).max().unwrap_or(CONSOLE_ID) + 1;
        windows.push((id, format!("{} - PowerShell", title)));
        Ok(())
    }

    fn open_tab(&self, working_dir: &str, script: &str) -> Result<(), LaunchError> {
        logger::info_p("stub", &format!("open_tab(\"{}\", {} byte script)", working_dir, script.len()));
        Ok(())
    }

    fn run_script(&self, script: &str) -> Result<(), LaunchError> {
        logger::info_p("stub", &format!("run_script({} byte script)", script.len()));
        Ok(())
    }
}
