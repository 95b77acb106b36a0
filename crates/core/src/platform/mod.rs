pub mod stub;

#[cfg(test)]
pub mod fake;

#[cfg(target_os = "windows")]
pub mod win32;

use crate::error::LaunchError;
use crate::types::*;

/// OS services the launcher needs: display and window enumeration, window
/// placement and terminal processes.
///
/// Shared by reference across the positioning workers, hence `Sync`.
pub trait Platform: Send + Sync {
    /// Every active display, in whatever order the OS reports them.
    fn monitors(&self) -> Result<Vec<Monitor>, LaunchError>;

    /// Every top-level window with its current text.
    fn windows(&self) -> Vec<(WindowId, String)>;

    /// Move and resize without changing z-order, showing the window.
    fn set_bounds(&self, window: WindowId, rect: Rect) -> Result<(), LaunchError>;

    /// The console window hosting this process, if any.
    fn current_window(&self) -> Option<WindowId>;

    /// Start a new terminal window titled `title` that runs `script`.
    fn spawn_terminal(&self, title: &str, working_dir: &str, script: &str) -> Result<(), LaunchError>;

    /// Open a tab in the current terminal window that runs `script`.
    fn open_tab(&self, working_dir: &str, script: &str) -> Result<(), LaunchError>;

    /// Run `script` in this terminal, blocking until it exits.
    fn run_script(&self, script: &str) -> Result<(), LaunchError>;
}

/// Create the platform appropriate for the current OS.
pub fn create_platform(force_stub: bool) -> Box<dyn Platform> {
    if force_stub {
        return Box::new(stub::StubPlatform::new());
    }
    #[cfg(target_os = "windows")]
    {
        return Box::new(win32::Win32Platform);
    }
    #[cfg(not(target_os = "windows"))]
    {
        crate::logger::warn("no native window backend on this OS, using stub");
        Box::new(stub::StubPlatform::new())
    }
}
