use serde::Serialize;

use crate::error::LaunchError;

/// OS window identifier (HWND on Windows, synthetic id in the stub)
pub type WindowId = u64;

/// One physical display, in virtual-desktop coordinates
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Monitor {
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub primary: bool,
}

impl Monitor {
    pub fn bounds(&self) -> Rect {
        Rect { x: self.x, y: self.y, width: self.width, height: self.height }
    }
}

/// Target window bounds, always inside the owning monitor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// One window slot of a launch. `title` is the only key used to find the
/// spawned window again, so it must be unique within one launch.
#[derive(Debug, Clone)]
pub struct LaunchRequest {
    pub title: String,
    pub working_dir: String,
    pub rect: Rect,
    /// Command run once a project is picked, e.g. `claude ...`
    pub command: String,
    /// Short name shown in the picker header (`cc`, `cx`)
    pub label: String,
}

/// Result of one slot. Always produced, one per request, in request order.
#[derive(Debug)]
pub struct LaunchOutcome {
    pub title: String,
    pub error: Option<LaunchError>,
}

impl LaunchOutcome {
    pub fn ok(&self) -> bool {
        self.error.is_none()
    }
}
