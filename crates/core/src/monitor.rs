use crate::error::LaunchError;
use crate::logger;
use crate::platform::Platform;
use crate::types::Monitor;

/// Detect every active display, sorted left to right by x origin, then top
/// to bottom for displays stacked at the same x.
///
/// Config slot `i` is applied to monitor `i`, so this ordering must be stable
/// across runs. Monitors are renamed `Monitor N` after sorting. An empty list
/// is a valid result.
pub fn detect(platform: &dyn Platform) -> Result<Vec<Monitor>, LaunchError> {
    let mut monitors = platform.monitors()?;
    monitors.sort_by_key(|m| (m.x, m.y));

    for (i, m) in monitors.iter_mut().enumerate() {
        logger::info(&format!(
            "monitor {}: {} {}x{} at ({}, {}){}",
            i + 1, m.name, m.width, m.height, m.x, m.y,
            if m.primary { " primary" } else { "" },
        ));
        m.name = format!("Monitor {}", i + 1);
    }
    Ok(monitors)
}

/// The primary monitor, or the leftmost one when none is flagged.
pub fn primary(monitors: &[Monitor]) -> Option<&Monitor> {
    monitors.iter().find(|m| m.primary).or_else(|| monitors.first())
}
