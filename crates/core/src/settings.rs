use std::time::Duration;

/// Timing knobs for one launch. Defaults are sized for Windows Terminal.
#[derive(Debug, Clone, Copy)]
pub struct LaunchSettings {
    /// Single shared wait after the last terminal is spawned
    pub settle_delay: Duration,
    /// Pause between two window-list scans while locating a window
    pub poll_interval: Duration,
    /// Window-list scans before a window counts as not found
    pub poll_attempts: u32,
}

impl Default for LaunchSettings {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_millis(300),
            poll_interval: Duration::from_millis(50),
            poll_attempts: 40,
        }
    }
}
