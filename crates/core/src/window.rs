use std::thread;

use crate::error::LaunchError;
use crate::logger;
use crate::platform::Platform;
use crate::settings::LaunchSettings;
use crate::types::{Rect, WindowId};

/// A window text matches a requested title when they are equal or either
/// contains the other. Terminals often decorate the title they were given
/// (`cc-1-2 - PowerShell`). Untitled windows never match.
pub fn titles_match(window_text: &str, title: &str) -> bool {
    !window_text.is_empty()
        && !title.is_empty()
        && (window_text == title || window_text.contains(title) || title.contains(window_text))
}

/// Poll the top-level window list until a window matching `title` appears.
///
/// Window creation is asynchronous to process spawn, so this scans up to
/// `poll_attempts` times, `poll_interval` apart.
pub fn find_by_title(
    platform: &dyn Platform,
    title: &str,
    settings: &LaunchSettings,
) -> Result<WindowId, LaunchError> {
    for attempt in 1..=settings.poll_attempts {
        let found = platform
            .windows()
            .into_iter()
            .find(|(_, text)| titles_match(text, title));
        if let Some((id, text)) = found {
            logger::info_p("locate", &format!("'{}' -> #{} \"{}\" (attempt {})", title, id, text, attempt));
            return Ok(id);
        }
        if attempt < settings.poll_attempts {
            thread::sleep(settings.poll_interval);
        }
    }
    Err(LaunchError::NotFound {
        title: title.to_string(),
        attempts: settings.poll_attempts,
    })
}

/// Move and resize `window` to `rect`. Repeating the call with the same
/// rectangle leaves the window where it is.
pub fn set_bounds(platform: &dyn Platform, window: WindowId, rect: Rect) -> Result<(), LaunchError> {
    platform.set_bounds(window, rect)?;
    logger::info_p(
        "position",
        &format!("#{} -> ({}, {}) {}x{}", window, rect.x, rect.y, rect.width, rect.height),
    );
    Ok(())
}
