use std::thread;

use crate::config::{command_for, label_for, Config, Profile};
use crate::error::LaunchError;
use crate::layout::calculate_layout;
use crate::logger;
use crate::platform::Platform;
use crate::script::build_picker;
use crate::settings::LaunchSettings;
use crate::types::*;
use crate::window;

/// Requests for one monitor, kept together for the status report.
#[derive(Debug, Clone)]
pub struct MonitorGroup {
    pub monitor: Monitor,
    pub requests: Vec<LaunchRequest>,
}

/// Build one titled request per configured window, monitor by monitor.
///
/// Config slot `i` goes to detected monitor `i`; the caller is expected to
/// have fitted the config to the monitor count. Titles are
/// `<tool>-<monitor>-<window>`, one-based, and unique within a launch.
pub fn build_requests(cfg: &Config, monitors: &[Monitor]) -> Vec<MonitorGroup> {
    cfg.monitors
        .iter()
        .zip(monitors)
        .enumerate()
        .map(|(i, (mc, mon))| {
            let rects = calculate_layout(mon, mc.window_count(), mc.layout());
            let requests = rects
                .into_iter()
                .enumerate()
                .map(|(j, rect)| {
                    let tool = mc.tool_for(j);
                    LaunchRequest {
                        title: format!("{}-{}-{}", tool, i + 1, j + 1),
                        working_dir: cfg.projects_root.clone(),
                        rect,
                        command: command_for(tool).to_string(),
                        label: label_for(tool).to_string(),
                    }
                })
                .collect();
            MonitorGroup { monitor: mon.clone(), requests }
        })
        .collect()
}

/// The slot-0 picker, run in this terminal once the caller has reported
/// placement results.
pub struct DeferredPicker<'a> {
    platform: &'a dyn Platform,
    script: Option<String>,
}

impl<'a> DeferredPicker<'a> {
    /// Block until the user picks a project (or cancels).
    pub fn run(self) -> Result<(), LaunchError> {
        match self.script {
            Some(script) => self.platform.run_script(&script),
            None => Ok(()),
        }
    }
}

/// Outcome of `launch_all`.
pub struct Launch<'a> {
    /// One entry per request, in request order
    pub outcomes: Vec<LaunchOutcome>,
    pub picker: DeferredPicker<'a>,
}

/// Launch every request. Slot 0 reuses this process's terminal; every other
/// slot gets a new terminal window that is then located by title and moved
/// into place.
///
/// Never fails as a whole: a failed slot is recorded in its outcome and the
/// other slots carry on.
pub fn launch_all<'a>(
    platform: &'a dyn Platform,
    requests: &[LaunchRequest],
    profiles: &[Profile],
    settings: &LaunchSettings,
) -> Launch<'a> {
    let mut outcomes: Vec<LaunchOutcome> = requests
        .iter()
        .map(|r| LaunchOutcome { title: r.title.clone(), error: None })
        .collect();

    let Some(first) = requests.first() else {
        return Launch { outcomes, picker: DeferredPicker { platform, script: None } };
    };

    // Phase 1: dispatch, as fast as possible
    let mut dispatched = 0;
    for (req, outcome) in requests.iter().zip(outcomes.iter_mut()).skip(1) {
        let script = build_picker(&req.working_dir, &req.command, &req.label, profiles);
        match platform.spawn_terminal(&req.title, &req.working_dir, &script) {
            Ok(()) => {
                logger::info(&format!("dispatched {}", req.title));
                dispatched += 1;
            }
            Err(e) => {
                logger::error(&format!("dispatch {} failed: {}", req.title, e));
                outcome.error = Some(e);
            }
        }
    }

    // Phase 2: one shared settle delay for every spawned window
    if dispatched > 0 {
        logger::info(&format!("waiting {:?} for {} window(s)", settings.settle_delay, dispatched));
        thread::sleep(settings.settle_delay);
    }

    // Phase 3: locate and position concurrently; each worker owns one slot
    let current = platform.current_window();
    let results: Vec<(usize, Result<(), LaunchError>)> = thread::scope(|s| {
        let handles: Vec<_> = requests
            .iter()
            .enumerate()
            .filter(|(i, _)| outcomes[*i].error.is_none())
            .map(|(i, req)| {
                let handle = s.spawn(move || {
                    if i == 0 {
                        position_current(platform, current, req.rect)
                    } else {
                        locate_and_position(platform, req, settings)
                    }
                });
                (i, handle)
            })
            .collect();

        handles
            .into_iter()
            .map(|(i, handle)| {
                let result = handle
                    .join()
                    .unwrap_or_else(|_| Err(LaunchError::PositionFailed("worker panicked".into())));
                (i, result)
            })
            .collect()
    });

    // Phase 4: aggregate in request order
    for (i, result) in results {
        if let Err(e) = result {
            logger::warn(&format!("{}: {}", requests[i].title, e));
            outcomes[i].error = Some(e);
        }
    }

    let ok = outcomes.iter().filter(|o| o.ok()).count();
    logger::info(&format!("launch finished: {}/{} placed", ok, outcomes.len()));

    let script = build_picker(&first.working_dir, &first.command, &first.label, profiles);
    Launch {
        outcomes,
        picker: DeferredPicker { platform, script: Some(script) },
    }
}

fn position_current(platform: &dyn Platform, current: Option<WindowId>, rect: Rect) -> Result<(), LaunchError> {
    let hwnd = current
        .ok_or_else(|| LaunchError::PositionFailed("no console window for this process".into()))?;
    window::set_bounds(platform, hwnd, rect)
}

fn locate_and_position(
    platform: &dyn Platform,
    req: &LaunchRequest,
    settings: &LaunchSettings,
) -> Result<(), LaunchError> {
    let hwnd = window::find_by_title(platform, &req.title, settings)?;
    window::set_bounds(platform, hwnd, req.rect)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::{MonitorConfig, WindowConfig};
    use crate::platform::fake::{FakePlatform, CONSOLE_ID};

    fn fast() -> LaunchSettings {
        LaunchSettings {
            settle_delay: Duration::from_millis(1),
            poll_interval: Duration::from_millis(1),
            poll_attempts: 5,
        }
    }

    fn mon(x: i32, primary: bool) -> Monitor {
        Monitor { name: "m".into(), x, y: 0, width: 1920, height: 1080, primary }
    }

    fn req(title: &str, x: i32) -> LaunchRequest {
        LaunchRequest {
            title: title.into(),
            working_dir: "/projects".into(),
            rect: Rect { x, y: 0, width: 960, height: 1080 },
            command: "claude".into(),
            label: "cc".into(),
        }
    }

    #[test]
    fn two_vertical_windows_with_second_dispatch_failing() {
        let mut platform = FakePlatform::new();
        platform.fail_dispatch.push("w2".into());

        let mut cfg = Config::fresh("/projects");
        cfg.monitors.push(MonitorConfig {
            layout: "vertical".into(),
            windows: vec![WindowConfig { tool: "cc".into() }, WindowConfig { tool: "cc".into() }],
        });
        let groups = build_requests(&cfg, &[mon(0, true)]);
        let rects: Vec<Rect> = groups[0].requests.iter().map(|r| r.rect).collect();
        assert_eq!(
            rects,
            vec![
                Rect { x: 0, y: 0, width: 960, height: 1080 },
                Rect { x: 960, y: 0, width: 960, height: 1080 },
            ]
        );

        let requests = vec![req("w1", 0), req("w2", 960)];
        let launch = launch_all(&platform, &requests, &[], &fast());
        assert_eq!(launch.outcomes.len(), 2);
        assert_eq!(launch.outcomes[0].title, "w1");
        assert!(launch.outcomes[0].ok());
        assert_eq!(launch.outcomes[1].title, "w2");
        assert!(matches!(launch.outcomes[1].error, Some(LaunchError::DispatchFailed(_))));
        assert_eq!(platform.bounds_of(CONSOLE_ID), Some(requests[0].rect));

        launch.picker.run().unwrap();
        assert_eq!(platform.scripts_run().len(), 1);
    }

    #[test]
    fn failures_stay_in_their_slot() {
        let mut platform = FakePlatform::new();
        platform.fail_dispatch.push("s2".into());
        platform.never_appear.push("s3".into());
        platform.fail_position.push("s4".into());

        let requests: Vec<LaunchRequest> =
            (1..=6).map(|i| req(&format!("s{}", i), i * 100)).collect();
        let launch = launch_all(&platform, &requests, &[], &fast());

        let titles: Vec<&str> = launch.outcomes.iter().map(|o| o.title.as_str()).collect();
        assert_eq!(titles, vec!["s1", "s2", "s3", "s4", "s5", "s6"]);
        assert!(launch.outcomes[0].ok());
        assert!(matches!(launch.outcomes[1].error, Some(LaunchError::DispatchFailed(_))));
        assert!(matches!(launch.outcomes[2].error, Some(LaunchError::NotFound { .. })));
        assert!(matches!(launch.outcomes[3].error, Some(LaunchError::PositionFailed(_))));
        assert!(launch.outcomes[4].ok());
        assert!(launch.outcomes[5].ok());
        assert_eq!(platform.bounds_for_title("s5"), Some(requests[4].rect));
        assert_eq!(platform.bounds_for_title("s6"), Some(requests[5].rect));
    }

    #[test]
    fn locate_workers_overlap() {
        let mut platform = FakePlatform::new();
        let requests: Vec<LaunchRequest> = (1..=6).map(|i| req(&format!("slow{}", i), i * 100)).collect();
        platform.never_appear = requests.iter().skip(1).map(|r| r.title.clone()).collect();
        let settings = LaunchSettings {
            settle_delay: Duration::ZERO,
            poll_interval: Duration::from_millis(20),
            poll_attempts: 10,
        };

        let started = std::time::Instant::now();
        let launch = launch_all(&platform, &requests, &[], &settings);
        let elapsed = started.elapsed();

        let failed = launch.outcomes.iter().filter(|o| !o.ok()).count();
        assert_eq!(failed, 5);
        // one slot alone polls for ~180 ms; five in a row would take ~900 ms
        assert!(elapsed < Duration::from_millis(600), "locate ran serially: {:?}", elapsed);
    }

    #[test]
    fn failed_dispatch_skips_locate() {
        let mut platform = FakePlatform::new();
        platform.fail_dispatch.push("a2".into());
        let requests = vec![req("a1", 0), req("a2", 960)];
        launch_all(&platform, &requests, &[], &fast());
        assert_eq!(platform.scans(), 0);
        assert!(platform.spawned().is_empty());
    }

    #[test]
    fn single_request_spawns_nothing() {
        let platform = FakePlatform::new();
        let launch = launch_all(&platform, &[req("only", 0)], &[], &fast());
        assert!(platform.spawned().is_empty());
        assert!(launch.outcomes[0].ok());
        assert!(launch.picker.run().is_ok());
        assert_eq!(platform.scripts_run().len(), 1);
    }

    #[test]
    fn missing_console_window_fails_slot_zero_only() {
        let mut platform = FakePlatform::new();
        platform.current = None;
        let requests = vec![req("c1", 0), req("c2", 960)];
        let launch = launch_all(&platform, &requests, &[], &fast());
        assert!(matches!(launch.outcomes[0].error, Some(LaunchError::PositionFailed(_))));
        assert!(launch.outcomes[1].ok());
        assert!(launch.picker.run().is_ok());
    }

    #[test]
    fn no_requests_gives_noop_picker() {
        let platform = FakePlatform::new();
        let launch = launch_all(&platform, &[], &[], &fast());
        assert!(launch.outcomes.is_empty());
        launch.picker.run().unwrap();
        assert!(platform.scripts_run().is_empty());
    }

    #[test]
    fn picker_failure_is_reported() {
        let mut platform = FakePlatform::new();
        platform.fail_picker = true;
        let launch = launch_all(&platform, &[req("p1", 0)], &[], &fast());
        assert!(matches!(launch.picker.run(), Err(LaunchError::PickerFailed(_))));
    }

    #[test]
    fn requests_follow_monitor_and_window_order() {
        let mut cfg = Config::fresh("/projects");
        cfg.monitors.push(MonitorConfig {
            layout: "grid".into(),
            windows: vec![
                WindowConfig { tool: "cc".into() },
                WindowConfig { tool: "cx".into() },
                WindowConfig { tool: "cc".into() },
            ],
        });
        cfg.monitors.push(MonitorConfig::default());
        let groups = build_requests(&cfg, &[mon(0, true), mon(1920, false)]);

        assert_eq!(groups.len(), 2);
        let titles: Vec<&str> = groups
            .iter()
            .flat_map(|g| g.requests.iter().map(|r| r.title.as_str()))
            .collect();
        assert_eq!(titles, vec!["cc-1-1", "cx-1-2", "cc-1-3", "cc-2-1"]);
        assert_eq!(groups[0].requests[1].label, "cx");
        assert_eq!(groups[0].requests[1].command, crate::config::CODEX_COMMAND);
        assert_eq!(groups[1].requests[0].rect, mon(1920, false).bounds());
    }

    #[test]
    fn extra_config_slots_without_monitor_are_ignored() {
        let mut cfg = Config::fresh("/projects");
        cfg.fit_to_monitors(3);
        let groups = build_requests(&cfg, &[mon(0, true)]);
        assert_eq!(groups.len(), 1);
    }
}
