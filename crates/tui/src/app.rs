use quickstart_core::config::{next_tool, Config};
use quickstart_core::layout::{calculate_layout, Layout};
use quickstart_core::types::Monitor;

use crate::confirm::ConfirmDialog;

pub const MAX_WINDOWS: usize = 9;

/// One selectable line of the setup list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    /// Window count of monitor `m`
    Count(usize),
    /// Tool of window `w` on monitor `m`
    Window(usize, usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupOutcome {
    Launch,
    Cancel,
}

/// Interactive setup state: window count, layout and tool per monitor.
pub struct App {
    pub monitors: Vec<Monitor>,
    pub config: Config,
    pub selected: usize,
    pub confirm: Option<ConfirmDialog>,
    pub outcome: Option<SetupOutcome>,
}

impl App {
    /// `config` is fitted to the detected monitors; every monitor keeps at
    /// least one window.
    pub fn new(monitors: Vec<Monitor>, mut config: Config) -> Self {
        config.fit_to_monitors(monitors.len());
        for mc in config.monitors.iter_mut() {
            if mc.window_count() == 0 {
                mc.set_window_count(1);
            }
        }
        Self {
            monitors,
            config,
            selected: 0,
            confirm: None,
            outcome: None,
        }
    }

    pub fn rows(&self) -> Vec<Row> {
        let mut rows = Vec::new();
        for (m, mc) in self.config.monitors.iter().enumerate() {
            rows.push(Row::Count(m));
            rows.extend((0..mc.window_count()).map(|w| Row::Window(m, w)));
        }
        rows
    }

    pub fn current_row(&self) -> Option<Row> {
        self.rows().get(self.selected).copied()
    }

    /// Windows that will actually open: what the layout yields per monitor.
    pub fn total_windows(&self) -> usize {
        self.config
            .monitors
            .iter()
            .zip(&self.monitors)
            .map(|(mc, mon)| calculate_layout(mon, mc.window_count(), mc.layout()).len())
            .sum()
    }

    pub fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.rows().len() {
            self.selected += 1;
        }
    }

    /// Right / `+`: one more window, or the other tool on a window row.
    pub fn increase(&mut self) {
        match self.current_row() {
            Some(Row::Count(m)) => self.resize(m, 1),
            Some(Row::Window(m, w)) => self.toggle_tool(m, w),
            None => {}
        }
    }

    /// Left / `-`: one window fewer (never below one), or the other tool.
    pub fn decrease(&mut self) {
        match self.current_row() {
            Some(Row::Count(m)) => self.resize(m, -1),
            Some(Row::Window(m, w)) => self.toggle_tool(m, w),
            None => {}
        }
    }

    /// Cycle the layout of the monitor under the cursor. `full` holds a
    /// single window, so it is skipped while the monitor has more.
    pub fn cycle_layout(&mut self) {
        let m = match self.current_row() {
            Some(Row::Count(m)) | Some(Row::Window(m, _)) => m,
            None => return,
        };
        let mc = &mut self.config.monitors[m];
        let mut next = mc.layout().next();
        if next == Layout::Full && mc.window_count() > 1 {
            next = next.next();
        }
        mc.layout = next.name().into();
    }

    fn resize(&mut self, m: usize, delta: isize) {
        let mc = &mut self.config.monitors[m];
        let count = (mc.window_count() as isize + delta).clamp(1, MAX_WINDOWS as isize) as usize;
        if count != mc.window_count() {
            mc.set_window_count(count);
        }
    }

    fn toggle_tool(&mut self, m: usize, w: usize) {
        if let Some(win) = self.config.monitors[m].windows.get_mut(w) {
            win.tool = next_tool(&win.tool).into();
        }
    }

    pub fn request_launch(&mut self) {
        let total = self.total_windows();
        self.confirm = Some(ConfirmDialog::new(format!("Launch {} window(s)?", total)));
    }

    /// Resolve the open confirm dialog with its current choice.
    pub fn answer_confirm(&mut self) {
        if let Some(dialog) = self.confirm.take() {
            if dialog.selected {
                self.outcome = Some(SetupOutcome::Launch);
            }
        }
    }

    pub fn cancel(&mut self) {
        if self.confirm.take().is_none() {
            self.outcome = Some(SetupOutcome::Cancel);
        }
    }

    /// Layout shown for monitor `m`.
    pub fn layout_of(&self, m: usize) -> Layout {
        self.config.monitors[m].layout()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monitors(n: i32) -> Vec<Monitor> {
        (0..n)
            .map(|i| Monitor {
                name: format!("Monitor {}", i + 1),
                x: i * 1920,
                y: 0,
                width: 1920,
                height: 1080,
                primary: i == 0,
            })
            .collect()
    }

    #[test]
    fn fits_config_to_monitors() {
        let app = App::new(monitors(2), Config::fresh("/p"));
        assert_eq!(app.config.monitors.len(), 2);
        assert_eq!(app.rows(), vec![Row::Count(0), Row::Window(0, 0), Row::Count(1), Row::Window(1, 0)]);
    }

    #[test]
    fn count_changes_pick_auto_layout_and_clamp() {
        let mut app = App::new(monitors(1), Config::fresh("/p"));
        app.increase();
        assert_eq!(app.config.monitors[0].window_count(), 2);
        assert_eq!(app.layout_of(0), Layout::Vertical);
        app.increase();
        assert_eq!(app.layout_of(0), Layout::Grid);
        for _ in 0..20 {
            app.decrease();
        }
        assert_eq!(app.config.monitors[0].window_count(), 1);
        for _ in 0..20 {
            app.increase();
        }
        assert_eq!(app.config.monitors[0].window_count(), MAX_WINDOWS);
    }

    #[test]
    fn window_rows_toggle_tool() {
        let mut app = App::new(monitors(1), Config::fresh("/p"));
        app.move_down();
        assert_eq!(app.current_row(), Some(Row::Window(0, 0)));
        app.increase();
        assert_eq!(app.config.monitors[0].tool_for(0), "cx");
        app.decrease();
        assert_eq!(app.config.monitors[0].tool_for(0), "cc");
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut app = App::new(monitors(1), Config::fresh("/p"));
        app.move_up();
        assert_eq!(app.selected, 0);
        for _ in 0..5 {
            app.move_down();
        }
        assert_eq!(app.selected, 1);
    }

    #[test]
    fn layout_cycles_for_monitor_under_cursor() {
        let mut app = App::new(monitors(1), Config::fresh("/p"));
        app.cycle_layout();
        assert_eq!(app.layout_of(0), Layout::Vertical);
    }

    #[test]
    fn layout_cycle_skips_full_with_several_windows() {
        let mut app = App::new(monitors(1), Config::fresh("/p"));
        app.increase();
        app.increase();
        for _ in 0..8 {
            app.cycle_layout();
            assert_ne!(app.layout_of(0), Layout::Full);
            assert_eq!(app.total_windows(), 3);
        }
        app.request_launch();
        assert_eq!(app.confirm.as_ref().map(|d| d.message.as_str()), Some("Launch 3 window(s)?"));
    }

    #[test]
    fn total_counts_what_the_layout_yields() {
        let mut app = App::new(monitors(2), Config::fresh("/p"));
        app.config.monitors[0].windows.push(quickstart_core::config::WindowConfig { tool: "cc".into() });
        app.config.monitors[0].layout = "full".into();
        assert_eq!(app.total_windows(), 2);
    }

    #[test]
    fn confirm_flow() {
        let mut app = App::new(monitors(1), Config::fresh("/p"));
        app.request_launch();
        app.cancel();
        assert!(app.confirm.is_none());
        assert_eq!(app.outcome, None);

        app.request_launch();
        app.answer_confirm();
        assert_eq!(app.outcome, None);

        app.request_launch();
        if let Some(d) = app.confirm.as_mut() {
            d.toggle();
        }
        app.answer_confirm();
        assert_eq!(app.outcome, Some(SetupOutcome::Launch));
    }

    #[test]
    fn cancel_without_dialog_quits() {
        let mut app = App::new(monitors(1), Config::fresh("/p"));
        app.cancel();
        assert_eq!(app.outcome, Some(SetupOutcome::Cancel));
    }
}
