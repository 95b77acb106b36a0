//! Line-oriented status output for the non-interactive parts of the CLI.

use std::collections::HashMap;
use std::io::{self, Write};

use crossterm::style::{style, Attribute, Color, Stylize};

use quickstart_core::orchestrator::MonitorGroup;
use quickstart_core::types::{LaunchOutcome, Monitor};

const DIAMOND: &str = "◆";
const BULLET: &str = "▪";
const ARROW: &str = "▸";
const CHECK: &str = "✓";
const CROSS: &str = "✗";

const BOX_INNER: usize = 37;

const LOGO: [(&str, Color); 6] = [
    ("  ██████╗ ██╗  ██╗", Color::Cyan),
    (" ██╔═══██╗██║ ██╔╝", Color::Cyan),
    (" ██║   ██║█████╔╝ ", Color::DarkCyan),
    (" ██║▄▄ ██║██╔═██╗ ", Color::DarkCyan),
    (" ╚██████╔╝██║  ██╗", Color::DarkGrey),
    ("  ╚══▀▀═╝ ╚═╝  ╚═╝", Color::DarkGrey),
];

/// Styled writer. Color is decided once at construction.
pub struct Console<W: Write> {
    out: W,
    color: bool,
}

impl Console<io::Stdout> {
    /// Stdout console; color is off with `--no-color` or when `NO_COLOR` is set.
    pub fn stdout(no_color: bool) -> Self {
        let color = !no_color && std::env::var_os("NO_COLOR").is_none();
        Self::new(io::stdout(), color)
    }
}

impl<W: Write> Console<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// `text` in `color`, or plain when color is off.
    pub fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            style(text).with(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn strong(&self, text: &str, color: Color) -> String {
        if self.color {
            style(text).with(color).attribute(Attribute::Bold).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn newline(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    pub fn logo(&mut self, subtitle: &str) -> io::Result<()> {
        writeln!(self.out)?;
        for (i, (text, color)) in LOGO.iter().enumerate() {
            write!(self.out, " {}", self.paint(text, *color))?;
            if i == 1 && !subtitle.is_empty() {
                write!(self.out, "   {}", self.strong(subtitle, Color::White))?;
            }
            writeln!(self.out)?;
        }
        Ok(())
    }

    pub fn sep(&mut self) -> io::Result<()> {
        writeln!(self.out, "\n {}", self.paint(&"─".repeat(40), Color::DarkGrey))
    }

    pub fn head(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "\n {} {}", self.paint(DIAMOND, Color::Cyan), self.paint(text, Color::White))
    }

    pub fn ok(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, " {} {}", self.paint(DIAMOND, Color::Green), self.paint(text, Color::White))
    }

    pub fn warn(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "   {}", self.paint(&format!("{} {}", BULLET, text), Color::Yellow))
    }

    /// A command for the user to copy, indented and highlighted.
    pub fn command_hint(&mut self, cmd: &str) -> io::Result<()> {
        writeln!(self.out, "   {}\n", self.paint(cmd, Color::Cyan))
    }

    /// A dim note under the previous line.
    pub fn note(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "   {}", self.paint(&format!("{} {}", ARROW, text), Color::DarkGrey))
    }

    /// Prompt label with an optional default; the caller reads stdin.
    pub fn prompt(&mut self, label: &str, default: &str) -> io::Result<()> {
        write!(self.out, "\n {} {}", self.paint(DIAMOND, Color::Cyan), self.paint(label, Color::White))?;
        if !default.is_empty() {
            write!(self.out, " {}", self.paint(&format!("[{}]", default), Color::DarkGrey))?;
        }
        write!(self.out, "\n   {} ", self.paint(ARROW, Color::Cyan))?;
        self.out.flush()
    }

    /// Separator, then the closing status line.
    pub fn fin(&mut self, text: &str) -> io::Result<()> {
        self.sep()?;
        self.ok(text)?;
        writeln!(self.out)
    }

    pub fn box_start(&mut self, title: &str, badge: &str) -> io::Result<()> {
        let used = visible_width(title) + if badge.is_empty() { 0 } else { visible_width(badge) + 2 };
        let pad = (BOX_INNER - 4).saturating_sub(used).max(1);
        let badge = if badge.is_empty() {
            String::new()
        } else {
            format!(" {} ", self.strong(badge, Color::Yellow))
        };
        writeln!(
            self.out,
            "   {}{}{}{}",
            self.paint("┌─ ", Color::DarkGrey),
            self.paint(title, Color::White),
            badge,
            self.paint(&format!(" {}─┐", "─".repeat(pad)), Color::DarkGrey),
        )
    }

    /// One row, padded to the box width by visible characters.
    pub fn box_row(&mut self, text: &str) -> io::Result<()> {
        let pad = (BOX_INNER - 2).saturating_sub(visible_width(text));
        let edge = self.paint("│", Color::DarkGrey);
        writeln!(self.out, "   {}  {}{}{}", edge, text, " ".repeat(pad), edge)
    }

    pub fn box_end(&mut self) -> io::Result<()> {
        writeln!(self.out, "   {}", self.paint(&format!("└{}┘", "─".repeat(BOX_INNER)), Color::DarkGrey))
    }

    /// One panel per monitor with its resolution and origin.
    pub fn monitor_panels(&mut self, monitors: &[Monitor]) -> io::Result<()> {
        for m in monitors {
            self.box_start(&m.name, if m.primary { "Primary" } else { "" })?;
            let res = format!(
                "{}   {}",
                self.paint("Resolution", Color::DarkGrey),
                self.paint(&format!("{} x {}", m.width, m.height), Color::White)
            );
            self.box_row(&res)?;
            let pos = format!(
                "{}     {}",
                self.paint("Position", Color::DarkGrey),
                self.paint(&format!("({}, {})", m.x, m.y), Color::Grey)
            );
            self.box_row(&pos)?;
            self.box_end()?;
        }
        Ok(())
    }

    /// Per-monitor result panels, then one warning per failed slot, then `Ready`.
    pub fn launch_report(&mut self, groups: &[MonitorGroup], outcomes: &[LaunchOutcome]) -> io::Result<()> {
        let by_title: HashMap<&str, &LaunchOutcome> = outcomes.iter().map(|o| (o.title.as_str(), o)).collect();

        for g in groups {
            self.box_start(&g.monitor.name, if g.monitor.primary { "Primary" } else { "" })?;
            for req in &g.requests {
                let ok = by_title.get(req.title.as_str()).is_some_and(|o| o.ok());
                let mark = if ok {
                    self.paint(CHECK, Color::Green)
                } else {
                    self.paint(CROSS, Color::Red)
                };
                let row = format!("{}  {}", self.paint(&req.title, Color::Grey), mark);
                self.box_row(&row)?;
            }
            self.box_end()?;
        }

        let mut first = true;
        for o in outcomes {
            if let Some(e) = &o.error {
                if first {
                    writeln!(self.out)?;
                    first = false;
                }
                self.warn(&format!("{}: {}", o.title, e))?;
            }
        }

        self.fin("Ready")?;
        self.out.flush()
    }
}

/// Printed width of `s` in characters, skipping ANSI escape sequences.
pub fn visible_width(s: &str) -> usize {
    let mut n = 0;
    let mut in_escape = false;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape {
            if c.is_ascii_alphabetic() {
                in_escape = false;
            }
        } else {
            n += 1;
        }
    }
    n
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickstart_core::error::LaunchError;
    use quickstart_core::types::{LaunchRequest, Rect};

    fn plain() -> Console<Vec<u8>> {
        Console::new(Vec::new(), false)
    }

    fn text(c: Console<Vec<u8>>) -> String {
        String::from_utf8(c.into_inner()).unwrap()
    }

    #[test]
    fn visible_width_skips_escapes() {
        assert_eq!(visible_width("abc"), 3);
        assert_eq!(visible_width("\x1b[38;5;9m✓\x1b[39m"), 1);
        assert_eq!(visible_width(""), 0);
        let colored = Console::new(Vec::new(), true).paint("hello", Color::Red);
        assert_ne!(colored, "hello");
        assert_eq!(visible_width(&colored), 5);
    }

    #[test]
    fn box_rows_line_up() {
        let mut c = plain();
        c.box_start("Monitor 1", "Primary").unwrap();
        c.box_row("short").unwrap();
        c.box_row("a somewhat longer row").unwrap();
        c.box_end().unwrap();
        let out = text(c);
        let widths: Vec<usize> = out.lines().map(|l| l.chars().count()).collect();
        assert_eq!(widths.len(), 4);
        assert!(widths.iter().all(|w| *w == widths[0]), "{:?}", widths);
    }

    #[test]
    fn colored_rows_pad_like_plain_ones() {
        let mut c = Console::new(Vec::new(), true);
        let row = c.paint("abc", Color::Green);
        c.box_row(&row).unwrap();
        c.box_row("abc").unwrap();
        let out = text(c);
        let widths: Vec<usize> = out.lines().map(visible_width).collect();
        assert_eq!(widths[0], widths[1]);
    }

    #[test]
    fn launch_report_marks_each_slot() {
        let monitor = Monitor { name: "Monitor 1".into(), x: 0, y: 0, width: 1920, height: 1080, primary: true };
        let request = |title: &str| LaunchRequest {
            title: title.into(),
            working_dir: "/p".into(),
            rect: Rect::default(),
            command: "claude".into(),
            label: "cc".into(),
        };
        let groups = vec![MonitorGroup { monitor, requests: vec![request("cc-1-1"), request("cc-1-2")] }];
        let outcomes = vec![
            LaunchOutcome { title: "cc-1-1".into(), error: None },
            LaunchOutcome {
                title: "cc-1-2".into(),
                error: Some(LaunchError::NotFound { title: "cc-1-2".into(), attempts: 40 }),
            },
        ];

        let mut c = plain();
        c.launch_report(&groups, &outcomes).unwrap();
        let out = text(c);
        assert!(out.contains("Monitor 1"));
        assert!(out.contains("Primary"));
        assert!(out.contains("cc-1-1  ✓"));
        assert!(out.contains("cc-1-2  ✗"));
        assert!(out.contains("▪ cc-1-2: "));
        assert!(out.trim_end().ends_with("Ready"));
    }

    #[test]
    fn command_hint_is_indented_and_spaced() {
        let mut c = plain();
        c.note("To authenticate this profile, run:").unwrap();
        c.command_hint("CLAUDE_CONFIG_DIR=/home/u/.claude-work claude auth").unwrap();
        assert_eq!(
            text(c),
            "   ▸ To authenticate this profile, run:\n   CLAUDE_CONFIG_DIR=/home/u/.claude-work claude auth\n\n"
        );
    }

    #[test]
    fn no_warnings_when_everything_placed() {
        let mut c = plain();
        c.launch_report(&[], &[LaunchOutcome { title: "a".into(), error: None }]).unwrap();
        let out = text(c);
        assert!(!out.contains(BULLET));
        assert!(out.contains("Ready"));
    }
}
