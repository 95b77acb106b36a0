use std::collections::BTreeSet;
use std::fs;
use std::io::{self, Stdout};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use quickstart_core::config::{validate_command, Config};
use quickstart_core::error::ConfigError;
use quickstart_core::monitor;
use quickstart_core::orchestrator::{build_requests, launch_all};
use quickstart_core::platform::Platform;
use quickstart_core::script::build_picker;
use quickstart_core::settings::LaunchSettings;
use quickstart_core::types::{LaunchRequest, Monitor};
use quickstart_core::logger;
use quickstart_tui::Console;

/// Everything a command needs, resolved once in `main`.
pub struct Ctx {
    pub config_path: PathBuf,
    pub platform: Box<dyn Platform>,
    pub console: Console<Stdout>,
    /// Picker label and tool command, from the executable name
    pub label: &'static str,
    pub command: &'static str,
}

impl Ctx {
    /// Saved config, or a fresh one when none exists yet.
    pub fn config_or_default(&self) -> Result<Config> {
        Config::load_or_default(&self.config_path)
            .with_context(|| format!("failed to load config {}", self.config_path.display()))
    }

    fn detect(&self) -> Result<Vec<Monitor>> {
        monitor::detect(self.platform.as_ref()).context("failed to detect monitors")
    }
}

pub(crate) fn read_line() -> io::Result<String> {
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// `qk` with no subcommand: project picker in this terminal, no chrome.
pub fn pick(ctx: &mut Ctx) -> Result<()> {
    let cfg = ctx.config_or_default()?;
    let script = build_picker(&cfg.projects_root, ctx.command, ctx.label, &cfg.profiles);
    ctx.platform.run_script(&script)?;
    Ok(())
}

/// Interactive setup, save, then launch.
pub fn all(ctx: &mut Ctx) -> Result<()> {
    let cfg = ctx.config_or_default()?;
    let monitors = ctx.detect()?;

    ctx.console.logo("")?;
    ctx.console.sep()?;
    ctx.console.head(&format!("Detected {} monitors", monitors.len()))?;
    ctx.console.newline()?;
    ctx.console.monitor_panels(&monitors)?;

    if monitors.is_empty() {
        ctx.console.warn("No monitors to place windows on")?;
        return Ok(());
    }

    let Some(cfg) = quickstart_tui::run_setup(monitors.clone(), cfg)? else {
        ctx.console.newline()?;
        ctx.console.note("Cancelled")?;
        return Ok(());
    };

    // Missing tools are reported, never fatal
    let tools: BTreeSet<&str> = cfg.monitors.iter().flat_map(|m| m.windows.iter().map(|w| w.tool.as_str())).collect();
    ctx.console.newline()?;
    for tool in tools {
        if let Err(msg) = validate_command(tool) {
            logger::warn(&msg);
            ctx.console.warn(&msg)?;
        }
    }

    if let Err(e) = cfg.save(&ctx.config_path) {
        logger::warn(&format!("save failed: {}", e));
        ctx.console.warn(&format!("Could not save config: {}", e))?;
    }

    run_launch(ctx, cfg, &monitors)
}

/// Launch straight from the saved config.
pub fn launch(ctx: &mut Ctx) -> Result<()> {
    let cfg = match Config::load(&ctx.config_path) {
        Err(ConfigError::NotFound(path)) => {
            anyhow::bail!("no saved layout at {}, run `qk all` first", path.display())
        }
        other => other.context("failed to load config")?,
    };
    let monitors = ctx.detect()?;
    if monitors.is_empty() {
        anyhow::bail!("no monitors detected");
    }
    run_launch(ctx, cfg, &monitors)
}

fn run_launch(ctx: &mut Ctx, mut cfg: Config, monitors: &[Monitor]) -> Result<()> {
    cfg.fit_to_monitors(monitors.len());
    let groups = build_requests(&cfg, monitors);
    let requests: Vec<LaunchRequest> = groups.iter().flat_map(|g| g.requests.iter().cloned()).collect();

    ctx.console.sep()?;
    match requests.len() {
        0 => ctx.console.head("Nothing to launch")?,
        1 => ctx.console.head("Using current terminal")?,
        n => ctx.console.head(&format!("Launching {} new terminals (using current for first)", n - 1))?,
    }
    ctx.console.newline()?;

    let launch = launch_all(ctx.platform.as_ref(), &requests, &cfg.profiles, &LaunchSettings::default());
    ctx.console.launch_report(&groups, &launch.outcomes)?;

    launch.picker.run().context("project picker failed")?;
    Ok(())
}

pub fn monitors(ctx: &mut Ctx, json: bool) -> Result<()> {
    let monitors = ctx.detect()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&monitors)?);
        return Ok(());
    }

    ctx.console.head(&format!("Detected {} monitors", monitors.len()))?;
    ctx.console.newline()?;
    ctx.console.monitor_panels(&monitors)?;
    if let Some(p) = monitor::primary(&monitors) {
        ctx.console.note(&format!("primary: {} at ({}, {})", p.name, p.x, p.y))?;
    }
    ctx.console.newline()?;
    Ok(())
}

/// Prompt for the projects root, offering to create it, and save.
pub fn set(ctx: &mut Ctx) -> Result<()> {
    let mut cfg = ctx.config_or_default()?;

    ctx.console.prompt("Projects root", &cfg.projects_root)?;
    let input = read_line()?;
    if !input.is_empty() {
        cfg.projects_root = input;
    }

    let root = Path::new(&cfg.projects_root);
    if !root.exists() {
        ctx.console.prompt(&format!("Directory '{}' does not exist. Create it?", root.display()), "Y/n")?;
        let answer = read_line()?.to_lowercase();
        if answer.is_empty() || answer == "y" || answer == "yes" {
            fs::create_dir_all(root).with_context(|| format!("failed to create {}", root.display()))?;
            ctx.console.ok("Created")?;
        }
    }

    cfg.save(&ctx.config_path).context("failed to save config")?;
    ctx.console.newline()?;
    ctx.console.ok(&format!("Saved to {}", ctx.config_path.display()))?;
    ctx.console.note("Run `qk all` to launch")?;
    ctx.console.newline()?;
    Ok(())
}

/// New tab in the current terminal window, running the picker.
pub fn tab(ctx: &mut Ctx) -> Result<()> {
    let cfg = ctx.config_or_default()?;
    ctx.console.head("Opening new tab...")?;
    ctx.console.newline()?;
    let script = build_picker(&cfg.projects_root, ctx.command, ctx.label, &cfg.profiles);
    ctx.platform.open_tab(&cfg.projects_root, &script)?;
    Ok(())
}

pub fn version(ctx: &mut Ctx) -> Result<()> {
    ctx.console.newline()?;
    ctx.console.ok(&format!("{} v{}  quickstart terminal launcher", ctx.label, env!("CARGO_PKG_VERSION")))?;
    ctx.console.newline()?;
    Ok(())
}
