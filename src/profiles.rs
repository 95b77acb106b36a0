use std::path::Path;

use anyhow::{bail, Context, Result};
use crossterm::style::Color;

use quickstart_core::config::{expand_path, Config, Profile};
use quickstart_core::error::ConfigError;

use crate::commands::{read_line, Ctx};

/// `~/.claude-<lowercase name>`
fn default_dir(name: &str) -> String {
    format!("~/.claude-{}", name.to_lowercase())
}

fn is_authenticated(config_dir: &str) -> bool {
    Path::new(&expand_path(config_dir)).join(".credentials.json").exists()
}

fn key_preview(key: &str) -> String {
    let head: String = key.chars().take(8).collect();
    format!("{}...", head)
}

/// Append a profile. Names are unique ignoring case.
fn add_profile(cfg: &mut Config, name: &str, config_dir: String) -> Result<()> {
    if cfg.find_profile(name).is_some() {
        bail!("profile \"{}\" already exists", name);
    }
    cfg.profiles.push(Profile { name: name.to_string(), config_dir, api_key: None });
    Ok(())
}

/// Remove a profile by name, ignoring case. The last profile stays.
fn remove_profile(cfg: &mut Config, name: &str) -> Result<Profile> {
    if cfg.profiles.len() <= 1 {
        bail!("cannot remove the last profile");
    }
    let Some(idx) = cfg.find_profile(name) else {
        bail!("profile \"{}\" not found", name);
    };
    Ok(cfg.profiles.remove(idx))
}

pub fn list(ctx: &mut Ctx) -> Result<()> {
    let cfg = match Config::load(&ctx.config_path) {
        Err(ConfigError::NotFound(_)) => {
            ctx.console.newline()?;
            ctx.console.note("No config found. Run `qk set` to initialize.")?;
            ctx.console.newline()?;
            return Ok(());
        }
        other => other.context("failed to load config")?,
    };

    if cfg.profiles.is_empty() {
        ctx.console.newline()?;
        ctx.console.note("No profiles configured.")?;
        ctx.console.newline()?;
        return Ok(());
    }

    ctx.console.head(&format!("{} profile(s)", cfg.profiles.len()))?;
    ctx.console.newline()?;

    let c = &mut ctx.console;
    for (i, p) in cfg.profiles.iter().enumerate() {
        let auth = if is_authenticated(&p.config_dir) {
            c.paint("✓ authenticated", Color::Green)
        } else {
            c.paint("✗ not authenticated", Color::Red)
        };

        c.box_start(&format!("{}. {}", i + 1, p.name), "")?;
        let row = format!("{}    {}", c.paint("Dir", Color::DarkGrey), c.paint(&p.config_dir, Color::Grey));
        c.box_row(&row)?;
        let row = format!("{}   {}", c.paint("Auth", Color::DarkGrey), auth);
        c.box_row(&row)?;
        if let Some(key) = p.api_key.as_deref().filter(|k| !k.is_empty()) {
            let row = format!("{}    {}", c.paint("API", Color::DarkGrey), c.paint(&key_preview(key), Color::Grey));
            c.box_row(&row)?;
        }
        c.box_end()?;
    }
    c.newline()?;
    Ok(())
}

pub fn add(ctx: &mut Ctx, name: Option<String>, config_dir: Option<String>) -> Result<()> {
    let mut cfg = ctx.config_or_default()?;

    let name = match name {
        Some(n) => n,
        None => {
            ctx.console.prompt("Profile name", "")?;
            let n = read_line()?;
            if n.is_empty() {
                bail!("profile name is required");
            }
            n
        }
    };
    if cfg.find_profile(&name).is_some() {
        bail!("profile \"{}\" already exists", name);
    }

    let config_dir = match config_dir {
        Some(d) => d,
        None => {
            let fallback = default_dir(&name);
            ctx.console.prompt("Config directory", &fallback)?;
            let d = read_line()?;
            if d.is_empty() { fallback } else { d }
        }
    };

    add_profile(&mut cfg, &name, config_dir.clone())?;
    cfg.save(&ctx.config_path).context("failed to save config")?;

    ctx.console.newline()?;
    ctx.console.ok(&format!("Profile \"{}\" added", name))?;
    ctx.console.note(&config_dir)?;

    if !is_authenticated(&config_dir) {
        ctx.console.newline()?;
        ctx.console.note("To authenticate this profile, run:")?;
        ctx.console
            .command_hint(&format!("CLAUDE_CONFIG_DIR={} claude auth", expand_path(&config_dir)))?;
    }
    Ok(())
}

pub fn remove(ctx: &mut Ctx, name: &str) -> Result<()> {
    let mut cfg = Config::load(&ctx.config_path).context("failed to load config")?;
    let removed = remove_profile(&mut cfg, name)?;
    cfg.save(&ctx.config_path).context("failed to save config")?;

    ctx.console.newline()?;
    ctx.console.ok(&format!("Profile \"{}\" removed", removed.name))?;
    ctx.console.newline()?;
    Ok(())
}
