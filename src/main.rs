mod commands;
mod profiles;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use quickstart_core::config::{command_for, default_config_path, label_for};
use quickstart_core::logger;
use quickstart_core::platform::create_platform;
use quickstart_tui::Console;

use crate::commands::Ctx;

/// Quick project picker and multi-monitor terminal launcher.
#[derive(Parser)]
#[command(name = "qk", version)]
struct Cli {
    /// Config file (default ~/.quickstart/config.yaml)
    #[arg(long, global = true, env = "QK_CONFIG")]
    config: Option<PathBuf>,

    /// Use the in-memory platform instead of the OS backend
    #[arg(long, global = true)]
    stub: bool,

    /// Echo log lines to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Cmd>,
}

#[derive(Subcommand)]
enum Cmd {
    /// Configure windows per monitor, then launch them all
    All,
    /// Launch with the saved layout, no questions asked
    Launch,
    /// List detected monitors
    Monitors {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set the projects root
    Set,
    /// Manage account profiles
    Profiles {
        #[command(subcommand)]
        action: Option<ProfilesCmd>,
    },
    /// Open a new tab in the current terminal window
    Tab,
    /// Print version information
    Version,
}

#[derive(Subcommand)]
enum ProfilesCmd {
    /// List all profiles
    List,
    /// Add a profile; prompts for whatever is missing
    Add { name: Option<String>, config_dir: Option<String> },
    /// Remove a profile by name
    Remove { name: String },
}

/// Executable name without extension, e.g. `cc` for `cc.exe`.
fn bin_name(argv0: &str) -> String {
    Path::new(argv0)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn main() -> Result<()> {
    let bin = std::env::args().next().map(|a| bin_name(&a)).unwrap_or_default();
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(p) => p,
        None => default_config_path().context("cannot locate config file")?,
    };
    if let Some(dir) = config_path.parent() {
        logger::init(dir, cli.verbose);
    }
    logger::info(&format!("{} started, config {}", bin, config_path.display()));

    let mut ctx = Ctx {
        config_path,
        platform: create_platform(cli.stub),
        console: Console::stdout(cli.no_color),
        label: label_for(&bin),
        command: command_for(&bin),
    };

    match cli.command {
        None if bin == "all" => commands::all(&mut ctx),
        None => commands::pick(&mut ctx),
        Some(Cmd::All) => commands::all(&mut ctx),
        Some(Cmd::Launch) => commands::launch(&mut ctx),
        Some(Cmd::Monitors { json }) => commands::monitors(&mut ctx, json),
        Some(Cmd::Set) => commands::set(&mut ctx),
        Some(Cmd::Profiles { action }) => match action.unwrap_or(ProfilesCmd::List) {
            ProfilesCmd::List => profiles::list(&mut ctx),
            ProfilesCmd::Add { name, config_dir } => profiles::add(&mut ctx, name, config_dir),
            ProfilesCmd::Remove { name } => profiles::remove(&mut ctx, &name),
        },
        Some(Cmd::Tab) => commands::tab(&mut ctx),
        Some(Cmd::Version) => commands::version(&mut ctx),
    }
}
