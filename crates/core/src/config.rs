use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::layout::Layout;

pub const CURRENT_VERSION: u32 = 4;

pub const CLAUDE_COMMAND: &str = "claude --dangerously-skip-permissions";
pub const CODEX_COMMAND: &str = "codex --dangerously-bypass-approvals-and-sandbox";

/// Tools a window can run. The first one is the default.
pub const TOOLS: [&str; 2] = ["cc", "cx"];
pub const DEFAULT_TOOL: &str = "cc";

/// On-disk configuration, schema v4.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub version: u32,
    pub projects_root: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub profiles: Vec<Profile>,
    #[serde(default)]
    pub monitors: Vec<MonitorConfig>,
}

/// An account: its credential directory and optional API key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub config_dir: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// Per-monitor slot. Matched to detected monitors by position only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorConfig {
    #[serde(default = "default_layout")]
    pub layout: String,
    #[serde(default)]
    pub windows: Vec<WindowConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    pub tool: String,
}

fn default_layout() -> String {
    Layout::Full.name().into()
}

// v2: a window count per monitor and one global command
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigV2 {
    projects_root: String,
    #[serde(default)]
    monitors: Vec<MonitorConfigV2>,
}

#[derive(Deserialize)]
struct MonitorConfigV2 {
    #[serde(default)]
    windows: usize,
    #[serde(default = "default_layout")]
    layout: String,
}

#[derive(Deserialize)]
struct VersionProbe {
    #[serde(default)]
    version: u32,
}

impl Config {
    /// An empty v4 config rooted at `projects_root`.
    pub fn fresh(projects_root: impl Into<String>) -> Self {
        Config {
            version: CURRENT_VERSION,
            projects_root: projects_root.into(),
            profiles: Vec::new(),
            monitors: Vec::new(),
        }
    }

    /// Read and migrate the config at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::NotFound(path.to_path_buf()),
            _ => ConfigError::Io { path: path.to_path_buf(), source: e },
        })?;
        Self::parse(&raw)
    }

    /// Like `load`, but a missing file yields a fresh config.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::NotFound(_)) => Ok(Self::fresh(default_projects_root()?)),
            other => other,
        }
    }

    /// Parse YAML of any supported version, migrating to v4 in memory.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let probe: VersionProbe = serde_yaml::from_str(raw)?;
        match probe.version {
            2 => upgrade_to_v4(migrate_v2(raw)?),
            3 => upgrade_to_v4(serde_yaml::from_str(raw)?),
            CURRENT_VERSION => Ok(serde_yaml::from_str(raw)?),
            v => Err(ConfigError::UnsupportedVersion(v)),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io { path: path.to_path_buf(), source };
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(io_err)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml).map_err(io_err)
    }

    /// Account choice is only offered when more than one profile exists.
    pub fn has_profiles(&self) -> bool {
        self.profiles.len() > 1
    }

    /// Grow or trim the monitor slots to exactly `count` entries. New slots
    /// get one full-screen window of the default tool.
    pub fn fit_to_monitors(&mut self, count: usize) {
        self.monitors.resize_with(count, MonitorConfig::default);
    }

    pub fn find_profile(&self, name: &str) -> Option<usize> {
        self.profiles.iter().position(|p| p.name.eq_ignore_ascii_case(name))
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        MonitorConfig {
            layout: default_layout(),
            windows: vec![WindowConfig { tool: DEFAULT_TOOL.into() }],
        }
    }
}

impl MonitorConfig {
    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    /// Tool of window `idx`, or the default tool past the end.
    pub fn tool_for(&self, idx: usize) -> &str {
        self.windows.get(idx).map_or(DEFAULT_TOOL, |w| w.tool.as_str())
    }

    pub fn layout(&self) -> Layout {
        Layout::from_name(&self.layout)
    }

    /// Resize to `count` windows, keeping existing tools, and pick the
    /// automatic layout for the new count.
    pub fn set_window_count(&mut self, count: usize) {
        self.windows.resize_with(count, || WindowConfig { tool: DEFAULT_TOOL.into() });
        self.layout = Layout::auto(count).name().into();
    }
}

fn migrate_v2(raw: &str) -> Result<Config, ConfigError> {
    let v2: ConfigV2 = serde_yaml::from_str(raw)?;
    let monitors = v2
        .monitors
        .into_iter()
        .map(|m| MonitorConfig {
            layout: m.layout,
            windows: (0..m.windows).map(|_| WindowConfig { tool: DEFAULT_TOOL.into() }).collect(),
        })
        .collect();
    Ok(Config {
        version: 3,
        projects_root: v2.projects_root,
        profiles: Vec::new(),
        monitors,
    })
}

/// v3 -> v4: add a `Default` profile pointing at `~/.claude`.
fn upgrade_to_v4(mut cfg: Config) -> Result<Config, ConfigError> {
    if cfg.profiles.is_empty() {
        let home = dirs::home_dir().ok_or(ConfigError::NoHome)?;
        cfg.profiles.push(Profile {
            name: "Default".into(),
            config_dir: home.join(".claude").to_string_lossy().into_owned(),
            api_key: None,
        });
    }
    cfg.version = CURRENT_VERSION;
    Ok(cfg)
}

/// `~/.quickstart/config.yaml`
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::NoHome)?;
    Ok(home.join(".quickstart").join("config.yaml"))
}

/// `~/.1dev`
pub fn default_projects_root() -> Result<String, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::NoHome)?;
    Ok(home.join(".1dev").to_string_lossy().into_owned())
}

/// Expand a leading `~/` to the home directory. Anything else is unchanged.
pub fn expand_path(path: &str) -> String {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest).to_string_lossy().into_owned(),
        _ => path.to_string(),
    }
}

/// Command line a tool runs. `all` is the busybox name and maps to `cc`.
pub fn command_for(tool: &str) -> &'static str {
    match tool {
        "cx" => CODEX_COMMAND,
        _ => CLAUDE_COMMAND,
    }
}

/// Label shown for a binary name.
pub fn label_for(bin: &str) -> &'static str {
    match bin {
        "cx" => "cx",
        "all" => "all",
        _ => "cc",
    }
}

/// The other tool, for toggling.
pub fn next_tool(tool: &str) -> &'static str {
    let idx = TOOLS.iter().position(|t| *t == tool).map_or(0, |i| i + 1);
    TOOLS[idx % TOOLS.len()]
}

/// Check that the executable behind `tool` is on PATH.
pub fn validate_command(tool: &str) -> Result<(), String> {
    let program = command_for(tool).split_whitespace().next().unwrap_or_default();
    which::which(program)
        .map(|_| ())
        .map_err(|_| format!("'{}' not found on PATH ({} windows will fail to start it)", program, tool))
}
