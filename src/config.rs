//! Configuration management for the biffcfg tool.
//!
//! Handles:
//! - Command-line argument parsing
//! - Settings file discovery and loading

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::alias::DEFAULT_MAX_ITERATIONS;
use crate::model::ConfigKind;

/// Settings file name looked up in the working and user config directories
pub const SETTINGS_FILE: &str = "biff.toml";

/// Command-line arguments for biffcfg
#[derive(Debug, Parser)]
#[command(name = "biffcfg")]
#[command(about = "Validate and expand BIFF monitoring configuration files")]
#[command(version)]
pub struct Args {
    /// Settings file to use instead of the discovered one
    #[arg(long, global = true, help = "Path to a biff.toml settings file")]
    pub settings: Option<PathBuf>,

    /// Log level for diagnostics on stderr
    #[arg(
        long,
        global = true,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Validate a Minion, Oscar or Marvin configuration file
    Validate {
        config_file: PathBuf,

        #[arg(short = 't', long = "kind", value_enum, default_value_t = KindArg::Auto)]
        kind: KindArg,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Expand every $(NAME) reference in a configuration file
    Resolve {
        config_file: PathBuf,

        #[arg(long, help = "Maximum expansion passes (overrides settings)")]
        max_iterations: Option<usize>,

        #[arg(long, help = "Also resolve names from the process environment")]
        with_env: bool,
    },

    /// List alias definitions and undefined references
    Aliases { config_file: PathBuf },
}

/// Configuration kind as accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// Detect from the root element
    Auto,
    #[value(alias = "agent")]
    Minion,
    #[value(alias = "hub")]
    Oscar,
    #[value(alias = "dashboard")]
    Marvin,
}

impl KindArg {
    /// Explicit kind, or `None` for auto-detection
    pub fn kind(self) -> Option<ConfigKind> {
        match self {
            KindArg::Auto => None,
            KindArg::Minion => Some(ConfigKind::Agent),
            KindArg::Oscar => Some(ConfigKind::Hub),
            KindArg::Marvin => Some(ConfigKind::Dashboard),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Values read from `biff.toml`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Maximum alias expansion passes
    pub max_iterations: usize,
    /// Aliases available to every document; document aliases take precedence
    pub aliases: HashMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            aliases: HashMap::new(),
        }
    }
}

impl Settings {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("invalid settings")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("failed to parse settings file {}", path.display()))
    }
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    pub command: Command,
    pub settings: Settings,
    /// Settings file that was loaded, if any
    pub settings_path: Option<PathBuf>,
    pub log_level: String,
}

impl Config {
    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        let (settings, settings_path) =
            load_settings(args.settings, &default_settings_candidates())?;

        Ok(Config {
            command: args.command,
            settings,
            settings_path,
            log_level: args.log_level,
        })
    }
}

/// Resolve the settings to use.
///
/// An explicit path must load. Otherwise the first existing candidate is
/// tried; a discovered file that fails to load is skipped with a warning.
pub fn load_settings(
    explicit: Option<PathBuf>,
    candidates: &[PathBuf],
) -> Result<(Settings, Option<PathBuf>)> {
    if let Some(path) = explicit {
        log::debug!("loading settings from {}", path.display());
        let settings = Settings::load(&path)?;
        return Ok((settings, Some(path)));
    }

    let Some(path) = candidates.iter().find(|candidate| candidate.is_file()) else {
        return Ok((Settings::default(), None));
    };

    log::debug!("loading settings from {}", path.display());
    match Settings::load(path) {
        Ok(settings) => Ok((settings, Some(path.clone()))),
        Err(e) => {
            log::warn!("ignoring settings: {e:#}");
            Ok((Settings::default(), None))
        }
    }
}

/// Settings locations in priority order
pub fn default_settings_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(SETTINGS_FILE)];

    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join("biff").join(SETTINGS_FILE));
    }

    candidates
}
