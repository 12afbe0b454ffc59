//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use onboard_probe::Flavor;
use std::path::PathBuf;

/// onboard-probe: browser journeys through registration and onboarding
#[derive(Parser, Debug)]
#[command(name = "onboard-probe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run onboarding journeys in one browser session
    Run(RunArgs),

    /// List scenarios and their planned steps
    List(ListArgs),
}

/// Arguments for the run command
#[derive(Parser, Debug, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct RunArgs {
    /// Scenario to run (repeatable; default: all)
    #[arg(short, long = "scenario", value_enum)]
    pub scenarios: Vec<ScenarioArg>,

    /// YAML suite configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Registration base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Show the browser window
    #[arg(long)]
    pub headed: bool,

    /// Chromium executable
    #[arg(long)]
    pub chromium_path: Option<PathBuf>,

    /// Disable the Chromium sandbox (containers)
    #[arg(long)]
    pub no_sandbox: bool,

    /// Wait between screens in milliseconds
    #[arg(long)]
    pub wait_timeout_ms: Option<u64>,

    /// Per-element auto-wait in milliseconds
    #[arg(long)]
    pub action_timeout_ms: Option<u64>,

    /// Skip remaining scenarios after the first failure
    #[arg(long)]
    pub fail_fast: bool,

    /// Directory for failure screenshots
    #[arg(long)]
    pub artifacts: Option<PathBuf>,

    /// Write the JSON report to this file
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Run against the built-in simulated site instead of Chromium
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the list command
#[derive(Parser, Debug, Default)]
pub struct ListArgs {
    /// Scenario to list (repeatable; default: all)
    #[arg(short, long = "scenario", value_enum)]
    pub scenarios: Vec<ScenarioArg>,

    /// YAML suite configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print each scenario's steps
    #[arg(long)]
    pub steps: bool,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: ListFormat,
}

/// Scenario selector
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScenarioArg {
    /// Generic fashion flow
    Fashion,
    /// Partner-branded santander flow
    Santander,
}

impl From<ScenarioArg> for Flavor {
    fn from(arg: ScenarioArg) -> Self {
        match arg {
            ScenarioArg::Fashion => Self::Fashion,
            ScenarioArg::Santander => Self::Santander,
        }
    }
}

/// Output format for `list`
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ListFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON
    Json,
}

/// Color argument
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
