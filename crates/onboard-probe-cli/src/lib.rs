//! onboard-probe CLI library
//!
//! Command-line front end for running the onboarding journeys against
//! Chromium or the built-in simulated site.

#![warn(missing_docs)]
#![allow(clippy::format_push_string)]

mod commands;
mod config;
mod error;
mod output;
mod runner;

pub use commands::{Cli, ColorArg, Commands, ListArgs, ListFormat, RunArgs, ScenarioArg};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::ProgressReporter;
pub use runner::{list_scenarios, resolve_suite_config, run_suite, write_report};
