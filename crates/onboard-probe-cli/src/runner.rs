//! Suite runner: config layering, launcher choice and reporting

use crate::commands::{ListArgs, ListFormat, RunArgs, ScenarioArg};
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::ProgressReporter;
use onboard_probe::{Flavor, MockLauncher, SessionLauncher, Suite, SuiteConfig, SuiteReport};
use serde::Serialize;
use std::path::Path;
use std::time::Duration;

fn flavors(args: &[ScenarioArg]) -> Vec<Flavor> {
    args.iter().copied().map(Flavor::from).collect()
}

fn load_file(path: Option<&Path>) -> CliResult<SuiteConfig> {
    match path {
        Some(path) => Ok(SuiteConfig::from_yaml_file(path)?),
        None => Ok(SuiteConfig::default()),
    }
}

/// Defaults, then the YAML file, then the environment, then flags
pub fn resolve_suite_config(args: &RunArgs) -> CliResult<SuiteConfig> {
    let mut config = load_file(args.config.as_deref())?.with_env();

    if let Some(ref url) = args.base_url {
        config.base_url.clone_from(url);
    }
    if args.headed {
        config.browser.headless = false;
    }
    if let Some(ref path) = args.chromium_path {
        config.browser.chromium_path = Some(path.clone());
    }
    if args.no_sandbox {
        config.browser.sandbox = false;
    }
    if let Some(ms) = args.wait_timeout_ms {
        config.wait_timeout_ms = ms;
    }
    if let Some(ms) = args.action_timeout_ms {
        config.action_timeout_ms = ms;
    }
    if args.fail_fast {
        config.fail_fast = true;
    }
    if let Some(ref dir) = args.artifacts {
        config.artifacts_dir = Some(dir.clone());
    }

    config.validate()?;
    Ok(config)
}

#[cfg(feature = "browser")]
fn browser_launcher(config: &SuiteConfig) -> CliResult<Box<dyn SessionLauncher>> {
    Ok(Box::new(onboard_probe::ChromiumLauncher::new(
        config.browser.clone(),
    )))
}

#[cfg(not(feature = "browser"))]
fn browser_launcher(_config: &SuiteConfig) -> CliResult<Box<dyn SessionLauncher>> {
    Err(CliError::config(
        "browser support not compiled in; rebuild with --features browser or pass --dry-run",
    ))
}

/// Run the selected scenarios; `Err(TestExecution)` unless all passed
pub async fn run_suite(cli: &CliConfig, args: &RunArgs) -> CliResult<SuiteReport> {
    let config = resolve_suite_config(args)?;
    let suite = Suite::new(config, &flavors(&args.scenarios))?;
    let launcher: Box<dyn SessionLauncher> = if args.dry_run {
        Box::new(MockLauncher::scripted(suite.config()))
    } else {
        browser_launcher(suite.config())?
    };

    let mut reporter = ProgressReporter::new(cli.color.should_color(), cli.verbosity.is_quiet());
    reporter.header(&format!("Onboarding journeys ({})", suite.config().base_url));
    if args.dry_run {
        reporter.info("dry run against the simulated site");
    }
    reporter.start_progress(suite.journeys().len() as u64, "starting");

    let report = suite.run_observed(launcher.as_ref(), &reporter).await;
    reporter.finish();

    if let Some(ref message) = report.session_error {
        reporter.failure(&format!("browser session: {message}"));
    }
    if let Some(ref message) = report.teardown_error {
        reporter.failure(&format!("browser quit: {message}"));
    }
    reporter.summary(
        report.passed_count(),
        report.failed_count(),
        report.skipped_count(),
        Duration::from_millis(report.duration_ms),
    );

    if let Some(ref path) = args.report {
        write_report(&report, path)?;
        reporter.info(&format!("report written to {}", path.display()));
    }

    if report.all_passed() {
        Ok(report)
    } else if let Some(ref message) = report.session_error {
        Err(CliError::test_execution(format!("browser launch failed: {message}")))
    } else {
        Err(CliError::test_execution(format!(
            "{} of {} scenarios did not pass",
            report.scenarios.len() - report.passed_count(),
            report.scenarios.len()
        )))
    }
}

/// Write `report` as pretty JSON
pub fn write_report(report: &SuiteReport, path: &Path) -> CliResult<()> {
    let json = report
        .to_json()
        .map_err(|e| CliError::report_generation(e.to_string()))?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct ScenarioListing {
    name: &'static str,
    flavor: Flavor,
    url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    steps: Option<Vec<String>>,
}

/// Render the planned scenarios
pub fn list_scenarios(args: &ListArgs) -> CliResult<String> {
    let config = load_file(args.config.as_deref())?.with_env();
    let suite = Suite::new(config, &flavors(&args.scenarios))?;

    let listings = suite
        .journeys()
        .iter()
        .map(|journey| -> CliResult<ScenarioListing> {
            let steps = if args.steps {
                Some(journey.plan()?.iter().map(ToString::to_string).collect())
            } else {
                None
            };
            Ok(ScenarioListing {
                name: journey.flavor().scenario_name(),
                flavor: journey.flavor(),
                url: journey.url().to_string(),
                steps,
            })
        })
        .collect::<CliResult<Vec<_>>>()?;

    match args.format {
        ListFormat::Json => serde_json::to_string_pretty(&listings)
            .map_err(|e| CliError::report_generation(e.to_string())),
        ListFormat::Text => {
            let mut out = String::new();
            for listing in &listings {
                out.push_str(&format!("{}  {}\n", listing.name, listing.url));
                for (i, step) in listing.steps.iter().flatten().enumerate() {
                    out.push_str(&format!("  {:>2}. {step}\n", i + 1));
                }
            }
            Ok(out)
        }
    }
}
