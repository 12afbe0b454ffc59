//! Suite execution
//!
//! One browser session serves every scenario: the suite launches it once,
//! runs the journeys in order over the same screens, and quits it exactly
//! once at the end, also when a scenario failed. A failed scenario gets a
//! screenshot when an artifacts directory is configured.

use crate::config::SuiteConfig;
use crate::flavor::Flavor;
use crate::journey::{Journey, JourneyTrace};
use crate::result::ProbeResult;
use crate::session::{Session, SessionLauncher};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;
use uuid::Uuid;

/// Outcome of one scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioStatus {
    /// Every step and assertion held
    Passed,
    /// A step or assertion failed
    Failed,
    /// Never started (launch failure or fail-fast)
    Skipped,
}

/// Result of running a single scenario
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    /// Scenario name
    pub name: String,
    /// Flavor walked
    pub flavor: Flavor,
    /// Final status
    pub status: ScenarioStatus,
    /// Error message if failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Machine-readable error kind if failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
    /// Wall time in milliseconds
    pub duration_ms: u64,
    /// Steps finished before the end or the failure
    pub completed_steps: Vec<String>,
    /// Failure screenshot, when one was written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<PathBuf>,
}

impl ScenarioOutcome {
    fn skipped(flavor: Flavor) -> Self {
        Self {
            name: flavor.scenario_name().to_string(),
            flavor,
            status: ScenarioStatus::Skipped,
            error: None,
            error_kind: None,
            duration_ms: 0,
            completed_steps: Vec::new(),
            screenshot: None,
        }
    }

    /// Whether the scenario passed
    #[must_use]
    pub fn passed(&self) -> bool {
        self.status == ScenarioStatus::Passed
    }
}

/// Results from running a suite
#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    /// Unique id of this run
    pub run_id: Uuid,
    /// Wall-clock start
    pub started_at: DateTime<Utc>,
    /// Base URL the run targeted
    pub base_url: String,
    /// One entry per requested scenario, in order
    pub scenarios: Vec<ScenarioOutcome>,
    /// Browser launch failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_error: Option<String>,
    /// Browser quit failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teardown_error: Option<String>,
    /// Total wall time in milliseconds
    pub duration_ms: u64,
}

impl SuiteReport {
    /// Every scenario passed and the session opened and closed cleanly
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.session_error.is_none()
            && self.teardown_error.is_none()
            && self.scenarios.iter().all(ScenarioOutcome::passed)
    }

    /// Count passed scenarios
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.count(ScenarioStatus::Passed)
    }

    /// Count failed scenarios
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.count(ScenarioStatus::Failed)
    }

    /// Count skipped scenarios
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.count(ScenarioStatus::Skipped)
    }

    /// Get failed scenarios
    #[must_use]
    pub fn failures(&self) -> Vec<&ScenarioOutcome> {
        self.scenarios
            .iter()
            .filter(|s| s.status == ScenarioStatus::Failed)
            .collect()
    }

    fn count(&self, status: ScenarioStatus) -> usize {
        self.scenarios.iter().filter(|s| s.status == status).count()
    }

    /// Pretty JSON rendering
    pub fn to_json(&self) -> ProbeResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Progress hooks called while a suite runs
pub trait SuiteObserver: Send + Sync {
    /// A scenario is about to start
    fn scenario_started(&self, _flavor: Flavor) {}

    /// A scenario finished or was skipped
    fn scenario_finished(&self, _outcome: &ScenarioOutcome) {}
}

/// Observer that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SuiteObserver for NoopObserver {}

/// Ordered scenarios sharing one browser session
#[derive(Debug, Clone)]
pub struct Suite {
    config: SuiteConfig,
    journeys: Vec<Journey>,
}

impl Suite {
    /// Validate `config` and plan a journey per flavor in `scenarios`.
    ///
    /// An empty `scenarios` selects every flavor. A repeated flavor runs
    /// once, at its first position.
    pub fn new(config: SuiteConfig, scenarios: &[Flavor]) -> ProbeResult<Self> {
        config.validate()?;
        let requested: &[Flavor] = if scenarios.is_empty() {
            &Flavor::ALL
        } else {
            scenarios
        };
        let mut seen = HashSet::new();
        let journeys = requested
            .iter()
            .filter(|f| seen.insert(**f))
            .map(|f| Journey::new(*f, &config.base_url, config.journey_data(*f)))
            .collect::<ProbeResult<Vec<_>>>()?;
        Ok(Self { config, journeys })
    }

    /// Configuration in effect
    #[must_use]
    pub const fn config(&self) -> &SuiteConfig {
        &self.config
    }

    /// Planned journeys, in run order
    #[must_use]
    pub fn journeys(&self) -> &[Journey] {
        &self.journeys
    }

    /// Run every scenario without progress hooks
    pub async fn run(&self, launcher: &dyn SessionLauncher) -> SuiteReport {
        self.run_observed(launcher, &NoopObserver).await
    }

    /// Run every scenario, reporting progress to `observer`
    pub async fn run_observed(
        &self,
        launcher: &dyn SessionLauncher,
        observer: &dyn SuiteObserver,
    ) -> SuiteReport {
        let start = Instant::now();
        let mut report = SuiteReport {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            base_url: self.config.base_url.clone(),
            scenarios: Vec::with_capacity(self.journeys.len()),
            session_error: None,
            teardown_error: None,
            duration_ms: 0,
        };

        let session = match Session::open(launcher, self.config.locator_options()).await {
            Ok(session) => session,
            Err(e) => {
                tracing::error!(error = %e, "browser launch failed");
                report.session_error = Some(e.to_string());
                for journey in &self.journeys {
                    let outcome = ScenarioOutcome::skipped(journey.flavor());
                    observer.scenario_finished(&outcome);
                    report.scenarios.push(outcome);
                }
                report.duration_ms = elapsed_ms(start);
                return report;
            }
        };

        let ctx = session.context(self.config.wait_options());
        let mut halted = false;
        for journey in &self.journeys {
            if halted {
                let outcome = ScenarioOutcome::skipped(journey.flavor());
                observer.scenario_finished(&outcome);
                report.scenarios.push(outcome);
                continue;
            }

            observer.scenario_started(journey.flavor());
            let scenario_start = Instant::now();
            let mut trace = JourneyTrace::default();
            let result = journey.run(&ctx, &mut trace).await;
            let mut outcome = ScenarioOutcome {
                name: journey.flavor().scenario_name().to_string(),
                flavor: journey.flavor(),
                status: ScenarioStatus::Passed,
                error: None,
                error_kind: None,
                duration_ms: elapsed_ms(scenario_start),
                completed_steps: trace.completed,
                screenshot: None,
            };

            if let Err(e) = result {
                tracing::warn!(scenario = %outcome.name, error = %e, "scenario failed");
                outcome.status = ScenarioStatus::Failed;
                outcome.error_kind = Some(e.kind().to_string());
                outcome.error = Some(e.to_string());
                if let Some(dir) = &self.config.artifacts_dir {
                    outcome.screenshot =
                        capture_failure(&session, dir, report.run_id, journey.flavor()).await;
                }
                halted = self.config.fail_fast;
            }

            observer.scenario_finished(&outcome);
            report.scenarios.push(outcome);
        }

        if let Err(e) = session.quit().await {
            tracing::error!(error = %e, "browser quit failed");
            report.teardown_error = Some(e.to_string());
        }
        report.duration_ms = elapsed_ms(start);
        report
    }
}

/// Best effort: a failed capture is logged and never replaces the
/// scenario's own error.
async fn capture_failure(
    session: &Session,
    dir: &Path,
    run_id: Uuid,
    flavor: Flavor,
) -> Option<PathBuf> {
    let path = dir.join(format!("{run_id}-{}.png", flavor.slug()));
    match write_screenshot(session, dir, &path).await {
        Ok(()) => {
            tracing::info!(path = %path.display(), "failure screenshot saved");
            Some(path)
        }
        Err(e) => {
            tracing::warn!(error = %e, "failure screenshot not captured");
            None
        }
    }
}

async fn write_screenshot(session: &Session, dir: &Path, path: &Path) -> ProbeResult<()> {
    let png = session.driver().screenshot().await?;
    tokio::fs::create_dir_all(dir).await?;
    tokio::fs::write(path, png).await?;
    Ok(())
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
