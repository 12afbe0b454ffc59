//! Base screen behavior.
//!
//! `ScreenActions` is the capability every screen object composes: a screen
//! supplies its driver, its submit locator and its ready locator, and gets
//! focus/click/type/submit for free. Composite operations are expressed as an
//! explicit `Vec<Step>` run by [`StepRunner`], so their ordering is data that
//! tests can inspect.

use crate::driver::{ElementHandle, OnboardDriver, FOCUS_SCRIPT};
use crate::locator::Locator;
use crate::result::{ProbeError, ProbeResult};
use crate::wait::{wait_until_located, WaitOptions};
use async_trait::async_trait;
use std::fmt;

/// Shared primitive actions for every screen object.
#[async_trait]
pub trait ScreenActions: Send + Sync {
    /// Driver this screen acts through
    fn driver(&self) -> &dyn OnboardDriver;

    /// The single submit affordance of this screen
    fn submit_locator(&self) -> &Locator;

    /// Locator whose presence means the screen is shown
    fn ready_locator(&self) -> &Locator;

    /// Screen name for logging
    fn screen_name(&self) -> &'static str;

    /// Auto-wait for `locator` and return its first match.
    async fn resolve(&self, locator: &Locator) -> ProbeResult<ElementHandle> {
        let options = WaitOptions::for_locator(locator);
        let found = wait_until_located(self.driver(), locator.selector(), options)
            .await
            .map_err(|e| match e {
                ProbeError::Timeout { ms, .. } => ProbeError::ElementNotFound {
                    locator: locator.to_string(),
                    timeout_ms: ms,
                },
                other => other,
            })?;
        found
            .into_iter()
            .next()
            .ok_or_else(|| ProbeError::ElementNotFound {
                locator: locator.to_string(),
                timeout_ms: options.timeout_ms,
            })
    }

    /// Move browser focus onto the element
    async fn focus(&self, locator: &Locator) -> ProbeResult<()> {
        tracing::debug!(screen = self.screen_name(), locator = %locator, "focus");
        let element = self.resolve(locator).await?;
        let _ = self.driver().execute_script(FOCUS_SCRIPT, &element).await?;
        Ok(())
    }

    /// Click the element
    async fn click(&self, locator: &Locator) -> ProbeResult<()> {
        tracing::debug!(screen = self.screen_name(), locator = %locator, "click");
        let element = self.resolve(locator).await?;
        self.driver()
            .click(&element)
            .await
            .map_err(|e| name_locator(e, locator))
    }

    /// Focus the element, then send `text` as key input
    async fn type_text(&self, locator: &Locator, text: &str) -> ProbeResult<()> {
        self.focus(locator).await?;
        tracing::debug!(
            screen = self.screen_name(),
            locator = %locator,
            chars = text.chars().count(),
            "type"
        );
        let element = self.resolve(locator).await?;
        self.driver()
            .send_keys(&element, text)
            .await
            .map_err(|e| name_locator(e, locator))
    }

    /// Click this screen's submit control
    async fn submit(&self) -> ProbeResult<()> {
        self.click(self.submit_locator()).await
    }

    /// Run `steps` in order against this screen
    async fn run_steps(&self, steps: &[Step]) -> ProbeResult<StepLog> {
        StepRunner::new().run(self, steps).await
    }
}

// Drivers only know their own handle ids.
fn name_locator(error: ProbeError, locator: &Locator) -> ProbeError {
    match error {
        ProbeError::ElementNotInteractable { message, .. } => ProbeError::ElementNotInteractable {
            locator: locator.to_string(),
            message,
        },
        other => other,
    }
}

/// One primitive screen action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Focus an element
    Focus(Locator),
    /// Click an element
    Click(Locator),
    /// Focus an element and type into it
    Type {
        /// Target element
        locator: Locator,
        /// Literal text
        text: String,
    },
    /// Click the screen's submit control
    Submit,
}

impl Step {
    /// Build a typing step
    #[must_use]
    pub fn type_into(locator: &Locator, text: impl Into<String>) -> Self {
        Self::Type {
            locator: locator.clone(),
            text: text.into(),
        }
    }

    /// Target locator, if the step has one
    #[must_use]
    pub const fn locator(&self) -> Option<&Locator> {
        match self {
            Self::Focus(l) | Self::Click(l) | Self::Type { locator: l, .. } => Some(l),
            Self::Submit => None,
        }
    }
}

// Typed text is left out on purpose: steps carry passwords.
impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Focus(l) => write!(f, "focus {}", l.name()),
            Self::Click(l) => write!(f, "click {}", l.name()),
            Self::Type { locator, text } => {
                write!(f, "type {} ({} chars)", locator.name(), text.chars().count())
            }
            Self::Submit => write!(f, "submit"),
        }
    }
}

/// Steps completed by a [`StepRunner`], in execution order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepLog {
    /// Descriptions of completed steps
    pub completed: Vec<String>,
}

impl StepLog {
    /// Number of completed steps
    #[must_use]
    pub fn len(&self) -> usize {
        self.completed.len()
    }

    /// True when no step ran
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.completed.is_empty()
    }
}

/// Sequential step executor.
///
/// Each step starts only after the previous one resolved; the first error
/// stops the run.
#[derive(Debug, Default, Clone, Copy)]
pub struct StepRunner;

impl StepRunner {
    /// Create a runner
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Execute `steps` against `screen`
    pub async fn run<S>(&self, screen: &S, steps: &[Step]) -> ProbeResult<StepLog>
    where
        S: ScreenActions + ?Sized,
    {
        let mut log = StepLog::default();
        for step in steps {
            match step {
                Step::Focus(locator) => screen.focus(locator).await?,
                Step::Click(locator) => screen.click(locator).await?,
                Step::Type { locator, text } => screen.type_text(locator, text).await?,
                Step::Submit => screen.submit().await?,
            }
            log.completed.push(step.to_string());
        }
        Ok(log)
    }
}
