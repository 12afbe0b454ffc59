//! Onboard Probe: page-object E2E suite for the CommerceOS registration flow
//!
//! Drives a browser through registration, business details and the
//! dashboard for each product flavor, then asserts the expected
//! application tiles are shown.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                   ONBOARD PROBE Architecture                    │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ Suite      │    │ Journey    │    │ Screens    │            │
//! │   │ (launch,   │───►│ (flavor    │───►│ (locators, │            │
//! │   │  quit)     │    │  steps)    │    │  actions)  │            │
//! │   └────────────┘    └────────────┘    └─────┬──────┘            │
//! │                                             ▼                   │
//! │                     ┌──────────────────────────────────┐        │
//! │                     │ OnboardDriver: Chromium | Mock   │        │
//! │                     └──────────────────────────────────┘        │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

mod assertion;
#[cfg(feature = "browser")]
mod browser;
mod config;
mod driver;
mod flavor;
mod journey;
mod locator;
mod result;
mod screen;
mod session;
mod suite;
mod wait;

/// Screen objects of the onboarding flow
pub mod screens;

pub use assertion::{Assertion, AssertionResult};
#[cfg(feature = "browser")]
pub use browser::{ChromiumDriver, ChromiumLauncher};
pub use config::{
    BrowserSettings, SuiteConfig, BASE_URL_ENV, CHROMIUM_PATH_ENV, DEFAULT_BASE_URL,
};
pub use driver::{ElementHandle, MockDriver, OnboardDriver, FOCUS_SCRIPT};
pub use flavor::{BusinessData, Flavor, JourneyData};
pub use journey::{Checkpoint, Journey, JourneyStep, JourneyTrace};
pub use locator::{
    Locator, LocatorOptions, Selector, Strategy, DEFAULT_POLL_INTERVAL_MS, DEFAULT_TIMEOUT_MS,
};
pub use result::{ProbeError, ProbeResult};
pub use screen::{ScreenActions, Step, StepLog, StepRunner};
pub use session::{
    scripted_site, MockLauncher, ScenarioContext, Session, SessionLauncher,
};
pub use suite::{
    NoopObserver, ScenarioOutcome, ScenarioStatus, Suite, SuiteObserver, SuiteReport,
};
pub use wait::{wait_for_visible, wait_until_located, WaitOptions, DEFAULT_WAIT_TIMEOUT_MS};
