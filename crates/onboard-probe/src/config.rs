//! Suite configuration
//!
//! Layering, lowest to highest: built-in defaults, a YAML file, the
//! environment (`ONBOARD_BASE_URL`, `CHROMIUM_PATH`), then whatever the
//! caller sets on the struct afterwards (the CLI's flags).

use crate::flavor::{Flavor, JourneyData};
use crate::locator::LocatorOptions;
use crate::result::{ProbeError, ProbeResult};
use crate::wait::WaitOptions;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Staging registration entry point
pub const DEFAULT_BASE_URL: &str = "https://commerceos.staging.devpayever.com/registration/";

/// Environment variable overriding `base_url`
pub const BASE_URL_ENV: &str = "ONBOARD_BASE_URL";

/// Environment variable overriding `browser.chromium_path`
pub const CHROMIUM_PATH_ENV: &str = "CHROMIUM_PATH";

/// Browser launch settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
    /// Run without a visible window
    pub headless: bool,
    /// Explicit Chromium executable; auto-detected when unset
    pub chromium_path: Option<PathBuf>,
    /// Keep the Chromium sandbox enabled
    pub sandbox: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: true,
            chromium_path: None,
            sandbox: true,
            viewport_width: 1920,
            viewport_height: 1080,
        }
    }
}

/// Everything a suite run needs besides the scenario list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Registration base URL; flavor slugs are appended
    pub base_url: String,
    /// Orchestrator wait between screens
    pub wait_timeout_ms: u64,
    /// Auto-wait applied by every locator
    pub action_timeout_ms: u64,
    /// Poll interval for both waits
    pub poll_interval_ms: u64,
    /// Skip remaining scenarios after the first failure
    pub fail_fast: bool,
    /// Directory for failure screenshots
    pub artifacts_dir: Option<PathBuf>,
    /// Browser launch settings
    pub browser: BrowserSettings,
    /// Per-flavor input overrides
    pub journeys: BTreeMap<Flavor, JourneyData>,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            wait_timeout_ms: crate::wait::DEFAULT_WAIT_TIMEOUT_MS,
            action_timeout_ms: crate::locator::DEFAULT_TIMEOUT_MS,
            poll_interval_ms: crate::wait::DEFAULT_POLL_INTERVAL_MS,
            fail_fast: false,
            artifacts_dir: None,
            browser: BrowserSettings::default(),
            journeys: BTreeMap::new(),
        }
    }
}

impl SuiteConfig {
    /// Parse a YAML document; absent keys keep their defaults
    pub fn from_yaml(yaml: &str) -> ProbeResult<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Load a YAML file
    pub fn from_yaml_file(path: &Path) -> ProbeResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            ProbeError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_yaml(&text)
    }

    /// Apply environment overrides from the process environment
    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Apply environment overrides through `lookup`
    #[must_use]
    pub fn with_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.base_url = url;
        }
        if let Some(path) = lookup(CHROMIUM_PATH_ENV).filter(|v| !v.trim().is_empty()) {
            self.browser.chromium_path = Some(PathBuf::from(path));
        }
        self
    }

    /// Reject settings no run could succeed with
    pub fn validate(&self) -> ProbeResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(ProbeError::config("base_url must not be empty"));
        }
        if self.wait_timeout_ms == 0 {
            return Err(ProbeError::config("wait_timeout_ms must be positive"));
        }
        if self.action_timeout_ms == 0 {
            return Err(ProbeError::config("action_timeout_ms must be positive"));
        }
        if self.poll_interval_ms == 0 {
            return Err(ProbeError::config("poll_interval_ms must be positive"));
        }
        for (flavor, data) in &self.journeys {
            data.validate(*flavor)?;
        }
        Ok(())
    }

    /// Orchestrator wait window
    #[must_use]
    pub const fn wait_options(&self) -> WaitOptions {
        WaitOptions {
            timeout_ms: self.wait_timeout_ms,
            poll_interval_ms: self.poll_interval_ms,
        }
    }

    /// Locator auto-wait window
    #[must_use]
    pub const fn locator_options(&self) -> LocatorOptions {
        LocatorOptions {
            timeout: Duration::from_millis(self.action_timeout_ms),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
        }
    }

    /// Inputs for `flavor`, overridden or default
    #[must_use]
    pub fn journey_data(&self, flavor: Flavor) -> JourneyData {
        self.journeys
            .get(&flavor)
            .cloned()
            .unwrap_or_else(|| flavor.default_data())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = SuiteConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.wait_timeout_ms, 30_000);
        assert_eq!(config.action_timeout_ms, 5_000);
        assert!(config.browser.headless);
        assert!(config.browser.sandbox);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = SuiteConfig::from_yaml("fail_fast: true\nbrowser:\n  headless: false\n").unwrap();
        assert!(config.fail_fast);
        assert!(!config.browser.headless);
        assert_eq!(config.browser.viewport_width, 1920);
        assert_eq!(config.wait_timeout_ms, 30_000);
    }

    #[test]
    fn test_yaml_journey_override() {
        let yaml = r"
journeys:
  fashion:
    registration:
      first_name: Ada
      last_name: L
      email: ada@example.com
      password: pw
      confirm_password: pw
    business:
      name: Engines
      phone_number: '555'
    expected_tiles: [Shop]
";
        let config = SuiteConfig::from_yaml(yaml).unwrap();
        let data = config.journey_data(Flavor::Fashion);
        assert_eq!(data.registration.email, "ada@example.com");
        assert_eq!(data.tiles_for(Flavor::Fashion), vec!["Shop".to_string()]);
        assert_eq!(
            config.journey_data(Flavor::Santander),
            Flavor::Santander.default_data()
        );
    }

    #[test]
    fn test_unknown_flavor_key_rejected() {
        assert!(SuiteConfig::from_yaml("journeys:\n  retail: {}\n").is_err());
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url: https://local.test/registration/").unwrap();
        let config = SuiteConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(config.base_url, "https://local.test/registration/");
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = SuiteConfig::from_yaml_file(Path::new("/nonexistent/suite.yaml")).unwrap_err();
        assert!(matches!(err, ProbeError::Config { .. }));
    }

    #[test]
    fn test_env_overrides() {
        let config = SuiteConfig::default().with_env_from(|key| match key {
            BASE_URL_ENV => Some("https://env.test/".to_string()),
            CHROMIUM_PATH_ENV => Some("/opt/chromium".to_string()),
            _ => None,
        });
        assert_eq!(config.base_url, "https://env.test/");
        assert_eq!(
            config.browser.chromium_path,
            Some(PathBuf::from("/opt/chromium"))
        );
    }

    #[test]
    fn test_blank_env_ignored() {
        let config = SuiteConfig::default().with_env_from(|_| Some("  ".to_string()));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.browser.chromium_path.is_none());
    }

    #[test]
    fn test_validate_rejects_zero_timeouts() {
        let config = SuiteConfig {
            wait_timeout_ms: 0,
            ..SuiteConfig::default()
        };
        assert!(config.validate().is_err());
        let config = SuiteConfig {
            action_timeout_ms: 0,
            ..SuiteConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_url() {
        let config = SuiteConfig {
            base_url: String::new(),
            ..SuiteConfig::default()
        };
        assert!(matches!(config.validate(), Err(ProbeError::Config { .. })));
    }

    #[test]
    fn test_options_derived() {
        let config = SuiteConfig {
            wait_timeout_ms: 1_000,
            action_timeout_ms: 200,
            poll_interval_ms: 10,
            ..SuiteConfig::default()
        };
        assert_eq!(config.wait_options().timeout_ms, 1_000);
        assert_eq!(config.locator_options().timeout, Duration::from_millis(200));
        assert_eq!(config.locator_options().poll_interval, Duration::from_millis(10));
    }
}
