//! Locator abstraction for element selection.
//!
//! A locator pairs a semantic name with a selector expression and a strategy
//! tag. Locators are plain data: nothing is resolved until an action runs,
//! so a screen can declare its locators before the page exists.
//!
//! Locators auto-wait: actions poll for a match up to the locator's timeout
//! before failing with `ElementNotFound`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Default timeout for auto-waiting (5 seconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Default polling interval for auto-waiting (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Selector expression understood by the driver
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selector {
    /// CSS selector (e.g., "button.signup-button")
    Css(String),
    /// XPath selector
    XPath(String),
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create an XPath selector
    #[must_use]
    pub fn xpath(selector: impl Into<String>) -> Self {
        Self::XPath(selector.into())
    }

    /// XPath matching `tag` elements whose own text contains `text`
    #[must_use]
    pub fn text_within(tag: &str, text: &str) -> Self {
        Self::XPath(format!("//{tag}[contains(text(), {})]", xpath_literal(text)))
    }

    /// Raw expression without the strategy prefix
    #[must_use]
    pub fn expression(&self) -> &str {
        match self {
            Self::Css(s) | Self::XPath(s) => s,
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(s) => write!(f, "css={s}"),
            Self::XPath(s) => write!(f, "xpath={s}"),
        }
    }
}

/// Quote a string as an XPath 1.0 literal.
///
/// XPath 1.0 has no escape syntax, so text holding both quote kinds is
/// spliced together with `concat()`.
fn xpath_literal(text: &str) -> String {
    if !text.contains('\'') {
        format!("'{text}'")
    } else if !text.contains('"') {
        format!("\"{text}\"")
    } else {
        let parts: Vec<String> = text.split('\'').map(|p| format!("'{p}'")).collect();
        format!("concat({})", parts.join(", \"'\", "))
    }
}

/// How a locator finds its element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Attribute match (`input[formcontrolname="email"]`)
    Attribute,
    /// Structural match (classes, ids, element position)
    Structural,
    /// Visible text content match
    TextContent,
}

/// Locator options for customizing auto-wait behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocatorOptions {
    /// Timeout for auto-waiting
    pub timeout: Duration,
    /// Polling interval for auto-waiting
    pub poll_interval: Duration,
}

impl Default for LocatorOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

/// A named, lazily-resolved element query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    name: String,
    selector: Selector,
    strategy: Strategy,
    options: LocatorOptions,
}

impl Locator {
    /// Attribute-matching CSS locator
    #[must_use]
    pub fn attribute(name: impl Into<String>, css: impl Into<String>) -> Self {
        Self::with_strategy(name, Selector::css(css), Strategy::Attribute)
    }

    /// Structural CSS locator (classes, ids)
    #[must_use]
    pub fn structural(name: impl Into<String>, css: impl Into<String>) -> Self {
        Self::with_strategy(name, Selector::css(css), Strategy::Structural)
    }

    /// Text-content locator over `tag` elements
    #[must_use]
    pub fn text(name: impl Into<String>, tag: &str, text: &str) -> Self {
        Self::with_strategy(name, Selector::text_within(tag, text), Strategy::TextContent)
    }

    /// Create a locator from explicit parts
    #[must_use]
    pub fn with_strategy(name: impl Into<String>, selector: Selector, strategy: Strategy) -> Self {
        Self {
            name: name.into(),
            selector,
            strategy,
            options: LocatorOptions::default(),
        }
    }

    /// Set a custom auto-wait timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = timeout;
        self
    }

    /// Set a custom polling interval
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.options.poll_interval = interval;
        self
    }

    /// Replace all auto-wait options
    #[must_use]
    pub const fn with_options(mut self, options: LocatorOptions) -> Self {
        self.options = options;
        self
    }

    /// Semantic name ("first name input")
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the selector
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Get the strategy tag
    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Get the options
    #[must_use]
    pub const fn options(&self) -> &LocatorOptions {
        &self.options
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.selector)
    }
}
