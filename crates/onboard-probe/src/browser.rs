//! Chromium driver over CDP
//!
//! Launches a local Chromium through chromiumoxide and exposes a single
//! page as an [`OnboardDriver`]. Resolved elements live in a table keyed by
//! the selector that found them: each lookup replaces that selector's
//! entries, and navigating clears the table.

use crate::config::BrowserSettings;
use crate::driver::{ElementHandle, OnboardDriver};
use crate::locator::Selector;
use crate::result::{ProbeError, ProbeResult};
use crate::session::SessionLauncher;
use async_trait::async_trait;
use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
use chromiumoxide::cdp::browser_protocol::page::{CaptureScreenshotFormat, CaptureScreenshotParams};
use chromiumoxide::element::Element;
use chromiumoxide::error::CdpError;
use chromiumoxide::page::Page as CdpPage;
use futures::StreamExt;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Chrome's answer to fetching results of an XPath search with no hits
const EMPTY_SEARCH_RANGE: &str = "Invalid search result range";

fn session_err(e: impl fmt::Display) -> ProbeError {
    ProbeError::session(e.to_string())
}

/// Zero-hit XPath searches come back as an error; anything else is a
/// broken session.
fn lookup_result<T, E: fmt::Display>(
    found: Result<Vec<T>, E>,
    selector: &Selector,
) -> ProbeResult<Vec<T>> {
    match found {
        Ok(found) => Ok(found),
        Err(e)
            if matches!(selector, Selector::XPath(_))
                && e.to_string().contains(EMPTY_SEARCH_RANGE) =>
        {
            Ok(Vec::new())
        }
        Err(e) => Err(ProbeError::session(format!("lookup of {selector} failed: {e}"))),
    }
}

/// Transport failures are session errors; the rest mean the element
/// refused the action.
fn action_error(e: CdpError, element: &ElementHandle) -> ProbeError {
    match e {
        CdpError::Ws(_)
        | CdpError::Io(_)
        | CdpError::ChannelSendError(_)
        | CdpError::NoResponse
        | CdpError::Timeout => session_err(e),
        other => ProbeError::ElementNotInteractable {
            locator: element.id.clone(),
            message: other.to_string(),
        },
    }
}

type ElementTable = HashMap<String, Vec<Element>>;

fn lookup<'a>(table: &'a ElementTable, handle: &ElementHandle) -> ProbeResult<&'a Element> {
    handle
        .match_key()
        .and_then(|(selector, index)| table.get(selector)?.get(index))
        .ok_or_else(|| ProbeError::session(format!("stale element handle {}", handle.id)))
}

/// Browser with one CDP page
#[derive(Debug)]
pub struct ChromiumDriver {
    browser: Mutex<Option<CdpBrowser>>,
    page: CdpPage,
    elements: Mutex<ElementTable>,
    handle: tokio::task::JoinHandle<()>,
}

impl ChromiumDriver {
    /// Launch Chromium with `settings` and open a blank page
    ///
    /// # Errors
    ///
    /// Returns `BrowserLaunchError` if Chromium cannot be started
    pub async fn launch(settings: &BrowserSettings) -> ProbeResult<Self> {
        let mut builder = CdpConfig::builder()
            .window_size(settings.viewport_width, settings.viewport_height);

        if !settings.headless {
            builder = builder.with_head();
        }

        if !settings.sandbox {
            builder = builder.no_sandbox();
        }

        if let Some(ref path) = settings.chromium_path {
            builder = builder.chrome_executable(path);
        }

        let cdp_config = builder
            .build()
            .map_err(|message| ProbeError::BrowserLaunchError { message })?;

        let (browser, mut handler) =
            CdpBrowser::launch(cdp_config)
                .await
                .map_err(|e| ProbeError::BrowserLaunchError {
                    message: e.to_string(),
                })?;

        let handle = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| ProbeError::BrowserLaunchError {
                message: e.to_string(),
            })?;

        tracing::info!(
            headless = settings.headless,
            width = settings.viewport_width,
            height = settings.viewport_height,
            "chromium launched"
        );

        Ok(Self {
            browser: Mutex::new(Some(browser)),
            page,
            elements: Mutex::new(HashMap::new()),
            handle,
        })
    }
}

#[async_trait]
impl OnboardDriver for ChromiumDriver {
    async fn navigate(&self, url: &str) -> ProbeResult<()> {
        self.elements.lock().await.clear();
        let _ = self
            .page
            .goto(url)
            .await
            .map_err(|e| ProbeError::NavigationError {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    async fn find_element(&self, selector: &Selector) -> ProbeResult<ElementHandle> {
        self.find_elements(selector)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ProbeError::ElementNotFound {
                locator: selector.to_string(),
                timeout_ms: 0,
            })
    }

    async fn find_elements(&self, selector: &Selector) -> ProbeResult<Vec<ElementHandle>> {
        let found = match selector {
            Selector::Css(css) => self.page.find_elements(css.as_str()).await,
            Selector::XPath(xpath) => self.page.find_xpaths(xpath.as_str()).await,
        };
        let found = lookup_result(found, selector)?;
        let handles = (0..found.len())
            .map(|i| ElementHandle::for_match(selector, i))
            .collect();
        let _ = self
            .elements
            .lock()
            .await
            .insert(selector.to_string(), found);
        Ok(handles)
    }

    async fn execute_script(
        &self,
        script: &str,
        element: &ElementHandle,
    ) -> ProbeResult<serde_json::Value> {
        let table = self.elements.lock().await;
        let returned = lookup(&table, element)?
            .call_js_fn(script, false)
            .await
            .map_err(session_err)?;
        Ok(returned.result.value.unwrap_or(serde_json::Value::Null))
    }

    async fn click(&self, element: &ElementHandle) -> ProbeResult<()> {
        let table = self.elements.lock().await;
        let _ = lookup(&table, element)?
            .click()
            .await
            .map_err(|e| action_error(e, element))?;
        Ok(())
    }

    async fn send_keys(&self, element: &ElementHandle, text: &str) -> ProbeResult<()> {
        let table = self.elements.lock().await;
        let _ = lookup(&table, element)?
            .type_str(text)
            .await
            .map_err(|e| action_error(e, element))?;
        Ok(())
    }

    async fn current_url(&self) -> ProbeResult<String> {
        let url = self.page.url().await.map_err(session_err)?;
        Ok(url.unwrap_or_default())
    }

    async fn screenshot(&self) -> ProbeResult<Vec<u8>> {
        let params = CaptureScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .build();
        let screenshot = self.page.execute(params).await.map_err(session_err)?;

        use base64::Engine;
        base64::engine::general_purpose::STANDARD
            .decode(&screenshot.data)
            .map_err(session_err)
    }

    async fn quit(&self) -> ProbeResult<()> {
        self.elements.lock().await.clear();
        let Some(mut browser) = self.browser.lock().await.take() else {
            return Ok(());
        };
        let closed = browser.close().await.map_err(session_err);
        let _ = browser.wait().await;
        self.handle.abort();
        closed.map(drop)
    }
}

/// Launcher that starts a local Chromium
#[derive(Debug, Clone)]
pub struct ChromiumLauncher {
    settings: BrowserSettings,
}

impl ChromiumLauncher {
    /// Launcher for `settings`
    #[must_use]
    pub const fn new(settings: BrowserSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl SessionLauncher for ChromiumLauncher {
    async fn launch(&self) -> ProbeResult<Arc<dyn OnboardDriver>> {
        let driver = ChromiumDriver::launch(&self.settings).await?;
        Ok(Arc::new(driver))
    }

    fn label(&self) -> &'static str {
        "chromium"
    }
}
