//! OnboardDriver - abstract browser automation trait
//!
//! Screens never talk to a browser directly. They go through this trait, so
//! the same journeys run against Chromium (feature `browser`) or against
//! [`MockDriver`], a scripted in-memory page.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  OnboardDriver (trait)                                   │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌────────────────────┐        ┌──────────────────────┐  │
//! │  │  ChromiumDriver    │        │  MockDriver          │  │
//! │  │  CDP via           │        │  scripted pages,     │  │
//! │  │  chromiumoxide     │        │  call history        │  │
//! │  └────────────────────┘        └──────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```

use crate::locator::Selector;
use crate::result::{ProbeError, ProbeResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Mutex, MutexGuard};

/// Function declaration that focuses the element it is called on.
pub const FOCUS_SCRIPT: &str = "function() { this.focus(); }";

/// Element handle for DOM interactions.
///
/// Drivers hand out one id per match of a lookup; a later lookup of the
/// same selector may replace the element an id points at.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementHandle {
    /// Identifier of the element within the session
    pub id: String,
}

impl ElementHandle {
    /// Create a new element handle
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Handle id for match `index` of `selector`
    #[must_use]
    pub fn for_match(selector: &Selector, index: usize) -> Self {
        Self::new(format!("{selector}#{index}"))
    }

    /// Split an id made by [`for_match`](Self::for_match) into the selector
    /// text and the match index
    #[must_use]
    pub fn match_key(&self) -> Option<(&str, usize)> {
        let (selector, index) = self.id.rsplit_once('#')?;
        Some((selector, index.parse().ok()?))
    }
}

/// Abstract driver trait for browser automation
///
/// Every method is a suspension point; callers never issue two calls
/// concurrently against the same session.
#[async_trait]
pub trait OnboardDriver: Send + Sync + std::fmt::Debug {
    /// Navigate to URL
    async fn navigate(&self, url: &str) -> ProbeResult<()>;

    /// Resolve the first element matching `selector`.
    ///
    /// Fails with `ElementNotFound` when nothing matches right now; waiting
    /// is the caller's concern.
    async fn find_element(&self, selector: &Selector) -> ProbeResult<ElementHandle>;

    /// Resolve every element matching `selector`. Zero matches is `Ok(vec![])`.
    async fn find_elements(&self, selector: &Selector) -> ProbeResult<Vec<ElementHandle>>;

    /// Call a JavaScript function declaration with `this` bound to `element`
    async fn execute_script(
        &self,
        script: &str,
        element: &ElementHandle,
    ) -> ProbeResult<serde_json::Value>;

    /// Click element
    async fn click(&self, element: &ElementHandle) -> ProbeResult<()>;

    /// Send literal key input to element
    async fn send_keys(&self, element: &ElementHandle, text: &str) -> ProbeResult<()>;

    /// Get current URL
    async fn current_url(&self) -> ProbeResult<String>;

    /// Capture a PNG screenshot of the viewport
    async fn screenshot(&self) -> ProbeResult<Vec<u8>>;

    /// End the session and release the browser
    async fn quit(&self) -> ProbeResult<()>;
}

#[derive(Debug, Default)]
struct MockElement {
    count: usize,
    value: String,
}

#[derive(Debug, Default)]
struct MockState {
    url: String,
    elements: HashMap<Selector, MockElement>,
    handles: HashMap<String, Selector>,
    pages: HashMap<String, Vec<(Selector, usize)>>,
    transitions: HashMap<Selector, VecDeque<Vec<(Selector, usize)>>>,
    page_transitions: HashMap<(String, Selector), VecDeque<Vec<(Selector, usize)>>>,
    disabled: HashSet<Selector>,
    focused: Option<Selector>,
    history: Vec<String>,
    quit_count: usize,
    broken: bool,
}

impl MockState {
    fn load(&mut self, content: Vec<(Selector, usize)>) {
        self.elements.clear();
        self.handles.clear();
        self.focused = None;
        for (selector, count) in content {
            let _ = self.elements.insert(
                selector,
                MockElement {
                    count,
                    value: String::new(),
                },
            );
        }
    }

    fn check_alive(&self) -> ProbeResult<()> {
        if self.broken {
            Err(ProbeError::session("mock session is broken"))
        } else {
            Ok(())
        }
    }

    fn resolve(&self, element: &ElementHandle) -> ProbeResult<Selector> {
        self.handles
            .get(&element.id)
            .cloned()
            .ok_or_else(|| ProbeError::session(format!("stale element handle {}", element.id)))
    }
}

/// Mock driver for tests and dry runs.
///
/// Models a site as scripted page contents: navigating to a registered URL
/// loads its elements, and clicking a selector with a registered transition
/// replaces the page with the next scripted content. Transitions for one
/// selector are consumed in order, so a shared submit button can lead to a
/// different screen each time it is clicked.
#[derive(Debug, Default)]
pub struct MockDriver {
    state: Mutex<MockState>,
}

impl MockDriver {
    /// Create new mock driver
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        // A poisoned lock only means a test panicked mid-call; keep the data.
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Register the elements present after navigating to `url`
    #[must_use]
    pub fn with_page(self, url: impl Into<String>, elements: &[Selector]) -> Self {
        let content = elements.iter().map(|s| (s.clone(), 1)).collect();
        let _ = self.state().pages.insert(url.into(), content);
        self
    }

    /// Queue the page content that replaces the current page when
    /// `selector` is next clicked
    #[must_use]
    pub fn on_click(self, selector: &Selector, next: &[Selector]) -> Self {
        let content = next.iter().map(|s| (s.clone(), 1)).collect();
        self.state()
            .transitions
            .entry(selector.clone())
            .or_default()
            .push_back(content);
        self
    }

    /// Like [`on_click`](Self::on_click), but only while the last
    /// navigation went to `url`. Page-scoped transitions win over global ones.
    #[must_use]
    pub fn on_click_at(self, url: impl Into<String>, selector: &Selector, next: &[Selector]) -> Self {
        let content = next.iter().map(|s| (s.clone(), 1)).collect();
        self.state()
            .page_transitions
            .entry((url.into(), selector.clone()))
            .or_default()
            .push_back(content);
        self
    }

    /// Make `selector` present right now with `count` matches
    pub fn add_element(&self, selector: Selector, count: usize) {
        let _ = self.state().elements.insert(
            selector,
            MockElement {
                count,
                value: String::new(),
            },
        );
    }

    /// Mark `selector` as present but not interactable
    pub fn disable(&self, selector: Selector) {
        let _ = self.state().disabled.insert(selector);
    }

    /// Make every subsequent call fail with a session error
    pub fn break_session(&self) {
        self.state().broken = true;
    }

    /// Current value typed into `selector`
    #[must_use]
    pub fn value_of(&self, selector: &Selector) -> Option<String> {
        self.state().elements.get(selector).map(|e| e.value.clone())
    }

    /// Selector of the focused element
    #[must_use]
    pub fn focused(&self) -> Option<Selector> {
        self.state().focused.clone()
    }

    /// Get call history
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.state().history.clone()
    }

    /// Check if method was called
    #[must_use]
    pub fn was_called(&self, method: &str) -> bool {
        self.state().history.iter().any(|c| c.starts_with(method))
    }

    /// Number of `quit` calls
    #[must_use]
    pub fn quit_count(&self) -> usize {
        self.state().quit_count
    }
}

#[async_trait]
impl OnboardDriver for MockDriver {
    async fn navigate(&self, url: &str) -> ProbeResult<()> {
        let mut state = self.state();
        state.check_alive()?;
        state.history.push(format!("navigate:{url}"));
        state.url = url.to_string();
        let content = state.pages.get(url).cloned().unwrap_or_default();
        state.load(content);
        Ok(())
    }

    async fn find_element(&self, selector: &Selector) -> ProbeResult<ElementHandle> {
        let mut found = self.find_elements(selector).await?;
        if found.is_empty() {
            return Err(ProbeError::ElementNotFound {
                locator: selector.to_string(),
                timeout_ms: 0,
            });
        }
        Ok(found.swap_remove(0))
    }

    async fn find_elements(&self, selector: &Selector) -> ProbeResult<Vec<ElementHandle>> {
        let mut state = self.state();
        state.check_alive()?;
        let count = state.elements.get(selector).map_or(0, |e| e.count);
        let handles: Vec<ElementHandle> = (0..count)
            .map(|i| ElementHandle::for_match(selector, i))
            .collect();
        for handle in &handles {
            let _ = state.handles.insert(handle.id.clone(), selector.clone());
        }
        Ok(handles)
    }

    async fn execute_script(
        &self,
        script: &str,
        element: &ElementHandle,
    ) -> ProbeResult<serde_json::Value> {
        let mut state = self.state();
        state.check_alive()?;
        let selector = state.resolve(element)?;
        state.history.push(format!("script:{selector}"));
        if script == FOCUS_SCRIPT {
            state.focused = Some(selector);
        }
        Ok(serde_json::Value::Null)
    }

    async fn click(&self, element: &ElementHandle) -> ProbeResult<()> {
        let mut state = self.state();
        state.check_alive()?;
        let selector = state.resolve(element)?;
        if state.disabled.contains(&selector) {
            return Err(ProbeError::ElementNotInteractable {
                locator: selector.to_string(),
                message: "element is disabled".to_string(),
            });
        }
        state.history.push(format!("click:{selector}"));
        let key = (state.url.clone(), selector.clone());
        let next = match state.page_transitions.get_mut(&key).and_then(VecDeque::pop_front) {
            Some(content) => Some(content),
            None => state
                .transitions
                .get_mut(&selector)
                .and_then(VecDeque::pop_front),
        };
        if let Some(content) = next {
            state.load(content);
        }
        Ok(())
    }

    async fn send_keys(&self, element: &ElementHandle, text: &str) -> ProbeResult<()> {
        let mut state = self.state();
        state.check_alive()?;
        let selector = state.resolve(element)?;
        if state.focused.as_ref() != Some(&selector) {
            return Err(ProbeError::ElementNotInteractable {
                locator: selector.to_string(),
                message: "keys sent to an unfocused element".to_string(),
            });
        }
        state.history.push(format!("type:{selector}={text}"));
        if let Some(el) = state.elements.get_mut(&selector) {
            el.value.push_str(text);
        }
        Ok(())
    }

    async fn current_url(&self) -> ProbeResult<String> {
        let state = self.state();
        state.check_alive()?;
        Ok(state.url.clone())
    }

    async fn screenshot(&self) -> ProbeResult<Vec<u8>> {
        self.state().check_alive()?;
        Ok(vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A])
    }

    async fn quit(&self) -> ProbeResult<()> {
        let mut state = self.state();
        state.history.push("quit".to_string());
        state.quit_count += 1;
        Ok(())
    }
}
