//! Dashboard screen reached after onboarding.

use crate::driver::OnboardDriver;
use crate::locator::{Locator, LocatorOptions};
use crate::result::ProbeResult;
use crate::screen::ScreenActions;
use std::sync::Arc;

/// Locators of the dashboard
#[derive(Debug, Clone)]
pub struct DashboardLocators {
    /// "Get started" call-to-action on the welcome screen
    pub get_started: Locator,
    /// Any application tile title
    pub app_titles: Locator,
}

impl DashboardLocators {
    /// Build the locator set with shared auto-wait options
    #[must_use]
    pub fn new(options: LocatorOptions) -> Self {
        Self {
            get_started: Locator::structural(
                "get started button",
                "button.welcome-screen-content-button",
            )
            .with_options(options),
            app_titles: Locator::structural("app tile titles", "div.icons__title")
                .with_options(options),
        }
    }
}

/// Dashboard screen object
#[derive(Debug, Clone)]
pub struct DashboardScreen {
    driver: Arc<dyn OnboardDriver>,
    locators: DashboardLocators,
    options: LocatorOptions,
}

impl DashboardScreen {
    /// Create the screen over a shared driver
    #[must_use]
    pub fn new(driver: Arc<dyn OnboardDriver>, options: LocatorOptions) -> Self {
        Self {
            driver,
            locators: DashboardLocators::new(options),
            options,
        }
    }

    /// The screen's locator set
    #[must_use]
    pub const fn locators(&self) -> &DashboardLocators {
        &self.locators
    }

    /// Text-content locator for the tile labelled `name`
    #[must_use]
    pub fn tile_locator(&self, name: &str) -> Locator {
        Locator::text(format!("{name} tile"), "div", name).with_options(self.options)
    }

    /// Click the call-to-action that reveals the application tiles
    pub async fn activate_get_started(&self) -> ProbeResult<()> {
        self.submit().await
    }

    /// True iff at least one element's text contains `name`.
    ///
    /// Checks the page as it is now, without waiting; zero matches is a
    /// normal `false`.
    pub async fn has_tile(&self, name: &str) -> ProbeResult<bool> {
        let locator = self.tile_locator(name);
        let found = self.driver.find_elements(locator.selector()).await?;
        tracing::debug!(tile = name, matches = found.len(), "tile lookup");
        Ok(!found.is_empty())
    }
}

impl ScreenActions for DashboardScreen {
    fn driver(&self) -> &dyn OnboardDriver {
        self.driver.as_ref()
    }

    fn submit_locator(&self) -> &Locator {
        &self.locators.get_started
    }

    fn ready_locator(&self) -> &Locator {
        &self.locators.get_started
    }

    fn screen_name(&self) -> &'static str {
        "dashboard"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::driver::MockDriver;
    use crate::locator::{Selector, Strategy};
    use crate::result::ProbeError;
    use proptest::prelude::*;

    fn dashboard(driver: &Arc<MockDriver>) -> DashboardScreen {
        DashboardScreen::new(driver.clone(), LocatorOptions::default())
    }

    #[test]
    fn test_tile_locator() {
        let driver = Arc::new(MockDriver::new());
        let loc = dashboard(&driver).tile_locator("Point of Sale");
        assert_eq!(loc.strategy(), Strategy::TextContent);
        assert_eq!(
            loc.selector(),
            &Selector::xpath("//div[contains(text(), 'Point of Sale')]")
        );
    }

    #[tokio::test]
    async fn test_has_tile_absent_is_false() {
        let driver = Arc::new(MockDriver::new());
        assert!(!dashboard(&driver).has_tile("Shop").await.unwrap());
    }

    #[tokio::test]
    async fn test_has_tile_present() {
        let driver = Arc::new(MockDriver::new());
        driver.add_element(Selector::text_within("div", "Shop"), 1);
        assert!(dashboard(&driver).has_tile("Shop").await.unwrap());
    }

    #[tokio::test]
    async fn test_has_tile_session_error() {
        let driver = Arc::new(MockDriver::new());
        driver.break_session();
        let err = dashboard(&driver).has_tile("Shop").await.unwrap_err();
        assert!(matches!(err, ProbeError::SessionError { .. }));
    }

    #[tokio::test]
    async fn test_activate_get_started_clicks_cta() {
        let driver = Arc::new(MockDriver::new());
        let screen = dashboard(&driver);
        driver.add_element(screen.locators().get_started.selector().clone(), 1);
        screen.activate_get_started().await.unwrap();
        assert!(driver.was_called("click:css=button.welcome-screen-content-button"));
    }

    proptest! {
        #[test]
        fn prop_has_tile_iff_any_match(count in 0usize..8, name in "[A-Za-z ]{1,16}") {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()
                .unwrap();
            let driver = Arc::new(MockDriver::new());
            if count > 0 {
                driver.add_element(Selector::text_within("div", &name), count);
            }
            let screen = dashboard(&driver);
            let present = runtime.block_on(screen.has_tile(&name)).unwrap();
            prop_assert_eq!(present, count > 0);
        }
    }
}
