//! Screen objects, one per logical page of the onboarding flow.

mod branded_details;
mod dashboard;
mod generic_details;
mod registration;

pub use branded_details::{BrandedDetails, BrandedDetailsLocators, BrandedDetailsScreen};
pub use dashboard::{DashboardLocators, DashboardScreen};
pub use generic_details::{GenericDetails, GenericDetailsLocators, GenericDetailsScreen};
pub use registration::{RegistrationDetails, RegistrationLocators, RegistrationScreen};

use crate::driver::OnboardDriver;
use crate::locator::LocatorOptions;
use std::sync::Arc;

/// Every screen object, built once per session over the same driver
#[derive(Debug, Clone)]
pub struct Screens {
    /// Registration form
    pub registration: RegistrationScreen,
    /// Generic (fashion) details form
    pub generic_details: GenericDetailsScreen,
    /// Branded (santander) details form
    pub branded_details: BrandedDetailsScreen,
    /// Dashboard
    pub dashboard: DashboardScreen,
}

impl Screens {
    /// Declare all screens; nothing is resolved until an action runs
    #[must_use]
    pub fn new(driver: &Arc<dyn OnboardDriver>, options: LocatorOptions) -> Self {
        Self {
            registration: RegistrationScreen::new(Arc::clone(driver), options),
            generic_details: GenericDetailsScreen::new(Arc::clone(driver), options),
            branded_details: BrandedDetailsScreen::new(Arc::clone(driver), options),
            dashboard: DashboardScreen::new(Arc::clone(driver), options),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::driver::MockDriver;
    use crate::screen::ScreenActions;

    #[test]
    fn test_declared_before_page_exists() {
        let driver: Arc<dyn OnboardDriver> = Arc::new(MockDriver::new());
        let screens = Screens::new(&driver, LocatorOptions::default());
        assert_eq!(screens.registration.screen_name(), "registration");
        assert_eq!(screens.dashboard.ready_locator().name(), "get started button");
    }

    #[test]
    fn test_each_screen_has_one_submit() {
        let driver: Arc<dyn OnboardDriver> = Arc::new(MockDriver::new());
        let screens = Screens::new(&driver, LocatorOptions::default());
        assert_eq!(
            screens.registration.submit_locator().selector().expression(),
            "button.signup-button"
        );
        assert_eq!(
            screens.generic_details.submit_locator().selector().expression(),
            "button.signup-button"
        );
        assert_eq!(
            screens.branded_details.submit_locator().selector().expression(),
            "button.signup-button"
        );
        assert_eq!(
            screens.dashboard.submit_locator().selector().expression(),
            "button.welcome-screen-content-button"
        );
    }
}
