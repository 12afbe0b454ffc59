//! Business details screen of the generic (fashion) flavor.

use crate::driver::OnboardDriver;
use crate::locator::{Locator, LocatorOptions};
use crate::result::ProbeResult;
use crate::screen::{ScreenActions, Step, StepLog};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Values typed into the generic details form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericDetails {
    /// Business name
    pub name: String,
    /// Phone number
    pub phone_number: String,
}

/// Locators of the generic details form
#[derive(Debug, Clone)]
pub struct GenericDetailsLocators {
    /// Business name input
    pub name: Locator,
    /// Phone number input
    pub phone_number: Locator,
    /// Sign-up button
    pub submit: Locator,
}

impl GenericDetailsLocators {
    /// Build the locator set with shared auto-wait options
    #[must_use]
    pub fn new(options: LocatorOptions) -> Self {
        Self {
            name: Locator::attribute("business name input", r#"input[formcontrolname="name"]"#)
                .with_options(options),
            phone_number: Locator::attribute(
                "phone number input",
                r#"input[formcontrolname="phoneNumber"]"#,
            )
            .with_options(options),
            submit: Locator::structural("sign-up button", "button.signup-button")
                .with_options(options),
        }
    }
}

/// Generic details screen object
#[derive(Debug, Clone)]
pub struct GenericDetailsScreen {
    driver: Arc<dyn OnboardDriver>,
    locators: GenericDetailsLocators,
}

impl GenericDetailsScreen {
    /// Create the screen over a shared driver
    #[must_use]
    pub fn new(driver: Arc<dyn OnboardDriver>, options: LocatorOptions) -> Self {
        Self {
            driver,
            locators: GenericDetailsLocators::new(options),
        }
    }

    /// The screen's locator set
    #[must_use]
    pub const fn locators(&self) -> &GenericDetailsLocators {
        &self.locators
    }

    /// Name, then phone number
    #[must_use]
    pub fn fill_steps(&self, details: &GenericDetails) -> Vec<Step> {
        vec![
            Step::type_into(&self.locators.name, &details.name),
            Step::type_into(&self.locators.phone_number, &details.phone_number),
        ]
    }

    /// Type name, then phone number once the name is in
    pub async fn fill_details(&self, details: &GenericDetails) -> ProbeResult<StepLog> {
        self.run_steps(&self.fill_steps(details)).await
    }
}

impl ScreenActions for GenericDetailsScreen {
    fn driver(&self) -> &dyn OnboardDriver {
        self.driver.as_ref()
    }

    fn submit_locator(&self) -> &Locator {
        &self.locators.submit
    }

    fn ready_locator(&self) -> &Locator {
        &self.locators.name
    }

    fn screen_name(&self) -> &'static str {
        "generic details"
    }
}
