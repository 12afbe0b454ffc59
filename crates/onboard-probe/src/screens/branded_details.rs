//! Business details screen of the partner-branded (santander) flavor.
//!
//! Besides the text fields it carries an industry autocomplete: the trigger
//! input and the first option must each be focused before they accept a
//! click.

use crate::driver::OnboardDriver;
use crate::locator::{Locator, LocatorOptions};
use crate::result::ProbeResult;
use crate::screen::{ScreenActions, Step, StepLog};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Values typed into the branded details form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandedDetails {
    /// Business name
    pub name: String,
    /// Phone number
    pub phone_number: String,
    /// VAT identification number
    pub vat_id: String,
}

/// Locators of the branded details form
#[derive(Debug, Clone)]
pub struct BrandedDetailsLocators {
    /// Business name input
    pub name: Locator,
    /// Industry autocomplete trigger
    pub industry: Locator,
    /// First industry option in the opened list
    pub industry_option: Locator,
    /// Phone number input
    pub phone_number: Locator,
    /// VAT id input
    pub vat_id: Locator,
    /// Sign-up button
    pub submit: Locator,
}

impl BrandedDetailsLocators {
    /// Build the locator set with shared auto-wait options
    #[must_use]
    pub fn new(options: LocatorOptions) -> Self {
        Self {
            name: Locator::structural("business name input", "input.ng-tns-c170-8.ng-untouched")
                .with_options(options),
            industry: Locator::structural("industry input", "input.mat-autocomplete-trigger")
                .with_options(options),
            industry_option: Locator::structural("first industry option", "#mat-option-1")
                .with_options(options),
            phone_number: Locator::attribute("phone number input", "input[pephoneinputfilter]")
                .with_options(options),
            vat_id: Locator::structural("vat id input", "input.ng-tns-c170-14.ng-untouched")
                .with_options(options),
            submit: Locator::structural("sign-up button", "button.signup-button")
                .with_options(options),
        }
    }
}

/// Branded details screen object
#[derive(Debug, Clone)]
pub struct BrandedDetailsScreen {
    driver: Arc<dyn OnboardDriver>,
    locators: BrandedDetailsLocators,
}

impl BrandedDetailsScreen {
    /// Create the screen over a shared driver
    #[must_use]
    pub fn new(driver: Arc<dyn OnboardDriver>, options: LocatorOptions) -> Self {
        Self {
            driver,
            locators: BrandedDetailsLocators::new(options),
        }
    }

    /// The screen's locator set
    #[must_use]
    pub const fn locators(&self) -> &BrandedDetailsLocators {
        &self.locators
    }

    /// Name, phone number, VAT id
    #[must_use]
    pub fn fill_steps(&self, details: &BrandedDetails) -> Vec<Step> {
        let l = &self.locators;
        vec![
            Step::type_into(&l.name, &details.name),
            Step::type_into(&l.phone_number, &details.phone_number),
            Step::type_into(&l.vat_id, &details.vat_id),
        ]
    }

    /// Focus and click the trigger, then focus and click the first option
    #[must_use]
    pub fn industry_steps(&self) -> Vec<Step> {
        let l = &self.locators;
        vec![
            Step::Focus(l.industry.clone()),
            Step::Click(l.industry.clone()),
            Step::Focus(l.industry_option.clone()),
            Step::Click(l.industry_option.clone()),
        ]
    }

    /// Type name, phone number and VAT id
    pub async fn fill_details(&self, details: &BrandedDetails) -> ProbeResult<StepLog> {
        self.run_steps(&self.fill_steps(details)).await
    }

    /// Pick the first industry from the autocomplete
    pub async fn select_industry(&self) -> ProbeResult<StepLog> {
        self.run_steps(&self.industry_steps()).await
    }
}

impl ScreenActions for BrandedDetailsScreen {
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
        "branded details"
    }
}
