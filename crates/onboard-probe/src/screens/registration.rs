//! Registration screen: the first form of every flavor.

use crate::driver::OnboardDriver;
use crate::locator::{Locator, LocatorOptions};
use crate::result::ProbeResult;
use crate::screen::{ScreenActions, Step, StepLog};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Values typed into the registration form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationDetails {
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Email address
    pub email: String,
    /// Password
    pub password: String,
    /// Password confirmation
    pub confirm_password: String,
}

impl RegistrationDetails {
    /// Details with matching password and confirmation
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let password = password.into();
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            confirm_password: password.clone(),
            password,
        }
    }
}

/// Locators of the registration form
#[derive(Debug, Clone)]
pub struct RegistrationLocators {
    /// First name input
    pub first_name: Locator,
    /// Last name input
    pub last_name: Locator,
    /// Email input
    pub email: Locator,
    /// Password input
    pub password: Locator,
    /// Confirm password input
    pub confirm_password: Locator,
    /// Sign-up button
    pub submit: Locator,
}

impl RegistrationLocators {
    /// Build the locator set with shared auto-wait options
    #[must_use]
    pub fn new(options: LocatorOptions) -> Self {
        let field = |name: &str, control: &str| {
            Locator::attribute(name, format!(r#"input[formcontrolname="{control}"]"#))
                .with_options(options)
        };
        Self {
            first_name: field("first name input", "firstName"),
            last_name: field("last name input", "lastName"),
            email: field("email input", "email"),
            password: field("password input", "password"),
            confirm_password: field("confirm password input", "confirmPass"),
            submit: Locator::structural("sign-up button", "button.signup-button")
                .with_options(options),
        }
    }
}

/// Registration screen object
#[derive(Debug, Clone)]
pub struct RegistrationScreen {
    driver: Arc<dyn OnboardDriver>,
    locators: RegistrationLocators,
}

impl RegistrationScreen {
    /// Create the screen over a shared driver
    #[must_use]
    pub fn new(driver: Arc<dyn OnboardDriver>, options: LocatorOptions) -> Self {
        Self {
            driver,
            locators: RegistrationLocators::new(options),
        }
    }

    /// The screen's locator set
    #[must_use]
    pub const fn locators(&self) -> &RegistrationLocators {
        &self.locators
    }

    /// Steps that fill the form: first name, last name, email, password,
    /// confirmation. No submit.
    #[must_use]
    pub fn fill_steps(&self, details: &RegistrationDetails) -> Vec<Step> {
        let l = &self.locators;
        vec![
            Step::type_into(&l.first_name, &details.first_name),
            Step::type_into(&l.last_name, &details.last_name),
            Step::type_into(&l.email, &details.email),
            Step::type_into(&l.password, &details.password),
            Step::type_into(&l.confirm_password, &details.confirm_password),
        ]
    }

    /// Fill every registration field; submission is a separate `submit()`
    pub async fn fill_registration(&self, details: &RegistrationDetails) -> ProbeResult<StepLog> {
        self.run_steps(&self.fill_steps(details)).await
    }
}

impl ScreenActions for RegistrationScreen {
    fn driver(&self) -> &dyn OnboardDriver {
        self.driver.as_ref()
    }

    fn submit_locator(&self) -> &Locator {
        &self.locators.submit
    }

    fn ready_locator(&self) -> &Locator {
        &self.locators.first_name
    }

    fn screen_name(&self) -> &'static str {
        "registration"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::driver::MockDriver;

    fn details() -> RegistrationDetails {
        RegistrationDetails::new("Saurav", "Kumar", "saurav222@gmail.com", "Jxcvbnmlk@1")
    }

    fn screen_on(driver: &Arc<MockDriver>) -> RegistrationScreen {
        let shared: Arc<dyn OnboardDriver> = driver.clone();
        RegistrationScreen::new(shared, LocatorOptions::default())
    }

    fn populate(driver: &MockDriver, screen: &RegistrationScreen) {
        let l = screen.locators();
        for loc in [
            &l.first_name,
            &l.last_name,
            &l.email,
            &l.password,
            &l.confirm_password,
            &l.submit,
        ] {
            driver.add_element(loc.selector().clone(), 1);
        }
    }

    #[test]
    fn test_new_copies_password() {
        let d = details();
        assert_eq!(d.password, d.confirm_password);
    }

    #[test]
    fn test_fill_steps_order_without_submit() {
        let driver = Arc::new(MockDriver::new());
        let screen = screen_on(&driver);
        let steps = screen.fill_steps(&details());

        let names: Vec<&str> = steps
            .iter()
            .map(|s| s.locator().unwrap().name())
            .collect();
        assert_eq!(
            names,
            vec![
                "first name input",
                "last name input",
                "email input",
                "password input",
                "confirm password input"
            ]
        );
        assert!(!steps.contains(&Step::Submit));
    }

    #[test]
    fn test_locator_selectors() {
        let l = RegistrationLocators::new(LocatorOptions::default());
        assert_eq!(
            l.confirm_password.selector().expression(),
            r#"input[formcontrolname="confirmPass"]"#
        );
        assert_eq!(l.submit.selector().expression(), "button.signup-button");
    }

    #[tokio::test]
    async fn test_fill_registration_populates_all_fields() {
        let driver = Arc::new(MockDriver::new());
        let screen = screen_on(&driver);
        populate(&driver, &screen);

        let log = screen.fill_registration(&details()).await.unwrap();
        assert_eq!(log.len(), 5);

        let l = screen.locators();
        assert_eq!(driver.value_of(l.first_name.selector()).as_deref(), Some("Saurav"));
        assert_eq!(driver.value_of(l.last_name.selector()).as_deref(), Some("Kumar"));
        assert_eq!(
            driver.value_of(l.email.selector()).as_deref(),
            Some("saurav222@gmail.com")
        );
        assert_eq!(driver.value_of(l.password.selector()).as_deref(), Some("Jxcvbnmlk@1"));
        assert_eq!(
            driver.value_of(l.confirm_password.selector()).as_deref(),
            Some("Jxcvbnmlk@1")
        );
        assert!(!driver.was_called("click"));
    }

    #[tokio::test]
    async fn test_all_fields_typed_before_submit() {
        let driver = Arc::new(MockDriver::new());
        let screen = screen_on(&driver);
        populate(&driver, &screen);

        screen.fill_registration(&details()).await.unwrap();
        screen.submit().await.unwrap();

        let history = driver.history();
        let submit_at = history.iter().position(|h| h.starts_with("click:")).unwrap();
        let typed = history[..submit_at]
            .iter()
            .filter(|h| h.starts_with("type:"))
            .count();
        assert_eq!(typed, 5);
        assert_eq!(submit_at, history.len() - 1);
    }
}
