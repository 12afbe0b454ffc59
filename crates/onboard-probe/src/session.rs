//! Browser session lifecycle
//!
//! A [`SessionLauncher`] produces the single driver a suite shares across
//! its scenarios. [`Session`] pairs that driver with the screen objects
//! built over it and hands each journey a borrowed [`ScenarioContext`].

use crate::config::SuiteConfig;
use crate::driver::{MockDriver, OnboardDriver};
use crate::flavor::Flavor;
use crate::locator::{LocatorOptions, Selector};
use crate::result::{ProbeError, ProbeResult};
use crate::screens::{
    BrandedDetailsLocators, DashboardLocators, GenericDetailsLocators, RegistrationLocators,
    Screens,
};
use crate::wait::WaitOptions;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Starts a browser session
#[async_trait]
pub trait SessionLauncher: Send + Sync {
    /// Launch a browser and return its driver
    async fn launch(&self) -> ProbeResult<Arc<dyn OnboardDriver>>;

    /// Short label for logs
    fn label(&self) -> &'static str;
}

/// What a journey sees while it runs
#[derive(Debug, Clone, Copy)]
pub struct ScenarioContext<'a> {
    /// Shared driver
    pub driver: &'a dyn OnboardDriver,
    /// Screen objects over `driver`
    pub screens: &'a Screens,
    /// Orchestrator wait window
    pub wait: WaitOptions,
}

/// One launched browser plus its screens
#[derive(Debug)]
pub struct Session {
    driver: Arc<dyn OnboardDriver>,
    screens: Screens,
}

impl Session {
    /// Launch through `launcher` and declare the screens once
    pub async fn open(launcher: &dyn SessionLauncher, options: LocatorOptions) -> ProbeResult<Self> {
        tracing::info!(launcher = launcher.label(), "launching browser");
        let driver = launcher.launch().await?;
        let screens = Screens::new(&driver, options);
        Ok(Self { driver, screens })
    }

    /// Borrowed view handed to a journey
    #[must_use]
    pub fn context(&self, wait: WaitOptions) -> ScenarioContext<'_> {
        ScenarioContext {
            driver: self.driver.as_ref(),
            screens: &self.screens,
            wait,
        }
    }

    /// Shared driver
    #[must_use]
    pub fn driver(&self) -> &dyn OnboardDriver {
        self.driver.as_ref()
    }

    /// End the browser session
    pub async fn quit(self) -> ProbeResult<()> {
        tracing::info!("quitting browser");
        self.driver.quit().await
    }
}

/// Launcher over an in-memory [`MockDriver`]
#[derive(Debug)]
pub struct MockLauncher {
    driver: Arc<MockDriver>,
    launches: AtomicUsize,
    failure: Option<String>,
}

impl MockLauncher {
    /// Hand out `driver` on every launch
    #[must_use]
    pub fn new(driver: Arc<MockDriver>) -> Self {
        Self {
            driver,
            launches: AtomicUsize::new(0),
            failure: None,
        }
    }

    /// Launcher whose launches always fail with `message`
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::new(Arc::new(MockDriver::new()))
        }
    }

    /// Launcher over [`scripted_site`] for `config`
    #[must_use]
    pub fn scripted(config: &SuiteConfig) -> Self {
        Self::new(Arc::new(scripted_site(config)))
    }

    /// The driver handed out
    #[must_use]
    pub fn driver(&self) -> &Arc<MockDriver> {
        &self.driver
    }

    /// Launch attempts so far
    #[must_use]
    pub fn launches(&self) -> usize {
        self.launches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionLauncher for MockLauncher {
    async fn launch(&self) -> ProbeResult<Arc<dyn OnboardDriver>> {
        let _ = self.launches.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.failure {
            return Err(ProbeError::BrowserLaunchError {
                message: message.clone(),
            });
        }
        Ok(Arc::clone(&self.driver) as Arc<dyn OnboardDriver>)
    }

    fn label(&self) -> &'static str {
        "mock"
    }
}

/// Simulated onboarding site for every flavor under `config.base_url`.
///
/// Each flavor's registration URL serves the registration form. Submitting
/// it shows the flavor's details form, submitting that shows the welcome
/// screen, and the get-started button reveals the configured tiles after
/// the flavor's number of activations.
#[must_use]
pub fn scripted_site(config: &SuiteConfig) -> MockDriver {
    let options = LocatorOptions::default();
    let reg = RegistrationLocators::new(options);
    let generic = GenericDetailsLocators::new(options);
    let branded = BrandedDetailsLocators::new(options);
    let dash = DashboardLocators::new(options);
    // every form shares one sign-up button; each click moves one screen on
    let sign_up = reg.submit.selector();

    let registration_page: Vec<Selector> = [
        &reg.first_name,
        &reg.last_name,
        &reg.email,
        &reg.password,
        &reg.confirm_password,
        &reg.submit,
    ]
    .iter()
    .map(|l| l.selector().clone())
    .collect();
    let generic_page: Vec<Selector> = [&generic.name, &generic.phone_number, &generic.submit]
        .iter()
        .map(|l| l.selector().clone())
        .collect();
    let branded_page: Vec<Selector> = [
        &branded.name,
        &branded.industry,
        &branded.phone_number,
        &branded.vat_id,
        &branded.submit,
    ]
    .iter()
    .map(|l| l.selector().clone())
    .collect();
    let mut branded_with_options = branded_page.clone();
    branded_with_options.push(branded.industry_option.selector().clone());
    let welcome_page = vec![dash.get_started.selector().clone()];

    let mut driver = MockDriver::new();
    for flavor in Flavor::ALL {
        let url = flavor.url(&config.base_url);
        let mut tiles_page = vec![dash.app_titles.selector().clone()];
        tiles_page.extend(
            config
                .journey_data(flavor)
                .tiles_for(flavor)
                .iter()
                .map(|t| Selector::text_within("div", t)),
        );
        let details_page = if flavor.is_branded() {
            &branded_page
        } else {
            &generic_page
        };

        driver = driver
            .with_page(url.clone(), &registration_page)
            .on_click_at(url.clone(), sign_up, details_page)
            .on_click_at(url.clone(), sign_up, &welcome_page);
        if flavor.is_branded() {
            driver = driver.on_click_at(
                url.clone(),
                branded.industry.selector(),
                &branded_with_options,
            );
        }
        for _ in 1..flavor.get_started_activations() {
            driver = driver.on_click_at(url.clone(), dash.get_started.selector(), &welcome_page);
        }
        driver = driver.on_click_at(url, dash.get_started.selector(), &tiles_page);
    }
    driver
}
