//! Journey orchestration
//!
//! A journey is the linear walk from the registration form to the
//! dashboard for one flavor. It is planned up front as a list of
//! [`JourneyStep`]s and then executed in order against the screens of a
//! [`ScenarioContext`]; the first failing step aborts the journey.
//!
//! ```text
//! navigate ─► registration ─► details ─► get started (×N) ─► tiles
//! ```

use crate::assertion::Assertion;
use crate::flavor::{Flavor, JourneyData};
use crate::locator::Locator;
use crate::result::{ProbeError, ProbeResult};
use crate::screen::ScreenActions;
use crate::screens::{BrandedDetails, GenericDetails, RegistrationDetails, Screens};
use crate::session::ScenarioContext;
use crate::wait::wait_for_visible;
use serde::Serialize;
use std::fmt;

/// A screen element whose visibility gates the next step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Checkpoint {
    /// Registration form rendered
    RegistrationForm,
    /// Generic details form rendered
    GenericDetailsForm,
    /// Branded details form rendered
    BrandedDetailsForm,
    /// Welcome call-to-action rendered
    GetStarted,
    /// Application tiles rendered
    AppTiles,
}

impl Checkpoint {
    /// Locator the checkpoint waits on
    #[must_use]
    pub fn locator(self, screens: &Screens) -> &Locator {
        match self {
            Self::RegistrationForm => screens.registration.ready_locator(),
            Self::GenericDetailsForm => screens.generic_details.ready_locator(),
            Self::BrandedDetailsForm => screens.branded_details.ready_locator(),
            Self::GetStarted => screens.dashboard.ready_locator(),
            Self::AppTiles => &screens.dashboard.locators().app_titles,
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::RegistrationForm => "registration form",
            Self::GenericDetailsForm => "generic details form",
            Self::BrandedDetailsForm => "branded details form",
            Self::GetStarted => "get started button",
            Self::AppTiles => "app tiles",
        }
    }
}

/// One orchestrator step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum JourneyStep {
    /// Load the flavor's registration URL
    Navigate {
        /// Absolute URL
        url: String,
    },
    /// Wait for a checkpoint element with the suite timeout
    AwaitVisible {
        /// Element waited on
        checkpoint: Checkpoint,
    },
    /// Type every registration field
    FillRegistration {
        /// Values typed
        #[serde(skip)]
        details: RegistrationDetails,
    },
    /// Click the registration sign-up button
    SubmitRegistration,
    /// Type the generic details fields
    FillGenericDetails {
        /// Values typed
        details: GenericDetails,
    },
    /// Type the branded details fields
    FillBrandedDetails {
        /// Values typed
        details: BrandedDetails,
    },
    /// Pick the first industry from the autocomplete
    SelectIndustry,
    /// Click the details sign-up button
    SubmitDetails,
    /// Click the welcome call-to-action
    ActivateGetStarted,
    /// Assert each tile is present, stopping at the first missing one
    AssertTiles {
        /// Tile labels, in assertion order
        tiles: Vec<String>,
    },
}

impl fmt::Display for JourneyStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Navigate { url } => write!(f, "navigate to {url}"),
            Self::AwaitVisible { checkpoint } => write!(f, "await {}", checkpoint.label()),
            Self::FillRegistration { details } => {
                write!(f, "fill registration as {}", details.email)
            }
            Self::SubmitRegistration => f.write_str("submit registration"),
            Self::FillGenericDetails { details } => {
                write!(f, "fill generic details for {}", details.name)
            }
            Self::FillBrandedDetails { details } => {
                write!(f, "fill branded details for {}", details.name)
            }
            Self::SelectIndustry => f.write_str("select industry"),
            Self::SubmitDetails => f.write_str("submit details"),
            Self::ActivateGetStarted => f.write_str("activate get started"),
            Self::AssertTiles { tiles } => write!(f, "assert tiles: {}", tiles.join(", ")),
        }
    }
}

/// Steps a journey finished, in order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JourneyTrace {
    /// Display form of each completed step
    pub completed: Vec<String>,
}

impl JourneyTrace {
    /// Number of completed steps
    #[must_use]
    pub fn len(&self) -> usize {
        self.completed.len()
    }

    /// True when no step completed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.completed.is_empty()
    }
}

/// Registration and onboarding walk for one flavor
#[derive(Debug, Clone)]
pub struct Journey {
    flavor: Flavor,
    url: String,
    data: JourneyData,
}

impl Journey {
    /// Journey for `flavor` under `base_url`, with checked inputs
    pub fn new(flavor: Flavor, base_url: &str, data: JourneyData) -> ProbeResult<Self> {
        data.validate(flavor)?;
        Ok(Self {
            flavor,
            url: flavor.url(base_url),
            data,
        })
    }

    /// Journey with the flavor's literal inputs
    pub fn with_defaults(flavor: Flavor, base_url: &str) -> ProbeResult<Self> {
        Self::new(flavor, base_url, flavor.default_data())
    }

    /// Flavor walked
    #[must_use]
    pub const fn flavor(&self) -> Flavor {
        self.flavor
    }

    /// Registration URL
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Inputs typed along the way
    #[must_use]
    pub const fn data(&self) -> &JourneyData {
        &self.data
    }

    /// The full ordered step list
    pub fn plan(&self) -> ProbeResult<Vec<JourneyStep>> {
        let mut steps = vec![
            JourneyStep::Navigate {
                url: self.url.clone(),
            },
            JourneyStep::AwaitVisible {
                checkpoint: Checkpoint::RegistrationForm,
            },
            JourneyStep::FillRegistration {
                details: self.data.registration.clone(),
            },
            JourneyStep::SubmitRegistration,
        ];

        if self.flavor.is_branded() {
            let details = self.data.branded_details().ok_or_else(|| {
                ProbeError::config(format!("{} journey needs business.vat_id", self.flavor))
            })?;
            steps.extend([
                JourneyStep::AwaitVisible {
                    checkpoint: Checkpoint::BrandedDetailsForm,
                },
                JourneyStep::FillBrandedDetails { details },
                JourneyStep::SelectIndustry,
            ]);
        } else {
            steps.extend([
                JourneyStep::AwaitVisible {
                    checkpoint: Checkpoint::GenericDetailsForm,
                },
                JourneyStep::FillGenericDetails {
                    details: self.data.generic_details(),
                },
            ]);
        }
        steps.push(JourneyStep::SubmitDetails);

        for _ in 0..self.flavor.get_started_activations() {
            steps.push(JourneyStep::AwaitVisible {
                checkpoint: Checkpoint::GetStarted,
            });
            steps.push(JourneyStep::ActivateGetStarted);
        }

        steps.push(JourneyStep::AwaitVisible {
            checkpoint: Checkpoint::AppTiles,
        });
        steps.push(JourneyStep::AssertTiles {
            tiles: self.data.tiles_for(self.flavor),
        });
        Ok(steps)
    }

    /// Walk the plan; `trace` records every step that completed, also
    /// when a later one fails
    pub async fn run(&self, ctx: &ScenarioContext<'_>, trace: &mut JourneyTrace) -> ProbeResult<()> {
        let steps = self.plan()?;
        tracing::info!(flavor = %self.flavor, steps = steps.len(), "journey started");
        for step in &steps {
            tracing::debug!(flavor = %self.flavor, step = %step, "step");
            self.execute(ctx, step).await?;
            trace.completed.push(step.to_string());
        }
        tracing::info!(flavor = %self.flavor, "journey passed");
        Ok(())
    }

    async fn execute(&self, ctx: &ScenarioContext<'_>, step: &JourneyStep) -> ProbeResult<()> {
        let screens = ctx.screens;
        match step {
            JourneyStep::Navigate { url } => ctx.driver.navigate(url).await,
            JourneyStep::AwaitVisible { checkpoint } => {
                wait_for_visible(ctx.driver, checkpoint.locator(screens), ctx.wait).await
            }
            JourneyStep::FillRegistration { details } => {
                screens.registration.fill_registration(details).await.map(drop)
            }
            JourneyStep::SubmitRegistration => screens.registration.submit().await,
            JourneyStep::FillGenericDetails { details } => {
                screens.generic_details.fill_details(details).await.map(drop)
            }
            JourneyStep::FillBrandedDetails { details } => {
                screens.branded_details.fill_details(details).await.map(drop)
            }
            JourneyStep::SelectIndustry => screens.branded_details.select_industry().await.map(drop),
            JourneyStep::SubmitDetails => {
                if self.flavor.is_branded() {
                    screens.branded_details.submit().await
                } else {
                    screens.generic_details.submit().await
                }
            }
            JourneyStep::ActivateGetStarted => screens.dashboard.activate_get_started().await,
            JourneyStep::AssertTiles { tiles } => {
                for tile in tiles {
                    let present = screens.dashboard.has_tile(tile).await?;
                    Assertion::is_true(present, &format!("expected tile '{tile}' on the dashboard"))
                        .into_result()?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    const BASE: &str = "https://commerceos.example/registration/";

    fn labels(steps: &[JourneyStep]) -> Vec<String> {
        steps.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_fashion_plan() {
        let journey = Journey::with_defaults(Flavor::Fashion, BASE).unwrap();
        let steps = journey.plan().unwrap();
        assert_eq!(
            labels(&steps),
            vec![
                "navigate to https://commerceos.example/registration/fashion",
                "await registration form",
                "fill registration as saurav222@gmail.com",
                "submit registration",
                "await generic details form",
                "fill generic details for TestQA",
                "submit details",
                "await get started button",
                "activate get started",
                "await app tiles",
                "assert tiles: Transactions, Checkout, Connect, Products, Shop, Message, Settings",
            ]
        );
    }

    #[test]
    fn test_santander_selects_industry_before_submit() {
        let journey = Journey::with_defaults(Flavor::Santander, BASE).unwrap();
        let steps = journey.plan().unwrap();
        let industry = steps
            .iter()
            .position(|s| *s == JourneyStep::SelectIndustry)
            .unwrap();
        let fill = steps
            .iter()
            .position(|s| matches!(s, JourneyStep::FillBrandedDetails { .. }))
            .unwrap();
        let submit = steps
            .iter()
            .position(|s| *s == JourneyStep::SubmitDetails)
            .unwrap();
        assert!(fill < industry && industry < submit);
    }

    #[test]
    fn test_santander_activates_twice() {
        let journey = Journey::with_defaults(Flavor::Santander, BASE).unwrap();
        let count = journey
            .plan()
            .unwrap()
            .iter()
            .filter(|s| **s == JourneyStep::ActivateGetStarted)
            .count();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_fashion_has_no_industry() {
        let journey = Journey::with_defaults(Flavor::Fashion, BASE).unwrap();
        assert!(!journey
            .plan()
            .unwrap()
            .contains(&JourneyStep::SelectIndustry));
    }

    #[test]
    fn test_new_rejects_branded_without_vat() {
        let err = Journey::new(Flavor::Santander, BASE, Flavor::Fashion.default_data()).unwrap_err();
        assert!(matches!(err, ProbeError::Config { .. }));
    }

    #[test]
    fn test_plan_serializes_without_password() {
        let journey = Journey::with_defaults(Flavor::Fashion, BASE).unwrap();
        let json = serde_json::to_string(&journey.plan().unwrap()).unwrap();
        assert!(json.contains("\"step\":\"navigate\""));
        assert!(!json.contains("Jxcvbnmlk@1"));
    }
}
