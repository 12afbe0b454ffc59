//! Product flavors and the literal inputs of their journeys.

use crate::result::{ProbeError, ProbeResult};
use crate::screens::{BrandedDetails, GenericDetails, RegistrationDetails};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const FASHION_TILES: &[&str] = &[
    "Transactions",
    "Checkout",
    "Connect",
    "Products",
    "Shop",
    "Message",
    "Settings",
];

const SANTANDER_TILES: &[&str] = &[
    "Transactions",
    "Checkout",
    "Connect",
    "Point of Sale",
    "Settings",
];

/// Registration variant with its own details form and dashboard contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flavor {
    /// Generic commerce flow
    Fashion,
    /// Partner-branded flow
    Santander,
}

impl Flavor {
    /// Every flavor, in suite order
    pub const ALL: [Self; 2] = [Self::Fashion, Self::Santander];

    /// URL path segment
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Fashion => "fashion",
            Self::Santander => "santander",
        }
    }

    /// Scenario name shown in reports
    #[must_use]
    pub const fn scenario_name(self) -> &'static str {
        match self {
            Self::Fashion => "fashion journey",
            Self::Santander => "santander journey",
        }
    }

    /// Partner-branded flavors use the branded details form
    #[must_use]
    pub const fn is_branded(self) -> bool {
        matches!(self, Self::Santander)
    }

    /// Registration URL for this flavor under `base_url`
    #[must_use]
    pub fn url(self, base_url: &str) -> String {
        if base_url.ends_with('/') {
            format!("{base_url}{}", self.slug())
        } else {
            format!("{base_url}/{}", self.slug())
        }
    }

    /// Tiles the dashboard must show once onboarding completes
    #[must_use]
    pub const fn expected_tiles(self) -> &'static [&'static str] {
        match self {
            Self::Fashion => FASHION_TILES,
            Self::Santander => SANTANDER_TILES,
        }
    }

    /// How many times the dashboard call-to-action is activated.
    ///
    /// The branded dashboard shows the welcome screen twice.
    #[must_use]
    pub const fn get_started_activations(self) -> usize {
        match self {
            Self::Fashion => 1,
            Self::Santander => 2,
        }
    }

    /// Literal inputs used when no override is configured
    #[must_use]
    pub fn default_data(self) -> JourneyData {
        let (email, vat_id) = match self {
            Self::Fashion => ("saurav222@gmail.com", None),
            Self::Santander => ("saurav223@gmail.com", Some("GB999999975".to_string())),
        };
        JourneyData {
            registration: RegistrationDetails::new("Saurav", "Kumar", email, "Jxcvbnmlk@1"),
            business: BusinessData {
                name: "TestQA".to_string(),
                phone_number: "1234567890".to_string(),
                vat_id,
            },
            expected_tiles: None,
        }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Flavor {
    type Err = ProbeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fashion" => Ok(Self::Fashion),
            "santander" => Ok(Self::Santander),
            other => Err(ProbeError::config(format!(
                "unknown flavor '{other}' (expected fashion or santander)"
            ))),
        }
    }
}

/// Business details shared by both details forms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessData {
    /// Business name
    pub name: String,
    /// Phone number
    pub phone_number: String,
    /// VAT id, required by branded flavors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat_id: Option<String>,
}

/// Literal inputs of one journey
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JourneyData {
    /// Registration form values
    pub registration: RegistrationDetails,
    /// Details form values
    pub business: BusinessData,
    /// Tiles to assert; the flavor's defaults when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_tiles: Option<Vec<String>>,
}

impl JourneyData {
    /// Check the data fits `flavor`
    pub fn validate(&self, flavor: Flavor) -> ProbeResult<()> {
        if flavor.is_branded() && self.business.vat_id.is_none() {
            return Err(ProbeError::config(format!(
                "{flavor} journey needs business.vat_id"
            )));
        }
        if self.expected_tiles.as_ref().is_some_and(Vec::is_empty) {
            return Err(ProbeError::config(format!(
                "{flavor} journey lists no expected tiles"
            )));
        }
        Ok(())
    }

    /// Tiles to assert for `flavor`
    #[must_use]
    pub fn tiles_for(&self, flavor: Flavor) -> Vec<String> {
        self.expected_tiles.clone().unwrap_or_else(|| {
            flavor
                .expected_tiles()
                .iter()
                .map(|t| (*t).to_string())
                .collect()
        })
    }

    /// Values for the generic details form
    #[must_use]
    pub fn generic_details(&self) -> GenericDetails {
        GenericDetails {
            name: self.business.name.clone(),
            phone_number: self.business.phone_number.clone(),
        }
    }

    /// Values for the branded details form; `None` without a VAT id
    #[must_use]
    pub fn branded_details(&self) -> Option<BrandedDetails> {
        self.business.vat_id.as_ref().map(|vat_id| BrandedDetails {
            name: self.business.name.clone(),
            phone_number: self.business.phone_number.clone(),
            vat_id: vat_id.clone(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_url_join() {
        assert_eq!(
            Flavor::Fashion.url("https://commerceos.example/registration/"),
            "https://commerceos.example/registration/fashion"
        );
        assert_eq!(
            Flavor::Santander.url("https://commerceos.example/registration"),
            "https://commerceos.example/registration/santander"
        );
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Fashion".parse::<Flavor>().unwrap(), Flavor::Fashion);
        assert_eq!(" santander ".parse::<Flavor>().unwrap(), Flavor::Santander);
        assert!("retail".parse::<Flavor>().is_err());
    }

    #[test]
    fn test_expected_tiles() {
        assert_eq!(Flavor::Fashion.expected_tiles().len(), 7);
        assert!(Flavor::Santander.expected_tiles().contains(&"Point of Sale"));
        assert!(!Flavor::Fashion.expected_tiles().contains(&"Point of Sale"));
    }

    #[test]
    fn test_activations() {
        assert_eq!(Flavor::Fashion.get_started_activations(), 1);
        assert_eq!(Flavor::Santander.get_started_activations(), 2);
    }

    #[test]
    fn test_default_data() {
        let fashion = Flavor::Fashion.default_data();
        assert_eq!(fashion.registration.email, "saurav222@gmail.com");
        assert!(fashion.business.vat_id.is_none());
        assert!(fashion.validate(Flavor::Fashion).is_ok());

        let santander = Flavor::Santander.default_data();
        assert_eq!(santander.registration.email, "saurav223@gmail.com");
        assert_eq!(
            santander.branded_details().unwrap().vat_id,
            "GB999999975"
        );
        assert!(santander.validate(Flavor::Santander).is_ok());
    }

    #[test]
    fn test_branded_requires_vat() {
        let data = Flavor::Fashion.default_data();
        assert!(data.validate(Flavor::Santander).is_err());
    }

    #[test]
    fn test_empty_tile_override_rejected() {
        let mut data = Flavor::Fashion.default_data();
        data.expected_tiles = Some(vec![]);
        assert!(data.validate(Flavor::Fashion).is_err());
    }

    #[test]
    fn test_tiles_override() {
        let mut data = Flavor::Fashion.default_data();
        assert_eq!(data.tiles_for(Flavor::Fashion).len(), 7);
        data.expected_tiles = Some(vec!["Shop".to_string()]);
        assert_eq!(data.tiles_for(Flavor::Fashion), vec!["Shop".to_string()]);
    }

    #[test]
    fn test_yaml_roundtrip_without_optionals() {
        let yaml = "registration:\n  first_name: A\n  last_name: B\n  email: a@b.c\n  password: p\n  confirm_password: p\nbusiness:\n  name: N\n  phone_number: '1'\n";
        let data: JourneyData = serde_yaml_ng::from_str(yaml).unwrap();
        assert!(data.business.vat_id.is_none());
        assert!(data.expected_tiles.is_none());
    }
}
