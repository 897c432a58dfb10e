use crate::error::{PaymentError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Literal public key shipped with the sample settings. A direct integration
/// using it has not been configured yet.
pub const PLACEHOLDER_PUBLIC_KEY: &str = "REPLACE_ME";

/// Gateway name shipped with the sample settings.
pub const EXAMPLE_GATEWAY: &str = "example";

/// Environment the payment sheet runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Environment {
    #[default]
    Test,
    Production,
}

/// Settings for `DIRECT` tokenization, where the merchant decrypts the
/// payment data on its own servers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DirectTokenization {
    pub protocol_version: String,
    pub public_key: String,
}

impl Default for DirectTokenization {
    fn default() -> Self {
        Self {
            protocol_version: "ECv1".to_string(),
            public_key: PLACEHOLDER_PUBLIC_KEY.to_string(),
        }
    }
}

/// Deployment settings for the payment integration.
///
/// The value is immutable once built and is passed explicitly to every
/// builder, so several configurations can coexist in one process.
/// `Default` yields the sample settings, which work against the `TEST`
/// environment only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentConfiguration {
    pub environment: Environment,
    /// ISO 4217 currency code.
    pub currency_code: String,
    /// ISO 3166-1 alpha-2 country code of the merchant.
    pub country_code: String,
    pub merchant_name: String,
    /// Card networks offered in the sheet, in display order.
    pub card_networks: Vec<String>,
    /// `PAN_ONLY` and/or `CRYPTOGRAM_3DS`.
    pub auth_methods: Vec<String>,
    /// Countries a shipping address may be located in.
    pub shipping_countries: Vec<String>,
    pub shipping_address_required: bool,
    pub gateway_name: String,
    /// Gateway-specific parameters, passed through verbatim.
    pub gateway_parameters: BTreeMap<String, String>,
    pub direct_tokenization: DirectTokenization,
}

impl Default for PaymentConfiguration {
    fn default() -> Self {
        Self {
            environment: Environment::Test,
            currency_code: "USD".to_string(),
            country_code: "US".to_string(),
            merchant_name: "Example Merchant".to_string(),
            card_networks: strings(&["AMEX", "DISCOVER", "JCB", "MASTERCARD", "VISA"]),
            auth_methods: strings(&["PAN_ONLY", "CRYPTOGRAM_3DS"]),
            shipping_countries: strings(&["US", "GB"]),
            shipping_address_required: true,
            gateway_name: EXAMPLE_GATEWAY.to_string(),
            gateway_parameters: BTreeMap::from([
                ("gateway".to_string(), EXAMPLE_GATEWAY.to_string()),
                (
                    "gatewayMerchantId".to_string(),
                    "exampleGatewayMerchantId".to_string(),
                ),
            ]),
            direct_tokenization: DirectTokenization::default(),
        }
    }
}

impl PaymentConfiguration {
    /// Checks the settings a functioning integration depends on.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("currencyCode", self.currency_code.is_empty()),
            ("countryCode", self.country_code.is_empty()),
            ("merchantName", self.merchant_name.is_empty()),
            ("cardNetworks", self.card_networks.is_empty()),
            ("authMethods", self.auth_methods.is_empty()),
            ("gatewayName", self.gateway_name.is_empty()),
        ];
        if let Some((field, _)) = required.iter().find(|(_, empty)| *empty) {
            return Err(PaymentError::Configuration(format!("{field} must not be empty")));
        }

        if self.shipping_address_required && self.shipping_countries.is_empty() {
            return Err(PaymentError::Configuration(
                "shippingCountries must not be empty when a shipping address is required"
                    .to_string(),
            ));
        }

        match self.gateway_parameters.get("gateway") {
            Some(gateway) if *gateway == self.gateway_name => {}
            Some(gateway) => {
                return Err(PaymentError::Configuration(format!(
                    "gateway parameter `{gateway}` does not match gateway name `{}`",
                    self.gateway_name
                )));
            }
            None => {
                return Err(PaymentError::Configuration(
                    "gatewayParameters must contain `gateway`".to_string(),
                ));
            }
        }

        // Every gateway needs at least one merchant identifier besides its name.
        if self.gateway_parameters.len() < 2 {
            return Err(PaymentError::Configuration(format!(
                "gatewayParameters for `{}` must identify the merchant",
                self.gateway_name
            )));
        }

        if self.environment == Environment::Production && self.gateway_name == EXAMPLE_GATEWAY {
            return Err(PaymentError::Configuration(
                "the example gateway only works in the TEST environment".to_string(),
            ));
        }

        Ok(())
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_configuration_is_valid() {
        let config = PaymentConfiguration::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.gateway_name, EXAMPLE_GATEWAY);
        assert_eq!(config.environment, Environment::Test);
    }

    #[test]
    fn test_empty_networks_rejected() {
        let config = PaymentConfiguration {
            card_networks: vec![],
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PaymentError::Configuration(msg)) if msg.contains("cardNetworks")
        ));
    }

    #[test]
    fn test_shipping_countries_only_needed_with_shipping() {
        let mut config = PaymentConfiguration {
            shipping_countries: vec![],
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config.shipping_address_required = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_gateway_parameters_must_name_gateway() {
        let mut config = PaymentConfiguration::default();
        config.gateway_parameters.remove("gateway");
        assert!(matches!(
            config.validate(),
            Err(PaymentError::Configuration(_))
        ));

        let mut config = PaymentConfiguration::default();
        config
            .gateway_parameters
            .insert("gateway".to_string(), "stripe".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_gateway_parameters_must_identify_merchant() {
        let mut config = PaymentConfiguration::default();
        config.gateway_parameters.remove("gatewayMerchantId");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_example_gateway_not_allowed_in_production() {
        let config = PaymentConfiguration {
            environment: Environment::Production,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PaymentError::Configuration(msg)) if msg.contains("TEST")
        ));
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let json = r#"{"currencyCode": "EUR", "environment": "PRODUCTION"}"#;
        let config: PaymentConfiguration = serde_json::from_str(json).unwrap();
        assert_eq!(config.currency_code, "EUR");
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.card_networks.len(), 5);
    }
}
