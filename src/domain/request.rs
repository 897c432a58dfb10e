//! Request documents for the payment sheet API.
//!
//! Every document is a plain serde value built fresh from a
//! [`PaymentConfiguration`]. Key names and nesting follow the vendor's
//! published schema and must not change.

use super::config::{PLACEHOLDER_PUBLIC_KEY, PaymentConfiguration};
use super::money::Money;
use crate::error::{PaymentError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

pub const API_VERSION: u8 = 2;
pub const API_VERSION_MINOR: u8 = 0;

/// Conversion of a request value into the JSON handed to the SDK.
pub trait Document: Serialize {
    fn to_document(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(PaymentError::from)
    }

    fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(PaymentError::from)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethodType {
    Card,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BillingAddressFormat {
    Min,
    Full,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingAddressParameters {
    pub format: BillingAddressFormat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardParameters {
    pub allowed_auth_methods: Vec<String>,
    pub allowed_card_networks: Vec<String>,
    pub billing_address_required: bool,
    pub billing_address_parameters: BillingAddressParameters,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectParameters {
    pub protocol_version: String,
    pub public_key: String,
}

/// How the payment credentials are tokenized for the merchant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "parameters")]
pub enum TokenizationSpecification {
    /// Token readable by the configured gateway.
    #[serde(rename = "PAYMENT_GATEWAY")]
    PaymentGateway(BTreeMap<String, String>),
    /// Token encrypted for the merchant's own public key.
    #[serde(rename = "DIRECT")]
    Direct(DirectParameters),
}

/// A payment method descriptor; only cards are supported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    #[serde(rename = "type")]
    pub method_type: PaymentMethodType,
    pub parameters: CardParameters,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokenization_specification: Option<TokenizationSpecification>,
}

/// Asks whether the payer can pay with any of the allowed methods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IsReadyToPayRequest {
    pub api_version: u8,
    pub api_version_minor: u8,
    pub allowed_payment_methods: Vec<PaymentMethod>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TotalPriceStatus {
    NotCurrentlyKnown,
    Estimated,
    Final,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInfo {
    pub total_price: String,
    pub total_price_status: TotalPriceStatus,
    pub country_code: String,
    pub currency_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantInfo {
    pub merchant_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddressParameters {
    pub phone_number_required: bool,
    pub allowed_country_codes: Vec<String>,
}

/// The full request that opens the payment sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDataRequest {
    pub api_version: u8,
    pub api_version_minor: u8,
    pub allowed_payment_methods: Vec<PaymentMethod>,
    pub transaction_info: TransactionInfo,
    pub merchant_info: MerchantInfo,
    pub shipping_address_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address_parameters: Option<ShippingAddressParameters>,
}

impl Document for IsReadyToPayRequest {}
impl Document for PaymentMethod {}
impl Document for TokenizationSpecification {}
impl Document for PaymentDataRequest {}

/// Builds request documents from a configuration.
///
/// The builder borrows the configuration and holds no other state; each call
/// returns a new value.
#[derive(Debug, Clone, Copy)]
pub struct RequestBuilder<'a> {
    config: &'a PaymentConfiguration,
}

impl<'a> RequestBuilder<'a> {
    pub fn new(config: &'a PaymentConfiguration) -> Self {
        Self { config }
    }

    /// The request for the availability check.
    pub fn availability_request(&self) -> IsReadyToPayRequest {
        IsReadyToPayRequest {
            api_version: API_VERSION,
            api_version_minor: API_VERSION_MINOR,
            allowed_payment_methods: vec![self.card_method(None)],
        }
    }

    /// Describes the accepted cards. Networks and auth methods keep the
    /// configured order.
    pub fn card_method(&self, tokenization: Option<TokenizationSpecification>) -> PaymentMethod {
        PaymentMethod {
            method_type: PaymentMethodType::Card,
            parameters: CardParameters {
                allowed_auth_methods: self.config.auth_methods.clone(),
                allowed_card_networks: self.config.card_networks.clone(),
                billing_address_required: true,
                billing_address_parameters: BillingAddressParameters {
                    format: BillingAddressFormat::Full,
                },
            },
            tokenization_specification: tokenization,
        }
    }

    pub fn gateway_tokenization(&self) -> TokenizationSpecification {
        TokenizationSpecification::PaymentGateway(self.config.gateway_parameters.clone())
    }

    /// Tokenization for a `DIRECT` integration.
    ///
    /// Fails while the public key is still the placeholder or any direct
    /// parameter is empty.
    pub fn direct_tokenization(&self) -> Result<TokenizationSpecification> {
        let direct = &self.config.direct_tokenization;
        if direct.public_key == PLACEHOLDER_PUBLIC_KEY
            || direct.public_key.is_empty()
            || direct.protocol_version.is_empty()
        {
            return Err(PaymentError::Configuration(
                "direct tokenization needs a protocol version and a public key".to_string(),
            ));
        }

        Ok(TokenizationSpecification::Direct(DirectParameters {
            protocol_version: direct.protocol_version.clone(),
            public_key: direct.public_key.clone(),
        }))
    }

    /// The request that opens the payment sheet for `price`.
    ///
    /// `price` must already include shipping and taxes.
    pub fn payment_data_request(&self, price: Money) -> PaymentDataRequest {
        let shipping_address_parameters =
            self.config
                .shipping_address_required
                .then(|| ShippingAddressParameters {
                    phone_number_required: false,
                    allowed_country_codes: self.config.shipping_countries.clone(),
                });

        PaymentDataRequest {
            api_version: API_VERSION,
            api_version_minor: API_VERSION_MINOR,
            allowed_payment_methods: vec![self.card_method(Some(self.gateway_tokenization()))],
            transaction_info: TransactionInfo {
                total_price: price.to_decimal_string(),
                total_price_status: TotalPriceStatus::Final,
                country_code: self.config.country_code.clone(),
                currency_code: self.config.currency_code.clone(),
            },
            merchant_info: MerchantInfo {
                merchant_name: self.config.merchant_name.clone(),
            },
            shipping_address_required: self.config.shipping_address_required,
            shipping_address_parameters,
        }
    }
}
