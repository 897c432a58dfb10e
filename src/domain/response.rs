//! Validation of the payment data returned by the payment sheet.
//!
//! These functions only read the document. Reporting what they find is left
//! to the caller.

use crate::error::{PaymentError, Result};
use serde::Serialize;
use serde_json::Value;

/// Token type reported for gateway tokenization.
pub const PAYMENT_GATEWAY: &str = "PAYMENT_GATEWAY";

/// Token returned when the gateway is still the unconfigured sample gateway.
pub const PLACEHOLDER_TOKEN: &str = "examplePaymentMethodToken";

/// The opaque payment credential and how it was tokenized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentToken {
    pub token_type: String,
    pub token: String,
}

impl PaymentToken {
    pub fn is_placeholder_gateway(&self) -> bool {
        is_placeholder_gateway(&self.token_type, &self.token)
    }
}

/// Everything the checkout needs from a successful response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSummary {
    pub billing_name: String,
    #[serde(flatten)]
    pub token: PaymentToken,
    pub placeholder_gateway: bool,
}

/// Parses the raw response text.
pub fn parse_response(text: &str) -> Result<Value> {
    serde_json::from_str(text)
        .map_err(|e| PaymentError::MalformedResponse(format!("invalid JSON: {e}")))
}

pub fn extract_token(doc: &Value) -> Result<PaymentToken> {
    let tokenization = object_at(doc, &["paymentMethodData", "tokenizationData"])?;
    Ok(PaymentToken {
        token_type: string_at(tokenization, "paymentMethodData.tokenizationData", "type")?,
        token: string_at(tokenization, "paymentMethodData.tokenizationData", "token")?,
    })
}

pub fn extract_billing_name(doc: &Value) -> Result<String> {
    let address = object_at(doc, &["paymentMethodData", "info", "billingAddress"])?;
    string_at(address, "paymentMethodData.info.billingAddress", "name")
}

/// True when the response came from the unconfigured sample gateway.
///
/// This is a warning for the integrator, not a failure: the sheet completed,
/// but no real payment method was tokenized.
pub fn is_placeholder_gateway(token_type: &str, token: &str) -> bool {
    token_type == PAYMENT_GATEWAY && token == PLACEHOLDER_TOKEN
}

pub fn summarize(doc: &Value) -> Result<PaymentSummary> {
    let token = extract_token(doc)?;
    let billing_name = extract_billing_name(doc)?;
    Ok(PaymentSummary {
        billing_name,
        placeholder_gateway: token.is_placeholder_gateway(),
        token,
    })
}

fn object_at<'a>(doc: &'a Value, path: &[&str]) -> Result<&'a Value> {
    let mut current = doc;
    for (depth, key) in path.iter().enumerate() {
        current = current
            .as_object()
            .and_then(|object| object.get(*key))
            .filter(|value| value.is_object())
            .ok_or_else(|| {
                PaymentError::MalformedResponse(format!(
                    "missing object `{}`",
                    path[..=depth].join(".")
                ))
            })?;
    }
    Ok(current)
}

fn string_at(object: &Value, parent: &str, key: &str) -> Result<String> {
    object
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| PaymentError::MalformedResponse(format!("missing string `{parent}.{key}`")))
}
