use crate::domain::config::EXAMPLE_GATEWAY;
use crate::domain::outcome::{AvailabilityOutcome, DEVELOPER_ERROR, INTERNAL_ERROR, PaymentOutcome};
use crate::domain::ports::PaymentsClient;
use crate::domain::request::API_VERSION;
use crate::domain::response::PLACEHOLDER_TOKEN;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::time::Duration;
use tokio::sync::oneshot;

/// What the simulated payer does once the sheet is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetBehavior {
    Approve { billing_name: String },
    Cancel,
    Fail { status_code: i32 },
}

impl Default for SheetBehavior {
    fn default() -> Self {
        Self::Approve {
            billing_name: "Jane Doe".to_string(),
        }
    }
}

/// An in-process stand-in for the payment SDK in the `TEST` environment.
///
/// Requests are checked the way the SDK checks them, and each answer is
/// delivered once from a spawned task through a oneshot channel, mirroring
/// the SDK's completion callback.
#[derive(Debug, Clone)]
pub struct SandboxPaymentsClient {
    ready_to_pay: bool,
    behavior: SheetBehavior,
    latency: Duration,
}

impl Default for SandboxPaymentsClient {
    fn default() -> Self {
        Self {
            ready_to_pay: true,
            behavior: SheetBehavior::default(),
            latency: Duration::ZERO,
        }
    }
}

impl SandboxPaymentsClient {
    pub fn new(behavior: SheetBehavior) -> Self {
        Self {
            behavior,
            ..Self::default()
        }
    }

    pub fn with_ready_to_pay(mut self, ready_to_pay: bool) -> Self {
        self.ready_to_pay = ready_to_pay;
        self
    }

    /// Delays every answer, as a payer taking time in the sheet would.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn deliver<T, F>(&self, answer: F) -> Option<T>
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let latency = self.latency;
        tokio::spawn(async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            // The receiver may be gone if the caller stopped waiting.
            let _ = tx.send(answer());
        });
        rx.await.ok()
    }
}

#[async_trait]
impl PaymentsClient for SandboxPaymentsClient {
    async fn is_ready_to_pay(&self, request: Value) -> AvailabilityOutcome {
        let ready_to_pay = self.ready_to_pay;
        self.deliver(move || match card_method(&request) {
            Some(_) => AvailabilityOutcome::Answered(ready_to_pay),
            None => AvailabilityOutcome::Failed {
                status_code: DEVELOPER_ERROR,
            },
        })
        .await
        .unwrap_or(AvailabilityOutcome::Failed {
            status_code: INTERNAL_ERROR,
        })
    }

    async fn load_payment_data(&self, request: Value) -> PaymentOutcome {
        let behavior = self.behavior.clone();
        self.deliver(move || respond(&request, &behavior))
            .await
            .unwrap_or(PaymentOutcome::Failed {
                status_code: INTERNAL_ERROR,
            })
    }
}

fn card_method(request: &Value) -> Option<&Value> {
    if request.get("apiVersion").and_then(Value::as_u64) != Some(u64::from(API_VERSION)) {
        return None;
    }
    request
        .get("allowedPaymentMethods")?
        .as_array()?
        .first()
        .filter(|method| method["type"] == "CARD")
}

fn respond(request: &Value, behavior: &SheetBehavior) -> PaymentOutcome {
    let developer_error = PaymentOutcome::Failed {
        status_code: DEVELOPER_ERROR,
    };
    let Some(method) = card_method(request) else {
        return developer_error;
    };
    let Some(tokenization) = method.get("tokenizationSpecification") else {
        return developer_error;
    };
    if !request["transactionInfo"]["totalPrice"].is_string() {
        return developer_error;
    }

    let billing_name = match behavior {
        SheetBehavior::Cancel => return PaymentOutcome::Cancelled,
        SheetBehavior::Fail { status_code } => {
            return PaymentOutcome::Failed {
                status_code: *status_code,
            };
        }
        SheetBehavior::Approve { billing_name } => billing_name,
    };

    let params = &tokenization["parameters"];
    let token = match tokenization["type"].as_str() {
        Some("PAYMENT_GATEWAY") if params["gateway"] == EXAMPLE_GATEWAY => {
            PLACEHOLDER_TOKEN.to_string()
        }
        Some("PAYMENT_GATEWAY") => json!({
            "gateway": params["gateway"],
            "gatewayMerchantId": params["gatewayMerchantId"],
            "totalPrice": request["transactionInfo"]["totalPrice"],
        })
        .to_string(),
        Some("DIRECT") => json!({
            "protocolVersion": params["protocolVersion"],
            "signedMessage": "sandbox",
        })
        .to_string(),
        _ => return developer_error,
    };

    let network = method["parameters"]["allowedCardNetworks"][0]
        .as_str()
        .unwrap_or("VISA");
    let country_code = request["transactionInfo"]["countryCode"].clone();

    let mut response = json!({
        "apiVersion": 2,
        "apiVersionMinor": 0,
        "paymentMethodData": {
            "type": "CARD",
            "description": format!("{network} •••• 1111"),
            "info": {
                "cardNetwork": network,
                "cardDetails": "1111",
                "billingAddress": {
                    "name": billing_name,
                    "countryCode": country_code,
                }
            },
            "tokenizationData": {
                "type": tokenization["type"],
                "token": token,
            }
        }
    });
    if request["shippingAddressRequired"] == true {
        response["shippingAddress"] = json!({
            "name": billing_name,
            "countryCode": request["shippingAddressParameters"]["allowedCountryCodes"][0],
        });
    }

    PaymentOutcome::Completed(response)
}
