use crate::domain::config::PaymentConfiguration;
use crate::domain::money::Money;
use crate::domain::outcome::{AvailabilityOutcome, PaymentOutcome};
use crate::domain::ports::PaymentsClientBox;
use crate::domain::request::{Document, RequestBuilder};
use crate::domain::response::{self, PaymentSummary};
use crate::error::{PaymentError, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error, info, warn};

/// How a payment request ended, when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutResult {
    Paid(PaymentSummary),
    /// The payer closed the sheet. Nothing to do.
    Cancelled,
}

/// A checkout screen's view of the payment SDK.
///
/// At most one payment request is outstanding at a time, like the pay button
/// that stays disabled until the sheet returns.
pub struct CheckoutSession {
    config: PaymentConfiguration,
    client: PaymentsClientBox,
    in_flight: AtomicBool,
}

impl CheckoutSession {
    /// Creates a session after validating `config`.
    pub fn new(config: PaymentConfiguration, client: PaymentsClientBox) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            client,
            in_flight: AtomicBool::new(false),
        })
    }

    /// Whether the pay option should be offered.
    ///
    /// A failed check is logged and reported as unavailable.
    pub async fn check_availability(&self) -> Result<bool> {
        let request = RequestBuilder::new(&self.config)
            .availability_request()
            .to_document()?;

        let outcome = self.client.is_ready_to_pay(request).await;
        match outcome {
            AvailabilityOutcome::Answered(true) => debug!("pay option available"),
            AvailabilityOutcome::Answered(false) => info!("pay option unavailable on this device"),
            AvailabilityOutcome::Failed { status_code } => {
                warn!(status_code, "availability check failed")
            }
        }
        Ok(outcome.is_available())
    }

    /// Charges the product price plus shipping.
    pub async fn checkout(
        &self,
        product_price: Money,
        shipping_cost: Money,
    ) -> Result<CheckoutResult> {
        let total = product_price.checked_add(shipping_cost).ok_or_else(|| {
            PaymentError::InvalidAmount(format!("{product_price} + {shipping_cost} overflows"))
        })?;
        self.request_payment(total).await
    }

    /// Shows the payment sheet for `price`, which must include shipping and
    /// taxes, and validates what comes back.
    pub async fn request_payment(&self, price: Money) -> Result<CheckoutResult> {
        let _guard = InFlightGuard::acquire(&self.in_flight)?;

        let request = RequestBuilder::new(&self.config)
            .payment_data_request(price)
            .to_document()?;
        debug!(total_price = %price, "requesting payment data");

        match self.client.load_payment_data(request).await {
            PaymentOutcome::Completed(doc) => {
                let summary = response::summarize(&doc)
                    .inspect_err(|e| error!(error = %e, "unusable payment data"))?;

                if summary.placeholder_gateway {
                    warn!(
                        gateway = %self.config.gateway_name,
                        "gateway is still the sample gateway, configure your own before taking payments"
                    );
                }
                info!(billing_name = %summary.billing_name, "payment data received");
                debug!(
                    token_type = %summary.token.token_type,
                    token = %summary.token.token,
                    "payment token"
                );

                Ok(CheckoutResult::Paid(summary))
            }
            PaymentOutcome::Cancelled => {
                debug!("payment sheet cancelled");
                Ok(CheckoutResult::Cancelled)
            }
            PaymentOutcome::Failed { status_code } => {
                warn!(status_code, "loading payment data failed");
                Err(PaymentError::PaymentFailed { status_code })
            }
        }
    }
}

/// Holds the session's in-flight flag until dropped.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self> {
        if flag.swap(true, Ordering::AcqRel) {
            return Err(PaymentError::RequestInFlight);
        }
        Ok(Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
