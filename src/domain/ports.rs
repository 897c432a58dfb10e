use super::outcome::{AvailabilityOutcome, PaymentOutcome};
use async_trait::async_trait;
use serde_json::Value;

/// The seam to the payment SDK.
///
/// Both calls receive a finished request document and resolve exactly once.
#[async_trait]
pub trait PaymentsClient: Send + Sync {
    async fn is_ready_to_pay(&self, request: Value) -> AvailabilityOutcome;
    async fn load_payment_data(&self, request: Value) -> PaymentOutcome;
}

pub type PaymentsClientBox = Box<dyn PaymentsClient>;
