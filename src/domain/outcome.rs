use serde_json::Value;

/// Status code for a request the SDK rejects as malformed.
pub const DEVELOPER_ERROR: i32 = 10;

/// Status code for an internal SDK failure.
pub const INTERNAL_ERROR: i32 = 8;

/// Result of the availability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailabilityOutcome {
    Answered(bool),
    Failed { status_code: i32 },
}

impl AvailabilityOutcome {
    /// A failed check means the pay option is not offered.
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Answered(true))
    }
}

/// Result of showing the payment sheet. Exactly one is delivered per request.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentOutcome {
    /// The payer approved. The document still has to be validated.
    Completed(Value),
    /// The payer closed the sheet without choosing a payment method.
    Cancelled,
    Failed { status_code: i32 },
}
