use thiserror::Error;

/// Errors raised while building payment requests or reading payment responses.
#[derive(Error, Debug)]
pub enum PaymentError {
    /// Invalid or still-placeholder settings. Request construction must stop.
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// A request document could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// The response document lacks an expected key or has the wrong shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    /// The payment sheet reported an error status.
    #[error("Payment failed with status code {status_code}")]
    PaymentFailed { status_code: i32 },
    /// A payment request is already outstanding for this session.
    #[error("A payment request is already in progress")]
    RequestInFlight,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PaymentError>;
