//! Domain layer: money, configuration, request and response documents, and the
//! port to the payment SDK.

pub mod config;
pub mod money;
pub mod outcome;
pub mod ports;
pub mod request;
pub mod response;
