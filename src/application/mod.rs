//! Application layer driving the checkout flow.
//!
//! `CheckoutSession` ties the request builder, the payment SDK port and the
//! response validator together, and is where results are logged.

pub mod checkout;
