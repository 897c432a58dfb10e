//! Adapters between files/streams and the domain types.

pub mod json;
