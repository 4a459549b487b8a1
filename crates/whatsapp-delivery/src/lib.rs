//! Outbound WhatsApp message delivery.
//!
//! Thin client over the WhatsApp message API: serializes the text payload,
//! attaches the bearer token, and classifies failures. Callers treat
//! delivery failures as log-and-continue; an undeliverable reply must not
//! fail the inbound webhook request.

mod client;
mod config;
mod error;

pub use client::WhatsAppClient;
pub use config::DeliveryConfig;
pub use error::DeliveryError;
