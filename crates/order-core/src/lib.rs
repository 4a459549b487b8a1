//! Core types and the upstream-lookup seam for the order-tracking bot.
//!
//! This crate provides the shared vocabulary for the rest of the workspace:
//!
//! - [`TrackingCode`] / [`UserIdentity`] - validated input identifiers
//! - [`OrderStatus`] / [`OrderStatusResult`] - the order-status data model
//! - [`OrderLookup`] - the trait the upstream client implements and the
//!   dispatcher consumes
//! - [`LookupError`] - the lookup failure taxonomy
//!
//! # Example
//!
//! ```rust
//! use order_core::{async_trait, LookupError, OrderLookup, OrderStatus, OrderStatusResult, TrackingCode};
//!
//! struct FixedLookup;
//!
//! #[async_trait]
//! impl OrderLookup for FixedLookup {
//!     async fn fetch_status(&self, code: &TrackingCode) -> Result<OrderStatusResult, LookupError> {
//!         Ok(OrderStatusResult::new(code.clone(), OrderStatus::Shipped, "Libro"))
//!     }
//!
//!     fn name(&self) -> &str {
//!         "FixedLookup"
//!     }
//! }
//! ```

mod identity;
mod lookup;
mod status;
mod tracking;

pub use identity::{cache_key, IdentityError, UserIdentity};
pub use lookup::{LookupError, OrderLookup};
pub use status::{OrderStatus, OrderStatusResult};
pub use tracking::{CodeFormatError, TrackingCode, MAX_CODE_LEN};

// Re-export async_trait for convenience
pub use async_trait::async_trait;
