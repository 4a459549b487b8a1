//! Order-status data model.

use serde::{Deserialize, Serialize};

use crate::tracking::TrackingCode;

/// Enumerated order status.
///
/// Provider status strings are mapped leniently (Spanish and English
/// spellings); anything unrecognized becomes [`OrderStatus::Unknown`]
/// rather than an error, so a provider vocabulary change degrades the
/// reply instead of breaking the lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Shipped,
    Delivered,
    Unknown,
}

impl OrderStatus {
    /// Map a provider status string to an [`OrderStatus`].
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "pendiente" | "pending" | "en preparacion" | "en preparación" => Self::Pending,
            "enviado" | "shipped" | "en camino" | "en transito" | "en tránsito" => Self::Shipped,
            "entregado" | "delivered" => Self::Delivered,
            _ => Self::Unknown,
        }
    }

    /// Emoji shown next to the status in replies.
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Pending => "⏳",
            Self::Shipped => "🚚",
            Self::Delivered => "✅",
            Self::Unknown => "❓",
        }
    }

    /// User-facing status label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pendiente",
            Self::Shipped => "Enviado",
            Self::Delivered => "Entregado",
            Self::Unknown => "Desconocido",
        }
    }
}

/// The result of a successful order-status lookup.
///
/// Immutable once constructed; the cache stores it by value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderStatusResult {
    /// Canonical tracking code.
    pub code: TrackingCode,
    /// Enumerated status.
    pub status: OrderStatus,
    /// Human description of the order contents.
    pub description: String,
    /// Customer name, if the provider reports one.
    pub customer: Option<String>,
    /// Order total, if the provider reports one.
    pub total: Option<String>,
    /// Provider-reported freshness timestamp.
    pub updated_at: Option<String>,
}

impl OrderStatusResult {
    /// Create a result with the required fields.
    pub fn new(code: TrackingCode, status: OrderStatus, description: impl Into<String>) -> Self {
        Self {
            code,
            status,
            description: description.into(),
            customer: None,
            total: None,
            updated_at: None,
        }
    }

    /// Attach the customer name.
    pub fn with_customer(mut self, customer: impl Into<String>) -> Self {
        self.customer = Some(customer.into());
        self
    }

    /// Attach the order total.
    pub fn with_total(mut self, total: impl Into<String>) -> Self {
        self.total = Some(total.into());
        self
    }

    /// Attach the freshness timestamp.
    pub fn with_updated_at(mut self, updated_at: impl Into<String>) -> Self {
        self.updated_at = Some(updated_at.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_spanish_and_english_statuses() {
        assert_eq!(OrderStatus::parse("enviado"), OrderStatus::Shipped);
        assert_eq!(OrderStatus::parse("Shipped"), OrderStatus::Shipped);
        assert_eq!(OrderStatus::parse(" EN CAMINO "), OrderStatus::Shipped);
        assert_eq!(OrderStatus::parse("pendiente"), OrderStatus::Pending);
        assert_eq!(OrderStatus::parse("entregado"), OrderStatus::Delivered);
        assert_eq!(OrderStatus::parse("perdido"), OrderStatus::Unknown);
        assert_eq!(OrderStatus::parse(""), OrderStatus::Unknown);
    }

    #[test]
    fn status_rendering() {
        assert_eq!(OrderStatus::Shipped.emoji(), "🚚");
        assert_eq!(OrderStatus::Shipped.label(), "Enviado");
        assert_eq!(OrderStatus::Unknown.emoji(), "❓");
    }

    #[test]
    fn builder_fields() {
        let code = TrackingCode::parse("PED-123").unwrap();
        let result = OrderStatusResult::new(code, OrderStatus::Delivered, "Libro de Rust")
            .with_customer("Ana")
            .with_total("45.00 USD")
            .with_updated_at("2026-08-01");

        assert_eq!(result.customer.as_deref(), Some("Ana"));
        assert_eq!(result.total.as_deref(), Some("45.00 USD"));
        assert_eq!(result.updated_at.as_deref(), Some("2026-08-01"));
    }
}
