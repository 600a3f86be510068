//! Order status and fulfillment-type enums.

use serde::{Deserialize, Serialize};

/// Backend order status.
///
/// The order service reports exactly these five workflow stages, in this
/// order. Anything else on the wire is treated as unknown and has no
/// outgoing workflow step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pagado,
    Cocina,
    Empaquetamiento,
    Delivery,
    Entregado,
}

impl OrderStatus {
    /// All statuses in workflow order.
    pub const ALL: [Self; 5] = [
        Self::Pagado,
        Self::Cocina,
        Self::Empaquetamiento,
        Self::Delivery,
        Self::Entregado,
    ];

    /// Parse a backend status token, case-insensitively.
    ///
    /// Returns `None` for anything outside the five known stages.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_uppercase().as_str() {
            "PAGADO" => Some(Self::Pagado),
            "COCINA" => Some(Self::Cocina),
            "EMPAQUETAMIENTO" => Some(Self::Empaquetamiento),
            "DELIVERY" => Some(Self::Delivery),
            "ENTREGADO" => Some(Self::Entregado),
            _ => None,
        }
    }

    /// Wire token for this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pagado => "PAGADO",
            Self::Cocina => "COCINA",
            Self::Empaquetamiento => "EMPAQUETAMIENTO",
            Self::Delivery => "DELIVERY",
            Self::Entregado => "ENTREGADO",
        }
    }

    /// Estimated time shown to the employee for an order in this stage.
    #[must_use]
    pub const fn estimated_time(self) -> &'static str {
        match self {
            Self::Pagado => "30-45 min",
            Self::Cocina => "15-20 min",
            Self::Empaquetamiento => "10-15 min",
            Self::Delivery => "En camino",
            Self::Entregado => "Entregado",
        }
    }

    /// Whether the workflow has no further steps from this stage.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Entregado)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How an order reaches the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DeliveryType {
    Delivery,
    #[default]
    Pickup,
}

impl DeliveryType {
    /// Display label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Delivery => "Delivery",
            Self::Pickup => "Pickup",
        }
    }
}

impl std::fmt::Display for DeliveryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(OrderStatus::parse("cocina"), Some(OrderStatus::Cocina));
        assert_eq!(OrderStatus::parse("COCINA"), Some(OrderStatus::Cocina));
        assert_eq!(OrderStatus::parse("Empaquetamiento"), Some(OrderStatus::Empaquetamiento));
    }

    #[test]
    fn test_parse_rejects_unknown_tokens() {
        assert_eq!(OrderStatus::parse("bogus"), None);
        assert_eq!(OrderStatus::parse(""), None);
    }

    #[test]
    fn test_workflow_order() {
        let mut sorted = OrderStatus::ALL;
        sorted.sort();
        assert_eq!(sorted, OrderStatus::ALL);
        assert!(OrderStatus::Pagado < OrderStatus::Entregado);
    }

    #[test]
    fn test_only_entregado_is_terminal() {
        for status in OrderStatus::ALL {
            assert_eq!(status.is_terminal(), status == OrderStatus::Entregado);
        }
    }

    #[test]
    fn test_serde_uses_wire_tokens() {
        let json = serde_json::to_string(&OrderStatus::Empaquetamiento).expect("serialize");
        assert_eq!(json, "\"EMPAQUETAMIENTO\"");
    }
}
