//! Order Domain Models
//!
//! Read-only snapshots fetched from the external order service. The core
//! never mutates an order; only its `estado` and payment state change over
//! the order's external lifecycle.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CartError;

// =============================================================================
// Status Enumeration
// =============================================================================

/// Lifecycle states of a persisted order, in wire form (`estado`).
///
/// `entregado` and `cancelado` are terminal; `cancelado` is reachable from
/// any non-terminal state. Transitions are driven entirely by the order
/// service; this core only classifies a given state for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    PendientePago,
    Confirmado,
    Procesando,
    Enviado,
    EnTransito,
    EnReparto,
    Entregado,
    Cancelado,
}

impl OrderStatus {
    /// Strict parse of the wire value. Rendering paths prefer
    /// [`crate::order::status::resolve_status`], which falls back instead
    /// of failing.
    pub fn parse(raw: &str) -> Result<Self, CartError> {
        match raw {
            "pendiente_pago" => Ok(Self::PendientePago),
            "confirmado" => Ok(Self::Confirmado),
            "procesando" => Ok(Self::Procesando),
            "enviado" => Ok(Self::Enviado),
            "en_transito" => Ok(Self::EnTransito),
            "en_reparto" => Ok(Self::EnReparto),
            "entregado" => Ok(Self::Entregado),
            "cancelado" => Ok(Self::Cancelado),
            other => Err(CartError::UnknownStatus(other.to_string())),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Entregado | Self::Cancelado)
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// Payment rail chosen at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentKind {
    Yape,
    ContraEntrega,
    Transferencia,
    Pasarela,
}

/// External state of the payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentState {
    Pendiente,
    Confirmado,
    Fallido,
}

/// Payment method and its current state, as persisted on the order
/// (`metodoPago`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub tipo: PaymentKind,
    pub estado: PaymentState,
}

// =============================================================================
// Order Snapshot
// =============================================================================

/// One purchased line as persisted on the order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub nombre: String,

    /// Variant descriptor, e.g. `"Azul / M"`.
    pub variante: String,

    pub cantidad: u32,
    pub precio_unitario: Decimal,
    pub total_linea: Decimal,
}

/// Immutable, server-computed record of a completed checkout.
///
/// `estado` stays a raw string here: the order service may introduce states
/// this build does not know, and rendering degrades gracefully instead of
/// failing deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderSnapshot {
    pub id: String,
    pub estado: String,
    pub metodo_pago: PaymentMethod,
    pub items: Vec<OrderItem>,
    pub subtotal: Decimal,
    pub descuentos: Decimal,
    pub costo_envio: Decimal,
    pub total: Decimal,
}

impl OrderSnapshot {
    /// Render-time sanity check of the server-computed totals:
    /// `total == subtotal - descuentos + costo_envio`. The order remains
    /// server truth either way; a mismatch is only logged.
    pub fn totals_consistent(&self) -> bool {
        self.total == self.subtotal - self.descuentos + self.costo_envio
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_every_known_status() {
        for (raw, status) in [
            ("pendiente_pago", OrderStatus::PendientePago),
            ("confirmado", OrderStatus::Confirmado),
            ("procesando", OrderStatus::Procesando),
            ("enviado", OrderStatus::Enviado),
            ("en_transito", OrderStatus::EnTransito),
            ("en_reparto", OrderStatus::EnReparto),
            ("entregado", OrderStatus::Entregado),
            ("cancelado", OrderStatus::Cancelado),
        ] {
            assert_eq!(OrderStatus::parse(raw).unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_is_a_strict_parse_error() {
        assert!(matches!(
            OrderStatus::parse("bogus_status"),
            Err(CartError::UnknownStatus(_))
        ));
    }

    #[test]
    fn only_entregado_and_cancelado_are_terminal() {
        assert!(OrderStatus::Entregado.is_terminal());
        assert!(OrderStatus::Cancelado.is_terminal());
        assert!(!OrderStatus::EnReparto.is_terminal());
        assert!(!OrderStatus::PendientePago.is_terminal());
    }

    #[test]
    fn snapshot_deserializes_from_api_shape() {
        let raw = serde_json::json!({
            "id": "ord-123",
            "estado": "pendiente_pago",
            "metodoPago": { "tipo": "yape", "estado": "pendiente" },
            "items": [{
                "nombre": "Polera Azul",
                "variante": "Azul / M",
                "cantidad": 2,
                "precioUnitario": "59.90",
                "totalLinea": "119.80"
            }],
            "subtotal": "119.80",
            "descuentos": "0",
            "costoEnvio": "10",
            "total": "129.80"
        });

        let order: OrderSnapshot = serde_json::from_value(raw).unwrap();
        assert_eq!(order.metodo_pago.tipo, PaymentKind::Yape);
        assert_eq!(order.metodo_pago.estado, PaymentState::Pendiente);
        assert_eq!(order.items[0].cantidad, 2);
        assert!(order.totals_consistent());
    }

    #[test]
    fn totals_mismatch_is_detected() {
        let order = OrderSnapshot {
            id: "ord-1".into(),
            estado: "confirmado".into(),
            metodo_pago: PaymentMethod {
                tipo: PaymentKind::Pasarela,
                estado: PaymentState::Confirmado,
            },
            items: vec![],
            subtotal: dec!(100),
            descuentos: dec!(10),
            costo_envio: dec!(10),
            total: dec!(105),
        };
        assert!(!order.totals_consistent());
    }
}
