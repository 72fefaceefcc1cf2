//! Order Status Resolver
//!
//! Display-only classification of an order snapshot: each `estado` maps to
//! a canonical label and a visual tone, and the payment method selects
//! which (if any) payment-instruction panel the post-purchase page shows.
//! Pure functions, no side effects beyond a warning log on unknown input.

use serde::Serialize;

use super::models::{OrderStatus, PaymentKind, PaymentMethod, PaymentState};

// =============================================================================
// Status Display
// =============================================================================

/// Visual tone the frontend uses to colour the status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Warning,
    Info,
    Success,
    Danger,
}

/// Canonical label plus tone for one order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusDisplay {
    pub label: &'static str,
    pub tone: Tone,
}

/// Maps a known status to its display classification.
pub fn display_for(status: OrderStatus) -> StatusDisplay {
    match status {
        OrderStatus::PendientePago => StatusDisplay {
            label: "Pendiente de Pago",
            tone: Tone::Warning,
        },
        OrderStatus::Confirmado => StatusDisplay {
            label: "Confirmado",
            tone: Tone::Info,
        },
        OrderStatus::Procesando => StatusDisplay {
            label: "Procesando",
            tone: Tone::Info,
        },
        OrderStatus::Enviado => StatusDisplay {
            label: "Enviado",
            tone: Tone::Info,
        },
        OrderStatus::EnTransito => StatusDisplay {
            label: "En Tránsito",
            tone: Tone::Info,
        },
        OrderStatus::EnReparto => StatusDisplay {
            label: "En Reparto",
            tone: Tone::Info,
        },
        OrderStatus::Entregado => StatusDisplay {
            label: "Entregado",
            tone: Tone::Success,
        },
        OrderStatus::Cancelado => StatusDisplay {
            label: "Cancelado",
            tone: Tone::Danger,
        },
    }
}

/// Resolves a raw wire status into its display classification.
///
/// Unknown values never crash the page: they log a warning and fall back
/// to the "Procesando" display.
pub fn resolve_status(raw: &str) -> StatusDisplay {
    match OrderStatus::parse(raw) {
        Ok(status) => display_for(status),
        Err(_) => {
            tracing::warn!(estado = raw, "unknown order status, defaulting to Procesando");
            display_for(OrderStatus::Procesando)
        }
    }
}

// =============================================================================
// Payment Instructions
// =============================================================================

/// Display template guiding the buyer through an out-of-band payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InstructionPanel {
    pub kind: &'static str,
    pub title: &'static str,
    pub lines: &'static [&'static str],
}

const YAPE_PANEL: InstructionPanel = InstructionPanel {
    kind: "yape",
    title: "Paga con Yape",
    lines: &[
        "Yapea el total de tu pedido al 987 654 321.",
        "Coloca el número de tu pedido en la descripción.",
        "Tu pedido se confirma apenas validemos el pago.",
    ],
};

const TRANSFER_PANEL: InstructionPanel = InstructionPanel {
    kind: "transferencia",
    title: "Transferencia Bancaria",
    lines: &[
        "Cuenta corriente BCP: 191-2345678-0-99.",
        "CCI para otros bancos: 002-191-002345678099-55.",
        "Envía el comprobante indicando tu número de pedido.",
    ],
};

const COD_PANEL: InstructionPanel = InstructionPanel {
    kind: "contra_entrega",
    title: "Pago Contra Entrega",
    lines: &[
        "Pagas al recibir tu pedido.",
        "Ten listo el monto exacto en efectivo o Yape.",
    ],
};

/// Selects the payment-instruction panel for a payment method, if any.
///
/// Yape and bank transfer only need instructions while the payment is
/// pending. The cash-on-delivery notice shows regardless of state, since
/// payment happens at the door; the upstream storefront behaves the same
/// way.
pub fn resolve_payment_instructions(method: &PaymentMethod) -> Option<InstructionPanel> {
    match (method.tipo, method.estado) {
        (PaymentKind::Yape, PaymentState::Pendiente) => Some(YAPE_PANEL),
        (PaymentKind::Transferencia, PaymentState::Pendiente) => Some(TRANSFER_PANEL),
        (PaymentKind::ContraEntrega, _) => Some(COD_PANEL),
        _ => None,
    }
}
