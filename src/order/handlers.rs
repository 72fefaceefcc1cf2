//! Order view handler
//!
//! Fetches an order snapshot from the external order service, runs the
//! status resolver over it, and returns the view model the post-purchase
//! page renders.

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap},
    routing::get,
    Json, Router,
};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::cart::state::SharedState;
use crate::error::CartError;
use crate::money::{format_money, round_display};

use super::models::{OrderItem, OrderSnapshot};
use super::status::{resolve_payment_instructions, resolve_status, InstructionPanel, Tone};

/// Creates routes for order-related operations
pub fn routes() -> Router<SharedState> {
    Router::new().route("/orders/:id", get(get_order))
}

// =============================================================================
// View Model
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusView {
    pub raw: String,
    pub label: &'static str,
    pub tone: Tone,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemView {
    pub nombre: String,
    pub variante: String,
    pub cantidad: u32,
    pub precio_unitario: Decimal,
    pub total_linea: Decimal,
    pub total_linea_display: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsView {
    pub subtotal: Decimal,
    pub descuentos: Decimal,
    pub costo_envio: Decimal,
    pub total: Decimal,
    pub total_display: String,
}

/// Everything the post-purchase page needs in one payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub id: String,
    pub status: StatusView,
    pub payment_instructions: Option<InstructionPanel>,
    pub items: Vec<OrderItemView>,
    pub totals: TotalsView,
}

impl OrderView {
    pub fn from_snapshot(order: &OrderSnapshot) -> Self {
        let display = resolve_status(&order.estado);

        Self {
            id: order.id.clone(),
            status: StatusView {
                raw: order.estado.clone(),
                label: display.label,
                tone: display.tone,
            },
            payment_instructions: resolve_payment_instructions(&order.metodo_pago),
            items: order.items.iter().map(item_view).collect(),
            totals: TotalsView {
                subtotal: round_display(order.subtotal),
                descuentos: round_display(order.descuentos),
                costo_envio: round_display(order.costo_envio),
                total: round_display(order.total),
                total_display: format_money(order.total),
            },
        }
    }
}

fn item_view(item: &OrderItem) -> OrderItemView {
    OrderItemView {
        nombre: item.nombre.clone(),
        variante: item.variante.clone(),
        cantidad: item.cantidad,
        precio_unitario: item.precio_unitario,
        total_linea: round_display(item.total_linea),
        total_linea_display: format_money(item.total_linea),
    }
}

// =============================================================================
// Handler
// =============================================================================

/// Endpoint: GET /orders/:id
/// Forwards the session's bearer token (when present) to the order service
/// and renders the fetched snapshot. Upstream failure surfaces as 502 and
/// leaves nothing half-applied.
async fn get_order(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<OrderView>, CartError> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    let order = state.api.fetch_order(&id, bearer).await?;

    if !order.totals_consistent() {
        tracing::warn!(order = %order.id, "order totals do not reconcile");
    }

    Ok(Json(OrderView::from_snapshot(&order)))
}
