//! Cart Session and Formatting Helpers

use axum::http::{header, HeaderMap};
use axum::response::Response;
use uuid::Uuid;

use super::aggregate::Cart;

/// Cookie carrying the session id that keys the cart.
pub const SESSION_COOKIE: &str = "cart_session";

/// Extracts the session id from the `Cookie` header, minting a fresh UUID
/// when the browser has none yet. The boolean reports whether the id is new
/// (and therefore needs a `Set-Cookie` on the response).
pub fn resolve_session_id(headers: &HeaderMap) -> (String, bool) {
    let existing = headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|cookies| {
            cookies.split(';').find_map(|pair| {
                let (name, value) = pair.trim().split_once('=')?;
                (name == SESSION_COOKIE && !value.is_empty()).then(|| value.to_string())
            })
        });

    match existing {
        Some(id) => (id, false),
        None => (Uuid::new_v4().simple().to_string(), true),
    }
}

/// Attaches the session cookie to a response when the session was just
/// minted.
pub fn with_session_cookie(mut response: Response, session_id: &str, is_new: bool) -> Response {
    if is_new {
        let cookie = format!("{SESSION_COOKIE}={session_id}; Path=/; HttpOnly");
        if let Ok(value) = cookie.parse() {
            response.headers_mut().insert(header::SET_COOKIE, value);
        }
    }
    response
}

/// Produces a human-readable one-line receipt for a cart.
///
/// Example output: `"2x Polera Azul, 1x Gorra Negra"`.
pub fn format_line_summary(cart: &Cart) -> String {
    cart.lines()
        .iter()
        .map(|l| format!("{}x {}", l.quantity, l.name))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::models::CartLine;
    use rust_decimal_macros::dec;

    #[test]
    fn session_id_comes_from_the_cookie_when_present() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            "other=1; cart_session=abc123; theme=dark".parse().unwrap(),
        );
        let (id, is_new) = resolve_session_id(&headers);
        assert_eq!(id, "abc123");
        assert!(!is_new);
    }

    #[test]
    fn missing_cookie_mints_a_fresh_session() {
        let (id, is_new) = resolve_session_id(&HeaderMap::new());
        assert!(is_new);
        assert_eq!(id.len(), 32);
    }

    #[test]
    fn summary_lists_quantity_and_name() {
        let mut cart = Cart::new();
        cart.add_item(CartLine::new("p1", "v1", "Polera Azul", dec!(50), None, 2).unwrap())
            .unwrap();
        cart.add_item(CartLine::new("p2", "v1", "Gorra Negra", dec!(30), None, 1).unwrap())
            .unwrap();
        assert_eq!(format_line_summary(&cart), "2x Polera Azul, 1x Gorra Negra");
    }
}
