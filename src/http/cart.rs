//! Cart endpoints.
//!
//! Thin adapters from HTTP to [`CartStore`](crate::cart::CartStore); the store
//! never talks to the backend. Checkout is the one handler that uses both the
//! store and the backend client, each through its public operations.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, Method},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::cart::{Cart, CartLine, CartSummary};
use crate::http::request::request_id;
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::proxy::BackendResponse;

/// Body of `POST /api/cart/{session_id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddLineRequest {
    pub product_id: i64,
    pub quantity: i64,
    pub price: Number,
    pub name: String,
}

impl From<AddLineRequest> for CartLine {
    fn from(req: AddLineRequest) -> Self {
        CartLine::new(req.product_id, req.quantity, req.price, req.name)
    }
}

/// Body of `PUT /api/cart/{session_id}/{product_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct SetQuantityRequest {
    pub quantity: i64,
}

/// Order payload expected by the backend's `POST /api/orders`.
#[derive(Debug, Serialize)]
struct CreateOrder {
    items: Vec<OrderItem>,
}

#[derive(Debug, Serialize)]
struct OrderItem {
    product_id: i64,
    quantity: i64,
    price: Number,
}

impl From<&CartLine> for OrderItem {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product_id,
            quantity: line.quantity,
            price: line.price.clone(),
        }
    }
}

const EMPTY_CART_MESSAGE: &str = "Cart is empty";

pub async fn get_cart(State(state): State<AppState>, Path(session_id): Path<String>) -> Json<Cart> {
    Json(state.carts.get(&session_id))
}

pub async fn add_line(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    payload: Result<Json<AddLineRequest>, JsonRejection>,
) -> Result<Json<Cart>, ApiError> {
    let Json(req) = payload?;
    Ok(Json(state.carts.add(&session_id, req.into())))
}

pub async fn set_quantity(
    State(state): State<AppState>,
    Path((session_id, product_id)): Path<(String, String)>,
    payload: Result<Json<SetQuantityRequest>, JsonRejection>,
) -> Result<Json<Cart>, ApiError> {
    let Json(req) = payload?;
    // A non-numeric id can never match a line.
    let Ok(product_id) = product_id.parse::<i64>() else {
        return Ok(Json(state.carts.get(&session_id)));
    };
    Ok(Json(
        state.carts.set_quantity(&session_id, product_id, req.quantity),
    ))
}

/// `PUT` on a reserved segment (`summary`, `checkout`), which can never be a
/// product id. The body is still validated like any quantity update.
pub async fn set_quantity_reserved(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    payload: Result<Json<SetQuantityRequest>, JsonRejection>,
) -> Result<Json<Cart>, ApiError> {
    payload?;
    Ok(Json(state.carts.get(&session_id)))
}

/// `DELETE` on a reserved segment: nothing to remove.
pub async fn remove_reserved(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Json<Cart> {
    Json(state.carts.get(&session_id))
}

pub async fn remove_line(
    State(state): State<AppState>,
    Path((session_id, product_id)): Path<(String, String)>,
) -> Json<Cart> {
    match product_id.parse::<i64>() {
        Ok(product_id) => Json(state.carts.remove(&session_id, product_id)),
        Err(_) => Json(state.carts.get(&session_id)),
    }
}

pub async fn clear_cart(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Json<Cart> {
    Json(state.carts.clear(&session_id))
}

pub async fn summary(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Json<CartSummary> {
    Json(state.carts.get(&session_id).summary())
}

/// Place an order for the cart's current contents.
///
/// On a 2xx backend answer the ordered quantities are settled out of the
/// cart; any other outcome leaves the cart untouched.
pub async fn checkout(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    headers: HeaderMap,
) -> Result<BackendResponse, ApiError> {
    let snapshot = state.carts.get(&session_id);
    if snapshot.is_empty() {
        return Err(ApiError::BadRequest(EMPTY_CART_MESSAGE.to_string()));
    }

    let order = CreateOrder {
        items: snapshot.lines().iter().map(OrderItem::from).collect(),
    };
    let body = serde_json::to_vec(&order).map_err(|e| ApiError::Internal(e.to_string()))?;

    let runtime = state.runtime();
    let response = runtime
        .backend
        .forward(
            Method::POST,
            "/api/orders",
            Some(body.into()),
            request_id(&headers).as_deref(),
        )
        .await?;

    if response.status.is_success() {
        let remaining = state.carts.settle(&session_id, snapshot.lines());
        tracing::info!(
            session_id = %session_id,
            ordered_lines = snapshot.len(),
            remaining_lines = remaining.len(),
            "Checkout placed"
        );
    } else {
        tracing::warn!(
            session_id = %session_id,
            status = %response.status,
            "Checkout rejected by backend"
        );
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_request_parses_camel_case() {
        let req: AddLineRequest = serde_json::from_str(
            r#"{"productId": 4, "quantity": 2, "price": 400, "name": "Latte"}"#,
        )
        .unwrap();
        assert_eq!(CartLine::from(req), CartLine::new(4, 2, 400, "Latte"));
    }

    #[test]
    fn test_order_payload_shape() {
        let line = CartLine::new(4, 2, 400, "Latte");
        let order = CreateOrder {
            items: vec![OrderItem::from(&line)],
        };
        assert_eq!(
            serde_json::to_value(&order).unwrap(),
            serde_json::json!({"items": [{"product_id": 4, "quantity": 2, "price": 400}]})
        );
    }
}
