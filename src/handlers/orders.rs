use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
    Extension,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::database::orders::{OrderCreate, OrderLine, OrderWrite};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub order_items: Vec<OrderItemRequest>,
    #[serde(default)]
    pub shipping_address1: String,
    #[serde(default)]
    pub shipping_address2: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub zip: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub phone: String,
}

#[derive(Debug, Deserialize)]
pub struct OrderItemRequest {
    pub product: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

/// POST /orders - create an order for the authenticated user. Unit prices
/// and the total are resolved server-side inside the insert transaction.
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(request): Json<OrderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if request.order_items.is_empty() {
        return Err(ApiError::bad_request("Order has no items"));
    }
    if request.order_items.iter().any(|item| item.quantity <= 0) {
        return Err(ApiError::bad_request("Item quantity must be positive"));
    }

    let write = OrderWrite {
        items: request
            .order_items
            .into_iter()
            .map(|item| OrderLine {
                product_id: item.product,
                quantity: item.quantity,
            })
            .collect(),
        shipping_address1: request.shipping_address1,
        shipping_address2: request.shipping_address2,
        city: request.city,
        zip: request.zip,
        country: request.country,
        phone: request.phone,
    };

    match state.orders().create(auth.user_id, write).await? {
        OrderCreate::Written(order) => Ok(Json(json!({ "success": true, "data": order }))),
        OrderCreate::NoProduct(product_id) => {
            Err(ApiError::bad_request(format!("Invalid Product: {product_id}")))
        }
    }
}

/// GET /orders - newest first, with the buyer's name expanded.
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let orders = state.orders().list().await?;
    Ok(Json(json!({ "success": true, "data": orders })))
}

/// GET /orders/:id - order with its line items and their products expanded.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(id) = Uuid::parse_str(&id).ok() else {
        return Err(ApiError::not_found("Order Not Found"));
    };

    let Some((order, items)) = state.orders().find_detail(id).await? else {
        return Err(ApiError::not_found("Order Not Found"));
    };

    let mut data = serde_json::to_value(&order)
        .map_err(|e| ApiError::internal_server_error(format!("Failed to format order: {e}")))?;
    data["orderItems"] = serde_json::to_value(&items)
        .map_err(|e| ApiError::internal_server_error(format!("Failed to format order: {e}")))?;

    Ok(Json(json!({ "success": true, "data": data })))
}

/// PUT /orders/:id - update the order status.
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<StatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = Uuid::parse_str(&id).map_err(|_| ApiError::bad_request("Invalid Id"))?;
    if request.status.trim().is_empty() {
        return Err(ApiError::bad_request("Status is required"));
    }

    match state.orders().update_status(id, request.status.trim()).await? {
        Some(order) => Ok(Json(json!({ "success": true, "data": order }))),
        None => Err(ApiError::not_found("Order Not Found")),
    }
}

/// DELETE /orders/:id - line items go with the order.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id =
        Uuid::parse_str(&id).map_err(|e| ApiError::bad_request(format!("Invalid order id: {e}")))?;

    if state.orders().delete(id).await? {
        Ok(Json(json!({ "success": true, "message": "Order Deleted" })))
    } else {
        Err(ApiError::not_found("Order Not Found"))
    }
}

/// GET /orders/get/count
pub async fn count(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let count = state.orders().count().await?;
    Ok(Json(json!({ "success": true, "data": { "orderCount": count } })))
}

/// GET /orders/get/userorders/:id - one user's order history, newest first.
pub async fn by_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(user_id) = Uuid::parse_str(&id).ok() else {
        return Err(ApiError::not_found("User Not Found"));
    };

    let orders = state.orders().list_for_user(user_id).await?;
    Ok(Json(json!({ "success": true, "data": orders })))
}
