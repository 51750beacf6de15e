use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
};
use serde_json::json;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// DELETE /products/:id - three-way outcome: removed, not found, or a
/// malformed identifier reported with its detail.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = Uuid::parse_str(&id)
        .map_err(|e| ApiError::bad_request(format!("Invalid product id: {e}")))?;

    if state.products().delete(id).await? {
        Ok(Json(json!({ "success": true, "message": "Product Deleted" })))
    } else {
        Err(ApiError::not_found("Product Not Found"))
    }
}
