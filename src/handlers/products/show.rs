use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
};
use serde_json::json;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /products/:id - single product with the category reference expanded.
/// The id is not pre-validated here; anything that does not resolve is an
/// absence.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(id) = Uuid::parse_str(&id).ok() else {
        return Err(ApiError::not_found("Product Not Found"));
    };

    match state.products().find_detail(id).await? {
        Some(product) => Ok(Json(json!({ "success": true, "data": product }))),
        None => Err(ApiError::not_found("Product Not Found")),
    }
}
