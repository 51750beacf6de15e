use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use serde_json::json;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /products/get/count - total number of product records. Zero is a
/// success like any other count.
pub async fn count(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let count = state.products().count().await?;
    Ok(Json(json!({ "success": true, "data": { "productCount": count } })))
}
