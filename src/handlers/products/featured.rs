use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
};
use serde_json::json;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /products/get/featured/:count - featured products projected to
/// id/name/price, capped at `count`. A count of zero means no explicit cap.
pub async fn featured(
    State(state): State<AppState>,
    Path(count): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let limit: u32 = count
        .parse()
        .map_err(|_| ApiError::bad_request("Invalid value for count"))?;

    let products = state.products().featured(i64::from(limit)).await?;
    Ok(Json(json!({ "success": true, "data": products })))
}
