use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::database::categories::CategoryWrite;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
}

impl CategoryRequest {
    fn into_write(self) -> Result<CategoryWrite, ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::bad_request("Category name is required"));
        }
        Ok(CategoryWrite {
            name: self.name,
            icon: self.icon,
            color: self.color,
        })
    }
}

/// GET /categories
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let categories = state.categories().list().await?;
    Ok(Json(json!({ "success": true, "data": categories })))
}

/// GET /categories/:id
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(id) = Uuid::parse_str(&id).ok() else {
        return Err(ApiError::not_found("Category Not Found"));
    };

    match state.categories().find_by_id(id).await? {
        Some(category) => Ok(Json(json!({ "success": true, "data": category }))),
        None => Err(ApiError::not_found("Category Not Found")),
    }
}

/// POST /categories
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CategoryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let category = state.categories().create(request.into_write()?).await?;
    Ok(Json(json!({ "success": true, "data": category })))
}

/// PUT /categories/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<CategoryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = Uuid::parse_str(&id).map_err(|_| ApiError::bad_request("Invalid Id"))?;

    match state.categories().update(id, request.into_write()?).await? {
        Some(category) => Ok(Json(json!({ "success": true, "data": category }))),
        None => Err(ApiError::not_found("Category Not Found")),
    }
}

/// DELETE /categories/:id - same three-way outcome as product deletion.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = Uuid::parse_str(&id)
        .map_err(|e| ApiError::bad_request(format!("Invalid category id: {e}")))?;

    if state.categories().delete(id).await? {
        Ok(Json(json!({ "success": true, "message": "Category Deleted" })))
    } else {
        Err(ApiError::not_found("Category Not Found"))
    }
}
