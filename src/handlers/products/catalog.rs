use axum::{
    extract::{Host, Multipart, Path, State},
    http::HeaderMap,
    response::{IntoResponse, Json},
};
use serde_json::json;
use uuid::Uuid;

use crate::error::ApiError;
use crate::handlers::request_base_url;
use crate::state::AppState;

/// Upper bound on gallery uploads per request.
pub const MAX_CATALOG_IMAGES: usize = 10;

/// PUT /products/catalog/:id - replace the supplementary image gallery
/// wholesale with the uploaded `images` files, in upload order. No files
/// means an empty gallery.
pub async fn catalog(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Host(host): Host,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let id = Uuid::parse_str(&id).map_err(|_| ApiError::bad_request("Invalid Id"))?;

    let store = state.image_store();
    let base = request_base_url(&headers, &host);
    let mut urls = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("images") || field.file_name().is_none() {
            continue;
        }
        if urls.len() == MAX_CATALOG_IMAGES {
            return Err(ApiError::bad_request("Too Many Images"));
        }

        let original = field.file_name().unwrap_or_default().to_string();
        let mime = field.content_type().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;
        let filename = store.save(&original, &mime, &bytes).await?;
        urls.push(store.public_url(&base, &filename));
    }

    match state.products().update_images(id, urls).await? {
        Some(product) => Ok(Json(json!({ "success": true, "data": product }))),
        None => Err(ApiError::not_found("Product Not Found")),
    }
}
