use axum::{
    extract::{Host, Multipart, State},
    http::HeaderMap,
    response::{IntoResponse, Json},
};
use serde_json::json;

use super::form::parse_product_form;
use crate::database::products::GuardedWrite;
use crate::error::ApiError;
use crate::handlers::request_base_url;
use crate::state::AppState;

/// POST /products - create a product from a multipart form carrying the
/// scalar fields and an `image` file. Gates, in order: the referenced
/// category must exist, then an uploaded file must be present. An already
/// stored file is not cleaned up when a later gate fails.
pub async fn create(
    State(state): State<AppState>,
    Host(host): Host,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let store = state.image_store();
    let form = parse_product_form(multipart, &store).await?;

    let Some(category_id) = form.category else {
        return Err(ApiError::bad_request("Invalid Category"));
    };
    if state.categories().find_by_id(category_id).await?.is_none() {
        return Err(ApiError::bad_request("Invalid Category"));
    }

    let Some(filename) = form.stored_image.clone() else {
        return Err(ApiError::bad_request("No Image in The Request"));
    };

    let base = request_base_url(&headers, &host);
    let image_url = store.public_url(&base, &filename);

    // The category gate is re-run inside the write transaction
    match state
        .products()
        .create(form.into_write(category_id, Some(image_url)))
        .await?
    {
        GuardedWrite::Written(product) => Ok(Json(json!({ "success": true, "data": product }))),
        GuardedWrite::NoCategory => Err(ApiError::bad_request("Invalid Category")),
        GuardedWrite::NoProduct => {
            Err(ApiError::internal_server_error("Product Can't be Created"))
        }
    }
}
