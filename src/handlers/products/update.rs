use axum::{
    extract::{Host, Multipart, Path, State},
    http::HeaderMap,
    response::{IntoResponse, Json},
};
use serde_json::json;
use uuid::Uuid;

use super::form::parse_product_form;
use crate::database::products::GuardedWrite;
use crate::error::ApiError;
use crate::handlers::request_base_url;
use crate::state::AppState;

/// PUT /products/:id - full replacement of the scalar fields. When the form
/// carries a new `image` file its URL is used; otherwise the stored image is
/// retained. Gates, in order: valid id, category exists, product exists.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Host(host): Host,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let id = Uuid::parse_str(&id).map_err(|_| ApiError::bad_request("Invalid Id"))?;

    let store = state.image_store();
    let form = parse_product_form(multipart, &store).await?;

    let Some(category_id) = form.category else {
        return Err(ApiError::bad_request("Invalid Category"));
    };
    if state.categories().find_by_id(category_id).await?.is_none() {
        return Err(ApiError::bad_request("Invalid Category"));
    }
    if state.products().find_by_id(id).await?.is_none() {
        return Err(ApiError::bad_request("Invalid Product"));
    }

    let base = request_base_url(&headers, &host);
    let image_url = form
        .stored_image
        .as_deref()
        .map(|filename| store.public_url(&base, filename));

    // Gates re-run transactionally with the write; a None image keeps the
    // stored value
    match state
        .products()
        .update(id, form.into_write(category_id, image_url))
        .await?
    {
        GuardedWrite::Written(product) => Ok(Json(json!({ "success": true, "data": product }))),
        GuardedWrite::NoCategory => Err(ApiError::bad_request("Invalid Category")),
        GuardedWrite::NoProduct => Err(ApiError::bad_request("Invalid Product")),
    }
}
