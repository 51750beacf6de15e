use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Comma-separated category ids, e.g. `categories=a,b`.
    pub categories: Option<String>,
}

/// GET /products - list products, projected to id/name/price. An empty
/// result is a success, not an error.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = match query.categories.as_deref() {
        Some(raw) => Some(parse_category_filter(raw)?),
        None => None,
    };

    let products = state.products().list(filter).await?;
    Ok(Json(json!({ "success": true, "data": products })))
}

fn parse_category_filter(raw: &str) -> Result<Vec<Uuid>, ApiError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| Uuid::parse_str(s).map_err(|_| ApiError::bad_request("Invalid Category Id")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_splits_on_commas() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let ids = parse_category_filter(&format!("{a},{b}")).unwrap();
        assert_eq!(ids, vec![a, b]);
    }

    #[test]
    fn empty_filter_matches_nothing() {
        assert!(parse_category_filter("").unwrap().is_empty());
        assert!(parse_category_filter(" , ").unwrap().is_empty());
    }

    #[test]
    fn malformed_id_in_filter_is_a_client_error() {
        let err = parse_category_filter("not-a-uuid").unwrap_err();
        assert_eq!(err.status_code(), 400);
    }
}
