use axum::{
    extract::{OriginalUri, Request, State},
    http::{HeaderMap, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use uuid::Uuid;

use crate::auth::Claims;
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated user context extracted from JWT
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
    pub is_admin: bool,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
            is_admin: claims.is_admin,
        }
    }
}

/// JWT gate applied across the API surface. Catalog reads and the account
/// endpoints are public; every other route requires a Bearer token. All
/// authorization failures are answered 401, whatever the precise cause.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    // Under `nest(prefix, ..)` the nested router sees the prefix stripped from
    // `request.uri()`; `is_public` matches against the full path (see its unit
    // tests), so recover it from `OriginalUri` when present.
    let full_path = request
        .extensions()
        .get::<OriginalUri>()
        .map(|o| o.0.path().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    if is_public(
        request.method(),
        &full_path,
        &state.config.server.api_prefix,
    ) {
        return Ok(next.run(request).await);
    }

    let token = extract_jwt_from_headers(&headers)
        .map_err(|msg| ApiError::unauthorized(msg).into_response())?;

    let claims = validate_jwt(&token, &state.config.security.jwt_secret)
        .map_err(|msg| ApiError::unauthorized(msg).into_response())?;

    request.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(request).await)
}

/// Routes reachable without a token: catalog and category reads, plus the
/// login/register endpoints that issue tokens in the first place.
fn is_public(method: &Method, path: &str, api_prefix: &str) -> bool {
    let Some(rest) = path.strip_prefix(api_prefix) else {
        return false;
    };
    if *method == Method::GET {
        return rest.starts_with("/products") || rest.starts_with("/categories");
    }
    if *method == Method::POST {
        return rest == "/users/login" || rest == "/users/register";
    }
    *method == Method::OPTIONS
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get("authorization")
        .or_else(|| headers.get("Authorization"))
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty JWT token".to_string());
        }
        Ok(token.to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}

/// Validate JWT token and extract claims
fn validate_jwt(token: &str, secret: &str) -> Result<Claims, String> {
    if secret.is_empty() {
        return Err("JWT secret not configured".to_string());
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| format!("Invalid JWT token: {}", e))?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::generate_jwt;

    #[test]
    fn public_route_matrix() {
        let prefix = "/api/v1";
        assert!(is_public(&Method::GET, "/api/v1/products", prefix));
        assert!(is_public(&Method::GET, "/api/v1/products/get/count", prefix));
        assert!(is_public(&Method::GET, "/api/v1/categories", prefix));
        assert!(is_public(&Method::POST, "/api/v1/users/login", prefix));
        assert!(is_public(&Method::POST, "/api/v1/users/register", prefix));

        assert!(!is_public(&Method::POST, "/api/v1/products", prefix));
        assert!(!is_public(&Method::PUT, "/api/v1/products/catalog/abc", prefix));
        assert!(!is_public(&Method::DELETE, "/api/v1/products/abc", prefix));
        assert!(!is_public(&Method::GET, "/api/v1/users", prefix));
        assert!(!is_public(&Method::GET, "/api/v1/orders", prefix));
        assert!(!is_public(&Method::GET, "/elsewhere/products", prefix));
    }

    #[test]
    fn bearer_extraction() {
        let mut headers = HeaderMap::new();
        assert!(extract_jwt_from_headers(&headers).is_err());

        headers.insert("authorization", "Token abc".parse().unwrap());
        assert!(extract_jwt_from_headers(&headers).is_err());

        headers.insert("authorization", "Bearer abc.def.ghi".parse().unwrap());
        assert_eq!(extract_jwt_from_headers(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn validate_accepts_own_tokens_only() {
        let claims = Claims::new(Uuid::new_v4(), "ada@example.com".into(), false, 1);
        let token = generate_jwt(&claims, "secret").unwrap();

        assert!(validate_jwt(&token, "secret").is_ok());
        assert!(validate_jwt(&token, "other").is_err());
        assert!(validate_jwt(&token, "").is_err());
        assert!(validate_jwt("not-a-token", "secret").is_err());
    }
}
