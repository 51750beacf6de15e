use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::auth::{generate_jwt, Claims};
use crate::database::users::UserWrite;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub apartment: String,
    #[serde(default)]
    pub zip: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /users/register - create an account with a bcrypt-hashed password.
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if request.name.trim().is_empty()
        || request.email.trim().is_empty()
        || request.password.is_empty()
    {
        return Err(ApiError::bad_request("Name, email and password are required"));
    }

    let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST).map_err(|e| {
        tracing::error!("Password hashing failed: {}", e);
        ApiError::internal_server_error("The user cannot be created")
    })?;

    let write = UserWrite {
        name: request.name,
        email: request.email,
        password_hash,
        phone: request.phone,
        is_admin: request.is_admin,
        street: request.street,
        apartment: request.apartment,
        zip: request.zip,
        city: request.city,
        country: request.country,
    };

    match state.users().create(write).await? {
        Some(user) => Ok(Json(json!({ "success": true, "data": user }))),
        None => Err(ApiError::conflict("Email is already registered")),
    }
}

/// POST /users/login - verify credentials and issue a JWT.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(user) = state.users().find_by_email(&request.email).await? else {
        return Err(ApiError::bad_request("The user not found"));
    };

    let password_ok = bcrypt::verify(&request.password, &user.password_hash).map_err(|e| {
        tracing::error!("Password verification failed: {}", e);
        ApiError::internal_server_error("Login failed")
    })?;
    if !password_ok {
        return Err(ApiError::bad_request("Password is wrong"));
    }

    let claims = Claims::new(
        user.id,
        user.email.clone(),
        user.is_admin,
        state.config.security.jwt_expiry_hours,
    );
    let token = generate_jwt(&claims, &state.config.security.jwt_secret).map_err(|e| {
        tracing::error!("JWT generation failed: {}", e);
        ApiError::internal_server_error("Login failed")
    })?;

    Ok(Json(json!({
        "success": true,
        "data": { "user": user.email, "token": token }
    })))
}

/// GET /users - every account, password hashes never included.
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let users = state.users().list().await?;
    Ok(Json(json!({ "success": true, "data": users })))
}

/// GET /users/:id
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(id) = Uuid::parse_str(&id).ok() else {
        return Err(ApiError::not_found("User Not Found"));
    };

    match state.users().find_by_id(id).await? {
        Some(user) => Ok(Json(json!({ "success": true, "data": user }))),
        None => Err(ApiError::not_found("User Not Found")),
    }
}

/// GET /users/get/count
pub async fn count(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let count = state.users().count().await?;
    Ok(Json(json!({ "success": true, "data": { "userCount": count } })))
}

/// DELETE /users/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id =
        Uuid::parse_str(&id).map_err(|e| ApiError::bad_request(format!("Invalid user id: {e}")))?;

    if state.users().delete(id).await? {
        Ok(Json(json!({ "success": true, "message": "User Deleted" })))
    } else {
        Err(ApiError::not_found("User Not Found"))
    }
}
