use axum::{
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post, put},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::handlers::{categories, orders, products, users};
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

/// Build the full application router. Resource routes live under the
/// configured API prefix behind the JWT gate; stored images are served
/// statically under the uploads public path.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/products",
            get(products::list).post(products::create),
        )
        .route(
            "/products/:id",
            get(products::show)
                .put(products::update)
                .delete(products::delete),
        )
        .route("/products/get/count", get(products::count))
        .route("/products/get/featured/:count", get(products::featured))
        .route("/products/catalog/:id", put(products::catalog))
        .route(
            "/categories",
            get(categories::list).post(categories::create),
        )
        .route(
            "/categories/:id",
            get(categories::show)
                .put(categories::update)
                .delete(categories::delete),
        )
        .route("/users", get(users::list))
        .route("/users/:id", get(users::show).delete(users::delete))
        .route("/users/get/count", get(users::count))
        .route("/users/register", post(users::register))
        .route("/users/login", post(users::login))
        .route("/orders", get(orders::list).post(orders::create))
        .route(
            "/orders/:id",
            get(orders::show)
                .put(orders::update_status)
                .delete(orders::delete),
        )
        .route("/orders/get/count", get(orders::count))
        .route("/orders/get/userorders/:id", get(orders::by_user))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_middleware,
        ));

    let router = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest(&state.config.server.api_prefix, api)
        .nest_service(
            &state.config.uploads.public_path,
            ServeDir::new(&state.config.uploads.dir),
        )
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(state.config.server.max_request_size_bytes));

    let router = if state.config.security.enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    router.with_state(state)
}

async fn root(State(state): State<AppState>) -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");
    let api = &state.config.server.api_prefix;

    Json(json!({
        "success": true,
        "data": {
            "name": "eshop API",
            "version": version,
            "endpoints": {
                "products": format!("{api}/products (GET public, writes protected)"),
                "categories": format!("{api}/categories (GET public, writes protected)"),
                "users": format!("{api}/users (protected), {api}/users/login + /users/register (public)"),
                "orders": format!("{api}/orders (protected)"),
                "uploads": format!("{} (public, static)", state.config.uploads.public_path),
            }
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": { "status": "ok", "timestamp": now, "database": "ok" }
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "message": "database unavailable",
                "data": { "status": "degraded", "timestamp": now, "database_error": e.to_string() }
            })),
        ),
    }
}
