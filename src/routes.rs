// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{admin, auth, health, quiz, register},
    state::AppState,
    utils::jwt::{admin_middleware, auth_middleware},
};

/// Assembles the main application router.
///
/// * Public routes: registration, quiz submission, admin login, health.
/// * Admin routes behind bearer-token auth plus the admin role check.
/// * Global middleware (Trace, CORS) and a JSON 404 fallback.
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let admin_routes = Router::new()
        .route("/users", get(admin::list_participants))
        .route("/export", get(admin::export_participants))
        // Auth runs first, then the role check
        .route_layer(middleware::from_fn(admin_middleware))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .route("/login", post(auth::login));

    Router::new()
        .route("/api/register", post(register::register))
        .route("/api/quiz", post(quiz::submit_quiz))
        .route("/api/health", get(health::health))
        .nest("/api/admin", admin_routes)
        .fallback(health::not_found)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
