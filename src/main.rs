use axum::{middleware::from_fn, routing::get, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use sporty_api::handlers;
use sporty_api::middleware::auth::jwt_auth_middleware;
use sporty_api::middleware::content_type::require_json;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    // Initialize configuration (this loads the config singleton)
    let config = sporty_api::config::config();

    tracing_subscriber::fmt::init();
    tracing::info!("Starting Sporty API in {:?} mode", config.environment);

    let app = app();

    // Allow tests or deployments to override port via env
    let port = std::env::var("SPORTY_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Sporty API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Versioned API
        .nest("/api/v1", api_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn api_routes() -> Router {
    Router::new()
        .merge(user_public_routes())
        .merge(protected_routes())
        // Body-bearing requests must declare application/json
        .layer(from_fn(require_json))
}

fn user_public_routes() -> Router {
    use axum::routing::post;

    Router::new()
        // Token acquisition: registration and login
        .route("/users", post(handlers::users::register))
        .route("/login", post(handlers::users::login))
}

fn protected_routes() -> Router {
    use axum::routing::{delete, put};

    Router::new()
        // Activities
        .route(
            "/activities",
            get(handlers::activities::list).post(handlers::activities::create),
        )
        .route("/activities/types", get(handlers::activities::list_types))
        .route("/activities/:id", delete(handlers::activities::delete))
        // Events and participation
        .route("/events", get(handlers::events::list_mine))
        .route("/all_events", get(handlers::events::list_all))
        .route("/join_event/:id", get(handlers::events::join))
        .route("/leave_event/:id", get(handlers::events::leave))
        // Account
        .route("/me", get(handlers::users::me))
        .route("/update/password", put(handlers::users::update_password))
        .layer(from_fn(jwt_auth_middleware))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Sporty API",
            "version": version,
            "description": "REST backend for tracking sporting activities and event participation",
            "endpoints": {
                "home": "/ (public)",
                "users": "POST /api/v1/users, POST /api/v1/login (public - token acquisition)",
                "account": "GET /api/v1/me, PUT /api/v1/update/password (protected)",
                "activities": "/api/v1/activities[/:id], /api/v1/activities/types (protected)",
                "events": "/api/v1/events, /api/v1/all_events, /api/v1/join_event/:id, /api/v1/leave_event/:id (protected)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match sporty_api::database::manager::DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "message": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
