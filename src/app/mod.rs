//! 应用层：路由与各业务模块

pub mod greeting;
pub mod products;

use std::sync::Arc;

use axum::{
    extract::State,
    middleware,
    response::Json,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::core::middleware::request_logging_middleware;
use products::service::Catalog;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
}

impl AppState {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }
}

/// 构建完整路由
pub fn router(state: AppState, server: &ServerConfig) -> Router {
    Router::new()
        .route("/ping", get(greeting::handler::ping))
        .route("/saludo", post(greeting::handler::greet))
        .route("/health", get(health_check))
        .route(
            "/products",
            get(products::handler::list_products).post(products::handler::create_product),
        )
        .route("/products/search", get(products::handler::search_products))
        .route("/products/:id", get(products::handler::get_product))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                )
                .layer(TimeoutLayer::new(server.timeout()))
                .layer(middleware::from_fn(request_logging_middleware)),
        )
        .with_state(state)
}

/// 健康检查
async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "catalog": {
            "products_count": state.catalog.len(),
            "last_id": state.catalog.last_id()
        }
    }))
}
