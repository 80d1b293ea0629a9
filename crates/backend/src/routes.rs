use axum::http::{header, Method};
use axum::response::Html;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::api::handlers::d400_superstore;
use crate::system::middleware::request_logger;
use crate::AppState;

/// Dashboard page; figures are drawn client-side by Plotly
async fn index() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

/// All application routes
pub fn configure_routes(state: Arc<AppState>, static_dir: impl AsRef<Path>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/", get(index))
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // D400 SUPERSTORE DASHBOARD
        // ========================================
        .route("/api/d400/options", get(d400_superstore::get_options))
        .route("/api/d400/cities", get(d400_superstore::get_cities))
        .route("/api/d400/headline", get(d400_superstore::get_headline))
        .route("/api/d400/ranking", get(d400_superstore::get_ranking))
        .route("/api/d400/geo", get(d400_superstore::get_geo))
        .route(
            "/api/d400/city-breakdown",
            get(d400_superstore::get_city_breakdown),
        )
        .route(
            "/api/d400/product-drilldown",
            get(d400_superstore::get_product_drilldown),
        )
        .route(
            "/api/d400/product-totals",
            get(d400_superstore::get_product_totals),
        )
        .route("/api/d400/view", post(d400_superstore::post_view))
        .with_state(state)
        .fallback_service(ServeDir::new(static_dir.as_ref()))
        .layer(middleware::from_fn(request_logger))
        .layer(cors)
}
