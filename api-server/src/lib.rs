use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod config;
pub mod handlers;
pub mod models;
pub mod service;
pub mod store;

use config::Config;
use handlers::{book, health, latest_booking, layout, list_rooms, preview, random, reset};
use service::ReservationService;

/// Routes without middleware.
pub fn router(service: ReservationService) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/rooms", get(list_rooms))
        .route("/api/layout", get(layout))
        .route("/api/preview", get(preview))
        .route("/api/book", post(book))
        .route("/api/bookings/latest", get(latest_booking))
        .route("/api/reset", post(reset))
        .route("/api/random", post(random))
        .with_state(service)
}

pub fn app(service: ReservationService, config: &Config) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(config.cors_origin.clone())
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    router(service)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
