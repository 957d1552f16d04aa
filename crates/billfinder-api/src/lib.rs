//! billfinder-api
//!
//! HTTP surface for the bill finder frontend and chat widget.

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod state;

use state::AppState;

/// The full application router with request logging and permissive CORS.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/api/data", get(routes::bills::get_data))
        .route("/api/bills/{id}", get(routes::bills::get_bill_card))
        .route("/api/demographics", post(routes::demographics::save_demographics))
        .route(
            "/api/demographics/{user_id}",
            get(routes::demographics::get_demographics),
        )
        .route("/api/analyze_bills", get(routes::analyze::analyze_bills))
        .route("/api/chatbot/message", post(routes::chatbot::send_message))
        .route("/api/chatbot/save-history", post(routes::chatbot::save_history))
        .route("/api/chatbot/load-history", get(routes::chatbot::load_history))
        .route("/api/debug", get(routes::debug::debug_demographics))
        .layer(axum_mw::from_fn(middleware::request_log::request_log))
        .layer(cors)
        .with_state(state)
}
