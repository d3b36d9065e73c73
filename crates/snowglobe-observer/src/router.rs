//! Axum router construction for the Observer API.
//!
//! Assembles the REST and `WebSocket` routes into a single [`Router`]
//! with CORS and HTTP tracing layers.

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the complete Axum router for the Observer server.
///
/// CORS allows any origin so a front end served from elsewhere can edit
/// the village.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index))
        .route("/ws/ticks", get(ws::ws_ticks))
        // Live village
        .route("/api/village", get(handlers::get_village))
        .route("/api/village/entities", get(handlers::list_entities))
        .route("/api/village/items", post(handlers::place_item))
        .route("/api/village/items/{id}", delete(handlers::remove_item))
        .route("/api/village/clear", post(handlers::clear_village))
        // Interiors
        .route("/api/village/structures/{id}", get(handlers::get_structure))
        .route(
            "/api/village/structures/{id}/items",
            post(handlers::place_structure_item),
        )
        .route(
            "/api/village/structures/{id}/items/{item_id}",
            delete(handlers::remove_structure_item),
        )
        // Archive
        .route("/api/village/save", post(handlers::save_village))
        .route("/api/villages", get(handlers::list_villages))
        .route("/api/villages/{id}", delete(handlers::delete_village))
        .route("/api/villages/{id}/load", post(handlers::load_village))
        .route("/api/villages/{id}/image", get(handlers::village_image))
        // Studio
        .route("/api/studio/generate", post(handlers::generate))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
