use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::registry::Registry;
use crate::ws;

/// Build the axum router with all registry endpoints.
pub fn build_router(registry: Registry) -> Router {
    Router::new()
        .route("/health", get(handler::health))
        .route(
            "/items",
            get(handler::list_items).post(handler::create_item),
        )
        .route(
            "/items/:id",
            get(handler::get_item)
                .put(handler::put_item)
                .delete(handler::delete_item),
        )
        .route("/ws", get(ws::ws_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(registry)
}
