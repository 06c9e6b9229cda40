//! Table CRUD routes. Paths are parameterized on the table segment; handlers
//! resolve the descriptor per request, so one route pair serves every table.
//! The whole subtree allows cross-origin GET/POST/PUT/DELETE/OPTIONS from any
//! origin with Content-Type.

use crate::handlers::entity::{create, delete as delete_handler, list, read, update};
use crate::state::AppState;
use axum::http::{header, Method};
use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};

pub fn entity_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE]);
    Router::new()
        .route("/:table", get(list).post(create))
        .route("/:table/:id", get(read).put(update).delete(delete_handler))
        .layer(cors)
        .with_state(state)
}
