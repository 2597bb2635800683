use axum::{routing::post, Router};

use crate::{
    handlers::resolve::{handle_preview, handle_resolve},
    http_server::AppState,
};

pub fn resolve_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handle_resolve))
        .route("/preview", post(handle_preview))
}
