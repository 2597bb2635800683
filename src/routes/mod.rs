use axum::Router;

use crate::{http_server::AppState, routes::resolve::resolve_routes};

pub mod resolve;

pub fn api_routes() -> Router<AppState> {
    Router::new().merge(resolve_routes())
}
