pub mod seats;
pub mod shows;

use axum::Router;
use std::sync::Arc;

/// Маршруты под префиксом `/api`.
pub fn api_routes() -> Router<Arc<crate::AppState>> {
    Router::new().merge(shows::routes())
}

pub fn page_routes() -> Router<Arc<crate::AppState>> {
    Router::new().merge(seats::routes())
}
