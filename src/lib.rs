pub mod config;
pub mod controller;
pub mod controllers;
pub mod error;
pub mod models;
pub mod page;
pub mod services;
pub mod store;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

// Shared state для всего приложения
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: config::Config,
    pub store: store::ShowStore,
}

impl AppState {
    pub fn new(config: config::Config, store: store::ShowStore) -> Arc<Self> {
        Arc::new(Self { config, store })
    }
}

/// Собирает роутер сервера: страница выбора мест и API занятых мест.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Seat grid service" }))
        .route("/health", get(|| async { "OK" }))
        .nest("/api", controllers::api_routes())
        .merge(controllers::page_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
