pub mod config;
pub mod database;
pub mod models;
pub mod store;
pub mod session;
pub mod middleware;
pub mod error;
pub mod views;
pub mod controllers;

use axum::Router;
use axum_extra::extract::cookie::Key;
use std::sync::Arc;

use store::BoxOfficeStore;

// Shared state для всего приложения
pub struct AppState {
    pub store: Arc<dyn BoxOfficeStore>,
    pub config: config::Config,
    pub session_key: Key,
}

impl AppState {
    pub fn new(store: Arc<dyn BoxOfficeStore>, config: config::Config) -> Arc<Self> {
        let session_key = session::signing_key(&config.session.secret);
        Arc::new(Self {
            store,
            config,
            session_key,
        })
    }
}

/// Все маршруты приложения с уже подставленным состоянием.
pub fn app(state: Arc<AppState>) -> Router {
    controllers::routes().with_state(state)
}
