pub mod auth;
pub mod admin;
pub mod tech_admin;
pub mod customer;

use axum::{routing::get, Router};
use std::sync::Arc;

pub fn routes() -> Router<Arc<crate::AppState>> {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .merge(auth::routes())
        .nest("/admin", admin::routes())
        .nest("/tech_admin", tech_admin::routes())
        .nest("/customer", customer::routes())
}
