use axum::{
    extract::State,
    response::{IntoResponse, Redirect},
    routing::get,
    Form, Router,
};
use std::sync::Arc;
use tracing::info;

use crate::error::AppError;
use crate::middleware::AdminUser;
use crate::models::NewMovie;
use crate::{views, AppState};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/add_movie", get(add_movie_form).post(add_movie))
        .route("/view_movies", get(view_movies))
}

async fn dashboard(admin: AdminUser) -> impl IntoResponse {
    views::admin_dashboard(&admin.user.username)
}

async fn add_movie_form(_admin: AdminUser) -> impl IntoResponse {
    views::add_movie_form()
}

// POST /admin/add_movie: жанр и длительность не проверяются
async fn add_movie(
    State(state): State<Arc<AppState>>,
    admin: AdminUser,
    Form(movie): Form<NewMovie>,
) -> Result<Redirect, AppError> {
    let id = state.store.insert_movie(movie).await?;
    info!("Admin {} added movie {}", admin.user.username, id);
    Ok(Redirect::to("/admin/view_movies"))
}

async fn view_movies(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let movies = state.store.list_movies().await?;
    Ok(views::admin_movies(&movies))
}
