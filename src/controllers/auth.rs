use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::AppError;
use crate::middleware::Session;
use crate::models::Role;
use crate::session::SessionUser;
use crate::{views, AppState};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        .route("/login", get(login_page).post(login))
        .route("/logout", get(logout))
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub role: String,
}

// GET / - отправляем на страницу своей роли или на логин
async fn index(session: Session) -> Redirect {
    match session.user() {
        Some(user) => Redirect::to(user.role.home_path()),
        None => Redirect::to("/login"),
    }
}

async fn login_page() -> impl IntoResponse {
    views::login(None)
}

// POST /login
async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    // Неизвестная роль - такие же неверные учётные данные
    let Ok(role) = form.role.parse::<Role>() else {
        warn!("Login with unknown role {:?}", form.role);
        return Ok(views::login(Some(views::INVALID_CREDENTIALS)).into_response());
    };

    let user = state
        .store
        .find_user_for_login(&form.username, role)
        .await?;

    match user {
        Some(user) if user.verify_password(&form.password) => {
            info!("User {} logged in as {}", user.username, user.role);
            let jar = session.establish(&SessionUser::from(&user))?;
            Ok((jar, Redirect::to(user.role.home_path())).into_response())
        }
        _ => {
            warn!("Failed login for {}", form.username);
            Ok(views::login(Some(views::INVALID_CREDENTIALS)).into_response())
        }
    }
}

async fn logout(session: Session) -> impl IntoResponse {
    (session.clear(), Redirect::to("/login"))
}
