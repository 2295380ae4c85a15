use axum::{extract::State, response::IntoResponse, routing::get, Form, Router};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::error::AppError;
use crate::middleware::TechAdminUser;
use crate::{views, AppState};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/change_password", get(change_password_form).post(change_password))
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordForm {
    pub new_password: String,
}

async fn dashboard(tech: TechAdminUser) -> impl IntoResponse {
    views::tech_admin_dashboard(&tech.user.username)
}

async fn change_password_form(_tech: TechAdminUser) -> impl IntoResponse {
    views::change_password_form()
}

// Новый пароль пишется как есть, старый не спрашиваем
async fn change_password(
    State(state): State<Arc<AppState>>,
    tech: TechAdminUser,
    Form(form): Form<ChangePasswordForm>,
) -> Result<impl IntoResponse, AppError> {
    state
        .store
        .update_password(tech.user.user_id, &form.new_password)
        .await?;
    info!("User {} changed password", tech.user.username);
    Ok(views::password_changed())
}
