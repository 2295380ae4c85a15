use axum::{
    extract::State,
    response::{IntoResponse, Redirect},
    routing::get,
    Form, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::error::AppError;
use crate::middleware::CustomerUser;
use crate::models::NewBooking;
use crate::{views, AppState};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/home", get(home))
        .route("/booking", get(booking_form).post(create_booking))
        .route("/history", get(history))
}

#[derive(Debug, Deserialize)]
pub struct BookingForm {
    pub movie_title: String,
    pub date: NaiveDate,
    pub tickets: i32,
}

async fn home(
    State(state): State<Arc<AppState>>,
    customer: CustomerUser,
) -> Result<impl IntoResponse, AppError> {
    let movies = state.store.list_movies().await?;
    Ok(views::customer_home(&customer.user.username, &movies))
}

async fn booking_form(
    State(state): State<Arc<AppState>>,
    _customer: CustomerUser,
) -> Result<impl IntoResponse, AppError> {
    let movies = state.store.list_movies().await?;
    Ok(views::booking_form(&movies))
}

// POST /customer/booking: одна вставка, мест и вместимости нет,
// название фильма не сверяется с таблицей movies
async fn create_booking(
    State(state): State<Arc<AppState>>,
    customer: CustomerUser,
    Form(form): Form<BookingForm>,
) -> Result<Redirect, AppError> {
    let id = state
        .store
        .insert_booking(NewBooking {
            user_id: customer.user.user_id,
            movie_title: form.movie_title,
            booking_date: form.date,
            tickets: form.tickets,
        })
        .await?;
    info!("User {} created booking {}", customer.user.username, id);
    Ok(Redirect::to("/customer/history"))
}

async fn history(
    State(state): State<Arc<AppState>>,
    customer: CustomerUser,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state
        .store
        .list_bookings_for_user(customer.user.user_id)
        .await?;
    Ok(views::booking_history(&bookings))
}
