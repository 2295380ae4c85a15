use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Booking {
    pub id: i32,
    pub user_id: i32,
    pub movie_title: String,
    pub booking_date: NaiveDate,
    pub tickets: i32,
}

// movie_title не ссылается на movies: это просто текст из формы
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub user_id: i32,
    pub movie_title: String,
    pub booking_date: NaiveDate,
    pub tickets: i32,
}
