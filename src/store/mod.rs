//! Доступ к данным: пользователи, фильмы и бронирования.
//!
//! Обработчики работают только через [`BoxOfficeStore`]. Боевая реализация живёт в
//! [`crate::database::Database`] (MySQL), [`memory::MemoryStore`] держит те же таблицы в памяти.

pub mod memory;

use async_trait::async_trait;
use sqlx::error::DatabaseError;
use sqlx::mysql::MySqlDatabaseError;
use tracing::{info, warn};

use crate::models::{Booking, Movie, NewBooking, NewMovie, NewUser, Role, User};

pub use memory::MemoryStore;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Не удалось получить соединение с базой.
    #[error("{0}")]
    Unavailable(String),
    #[error("query failed: {0}")]
    Query(String),
    #[error("user {0} does not exist")]
    UnknownUser(i32),
    #[error("username {0} is already taken")]
    DuplicateUsername(String),
}

impl StoreError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

// Коды MySQL, которые сервер отдаёт ещё на этапе подключения:
// too many connections, access denied, unknown database, host blocked/not allowed
const CONNECT_PHASE_ERRORS: [u16; 6] = [1040, 1044, 1045, 1049, 1129, 1130];

fn is_connect_phase(db: &dyn DatabaseError) -> bool {
    if let Some(mysql) = db.try_downcast_ref::<MySqlDatabaseError>() {
        return CONNECT_PHASE_ERRORS.contains(&mysql.number());
    }
    // SQLSTATE 08xxx - connection exception, 28xxx - invalid authorization
    db.code()
        .is_some_and(|code| code.starts_with("08") || code.starts_with("28"))
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Configuration(_) => StoreError::Unavailable(e.to_string()),
            sqlx::Error::Database(ref db) if is_connect_phase(db.as_ref()) => {
                StoreError::Unavailable(e.to_string())
            }
            other => StoreError::Query(other.to_string()),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait BoxOfficeStore: Send + Sync {
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    /// Пользователь с таким логином И ролью. Пароль проверяет вызывающий.
    async fn find_user_for_login(&self, username: &str, role: Role) -> StoreResult<Option<User>>;

    async fn insert_user(&self, user: NewUser) -> StoreResult<i32>;

    /// Несуществующий `user_id` не считается ошибкой.
    async fn update_password(&self, user_id: i32, password: &str) -> StoreResult<()>;

    async fn insert_movie(&self, movie: NewMovie) -> StoreResult<i32>;

    async fn list_movies(&self) -> StoreResult<Vec<Movie>>;

    async fn insert_booking(&self, booking: NewBooking) -> StoreResult<i32>;

    async fn list_bookings_for_user(&self, user_id: i32) -> StoreResult<Vec<Booking>>;
}

/// Учётки, которые создаются при старте, если их ещё нет.
pub const SEED_USERS: [(&str, &str, Role); 3] = [
    ("admin", "admin123", Role::Admin),
    ("tech", "tech123", Role::TechAdmin),
    ("user", "user123", Role::Customer),
];

// Повторный запуск ничего не дублирует: вставляем только отсутствующие логины
pub async fn seed_users(store: &dyn BoxOfficeStore) -> StoreResult<usize> {
    let mut inserted = 0;
    for (username, password, role) in SEED_USERS {
        if store.find_user_by_username(username).await?.is_some() {
            continue;
        }
        match store
            .insert_user(NewUser {
                username: username.to_string(),
                password: password.to_string(),
                role,
            })
            .await
        {
            Ok(_) => inserted += 1,
            // кто-то успел раньше нас
            Err(StoreError::DuplicateUsername(name)) => warn!("Seed user {} already exists", name),
            Err(e) => return Err(e),
        }
    }
    info!("Seeded {} user(s)", inserted);
    Ok(inserted)
}
