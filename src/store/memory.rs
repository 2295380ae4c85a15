use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{BoxOfficeStore, StoreError, StoreResult};
use crate::models::{Booking, Movie, NewBooking, NewMovie, NewUser, Role, User};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    movies: Vec<Movie>,
    bookings: Vec<Booking>,
}

/// Хранилище в памяти с теми же правилами, что и схема MySQL:
/// уникальный username, внешний ключ bookings.user_id, автоинкремент id.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }
}

// Строки никогда не удаляются, поэтому следующий id = длина + 1
fn next_id(len: usize) -> StoreResult<i32> {
    len.checked_add(1)
        .and_then(|id| i32::try_from(id).ok())
        .ok_or_else(|| StoreError::Query(format!("id after {} rows out of range", len)))
}

#[async_trait]
impl BoxOfficeStore for MemoryStore {
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_user_for_login(&self, username: &str, role: Role) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|u| u.username == username && u.role == role)
            .cloned())
    }

    async fn insert_user(&self, user: NewUser) -> StoreResult<i32> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.username == user.username) {
            return Err(StoreError::DuplicateUsername(user.username));
        }
        let id = next_id(tables.users.len())?;
        tables.users.push(User {
            id,
            username: user.username,
            password: user.password,
            role: user.role,
        });
        Ok(id)
    }

    async fn update_password(&self, user_id: i32, password: &str) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if let Some(user) = tables.users.iter_mut().find(|u| u.id == user_id) {
            user.password = password.to_string();
        }
        Ok(())
    }

    async fn insert_movie(&self, movie: NewMovie) -> StoreResult<i32> {
        let mut tables = self.tables.write().await;
        let id = next_id(tables.movies.len())?;
        tables.movies.push(Movie {
            id,
            title: movie.title,
            genre: movie.genre,
            duration: movie.duration,
        });
        Ok(id)
    }

    async fn list_movies(&self) -> StoreResult<Vec<Movie>> {
        Ok(self.tables.read().await.movies.clone())
    }

    async fn insert_booking(&self, booking: NewBooking) -> StoreResult<i32> {
        let mut tables = self.tables.write().await;
        if !tables.users.iter().any(|u| u.id == booking.user_id) {
            return Err(StoreError::UnknownUser(booking.user_id));
        }
        let id = next_id(tables.bookings.len())?;
        tables.bookings.push(Booking {
            id,
            user_id: booking.user_id,
            movie_title: booking.movie_title,
            booking_date: booking.booking_date,
            tickets: booking.tickets,
        });
        Ok(id)
    }

    async fn list_bookings_for_user(&self, user_id: i32) -> StoreResult<Vec<Booking>> {
        let tables = self.tables.read().await;
        Ok(tables
            .bookings
            .iter()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect())
    }
}
