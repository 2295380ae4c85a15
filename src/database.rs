use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlPoolOptions};
use sqlx::pool::PoolConnection;
use sqlx::{Connection, MySql, Pool};
use std::time::Duration;
use tracing::{error, info, warn};

use crate::config::DatabaseConfig;
use crate::models::user::UserRow;
use crate::models::{Booking, Movie, NewBooking, NewMovie, NewUser, Role, User};
use crate::store::{self, BoxOfficeStore, StoreError, StoreResult};

#[derive(Clone)]
pub struct Database {
    pub pool: Pool<MySql>,
    database_name: String,
    connect_options: MySqlConnectOptions,
    acquire_timeout: Duration,
}

impl Database {
    // Пул подключается лениво: соединение берётся на каждый запрос к базе,
    // так что сервер стартует даже без MySQL
    pub fn new(config: &DatabaseConfig) -> Self {
        let connect_options = server_options(config).database(&config.name);
        let pool = MySqlPoolOptions::new()
            .max_connections(config.pool_size)
            .acquire_timeout(config.acquire_timeout)
            .connect_lazy_with(connect_options.clone());

        Database {
            pool,
            database_name: config.name.clone(),
            connect_options,
            acquire_timeout: config.acquire_timeout,
        }
    }

    /// Соединение из пула. Любая ошибка на этом этапе - база недоступна,
    /// и пользователь должен увидеть настоящий текст ошибки подключения.
    pub async fn acquire(&self) -> StoreResult<PoolConnection<MySql>> {
        match self.pool.acquire().await {
            Ok(conn) => Ok(conn),
            // Пул повторяет попытки до таймаута и теряет исходную ошибку
            Err(sqlx::Error::PoolTimedOut) => Err(self.diagnose_connect().await),
            Err(e) => {
                error!("Error connecting to database: {}", e);
                Err(StoreError::Unavailable(e.to_string()))
            }
        }
    }

    // Одна прямая попытка подключения, чтобы достать причину таймаута
    async fn diagnose_connect(&self) -> StoreError {
        let attempt = tokio::time::timeout(
            self.acquire_timeout,
            MySqlConnection::connect_with(&self.connect_options),
        )
        .await;

        match attempt {
            Ok(Err(e)) => {
                error!("Error connecting to database: {}", e);
                StoreError::Unavailable(e.to_string())
            }
            Ok(Ok(conn)) => {
                // сервер ответил, просто пул занят
                if let Err(e) = conn.close().await {
                    warn!("Closing diagnostic connection failed: {}", e);
                }
                StoreError::Unavailable(sqlx::Error::PoolTimedOut.to_string())
            }
            Err(_) => StoreError::Unavailable(format!(
                "timed out connecting to MySQL server at {}:{}",
                self.connect_options.get_host(),
                self.connect_options.get_port()
            )),
        }
    }

    /// Создаёт базу, если её нет. Соединение без выбранной базы, иначе MySQL откажет.
    pub async fn ensure_database(config: &DatabaseConfig) -> Result<(), sqlx::Error> {
        let mut conn = MySqlConnection::connect_with(&server_options(config)).await?;
        let statement = format!(
            "CREATE DATABASE IF NOT EXISTS {}",
            quote_identifier(&config.name)
        );
        sqlx::query(&statement).execute(&mut conn).await?;
        conn.close().await?;
        Ok(())
    }

    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        info!("Running database migrations...");
        sqlx::migrate!("./src/migrations")
            .run(&self.pool)
            .await?;
        info!("Migrations completed");
        Ok(())
    }

    // Ошибки схемы и сидов только логируем: сервер продолжает работать
    pub async fn initialize(&self, config: &DatabaseConfig) {
        if let Err(e) = Self::ensure_database(config).await {
            error!("Could not create database {}: {}", self.database_name, e);
            return;
        }
        if let Err(e) = self.run_migrations().await {
            error!("Database initialization error: {}", e);
            return;
        }
        match store::seed_users(self).await {
            Ok(_) => info!("Database initialized successfully"),
            Err(e) => error!("Database initialization error: {}", e),
        }
    }
}

fn server_options(config: &DatabaseConfig) -> MySqlConnectOptions {
    MySqlConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
}

fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

fn into_user(row: UserRow) -> StoreResult<User> {
    User::try_from(row).map_err(|e| StoreError::Query(e.to_string()))
}

fn insert_id(id: u64) -> StoreResult<i32> {
    i32::try_from(id).map_err(|_| StoreError::Query(format!("insert id {} out of range", id)))
}

#[async_trait]
impl BoxOfficeStore for Database {
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let mut conn = self.acquire().await?;
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, username, password, role FROM users WHERE username = ?"
        )
        .bind(username)
        .fetch_optional(&mut *conn)
        .await?;

        row.map(into_user).transpose()
    }

    async fn find_user_for_login(&self, username: &str, role: Role) -> StoreResult<Option<User>> {
        let mut conn = self.acquire().await?;
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, username, password, role FROM users WHERE username = ? AND role = ?"
        )
        .bind(username)
        .bind(role.as_str())
        .fetch_optional(&mut *conn)
        .await?;

        row.map(into_user).transpose()
    }

    async fn insert_user(&self, user: NewUser) -> StoreResult<i32> {
        let mut conn = self.acquire().await?;
        let result = sqlx::query("INSERT INTO users (username, password, role) VALUES (?, ?, ?)")
            .bind(&user.username)
            .bind(&user.password)
            .bind(user.role.as_str())
            .execute(&mut *conn)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    StoreError::DuplicateUsername(user.username.clone())
                }
                other => StoreError::from(other),
            })?;

        insert_id(result.last_insert_id())
    }

    async fn update_password(&self, user_id: i32, password: &str) -> StoreResult<()> {
        let mut conn = self.acquire().await?;
        sqlx::query("UPDATE users SET password = ? WHERE id = ?")
            .bind(password)
            .bind(user_id)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    async fn insert_movie(&self, movie: NewMovie) -> StoreResult<i32> {
        let mut conn = self.acquire().await?;
        let result = sqlx::query("INSERT INTO movies (title, genre, duration) VALUES (?, ?, ?)")
            .bind(&movie.title)
            .bind(&movie.genre)
            .bind(movie.duration)
            .execute(&mut *conn)
            .await?;

        insert_id(result.last_insert_id())
    }

    async fn list_movies(&self) -> StoreResult<Vec<Movie>> {
        let mut conn = self.acquire().await?;
        let movies = sqlx::query_as::<_, Movie>("SELECT id, title, genre, duration FROM movies")
            .fetch_all(&mut *conn)
            .await?;
        Ok(movies)
    }

    async fn insert_booking(&self, booking: NewBooking) -> StoreResult<i32> {
        let mut conn = self.acquire().await?;
        let result = sqlx::query(
            "INSERT INTO bookings (user_id, movie_title, booking_date, tickets) VALUES (?, ?, ?, ?)"
        )
        .bind(booking.user_id)
        .bind(&booking.movie_title)
        .bind(booking.booking_date)
        .bind(booking.tickets)
        .execute(&mut *conn)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                StoreError::UnknownUser(booking.user_id)
            }
            other => StoreError::from(other),
        })?;

        insert_id(result.last_insert_id())
    }

    async fn list_bookings_for_user(&self, user_id: i32) -> StoreResult<Vec<Booking>> {
        let mut conn = self.acquire().await?;
        let bookings = sqlx::query_as::<_, Booking>(
            "SELECT id, user_id, movie_title, booking_date, tickets FROM bookings WHERE user_id = ?"
        )
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await?;
        Ok(bookings)
    }
}
