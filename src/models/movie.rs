use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub genre: String,
    pub duration: i32,
}

/// Поля формы добавления фильма. Длительность в минутах, границы не проверяются.
#[derive(Debug, Clone, Deserialize)]
pub struct NewMovie {
    pub title: String,
    pub genre: String,
    pub duration: i32,
}
