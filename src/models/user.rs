use serde::Serialize;
use sqlx::FromRow;
use std::str::FromStr;

use super::role::{Role, UnknownRole};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password: String, // хранится как есть, без хеша
    pub role: Role,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub role: Role,
}

// Строка из таблицы users: роль там обычный VARCHAR
#[derive(Debug, FromRow)]
pub struct UserRow {
    pub id: i32,
    pub username: String,
    pub password: String,
    pub role: String,
}

impl TryFrom<UserRow> for User {
    type Error = UnknownRole;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: row.id,
            username: row.username,
            password: row.password,
            role: Role::from_str(&row.role)?,
        })
    }
}

impl User {
    // Пароли сравниваются в открытом виде
    pub fn verify_password(&self, password: &str) -> bool {
        self.password == password
    }
}
