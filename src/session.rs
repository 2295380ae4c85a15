//! Идентичность пользователя, которую переносит подписанная cookie.

use axum_extra::extract::cookie::Key;
use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};

use crate::models::{Role, User};

pub const SESSION_COOKIE: &str = "boxoffice_session";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub user_id: i32,
    pub username: String,
    pub role: Role,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        SessionUser {
            user_id: user.id,
            username: user.username.clone(),
            role: user.role,
        }
    }
}

impl SessionUser {
    // JSON в base64url: в значении cookie не должно быть кавычек и запятых
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        let json = serde_json::to_vec(self)?;
        Ok(general_purpose::URL_SAFE_NO_PAD.encode(json))
    }

    pub fn decode(value: &str) -> Option<Self> {
        let json = general_purpose::URL_SAFE_NO_PAD.decode(value).ok()?;
        serde_json::from_slice(&json).ok()
    }
}

/// Ключ подписи из секрета любой длины: `Key` требует ровно 64 байта, их даёт SHA-512.
pub fn signing_key(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(digest.as_slice())
}
