//! Проверки сессии и роли в виде экстракторов.
//!
//! Порядок как у обычного запроса: сначала [`CurrentUser`] (нет сессии - редирект на логин),
//! затем [`Authorized`] (чужая роль - 403).

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use std::convert::Infallible;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::error::AppError;
use crate::models::Role;
use crate::session::{SessionUser, SESSION_COOKIE};
use crate::AppState;

/// Подписанная cookie текущего запроса.
pub struct Session {
    jar: SignedCookieJar,
}

impl Session {
    fn from_parts(parts: &Parts, state: &AppState) -> Self {
        Session {
            jar: SignedCookieJar::from_headers(&parts.headers, state.session_key.clone()),
        }
    }

    // Подделанная или битая cookie равносильна её отсутствию
    pub fn user(&self) -> Option<SessionUser> {
        self.jar
            .get(SESSION_COOKIE)
            .and_then(|cookie| SessionUser::decode(cookie.value()))
    }

    pub fn establish(self, user: &SessionUser) -> Result<SignedCookieJar, AppError> {
        let cookie = Cookie::build((SESSION_COOKIE, user.encode()?))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax);
        Ok(self.jar.add(cookie))
    }

    pub fn clear(self) -> SignedCookieJar {
        self.jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
    }
}

impl FromRequestParts<Arc<AppState>> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        Ok(Session::from_parts(parts, state))
    }
}

/// Залогиненный пользователь любой роли.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub SessionUser);

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        Session::from_parts(parts, state)
            .user()
            .map(CurrentUser)
            .ok_or_else(|| Redirect::to("/login"))
    }
}

pub trait RequiredRole {
    const ROLE: Role;
}

pub struct AdminOnly;
pub struct TechAdminOnly;
pub struct CustomerOnly;

impl RequiredRole for AdminOnly {
    const ROLE: Role = Role::Admin;
}

impl RequiredRole for TechAdminOnly {
    const ROLE: Role = Role::TechAdmin;
}

impl RequiredRole for CustomerOnly {
    const ROLE: Role = Role::Customer;
}

/// Пользователь с ролью `R::ROLE`.
#[derive(Debug, Clone)]
pub struct Authorized<R> {
    pub user: SessionUser,
    _role: PhantomData<R>,
}

pub type AdminUser = Authorized<AdminOnly>;
pub type TechAdminUser = Authorized<TechAdminOnly>;
pub type CustomerUser = Authorized<CustomerOnly>;

impl<R> FromRequestParts<Arc<AppState>> for Authorized<R>
where
    R: RequiredRole + Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        if user.role != R::ROLE {
            return Err(AppError::Forbidden.into_response());
        }

        Ok(Authorized {
            user,
            _role: PhantomData,
        })
    }
}
