//! Общие помощники для тестов маршрутов: роутер поверх MemoryStore.
#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

use boxoffice::config::Config;
use boxoffice::models::{Booking, Movie, NewBooking, NewMovie, NewUser, Role, User};
use boxoffice::store::{self, BoxOfficeStore, MemoryStore, StoreError, StoreResult};
use boxoffice::AppState;

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    /// Приложение с тремя стандартными учётками.
    pub async fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        store::seed_users(store.as_ref())
            .await
            .expect("seeding memory store");
        let router = router_for(store.clone());
        TestApp { router, store }
    }

    pub async fn get(&self, path: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method("GET").uri(path);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(
        &self,
        path: &str,
        fields: &[(&str, &str)],
        cookie: Option<&str>,
    ) -> Response<Body> {
        let body = serde_urlencoded::to_string(fields).unwrap();
        let mut builder = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body)).unwrap()).await
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Логинится и возвращает значение для заголовка Cookie.
    pub async fn login(&self, username: &str, password: &str, role: Role) -> String {
        let response = self
            .post_form(
                "/login",
                &[("username", username), ("password", password), ("role", role.as_str())],
                None,
            )
            .await;
        assert!(
            response.status().is_redirection(),
            "login for {} failed with {}",
            username,
            response.status()
        );
        session_cookie(&response).expect("login sets a session cookie")
    }

    pub async fn add_customer(&self, username: &str, password: &str) -> i32 {
        self.store
            .insert_user(NewUser {
                username: username.to_string(),
                password: password.to_string(),
                role: Role::Customer,
            })
            .await
            .unwrap()
    }
}

pub fn router_for(store: Arc<dyn BoxOfficeStore>) -> Router {
    let config = Config::from_lookup(|_| None).unwrap();
    boxoffice::app(AppState::new(store, config))
}

/// `name=value` из Set-Cookie, без атрибутов.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("boxoffice_session="))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

pub fn location(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

pub fn assert_redirect(response: &Response<Body>, to: &str) {
    assert!(
        response.status().is_redirection(),
        "expected redirect, got {}",
        response.status()
    );
    assert_eq!(location(response), Some(to));
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn assert_ok_body(response: Response<Body>) -> String {
    assert_eq!(response.status(), StatusCode::OK);
    body_text(response).await
}

/// Хранилище, до которого нельзя достучаться.
pub struct UnreachableStore;

fn refused<T>() -> StoreResult<T> {
    Err(StoreError::Unavailable(
        "Can't connect to MySQL server on 'localhost'".to_string(),
    ))
}

#[async_trait]
impl BoxOfficeStore for UnreachableStore {
    async fn find_user_by_username(&self, _username: &str) -> StoreResult<Option<User>> {
        refused()
    }

    async fn find_user_for_login(&self, _username: &str, _role: Role) -> StoreResult<Option<User>> {
        refused()
    }

    async fn insert_user(&self, _user: NewUser) -> StoreResult<i32> {
        refused()
    }

    async fn update_password(&self, _user_id: i32, _password: &str) -> StoreResult<()> {
        refused()
    }

    async fn insert_movie(&self, _movie: NewMovie) -> StoreResult<i32> {
        refused()
    }

    async fn list_movies(&self) -> StoreResult<Vec<Movie>> {
        refused()
    }

    async fn insert_booking(&self, _booking: NewBooking) -> StoreResult<i32> {
        refused()
    }

    async fn list_bookings_for_user(&self, _user_id: i32) -> StoreResult<Vec<Booking>> {
        refused()
    }
}
