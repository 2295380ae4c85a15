mod common;

use boxoffice::models::{NewMovie, Role};
use boxoffice::store::BoxOfficeStore;
use chrono::NaiveDate;
use common::*;

#[tokio::test]
async fn booking_shows_in_own_history_only() {
    let app = TestApp::new().await;
    app.add_customer("second", "pw").await;

    let cookie = app.login("user", "user123", Role::Customer).await;
    let response = app
        .post_form(
            "/customer/booking",
            &[("movie_title", "X"), ("date", "2025-01-01"), ("tickets", "2")],
            Some(&cookie),
        )
        .await;
    assert_redirect(&response, "/customer/history");

    let history = assert_ok_body(app.get("/customer/history", Some(&cookie)).await).await;
    assert!(history.contains("<td>X</td><td>2025-01-01</td><td>2</td>"));

    let other = app.login("second", "pw", Role::Customer).await;
    let history = assert_ok_body(app.get("/customer/history", Some(&other)).await).await;
    assert!(!history.contains("<td>X</td>"));
    assert!(history.contains("No bookings yet."));
}

#[tokio::test]
async fn booking_is_tied_to_session_user() {
    let app = TestApp::new().await;
    let user = app.store.find_user_by_username("user").await.unwrap().unwrap();
    let cookie = app.login("user", "user123", Role::Customer).await;

    app.post_form(
        "/customer/booking",
        &[("movie_title", "Heat"), ("date", "2025-03-14"), ("tickets", "4")],
        Some(&cookie),
    )
    .await;

    let bookings = app.store.list_bookings_for_user(user.id).await.unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].movie_title, "Heat");
    assert_eq!(
        bookings[0].booking_date,
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    );
    assert_eq!(bookings[0].tickets, 4);
}

#[tokio::test]
async fn unknown_titles_and_zero_tickets_are_accepted() {
    let app = TestApp::new().await;
    let cookie = app.login("user", "user123", Role::Customer).await;

    let response = app
        .post_form(
            "/customer/booking",
            &[("movie_title", "Not In The Catalogue"), ("date", "1999-12-31"), ("tickets", "0")],
            Some(&cookie),
        )
        .await;
    assert_redirect(&response, "/customer/history");

    let history = assert_ok_body(app.get("/customer/history", Some(&cookie)).await).await;
    assert!(history.contains("Not In The Catalogue"));
}

#[tokio::test]
async fn repeated_bookings_are_never_capacity_checked() {
    let app = TestApp::new().await;
    let cookie = app.login("user", "user123", Role::Customer).await;

    for _ in 0..3 {
        app.post_form(
            "/customer/booking",
            &[("movie_title", "Sold Out"), ("date", "2025-01-01"), ("tickets", "500")],
            Some(&cookie),
        )
        .await;
    }

    let user = app.store.find_user_by_username("user").await.unwrap().unwrap();
    assert_eq!(app.store.list_bookings_for_user(user.id).await.unwrap().len(), 3);
}

#[tokio::test]
async fn malformed_date_is_rejected() {
    let app = TestApp::new().await;
    let cookie = app.login("user", "user123", Role::Customer).await;

    let response = app
        .post_form(
            "/customer/booking",
            &[("movie_title", "X"), ("date", "01/02/2025"), ("tickets", "1")],
            Some(&cookie),
        )
        .await;
    assert!(response.status().is_client_error());

    let user = app.store.find_user_by_username("user").await.unwrap().unwrap();
    assert!(app.store.list_bookings_for_user(user.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn home_and_booking_pages_list_movies() {
    let app = TestApp::new().await;
    app.store
        .insert_movie(NewMovie {
            title: "Arrival".to_string(),
            genre: "Sci-Fi".to_string(),
            duration: 116,
        })
        .await
        .unwrap();
    let cookie = app.login("user", "user123", Role::Customer).await;

    let home = assert_ok_body(app.get("/customer/home", Some(&cookie)).await).await;
    assert!(home.contains("<td>Arrival</td><td>Sci-Fi</td><td>116 min</td>"));

    let booking = assert_ok_body(app.get("/customer/booking", Some(&cookie)).await).await;
    assert!(booking.contains("<option value=\"Arrival\">Arrival</option>"));
}
