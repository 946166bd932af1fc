//! Integration tests for the reservation lifecycle.

mod helpers;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use rust_decimal::Decimal;

#[tokio::test]
async fn test_create_reservation() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("frontdesk", "Fr0ntDesk!2026", "receptionist")
        .await;
    let guest_id = app.create_test_guest("Alice Traveler", "individual", None).await;
    let room_id = app
        .create_test_room("101", Decimal::new(10000, 2), 2)
        .await;
    let token = app.login("frontdesk", "Fr0ntDesk!2026").await;

    let today = Utc::now().date_naive();
    let response = app
        .request(
            "POST",
            "/api/reservations",
            Some(serde_json::json!({
                "guest_id": guest_id,
                "room_id": room_id,
                "check_in": today + Duration::days(30),
                "check_out": today + Duration::days(33),
                "guests": 2,
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(response.body["data"]["status"].as_str().unwrap(), "reserved");
}

#[tokio::test]
async fn test_overlapping_reservation_conflicts() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("frontdesk2", "Fr0ntDesk!2026", "receptionist")
        .await;
    let guest_id = app.create_test_guest("Bob Traveler", "individual", None).await;
    let room_id = app
        .create_test_room("102", Decimal::new(10000, 2), 2)
        .await;
    let token = app.login("frontdesk2", "Fr0ntDesk!2026").await;

    let today = Utc::now().date_naive();
    let first = app
        .request(
            "POST",
            "/api/reservations",
            Some(serde_json::json!({
                "guest_id": guest_id,
                "room_id": room_id,
                "check_in": today + Duration::days(10),
                "check_out": today + Duration::days(14),
                "guests": 1,
            })),
            Some(&token),
        )
        .await;
    assert_eq!(first.status, StatusCode::CREATED);

    // Overlaps the middle of the first stay
    let second = app
        .request(
            "POST",
            "/api/reservations",
            Some(serde_json::json!({
                "guest_id": guest_id,
                "room_id": room_id,
                "check_in": today + Duration::days(12),
                "check_out": today + Duration::days(16),
                "guests": 1,
            })),
            Some(&token),
        )
        .await;
    assert_eq!(second.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_adjacent_stays_do_not_conflict() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("frontdesk3", "Fr0ntDesk!2026", "receptionist")
        .await;
    let guest_id = app.create_test_guest("Carol Traveler", "individual", None).await;
    let room_id = app
        .create_test_room("103", Decimal::new(10000, 2), 2)
        .await;
    let token = app.login("frontdesk3", "Fr0ntDesk!2026").await;

    let today = Utc::now().date_naive();
    let first = app
        .request(
            "POST",
            "/api/reservations",
            Some(serde_json::json!({
                "guest_id": guest_id,
                "room_id": room_id,
                "check_in": today + Duration::days(10),
                "check_out": today + Duration::days(12),
                "guests": 1,
            })),
            Some(&token),
        )
        .await;
    assert_eq!(first.status, StatusCode::CREATED);

    // New check-in on the previous checkout day is allowed
    let second = app
        .request(
            "POST",
            "/api/reservations",
            Some(serde_json::json!({
                "guest_id": guest_id,
                "room_id": room_id,
                "check_in": today + Duration::days(12),
                "check_out": today + Duration::days(14),
                "guests": 1,
            })),
            Some(&token),
        )
        .await;
    assert_eq!(second.status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_invalid_dates_rejected() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("frontdesk4", "Fr0ntDesk!2026", "receptionist")
        .await;
    let guest_id = app.create_test_guest("Dan Traveler", "individual", None).await;
    let room_id = app
        .create_test_room("104", Decimal::new(10000, 2), 2)
        .await;
    let token = app.login("frontdesk4", "Fr0ntDesk!2026").await;

    let today = Utc::now().date_naive();
    let response = app
        .request(
            "POST",
            "/api/reservations",
            Some(serde_json::json!({
                "guest_id": guest_id,
                "room_id": room_id,
                "check_in": today + Duration::days(10),
                "check_out": today + Duration::days(10),
                "guests": 1,
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_customer_books_for_themselves() {
    let app = helpers::TestApp::new().await;
    let user_id = app
        .create_test_user("customer", "Fr0ntDesk!2026", "guest")
        .await;
    app.create_test_guest("Eve Customer", "individual", Some(user_id))
        .await;
    let room_id = app
        .create_test_room("105", Decimal::new(10000, 2), 2)
        .await;
    let token = app.login("customer", "Fr0ntDesk!2026").await;

    let today = Utc::now().date_naive();
    let response = app
        .request(
            "POST",
            "/api/reservations",
            Some(serde_json::json!({
                "room_id": room_id,
                "check_in": today + Duration::days(20),
                "check_out": today + Duration::days(22),
                "guests": 1,
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
}

#[tokio::test]
async fn test_customer_cannot_see_other_guests_reservation() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("frontdesk5", "Fr0ntDesk!2026", "receptionist")
        .await;
    let other_guest = app.create_test_guest("Frank Other", "individual", None).await;
    let room_id = app
        .create_test_room("106", Decimal::new(10000, 2), 2)
        .await;
    let staff_token = app.login("frontdesk5", "Fr0ntDesk!2026").await;

    let today = Utc::now().date_naive();
    let created = app
        .request(
            "POST",
            "/api/reservations",
            Some(serde_json::json!({
                "guest_id": other_guest,
                "room_id": room_id,
                "check_in": today + Duration::days(15),
                "check_out": today + Duration::days(17),
                "guests": 1,
            })),
            Some(&staff_token),
        )
        .await;
    let reservation_id = created.body["data"]["id"].as_str().unwrap().to_string();

    let user_id = app
        .create_test_user("othercustomer", "Fr0ntDesk!2026", "guest")
        .await;
    app.create_test_guest("Grace Customer", "individual", Some(user_id))
        .await;
    let customer_token = app.login("othercustomer", "Fr0ntDesk!2026").await;

    let response = app
        .request(
            "GET",
            &format!("/api/reservations/{}", reservation_id),
            None,
            Some(&customer_token),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cash_checkout_returns_change() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("frontdesk6", "Fr0ntDesk!2026", "receptionist")
        .await;
    let guest_id = app.create_test_guest("Hugo Traveler", "individual", None).await;
    // One night at 100.00
    let room_id = app
        .create_test_room("107", Decimal::new(10000, 2), 2)
        .await;
    let token = app.login("frontdesk6", "Fr0ntDesk!2026").await;

    let today = Utc::now().date_naive();
    let created = app
        .request(
            "POST",
            "/api/reservations",
            Some(serde_json::json!({
                "guest_id": guest_id,
                "room_id": room_id,
                "check_in": today + Duration::days(5),
                "check_out": today + Duration::days(6),
                "guests": 1,
            })),
            Some(&token),
        )
        .await;
    let reservation_id = created.body["data"]["id"].as_str().unwrap().to_string();

    let check_in = app
        .request(
            "POST",
            &format!("/api/reservations/{}/check-in", reservation_id),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(check_in.status, StatusCode::OK);

    let check_out = app
        .request(
            "POST",
            &format!("/api/reservations/{}/check-out", reservation_id),
            Some(serde_json::json!({
                "payment_method": "cash",
                "amount_paid": "120.00",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(check_out.status, StatusCode::OK, "{:?}", check_out.body);
    let change = check_out.body["data"]["invoice"]["change_amount"]
        .as_str()
        .unwrap()
        .parse::<f64>()
        .unwrap();
    assert_eq!(change, 20.0);
}

#[tokio::test]
async fn test_checkout_underpayment_rejected() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("frontdesk7", "Fr0ntDesk!2026", "receptionist")
        .await;
    let guest_id = app.create_test_guest("Ivy Traveler", "individual", None).await;
    let room_id = app
        .create_test_room("108", Decimal::new(10000, 2), 2)
        .await;
    let token = app.login("frontdesk7", "Fr0ntDesk!2026").await;

    let today = Utc::now().date_naive();
    let created = app
        .request(
            "POST",
            "/api/reservations",
            Some(serde_json::json!({
                "guest_id": guest_id,
                "room_id": room_id,
                "check_in": today + Duration::days(5),
                "check_out": today + Duration::days(7),
                "guests": 1,
            })),
            Some(&token),
        )
        .await;
    let reservation_id = created.body["data"]["id"].as_str().unwrap().to_string();

    app.request(
        "POST",
        &format!("/api/reservations/{}/check-in", reservation_id),
        None,
        Some(&token),
    )
    .await;

    let check_out = app
        .request(
            "POST",
            &format!("/api/reservations/{}/check-out", reservation_id),
            Some(serde_json::json!({
                "payment_method": "cash",
                "amount_paid": "50.00",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(check_out.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_card_checkout_requires_transaction_id() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("frontdesk8", "Fr0ntDesk!2026", "receptionist")
        .await;
    let guest_id = app.create_test_guest("Judy Traveler", "individual", None).await;
    let room_id = app
        .create_test_room("109", Decimal::new(10000, 2), 2)
        .await;
    let token = app.login("frontdesk8", "Fr0ntDesk!2026").await;

    let today = Utc::now().date_naive();
    let created = app
        .request(
            "POST",
            "/api/reservations",
            Some(serde_json::json!({
                "guest_id": guest_id,
                "room_id": room_id,
                "check_in": today + Duration::days(5),
                "check_out": today + Duration::days(6),
                "guests": 1,
            })),
            Some(&token),
        )
        .await;
    let reservation_id = created.body["data"]["id"].as_str().unwrap().to_string();

    app.request(
        "POST",
        &format!("/api/reservations/{}/check-in", reservation_id),
        None,
        Some(&token),
    )
    .await;

    let check_out = app
        .request(
            "POST",
            &format!("/api/reservations/{}/check-out", reservation_id),
            Some(serde_json::json!({
                "payment_method": "credit_card",
                "amount_paid": "100.00",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(check_out.status, StatusCode::BAD_REQUEST);
}
