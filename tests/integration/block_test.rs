//! Integration tests for agency block bookings.

mod helpers;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use rust_decimal::Decimal;

#[tokio::test]
async fn test_block_of_three_rooms_gets_discount() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("blockmgr", "Fr0ntDesk!2026", "manager")
        .await;
    let agency_id = app
        .create_test_guest("Globetrotter Tours", "agency", None)
        .await;
    let room_a = app.create_test_room("201", Decimal::new(10000, 2), 2).await;
    let room_b = app.create_test_room("202", Decimal::new(10000, 2), 2).await;
    let room_c = app.create_test_room("203", Decimal::new(10000, 2), 2).await;
    let token = app.login("blockmgr", "Fr0ntDesk!2026").await;

    let today = Utc::now().date_naive();
    let response = app
        .request(
            "POST",
            "/api/block-bookings",
            Some(serde_json::json!({
                "agency_id": agency_id,
                "room_ids": [room_a, room_b, room_c],
                "check_in": today + Duration::days(30),
                "check_out": today + Duration::days(32),
                "guests": 2,
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    let discount = &response.body["data"]["discount"];
    assert!(discount["eligible"].as_bool().unwrap());

    // 3 rooms x 2 nights x 100.00 = 600.00, minus 15% = 510.00
    let final_amount = discount["final_amount"]
        .as_str()
        .unwrap()
        .parse::<f64>()
        .unwrap();
    assert_eq!(final_amount, 510.0);
}

#[tokio::test]
async fn test_block_of_two_rooms_pays_full_price() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("blockmgr2", "Fr0ntDesk!2026", "manager")
        .await;
    let agency_id = app
        .create_test_guest("Voyager Travel", "agency", None)
        .await;
    let room_a = app.create_test_room("204", Decimal::new(10000, 2), 2).await;
    let room_b = app.create_test_room("205", Decimal::new(10000, 2), 2).await;
    let token = app.login("blockmgr2", "Fr0ntDesk!2026").await;

    let today = Utc::now().date_naive();
    let response = app
        .request(
            "POST",
            "/api/block-bookings",
            Some(serde_json::json!({
                "agency_id": agency_id,
                "room_ids": [room_a, room_b],
                "check_in": today + Duration::days(30),
                "check_out": today + Duration::days(31),
                "guests": 1,
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    let discount = &response.body["data"]["discount"];
    assert!(!discount["eligible"].as_bool().unwrap());

    let final_amount = discount["final_amount"]
        .as_str()
        .unwrap()
        .parse::<f64>()
        .unwrap();
    assert_eq!(final_amount, 200.0);
}

#[tokio::test]
async fn test_block_creates_member_reservations() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("blockmgr3", "Fr0ntDesk!2026", "manager")
        .await;
    let agency_id = app
        .create_test_guest("Sunline Tours", "agency", None)
        .await;
    let room_a = app.create_test_room("206", Decimal::new(10000, 2), 2).await;
    let room_b = app.create_test_room("207", Decimal::new(10000, 2), 2).await;
    let room_c = app.create_test_room("208", Decimal::new(10000, 2), 2).await;
    let token = app.login("blockmgr3", "Fr0ntDesk!2026").await;

    let today = Utc::now().date_naive();
    let created = app
        .request(
            "POST",
            "/api/block-bookings",
            Some(serde_json::json!({
                "agency_id": agency_id,
                "room_ids": [room_a, room_b, room_c],
                "check_in": today + Duration::days(20),
                "check_out": today + Duration::days(22),
                "guests": 2,
            })),
            Some(&token),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let block_id = created.body["data"]["block"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let members = app
        .request(
            "GET",
            &format!("/api/block-bookings/{}/reservations", block_id),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(members.status, StatusCode::OK);
    assert_eq!(members.body["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_duplicate_rooms_in_block_rejected() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("blockmgr4", "Fr0ntDesk!2026", "manager")
        .await;
    let agency_id = app
        .create_test_guest("Redwood Travel", "agency", None)
        .await;
    let room_a = app.create_test_room("209", Decimal::new(10000, 2), 2).await;
    let token = app.login("blockmgr4", "Fr0ntDesk!2026").await;

    let today = Utc::now().date_naive();
    let response = app
        .request(
            "POST",
            "/api/block-bookings",
            Some(serde_json::json!({
                "agency_id": agency_id,
                "room_ids": [room_a, room_a],
                "check_in": today + Duration::days(30),
                "check_out": today + Duration::days(31),
                "guests": 1,
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cancel_inside_window_rejected() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("blockmgr5", "Fr0ntDesk!2026", "manager")
        .await;
    let agency_id = app
        .create_test_guest("Lakeview Tours", "agency", None)
        .await;
    let room_a = app.create_test_room("210", Decimal::new(10000, 2), 2).await;
    let room_b = app.create_test_room("211", Decimal::new(10000, 2), 2).await;
    let room_c = app.create_test_room("212", Decimal::new(10000, 2), 2).await;
    let token = app.login("blockmgr5", "Fr0ntDesk!2026").await;

    let today = Utc::now().date_naive();
    let created = app
        .request(
            "POST",
            "/api/block-bookings",
            Some(serde_json::json!({
                "agency_id": agency_id,
                "room_ids": [room_a, room_b, room_c],
                "check_in": today + Duration::days(3),
                "check_out": today + Duration::days(5),
                "guests": 2,
            })),
            Some(&token),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let block_id = created.body["data"]["block"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .request(
            "POST",
            &format!("/api/block-bookings/{}/cancel", block_id),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cancel_outside_window_succeeds() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("blockmgr6", "Fr0ntDesk!2026", "manager")
        .await;
    let agency_id = app
        .create_test_guest("Harborline Tours", "agency", None)
        .await;
    let room_a = app.create_test_room("213", Decimal::new(10000, 2), 2).await;
    let room_b = app.create_test_room("214", Decimal::new(10000, 2), 2).await;
    let room_c = app.create_test_room("215", Decimal::new(10000, 2), 2).await;
    let token = app.login("blockmgr6", "Fr0ntDesk!2026").await;

    let today = Utc::now().date_naive();
    let created = app
        .request(
            "POST",
            "/api/block-bookings",
            Some(serde_json::json!({
                "agency_id": agency_id,
                "room_ids": [room_a, room_b, room_c],
                "check_in": today + Duration::days(30),
                "check_out": today + Duration::days(32),
                "guests": 2,
            })),
            Some(&token),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let block_id = created.body["data"]["block"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .request(
            "POST",
            &format!("/api/block-bookings/{}/cancel", block_id),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(
        response.body["data"]["status"].as_str().unwrap(),
        "canceled"
    );
}

#[tokio::test]
async fn test_receptionist_cannot_manage_blocks() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("frontdesk9", "Fr0ntDesk!2026", "receptionist")
        .await;
    let agency_id = app
        .create_test_guest("Northgate Travel", "agency", None)
        .await;
    let room_a = app.create_test_room("216", Decimal::new(10000, 2), 2).await;
    let room_b = app.create_test_room("217", Decimal::new(10000, 2), 2).await;
    let room_c = app.create_test_room("218", Decimal::new(10000, 2), 2).await;
    let token = app.login("frontdesk9", "Fr0ntDesk!2026").await;

    let today = Utc::now().date_naive();
    let response = app
        .request(
            "POST",
            "/api/block-bookings",
            Some(serde_json::json!({
                "agency_id": agency_id,
                "room_ids": [room_a, room_b, room_c],
                "check_in": today + Duration::days(30),
                "check_out": today + Duration::days(32),
                "guests": 2,
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}
