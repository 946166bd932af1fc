//! Integration tests for authentication flow.

mod helpers;

use axum::http::StatusCode;

#[tokio::test]
async fn test_login_success() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("testuser", "Fr0ntDesk!2026", "receptionist")
        .await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "username": "testuser",
                "password": "Fr0ntDesk!2026",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["data"].get("access_token").is_some());
    assert!(response.body["data"].get("refresh_token").is_some());
}

#[tokio::test]
async fn test_login_invalid_password() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("testuser2", "Fr0ntDesk!2026", "receptionist")
        .await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "username": "testuser2",
                "password": "wrongpassword",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_nonexistent_user() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "username": "nobody",
                "password": "Fr0ntDesk!2026",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_authenticated() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("meuser", "Fr0ntDesk!2026", "admin")
        .await;
    let token = app.login("meuser", "Fr0ntDesk!2026").await;

    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body["data"]["username"].as_str().unwrap(),
        "meuser"
    );
}

#[tokio::test]
async fn test_me_unauthenticated() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/api/auth/me", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("logoutuser", "Fr0ntDesk!2026", "receptionist")
        .await;
    let token = app.login("logoutuser", "Fr0ntDesk!2026").await;

    let response = app
        .request("POST", "/api/auth/logout", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);

    // Token should now be invalid
    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_token() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("refreshuser", "Fr0ntDesk!2026", "receptionist")
        .await;

    let login_resp = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "username": "refreshuser",
                "password": "Fr0ntDesk!2026",
            })),
            None,
        )
        .await;

    let refresh_token = login_resp.body["data"]["refresh_token"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({
                "refresh_token": refresh_token,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["data"].get("access_token").is_some());
}
