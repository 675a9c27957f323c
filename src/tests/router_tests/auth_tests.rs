// src/tests/router_tests/auth_tests.rs
use crate::tests::utils::{register, request, send, test_app};
use http::Method;
use serde_json::json;

#[test]
fn register_returns_token_and_normalized_email() {
    let app = test_app();

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({ "email": " Owner@Gym.DZ ", "password": "password123" })),
        ),
    );

    assert_eq!(status, 200);
    assert_eq!(body["email"], "owner@gym.dz");
    assert!(body["token"].as_str().is_some_and(|t| t.len() >= 40));
}

#[test]
fn duplicate_register_is_rejected() {
    let app = test_app();
    register(&app, "dup@gym.dz");

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({ "email": "dup@gym.dz", "password": "password123" })),
        ),
    );
    assert_eq!(status, 400);
    assert_eq!(body["error"], "User already exists");
}

#[test]
fn login_reports_unknown_user_and_bad_password() {
    let app = test_app();
    register(&app, "login@gym.dz");

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": "ghost@gym.dz", "password": "password123" })),
        ),
    );
    assert_eq!(status, 400);
    assert_eq!(body["error"], "User not found");

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": "login@gym.dz", "password": "nope-nope" })),
        ),
    );
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Invalid password");
}

#[test]
fn login_token_opens_member_list() {
    let app = test_app();
    register(&app, "login@gym.dz");

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": "login@gym.dz", "password": "password123" })),
        ),
    );
    assert_eq!(status, 200);
    let token = body["token"].as_str().unwrap().to_string();

    let (status, body) = send(&app, request(Method::GET, "/api/members", Some(&token), None));
    assert_eq!(status, 200);
    assert_eq!(body, json!([]));
}

#[test]
fn members_require_a_valid_token() {
    let app = test_app();

    let (status, body) = send(&app, request(Method::GET, "/api/members", None, None));
    assert_eq!(status, 401);
    assert_eq!(body["error"], "Unauthorized");

    let (status, _) = send(
        &app,
        request(Method::GET, "/api/members", Some("made-up-token"), None),
    );
    assert_eq!(status, 401);
}

#[test]
fn malformed_body_is_bad_request() {
    let app = test_app();
    let mut req = request(Method::POST, "/api/auth/login", None, None);
    *req.body_mut() = astra::Body::from("{not json");

    let (status, body) = send(&app, req);
    assert_eq!(status, 400);
    assert!(body["error"].as_str().unwrap().starts_with("invalid JSON"));
}

#[test]
fn unknown_routes_and_methods() {
    let app = test_app();

    let (status, _) = send(&app, request(Method::GET, "/nope", None, None));
    assert_eq!(status, 404);

    let (status, _) = send(&app, request(Method::GET, "/api/auth/login", None, None));
    assert_eq!(status, 405);

    let (status, body) = send(&app, request(Method::GET, "/health", None, None));
    assert_eq!(status, 200);
    assert_eq!(body["status"], "ok");
}
