// src/tests/router_tests/member_tests.rs
use crate::tests::utils::{register, request, send, test_app};
use http::Method;
use serde_json::{json, Value};

fn add_member(app: &crate::state::AppState, token: &str, body: Value) -> Value {
    let (status, member) = send(app, request(Method::POST, "/api/members", Some(token), Some(body)));
    assert_eq!(status, 200, "add failed: {member}");
    member
}

#[test]
fn add_member_derives_end_date() {
    let app = test_app();
    let token = register(&app, "owner@gym.dz");

    let member = add_member(
        &app,
        &token,
        json!({
            "name": "Amina",
            "phoneNumber": "0551234567",
            "startDate": "2024-01-01",
            "duration": 30,
            "price": 2500
        }),
    );

    assert_eq!(member["endDate"], "2024-01-31");
    assert_eq!(member["phoneNumber"], "0551234567");
    assert_eq!(member["renewalHistory"], json!([]));
    assert!(member["id"].as_str().is_some());
}

#[test]
fn add_member_rejects_invalid_input() {
    let app = test_app();
    let token = register(&app, "owner@gym.dz");

    let bad = [
        json!({ "name": "A", "startDate": "2024-01-01", "duration": 30, "price": 0 }),
        json!({ "name": "Amina", "phoneNumber": "123", "startDate": "2024-01-01", "duration": 30, "price": 0 }),
        json!({ "name": "Amina", "startDate": "2024-01-01", "duration": 0, "price": 0 }),
        json!({ "name": "Amina", "startDate": "2024-01-01", "duration": 30, "price": -5 }),
        json!({ "name": "Amina", "startDate": "01/01/2024", "duration": 30, "price": 0 }),
    ];
    for body in bad {
        let (status, _) = send(
            &app,
            request(Method::POST, "/api/members", Some(&token), Some(body.clone())),
        );
        assert_eq!(status, 400, "{body} should be rejected");
    }

    let (_, list) = send(&app, request(Method::GET, "/api/members", Some(&token), None));
    assert_eq!(list, json!([]));
}

#[test]
fn list_filters_by_status_as_of_a_date() {
    let app = test_app();
    let token = register(&app, "owner@gym.dz");

    // As of 2024-06-15: active, ending soon, expired.
    for (name, start, duration) in [
        ("Active Karim", "2024-06-01", 60),
        ("Soon Nadia", "2024-05-20", 30),
        ("Expired Walid", "2024-04-01", 30),
    ] {
        add_member(
            &app,
            &token,
            json!({ "name": name, "startDate": start, "duration": duration, "price": 1000 }),
        );
    }

    let names = |filter: &str| -> Vec<String> {
        let uri = format!("/api/members?filter={filter}&asOf=2024-06-15");
        let (status, body) = send(&app, request(Method::GET, &uri, Some(&token), None));
        assert_eq!(status, 200);
        body.as_array()
            .unwrap()
            .iter()
            .map(|m| m["name"].as_str().unwrap().to_string())
            .collect()
    };

    assert_eq!(names("all").len(), 3);
    assert_eq!(names("active"), vec!["Active Karim"]);
    assert_eq!(names("ending-soon"), vec!["Soon Nadia"]);
    assert_eq!(names("expired"), vec!["Expired Walid"]);

    let (_, body) = send(
        &app,
        request(Method::GET, "/api/members?asOf=2024-06-15&q=nadia", Some(&token), None),
    );
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["status"], "ending-soon");
    assert_eq!(body[0]["daysRemaining"], 4);

    let (status, _) = send(
        &app,
        request(Method::GET, "/api/members?filter=soonish", Some(&token), None),
    );
    assert_eq!(status, 400);
}

#[test]
fn renew_carries_remaining_days_and_records_history() {
    let app = test_app();
    let token = register(&app, "owner@gym.dz");
    let member = add_member(
        &app,
        &token,
        json!({ "name": "Walid", "startDate": "2024-01-01", "duration": 30, "price": 300 }),
    );
    let id = member["id"].as_str().unwrap();

    let (status, renewed) = send(
        &app,
        request(
            Method::POST,
            &format!("/api/members/{id}/renew?asOf=2024-01-20"),
            Some(&token),
            Some(json!({ "startDate": "2024-01-20", "duration": 30, "price": 500 })),
        ),
    );
    assert_eq!(status, 200, "{renewed}");
    assert_eq!(renewed["duration"], 41);
    assert_eq!(renewed["endDate"], "2024-03-01");
    assert_eq!(renewed["price"], 500.0);

    let history = renewed["renewalHistory"].as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["performedOn"], "2024-01-20");
    assert_eq!(history[0]["duration"], 30);
    assert_eq!(history[0]["endDate"], "2024-03-01");

    // Persisted.
    let (_, fetched) = send(
        &app,
        request(Method::GET, &format!("/api/members/{id}?asOf=2024-01-20"), Some(&token), None),
    );
    assert_eq!(fetched["endDate"], "2024-03-01");
    assert_eq!(fetched["status"], "active");
    assert_eq!(fetched["renewalHistory"].as_array().unwrap().len(), 1);
}

#[test]
fn renewal_preview_reports_carry_over() {
    let app = test_app();
    let token = register(&app, "owner@gym.dz");
    let member = add_member(
        &app,
        &token,
        json!({ "name": "Walid", "startDate": "2024-01-01", "duration": 30, "price": 300 }),
    );
    let id = member["id"].as_str().unwrap();

    let (status, preview) = send(
        &app,
        request(
            Method::GET,
            &format!("/api/members/{id}/renewal-preview?startDate=2024-01-20&duration=30"),
            Some(&token),
            None,
        ),
    );
    assert_eq!(status, 200, "{preview}");
    assert_eq!(preview["remainingDays"], 11);
    assert_eq!(preview["totalDuration"], 41);
    assert_eq!(preview["endDate"], "2024-03-01");

    // Defaults: start today (asOf), 30 days. Nothing left after the period ended.
    let (_, preview) = send(
        &app,
        request(
            Method::GET,
            &format!("/api/members/{id}/renewal-preview?asOf=2024-02-10"),
            Some(&token),
            None,
        ),
    );
    assert_eq!(preview["startDate"], "2024-02-10");
    assert_eq!(preview["remainingDays"], 0);
    assert_eq!(preview["endDate"], "2024-03-11");

    let (_, fetched) = send(&app, request(Method::GET, &format!("/api/members/{id}"), Some(&token), None));
    assert_eq!(fetched["renewalHistory"], json!([]));
}

#[test]
fn oversized_renewal_duration_is_rejected() {
    let app = test_app();
    let token = register(&app, "owner@gym.dz");
    let member = add_member(
        &app,
        &token,
        json!({ "name": "Walid", "startDate": "2024-01-01", "duration": 30, "price": 300 }),
    );
    let id = member["id"].as_str().unwrap();

    let (status, body) = send(
        &app,
        request(
            Method::GET,
            &format!(
                "/api/members/{id}/renewal-preview?startDate=2024-01-20&duration={}",
                i64::MAX
            ),
            Some(&token),
            None,
        ),
    );
    assert_eq!(status, 400, "{body}");

    let (status, _) = send(
        &app,
        request(
            Method::POST,
            &format!("/api/members/{id}/renew"),
            Some(&token),
            Some(json!({ "startDate": "2024-01-20", "duration": i64::MAX, "price": 500 })),
        ),
    );
    assert_eq!(status, 400);

    let (_, fetched) = send(&app, request(Method::GET, &format!("/api/members/{id}"), Some(&token), None));
    assert_eq!(fetched["endDate"], "2024-01-31");
    assert_eq!(fetched["renewalHistory"], json!([]));
}

#[test]
fn token_is_checked_before_query_params() {
    let app = test_app();
    let token = register(&app, "owner@gym.dz");

    let (status, _) = send(&app, request(Method::GET, "/api/members?asOf=not-a-date", None, None));
    assert_eq!(status, 401);

    let (status, _) = send(
        &app,
        request(Method::GET, "/api/members?asOf=not-a-date", Some("bogus"), None),
    );
    assert_eq!(status, 401);

    let (status, _) = send(
        &app,
        request(Method::GET, "/api/members?asOf=not-a-date", Some(&token), None),
    );
    assert_eq!(status, 400);
}

#[test]
fn update_edits_fields_and_keeps_history() {
    let app = test_app();
    let token = register(&app, "owner@gym.dz");
    let member = add_member(
        &app,
        &token,
        json!({ "name": "Walid", "startDate": "2024-01-01", "duration": 30, "price": 300 }),
    );
    let id = member["id"].as_str().unwrap();

    let (status, updated) = send(
        &app,
        request(
            Method::PUT,
            &format!("/api/members/{id}"),
            Some(&token),
            Some(json!({ "name": "Walid B.", "duration": 60 })),
        ),
    );
    assert_eq!(status, 200);
    assert_eq!(updated["name"], "Walid B.");
    assert_eq!(updated["endDate"], "2024-03-01");
    assert_eq!(updated["id"], member["id"]);
}

#[test]
fn delete_removes_member() {
    let app = test_app();
    let token = register(&app, "owner@gym.dz");
    let member = add_member(
        &app,
        &token,
        json!({ "name": "Walid", "startDate": "2024-01-01", "duration": 30, "price": 300 }),
    );
    let uri = format!("/api/members/{}", member["id"].as_str().unwrap());

    let (status, body) = send(&app, request(Method::DELETE, &uri, Some(&token), None));
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);

    let (status, _) = send(&app, request(Method::GET, &uri, Some(&token), None));
    assert_eq!(status, 404);
    let (status, _) = send(&app, request(Method::DELETE, &uri, Some(&token), None));
    assert_eq!(status, 404);
}

#[test]
fn users_only_see_their_own_members() {
    let app = test_app();
    let alice = register(&app, "alice@gym.dz");
    let bob = register(&app, "bob@gym.dz");

    let member = add_member(
        &app,
        &alice,
        json!({ "name": "Walid", "startDate": "2024-01-01", "duration": 30, "price": 300 }),
    );
    let uri = format!("/api/members/{}", member["id"].as_str().unwrap());

    let (_, list) = send(&app, request(Method::GET, "/api/members", Some(&bob), None));
    assert_eq!(list, json!([]));

    let (status, _) = send(&app, request(Method::DELETE, &uri, Some(&bob), None));
    assert_eq!(status, 404);

    let (_, list) = send(&app, request(Method::GET, "/api/members", Some(&alice), None));
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[test]
fn bad_member_ids_and_methods() {
    let app = test_app();
    let token = register(&app, "owner@gym.dz");

    let (status, _) = send(&app, request(Method::GET, "/api/members/not-a-uuid", Some(&token), None));
    assert_eq!(status, 400);

    let (status, _) = send(&app, request(Method::PATCH, "/api/members", Some(&token), None));
    assert_eq!(status, 405);
}

#[test]
fn duration_presets_are_listed() {
    let app = test_app();
    let (status, body) = send(&app, request(Method::GET, "/api/durations", None, None));
    assert_eq!(status, 200);
    let days: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["days"].as_i64().unwrap())
        .collect();
    assert_eq!(days, vec![15, 30, 60, 90, 180, 365]);
}
