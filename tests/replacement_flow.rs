#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use chrono::{Duration, Utc};
use common::{MockRemote, RemoteState, shift};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

/// Shift 30 belongs to employee 7 (sam), started an hour ago and was missed.
async fn remote_with_missed_shift() -> MockRemote {
    let now = Utc::now();
    let mut missed = shift(30, 7, now - Duration::hours(1), now - Duration::days(2));
    missed.is_missed = true;

    MockRemote::start(
        RemoteState::default()
            .user(1, "maria", "manager", Some(100))
            .user(2, "sam", "employee", Some(7))
            .user(3, "ana", "employee", Some(8))
            .user(4, "lee", "employee", Some(9))
            .shift(missed),
    )
    .await
}

#[actix_web::test]
async fn request_can_only_be_approved_once() {
    let remote = remote_with_missed_shift().await;
    let app = spawn_app!(remote);
    let ana = sign_in!(app, "ana");
    let maria = sign_in!(app, "maria");

    let resp = test::call_service(
        &app,
        common::post("/api/replacement-requests", Some(&ana), json!({ "shift": 30, "notes": "on my way" })).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    let id = created["id"].as_u64().unwrap();
    assert_eq!(created["status"], json!("pending"));

    let approve = format!("/api/replacement-requests/{id}/approve");
    let resp = test::call_service(&app, common::post(&approve, Some(&maria), json!({})).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let approved: Value = test::read_body_json(resp).await;
    assert_eq!(approved["status"], json!("approved"));

    let resp = test::call_service(&app, common::post(&approve, Some(&maria), json!({})).to_request()).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["error"],
        json!("This replacement request has already been processed")
    );

    assert_eq!(remote.state().approve_calls, 1);
    assert_eq!(remote.state().shifts[&30].replacement_employee, Some(8));
}

#[actix_web::test]
async fn rejected_request_cannot_be_approved() {
    let remote = remote_with_missed_shift().await;
    let app = spawn_app!(remote);
    let ana = sign_in!(app, "ana");
    let maria = sign_in!(app, "maria");

    let resp = test::call_service(
        &app,
        common::post("/api/replacement-requests", Some(&ana), json!({ "shift": 30 })).to_request(),
    )
    .await;
    let created: Value = test::read_body_json(resp).await;
    let id = created["id"].as_u64().unwrap();

    let resp = test::call_service(
        &app,
        common::post(
            &format!("/api/replacement-requests/{id}/reject"),
            Some(&maria),
            json!({ "reviewer_notes": "Covered already" }),
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let rejected: Value = test::read_body_json(resp).await;
    assert_eq!(rejected["reviewer_notes"], json!("Covered already"));

    let resp = test::call_service(
        &app,
        common::post(&format!("/api/replacement-requests/{id}/approve"), Some(&maria), json!({})).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(remote.state().approve_calls, 0);
}

#[actix_web::test]
async fn owner_and_duplicates_are_refused() {
    let remote = remote_with_missed_shift().await;
    let app = spawn_app!(remote);
    let sam = sign_in!(app, "sam");
    let ana = sign_in!(app, "ana");

    let resp = test::call_service(
        &app,
        common::post("/api/replacement-requests", Some(&sam), json!({ "shift": 30 })).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let first = test::call_service(
        &app,
        common::post("/api/replacement-requests", Some(&ana), json!({ "shift": 30 })).to_request(),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let second = test::call_service(
        &app,
        common::post("/api/replacement-requests", Some(&ana), json!({ "shift": 30 })).to_request(),
    )
    .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    assert_eq!(remote.state().requests.len(), 1);
}

#[actix_web::test]
async fn employees_cannot_review_requests() {
    let remote = remote_with_missed_shift().await;
    let app = spawn_app!(remote);
    let ana = sign_in!(app, "ana");
    let lee = sign_in!(app, "lee");

    let resp = test::call_service(
        &app,
        common::post("/api/replacement-requests", Some(&ana), json!({ "shift": 30 })).to_request(),
    )
    .await;
    let created: Value = test::read_body_json(resp).await;
    let id = created["id"].as_u64().unwrap();

    let resp = test::call_service(
        &app,
        common::post(&format!("/api/replacement-requests/{id}/approve"), Some(&lee), json!({})).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(remote.state().approve_calls, 0);
}

#[actix_web::test]
async fn only_the_approved_replacement_may_clock_in() {
    let remote = remote_with_missed_shift().await;
    let app = spawn_app!(remote);
    let sam = sign_in!(app, "sam");
    let ana = sign_in!(app, "ana");
    let lee = sign_in!(app, "lee");
    let maria = sign_in!(app, "maria");

    // nobody approved yet: a co-worker cannot take the shift
    let resp = test::call_service(
        &app,
        common::post("/api/time-clock/clock-in", Some(&ana), json!({ "shift": 30 })).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = test::call_service(
        &app,
        common::post("/api/replacement-requests", Some(&ana), json!({ "shift": 30 })).to_request(),
    )
    .await;
    let created: Value = test::read_body_json(resp).await;
    let id = created["id"].as_u64().unwrap();
    let resp = test::call_service(
        &app,
        common::post(&format!("/api/replacement-requests/{id}/approve"), Some(&maria), json!({})).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    for stranger in [&lee, &sam] {
        let resp = test::call_service(
            &app,
            common::post("/api/time-clock/clock-in", Some(stranger), json!({ "shift": 30 })).to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }
    assert!(remote.state().entries.is_empty());

    let resp = test::call_service(
        &app,
        common::post("/api/shifts/30/start-replacement", Some(&ana), json!({})).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let entry: Value = test::read_body_json(resp).await;
    assert_eq!(entry["employee"], json!(8));
    assert_eq!(entry["shift"], json!(30));

    let resp = test::call_service(
        &app,
        common::post("/api/time-clock/clock-in", Some(&ana), json!({ "shift": 30 })).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn approved_replacement_lists_the_covered_shift() {
    let remote = remote_with_missed_shift().await;
    let app = spawn_app!(remote);
    let ana = sign_in!(app, "ana");
    let lee = sign_in!(app, "lee");
    let maria = sign_in!(app, "maria");

    let shift_ids = |views: Value| -> Vec<u64> {
        views
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["id"].as_u64().unwrap())
            .collect()
    };

    let resp = test::call_service(&app, common::get("/api/shifts", Some(&ana)).to_request()).await;
    assert_eq!(shift_ids(test::read_body_json(resp).await), Vec::<u64>::new());

    let resp = test::call_service(
        &app,
        common::post("/api/replacement-requests", Some(&ana), json!({ "shift": 30 })).to_request(),
    )
    .await;
    let created: Value = test::read_body_json(resp).await;
    let id = created["id"].as_u64().unwrap();
    let resp = test::call_service(
        &app,
        common::post(&format!("/api/replacement-requests/{id}/approve"), Some(&maria), json!({})).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(&app, common::get("/api/shifts", Some(&ana)).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(shift_ids(test::read_body_json(resp).await), vec![30]);

    let resp = test::call_service(&app, common::get("/api/shifts", Some(&lee)).to_request()).await;
    assert_eq!(shift_ids(test::read_body_json(resp).await), Vec::<u64>::new());
}
