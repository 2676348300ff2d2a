mod helpers;

use axum::http::StatusCode;
use db::models::penalty::Model as Penalty;
use helpers::app::{bare_request, bearer_for, create_admin, create_writer, json_request, make_test_app, response_json};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn admin_issues_a_penalty() {
    let (app, db) = make_test_app().await;
    let admin = create_admin(&db, "admin").await;
    let writer = create_writer(&db, "writer").await;

    let req = json_request(
        "POST",
        "/api/penalties",
        Some(&bearer_for(&admin)),
        &json!({ "writer_id": writer.id, "reason": "Late resubmission", "amount": 2.5 }),
    );
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = response_json(response).await;
    assert_eq!(json["data"]["writer_id"], writer.id);
    assert_eq!(json["data"]["amount"], 2.5);
}

#[tokio::test]
async fn writers_cannot_issue_penalties() {
    let (app, db) = make_test_app().await;
    let writer = create_writer(&db, "writer").await;

    let req = json_request(
        "POST",
        "/api/penalties",
        Some(&bearer_for(&writer)),
        &json!({ "writer_id": writer.id, "reason": "Self-inflicted", "amount": 1.0 }),
    );
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn non_positive_amount_is_rejected() {
    let (app, db) = make_test_app().await;
    let admin = create_admin(&db, "admin").await;
    let writer = create_writer(&db, "writer").await;

    let req = json_request(
        "POST",
        "/api/penalties",
        Some(&bearer_for(&admin)),
        &json!({ "writer_id": writer.id, "reason": "Zero", "amount": 0.0 }),
    );
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = response_json(response).await;
    assert!(
        json["message"]
            .as_str()
            .unwrap()
            .contains("Penalty amount must be positive")
    );
}

#[tokio::test]
async fn penalty_for_unknown_writer_is_not_found() {
    let (app, db) = make_test_app().await;
    let admin = create_admin(&db, "admin").await;

    let req = json_request(
        "POST",
        "/api/penalties",
        Some(&bearer_for(&admin)),
        &json!({ "writer_id": 999, "reason": "Ghost", "amount": 1.0 }),
    );
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn writers_list_only_their_own_penalties() {
    let (app, db) = make_test_app().await;
    let admin = create_admin(&db, "admin").await;
    let writer = create_writer(&db, "writer").await;
    let other = create_writer(&db, "other").await;

    Penalty::create(&db, writer.id, "Late resubmission", 2.5)
        .await
        .unwrap();
    Penalty::create(&db, other.id, "Plagiarised stem", 5.0)
        .await
        .unwrap();

    // The writer only sees their own penalty, whatever filter they send.
    let req = bare_request(
        "GET",
        &format!("/api/penalties?writer_id={}", other.id),
        Some(&bearer_for(&writer)),
    );
    let response = app.clone().oneshot(req).await.unwrap();
    let json = response_json(response).await;
    let penalties = json["data"]["penalties"].as_array().unwrap();
    assert_eq!(penalties.len(), 1);
    assert_eq!(penalties[0]["writer_id"], writer.id);

    // The admin sees everything, and can filter by writer.
    let req = bare_request("GET", "/api/penalties", Some(&bearer_for(&admin)));
    let response = app.clone().oneshot(req).await.unwrap();
    let json = response_json(response).await;
    assert_eq!(json["data"]["penalties"].as_array().unwrap().len(), 2);

    let req = bare_request(
        "GET",
        &format!("/api/penalties?writer_id={}", other.id),
        Some(&bearer_for(&admin)),
    );
    let response = app.oneshot(req).await.unwrap();
    let json = response_json(response).await;
    assert_eq!(json["data"]["penalties"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn admin_edits_and_deletes_a_penalty() {
    let (app, db) = make_test_app().await;
    let admin = create_admin(&db, "admin").await;
    let writer = create_writer(&db, "writer").await;

    let penalty = Penalty::create(&db, writer.id, "Late resubmission", 2.5)
        .await
        .unwrap();

    let req = json_request(
        "PUT",
        &format!("/api/penalties/{}", penalty.id),
        Some(&bearer_for(&admin)),
        &json!({ "amount": 4.0 }),
    );
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["data"]["amount"], 4.0);
    assert_eq!(json["data"]["reason"], "Late resubmission");

    let req = bare_request(
        "DELETE",
        &format!("/api/penalties/{}", penalty.id),
        Some(&bearer_for(&admin)),
    );
    assert_eq!(
        app.clone().oneshot(req).await.unwrap().status(),
        StatusCode::OK
    );

    let req = bare_request(
        "DELETE",
        &format!("/api/penalties/{}", penalty.id),
        Some(&bearer_for(&admin)),
    );
    assert_eq!(
        app.oneshot(req).await.unwrap().status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn users_listing_is_admin_only() {
    let (app, db) = make_test_app().await;
    let admin = create_admin(&db, "admin").await;
    let writer = create_writer(&db, "writer").await;

    let req = bare_request("GET", "/api/users", Some(&bearer_for(&writer)));
    assert_eq!(
        app.clone().oneshot(req).await.unwrap().status(),
        StatusCode::FORBIDDEN
    );

    let req = bare_request("GET", "/api/users", Some(&bearer_for(&admin)));
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["data"]["users"].as_array().unwrap().len(), 2);
}
