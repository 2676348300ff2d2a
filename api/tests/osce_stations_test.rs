mod helpers;

use axum::http::StatusCode;
use db::models::osce_station::Entity as StationEntity;
use helpers::app::{
    bare_request, bearer_for, create_admin, create_writer, json_request, make_test_app,
    response_json,
};
use sea_orm::EntityTrait;
use serde_json::{Value, json};
use tower::ServiceExt;

fn station_body() -> Value {
    json!({
        "title": "Chest pain history",
        "category": "Medicine",
        "subject": "Cardiology",
        "topic": "Acute coronary syndrome",
        "case_description": "A 54-year-old presents with central chest pain.",
        "marking_scheme": [
            {
                "section": "History",
                "items": [
                    { "desc": "Asks about onset", "score": 2.0 },
                    { "desc": "Asks about radiation", "score": 3.0 }
                ]
            }
        ],
        "follow_ups": [
            { "question": "Name one first-line investigation", "answers": ["ECG"], "score": 1.0 }
        ]
    })
}

#[tokio::test]
async fn writer_creates_station_with_computed_total() {
    let (app, db) = make_test_app().await;
    let writer = create_writer(&db, "writer").await;

    let req = json_request(
        "POST",
        "/api/osce-stations",
        Some(&bearer_for(&writer)),
        &station_body(),
    );
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = response_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["writer_id"], writer.id);
    assert_eq!(json["data"]["status"], "pending");
    assert_eq!(json["data"]["total_marks"], 6.0);
}

#[tokio::test]
async fn creation_requires_authentication() {
    let (app, _db) = make_test_app().await;

    let req = json_request("POST", "/api/osce-stations", None, &station_body());
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn negative_score_fails_creation() {
    let (app, db) = make_test_app().await;
    let writer = create_writer(&db, "writer").await;

    let mut body = station_body();
    body["marking_scheme"][0]["items"][0]["score"] = json!(-1.0);

    let req = json_request(
        "POST",
        "/api/osce-stations",
        Some(&bearer_for(&writer)),
        &body,
    );
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = response_json(response).await;
    assert_eq!(json["success"], false);
    let message = json["message"].as_str().unwrap();
    assert!(message.contains("Asks about onset"));
    assert!(message.contains("non-negative"));
}

#[tokio::test]
async fn mismatched_total_fails_creation() {
    let (app, db) = make_test_app().await;
    let writer = create_writer(&db, "writer").await;

    let mut body = station_body();
    body["total_marks"] = json!(10.0);

    let req = json_request(
        "POST",
        "/api/osce-stations",
        Some(&bearer_for(&writer)),
        &body,
    );
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = response_json(response).await;
    let message = json["message"].as_str().unwrap();
    assert!(message.contains("provided 10"));
    assert!(message.contains("calculated 6"));
}

#[tokio::test]
async fn station_without_scorable_content_fails_creation() {
    let (app, db) = make_test_app().await;
    let writer = create_writer(&db, "writer").await;

    let mut body = station_body();
    body["marking_scheme"] = json!([]);
    body["follow_ups"] = json!([]);

    let req = json_request(
        "POST",
        "/api/osce-stations",
        Some(&bearer_for(&writer)),
        &body,
    );
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn admin_creates_on_behalf_of_writer() {
    let (app, db) = make_test_app().await;
    let admin = create_admin(&db, "admin").await;
    let writer = create_writer(&db, "writer").await;

    let mut body = station_body();
    body["writer_id"] = json!(writer.id);

    let req = json_request(
        "POST",
        "/api/osce-stations",
        Some(&bearer_for(&admin)),
        &body,
    );
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = response_json(response).await;
    assert_eq!(json["data"]["writer_id"], writer.id);
}

async fn create_station_as(
    app: &axum::Router,
    token: &str,
    body: &Value,
) -> i64 {
    let req = json_request("POST", "/api/osce-stations", Some(token), body);
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    response_json(response).await["data"]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn admin_approves_pending_station() {
    let (app, db) = make_test_app().await;
    let admin = create_admin(&db, "admin").await;
    let writer = create_writer(&db, "writer").await;

    let id = create_station_as(&app, &bearer_for(&writer), &station_body()).await;

    let req = json_request(
        "PUT",
        &format!("/api/osce-stations/{id}"),
        Some(&bearer_for(&admin)),
        &json!({ "status": "approved" }),
    );
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert_eq!(json["data"]["status"], "approved");
    assert_eq!(json["data"]["rejection_reason"], Value::Null);
}

#[tokio::test]
async fn admin_rejects_with_reason_and_writer_resubmission_clears_it() {
    let (app, db) = make_test_app().await;
    let admin = create_admin(&db, "admin").await;
    let writer = create_writer(&db, "writer").await;

    let id = create_station_as(&app, &bearer_for(&writer), &station_body()).await;

    // Admin rejects with a reason.
    let req = json_request(
        "PUT",
        &format!("/api/osce-stations/{id}"),
        Some(&bearer_for(&admin)),
        &json!({ "status": "rejected", "rejection_reason": "Marking scheme too sparse" }),
    );
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["data"]["status"], "rejected");
    assert_eq!(json["data"]["rejection_reason"], "Marking scheme too sparse");

    // The writer's edit resubmits and clears the reason, whatever they send.
    let req = json_request(
        "PUT",
        &format!("/api/osce-stations/{id}"),
        Some(&bearer_for(&writer)),
        &json!({ "title": "Chest pain focused history", "status": "draft" }),
    );
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["data"]["status"], "pending");
    assert_eq!(json["data"]["rejection_reason"], Value::Null);
    assert_eq!(json["data"]["title"], "Chest pain focused history");
}

#[tokio::test]
async fn rejection_without_reason_is_rejected() {
    let (app, db) = make_test_app().await;
    let admin = create_admin(&db, "admin").await;
    let writer = create_writer(&db, "writer").await;

    let id = create_station_as(&app, &bearer_for(&writer), &station_body()).await;

    let req = json_request(
        "PUT",
        &format!("/api/osce-stations/{id}"),
        Some(&bearer_for(&admin)),
        &json!({ "status": "rejected" }),
    );
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = response_json(response).await;
    assert!(json["message"].as_str().unwrap().contains("rejection reason"));
}

#[tokio::test]
async fn admin_invalid_status_is_rejected() {
    let (app, db) = make_test_app().await;
    let admin = create_admin(&db, "admin").await;
    let writer = create_writer(&db, "writer").await;

    let id = create_station_as(&app, &bearer_for(&writer), &station_body()).await;

    let req = json_request(
        "PUT",
        &format!("/api/osce-stations/{id}"),
        Some(&bearer_for(&admin)),
        &json!({ "status": "archived" }),
    );
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = response_json(response).await;
    assert!(json["message"].as_str().unwrap().contains("archived"));
}

#[tokio::test]
async fn writer_cannot_edit_pending_station() {
    let (app, db) = make_test_app().await;
    let writer = create_writer(&db, "writer").await;

    let id = create_station_as(&app, &bearer_for(&writer), &station_body()).await;

    let req = json_request(
        "PUT",
        &format!("/api/osce-stations/{id}"),
        Some(&bearer_for(&writer)),
        &json!({ "title": "New title" }),
    );
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn non_owner_cannot_edit_station() {
    let (app, db) = make_test_app().await;
    let writer = create_writer(&db, "writer").await;
    let intruder = create_writer(&db, "intruder").await;

    let mut body = station_body();
    body["status"] = json!("draft");
    let id = create_station_as(&app, &bearer_for(&writer), &body).await;

    let req = json_request(
        "PUT",
        &format!("/api/osce-stations/{id}"),
        Some(&bearer_for(&intruder)),
        &json!({ "title": "Hijacked" }),
    );
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn editing_marking_scheme_recomputes_total() {
    let (app, db) = make_test_app().await;
    let writer = create_writer(&db, "writer").await;

    let mut body = station_body();
    body["status"] = json!("draft");
    let id = create_station_as(&app, &bearer_for(&writer), &body).await;

    let req = json_request(
        "PUT",
        &format!("/api/osce-stations/{id}"),
        Some(&bearer_for(&writer)),
        &json!({
            "marking_scheme": [
                {
                    "section": "Examination",
                    "items": [ { "desc": "Palpates apex beat", "score": 3.0 } ]
                }
            ]
        }),
    );
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    // New scheme (3.0) plus the persisted follow-up (1.0).
    assert_eq!(json["data"]["total_marks"], 4.0);
    assert_eq!(json["data"]["status"], "draft");
}

#[tokio::test]
async fn scoring_failure_aborts_whole_update() {
    let (app, db) = make_test_app().await;
    let writer = create_writer(&db, "writer").await;

    let mut body = station_body();
    body["status"] = json!("draft");
    let id = create_station_as(&app, &bearer_for(&writer), &body).await;

    let req = json_request(
        "PUT",
        &format!("/api/osce-stations/{id}"),
        Some(&bearer_for(&writer)),
        &json!({
            "title": "Should not be applied",
            "marking_scheme": [
                { "section": "History", "items": [ { "desc": "x", "score": -1.0 } ] }
            ]
        }),
    );
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let station = StationEntity::find_by_id(id).one(&db).await.unwrap().unwrap();
    assert_eq!(station.title, "Chest pain history");
    assert_eq!(station.total_marks, 6.0);
}

#[tokio::test]
async fn writer_cannot_delete_approved_station_but_admin_can() {
    let (app, db) = make_test_app().await;
    let admin = create_admin(&db, "admin").await;
    let writer = create_writer(&db, "writer").await;

    let id = create_station_as(&app, &bearer_for(&writer), &station_body()).await;

    let req = json_request(
        "PUT",
        &format!("/api/osce-stations/{id}"),
        Some(&bearer_for(&admin)),
        &json!({ "status": "approved" }),
    );
    assert_eq!(
        app.clone().oneshot(req).await.unwrap().status(),
        StatusCode::OK
    );

    let req = bare_request(
        "DELETE",
        &format!("/api/osce-stations/{id}"),
        Some(&bearer_for(&writer)),
    );
    assert_eq!(
        app.clone().oneshot(req).await.unwrap().status(),
        StatusCode::FORBIDDEN
    );

    let req = bare_request(
        "DELETE",
        &format!("/api/osce-stations/{id}"),
        Some(&bearer_for(&admin)),
    );
    assert_eq!(app.oneshot(req).await.unwrap().status(), StatusCode::OK);

    assert!(
        StationEntity::find_by_id(id)
            .one(&db)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn admin_listing_hides_drafts_unless_requested() {
    let (app, db) = make_test_app().await;
    let admin = create_admin(&db, "admin").await;
    let writer = create_writer(&db, "writer").await;

    let mut draft = station_body();
    draft["status"] = json!("draft");
    create_station_as(&app, &bearer_for(&writer), &draft).await;
    create_station_as(&app, &bearer_for(&writer), &station_body()).await;

    let req = bare_request("GET", "/api/osce-stations", Some(&bearer_for(&admin)));
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["data"]["stations"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"]["stations"][0]["status"], "pending");

    let req = bare_request(
        "GET",
        "/api/osce-stations?status=draft",
        Some(&bearer_for(&admin)),
    );
    let response = app.oneshot(req).await.unwrap();
    let json = response_json(response).await;
    assert_eq!(json["data"]["stations"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"]["stations"][0]["status"], "draft");
}

#[tokio::test]
async fn writers_see_only_their_own_stations() {
    let (app, db) = make_test_app().await;
    let writer = create_writer(&db, "writer").await;
    let other = create_writer(&db, "other").await;

    create_station_as(&app, &bearer_for(&writer), &station_body()).await;
    create_station_as(&app, &bearer_for(&other), &station_body()).await;

    let req = bare_request("GET", "/api/osce-stations", Some(&bearer_for(&writer)));
    let response = app.clone().oneshot(req).await.unwrap();
    let json = response_json(response).await;
    let stations = json["data"]["stations"].as_array().unwrap();
    assert_eq!(stations.len(), 1);
    assert_eq!(stations[0]["writer_id"], writer.id);

    // A single fetch of someone else's station is forbidden, not hidden.
    let foreign_id = {
        let req = bare_request("GET", "/api/osce-stations", Some(&bearer_for(&other)));
        let response = app.clone().oneshot(req).await.unwrap();
        response_json(response).await["data"]["stations"][0]["id"]
            .as_i64()
            .unwrap()
    };
    let req = bare_request(
        "GET",
        &format!("/api/osce-stations/{foreign_id}"),
        Some(&bearer_for(&writer)),
    );
    assert_eq!(
        app.oneshot(req).await.unwrap().status(),
        StatusCode::FORBIDDEN
    );
}

#[tokio::test]
async fn unknown_station_is_not_found() {
    let (app, db) = make_test_app().await;
    let writer = create_writer(&db, "writer").await;

    let req = bare_request("GET", "/api/osce-stations/999", Some(&bearer_for(&writer)));
    assert_eq!(
        app.oneshot(req).await.unwrap().status(),
        StatusCode::NOT_FOUND
    );
}
