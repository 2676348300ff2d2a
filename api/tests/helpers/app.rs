use api::auth::generate_jwt;
use api::routes::routes;
use api::state::AppState;
use axum::Router;
use axum::body::Body;
use axum::http::Request;
use db::models::user::Model as User;
use sea_orm::DatabaseConnection;
use serde_json::Value;

/// Builds the app router over a fresh in-memory database.
///
/// The returned router is cloned per request (`oneshot` consumes it); the
/// connection allows direct fixture setup and post-request assertions.
pub async fn make_test_app() -> (Router, DatabaseConnection) {
    let db = db::test_utils::setup_test_db().await;
    let app_state = AppState::new(db.clone());

    let app = Router::new().nest("/api", routes(app_state));
    (app, db)
}

pub async fn create_writer(db: &DatabaseConnection, username: &str) -> User {
    User::create(
        db,
        username,
        &format!("{username}@meduaid.com"),
        "password123",
        false,
    )
    .await
    .expect("Failed to create writer")
}

pub async fn create_admin(db: &DatabaseConnection, username: &str) -> User {
    User::create(
        db,
        username,
        &format!("{username}@meduaid.com"),
        "password123",
        true,
    )
    .await
    .expect("Failed to create admin")
}

pub fn bearer_for(user: &User) -> String {
    let (token, _) = generate_jwt(user.id, user.admin);
    format!("Bearer {token}")
}

/// Builds a JSON request with an optional bearer token.
pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");
    if let Some(token) = token {
        builder = builder.header("Authorization", token);
    }
    builder
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

/// Builds a bodyless request with an optional bearer token.
pub fn bare_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", token);
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn response_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
