use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use common::format_validation_errors;
use db::models::user::Model as User;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::generate_jwt;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 32, message = "Username must be 3 to 32 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

#[derive(Debug, Serialize, Default)]
pub struct AuthUserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub admin: bool,
    pub token: String,
    pub expires_at: String,
}

/// POST /auth/register
///
/// Register a new writer account and issue a JWT.
///
/// ### Responses
/// - `201 Created` with the user and token
/// - `400 Bad Request` on validation failure
/// - `409 Conflict` when the username or email is taken
pub async fn register(
    State(app_state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<AuthUserResponse>::error(
                format_validation_errors(&validation_errors),
            )),
        );
    }

    let db = app_state.db();

    match User::find_by_email(db, &req.email).await {
        Ok(Some(_)) => {
            return (
                StatusCode::CONFLICT,
                Json(ApiResponse::<AuthUserResponse>::error(
                    "A user with this email already exists",
                )),
            );
        }
        Ok(None) => {}
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<AuthUserResponse>::error(
                    "Database error while checking email",
                )),
            );
        }
    }

    match User::find_by_username(db, &req.username).await {
        Ok(Some(_)) => {
            return (
                StatusCode::CONFLICT,
                Json(ApiResponse::<AuthUserResponse>::error(
                    "A user with this username already exists",
                )),
            );
        }
        Ok(None) => {}
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<AuthUserResponse>::error(
                    "Database error while checking username",
                )),
            );
        }
    }

    match User::create(db, &req.username, &req.email, &req.password, false).await {
        Ok(user) => {
            let (token, expires_at) = generate_jwt(user.id, user.admin);
            let response = AuthUserResponse {
                id: user.id,
                username: user.username,
                email: user.email,
                admin: user.admin,
                token,
                expires_at,
            };
            (
                StatusCode::CREATED,
                Json(ApiResponse::success(response, "User registered successfully")),
            )
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<AuthUserResponse>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Username or email address.
    pub username: String,
    pub password: String,
}

/// POST /auth/login
///
/// Authenticate an existing user (by username or email) and issue a JWT.
///
/// ### Responses
/// - `200 OK` with the user and token
/// - `401 Unauthorized` on unknown user or wrong password
pub async fn login(
    State(app_state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    match User::verify_credentials(db, &req.username, &req.password).await {
        Ok(Some(user)) => {
            let (token, expires_at) = generate_jwt(user.id, user.admin);
            let response = AuthUserResponse {
                id: user.id,
                username: user.username,
                email: user.email,
                admin: user.admin,
                token,
                expires_at,
            };
            (
                StatusCode::OK,
                Json(ApiResponse::success(response, "Login successful")),
            )
        }
        Ok(None) => (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::<AuthUserResponse>::error("Invalid credentials")),
        ),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<AuthUserResponse>::error(
                "Database error while verifying credentials",
            )),
        ),
    }
}
