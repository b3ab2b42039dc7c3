//! User endpoints - Resource description, lookup, and creation.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::state::AppState;
use crate::config::Descriptor;
use crate::domain::UserResponse;
use crate::errors::AppResult;

/// Payload for creating a user.
///
/// The identifier is always assigned by the store; any id sent by the
/// client is ignored.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    /// User display name
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Alice")]
    pub name: String,
    /// User email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "alice@example.com")]
    pub email: Option<String>,
    /// User password (minimum 8 characters), hashed before storage
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: Option<String>,
}

/// User routes, nested under `/api/user` by the router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(describe).post(create_user))
        .route("/:id", get(get_user))
}

/// Describe the user resource.
#[utoipa::path(
    get,
    path = "/api/user",
    tag = "Users",
    responses(
        (status = 200, description = "Static descriptor for the user resource")
    )
)]
pub async fn describe(State(state): State<AppState>) -> Json<Descriptor> {
    Json(state.user_service.descriptor().as_ref().clone())
}

/// Fetch a single user by id.
#[utoipa::path(
    get,
    path = "/api/user/{id}",
    tag = "Users",
    params(
        ("id" = i64, Path, description = "User identifier")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "No user with that id")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.get_user(id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Create a user.
#[utoipa::path(
    post,
    path = "/api/user",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid payload")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = state
        .user_service
        .create_user(payload.name, payload.email, payload.password)
        .await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}
