//! User account handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::application::dto::{ListUsersOutput, UserOutput};
use crate::application::usecases::{
    DeleteUserUseCase, GetUserUseCase, ListUsersUseCase, SigninInput, SigninUseCase, SignupInput,
    SignupUseCase, UpdatePasswordInput, UpdatePasswordUseCase, UpdateUserInput, UpdateUserUseCase,
};
use crate::domain::repository::SearchInput;

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// Missing fields deserialize as empty strings so the use cases report them
/// uniformly instead of a generic JSON parse failure.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePasswordRequest {
    #[serde(default)]
    pub old_password: String,
    #[serde(default)]
    pub new_password: String,
}

/// Listing query string. Everything arrives as text; non-numeric page and
/// per_page values coerce to the defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListUsersQuery {
    pub page: Option<String>,
    pub per_page: Option<String>,
    pub sort: Option<String>,
    pub sort_dir: Option<String>,
    pub filter: Option<String>,
}

impl From<ListUsersQuery> for SearchInput {
    fn from(query: ListUsersQuery) -> Self {
        SearchInput {
            page: query.page.and_then(|v| v.parse().ok()),
            per_page: query.per_page.and_then(|v| v.parse().ok()),
            sort: query.sort,
            sort_dir: query.sort_dir,
            filter: query.filter,
        }
    }
}

// ---------------------------------------------------------------------------
// Presenters
// ---------------------------------------------------------------------------

/// Outward-facing user shape. The password hash never leaves the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserPresenter {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<UserOutput> for UserPresenter {
    fn from(output: UserOutput) -> Self {
        Self {
            id: output.id,
            name: output.name,
            email: output.email,
            created_at: output.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginationPresenter {
    pub current_page: u64,
    pub per_page: u64,
    pub last_page: u64,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserCollectionPresenter {
    pub data: Vec<UserPresenter>,
    pub meta: PaginationPresenter,
}

impl From<ListUsersOutput> for UserCollectionPresenter {
    fn from(output: ListUsersOutput) -> Self {
        Self {
            meta: PaginationPresenter {
                current_page: output.current_page,
                per_page: output.per_page,
                last_page: output.last_page,
                total: output.total,
            },
            data: output.items.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SigninResponse {
    pub access_token: String,
    pub user: UserPresenter,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /users
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let use_case = SignupUseCase::new(state.users.clone(), state.hasher.clone());

    let output = use_case
        .execute(SignupInput {
            name: request.name,
            email: request.email,
            password: request.password,
        })
        .await?;

    info!(user_id = %output.id, "User signed up");

    Ok((StatusCode::CREATED, Json(UserPresenter::from(output))))
}

/// POST /users/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<SigninRequest>,
) -> Result<Json<SigninResponse>, ApiError> {
    let use_case = SigninUseCase::new(state.users.clone(), state.hasher.clone());

    let output = use_case
        .execute(SigninInput {
            email: request.email,
            password: request.password,
        })
        .await?;

    let access_token = state
        .jwt_service
        .generate(output.id, &output.email)
        .map_err(|e| ApiError::internal(e.to_string()))?;

    info!(user_id = %output.id, "User signed in");

    Ok(Json(SigninResponse {
        access_token,
        user: output.into(),
    }))
}

/// GET /users
pub async fn list_users(
    RequireUser(_): RequireUser,
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<UserCollectionPresenter>, ApiError> {
    let use_case = ListUsersUseCase::new(state.users.clone());

    let output = use_case.execute(query.into()).await?;

    Ok(Json(output.into()))
}

/// GET /users/{id}
pub async fn get_user(
    RequireUser(_): RequireUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserPresenter>, ApiError> {
    let use_case = GetUserUseCase::new(state.users.clone());

    let output = use_case.execute(id).await?;

    Ok(Json(output.into()))
}

/// PUT /users/{id}
pub async fn update_user(
    RequireUser(_): RequireUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<UserPresenter>, ApiError> {
    let use_case = UpdateUserUseCase::new(state.users.clone());

    let output = use_case
        .execute(UpdateUserInput {
            id,
            name: request.name,
        })
        .await?;

    info!(user_id = %id, "User renamed");

    Ok(Json(output.into()))
}

/// PATCH /users/{id}/password
pub async fn update_password(
    RequireUser(_): RequireUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdatePasswordRequest>,
) -> Result<Json<UserPresenter>, ApiError> {
    let use_case = UpdatePasswordUseCase::new(state.users.clone(), state.hasher.clone());

    let output = use_case
        .execute(UpdatePasswordInput {
            id,
            old_password: request.old_password,
            new_password: request.new_password,
        })
        .await?;

    info!(user_id = %id, "Password updated");

    Ok(Json(output.into()))
}

/// DELETE /users/{id}
pub async fn delete_user(
    RequireUser(_): RequireUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let use_case = DeleteUserUseCase::new(state.users.clone());

    use_case.execute(id).await?;

    info!(user_id = %id, "User deleted");

    Ok(StatusCode::NO_CONTENT)
}
