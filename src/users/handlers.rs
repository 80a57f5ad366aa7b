use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    routing::{get, post, put},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

use super::dto::UserPayload;
use super::store::User;
use super::validator;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/:id", get(get_user))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user))
        .route("/users/:id", put(update_user).delete(delete_user))
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    let users = state.store.list().await;
    if users.is_empty() {
        warn!("user list requested, but the store is empty");
        return Err(ApiError::NotFound("There are no users."));
    }

    info!(count = users.len(), "user list requested");
    Ok(Json(users))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, ApiError> {
    match state.store.find(id).await {
        Some(user) => Ok(Json(user)),
        None => {
            warn!(user_id = %id, "user not found");
            Err(ApiError::NotFound("User not found."))
        }
    }
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<UserPayload>,
) -> Result<(StatusCode, HeaderMap, Json<User>), ApiError> {
    let candidate = User {
        id: payload.id.unwrap_or_else(Uuid::new_v4),
        name: payload.name,
        email: payload.email.unwrap_or_default(),
    };

    let errors = validator::validate(&candidate);
    if !errors.is_empty() {
        warn!(user_id = %candidate.id, ?errors, "user rejected by validation");
        return Err(ApiError::Validation(errors));
    }

    let id = candidate.id;
    let email = candidate.email.clone();
    let user = match state.store.insert(candidate).await {
        Ok(user) => user,
        Err(e) => {
            warn!(user_id = %id, email = %email, "attempted to create a duplicate user");
            return Err(e.into());
        }
    };

    info!(user_id = %user.id, email = %user.email, "user created");

    let mut headers = HeaderMap::new();
    headers.insert(
        header::LOCATION,
        format!("/api/users/{}", user.id).parse().unwrap(),
    );

    Ok((StatusCode::CREATED, headers, Json(user)))
}

#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UserPayload>,
) -> Result<Json<User>, ApiError> {
    let Some(existing) = state.store.find(id).await else {
        warn!(user_id = %id, "attempted to update a non-existent user");
        return Err(ApiError::NotFound("User not found."));
    };

    // The candidate keeps the stored id: the id is immutable, and the
    // store's uniqueness check must not count the record against itself.
    let candidate = User {
        id: existing.id,
        name: payload.name,
        email: payload.email.unwrap_or_default(),
    };

    let errors = validator::validate(&candidate);
    if !errors.is_empty() {
        warn!(user_id = %id, ?errors, "user update rejected by validation");
        return Err(ApiError::Validation(errors));
    }

    match state.store.update(id, candidate.name, candidate.email).await {
        Ok(Some(user)) => {
            info!(user_id = %user.id, email = %user.email, "user updated");
            Ok(Json(user))
        }
        Ok(None) => {
            warn!(user_id = %id, "attempted to update a non-existent user");
            Err(ApiError::NotFound("User not found."))
        }
        Err(e) => {
            warn!(user_id = %id, "attempted to take an email owned by another user");
            Err(e.into())
        }
    }
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let removed = state.store.remove(id).await;
    if removed == 0 {
        warn!(user_id = %id, "attempted to delete a non-existent user");
        return Err(ApiError::NotFound("User not found."));
    }

    info!(user_id = %id, removed, "user deleted");
    Ok(StatusCode::NO_CONTENT)
}
