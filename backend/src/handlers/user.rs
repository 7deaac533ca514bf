//! User-related API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;

use crate::error::{ApiError, ApiResult};
use crate::models::{NewUser, User};
use crate::services::UserService;

/// List every user
pub async fn list_users(State(service): State<Arc<UserService>>) -> ApiResult<Json<Vec<User>>> {
    let users = service.list().await?;
    Ok(Json(users))
}

/// Get a user by ID
pub async fn get_user(
    State(service): State<Arc<UserService>>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
) -> ApiResult<Json<User>> {
    service
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(ApiError::user_not_found)
}

/// Create a new user
pub async fn create_user(
    State(service): State<Arc<UserService>>,
    WithRejection(Json(payload), _): WithRejection<Json<NewUser>, ApiError>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let user = service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Replace name and email of the user identified by the body's `id`
pub async fn update_user(
    State(service): State<Arc<UserService>>,
    WithRejection(Json(payload), _): WithRejection<Json<User>, ApiError>,
) -> ApiResult<Json<User>> {
    service
        .update(payload)
        .await?
        .map(Json)
        .ok_or_else(ApiError::user_not_found)
}

/// Delete a user; unknown ids still succeed
pub async fn delete_user(
    State(service): State<Arc<UserService>>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
) -> ApiResult<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
