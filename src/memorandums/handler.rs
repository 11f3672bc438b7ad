//! HTTP handlers for the Memorandums API
//!
//! - POST   /api/v1/memorandums              — create (assigns memorandum number)
//! - GET    /api/v1/memorandums              — list, filtered to what the user may read
//! - GET    /api/v1/memorandums/audience     — audience suggestions
//! - GET    /api/v1/memorandums/summary      — counts over readable memorandums
//! - GET    /api/v1/memorandums/:id          — detail (403 if not in audience)
//! - PUT    /api/v1/memorandums/:id          — update
//! - DELETE /api/v1/memorandums/:id          — delete
//! - PATCH  /api/v1/memorandums/:id/approver — approve (admins only)

use crate::access::{RequestUser, MEMO_AUDIENCE};
use crate::api::ApiError;
use crate::memorandums::store::{ListFilter, MemorandumStore};
use crate::memorandums::types::*;
use crate::org::OfficeBranch;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
    Json, Router,
};
use std::sync::Arc;

/// Shared state for memorandum handlers
#[derive(Clone)]
pub struct MemorandumsState {
    pub store: Arc<MemorandumStore>,
}

/// Create the memorandums router
pub fn memorandums_router(state: MemorandumsState) -> Router {
    Router::new()
        .route(
            "/api/v1/memorandums",
            get(list_memorandums).post(create_memorandum),
        )
        .route("/api/v1/memorandums/audience", get(list_audience))
        .route("/api/v1/memorandums/summary", get(get_summary))
        .route(
            "/api/v1/memorandums/:id",
            get(get_memorandum)
                .put(update_memorandum)
                .delete(delete_memorandum),
        )
        .route("/api/v1/memorandums/:id/approver", patch(approve_memorandum))
        .with_state(state)
}

/// POST /api/v1/memorandums
async fn create_memorandum(
    State(state): State<MemorandumsState>,
    user: RequestUser,
    Json(mut request): Json<CreateMemorandumRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate().map_err(ApiError::bad_request)?;
    if request.creator_id.is_none() {
        request.creator_id = user.id.clone();
    }

    let memo = state.store.create(request).await?;
    Ok((StatusCode::CREATED, Json(memo)))
}

/// GET /api/v1/memorandums
async fn list_memorandums(
    State(state): State<MemorandumsState>,
    user: RequestUser,
    Query(params): Query<ListMemorandumsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let branch = params
        .branch
        .as_deref()
        .map(str::parse::<OfficeBranch>)
        .transpose()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let filter = ListFilter {
        search: params.search.as_deref().filter(|s| !s.is_empty()),
        branch,
        skip: params.skip.unwrap_or(0),
        take: params.take,
    };

    let list = state.store.list(&filter, |m| user.can_read(&m.to)).await;
    Ok(Json(list))
}

/// GET /api/v1/memorandums/audience
async fn list_audience() -> impl IntoResponse {
    Json(MEMO_AUDIENCE)
}

/// GET /api/v1/memorandums/summary
async fn get_summary(
    State(state): State<MemorandumsState>,
    user: RequestUser,
) -> impl IntoResponse {
    Json(state.store.summary(|m| user.can_read(&m.to)).await)
}

/// GET /api/v1/memorandums/:id
async fn get_memorandum(
    State(state): State<MemorandumsState>,
    user: RequestUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let memo = readable_memorandum(&state, &user, &id).await?;
    Ok(Json(memo))
}

/// Load a memorandum the user is allowed to see: 404 if missing, 403 if
/// outside the user's audiences
async fn readable_memorandum(
    state: &MemorandumsState,
    user: &RequestUser,
    id: &str,
) -> Result<Memorandum, ApiError> {
    let memo = state
        .store
        .get(id)
        .await
        .ok_or_else(|| ApiError::not_found("Memorandum not found"))?;

    if !user.can_read(&memo.to) {
        tracing::debug!(
            id = %memo.id,
            permission = %user.permission,
            branch = %user.office_branch,
            "Memorandum access denied"
        );
        return Err(ApiError::forbidden(
            "Access denied. You do not have sufficient permissions.",
        ));
    }
    Ok(memo)
}

/// PUT /api/v1/memorandums/:id
async fn update_memorandum(
    State(state): State<MemorandumsState>,
    user: RequestUser,
    Path(id): Path<String>,
    Json(request): Json<UpdateMemorandumRequest>,
) -> Result<impl IntoResponse, ApiError> {
    readable_memorandum(&state, &user, &id).await?;

    if request.to.as_deref().is_some_and(|to| to.trim().is_empty()) {
        return Err(ApiError::bad_request("To is required"));
    }
    if request.subject.as_deref().is_some_and(|s| s.trim().is_empty()) {
        return Err(ApiError::bad_request("Subject is required"));
    }

    let memo = state
        .store
        .update(&id, request)
        .await?
        .ok_or_else(|| ApiError::not_found("Memorandum not found"))?;
    Ok(Json(memo))
}

/// DELETE /api/v1/memorandums/:id
async fn delete_memorandum(
    State(state): State<MemorandumsState>,
    user: RequestUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    readable_memorandum(&state, &user, &id).await?;
    if !state.store.delete(&id).await? {
        return Err(ApiError::not_found("Memorandum not found"));
    }
    Ok(Json(serde_json::json!({"message": "Memorandum deleted successfully"})))
}

/// PATCH /api/v1/memorandums/:id/approver
async fn approve_memorandum(
    State(state): State<MemorandumsState>,
    user: RequestUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    if !user.is_admin() {
        return Err(ApiError::forbidden("Only admins can approve memorandums"));
    }
    let approver_id = user
        .id
        .as_deref()
        .ok_or_else(|| ApiError::bad_request("Missing approver id"))?;

    state
        .store
        .set_approver(&id, approver_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Memorandum not found"))?;
    Ok(Json(serde_json::json!({"message": "Approved successfully"})))
}
