//! HTTP handlers for the Numbers API
//!
//! - GET    /api/v1/numbers/:kind/next?branch= — preview next number
//! - POST   /api/v1/numbers/:kind              — issue next number
//! - POST   /api/v1/numbers/:kind/seed         — import a legacy last number (admin)

use crate::access::RequestUser;
use crate::api::ApiError;
use crate::numbering::{DocumentKind, NumberRegistry};
use crate::org::OfficeBranch;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shared state for number handlers
#[derive(Clone)]
pub struct NumbersState {
    pub registry: Arc<NumberRegistry>,
}

/// Create the numbers router
pub fn numbers_router(state: NumbersState) -> Router {
    Router::new()
        .route("/api/v1/numbers/:kind", post(issue_number))
        .route("/api/v1/numbers/:kind/next", get(preview_number))
        .route("/api/v1/numbers/:kind/seed", post(seed_number))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct PreviewQuery {
    branch: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IssueRequest {
    office_branch: OfficeBranch,
}

#[derive(Debug, Deserialize)]
struct SeedRequest {
    number: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NumberResponse {
    kind: DocumentKind,
    office_branch: OfficeBranch,
    number: String,
}

fn parse_kind(kind: &str) -> Result<DocumentKind, ApiError> {
    kind.parse::<DocumentKind>()
        .map_err(|e| ApiError::bad_request(e.to_string()))
}

/// GET /api/v1/numbers/:kind/next
async fn preview_number(
    State(state): State<NumbersState>,
    Path(kind): Path<String>,
    Query(params): Query<PreviewQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let kind = parse_kind(&kind)?;
    let branch = params
        .branch
        .parse::<OfficeBranch>()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let number = state.registry.peek(kind, branch).await?;
    Ok(Json(NumberResponse {
        kind,
        office_branch: branch,
        number,
    }))
}

/// POST /api/v1/numbers/:kind
async fn issue_number(
    State(state): State<NumbersState>,
    Path(kind): Path<String>,
    user: RequestUser,
    Json(request): Json<IssueRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let kind = parse_kind(&kind)?;
    let number = state.registry.issue(kind, request.office_branch).await?;

    tracing::debug!(user = ?user.id, %kind, number = %number, "Number issued over API");
    Ok((
        StatusCode::CREATED,
        Json(NumberResponse {
            kind,
            office_branch: number.branch,
            number: number.to_string(),
        }),
    ))
}

/// POST /api/v1/numbers/:kind/seed
async fn seed_number(
    State(state): State<NumbersState>,
    Path(kind): Path<String>,
    user: RequestUser,
    Json(request): Json<SeedRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if !user.is_admin() {
        return Err(ApiError::forbidden("Only admins can seed document numbers"));
    }
    let kind = parse_kind(&kind)?;
    let number = state.registry.seed(kind, &request.number).await?;

    Ok(Json(NumberResponse {
        kind,
        office_branch: number.branch,
        number: number.to_string(),
    }))
}
