//! Unified API router for Branch Office
//!
//! Merges all module routers into a single axum `Router` with CORS,
//! request tracing, and a consistent error envelope.
//!
//! ## Endpoint Map
//!
//! | Prefix                  | Module      | Description                        |
//! |-------------------------|-------------|------------------------------------|
//! | `/health`               | api         | Load balancer health probe         |
//! | `/api/v1/memorandums/*` | memorandums | Memorandum CRUD, audience, summary |
//! | `/api/v1/numbers/*`     | numbering   | Preview and issue document numbers |

use crate::access::identity;
use crate::memorandums::{memorandums_router, MemorandumsState};
use crate::numbering::{numbers_router, NumbersState};
use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the complete Branch Office HTTP application
pub fn build_app(
    memorandums_state: MemorandumsState,
    numbers_state: NumbersState,
    cors_origins: &[String],
) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(memorandums_router(memorandums_state))
        .merge(numbers_router(numbers_state))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors(cors_origins))
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// =============================================================================
// Error envelope
// =============================================================================

/// API error response: `{"error": {"code", "message"}}`
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub error: ApiErrorDetail,
}

/// API error detail
#[derive(Debug, Serialize)]
pub struct ApiErrorDetail {
    pub code: String,
    pub message: String,
}

impl ApiError {
    fn new(status: StatusCode, code: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            error: ApiErrorDetail {
                code: code.to_string(),
                message: message.into(),
            },
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, "FORBIDDEN", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

impl From<crate::Error> for ApiError {
    fn from(err: crate::Error) -> Self {
        match err {
            crate::Error::Numbering(e) => ApiError::bad_request(e.to_string()),
            other => {
                tracing::error!(error = %other, "Request failed");
                ApiError::internal("Internal server error")
            }
        }
    }
}

// =============================================================================
// CORS
// =============================================================================

fn build_cors(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            HeaderName::from_static(identity::USER_ID_HEADER),
            HeaderName::from_static(identity::PERMISSION_HEADER),
            HeaderName::from_static(identity::BRANCH_HEADER),
            HeaderName::from_static(identity::USER_TYPE_HEADER),
            HeaderName::from_static(identity::FIRST_NAME_HEADER),
            HeaderName::from_static(identity::LAST_NAME_HEADER),
        ]);

    if origins.is_empty() {
        cors.allow_origin(Any)
    } else {
        let parsed: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        cors.allow_origin(parsed)
    }
}
