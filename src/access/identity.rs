//! Requesting user identity
//!
//! The service sits behind an auth proxy that verifies the session and
//! forwards the user as `x-user-*` headers. Permission and branch are
//! required; everything else is optional.

use crate::api::ApiError;
use crate::org::{OfficeBranch, PermissionType, UserType};
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

pub const USER_ID_HEADER: &str = "x-user-id";
pub const PERMISSION_HEADER: &str = "x-user-permission";
pub const BRANCH_HEADER: &str = "x-user-branch";
pub const USER_TYPE_HEADER: &str = "x-user-type";
pub const FIRST_NAME_HEADER: &str = "x-user-first-name";
pub const LAST_NAME_HEADER: &str = "x-user-last-name";

/// Authenticated user making the request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestUser {
    pub id: Option<String>,
    pub permission: PermissionType,
    pub office_branch: OfficeBranch,
    pub user_type: UserType,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl RequestUser {
    /// Whether this user may read a memorandum addressed to `audience`
    pub fn can_read(&self, audience: &str) -> bool {
        super::can_access_memo(
            self.permission,
            self.office_branch,
            audience,
            self.first_name.as_deref(),
            self.last_name.as_deref(),
        )
    }

    pub fn is_admin(&self) -> bool {
        self.user_type == UserType::Admin
    }
}

fn header<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for RequestUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let permission = header(parts, PERMISSION_HEADER)
            .ok_or_else(|| ApiError::unauthorized("Missing user permission"))?
            .parse::<PermissionType>()
            .map_err(|e| ApiError::unauthorized(e.to_string()))?;

        let office_branch = header(parts, BRANCH_HEADER)
            .ok_or_else(|| ApiError::unauthorized("Missing user branch"))?
            .parse::<OfficeBranch>()
            .map_err(|e| ApiError::unauthorized(e.to_string()))?;

        let user_type = match header(parts, USER_TYPE_HEADER) {
            Some(value) => value
                .parse::<UserType>()
                .map_err(|e| ApiError::unauthorized(e.to_string()))?,
            None => UserType::default(),
        };

        Ok(Self {
            id: header(parts, USER_ID_HEADER).map(str::to_string),
            permission,
            office_branch,
            user_type,
            first_name: header(parts, FIRST_NAME_HEADER).map(str::to_string),
            last_name: header(parts, LAST_NAME_HEADER).map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Request, StatusCode};
    use axum::response::IntoResponse;

    async fn extract(request: Request<()>) -> Result<RequestUser, ApiError> {
        let (mut parts, _) = request.into_parts();
        RequestUser::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_extract_full_identity() {
        let request = Request::builder()
            .header(USER_ID_HEADER, "u-1")
            .header(PERMISSION_HEADER, "ACCOUNTING")
            .header(BRANCH_HEADER, "CEBU")
            .header(USER_TYPE_HEADER, "ADMIN")
            .header(FIRST_NAME_HEADER, "Jane")
            .header(LAST_NAME_HEADER, "Doe")
            .body(())
            .unwrap();

        let user = extract(request).await.unwrap();
        assert_eq!(user.id.as_deref(), Some("u-1"));
        assert_eq!(user.permission, PermissionType::Accounting);
        assert_eq!(user.office_branch, OfficeBranch::Cebu);
        assert!(user.is_admin());
        assert!(user.can_read("Jane Doe"));
        assert!(user.can_read("Accounting Cebu"));
        assert!(!user.can_read("Accounting Calbayog"));
    }

    #[tokio::test]
    async fn test_defaults_to_employee() {
        let request = Request::builder()
            .header(PERMISSION_HEADER, "RESERVATION")
            .header(BRANCH_HEADER, "FUENTE")
            .body(())
            .unwrap();

        let user = extract(request).await.unwrap();
        assert_eq!(user.user_type, UserType::Employee);
        assert!(user.first_name.is_none());
    }

    #[tokio::test]
    async fn test_missing_permission_is_unauthorized() {
        let request = Request::builder()
            .header(BRANCH_HEADER, "CEBU")
            .body(())
            .unwrap();

        let err = extract(request).await.unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unknown_branch_is_unauthorized() {
        let request = Request::builder()
            .header(PERMISSION_HEADER, "SUPERVISOR")
            .header(BRANCH_HEADER, "MANILA")
            .body(())
            .unwrap();

        let err = extract(request).await.unwrap_err();
        assert_eq!(err.error.code, "UNAUTHORIZED");
    }
}
