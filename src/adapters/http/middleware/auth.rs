//! Authentication middleware and extractors.
//!
//! `auth_middleware` validates Bearer tokens via the `TokenService` port
//! and injects `CurrentUser` into request extensions. Handlers opt into
//! enforcement with `RequireAuth` (any authenticated user) or
//! `RequireAdmin` (admin role).

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::{AuthError, CurrentUser};
use crate::ports::TokenService;

/// Middleware state: the token validator.
pub type AuthState = Arc<dyn TokenService>;

/// Validate the Bearer token when one is present.
///
/// A missing token passes through untouched so public routes keep
/// working; `RequireAuth` rejects those requests at the handler. An
/// invalid or expired token is rejected here with 401.
pub async fn auth_middleware(
    State(tokens): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    match token {
        Some(token) => match tokens.validate(token) {
            Ok(user) => {
                request.extensions_mut().insert(user);
                next.run(request).await
            }
            Err(e) => {
                let message = match e {
                    AuthError::TokenExpired => "Token expired",
                    _ => "Invalid token",
                };
                (
                    StatusCode::UNAUTHORIZED,
                    Json(serde_json::json!({
                        "error": message,
                        "code": "UNAUTHORIZED",
                    })),
                )
                    .into_response()
            }
        },
        None => next.run(request).await,
    }
}

/// Extractor requiring an authenticated user.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub CurrentUser);

impl<S> axum::extract::FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<CurrentUser>()
                .cloned()
                .map(RequireAuth)
                .ok_or(AuthRejection::Unauthenticated)
        })
    }
}

/// Extractor requiring an authenticated admin.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub CurrentUser);

impl<S> axum::extract::FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let user = parts
                .extensions
                .get::<CurrentUser>()
                .cloned()
                .ok_or(AuthRejection::Unauthenticated)?;
            if !user.is_admin() {
                return Err(AuthRejection::Forbidden);
            }
            Ok(RequireAdmin(user))
        })
    }
}

/// Rejection for the auth extractors.
#[derive(Debug, Clone)]
pub enum AuthRejection {
    Unauthenticated,
    Forbidden,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (status, message, code) = match self {
            AuthRejection::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                "Authentication required",
                "UNAUTHORIZED",
            ),
            AuthRejection::Forbidden => {
                (StatusCode::FORBIDDEN, "Admin access required", "FORBIDDEN")
            }
        };
        (
            status,
            Json(serde_json::json!({ "error": message, "code": code })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::FromRequestParts;
    use axum::http::Request;

    use crate::domain::Role;

    fn parts_with(user: Option<CurrentUser>) -> axum::http::request::Parts {
        let mut request: Request<()> = Request::builder().uri("/test").body(()).unwrap();
        if let Some(user) = user {
            request.extensions_mut().insert(user);
        }
        request.into_parts().0
    }

    #[tokio::test]
    async fn require_auth_extracts_user() {
        let mut parts = parts_with(Some(CurrentUser::new(7, Role::Member)));
        let RequireAuth(user) = RequireAuth::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(user.id, 7);
    }

    #[tokio::test]
    async fn require_auth_rejects_anonymous() {
        let mut parts = parts_with(None);
        let result = RequireAuth::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AuthRejection::Unauthenticated)));
    }

    #[tokio::test]
    async fn require_admin_rejects_member() {
        let mut parts = parts_with(Some(CurrentUser::new(7, Role::Member)));
        let result = RequireAdmin::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AuthRejection::Forbidden)));
    }

    #[tokio::test]
    async fn require_admin_accepts_admin() {
        let mut parts = parts_with(Some(CurrentUser::new(1, Role::Admin)));
        let RequireAdmin(user) = RequireAdmin::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert!(user.is_admin());
    }

    #[test]
    fn rejection_statuses() {
        assert_eq!(
            AuthRejection::Unauthenticated.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthRejection::Forbidden.into_response().status(),
            StatusCode::FORBIDDEN
        );
    }
}
