//! Auth Middleware
//!
//! Bearer-token gate for protected routes, and the extractor handlers use to
//! read the identity it attaches.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::{header, request::Parts};
use axum::middleware::Next;
use axum::response::Response;
use kernel::id::UserId;
use std::sync::Arc;

use crate::application::token::TokenService;
use crate::error::AuthError;

/// Identity of the caller, inserted into request extensions by [`require_auth`]
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: UserId,
}

/// Middleware that requires `Authorization: Bearer <token>`
///
/// Use with `axum::middleware::from_fn_with_state(tokens, require_auth)`.
pub async fn require_auth(
    State(tokens): State<Arc<TokenService>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = bearer_token(req.headers().get(header::AUTHORIZATION))?;
    let claims = tokens.verify(token)?;

    req.extensions_mut().insert(CurrentUser {
        user_id: claims.user_id(),
    });

    Ok(next.run(req).await)
}

fn bearer_token(value: Option<&axum::http::HeaderValue>) -> Result<&str, AuthError> {
    let value = value
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .ok_or(AuthError::MissingToken)
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(AuthError::MissingToken)
    }
}
