//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::WithRejection;
use std::sync::Arc;

use crate::application::{
    AuthConfig, CurrentUserUseCase, LoginInput, LoginUseCase, RegisterInput, RegisterUseCase,
    SessionOutput, TokenService,
};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{LoginRequest, RegisterRequest, SessionResponse, UserResponse};
use crate::presentation::middleware::CurrentUser;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub tokens: Arc<TokenService>,
}

impl From<SessionOutput> for SessionResponse {
    fn from(output: SessionOutput) -> Self {
        Self {
            token: output.token,
            user: output.user.into(),
        }
    }
}

/// POST /api/auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    WithRejection(Json(req), _): WithRejection<Json<RegisterRequest>, AuthError>,
) -> AuthResult<(StatusCode, Json<SessionResponse>)>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(
        state.repo.clone(),
        state.config.clone(),
        state.tokens.clone(),
    );

    let output = use_case
        .execute(RegisterInput {
            email: req.correo_institucional,
            name: req.nombre,
            password: req.password,
            faculty: req.facultad,
            phone: req.telefono,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(output.into())))
}

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    WithRejection(Json(req), _): WithRejection<Json<LoginRequest>, AuthError>,
) -> AuthResult<Json<SessionResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.config.clone(),
        state.tokens.clone(),
    );

    let output = use_case
        .execute(LoginInput {
            email: req.correo_institucional,
            password: req.password,
        })
        .await?;

    Ok(Json(output.into()))
}

/// GET /api/auth/me
pub async fn me<R>(
    State(state): State<AuthAppState<R>>,
    current: CurrentUser,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = CurrentUserUseCase::new(state.repo.clone());
    let user = use_case.execute(&current.user_id).await?;
    Ok(Json(user.into()))
}
