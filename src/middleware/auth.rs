// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, StatusCode},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::auth::Usuario,
};

// Usuário do token, disponível para os handlers protegidos
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Usuario);

/// Valida o Bearer token e grava o usuário nos extensions da requisição.
pub async fn auth_guard(
    State(app_state): State<AppState>,
    locale: Locale,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(TypedHeader(Authorization(bearer))) = bearer else {
        return Err(AppError::InvalidToken.to_api_error(&locale, &app_state.i18n_store));
    };

    let usuario = app_state
        .auth_service
        .validate_token(bearer.token())
        .await
        .map_err(|e| match e {
            // Token de usuário removido vale como token inválido
            AppError::UserNotFound => AppError::InvalidToken,
            outro => outro,
        })
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    request.extensions_mut().insert(AuthenticatedUser(usuario));
    Ok(next.run(request).await)
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(ApiError {
                status: StatusCode::UNAUTHORIZED,
                error: "Usuário não autenticado".into(),
                details: None,
            })
    }
}
