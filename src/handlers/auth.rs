// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        i18n::Locale,
        perfil::{PodeAdministrar, RequirePerfil},
    },
    models::auth::{AlterarSenhaPayload, AuthResponse, CriarUsuarioPayload, LoginPayload, Usuario},
};

// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Login realizado", body = AuthResponse),
        (status = 401, description = "Credenciais inválidas")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let (token, usuario) = app_state
        .auth_service
        .login(&payload.email, &payload.senha)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(AuthResponse { token, usuario })))
}

// GET /api/users/me
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Users",
    responses(
        (status = 200, description = "Usuário autenticado", body = Usuario),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_me(AuthenticatedUser(usuario): AuthenticatedUser) -> Json<Usuario> {
    Json(usuario)
}

// PUT /api/users/me/senha
#[utoipa::path(
    put,
    path = "/api/users/me/senha",
    tag = "Users",
    request_body = AlterarSenhaPayload,
    responses(
        (status = 204, description = "Senha alterada"),
        (status = 400, description = "Nova senha inválida"),
        (status = 401, description = "Senha atual incorreta")
    ),
    security(("api_jwt" = []))
)]
pub async fn alterar_senha(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Json(payload): Json<AlterarSenhaPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    app_state
        .auth_service
        .alterar_senha(&user.0, &payload.senha_atual, &payload.nova_senha)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

// GET /api/users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "Usuários cadastrados", body = Vec<Usuario>),
        (status = 403, description = "Perfil sem acesso")
    ),
    security(("api_jwt" = []))
)]
pub async fn listar_usuarios(
    State(app_state): State<AppState>,
    locale: Locale,
    _perfil: RequirePerfil<PodeAdministrar>,
) -> Result<impl IntoResponse, ApiError> {
    let usuarios = app_state
        .auth_service
        .listar_usuarios()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(usuarios)))
}

// POST /api/users
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = CriarUsuarioPayload,
    responses(
        (status = 201, description = "Usuário criado", body = Usuario),
        (status = 409, description = "E-mail já cadastrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn criar_usuario(
    State(app_state): State<AppState>,
    locale: Locale,
    _perfil: RequirePerfil<PodeAdministrar>,
    Json(payload): Json<CriarUsuarioPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let usuario = app_state
        .auth_service
        .criar_usuario(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(usuario)))
}
