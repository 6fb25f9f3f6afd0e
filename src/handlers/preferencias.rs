// src/handlers/preferencias.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::ApiError,
    config::AppState,
    handlers::visoes::resolver_visao,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::preferencias::{AtualizarColunasPayload, PreferenciaColunas},
};

// GET /api/preferencias/colunas/{visao}
#[utoipa::path(
    get,
    path = "/api/preferencias/colunas/{visao}",
    tag = "Preferências",
    params(("visao" = String, Path, description = "Visão")),
    responses(
        (status = 200, description = "Colunas visíveis do usuário nesta visão", body = PreferenciaColunas)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_colunas(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let visao = resolver_visao(&slug, &user.0).map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let preferencia = app_state
        .preferencias_service
        .get_colunas(&app_state.db_pool, user.0.id, visao)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(preferencia)))
}

// PUT /api/preferencias/colunas/{visao}
#[utoipa::path(
    put,
    path = "/api/preferencias/colunas/{visao}",
    tag = "Preferências",
    request_body = AtualizarColunasPayload,
    params(("visao" = String, Path, description = "Visão")),
    responses(
        (status = 200, description = "Preferência salva", body = PreferenciaColunas),
        (status = 400, description = "Coluna desconhecida")
    ),
    security(("api_jwt" = []))
)]
pub async fn salvar_colunas(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(slug): Path<String>,
    Json(payload): Json<AtualizarColunasPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let visao = resolver_visao(&slug, &user.0).map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let preferencia = app_state
        .preferencias_service
        .salvar_colunas(&app_state.db_pool, user.0.id, visao, &payload.colunas)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(preferencia)))
}
