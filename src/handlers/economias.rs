// src/handlers/economias.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{
        i18n::Locale,
        perfil::{PodeVerIndicadores, RequirePerfil},
    },
    models::economia::{EconomiaRegistro, FiltroEconomias, MetricasEconomia},
};

// GET /api/economias
#[utoipa::path(
    get,
    path = "/api/economias",
    tag = "Economias",
    params(FiltroEconomias),
    responses(
        (status = 200, description = "Economias registradas, mais recentes primeiro", body = Vec<EconomiaRegistro>)
    ),
    security(("api_jwt" = []))
)]
pub async fn historico(
    State(app_state): State<AppState>,
    locale: Locale,
    _perfil: RequirePerfil<PodeVerIndicadores>,
    Query(filtro): Query<FiltroEconomias>,
) -> Result<impl IntoResponse, ApiError> {
    let registros = app_state
        .economia_service
        .historico(&app_state.db_pool, &filtro)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(registros)))
}

// GET /api/economias/metricas
#[utoipa::path(
    get,
    path = "/api/economias/metricas",
    tag = "Economias",
    responses(
        (status = 200, description = "Totais por tipo e por solicitante", body = MetricasEconomia)
    ),
    security(("api_jwt" = []))
)]
pub async fn metricas(
    State(app_state): State<AppState>,
    locale: Locale,
    _perfil: RequirePerfil<PodeVerIndicadores>,
) -> Result<impl IntoResponse, ApiError> {
    let metricas = app_state
        .economia_service
        .metricas(&app_state.db_pool)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(metricas)))
}
