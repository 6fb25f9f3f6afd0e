// src/handlers/dashboard.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{
        i18n::Locale,
        perfil::{PodeVerIndicadores, RequirePerfil},
    },
    models::dashboard::PainelDashboard,
};

// GET /api/dashboard/resumo
#[utoipa::path(
    get,
    path = "/api/dashboard/resumo",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Totais gerais e por departamento", body = PainelDashboard),
        (status = 401, description = "Não autorizado"),
        (status = 403, description = "Perfil sem acesso")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_resumo(
    State(app_state): State<AppState>,
    locale: Locale,
    _perfil: RequirePerfil<PodeVerIndicadores>,
) -> Result<impl IntoResponse, ApiError> {
    let painel = app_state
        .dashboard_service
        .get_painel(&app_state.db_pool)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(painel)))
}
