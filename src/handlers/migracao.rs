// src/handlers/migracao.rs

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    common::{datas::hoje, error::ApiError},
    config::AppState,
    middleware::{
        i18n::Locale,
        perfil::{PodeMigrar, RequirePerfil},
    },
    models::migracao::{ItemMigracao, ResultadoMigracao},
    services::migracao_service::{ler_csv, modelo_csv},
};

// POST /api/migracao
#[utoipa::path(
    post,
    path = "/api/migracao",
    tag = "Migração",
    request_body = Vec<ItemMigracao>,
    responses(
        (status = 200, description = "Resultado do lote", body = ResultadoMigracao)
    ),
    security(("api_jwt" = []))
)]
pub async fn migrar_json(
    State(app_state): State<AppState>,
    _perfil: RequirePerfil<PodeMigrar>,
    Json(itens): Json<Vec<ItemMigracao>>,
) -> impl IntoResponse {
    let resultado = app_state.migracao_service.migrar(&app_state.db_pool, &itens, hoje()).await;
    (StatusCode::OK, Json(resultado))
}

// POST /api/migracao/csv
#[utoipa::path(
    post,
    path = "/api/migracao/csv",
    tag = "Migração",
    request_body(content = String, content_type = "text/csv", description = "CSV no formato do modelo"),
    responses(
        (status = 200, description = "Resultado do lote", body = ResultadoMigracao),
        (status = 400, description = "CSV ilegível")
    ),
    security(("api_jwt" = []))
)]
pub async fn migrar_csv(
    State(app_state): State<AppState>,
    locale: Locale,
    _perfil: RequirePerfil<PodeMigrar>,
    corpo: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let itens = ler_csv(&corpo).map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let resultado = app_state.migracao_service.migrar(&app_state.db_pool, &itens, hoje()).await;
    Ok((StatusCode::OK, Json(resultado)))
}

// GET /api/migracao/modelo
#[utoipa::path(
    get,
    path = "/api/migracao/modelo",
    tag = "Migração",
    responses(
        (status = 200, description = "Modelo CSV para migração", content_type = "text/csv")
    ),
    security(("api_jwt" = []))
)]
pub async fn baixar_modelo(
    State(app_state): State<AppState>,
    locale: Locale,
    _perfil: RequirePerfil<PodeMigrar>,
) -> Result<impl IntoResponse, ApiError> {
    let modelo = modelo_csv().map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let cabecalhos = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
        (header::CONTENT_DISPOSITION, "attachment; filename=\"modelo-migracao.csv\""),
    ];
    Ok((StatusCode::OK, cabecalhos, modelo))
}
