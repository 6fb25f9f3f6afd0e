// src/handlers/exportacao.rs

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
};

use crate::{
    common::{datas::agora, error::ApiError},
    config::AppState,
    handlers::visoes::resolver_visao,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::{exportacao::OpcoesExportacao, visao::FiltroVisao},
};

// GET /api/exportacao/{visao}
#[utoipa::path(
    get,
    path = "/api/exportacao/{visao}",
    tag = "Exportação",
    params(
        ("visao" = String, Path, description = "Visão exportada"),
        FiltroVisao,
        OpcoesExportacao
    ),
    responses(
        (status = 200, description = "Arquivo xlsx ou csv", content_type = "application/octet-stream"),
        (status = 400, description = "Visão ou coluna desconhecida"),
        (status = 403, description = "Perfil sem acesso à visão")
    ),
    security(("api_jwt" = []))
)]
pub async fn exportar(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(slug): Path<String>,
    Query(filtro): Query<FiltroVisao>,
    Query(opcoes): Query<OpcoesExportacao>,
) -> Result<impl IntoResponse, ApiError> {
    let visao = resolver_visao(&slug, &user.0).map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let arquivo = app_state
        .export_service
        .exportar(&app_state.db_pool, visao, &user.0, &filtro, &opcoes, agora())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let cabecalhos = [
        (header::CONTENT_TYPE, arquivo.content_type.to_string()),
        (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", arquivo.nome)),
    ];

    Ok((StatusCode::OK, cabecalhos, arquivo.conteudo))
}
