// src/handlers/prestadores.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        datas::hoje,
        db_utils::get_audited_transaction,
        error::{ApiError, AppError},
    },
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        i18n::Locale,
        perfil::{PodeAvaliar, PodeLiberar, RequirePerfil},
    },
    models::prestador::{
        AvaliarChecagemPayload, ConfirmarLiberacaoPayload, ConsultaDocumento, ConsultaDocumentoQuery, LogAlteracao,
        NegarLiberacaoPayload, Prestador,
    },
};

// PUT /api/prestadores/{id}/checagem
#[utoipa::path(
    put,
    path = "/api/prestadores/{id}/checagem",
    tag = "Prestadores",
    request_body = AvaliarChecagemPayload,
    params(("id" = Uuid, Path, description = "ID do prestador")),
    responses(
        (status = 200, description = "Checagem avaliada", body = Prestador),
        (status = 400, description = "Status inválido ou justificativa ausente"),
        (status = 404, description = "Prestador não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn avaliar_checagem(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    _perfil: RequirePerfil<PodeAvaliar>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AvaliarChecagemPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = get_audited_transaction(&app_state, &user)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let prestador = app_state
        .prestador_service
        .avaliar_checagem(&mut *tx, id, &payload, &user.0.nome, hoje())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    tx.commit()
        .await
        .map_err(|e| AppError::from(e).to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(prestador)))
}

// PUT /api/prestadores/{id}/liberacao
#[utoipa::path(
    put,
    path = "/api/prestadores/{id}/liberacao",
    tag = "Prestadores",
    request_body = ConfirmarLiberacaoPayload,
    params(("id" = Uuid, Path, description = "ID do prestador")),
    responses(
        (status = 200, description = "Liberação confirmada", body = Prestador),
        (status = 409, description = "Checagem ainda pendente")
    ),
    security(("api_jwt" = []))
)]
pub async fn confirmar_liberacao(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    _perfil: RequirePerfil<PodeLiberar>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ConfirmarLiberacaoPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = get_audited_transaction(&app_state, &user)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let prestador = app_state
        .prestador_service
        .confirmar_liberacao(&mut *tx, id, payload.observacoes.as_deref())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    tx.commit()
        .await
        .map_err(|e| AppError::from(e).to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(prestador)))
}

// PUT /api/prestadores/{id}/negacao
#[utoipa::path(
    put,
    path = "/api/prestadores/{id}/negacao",
    tag = "Prestadores",
    request_body = NegarLiberacaoPayload,
    params(("id" = Uuid, Path, description = "ID do prestador")),
    responses(
        (status = 200, description = "Liberação negada", body = Prestador),
        (status = 400, description = "Observação ausente"),
        (status = 409, description = "Checagem ainda pendente")
    ),
    security(("api_jwt" = []))
)]
pub async fn negar_liberacao(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    _perfil: RequirePerfil<PodeLiberar>,
    Path(id): Path<Uuid>,
    Json(payload): Json<NegarLiberacaoPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let mut tx = get_audited_transaction(&app_state, &user)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let prestador = app_state
        .prestador_service
        .negar_liberacao(&mut *tx, id, &payload.observacoes)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    tx.commit()
        .await
        .map_err(|e| AppError::from(e).to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(prestador)))
}

// GET /api/prestadores/consulta
#[utoipa::path(
    get,
    path = "/api/prestadores/consulta",
    tag = "Prestadores",
    params(ConsultaDocumentoQuery),
    responses(
        (status = 200, description = "Situação do último registro do documento", body = ConsultaDocumento)
    ),
    security(("api_jwt" = []))
)]
pub async fn consultar_documento(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    Query(query): Query<ConsultaDocumentoQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let consulta = app_state
        .prestador_service
        .consultar_documento(&app_state.db_pool, &query.documento, hoje())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(consulta)))
}

// GET /api/prestadores/{id}/alteracoes
#[utoipa::path(
    get,
    path = "/api/prestadores/{id}/alteracoes",
    tag = "Prestadores",
    params(("id" = Uuid, Path, description = "ID do prestador")),
    responses(
        (status = 200, description = "Histórico de alterações, mais recente primeiro", body = Vec<LogAlteracao>),
        (status = 404, description = "Prestador não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn historico_alteracoes(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let alteracoes = app_state
        .prestador_service
        .historico_alteracoes(&app_state.db_pool, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(alteracoes)))
}
