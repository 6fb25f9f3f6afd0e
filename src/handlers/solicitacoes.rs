// src/handlers/solicitacoes.rs

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
        datas::{agora, hoje},
        error::{ApiError, AppError},
    },
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::{
        auth::Perfil,
        economia::AnaliseEconomia,
        solicitacao::{
            CriarSolicitacaoPayload, FiltroSolicitacoes, PreviaSolicitacaoPayload, Solicitacao, SolicitacaoCriada,
            SolicitacaoDetalhe,
        },
    },
};

// POST /api/solicitacoes/previa
#[utoipa::path(
    post,
    path = "/api/solicitacoes/previa",
    tag = "Solicitações",
    request_body = PreviaSolicitacaoPayload,
    responses(
        (status = 200, description = "Economia prevista por prestador", body = Vec<AnaliseEconomia>)
    ),
    security(("api_jwt" = []))
)]
pub async fn previa(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    Json(payload): Json<PreviaSolicitacaoPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let analises = app_state
        .solicitacao_service
        .previa(&app_state.db_pool, &payload.prestadores, hoje())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(analises)))
}

// POST /api/solicitacoes
#[utoipa::path(
    post,
    path = "/api/solicitacoes",
    tag = "Solicitações",
    request_body = CriarSolicitacaoPayload,
    responses(
        (status = 201, description = "Solicitação criada", body = SolicitacaoCriada),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn criar(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Json(payload): Json<CriarSolicitacaoPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let agora = agora();
    let criada = app_state
        .solicitacao_service
        .criar(&app_state.db_pool, &user.0, &payload, agora.date(), agora.time())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(criada)))
}

// GET /api/solicitacoes
#[utoipa::path(
    get,
    path = "/api/solicitacoes",
    tag = "Solicitações",
    params(FiltroSolicitacoes),
    responses(
        (status = 200, description = "Solicitações filtradas", body = Vec<Solicitacao>)
    ),
    security(("api_jwt" = []))
)]
pub async fn listar(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Query(mut filtro): Query<FiltroSolicitacoes>,
) -> Result<impl IntoResponse, ApiError> {
    // Solicitante só enxerga o próprio departamento
    if user.0.perfil == Perfil::Solicitante {
        filtro.departamento = Some(user.0.departamento.clone());
    }

    let solicitacoes = app_state
        .solicitacao_service
        .listar(&app_state.db_pool, &filtro)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(solicitacoes)))
}

// GET /api/solicitacoes/{id}
#[utoipa::path(
    get,
    path = "/api/solicitacoes/{id}",
    tag = "Solicitações",
    params(("id" = Uuid, Path, description = "ID da solicitação")),
    responses(
        (status = 200, description = "Solicitação com prestadores", body = SolicitacaoDetalhe),
        (status = 404, description = "Não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn buscar(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let detalhe = app_state
        .solicitacao_service
        .buscar(&app_state.db_pool, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    if user.0.perfil == Perfil::Solicitante && detalhe.solicitacao.departamento != user.0.departamento {
        return Err(AppError::PerfilSemAcesso.to_api_error(&locale, &app_state.i18n_store));
    }

    Ok((StatusCode::OK, Json(detalhe)))
}
