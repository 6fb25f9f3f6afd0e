// src/handlers/visoes.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::{
        datas::agora,
        error::{ApiError, AppError},
    },
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::{
        auth::Usuario,
        visao::{FiltroVisao, PaginaVisao, Paginacao, Visao},
    },
};

/// Converte o slug da rota e confere se o perfil do usuário enxerga a visão.
pub(crate) fn resolver_visao(slug: &str, usuario: &Usuario) -> Result<Visao, AppError> {
    let visao = Visao::parse(slug).ok_or_else(|| AppError::VisaoDesconhecida(slug.to_string()))?;
    if !visao.permite(usuario.perfil) {
        return Err(AppError::PerfilSemAcesso);
    }
    Ok(visao)
}

// GET /api/visoes/{visao}
#[utoipa::path(
    get,
    path = "/api/visoes/{visao}",
    tag = "Visões",
    params(
        ("visao" = String, Path, description = "administrador | aprovador | suporte | departamento | gestor"),
        FiltroVisao,
        Paginacao
    ),
    responses(
        (status = 200, description = "Prestadores filtrados, priorizados e paginados", body = PaginaVisao),
        (status = 400, description = "Visão desconhecida"),
        (status = 403, description = "Perfil sem acesso à visão"),
        (status = 504, description = "Consulta excedeu o tempo limite")
    ),
    security(("api_jwt" = []))
)]
pub async fn listar_visao(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(slug): Path<String>,
    Query(filtro): Query<FiltroVisao>,
    Query(paginacao): Query<Paginacao>,
) -> Result<impl IntoResponse, ApiError> {
    let visao = resolver_visao(&slug, &user.0).map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let pagina = app_state
        .visao_service
        .pagina(&app_state.db_pool, visao, &user.0, &filtro, paginacao, agora())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(pagina)))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::models::auth::Perfil;

    fn usuario(perfil: Perfil) -> Usuario {
        Usuario {
            id: Uuid::new_v4(),
            nome: "Ana".into(),
            email: "ana@empresa.com".into(),
            departamento: "Manutenção".into(),
            perfil,
            password_hash: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn slug_desconhecido_e_rejeitado() {
        let err = resolver_visao("financeiro", &usuario(Perfil::Administrador)).unwrap_err();
        assert!(matches!(err, AppError::VisaoDesconhecida(s) if s == "financeiro"));
    }

    #[test]
    fn perfil_fora_da_visao_recebe_403() {
        let err = resolver_visao("aprovador", &usuario(Perfil::Solicitante)).unwrap_err();
        assert!(matches!(err, AppError::PerfilSemAcesso));

        assert_eq!(
            resolver_visao("Departamento", &usuario(Perfil::Solicitante)).unwrap(),
            Visao::Departamento
        );
    }
}
