// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,

        // --- Users ---
        handlers::auth::get_me,
        handlers::auth::alterar_senha,
        handlers::auth::listar_usuarios,
        handlers::auth::criar_usuario,

        // --- Solicitações ---
        handlers::solicitacoes::previa,
        handlers::solicitacoes::criar,
        handlers::solicitacoes::listar,
        handlers::solicitacoes::buscar,

        // --- Prestadores ---
        handlers::prestadores::avaliar_checagem,
        handlers::prestadores::confirmar_liberacao,
        handlers::prestadores::negar_liberacao,
        handlers::prestadores::consultar_documento,
        handlers::prestadores::historico_alteracoes,

        // --- Visões ---
        handlers::visoes::listar_visao,
        handlers::exportacao::exportar,
        handlers::preferencias::get_colunas,
        handlers::preferencias::salvar_colunas,

        // --- Indicadores ---
        handlers::dashboard::get_resumo,
        handlers::economias::historico,
        handlers::economias::metricas,

        // --- Migração ---
        handlers::migracao::migrar_json,
        handlers::migracao::migrar_csv,
        handlers::migracao::baixar_modelo,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Perfil,
            models::auth::Usuario,
            models::auth::LoginPayload,
            models::auth::AuthResponse,
            models::auth::AlterarSenhaPayload,
            models::auth::CriarUsuarioPayload,

            // --- Solicitações ---
            models::solicitacao::TipoSolicitacao,
            models::solicitacao::Finalidade,
            models::solicitacao::StatusGeral,
            models::solicitacao::Solicitacao,
            models::solicitacao::SolicitacaoDetalhe,
            models::solicitacao::SolicitacaoCriada,
            models::solicitacao::NovoPrestadorPayload,
            models::solicitacao::CriarSolicitacaoPayload,
            models::solicitacao::PreviaSolicitacaoPayload,

            // --- Prestadores ---
            models::prestador::StatusChecagem,
            models::prestador::StatusCadastro,
            models::prestador::StatusHistorico,
            models::prestador::Urgencia,
            models::prestador::Prestador,
            models::prestador::LinhaPrestador,
            models::prestador::LinhaVisao,
            models::prestador::LogAlteracao,
            models::prestador::ConsultaDocumento,
            models::prestador::AvaliarChecagemPayload,
            models::prestador::ConfirmarLiberacaoPayload,
            models::prestador::NegarLiberacaoPayload,

            // --- Visões ---
            models::visao::Visao,
            models::visao::OrdemData,
            models::visao::PaginaVisao,
            models::exportacao::FormatoExportacao,
            models::exportacao::Coluna,
            models::preferencias::PreferenciaColunas,
            models::preferencias::AtualizarColunasPayload,

            // --- Indicadores ---
            models::dashboard::ResumoDashboard,
            models::dashboard::ResumoDepartamento,
            models::dashboard::PainelDashboard,
            models::economia::TipoEconomia,
            models::economia::EconomiaRegistro,
            models::economia::AnaliseEconomia,
            models::economia::TotalPorTipo,
            models::economia::EconomiaPorSolicitante,
            models::economia::MetricasEconomia,

            // --- Migração ---
            models::migracao::ItemMigracao,
            models::migracao::ResultadoMigracao,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação"),
        (name = "Users", description = "Usuários e senhas"),
        (name = "Solicitações", description = "Abertura e consulta de solicitações de acesso"),
        (name = "Prestadores", description = "Checagem e liberação de prestadores"),
        (name = "Visões", description = "Listagens por perfil com filtros e paginação"),
        (name = "Exportação", description = "Planilhas xlsx e csv das visões"),
        (name = "Preferências", description = "Colunas visíveis por usuário"),
        (name = "Dashboard", description = "Indicadores gerenciais"),
        (name = "Economias", description = "Checagens evitadas e valores poupados"),
        (name = "Migração", description = "Carga de dados históricos")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documento_registra_esquema_jwt_e_rotas() {
        let doc = ApiDoc::openapi();

        let components = doc.components.as_ref().expect("components");
        assert!(components.security_schemes.contains_key("api_jwt"));
        assert!(doc.paths.paths.contains_key("/api/solicitacoes"));
        assert!(doc.paths.paths.contains_key("/api/visoes/{visao}"));
        assert!(doc.paths.paths.contains_key("/api/migracao/modelo"));
    }
}
