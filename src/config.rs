// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    common::i18n::I18nStore,
    db::{
        DashboardRepository, EconomiaRepository, PreferenciasRepository, PrestadorRepository,
        SolicitacaoRepository, UsuarioRepository,
    },
    services::{
        auth::AuthService, dashboard_service::DashboardService, economia_service::EconomiaService,
        export_service::ExportService, migracao_service::MigracaoService,
        preferencias_service::PreferenciasService, prestador_service::PrestadorService,
        solicitacao_service::SolicitacaoService, visao_service::VisaoService,
    },
};

pub const BIND_ADDR_PADRAO: &str = "0.0.0.0:3000";

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_secret: String,
    pub i18n_store: Arc<I18nStore>,

    pub auth_service: AuthService,
    pub solicitacao_service: SolicitacaoService,
    pub prestador_service: PrestadorService,
    pub visao_service: VisaoService,
    pub export_service: ExportService,
    pub economia_service: EconomiaService,
    pub migracao_service: MigracaoService,
    pub dashboard_service: DashboardService,
    pub preferencias_service: PreferenciasService,
}

fn env_ou<T: std::str::FromStr>(nome: &str, padrao: T) -> anyhow::Result<T> {
    match env::var(nome) {
        Ok(valor) => valor
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("{} inválido: {}", nome, valor)),
        Err(_) => Ok(padrao),
    }
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;
        let max_connections: u32 = env_ou("DB_MAX_CONNECTIONS", 5)?;
        let acquire_timeout: u64 = env_ou("DB_ACQUIRE_TIMEOUT_SECS", 3)?;
        let query_timeout: u64 = env_ou("QUERY_TIMEOUT_SECS", 15)?;

        let db_pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(acquire_timeout))
            .connect(&database_url)
            .await
            .context("Falha ao conectar no banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::montar(db_pool, jwt_secret, Duration::from_secs(query_timeout)))
    }

    /// Monta o gráfico de dependências sobre um pool já criado.
    pub fn montar(db_pool: PgPool, jwt_secret: String, query_timeout: Duration) -> Self {
        let usuario_repo = UsuarioRepository::new(db_pool.clone());
        let solicitacao_repo = SolicitacaoRepository::new(db_pool.clone());
        let prestador_repo = PrestadorRepository::new(db_pool.clone());
        let economia_repo = EconomiaRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());
        let preferencias_repo = PreferenciasRepository::new(db_pool.clone());

        let auth_service = AuthService::new(usuario_repo, jwt_secret.clone(), db_pool.clone());
        let economia_service = EconomiaService::new(economia_repo);
        let solicitacao_service = SolicitacaoService::new(
            solicitacao_repo.clone(),
            prestador_repo.clone(),
            economia_service.clone(),
        );
        let prestador_service = PrestadorService::new(prestador_repo.clone(), solicitacao_repo.clone());
        let visao_service = VisaoService::new(prestador_repo.clone(), query_timeout);
        let export_service = ExportService::new(visao_service.clone(), preferencias_repo.clone());
        let migracao_service = MigracaoService::new(solicitacao_repo, prestador_repo);
        let dashboard_service = DashboardService::new(dashboard_repo);
        let preferencias_service = PreferenciasService::new(preferencias_repo);

        Self {
            db_pool,
            jwt_secret,
            i18n_store: Arc::new(I18nStore::new()),
            auth_service,
            solicitacao_service,
            prestador_service,
            visao_service,
            export_service,
            economia_service,
            migracao_service,
            dashboard_service,
            preferencias_service,
        }
    }
}
