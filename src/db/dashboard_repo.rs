// src/db/dashboard_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::dashboard::{ResumoDashboard, ResumoDepartamento},
};

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // 1. Cards do topo (um único SELECT = um único snapshot)
    pub async fn get_resumo<'e, E>(&self, executor: E) -> Result<ResumoDashboard, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let resumo = sqlx::query_as::<_, ResumoDashboard>(
            r#"
            SELECT
                s.total_solicitacoes, s.pendentes, s.aprovadas, s.reprovadas, s.parciais,
                s.custo_total_checagem,
                p.total_prestadores, p.cadastros_urgentes,
                e.economia_total
            FROM (
                SELECT
                    COUNT(*) AS total_solicitacoes,
                    COUNT(*) FILTER (WHERE status_geral = 'pendente') AS pendentes,
                    COUNT(*) FILTER (WHERE status_geral = 'aprovado') AS aprovadas,
                    COUNT(*) FILTER (WHERE status_geral = 'reprovado') AS reprovadas,
                    COUNT(*) FILTER (WHERE status_geral = 'parcial') AS parciais,
                    COALESCE(SUM(custo_checagem), 0) AS custo_total_checagem
                FROM solicitacoes
            ) s,
            (
                SELECT
                    COUNT(*) AS total_prestadores,
                    COUNT(*) FILTER (WHERE cadastro = 'urgente') AS cadastros_urgentes
                FROM prestadores
            ) p,
            (
                SELECT COALESCE(SUM(valor_economizado), 0) AS economia_total
                FROM economias_sistema
            ) e
            "#,
        )
        .fetch_one(executor)
        .await?;

        Ok(resumo)
    }

    // 2. Relatório por departamento
    pub async fn por_departamento<'e, E>(&self, executor: E) -> Result<Vec<ResumoDepartamento>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let linhas = sqlx::query_as::<_, ResumoDepartamento>(
            r#"
            WITH por_solicitacao AS (
                SELECT
                    s.departamento,
                    s.custo_checagem,
                    s.economia_gerada,
                    (SELECT COUNT(*) FROM prestadores p WHERE p.solicitacao_id = s.id) AS prestadores
                FROM solicitacoes s
            )
            SELECT
                departamento,
                COUNT(*) AS solicitacoes,
                COALESCE(SUM(prestadores), 0)::BIGINT AS prestadores,
                COALESCE(SUM(custo_checagem), 0) AS custo,
                COALESCE(SUM(economia_gerada), 0) AS economia
            FROM por_solicitacao
            GROUP BY departamento
            ORDER BY departamento
            "#,
        )
        .fetch_all(executor)
        .await?;
        Ok(linhas)
    }
}
