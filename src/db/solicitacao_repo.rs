// src/db/solicitacao_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::solicitacao::{FiltroSolicitacoes, NovaSolicitacao, Solicitacao, StatusGeral},
};

const COLUNAS: &str = r#"
    id, numero, solicitante, departamento, usuario_id, data_solicitacao, hora_solicitacao,
    tipo_solicitacao, finalidade, local, empresa, data_inicial, data_final, status_geral,
    observacoes_gerais, custo_checagem, economia_gerada, created_at, updated_at
"#;

#[derive(Clone)]
pub struct SolicitacaoRepository {
    pool: PgPool,
}

impl SolicitacaoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Próximo número do ano no formato AAAA-NNNNNN. O UPSERT serializa
    /// requisições concorrentes na linha do ano.
    pub async fn proximo_numero<'e, E>(&self, executor: E, ano: i32) -> Result<String, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sequencial: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO sequencias_solicitacao (ano, ultimo)
            VALUES ($1, 1)
            ON CONFLICT (ano)
            DO UPDATE SET ultimo = sequencias_solicitacao.ultimo + 1
            RETURNING ultimo
            "#,
        )
        .bind(ano)
        .fetch_one(executor)
        .await?;

        Ok(format_numero(ano, sequencial))
    }

    pub async fn create<'e, E>(&self, executor: E, nova: &NovaSolicitacao) -> Result<Solicitacao, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let solicitacao = sqlx::query_as::<_, Solicitacao>(&format!(
            r#"
            INSERT INTO solicitacoes (
                numero, solicitante, departamento, usuario_id, data_solicitacao, hora_solicitacao,
                tipo_solicitacao, finalidade, local, empresa, data_inicial, data_final,
                status_geral, observacoes_gerais, custo_checagem, economia_gerada
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING {COLUNAS}
            "#
        ))
        .bind(&nova.numero)
        .bind(&nova.solicitante)
        .bind(&nova.departamento)
        .bind(nova.usuario_id)
        .bind(nova.data_solicitacao)
        .bind(nova.hora_solicitacao)
        .bind(nova.tipo_solicitacao)
        .bind(nova.finalidade)
        .bind(&nova.local)
        .bind(&nova.empresa)
        .bind(nova.data_inicial)
        .bind(nova.data_final)
        .bind(nova.status_geral)
        .bind(&nova.observacoes_gerais)
        .bind(nova.custo_checagem)
        .bind(nova.economia_gerada)
        .fetch_one(executor)
        .await?;

        Ok(solicitacao)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Solicitacao>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let solicitacao =
            sqlx::query_as::<_, Solicitacao>(&format!("SELECT {COLUNAS} FROM solicitacoes WHERE id = $1"))
                .bind(id)
                .fetch_optional(executor)
                .await?;
        Ok(solicitacao)
    }

    pub async fn list<'e, E>(&self, executor: E, filtro: &FiltroSolicitacoes) -> Result<Vec<Solicitacao>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let solicitacoes = sqlx::query_as::<_, Solicitacao>(&format!(
            r#"
            SELECT {COLUNAS}
            FROM solicitacoes
            WHERE ($1::text IS NULL OR departamento = $1)
              AND ($2::text IS NULL OR solicitante = $2)
              AND ($3::status_geral IS NULL OR status_geral = $3)
              AND ($4::date IS NULL OR data_solicitacao >= $4)
              AND ($5::date IS NULL OR data_solicitacao <= $5)
            ORDER BY data_solicitacao DESC, hora_solicitacao DESC
            "#
        ))
        .bind(filtro.departamento.as_deref())
        .bind(filtro.solicitante.as_deref())
        .bind(filtro.status_geral)
        .bind(filtro.data_de)
        .bind(filtro.data_ate)
        .fetch_all(executor)
        .await?;

        Ok(solicitacoes)
    }

    pub async fn update_economia_gerada<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        economia_gerada: Decimal,
    ) -> Result<Solicitacao, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        Ok(sqlx::query_as::<_, Solicitacao>(&format!(
            "UPDATE solicitacoes SET economia_gerada = $2, updated_at = NOW() WHERE id = $1 RETURNING {COLUNAS}"
        ))
            .bind(id)
            .bind(economia_gerada)
            .fetch_one(executor)
            .await?)
    }

    pub async fn update_status_geral<'e, E>(&self, executor: E, id: Uuid, status: StatusGeral) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE solicitacoes SET status_geral = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(executor)
            .await?;
        Ok(())
    }
}

pub fn format_numero(ano: i32, sequencial: i32) -> String {
    format!("{}-{:06}", ano, sequencial)
}
