// src/db/economia_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::economia::{EconomiaPorSolicitante, EconomiaRegistro, FiltroEconomias, NovaEconomia, TipoEconomia},
};

const COLUNAS: &str = r#"
    id, solicitante, prestador_nome, prestador_documento, tipo_economia,
    valor_economizado, detalhes, solicitacao_origem, data_deteccao
"#;

pub const LIMITE_PADRAO: i64 = 100;

#[derive(Clone)]
pub struct EconomiaRepository {
    pool: PgPool,
}

impl EconomiaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Mesmo solicitante, documento e tipo dentro da janela (em minutos).
    pub async fn existe_recente<'e, E>(
        &self,
        executor: E,
        solicitante: &str,
        documento: &str,
        tipo: TipoEconomia,
        janela_minutos: i32,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let existe = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM economias_sistema
                WHERE solicitante = $1
                  AND prestador_documento = $2
                  AND tipo_economia = $3
                  AND data_deteccao >= NOW() - make_interval(mins => $4)
            )
            "#,
        )
        .bind(solicitante)
        .bind(documento)
        .bind(tipo)
        .bind(janela_minutos)
        .fetch_one(executor)
        .await?;
        Ok(existe)
    }

    pub async fn create<'e, E>(&self, executor: E, nova: &NovaEconomia) -> Result<EconomiaRegistro, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let registro = sqlx::query_as::<_, EconomiaRegistro>(&format!(
            r#"
            INSERT INTO economias_sistema (
                solicitante, prestador_nome, prestador_documento, tipo_economia,
                valor_economizado, detalhes, solicitacao_origem
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {COLUNAS}
            "#
        ))
        .bind(&nova.solicitante)
        .bind(&nova.prestador_nome)
        .bind(&nova.prestador_documento)
        .bind(nova.tipo_economia)
        .bind(nova.valor_economizado)
        .bind(&nova.detalhes)
        .bind(&nova.solicitacao_origem)
        .fetch_one(executor)
        .await?;
        Ok(registro)
    }

    pub async fn list<'e, E>(&self, executor: E, filtro: &FiltroEconomias) -> Result<Vec<EconomiaRegistro>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let registros = sqlx::query_as::<_, EconomiaRegistro>(&format!(
            r#"
            SELECT {COLUNAS}
            FROM economias_sistema
            WHERE ($1::text IS NULL OR solicitante = $1)
              AND ($2::tipo_economia IS NULL OR tipo_economia = $2)
            ORDER BY data_deteccao DESC
            LIMIT $3
            "#
        ))
        .bind(filtro.solicitante.as_deref())
        .bind(filtro.tipo)
        .bind(filtro.limite.unwrap_or(LIMITE_PADRAO).clamp(1, 1000))
        .fetch_all(executor)
        .await?;
        Ok(registros)
    }

    pub async fn totais_por_tipo<'e, E>(&self, executor: E) -> Result<Vec<(TipoEconomia, i64, Decimal)>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let totais = sqlx::query_as::<_, (TipoEconomia, i64, Decimal)>(
            r#"
            SELECT tipo_economia, COUNT(*), COALESCE(SUM(valor_economizado), 0)
            FROM economias_sistema
            GROUP BY tipo_economia
            "#,
        )
        .fetch_all(executor)
        .await?;
        Ok(totais)
    }

    pub async fn por_solicitante<'e, E>(&self, executor: E) -> Result<Vec<EconomiaPorSolicitante>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let ranking = sqlx::query_as::<_, EconomiaPorSolicitante>(
            r#"
            SELECT solicitante,
                   COUNT(*) AS quantidade,
                   COALESCE(SUM(valor_economizado), 0) AS total
            FROM economias_sistema
            GROUP BY solicitante
            ORDER BY total DESC, solicitante
            "#,
        )
        .fetch_all(executor)
        .await?;
        Ok(ranking)
    }
}
