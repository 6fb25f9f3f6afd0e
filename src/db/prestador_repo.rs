// src/db/prestador_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::prestador::{
        LinhaPrestador, LogAlteracao, NovoPrestador, Prestador, StatusCadastro, StatusChecagem,
    },
};

const COLUNAS: &str = r#"
    id, solicitacao_id, nome, documento, documento2, empresa, status, checagem_valida_ate,
    cadastro, observacoes, justificativa, aprovado_por, data_avaliacao, created_at, updated_at
"#;

// Prestador + solicitação. Prestadores sem solicitação não aparecem nas visões.
const SELECT_LINHA: &str = r#"
    SELECT
        p.id, p.solicitacao_id, p.nome, p.documento, p.documento2, p.empresa, p.status,
        p.checagem_valida_ate, p.cadastro, p.observacoes, p.justificativa, p.aprovado_por,
        p.data_avaliacao,
        s.numero, s.solicitante, s.departamento, s.data_solicitacao, s.tipo_solicitacao,
        s.finalidade, s.local, s.empresa AS empresa_solicitacao, s.data_inicial, s.data_final
    FROM prestadores p
    JOIN solicitacoes s ON s.id = p.solicitacao_id
"#;

#[derive(Clone)]
pub struct PrestadorRepository {
    pool: PgPool,
}

impl PrestadorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create<'e, E>(&self, executor: E, novo: &NovoPrestador) -> Result<Prestador, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let prestador = sqlx::query_as::<_, Prestador>(&format!(
            r#"
            INSERT INTO prestadores (
                solicitacao_id, nome, documento, documento2, empresa, status,
                checagem_valida_ate, cadastro, justificativa, aprovado_por, data_avaliacao
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {COLUNAS}
            "#
        ))
        .bind(novo.solicitacao_id)
        .bind(&novo.nome)
        .bind(&novo.documento)
        .bind(&novo.documento2)
        .bind(&novo.empresa)
        .bind(novo.status)
        .bind(novo.checagem_valida_ate)
        .bind(novo.cadastro)
        .bind(&novo.justificativa)
        .bind(&novo.aprovado_por)
        .bind(novo.data_avaliacao)
        .fetch_one(executor)
        .await?;

        Ok(prestador)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Prestador>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let prestador = sqlx::query_as::<_, Prestador>(&format!("SELECT {COLUNAS} FROM prestadores WHERE id = $1"))
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(prestador)
    }

    pub async fn list_by_solicitacao<'e, E>(&self, executor: E, solicitacao_id: Uuid) -> Result<Vec<Prestador>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let prestadores = sqlx::query_as::<_, Prestador>(&format!(
            "SELECT {COLUNAS} FROM prestadores WHERE solicitacao_id = $1 ORDER BY created_at, nome"
        ))
        .bind(solicitacao_id)
        .fetch_all(executor)
        .await?;
        Ok(prestadores)
    }

    pub async fn list_status_by_solicitacao<'e, E>(
        &self,
        executor: E,
        solicitacao_id: Uuid,
    ) -> Result<Vec<StatusChecagem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let statuses = sqlx::query_scalar::<_, StatusChecagem>(
            "SELECT status FROM prestadores WHERE solicitacao_id = $1",
        )
        .bind(solicitacao_id)
        .fetch_all(executor)
        .await?;
        Ok(statuses)
    }

    /// Base das visões. Filtro de departamento opcional; o resto é aplicado em memória.
    pub async fn list_linhas<'e, E>(&self, executor: E, departamento: Option<&str>) -> Result<Vec<LinhaPrestador>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let linhas = sqlx::query_as::<_, LinhaPrestador>(&format!(
            r#"
            {SELECT_LINHA}
            WHERE ($1::text IS NULL OR s.departamento = $1)
            ORDER BY s.data_solicitacao DESC, s.numero DESC, p.created_at
            "#
        ))
        .bind(departamento)
        .fetch_all(executor)
        .await?;
        Ok(linhas)
    }

    /// Registro mais recente cujo documento (ou documento2) tem os mesmos dígitos.
    pub async fn find_ultimo_por_digitos<'e, E>(&self, executor: E, digitos: &str) -> Result<Option<LinhaPrestador>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let linha = sqlx::query_as::<_, LinhaPrestador>(&format!(
            r#"
            {SELECT_LINHA}
            WHERE regexp_replace(p.documento, '\D', '', 'g') = $1
               OR regexp_replace(COALESCE(p.documento2, ''), '\D', '', 'g') = $1
            ORDER BY p.created_at DESC
            LIMIT 1
            "#
        ))
        .bind(digitos)
        .fetch_optional(executor)
        .await?;
        Ok(linha)
    }

    /// Algum prestador já usa este documento, como documento ou documento2?
    pub async fn documento_existe<'e, E>(&self, executor: E, documento: &str, digitos: &str) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let existe = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM prestadores
                WHERE documento = $1
                   OR documento2 = $1
                   OR ($2 <> '' AND regexp_replace(documento, '\D', '', 'g') = $2)
                   OR ($2 <> '' AND regexp_replace(COALESCE(documento2, ''), '\D', '', 'g') = $2)
            )
            "#,
        )
        .bind(documento)
        .bind(digitos)
        .fetch_one(executor)
        .await?;
        Ok(existe)
    }

    pub async fn avaliar<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: StatusChecagem,
        justificativa: Option<&str>,
        aprovado_por: &str,
        valida_ate: Option<NaiveDate>,
    ) -> Result<Prestador, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Prestador>(&format!(
            r#"
            UPDATE prestadores
            SET status = $2,
                justificativa = $3,
                aprovado_por = $4,
                checagem_valida_ate = COALESCE($5, checagem_valida_ate),
                data_avaliacao = NOW()
            WHERE id = $1
            RETURNING {COLUNAS}
            "#
        ))
        .bind(id)
        .bind(status)
        .bind(justificativa)
        .bind(aprovado_por)
        .bind(valida_ate)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::PrestadorNaoEncontrado)
    }

    pub async fn atualizar_cadastro<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        cadastro: StatusCadastro,
        observacoes: Option<&str>,
    ) -> Result<Prestador, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Prestador>(&format!(
            r#"
            UPDATE prestadores
            SET cadastro = $2,
                observacoes = COALESCE($3, observacoes)
            WHERE id = $1
            RETURNING {COLUNAS}
            "#
        ))
        .bind(id)
        .bind(cadastro)
        .bind(observacoes)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::PrestadorNaoEncontrado)
    }

    pub async fn list_alteracoes<'e, E>(&self, executor: E, prestador_id: Uuid) -> Result<Vec<LogAlteracao>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let log = sqlx::query_as::<_, LogAlteracao>(
            r#"
            SELECT id, prestador_id, solicitacao_id, usuario, data_alteracao,
                   campo_alterado, valor_anterior, valor_novo, justificativa
            FROM log_alteracoes
            WHERE prestador_id = $1
            ORDER BY data_alteracao DESC
            "#,
        )
        .bind(prestador_id)
        .fetch_all(executor)
        .await?;
        Ok(log)
    }
}
