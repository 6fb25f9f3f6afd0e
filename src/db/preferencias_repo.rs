// src/db/preferencias_repo.rs

use std::collections::BTreeMap;

use sqlx::{types::Json, Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::common::error::AppError;

#[derive(Clone)]
pub struct PreferenciasRepository {
    pool: PgPool,
}

impl PreferenciasRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_colunas<'e, E>(
        &self,
        executor: E,
        usuario_id: Uuid,
        visao: &str,
    ) -> Result<Option<BTreeMap<String, bool>>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let colunas = sqlx::query_scalar::<_, Json<BTreeMap<String, bool>>>(
            "SELECT colunas FROM preferencias_colunas WHERE usuario_id = $1 AND visao = $2",
        )
        .bind(usuario_id)
        .bind(visao)
        .fetch_optional(executor)
        .await?;

        Ok(colunas.map(|Json(c)| c))
    }

    // UPSERT: uma linha por (usuário, visão)
    pub async fn salvar_colunas<'e, E>(
        &self,
        executor: E,
        usuario_id: Uuid,
        visao: &str,
        colunas: &BTreeMap<String, bool>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO preferencias_colunas (usuario_id, visao, colunas)
            VALUES ($1, $2, $3)
            ON CONFLICT (usuario_id, visao)
            DO UPDATE SET
                colunas = EXCLUDED.colunas,
                updated_at = NOW()
            "#,
        )
        .bind(usuario_id)
        .bind(visao)
        .bind(Json(colunas))
        .execute(executor)
        .await?;
        Ok(())
    }
}
