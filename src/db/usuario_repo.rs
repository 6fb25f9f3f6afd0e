// src/db/usuario_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::auth::{Perfil, Usuario},
};

const COLUNAS: &str = "id, nome, email, departamento, perfil, password_hash, created_at, updated_at";

// Todas as interações com a tabela 'usuarios'
#[derive(Clone)]
pub struct UsuarioRepository {
    pool: PgPool,
}

impl UsuarioRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Usuario>, AppError> {
        let usuario = sqlx::query_as::<_, Usuario>(&format!(
            "SELECT {COLUNAS} FROM usuarios WHERE lower(email) = lower($1)"
        ))
        .bind(email.trim())
        .fetch_optional(&self.pool)
        .await?;
        Ok(usuario)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Usuario>, AppError> {
        let usuario = sqlx::query_as::<_, Usuario>(&format!("SELECT {COLUNAS} FROM usuarios WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(usuario)
    }

    pub async fn list_all(&self) -> Result<Vec<Usuario>, AppError> {
        let usuarios = sqlx::query_as::<_, Usuario>(&format!("SELECT {COLUNAS} FROM usuarios ORDER BY nome"))
            .fetch_all(&self.pool)
            .await?;
        Ok(usuarios)
    }

    // E-mail duplicado vira EmailAlreadyExists
    pub async fn create_usuario<'e, E>(
        &self,
        executor: E,
        nome: &str,
        email: &str,
        departamento: &str,
        perfil: Perfil,
        password_hash: &str,
    ) -> Result<Usuario, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Usuario>(&format!(
            r#"
            INSERT INTO usuarios (nome, email, departamento, perfil, password_hash)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COLUNAS}
            "#
        ))
        .bind(nome.trim())
        .bind(email.trim().to_lowercase())
        .bind(departamento.trim())
        .bind(perfil)
        .bind(password_hash)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::EmailAlreadyExists;
                }
            }
            e.into()
        })
    }

    pub async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE usuarios SET password_hash = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
