// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "perfil_usuario", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Perfil {
    Solicitante,
    Aprovador,
    Administrador,
    Gestor,
    Suporte,
    Recepcao,
    Superadmin,
}

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Usuario {
    pub id: Uuid,
    #[schema(example = "Maria Souza")]
    pub nome: String,
    #[schema(example = "maria@empresa.com")]
    pub email: String,
    #[schema(example = "Manutenção")]
    pub departamento: String,
    pub perfil: Perfil,

    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub password_hash: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginPayload {
    #[validate(email(message = "invalid_email"))]
    #[schema(example = "maria@empresa.com")]
    pub email: String,
    #[validate(length(min = 1, message = "required"))]
    pub senha: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub usuario: Usuario,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlterarSenhaPayload {
    #[validate(length(min = 1, message = "required"))]
    pub senha_atual: String,
    #[validate(length(min = 6, message = "password_too_short"))]
    pub nova_senha: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriarUsuarioPayload {
    #[validate(length(min = 1, message = "required"))]
    pub nome: String,
    #[validate(email(message = "invalid_email"))]
    pub email: String,
    #[validate(length(min = 1, message = "required"))]
    pub departamento: String,
    pub perfil: Perfil,
    #[validate(length(min = 6, message = "password_too_short"))]
    pub senha: String,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // ID do usuário
    pub exp: usize, // Expiração
    pub iat: usize, // Emissão
}
