// src/common/error.rs

use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::{common::i18n::I18nStore, middleware::i18n::Locale};

// Erros de domínio. Cada variante vira um ApiError localizado na borda HTTP.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Perfil sem acesso")]
    PerfilSemAcesso,

    #[error("Solicitação não encontrada")]
    SolicitacaoNaoEncontrada,

    #[error("Prestador não encontrado")]
    PrestadorNaoEncontrado,

    #[error("Solicitação sem prestadores")]
    SolicitacaoSemPrestadores,

    #[error("Prestador sem nome ou documento")]
    PrestadorSemIdentificacao,

    #[error("Data final anterior à data inicial")]
    PeriodoInvalido,

    #[error("Justificativa obrigatória")]
    JustificativaObrigatoria,

    #[error("Observação obrigatória")]
    ObservacaoObrigatoria,

    #[error("Status de avaliação inválido")]
    StatusAvaliacaoInvalido,

    #[error("Checagem ainda pendente")]
    ChecagemPendente,

    #[error("Documento já cadastrado: {0}")]
    DocumentoJaCadastrado(String),

    #[error("Visão desconhecida: {0}")]
    VisaoDesconhecida(String),

    #[error("Coluna desconhecida: {0}")]
    ColunaDesconhecida(String),

    #[error("Arquivo inválido: {0}")]
    ArquivoInvalido(String),

    #[error("Tempo limite da consulta excedido")]
    Timeout,

    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("Erro ao gerar planilha: {0}")]
    PlanilhaError(#[from] rust_xlsxwriter::XlsxError),

    #[error("Erro de CSV: {0}")]
    CsvError(#[from] csv::Error),
}

// O erro que efetivamente sai na resposta HTTP
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::SolicitacaoSemPrestadores
            | AppError::PrestadorSemIdentificacao
            | AppError::PeriodoInvalido
            | AppError::JustificativaObrigatoria
            | AppError::ObservacaoObrigatoria
            | AppError::StatusAvaliacaoInvalido
            | AppError::VisaoDesconhecida(_)
            | AppError::ColunaDesconhecida(_)
            | AppError::ArquivoInvalido(_)
            | AppError::CsvError(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::PerfilSemAcesso => StatusCode::FORBIDDEN,
            AppError::UserNotFound
            | AppError::SolicitacaoNaoEncontrada
            | AppError::PrestadorNaoEncontrado => StatusCode::NOT_FOUND,
            AppError::EmailAlreadyExists
            | AppError::DocumentoJaCadastrado(_)
            | AppError::ChecagemPendente => StatusCode::CONFLICT,
            AppError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_)
            | AppError::PlanilhaError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    // Chave usada no I18nStore
    pub fn codigo(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "validation_error",
            AppError::EmailAlreadyExists => "email_already_exists",
            AppError::InvalidCredentials => "invalid_credentials",
            AppError::InvalidToken => "invalid_token",
            AppError::UserNotFound => "user_not_found",
            AppError::PerfilSemAcesso => "perfil_sem_acesso",
            AppError::SolicitacaoNaoEncontrada => "solicitacao_nao_encontrada",
            AppError::PrestadorNaoEncontrado => "prestador_nao_encontrado",
            AppError::SolicitacaoSemPrestadores => "solicitacao_sem_prestadores",
            AppError::PrestadorSemIdentificacao => "prestador_sem_identificacao",
            AppError::PeriodoInvalido => "periodo_invalido",
            AppError::JustificativaObrigatoria => "justificativa_obrigatoria",
            AppError::ObservacaoObrigatoria => "observacao_obrigatoria",
            AppError::StatusAvaliacaoInvalido => "status_avaliacao_invalido",
            AppError::ChecagemPendente => "checagem_pendente",
            AppError::DocumentoJaCadastrado(_) => "documento_ja_cadastrado",
            AppError::VisaoDesconhecida(_) => "visao_desconhecida",
            AppError::ColunaDesconhecida(_) => "coluna_desconhecida",
            AppError::ArquivoInvalido(_) | AppError::CsvError(_) => "arquivo_invalido",
            AppError::Timeout => "timeout",
            _ => "internal_error",
        }
    }

    pub fn to_api_error(&self, locale: &Locale, i18n_store: &I18nStore) -> ApiError {
        let status = self.status_code();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Erro Interno do Servidor: {}", self);
        }

        let details = match self {
            AppError::ValidationError(errors) => {
                let mut details: HashMap<String, Vec<String>> = HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages = field_errors
                        .iter()
                        .map(|e| match &e.message {
                            Some(m) => i18n_store.translate(&locale.0, m),
                            None => i18n_store.translate(&locale.0, &e.code),
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                Some(json!(details))
            }
            AppError::DocumentoJaCadastrado(documento) => Some(json!({ "documento": documento })),
            AppError::VisaoDesconhecida(visao) => Some(json!({ "visao": visao })),
            AppError::ColunaDesconhecida(coluna) => Some(json!({ "coluna": coluna })),
            AppError::ArquivoInvalido(motivo) => Some(json!({ "motivo": motivo })),
            AppError::CsvError(e) => Some(json!({ "motivo": e.to_string() })),
            _ => None,
        };

        ApiError {
            status,
            error: i18n_store.translate(&locale.0, self.codigo()),
            details,
        }
    }
}
