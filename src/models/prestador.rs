// src/models/prestador.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::solicitacao::{Finalidade, TipoSolicitacao};

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "status_checagem", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StatusChecagem {
    Pendente,
    Aprovada,
    Reprovada,
    Vencida,
    Excecao,
}

impl StatusChecagem {
    pub fn rotulo(&self) -> &'static str {
        match self {
            StatusChecagem::Pendente => "Pendente",
            StatusChecagem::Aprovada => "Aprovada",
            StatusChecagem::Reprovada => "Reprovada",
            StatusChecagem::Vencida => "Vencida",
            StatusChecagem::Excecao => "Exceção",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "status_cadastro", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StatusCadastro {
    Pendente,
    Ok,
    Urgente,
    Vencida,
    Negada,
}

impl StatusCadastro {
    pub fn rotulo(&self) -> &'static str {
        match self {
            StatusCadastro::Pendente => "Pendente",
            StatusCadastro::Ok => "Ok",
            StatusCadastro::Urgente => "Urgente",
            StatusCadastro::Vencida => "Vencida",
            StatusCadastro::Negada => "Negada",
        }
    }
}

/// Situação de um registro anterior do mesmo documento.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StatusHistorico {
    Valido,
    Vencido,
    SemHistorico,
    Pendente,
    Reprovado,
    Excecao,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Urgencia {
    Critica,
    Urgente,
    Normal,
}

// --- Linhas ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Prestador {
    pub id: Uuid,
    pub solicitacao_id: Option<Uuid>,
    #[schema(example = "João da Silva")]
    pub nome: String,
    #[schema(example = "12.345.678-9")]
    pub documento: String,
    pub documento2: Option<String>,
    pub empresa: Option<String>,
    pub status: StatusChecagem,
    pub checagem_valida_ate: Option<NaiveDate>,
    pub cadastro: StatusCadastro,
    pub observacoes: Option<String>,
    pub justificativa: Option<String>,
    pub aprovado_por: Option<String>,
    pub data_avaliacao: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Prestador junto com os dados da solicitação de origem (base das visões).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LinhaPrestador {
    pub id: Uuid,
    pub solicitacao_id: Uuid,
    pub nome: String,
    pub documento: String,
    pub documento2: Option<String>,
    pub empresa: Option<String>,
    pub status: StatusChecagem,
    pub checagem_valida_ate: Option<NaiveDate>,
    pub cadastro: StatusCadastro,
    pub observacoes: Option<String>,
    pub justificativa: Option<String>,
    pub aprovado_por: Option<String>,
    pub data_avaliacao: Option<DateTime<Utc>>,

    pub numero: String,
    pub solicitante: String,
    pub departamento: String,
    pub data_solicitacao: NaiveDate,
    pub tipo_solicitacao: TipoSolicitacao,
    pub finalidade: Finalidade,
    pub local: String,
    pub empresa_solicitacao: String,
    pub data_inicial: NaiveDate,
    pub data_final: NaiveDate,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LinhaVisao {
    #[serde(flatten)]
    pub prestador: LinhaPrestador,
    pub status_efetivo: StatusChecagem,
    pub cadastro_efetivo: StatusCadastro,
    pub prioridade: u8,
    pub urgencia: Urgencia,
    pub acesso_expirando: bool,
    /// Só para início crítico ou urgente, ex.: "2d 3h restantes"
    pub prazo: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LogAlteracao {
    pub id: Uuid,
    pub prestador_id: Uuid,
    pub solicitacao_id: Option<Uuid>,
    pub usuario: String,
    pub data_alteracao: DateTime<Utc>,
    pub campo_alterado: String,
    pub valor_anterior: Option<String>,
    pub valor_novo: Option<String>,
    pub justificativa: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConsultaDocumento {
    pub documento: String,
    pub status: StatusHistorico,
    pub registro: Option<LinhaPrestador>,
}

// --- Payloads ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvaliarChecagemPayload {
    #[schema(example = "aprovada")]
    pub status: StatusChecagem,
    pub justificativa: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmarLiberacaoPayload {
    pub observacoes: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NegarLiberacaoPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Documentação incompleta na portaria")]
    pub observacoes: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ConsultaDocumentoQuery {
    pub documento: String,
}

#[derive(Debug, Clone)]
pub struct NovoPrestador {
    pub solicitacao_id: Uuid,
    pub nome: String,
    pub documento: String,
    pub documento2: Option<String>,
    pub empresa: Option<String>,
    pub status: StatusChecagem,
    pub checagem_valida_ate: Option<NaiveDate>,
    pub cadastro: StatusCadastro,
    pub justificativa: Option<String>,
    pub aprovado_por: Option<String>,
    pub data_avaliacao: Option<DateTime<Utc>>,
}
