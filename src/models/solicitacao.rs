// src/models/solicitacao.rs

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::{economia::AnaliseEconomia, prestador::Prestador};

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "tipo_solicitacao", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TipoSolicitacao {
    ChecagemLiberacao,
    SomenteLiberacao,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "finalidade_solicitacao", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Finalidade {
    Evento,
    Obra,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "status_geral", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StatusGeral {
    Pendente,
    Aprovado,
    Reprovado,
    Parcial,
}

// --- Linhas ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Solicitacao {
    pub id: Uuid,
    #[schema(example = "2025-000042")]
    pub numero: String,
    #[schema(example = "Maria Souza")]
    pub solicitante: String,
    #[schema(example = "Manutenção")]
    pub departamento: String,
    pub usuario_id: Option<Uuid>,
    pub data_solicitacao: NaiveDate,
    #[schema(value_type = String, example = "14:30:00")]
    pub hora_solicitacao: NaiveTime,
    pub tipo_solicitacao: TipoSolicitacao,
    pub finalidade: Finalidade,
    #[schema(example = "Galpão 3")]
    pub local: String,
    #[schema(example = "Construtora Alfa")]
    pub empresa: String,
    pub data_inicial: NaiveDate,
    pub data_final: NaiveDate,
    pub status_geral: StatusGeral,
    pub observacoes_gerais: Option<String>,
    #[schema(example = "60.00")]
    pub custo_checagem: Decimal,
    #[schema(example = "20.00")]
    pub economia_gerada: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SolicitacaoDetalhe {
    #[serde(flatten)]
    pub solicitacao: Solicitacao,
    pub prestadores: Vec<Prestador>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SolicitacaoCriada {
    pub solicitacao: SolicitacaoDetalhe,
    pub economias: Vec<AnaliseEconomia>,
}

// --- Payloads ---

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NovoPrestadorPayload {
    #[schema(example = "João da Silva")]
    pub nome: String,
    #[schema(example = "12.345.678-9")]
    pub documento: String,
    #[schema(example = "123.456.789-00")]
    pub documento2: Option<String>,
    pub empresa: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriarSolicitacaoPayload {
    pub tipo_solicitacao: TipoSolicitacao,
    pub finalidade: Finalidade,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Galpão 3")]
    pub local: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Construtora Alfa")]
    pub empresa: String,

    pub data_inicial: NaiveDate,
    pub data_final: NaiveDate,
    pub observacoes_gerais: Option<String>,

    // Só o administrador pode abrir em nome de outro solicitante/departamento
    pub solicitante: Option<String>,
    pub departamento: Option<String>,

    #[validate(nested)]
    pub prestadores: Vec<NovoPrestadorPayload>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PreviaSolicitacaoPayload {
    #[validate(nested)]
    pub prestadores: Vec<NovoPrestadorPayload>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FiltroSolicitacoes {
    pub departamento: Option<String>,
    pub solicitante: Option<String>,
    pub status_geral: Option<StatusGeral>,
    /// Data da solicitação (inclusive)
    pub data_de: Option<NaiveDate>,
    pub data_ate: Option<NaiveDate>,
}

// Dados já resolvidos pelo serviço, prontos para o INSERT
#[derive(Debug, Clone)]
pub struct NovaSolicitacao {
    pub numero: String,
    pub solicitante: String,
    pub departamento: String,
    pub usuario_id: Option<Uuid>,
    pub data_solicitacao: NaiveDate,
    pub hora_solicitacao: NaiveTime,
    pub tipo_solicitacao: TipoSolicitacao,
    pub finalidade: Finalidade,
    pub local: String,
    pub empresa: String,
    pub data_inicial: NaiveDate,
    pub data_final: NaiveDate,
    pub status_geral: StatusGeral,
    pub observacoes_gerais: Option<String>,
    pub custo_checagem: Decimal,
    pub economia_gerada: Decimal,
}
