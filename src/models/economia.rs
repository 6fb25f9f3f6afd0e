// src/models/economia.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::models::prestador::StatusHistorico;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "tipo_economia", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TipoEconomia {
    Maxima,
    Operacional,
    Evitado,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EconomiaRegistro {
    pub id: Uuid,
    pub solicitante: String,
    pub prestador_nome: String,
    pub prestador_documento: String,
    pub tipo_economia: TipoEconomia,
    #[schema(example = "20.00")]
    pub valor_economizado: Decimal,
    pub detalhes: String,
    pub solicitacao_origem: Option<String>,
    pub data_deteccao: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NovaEconomia {
    pub solicitante: String,
    pub prestador_nome: String,
    pub prestador_documento: String,
    pub tipo_economia: TipoEconomia,
    pub valor_economizado: Decimal,
    pub detalhes: String,
    pub solicitacao_origem: Option<String>,
}

/// Resultado da prévia para um prestador. `tipo` vazio significa nenhuma economia.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnaliseEconomia {
    pub nome: String,
    pub documento: String,
    pub tipo: Option<TipoEconomia>,
    pub valor: Decimal,
    pub motivo: String,
    pub historico: StatusHistorico,
    pub solicitacao_anterior: Option<String>,
}

#[derive(Debug, Default, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TotalPorTipo {
    pub quantidade: i64,
    pub valor: Decimal,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EconomiaPorSolicitante {
    pub solicitante: String,
    pub quantidade: i64,
    pub total: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetricasEconomia {
    pub total_economizado: Decimal,
    pub total_registros: i64,
    pub maxima: TotalPorTipo,
    pub operacional: TotalPorTipo,
    pub evitado: TotalPorTipo,
    pub por_solicitante: Vec<EconomiaPorSolicitante>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FiltroEconomias {
    pub solicitante: Option<String>,
    pub tipo: Option<TipoEconomia>,
    pub limite: Option<i64>,
}
