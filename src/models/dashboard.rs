// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

// 1. Cards do topo
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumoDashboard {
    pub total_solicitacoes: i64,
    pub pendentes: i64,
    pub aprovadas: i64,
    pub reprovadas: i64,
    pub parciais: i64,
    pub total_prestadores: i64,
    pub cadastros_urgentes: i64,
    pub custo_total_checagem: Decimal,
    pub economia_total: Decimal,
}

// 2. Relatório por departamento
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumoDepartamento {
    pub departamento: String,
    pub solicitacoes: i64,
    pub prestadores: i64,
    pub custo: Decimal,
    pub economia: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PainelDashboard {
    pub resumo: ResumoDashboard,
    pub departamentos: Vec<ResumoDepartamento>,
}
