// src/models/migracao.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Um registro histórico. As datas aceitam `dd/mm/aaaa` ou `aaaa-mm-dd`.
/// Os aliases casam com o cabeçalho do modelo CSV.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemMigracao {
    #[serde(default, alias = "Departamento")]
    pub departamento: Option<String>,
    #[serde(default, alias = "Data Solicitação")]
    pub data_solicitacao: Option<String>,
    #[serde(default, alias = "Nome")]
    pub nome: Option<String>,
    #[serde(default, alias = "Documento")]
    pub documento: Option<String>,
    #[serde(default, alias = "Documento2")]
    pub documento2: Option<String>,
    #[serde(default, alias = "Empresa")]
    pub empresa: Option<String>,
    #[serde(default, alias = "Data Inicial")]
    pub data_inicial: Option<String>,
    #[serde(default, alias = "Data Final")]
    pub data_final: Option<String>,
    #[serde(default, alias = "Solicitante")]
    pub solicitante: Option<String>,
    /// Texto livre do sistema antigo: "Aprovado", "OK", "Negado", "Exceção"...
    #[serde(default, alias = "Status", alias = "Checagem")]
    pub status: Option<String>,
    /// "Liberado", "Expirado", "Não OK"...
    #[serde(default, alias = "Cadastro", alias = "Liberação")]
    pub cadastro: Option<String>,
    #[serde(default, alias = "Válida Até", alias = "Validade")]
    pub valida_ate: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResultadoMigracao {
    pub total_processados: usize,
    pub total_sucesso: usize,
    pub total_erros: usize,
    #[schema(example = json!(["Linha 3: Documento já existe: 12.345.678-9"]))]
    pub detalhes_erros: Vec<String>,
}
