// src/models/exportacao.rs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FormatoExportacao {
    #[default]
    Xlsx,
    Csv,
}

impl FormatoExportacao {
    pub fn extensao(&self) -> &'static str {
        match self {
            FormatoExportacao::Xlsx => "xlsx",
            FormatoExportacao::Csv => "csv",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            FormatoExportacao::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            FormatoExportacao::Csv => "text/csv; charset=utf-8",
        }
    }
}

/// Colunas exportáveis, na ordem em que aparecem na planilha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum Coluna {
    Numero,
    DataSolicitacao,
    Solicitante,
    Departamento,
    Empresa,
    Prestador,
    Documento,
    Documento2,
    DataInicial,
    DataFinal,
    Liberacao,
    Checagem,
    ValidaAte,
    Justificativa,
    Observacoes,
    Local,
}

impl Coluna {
    pub const TODAS: [Coluna; 16] = [
        Coluna::Numero,
        Coluna::DataSolicitacao,
        Coluna::Solicitante,
        Coluna::Departamento,
        Coluna::Empresa,
        Coluna::Prestador,
        Coluna::Documento,
        Coluna::Documento2,
        Coluna::DataInicial,
        Coluna::DataFinal,
        Coluna::Liberacao,
        Coluna::Checagem,
        Coluna::ValidaAte,
        Coluna::Justificativa,
        Coluna::Observacoes,
        Coluna::Local,
    ];

    pub fn chave(&self) -> &'static str {
        match self {
            Coluna::Numero => "numero",
            Coluna::DataSolicitacao => "dataSolicitacao",
            Coluna::Solicitante => "solicitante",
            Coluna::Departamento => "departamento",
            Coluna::Empresa => "empresa",
            Coluna::Prestador => "prestador",
            Coluna::Documento => "documento",
            Coluna::Documento2 => "documento2",
            Coluna::DataInicial => "dataInicial",
            Coluna::DataFinal => "dataFinal",
            Coluna::Liberacao => "liberacao",
            Coluna::Checagem => "checagem",
            Coluna::ValidaAte => "validaAte",
            Coluna::Justificativa => "justificativa",
            Coluna::Observacoes => "observacoes",
            Coluna::Local => "local",
        }
    }

    pub fn titulo(&self) -> &'static str {
        match self {
            Coluna::Numero => "Número",
            Coluna::DataSolicitacao => "Data Solicitação",
            Coluna::Solicitante => "Solicitante",
            Coluna::Departamento => "Departamento",
            Coluna::Empresa => "Empresa",
            Coluna::Prestador => "Prestador",
            Coluna::Documento => "Documento",
            Coluna::Documento2 => "Documento 2",
            Coluna::DataInicial => "Data Inicial",
            Coluna::DataFinal => "Data Final",
            Coluna::Liberacao => "Liberação",
            Coluna::Checagem => "Checagem",
            Coluna::ValidaAte => "Válida Até",
            Coluna::Justificativa => "Justificativa",
            Coluna::Observacoes => "Observações",
            Coluna::Local => "Local",
        }
    }

    pub fn largura(&self) -> f64 {
        match self {
            Coluna::Prestador | Coluna::Empresa | Coluna::Justificativa | Coluna::Observacoes => 30.0,
            Coluna::Solicitante | Coluna::Departamento | Coluna::Local => 20.0,
            _ => 15.0,
        }
    }

    pub fn from_chave(chave: &str) -> Option<Self> {
        Self::TODAS.into_iter().find(|c| c.chave() == chave.trim())
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct OpcoesExportacao {
    #[serde(default)]
    pub formato: FormatoExportacao,
    /// Chaves separadas por vírgula. Ausente: preferência salva do usuário.
    pub colunas: Option<String>,
}
