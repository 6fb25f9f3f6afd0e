// src/models/visao.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::{
    auth::Perfil,
    prestador::{LinhaVisao, StatusCadastro, StatusChecagem},
};

pub const POR_PAGINA_PADRAO: u32 = 10;

/// As listas por perfil. Cada uma tem sua regra de prioridade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Visao {
    Administrador,
    Aprovador,
    Suporte,
    Departamento,
    Gestor,
}

impl Visao {
    pub fn parse(valor: &str) -> Option<Self> {
        match valor.trim().to_lowercase().as_str() {
            "administrador" | "admin" => Some(Visao::Administrador),
            "aprovador" => Some(Visao::Aprovador),
            "suporte" => Some(Visao::Suporte),
            "departamento" => Some(Visao::Departamento),
            "gestor" => Some(Visao::Gestor),
            _ => None,
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Visao::Administrador => "administrador",
            Visao::Aprovador => "aprovador",
            Visao::Suporte => "suporte",
            Visao::Departamento => "departamento",
            Visao::Gestor => "gestor",
        }
    }

    /// Superadmin enxerga todas as visões.
    pub fn permite(&self, perfil: Perfil) -> bool {
        if perfil == Perfil::Superadmin || perfil == Perfil::Administrador {
            return true;
        }
        match self {
            Visao::Administrador => false,
            Visao::Aprovador => perfil == Perfil::Aprovador,
            Visao::Suporte => matches!(perfil, Perfil::Suporte | Perfil::Recepcao),
            Visao::Departamento => matches!(perfil, Perfil::Solicitante | Perfil::Gestor),
            Visao::Gestor => perfil == Perfil::Gestor,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrdemData {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FiltroVisao {
    pub departamento: Option<String>,
    pub empresa: Option<String>,
    pub solicitante: Option<String>,
    /// Data inicial exata do acesso
    pub data_inicial: Option<NaiveDate>,
    pub status: Option<StatusChecagem>,
    pub cadastro: Option<StatusCadastro>,
    /// Nome ou documento, sem diferenciar acentos e pontuação
    pub busca: Option<String>,
    /// Ordem da data de solicitação (visão gestor)
    pub ordem: Option<OrdemData>,
}

#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct Paginacao {
    #[serde(default = "pagina_padrao")]
    pub pagina: u32,
    #[serde(default = "por_pagina_padrao")]
    pub por_pagina: u32,
}

fn pagina_padrao() -> u32 {
    1
}

fn por_pagina_padrao() -> u32 {
    POR_PAGINA_PADRAO
}

impl Default for Paginacao {
    fn default() -> Self {
        Self { pagina: pagina_padrao(), por_pagina: por_pagina_padrao() }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginaVisao {
    pub visao: Visao,
    pub itens: Vec<LinhaVisao>,
    pub total: usize,
    pub pagina: u32,
    pub por_pagina: u32,
    pub total_paginas: u32,
}
