// src/models/preferencias.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::visao::Visao;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PreferenciaColunas {
    pub visao: Visao,
    #[schema(example = json!({"prestador": true, "documento": true, "justificativa": false}))]
    pub colunas: BTreeMap<String, bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AtualizarColunasPayload {
    pub colunas: BTreeMap<String, bool>,
}
