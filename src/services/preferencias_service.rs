// src/services/preferencias_service.rs

use std::collections::BTreeMap;

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::PreferenciasRepository,
    models::{exportacao::Coluna, preferencias::PreferenciaColunas, visao::Visao},
};

#[derive(Clone)]
pub struct PreferenciasService {
    repo: PreferenciasRepository,
}

impl PreferenciasService {
    pub fn new(repo: PreferenciasRepository) -> Self {
        Self { repo }
    }

    pub async fn get_colunas<'e, E>(&self, executor: E, usuario_id: Uuid, visao: Visao) -> Result<PreferenciaColunas, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let salvas = self.repo.get_colunas(executor, usuario_id, visao.slug()).await?;
        Ok(PreferenciaColunas { visao, colunas: completar(salvas.unwrap_or_default()) })
    }

    pub async fn salvar_colunas<'e, E>(
        &self,
        executor: E,
        usuario_id: Uuid,
        visao: Visao,
        colunas: &BTreeMap<String, bool>,
    ) -> Result<PreferenciaColunas, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        validar(colunas)?;
        let colunas = completar(colunas.clone());

        self.repo.salvar_colunas(executor, usuario_id, visao.slug(), &colunas).await?;
        Ok(PreferenciaColunas { visao, colunas })
    }
}

fn validar(colunas: &BTreeMap<String, bool>) -> Result<(), AppError> {
    match colunas.keys().find(|chave| Coluna::from_chave(chave).is_none()) {
        Some(desconhecida) => Err(AppError::ColunaDesconhecida(desconhecida.clone())),
        None => Ok(()),
    }
}

/// Colunas sem valor salvo ficam visíveis.
fn completar(mut colunas: BTreeMap<String, bool>) -> BTreeMap<String, bool> {
    for coluna in Coluna::TODAS {
        colunas.entry(coluna.chave().to_string()).or_insert(true);
    }
    colunas
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sem_preferencia_tudo_visivel() {
        let colunas = completar(BTreeMap::new());
        assert_eq!(colunas.len(), Coluna::TODAS.len());
        assert!(colunas.values().all(|v| *v));
    }

    #[test]
    fn preserva_as_escondidas() {
        let mut salvas = BTreeMap::new();
        salvas.insert("justificativa".to_string(), false);

        let colunas = completar(salvas);
        assert!(!colunas["justificativa"]);
        assert!(colunas["prestador"]);
    }

    #[test]
    fn chave_desconhecida_e_rejeitada() {
        let mut colunas = BTreeMap::new();
        colunas.insert("numero".to_string(), true);
        colunas.insert("cpf".to_string(), false);

        assert!(matches!(validar(&colunas), Err(AppError::ColunaDesconhecida(c)) if c == "cpf"));
    }
}
