// src/services/visao_service.rs

use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use sqlx::{Executor, Postgres};

use crate::{
    common::{db_utils::with_timeout, error::AppError},
    db::PrestadorRepository,
    models::{
        auth::{Perfil, Usuario},
        prestador::{LinhaPrestador, LinhaVisao, Urgencia},
        visao::{FiltroVisao, PaginaVisao, Paginacao, Visao},
    },
    services::{
        busca::{aplica_filtro, paginar, visivel_na_visao},
        prioridade::{ordenar, prioridade},
        status::{
            acesso_expirando, formatar_horas_restantes, horas_restantes, status_cadastro_efetivo,
            status_checagem_efetivo, urgencia_data_inicial,
        },
    },
};

#[derive(Clone)]
pub struct VisaoService {
    prestador_repo: PrestadorRepository,
    query_timeout: Duration,
}

impl VisaoService {
    pub fn new(prestador_repo: PrestadorRepository, query_timeout: Duration) -> Self {
        Self { prestador_repo, query_timeout }
    }

    /// Linhas da visão já recortadas, filtradas e ordenadas. Base da listagem e da exportação.
    pub async fn linhas<'e, E>(
        &self,
        executor: E,
        visao: Visao,
        usuario: &Usuario,
        filtro: &FiltroVisao,
        hoje: NaiveDate,
    ) -> Result<Vec<LinhaPrestador>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let departamento = departamento_restrito(visao, usuario);

        let todas = with_timeout(
            self.query_timeout,
            self.prestador_repo.list_linhas(executor, departamento),
        )
        .await?;

        let mut linhas: Vec<LinhaPrestador> = todas
            .into_iter()
            .filter(|l| visivel_na_visao(visao, l) && aplica_filtro(filtro, l, hoje))
            .collect();

        ordenar(visao, &mut linhas, hoje, filtro.ordem.unwrap_or_default());
        Ok(linhas)
    }

    pub async fn pagina<'e, E>(
        &self,
        executor: E,
        visao: Visao,
        usuario: &Usuario,
        filtro: &FiltroVisao,
        paginacao: Paginacao,
        agora: NaiveDateTime,
    ) -> Result<PaginaVisao, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let hoje = agora.date();
        let linhas = self.linhas(executor, visao, usuario, filtro, hoje).await?;
        let total = linhas.len();

        let (fatia, total_paginas) = paginar(linhas, paginacao);
        let itens = fatia.into_iter().map(|l| linha_visao(visao, l, agora)).collect();

        Ok(PaginaVisao {
            visao,
            itens,
            total,
            pagina: paginacao.pagina.max(1),
            por_pagina: paginacao.por_pagina.max(1),
            total_paginas,
        })
    }
}

/// A visão de departamento só mostra o próprio departamento, exceto para administradores.
fn departamento_restrito(visao: Visao, usuario: &Usuario) -> Option<&str> {
    let administra = matches!(usuario.perfil, Perfil::Administrador | Perfil::Superadmin);
    (visao == Visao::Departamento && !administra).then_some(usuario.departamento.as_str())
}

pub fn linha_visao(visao: Visao, linha: LinhaPrestador, agora: NaiveDateTime) -> LinhaVisao {
    let hoje = agora.date();
    let urgencia = urgencia_data_inicial(linha.data_inicial, hoje);

    let prazo = match urgencia {
        Urgencia::Critica | Urgencia::Urgente => {
            Some(formatar_horas_restantes(horas_restantes(linha.data_inicial, agora)))
        }
        Urgencia::Normal => None,
    };

    LinhaVisao {
        status_efetivo: status_checagem_efetivo(linha.status, linha.checagem_valida_ate, hoje),
        cadastro_efetivo: status_cadastro_efetivo(linha.cadastro, linha.data_final, hoje),
        prioridade: prioridade(visao, linha.status, linha.cadastro),
        urgencia,
        acesso_expirando: acesso_expirando(linha.data_final, hoje),
        prazo,
        prestador: linha,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::prestador::{StatusCadastro, StatusChecagem};
    use crate::services::fixtures::{data, linha};
    use uuid::Uuid;

    fn usuario(perfil: Perfil) -> Usuario {
        Usuario {
            id: Uuid::new_v4(),
            nome: "Carlos".into(),
            email: "carlos@empresa.com".into(),
            departamento: "Logística".into(),
            perfil,
            password_hash: String::new(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn departamento_fica_preso_ao_do_usuario() {
        assert_eq!(departamento_restrito(Visao::Departamento, &usuario(Perfil::Solicitante)), Some("Logística"));
        assert_eq!(departamento_restrito(Visao::Departamento, &usuario(Perfil::Administrador)), None);
        assert_eq!(departamento_restrito(Visao::Gestor, &usuario(Perfil::Gestor)), None);
    }

    #[test]
    fn linha_com_validade_vencida_e_inicio_hoje() {
        let agora = data(2024, 6, 1).and_hms_opt(10, 0, 0).unwrap();
        let mut l = linha("Ana", StatusChecagem::Aprovada, StatusCadastro::Ok, data(2024, 6, 1), data(2024, 5, 20));
        l.checagem_valida_ate = Some(data(2023, 1, 1));
        l.data_final = data(2024, 6, 5);

        let v = linha_visao(Visao::Administrador, l, agora);

        assert_eq!(v.status_efetivo, StatusChecagem::Vencida);
        assert_eq!(v.cadastro_efetivo, StatusCadastro::Ok);
        assert_eq!(v.urgencia, Urgencia::Critica);
        assert_eq!(v.prazo.as_deref(), Some("13h restantes"));
        assert!(v.acesso_expirando);
    }

    #[test]
    fn inicio_distante_nao_tem_prazo() {
        let agora = data(2024, 6, 1).and_hms_opt(10, 0, 0).unwrap();
        let l = linha("Ana", StatusChecagem::Pendente, StatusCadastro::Pendente, data(2024, 6, 20), data(2024, 5, 20));

        let v = linha_visao(Visao::Aprovador, l, agora);

        assert_eq!(v.urgencia, Urgencia::Normal);
        assert_eq!(v.prazo, None);
        assert!(!v.acesso_expirando);
    }
}
