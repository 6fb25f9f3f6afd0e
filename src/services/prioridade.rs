// src/services/prioridade.rs
//
// Cada visão tem sua tabela de prioridade (menor = mais urgente). As tabelas
// são diferentes de propósito e leem o status gravado, não o efetivo.

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::{
    common::datas::dias_ate,
    models::{
        prestador::{LinhaPrestador, StatusCadastro, StatusChecagem},
        visao::{OrdemData, Visao},
    },
};

pub fn prioridade(visao: Visao, status: StatusChecagem, cadastro: StatusCadastro) -> u8 {
    use StatusCadastro as C;
    use StatusChecagem as S;

    let em_aberto = matches!(cadastro, C::Urgente | C::Pendente);

    match visao {
        Visao::Administrador => match (status, cadastro) {
            (_, C::Ok | C::Negada) => 5,
            (S::Excecao, _) if em_aberto => 1,
            (S::Reprovada, _) if em_aberto => 2,
            (S::Aprovada, _) if em_aberto => 3,
            _ => 4,
        },
        Visao::Aprovador => match status {
            S::Pendente => 0,
            _ => 1,
        },
        Visao::Suporte | Visao::Departamento => match (status, cadastro) {
            (S::Pendente, C::Urgente) => 1,
            (S::Pendente, C::Pendente) => 2,
            _ => 3,
        },
        Visao::Gestor => match status {
            S::Reprovada => 1,
            S::Excecao => 2,
            _ => 3,
        },
    }
}

pub fn comparar(
    visao: Visao,
    a: &LinhaPrestador,
    b: &LinhaPrestador,
    hoje: NaiveDate,
    ordem: OrdemData,
) -> Ordering {
    let por_prioridade = prioridade(visao, a.status, a.cadastro)
        .cmp(&prioridade(visao, b.status, b.cadastro));

    por_prioridade.then_with(|| match visao {
        Visao::Administrador => dias_ate(a.data_inicial, hoje)
            .cmp(&dias_ate(b.data_inicial, hoje))
            .then_with(|| b.data_solicitacao.cmp(&a.data_solicitacao)),
        Visao::Aprovador => a.data_inicial.cmp(&b.data_inicial),
        Visao::Suporte | Visao::Departamento => b.data_solicitacao.cmp(&a.data_solicitacao),
        Visao::Gestor => match ordem {
            OrdemData::Asc => a.data_solicitacao.cmp(&b.data_solicitacao),
            OrdemData::Desc => b.data_solicitacao.cmp(&a.data_solicitacao),
        },
    })
}

/// Ordenação estável: empates completos mantêm a ordem de chegada.
pub fn ordenar(visao: Visao, linhas: &mut [LinhaPrestador], hoje: NaiveDate, ordem: OrdemData) {
    linhas.sort_by(|a, b| comparar(visao, a, b, hoje, ordem));
}
