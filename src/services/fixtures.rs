// Linhas de teste compartilhadas pelos testes de regras.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::{
    prestador::{LinhaPrestador, StatusCadastro, StatusChecagem},
    solicitacao::{Finalidade, TipoSolicitacao},
};

pub fn data(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn linha(
    nome: &str,
    status: StatusChecagem,
    cadastro: StatusCadastro,
    data_inicial: NaiveDate,
    data_solicitacao: NaiveDate,
) -> LinhaPrestador {
    LinhaPrestador {
        id: Uuid::new_v4(),
        solicitacao_id: Uuid::new_v4(),
        nome: nome.to_string(),
        documento: "12.345.678-9".to_string(),
        documento2: None,
        empresa: Some("Construtora Alfa".to_string()),
        status,
        checagem_valida_ate: None,
        cadastro,
        observacoes: None,
        justificativa: None,
        aprovado_por: None,
        data_avaliacao: None,
        numero: "2024-000001".to_string(),
        solicitante: "Maria Souza".to_string(),
        departamento: "Manutenção".to_string(),
        data_solicitacao,
        tipo_solicitacao: TipoSolicitacao::ChecagemLiberacao,
        finalidade: Finalidade::Obra,
        local: "Galpão 3".to_string(),
        empresa_solicitacao: "Construtora Alfa".to_string(),
        data_inicial,
        data_final: data_inicial + chrono::Duration::days(30),
    }
}
