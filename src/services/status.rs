// src/services/status.rs
//
// Status efetivo = status gravado + datas + "hoje". Nada aqui consulta o
// relógio: quem chama passa `hoje`.

use chrono::{NaiveDate, NaiveDateTime};

use crate::{
    common::datas::{dias_ate, esta_vencida},
    models::{
        prestador::{StatusCadastro, StatusChecagem, StatusHistorico, Urgencia},
        solicitacao::StatusGeral,
    },
};

pub fn status_checagem_efetivo(
    status: StatusChecagem,
    valida_ate: Option<NaiveDate>,
    hoje: NaiveDate,
) -> StatusChecagem {
    match (status, valida_ate) {
        (StatusChecagem::Aprovada, Some(validade)) if esta_vencida(validade, hoje) => {
            StatusChecagem::Vencida
        }
        (outro, _) => outro,
    }
}

/// `negada` vence sempre; depois, fim do acesso no passado vira `vencida`.
pub fn status_cadastro_efetivo(
    cadastro: StatusCadastro,
    data_final: NaiveDate,
    hoje: NaiveDate,
) -> StatusCadastro {
    if cadastro == StatusCadastro::Negada {
        return StatusCadastro::Negada;
    }
    if esta_vencida(data_final, hoje) {
        return StatusCadastro::Vencida;
    }
    cadastro
}

/// Classifica o registro anterior de um documento para reaproveitamento.
pub fn status_historico(
    status: StatusChecagem,
    valida_ate: Option<NaiveDate>,
    hoje: NaiveDate,
) -> StatusHistorico {
    match status {
        StatusChecagem::Pendente => StatusHistorico::Pendente,
        StatusChecagem::Reprovada => StatusHistorico::Reprovado,
        StatusChecagem::Excecao => StatusHistorico::Excecao,
        StatusChecagem::Vencida => StatusHistorico::Vencido,
        StatusChecagem::Aprovada => match valida_ate {
            None => StatusHistorico::SemHistorico,
            Some(validade) if esta_vencida(validade, hoje) => StatusHistorico::Vencido,
            Some(_) => StatusHistorico::Valido,
        },
    }
}

/// Status da solicitação a partir das checagens dos seus prestadores.
pub fn status_geral(statuses: &[StatusChecagem]) -> StatusGeral {
    if statuses.is_empty() {
        return StatusGeral::Pendente;
    }

    let aprovados = statuses.iter().filter(|s| **s == StatusChecagem::Aprovada).count();
    let reprovados = statuses.iter().filter(|s| **s == StatusChecagem::Reprovada).count();

    if aprovados == statuses.len() {
        StatusGeral::Aprovado
    } else if reprovados == statuses.len() {
        StatusGeral::Reprovado
    } else if aprovados > 0 && reprovados > 0 {
        StatusGeral::Parcial
    } else {
        StatusGeral::Pendente
    }
}

// --- Indicadores de prazo ---

pub fn urgencia_data_inicial(data_inicial: NaiveDate, hoje: NaiveDate) -> Urgencia {
    match dias_ate(data_inicial, hoje) {
        d if d <= 0 => Urgencia::Critica,
        1..=3 => Urgencia::Urgente,
        _ => Urgencia::Normal,
    }
}

/// Acesso termina nos próximos 7 dias (hoje não conta).
pub fn acesso_expirando(data_final: NaiveDate, hoje: NaiveDate) -> bool {
    (1..=7).contains(&dias_ate(data_final, hoje))
}

/// Horas até o fim do dia de início; negativo quando já passou.
pub fn horas_restantes(data_inicial: NaiveDate, agora: NaiveDateTime) -> i64 {
    let fim_do_dia = data_inicial.and_hms_opt(23, 59, 59).unwrap_or_default();
    (fim_do_dia - agora).num_hours()
}

pub fn formatar_horas_restantes(horas: i64) -> String {
    match horas {
        h if h < 0 => "Prazo encerrado".to_string(),
        0 => "Menos de 1 hora".to_string(),
        h if h < 24 => format!("{}h restantes", h),
        h => format!("{}d {}h restantes", h / 24, h % 24),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, dia: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, dia).unwrap()
    }

    #[test]
    fn aprovada_com_validade_passada_vira_vencida() {
        let hoje = d(2024, 6, 1);
        assert_eq!(
            status_checagem_efetivo(StatusChecagem::Aprovada, Some(d(2023, 1, 1)), hoje),
            StatusChecagem::Vencida
        );
    }

    #[test]
    fn aprovada_vale_ate_o_ultimo_dia() {
        let hoje = d(2024, 6, 1);
        assert_eq!(
            status_checagem_efetivo(StatusChecagem::Aprovada, Some(hoje), hoje),
            StatusChecagem::Aprovada
        );
        assert_eq!(
            status_checagem_efetivo(StatusChecagem::Aprovada, None, hoje),
            StatusChecagem::Aprovada
        );
    }

    #[test]
    fn reprovada_e_excecao_nao_vencem() {
        let hoje = d(2024, 6, 1);
        let antiga = Some(d(2020, 1, 1));
        assert_eq!(
            status_checagem_efetivo(StatusChecagem::Reprovada, antiga, hoje),
            StatusChecagem::Reprovada
        );
        assert_eq!(
            status_checagem_efetivo(StatusChecagem::Excecao, antiga, hoje),
            StatusChecagem::Excecao
        );
        assert_eq!(
            status_checagem_efetivo(StatusChecagem::Pendente, antiga, hoje),
            StatusChecagem::Pendente
        );
    }

    #[test]
    fn negada_sempre_vence() {
        let hoje = d(2024, 6, 1);
        assert_eq!(
            status_cadastro_efetivo(StatusCadastro::Negada, d(2099, 1, 1), hoje),
            StatusCadastro::Negada
        );
        assert_eq!(
            status_cadastro_efetivo(StatusCadastro::Negada, d(2000, 1, 1), hoje),
            StatusCadastro::Negada
        );
    }

    #[test]
    fn fim_do_acesso_passado_vira_vencida() {
        let hoje = d(2024, 6, 1);
        for cadastro in [
            StatusCadastro::Pendente,
            StatusCadastro::Ok,
            StatusCadastro::Urgente,
            StatusCadastro::Vencida,
        ] {
            assert_eq!(
                status_cadastro_efetivo(cadastro, d(2024, 5, 31), hoje),
                StatusCadastro::Vencida
            );
            assert_eq!(status_cadastro_efetivo(cadastro, hoje, hoje), cadastro);
        }
    }

    #[test]
    fn historico_classifica_registro_anterior() {
        let hoje = d(2024, 6, 1);
        assert_eq!(
            status_historico(StatusChecagem::Aprovada, Some(d(2024, 12, 1)), hoje),
            StatusHistorico::Valido
        );
        assert_eq!(
            status_historico(StatusChecagem::Aprovada, Some(d(2024, 1, 1)), hoje),
            StatusHistorico::Vencido
        );
        assert_eq!(
            status_historico(StatusChecagem::Aprovada, None, hoje),
            StatusHistorico::SemHistorico
        );
        assert_eq!(status_historico(StatusChecagem::Pendente, None, hoje), StatusHistorico::Pendente);
        assert_eq!(status_historico(StatusChecagem::Reprovada, None, hoje), StatusHistorico::Reprovado);
        assert_eq!(status_historico(StatusChecagem::Excecao, None, hoje), StatusHistorico::Excecao);
    }

    #[test]
    fn status_geral_agrega_prestadores() {
        use StatusChecagem::*;
        assert_eq!(status_geral(&[Aprovada, Aprovada]), StatusGeral::Aprovado);
        assert_eq!(status_geral(&[Reprovada]), StatusGeral::Reprovado);
        assert_eq!(status_geral(&[Aprovada, Reprovada]), StatusGeral::Parcial);
        assert_eq!(status_geral(&[Aprovada, Pendente]), StatusGeral::Pendente);
        assert_eq!(status_geral(&[Aprovada, Excecao]), StatusGeral::Pendente);
        assert_eq!(status_geral(&[]), StatusGeral::Pendente);
    }

    #[test]
    fn urgencia_pela_data_inicial() {
        let hoje = d(2024, 6, 10);
        assert_eq!(urgencia_data_inicial(d(2024, 6, 10), hoje), Urgencia::Critica);
        assert_eq!(urgencia_data_inicial(d(2024, 6, 1), hoje), Urgencia::Critica);
        assert_eq!(urgencia_data_inicial(d(2024, 6, 13), hoje), Urgencia::Urgente);
        assert_eq!(urgencia_data_inicial(d(2024, 6, 14), hoje), Urgencia::Normal);
    }

    #[test]
    fn expiracao_nos_proximos_sete_dias() {
        let hoje = d(2024, 6, 10);
        assert!(!acesso_expirando(hoje, hoje));
        assert!(acesso_expirando(d(2024, 6, 11), hoje));
        assert!(acesso_expirando(d(2024, 6, 17), hoje));
        assert!(!acesso_expirando(d(2024, 6, 18), hoje));
    }

    #[test]
    fn horas_restantes_formatadas() {
        let agora = d(2024, 6, 10).and_hms_opt(20, 0, 0).unwrap();
        assert_eq!(horas_restantes(d(2024, 6, 10), agora), 3);
        assert_eq!(horas_restantes(d(2024, 6, 12), agora), 51);
        assert_eq!(formatar_horas_restantes(3), "3h restantes");
        assert_eq!(formatar_horas_restantes(51), "2d 3h restantes");
        assert_eq!(formatar_horas_restantes(0), "Menos de 1 hora");
        assert_eq!(formatar_horas_restantes(-2), "Prazo encerrado");
    }
}
