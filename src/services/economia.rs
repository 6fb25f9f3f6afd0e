// src/services/economia.rs
//
// Classificação de economia de um novo prestador contra o registro mais
// recente do mesmo documento.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{
    common::datas::formatar_data_opt,
    models::{
        economia::{AnaliseEconomia, TipoEconomia},
        prestador::{LinhaPrestador, StatusCadastro, StatusHistorico},
    },
    services::status::status_historico,
};

/// Custo de uma checagem (R$ 20,00), também o valor de cada economia.
pub const VALOR_CHECAGEM: Decimal = Decimal::from_parts(2000, 0, 0, false, 2);

pub fn classificar(
    nome: &str,
    documento: &str,
    anterior: Option<&LinhaPrestador>,
    hoje: NaiveDate,
) -> AnaliseEconomia {
    let nome = nome.trim();
    let documento = documento.trim();

    let sem_economia = |motivo: String, historico| AnaliseEconomia {
        nome: nome.to_string(),
        documento: documento.to_string(),
        tipo: None,
        valor: Decimal::ZERO,
        motivo,
        historico,
        solicitacao_anterior: anterior.map(|a| a.numero.clone()),
    };

    if nome.is_empty() || documento.is_empty() {
        return sem_economia("Prestador com dados incompletos".into(), StatusHistorico::SemHistorico);
    }

    let Some(anterior) = anterior else {
        return sem_economia(
            "Prestador novo - primeira checagem necessária".into(),
            StatusHistorico::SemHistorico,
        );
    };

    let historico = status_historico(anterior.status, anterior.checagem_valida_ate, hoje);
    let em_liberacao = matches!(anterior.cadastro, StatusCadastro::Pendente | StatusCadastro::Urgente);
    let liberado = anterior.cadastro == StatusCadastro::Ok;
    let validade = formatar_data_opt(anterior.checagem_valida_ate);

    let detectada = if anterior.nome.trim().to_lowercase() != nome.to_lowercase() {
        Some((
            TipoEconomia::Evitado,
            format!("Erro de digitação evitado. Nome correto: {}", anterior.nome),
        ))
    } else if historico == StatusHistorico::Reprovado {
        Some((
            TipoEconomia::Evitado,
            "Tentativa de solicitar prestador reprovado foi bloqueada".to_string(),
        ))
    } else if em_liberacao && historico == StatusHistorico::Pendente {
        Some((
            TipoEconomia::Operacional,
            "Duplicação evitada - prestador já em processo de checagem e liberação".to_string(),
        ))
    } else if em_liberacao && historico == StatusHistorico::Valido {
        Some((
            TipoEconomia::Operacional,
            format!("Duplicação evitada - já em processo de liberação (checagem válida até {})", validade),
        ))
    } else if liberado && historico == StatusHistorico::Valido {
        Some((
            TipoEconomia::Maxima,
            format!("Checagem desnecessária evitada - válida até {}", validade),
        ))
    } else if liberado && historico == StatusHistorico::Excecao {
        Some((
            TipoEconomia::Maxima,
            "Processo desnecessário evitado - já liberado por exceção".to_string(),
        ))
    } else {
        None
    };

    match detectada {
        Some((tipo, motivo)) => AnaliseEconomia {
            nome: nome.to_string(),
            documento: documento.to_string(),
            tipo: Some(tipo),
            valor: VALOR_CHECAGEM,
            motivo,
            historico,
            solicitacao_anterior: Some(anterior.numero.clone()),
        },
        None => sem_economia("Sem economia detectada".into(), historico),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::prestador::StatusChecagem;
    use crate::services::fixtures::{data, linha};
    use StatusCadastro as C;
    use StatusChecagem as S;

    fn anterior(status: StatusChecagem, cadastro: StatusCadastro, valida_ate: Option<NaiveDate>) -> LinhaPrestador {
        let mut l = linha("João da Silva", status, cadastro, data(2024, 1, 10), data(2024, 1, 2));
        l.checagem_valida_ate = valida_ate;
        l
    }

    fn tipo(nome: &str, a: &LinhaPrestador) -> Option<TipoEconomia> {
        classificar(nome, "12.345.678-9", Some(a), data(2024, 6, 1)).tipo
    }

    #[test]
    fn valor_e_vinte_reais() {
        assert_eq!(VALOR_CHECAGEM.to_string(), "20.00");
    }

    #[test]
    fn sem_registro_ou_incompleto_nao_economiza() {
        let hoje = data(2024, 6, 1);
        let novo = classificar("Fulano", "123", None, hoje);
        assert_eq!(novo.tipo, None);
        assert_eq!(novo.valor, Decimal::ZERO);

        let a = anterior(S::Aprovada, C::Ok, Some(data(2024, 12, 1)));
        assert_eq!(classificar("", "123", Some(&a), hoje).tipo, None);
        assert_eq!(classificar("Fulano", "  ", Some(&a), hoje).tipo, None);
    }

    #[test]
    fn nome_divergente_evita_erro() {
        let a = anterior(S::Aprovada, C::Ok, Some(data(2024, 12, 1)));
        assert_eq!(tipo("Joao da Silva", &a), Some(TipoEconomia::Evitado));
        // Caixa e espaços não contam como divergência
        assert_eq!(tipo("  JOÃO DA SILVA ", &a), Some(TipoEconomia::Maxima));
    }

    #[test]
    fn reprovado_e_bloqueado() {
        let a = anterior(S::Reprovada, C::Pendente, None);
        assert_eq!(tipo("João da Silva", &a), Some(TipoEconomia::Evitado));
    }

    #[test]
    fn em_processo_e_operacional() {
        let pendente = anterior(S::Pendente, C::Urgente, None);
        let valida = anterior(S::Aprovada, C::Pendente, Some(data(2024, 12, 1)));
        assert_eq!(tipo("João da Silva", &pendente), Some(TipoEconomia::Operacional));
        assert_eq!(tipo("João da Silva", &valida), Some(TipoEconomia::Operacional));
    }

    #[test]
    fn liberado_com_checagem_valida_ou_excecao_e_maxima() {
        let valida = anterior(S::Aprovada, C::Ok, Some(data(2024, 12, 1)));
        let excecao = anterior(S::Excecao, C::Ok, None);
        assert_eq!(tipo("João da Silva", &valida), Some(TipoEconomia::Maxima));
        assert_eq!(tipo("João da Silva", &excecao), Some(TipoEconomia::Maxima));
    }

    #[test]
    fn checagem_vencida_nao_economiza() {
        let vencida = anterior(S::Aprovada, C::Ok, Some(data(2024, 1, 1)));
        let analise = classificar("João da Silva", "1", Some(&vencida), data(2024, 6, 1));
        assert_eq!(analise.tipo, None);
        assert_eq!(analise.historico, StatusHistorico::Vencido);
        assert_eq!(analise.solicitacao_anterior.as_deref(), Some("2024-000001"));
    }
}
