// src/common/datas.rs
//
// Datas de calendário sem fuso (NaiveDate). Comparações ignoram a hora:
// uma data "venceu" quando é estritamente anterior a hoje.

use chrono::{Local, Months, NaiveDate, NaiveDateTime};

pub fn hoje() -> NaiveDate {
    Local::now().date_naive()
}

pub fn agora() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Aceita `aaaa-mm-dd`, `dd/mm/aaaa` e timestamps ISO (usa só a parte da data).
pub fn parse_data(valor: &str) -> Option<NaiveDate> {
    let valor = valor.trim();
    if valor.is_empty() {
        return None;
    }

    let so_data = valor.split(['T', ' ']).next().unwrap_or(valor);

    NaiveDate::parse_from_str(so_data, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(so_data, "%d/%m/%Y"))
        .ok()
}

pub fn formatar_data(data: NaiveDate) -> String {
    data.format("%d/%m/%Y").to_string()
}

pub fn formatar_data_opt(data: Option<NaiveDate>) -> String {
    data.map(formatar_data).unwrap_or_else(|| "-".to_string())
}

pub fn esta_vencida(data: NaiveDate, hoje: NaiveDate) -> bool {
    data < hoje
}

/// Negativo quando a data já passou.
pub fn dias_ate(data: NaiveDate, hoje: NaiveDate) -> i64 {
    (data - hoje).num_days()
}

/// Soma meses de calendário; dias inexistentes no mês de destino caem no último dia.
pub fn somar_meses(data: NaiveDate, meses: u32) -> NaiveDate {
    data.checked_add_months(Months::new(meses)).unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, dia: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, dia).unwrap()
    }

    #[test]
    fn parse_formatos_aceitos() {
        assert_eq!(parse_data("2024-06-01"), Some(d(2024, 6, 1)));
        assert_eq!(parse_data("01/06/2024"), Some(d(2024, 6, 1)));
        assert_eq!(parse_data(" 2024-06-01T13:45:00Z "), Some(d(2024, 6, 1)));
        assert_eq!(parse_data("2024-06-01 08:00:00"), Some(d(2024, 6, 1)));
    }

    #[test]
    fn parse_rejeita_lixo() {
        assert_eq!(parse_data(""), None);
        assert_eq!(parse_data("   "), None);
        assert_eq!(parse_data("31/02/2024"), None);
        assert_eq!(parse_data("amanhã"), None);
    }

    #[test]
    fn vencimento_e_estrito() {
        let hoje = d(2024, 6, 1);
        assert!(esta_vencida(d(2024, 5, 31), hoje));
        assert!(!esta_vencida(hoje, hoje));
        assert!(!esta_vencida(d(2024, 6, 2), hoje));
    }

    #[test]
    fn dias_ate_com_sinal() {
        let hoje = d(2024, 6, 10);
        assert_eq!(dias_ate(d(2024, 6, 13), hoje), 3);
        assert_eq!(dias_ate(d(2024, 6, 10), hoje), 0);
        assert_eq!(dias_ate(d(2024, 6, 1), hoje), -9);
    }

    #[test]
    fn seis_meses_ajusta_fim_do_mes() {
        assert_eq!(somar_meses(d(2024, 1, 15), 6), d(2024, 7, 15));
        assert_eq!(somar_meses(d(2024, 8, 31), 6), d(2025, 2, 28));
        assert_eq!(somar_meses(d(2023, 8, 31), 6), d(2024, 2, 29));
    }

    #[test]
    fn formatacao_brasileira() {
        assert_eq!(formatar_data(d(2024, 6, 1)), "01/06/2024");
        assert_eq!(formatar_data_opt(None), "-");
    }
}
