// src/services/busca.rs

use chrono::NaiveDate;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use crate::{
    models::{
        prestador::{LinhaPrestador, StatusCadastro, StatusChecagem},
        visao::{FiltroVisao, Paginacao, Visao},
    },
    services::status::{status_cadastro_efetivo, status_checagem_efetivo},
};

pub const MARCA_MIGRACAO: &str = "Migração Suporte";
const MARCAS_MIGRACAO_LEGADO: [&str; 1] = ["Dados migrados pelo suporte"];

/// Minúsculas, sem acentos, sem pontuação, espaços colapsados.
pub fn normalizar_texto(texto: &str) -> String {
    let limpo: String = texto
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();

    limpo.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn normalizar_documento(documento: &str) -> String {
    documento
        .chars()
        .filter(|c| !matches!(c, '.' | '-') && !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// Só os dígitos, para comparar documentos de fontes diferentes.
pub fn digitos(documento: &str) -> String {
    documento.chars().filter(|c| c.is_ascii_digit()).collect()
}

pub fn corresponde_busca(
    termo: &str,
    nome: &str,
    documento: &str,
    documento2: Option<&str>,
) -> bool {
    let termo_texto = normalizar_texto(termo);
    let termo_doc = normalizar_documento(termo);
    if termo_texto.is_empty() && termo_doc.is_empty() {
        return true;
    }

    if !termo_texto.is_empty() && normalizar_texto(nome).contains(&termo_texto) {
        return true;
    }

    !termo_doc.is_empty()
        && std::iter::once(documento)
            .chain(documento2)
            .any(|doc| normalizar_documento(doc).contains(&termo_doc))
}

/// Registros criados pela migração do suporte não entram na fila do aprovador.
pub fn e_migrado(linha: &LinhaPrestador) -> bool {
    let por_aprovador = linha
        .aprovado_por
        .as_deref()
        .is_some_and(|a| a == MARCA_MIGRACAO || MARCAS_MIGRACAO_LEGADO.contains(&a));

    let por_justificativa = linha
        .justificativa
        .as_deref()
        .is_some_and(|j| j.to_lowercase().contains("migrados pelo suporte"));

    por_aprovador || por_justificativa
}

/// Recorte fixo de cada visão, antes dos filtros do usuário.
pub fn visivel_na_visao(visao: Visao, linha: &LinhaPrestador) -> bool {
    match visao {
        Visao::Aprovador => !e_migrado(linha),
        Visao::Gestor => matches!(linha.status, StatusChecagem::Reprovada | StatusChecagem::Excecao),
        _ => true,
    }
}

fn texto_igual(filtro: &Option<String>, valor: &str) -> bool {
    match filtro.as_deref().map(str::trim) {
        None | Some("") => true,
        Some(f) => f.eq_ignore_ascii_case(valor.trim()) || normalizar_texto(f) == normalizar_texto(valor),
    }
}

pub fn aplica_filtro(filtro: &FiltroVisao, linha: &LinhaPrestador, hoje: NaiveDate) -> bool {
    if !texto_igual(&filtro.departamento, &linha.departamento)
        || !texto_igual(&filtro.solicitante, &linha.solicitante)
    {
        return false;
    }

    // Empresa do prestador, ou a da solicitação quando ele não tem uma própria
    let empresa = linha.empresa.as_deref().unwrap_or(&linha.empresa_solicitacao);
    if !texto_igual(&filtro.empresa, empresa) {
        return false;
    }

    if filtro.data_inicial.is_some_and(|d| d != linha.data_inicial) {
        return false;
    }

    if let Some(status) = filtro.status {
        let comparado = match status {
            StatusChecagem::Vencida => {
                status_checagem_efetivo(linha.status, linha.checagem_valida_ate, hoje)
            }
            _ => linha.status,
        };
        if comparado != status {
            return false;
        }
    }

    if let Some(cadastro) = filtro.cadastro {
        let comparado = match cadastro {
            StatusCadastro::Vencida | StatusCadastro::Negada => {
                status_cadastro_efetivo(linha.cadastro, linha.data_final, hoje)
            }
            _ => linha.cadastro,
        };
        if comparado != cadastro {
            return false;
        }
    }

    match filtro.busca.as_deref() {
        Some(termo) => corresponde_busca(termo, &linha.nome, &linha.documento, linha.documento2.as_deref()),
        None => true,
    }
}

/// Fatia 1-based. Página além do fim devolve vazio.
pub fn paginar<T>(itens: Vec<T>, paginacao: Paginacao) -> (Vec<T>, u32) {
    let por_pagina = paginacao.por_pagina.max(1) as usize;
    let pagina = paginacao.pagina.max(1) as usize;
    let total_paginas = itens.len().div_ceil(por_pagina) as u32;

    let pagina_itens = itens
        .into_iter()
        .skip((pagina - 1) * por_pagina)
        .take(por_pagina)
        .collect();

    (pagina_itens, total_paginas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fixtures::{data, linha};
    use StatusCadastro as C;
    use StatusChecagem as S;

    #[test]
    fn jose_acha_jose_sem_acento() {
        assert_eq!(normalizar_texto("José"), "jose");
        assert!(corresponde_busca("jose", "José da Silva", "123", None));
        assert!(corresponde_busca("JOSÉ", "jose da silva", "123", None));
    }

    #[test]
    fn pontuacao_e_espacos_sao_ignorados() {
        assert_eq!(normalizar_texto("  Ana-Maria   D'Ávila, Jr. "), "anamaria davila jr");
        assert_eq!(normalizar_texto("Conceição"), "conceicao");
    }

    #[test]
    fn documento_com_ou_sem_mascara() {
        assert_eq!(normalizar_documento("123.456.789-00"), "12345678900");
        assert!(corresponde_busca("12345678900", "Fulano", "123.456.789-00", None));
        assert!(corresponde_busca("456.789", "Fulano", "123456789-00", None));
        assert!(corresponde_busca("mg 12", "Fulano", "000", Some("MG-12.345.678")));
        assert!(!corresponde_busca("999", "Fulano", "123.456.789-00", None));
    }

    #[test]
    fn termo_vazio_casa_tudo() {
        assert!(corresponde_busca("", "Qualquer", "1", None));
        assert!(corresponde_busca("  ", "Qualquer", "1", None));
    }

    #[test]
    fn digitos_somente() {
        assert_eq!(digitos("12.345.678-9"), "123456789");
        assert_eq!(digitos("MG-1.2"), "12");
    }

    #[test]
    fn aprovador_nao_ve_migrados() {
        let hoje = data(2024, 6, 1);
        let mut migrado = linha("m", S::Aprovada, C::Ok, hoje, hoje);
        migrado.aprovado_por = Some("Migração Suporte".into());
        let mut legado = linha("l", S::Aprovada, C::Ok, hoje, hoje);
        legado.justificativa = Some("Dados Migrados pelo Suporte".into());
        let normal = linha("n", S::Pendente, C::Pendente, hoje, hoje);

        assert!(!visivel_na_visao(Visao::Aprovador, &migrado));
        assert!(!visivel_na_visao(Visao::Aprovador, &legado));
        assert!(visivel_na_visao(Visao::Aprovador, &normal));
        assert!(visivel_na_visao(Visao::Administrador, &migrado));
    }

    #[test]
    fn gestor_so_ve_reprovadas_e_excecoes() {
        let hoje = data(2024, 6, 1);
        assert!(visivel_na_visao(Visao::Gestor, &linha("r", S::Reprovada, C::Pendente, hoje, hoje)));
        assert!(visivel_na_visao(Visao::Gestor, &linha("e", S::Excecao, C::Ok, hoje, hoje)));
        assert!(!visivel_na_visao(Visao::Gestor, &linha("a", S::Aprovada, C::Ok, hoje, hoje)));
    }

    #[test]
    fn filtro_vencida_usa_status_efetivo() {
        let hoje = data(2024, 6, 1);
        let mut expirada = linha("x", S::Aprovada, C::Ok, data(2024, 1, 1), data(2023, 12, 1));
        expirada.checagem_valida_ate = Some(data(2024, 5, 1));

        let vencida = FiltroVisao { status: Some(S::Vencida), ..Default::default() };
        let aprovada = FiltroVisao { status: Some(S::Aprovada), ..Default::default() };
        let cad_vencido = FiltroVisao { cadastro: Some(C::Vencida), ..Default::default() };
        let cad_ok = FiltroVisao { cadastro: Some(C::Ok), ..Default::default() };

        assert!(aplica_filtro(&vencida, &expirada, hoje));
        // Os demais valores comparam o status gravado
        assert!(aplica_filtro(&aprovada, &expirada, hoje));
        assert!(aplica_filtro(&cad_vencido, &expirada, hoje));
        assert!(aplica_filtro(&cad_ok, &expirada, hoje));
    }

    #[test]
    fn filtros_de_texto_e_data() {
        let hoje = data(2024, 6, 1);
        let l = linha("José Souza", S::Pendente, C::Pendente, data(2024, 6, 10), hoje);

        let por_depto = FiltroVisao { departamento: Some("manutencao".into()), ..Default::default() };
        let outro_depto = FiltroVisao { departamento: Some("TI".into()), ..Default::default() };
        let por_data = FiltroVisao { data_inicial: Some(data(2024, 6, 10)), ..Default::default() };
        let outra_data = FiltroVisao { data_inicial: Some(data(2024, 6, 11)), ..Default::default() };
        let por_busca = FiltroVisao { busca: Some("jose".into()), ..Default::default() };

        assert!(aplica_filtro(&por_depto, &l, hoje));
        assert!(!aplica_filtro(&outro_depto, &l, hoje));
        assert!(aplica_filtro(&por_data, &l, hoje));
        assert!(!aplica_filtro(&outra_data, &l, hoje));
        assert!(aplica_filtro(&por_busca, &l, hoje));
    }

    #[test]
    fn paginacao_padrao_de_dez() {
        let itens: Vec<u32> = (1..=23).collect();

        let (p1, total) = paginar(itens.clone(), Paginacao::default());
        assert_eq!(p1, (1..=10).collect::<Vec<_>>());
        assert_eq!(total, 3);

        let (p3, _) = paginar(itens.clone(), Paginacao { pagina: 3, por_pagina: 10 });
        assert_eq!(p3, vec![21, 22, 23]);

        let (p9, _) = paginar(itens, Paginacao { pagina: 9, por_pagina: 10 });
        assert!(p9.is_empty());
    }
}
