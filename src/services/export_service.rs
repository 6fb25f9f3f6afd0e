// src/services/export_service.rs

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook, Worksheet};
use sqlx::{Executor, Postgres};

use crate::{
    common::{
        datas::{formatar_data, formatar_data_opt},
        error::AppError,
    },
    db::PreferenciasRepository,
    models::{
        auth::Usuario,
        exportacao::{Coluna, FormatoExportacao, OpcoesExportacao},
        prestador::{LinhaPrestador, StatusCadastro, StatusChecagem},
        solicitacao::TipoSolicitacao,
        visao::{FiltroVisao, Visao},
    },
    services::{
        economia::VALOR_CHECAGEM,
        status::{status_cadastro_efetivo, status_checagem_efetivo},
        visao_service::VisaoService,
    },
};

pub struct ArquivoExportado {
    pub nome: String,
    pub content_type: &'static str,
    pub conteudo: Vec<u8>,
}

#[derive(Clone)]
pub struct ExportService {
    visao_service: VisaoService,
    preferencias_repo: PreferenciasRepository,
}

impl ExportService {
    pub fn new(visao_service: VisaoService, preferencias_repo: PreferenciasRepository) -> Self {
        Self { visao_service, preferencias_repo }
    }

    pub async fn exportar<'e, E>(
        &self,
        executor: E,
        visao: Visao,
        usuario: &Usuario,
        filtro: &FiltroVisao,
        opcoes: &OpcoesExportacao,
        agora: NaiveDateTime,
    ) -> Result<ArquivoExportado, AppError>
    where
        E: Executor<'e, Database = Postgres> + Copy,
    {
        let preferencia = match opcoes.colunas {
            Some(_) => None,
            None => self.preferencias_repo.get_colunas(executor, usuario.id, visao.slug()).await?,
        };
        let colunas = resolver_colunas(opcoes.colunas.as_deref(), preferencia.as_ref())?;

        let hoje = agora.date();
        let linhas = self.visao_service.linhas(executor, visao, usuario, filtro, hoje).await?;

        let conteudo = match opcoes.formato {
            FormatoExportacao::Xlsx => gerar_xlsx(&linhas, &colunas, filtro, agora)?,
            FormatoExportacao::Csv => gerar_csv(&linhas, &colunas, filtro, agora)?,
        };

        tracing::info!(
            "📤 Exportação {:?} da visão {} com {} linha(s) por {}",
            opcoes.formato, visao.slug(), linhas.len(), usuario.email
        );

        Ok(ArquivoExportado {
            nome: nome_arquivo(visao, opcoes.formato, agora),
            content_type: opcoes.formato.content_type(),
            conteudo,
        })
    }
}

pub fn nome_arquivo(visao: Visao, formato: FormatoExportacao, agora: NaiveDateTime) -> String {
    format!(
        "Solicitacoes_{}_{}.{}",
        visao.slug(),
        agora.format("%d-%m-%Y_%H-%M-%S"),
        formato.extensao()
    )
}

/// Colunas pedidas na query; senão a preferência salva; senão todas.
/// Sempre na ordem do catálogo.
pub fn resolver_colunas(
    chaves: Option<&str>,
    preferencia: Option<&BTreeMap<String, bool>>,
) -> Result<Vec<Coluna>, AppError> {
    if let Some(chaves) = chaves {
        let mut pedidas = Vec::new();
        for chave in chaves.split(',').map(str::trim).filter(|c| !c.is_empty()) {
            let coluna = Coluna::from_chave(chave).ok_or_else(|| AppError::ColunaDesconhecida(chave.to_string()))?;
            pedidas.push(coluna);
        }
        if !pedidas.is_empty() {
            return Ok(Coluna::TODAS.into_iter().filter(|c| pedidas.contains(c)).collect());
        }
    }

    if let Some(preferencia) = preferencia {
        let visiveis: Vec<Coluna> = Coluna::TODAS
            .into_iter()
            .filter(|c| preferencia.get(c.chave()).copied().unwrap_or(true))
            .collect();
        if !visiveis.is_empty() {
            return Ok(visiveis);
        }
    }

    Ok(Coluna::TODAS.to_vec())
}

pub fn valor_coluna(coluna: Coluna, linha: &LinhaPrestador, hoje: NaiveDate) -> String {
    // Reprovados não têm período de acesso
    let periodo = |data: NaiveDate| {
        if linha.status == StatusChecagem::Reprovada {
            "-".to_string()
        } else {
            formatar_data(data)
        }
    };

    match coluna {
        Coluna::Numero => linha.numero.clone(),
        Coluna::DataSolicitacao => formatar_data(linha.data_solicitacao),
        Coluna::Solicitante => linha.solicitante.clone(),
        Coluna::Departamento => linha.departamento.clone(),
        Coluna::Empresa => linha.empresa.clone().unwrap_or_else(|| linha.empresa_solicitacao.clone()),
        Coluna::Prestador => linha.nome.clone(),
        Coluna::Documento => linha.documento.clone(),
        Coluna::Documento2 => linha.documento2.clone().unwrap_or_default(),
        Coluna::DataInicial => periodo(linha.data_inicial),
        Coluna::DataFinal => periodo(linha.data_final),
        Coluna::Liberacao => status_cadastro_efetivo(linha.cadastro, linha.data_final, hoje).rotulo().to_string(),
        Coluna::Checagem => status_checagem_efetivo(linha.status, linha.checagem_valida_ate, hoje).rotulo().to_string(),
        Coluna::ValidaAte => formatar_data_opt(linha.checagem_valida_ate),
        Coluna::Justificativa => linha.justificativa.clone().unwrap_or_default(),
        Coluna::Observacoes => linha.observacoes.clone().unwrap_or_default(),
        Coluna::Local => linha.local.clone(),
    }
}

// --- Resumo ---

#[derive(Debug, Default)]
pub struct TotalDepartamento {
    pub prestadores: usize,
    pub custo: Decimal,
}

#[derive(Debug)]
pub struct Resumo {
    pub total: usize,
    pub por_checagem: Vec<(StatusChecagem, usize)>,
    pub por_cadastro: Vec<(StatusCadastro, usize)>,
    pub departamentos: BTreeMap<String, TotalDepartamento>,
}

const ORDEM_CHECAGEM: [StatusChecagem; 5] = [
    StatusChecagem::Pendente,
    StatusChecagem::Aprovada,
    StatusChecagem::Reprovada,
    StatusChecagem::Excecao,
    StatusChecagem::Vencida,
];

const ORDEM_CADASTRO: [StatusCadastro; 5] = [
    StatusCadastro::Pendente,
    StatusCadastro::Urgente,
    StatusCadastro::Ok,
    StatusCadastro::Negada,
    StatusCadastro::Vencida,
];

pub fn resumir(linhas: &[LinhaPrestador], hoje: NaiveDate) -> Resumo {
    let checagens: Vec<StatusChecagem> = linhas
        .iter()
        .map(|l| status_checagem_efetivo(l.status, l.checagem_valida_ate, hoje))
        .collect();
    let cadastros: Vec<StatusCadastro> = linhas
        .iter()
        .map(|l| status_cadastro_efetivo(l.cadastro, l.data_final, hoje))
        .collect();

    let mut departamentos: BTreeMap<String, TotalDepartamento> = BTreeMap::new();
    for linha in linhas {
        let total = departamentos.entry(linha.departamento.clone()).or_default();
        total.prestadores += 1;
        if linha.tipo_solicitacao == TipoSolicitacao::ChecagemLiberacao {
            total.custo += VALOR_CHECAGEM;
        }
    }

    Resumo {
        total: linhas.len(),
        por_checagem: ORDEM_CHECAGEM
            .into_iter()
            .map(|s| (s, checagens.iter().filter(|c| **c == s).count()))
            .collect(),
        por_cadastro: ORDEM_CADASTRO
            .into_iter()
            .map(|s| (s, cadastros.iter().filter(|c| **c == s).count()))
            .collect(),
        departamentos,
    }
}

fn filtros_aplicados(filtro: &FiltroVisao) -> Vec<(&'static str, String)> {
    let mut aplicados: Vec<(&'static str, String)> = Vec::new();
    let mut texto = |rotulo: &'static str, valor: &Option<String>| {
        if let Some(v) = valor.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            aplicados.push((rotulo, v.to_string()));
        }
    };
    texto("Departamento", &filtro.departamento);
    texto("Empresa", &filtro.empresa);
    texto("Solicitante", &filtro.solicitante);
    texto("Busca", &filtro.busca);

    if let Some(d) = filtro.data_inicial {
        aplicados.push(("Data Inicial", formatar_data(d)));
    }
    if let Some(s) = filtro.status {
        aplicados.push(("Checagem", s.rotulo().to_string()));
    }
    if let Some(c) = filtro.cadastro {
        aplicados.push(("Liberação", c.rotulo().to_string()));
    }
    aplicados
}

/// Linhas da seção de resumo, iguais no xlsx e no csv.
pub fn linhas_resumo(resumo: &Resumo, filtro: &FiltroVisao, gerado_em: NaiveDateTime) -> Vec<Vec<String>> {
    let mut linhas = vec![
        vec!["Resumo da Exportação".to_string()],
        vec!["Gerado em".to_string(), gerado_em.format("%d/%m/%Y %H:%M:%S").to_string()],
        vec!["Total de prestadores".to_string(), resumo.total.to_string()],
        vec![],
        vec!["Checagem".to_string(), "Quantidade".to_string()],
    ];
    for (status, qtd) in &resumo.por_checagem {
        linhas.push(vec![status.rotulo().to_string(), qtd.to_string()]);
    }

    linhas.push(vec![]);
    linhas.push(vec!["Liberação".to_string(), "Quantidade".to_string()]);
    for (status, qtd) in &resumo.por_cadastro {
        linhas.push(vec![status.rotulo().to_string(), qtd.to_string()]);
    }

    linhas.push(vec![]);
    linhas.push(vec!["Filtros aplicados".to_string()]);
    let filtros = filtros_aplicados(filtro);
    if filtros.is_empty() {
        linhas.push(vec!["Nenhum".to_string()]);
    }
    for (rotulo, valor) in filtros {
        linhas.push(vec![rotulo.to_string(), valor]);
    }

    linhas.push(vec![]);
    linhas.push(vec!["Departamento".to_string(), "Prestadores".to_string(), "Custo (R$)".to_string()]);
    for (departamento, total) in &resumo.departamentos {
        linhas.push(vec![departamento.clone(), total.prestadores.to_string(), total.custo.to_string()]);
    }

    linhas
}

// --- Geradores ---

pub fn gerar_xlsx(
    linhas: &[LinhaPrestador],
    colunas: &[Coluna],
    filtro: &FiltroVisao,
    agora: NaiveDateTime,
) -> Result<Vec<u8>, AppError> {
    let hoje = agora.date();
    let mut workbook = Workbook::new();

    let cabecalho = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xD9E1F2))
        .set_border(FormatBorder::Thin);

    let planilha = workbook.add_worksheet();
    planilha.set_name("Prestadores")?;
    for (c, coluna) in colunas.iter().enumerate() {
        let c = c as u16;
        planilha.write_string_with_format(0, c, coluna.titulo(), &cabecalho)?;
        planilha.set_column_width(c, coluna.largura())?;
    }
    for (l, linha) in linhas.iter().enumerate() {
        for (c, coluna) in colunas.iter().enumerate() {
            planilha.write_string(l as u32 + 1, c as u16, valor_coluna(*coluna, linha, hoje))?;
        }
    }
    planilha.set_freeze_panes(1, 0)?;

    let resumo = resumir(linhas, hoje);
    let aba_resumo = workbook.add_worksheet();
    aba_resumo.set_name("Resumo")?;
    aba_resumo.set_column_width(0, 30)?;
    aba_resumo.set_column_width(1, 22)?;
    aba_resumo.set_column_width(2, 15)?;
    escrever_resumo(aba_resumo, &linhas_resumo(&resumo, filtro, agora), &cabecalho)?;

    Ok(workbook.save_to_buffer()?)
}

fn escrever_resumo(aba: &mut Worksheet, linhas: &[Vec<String>], destaque: &Format) -> Result<(), AppError> {
    for (l, campos) in linhas.iter().enumerate() {
        for (c, campo) in campos.iter().enumerate() {
            // Títulos de seção: uma célula só, ou o cabeçalho logo após uma linha vazia
            let titulo = campos.len() == 1 || (l > 0 && linhas[l - 1].is_empty());
            if titulo {
                aba.write_string_with_format(l as u32, c as u16, campo, destaque)?;
            } else {
                aba.write_string(l as u32, c as u16, campo)?;
            }
        }
    }
    Ok(())
}

pub fn gerar_csv(
    linhas: &[LinhaPrestador],
    colunas: &[Coluna],
    filtro: &FiltroVisao,
    agora: NaiveDateTime,
) -> Result<Vec<u8>, AppError> {
    let hoje = agora.date();
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());

    writer.write_record(colunas.iter().map(|c| c.titulo()))?;
    for linha in linhas {
        writer.write_record(colunas.iter().map(|c| valor_coluna(*c, linha, hoje)))?;
    }

    writer.write_record(std::iter::empty::<&str>())?;
    for campos in linhas_resumo(&resumir(linhas, hoje), filtro, agora) {
        writer.write_record(&campos)?;
    }

    let corpo = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Falha ao finalizar CSV: {}", e))?;

    // BOM para o Excel reconhecer UTF-8
    let mut conteudo = "\u{feff}".as_bytes().to_vec();
    conteudo.extend(corpo);
    Ok(conteudo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fixtures::{data, linha};

    fn agora() -> NaiveDateTime {
        data(2024, 6, 1).and_hms_opt(14, 30, 5).unwrap()
    }

    fn amostra() -> Vec<LinhaPrestador> {
        let mut aprovado = linha("Ana", StatusChecagem::Aprovada, StatusCadastro::Ok, data(2024, 6, 10), data(2024, 5, 1));
        aprovado.checagem_valida_ate = Some(data(2024, 11, 1));

        let mut reprovado = linha("Bruno", StatusChecagem::Reprovada, StatusCadastro::Pendente, data(2024, 6, 10), data(2024, 5, 2));
        reprovado.departamento = "TI".into();
        reprovado.tipo_solicitacao = TipoSolicitacao::SomenteLiberacao;

        let mut vencido = linha("Carla", StatusChecagem::Aprovada, StatusCadastro::Ok, data(2024, 6, 10), data(2024, 5, 3));
        vencido.checagem_valida_ate = Some(data(2023, 1, 1));

        vec![aprovado, reprovado, vencido]
    }

    #[test]
    fn nome_do_arquivo_tem_visao_data_e_hora() {
        assert_eq!(
            nome_arquivo(Visao::Administrador, FormatoExportacao::Xlsx, agora()),
            "Solicitacoes_administrador_01-06-2024_14-30-05.xlsx"
        );
    }

    #[test]
    fn colunas_pedidas_seguem_ordem_do_catalogo() {
        let colunas = resolver_colunas(Some("checagem, prestador,numero"), None).unwrap();
        assert_eq!(colunas, vec![Coluna::Numero, Coluna::Prestador, Coluna::Checagem]);
    }

    #[test]
    fn coluna_desconhecida_e_rejeitada() {
        assert!(matches!(
            resolver_colunas(Some("numero,cpf"), None),
            Err(AppError::ColunaDesconhecida(c)) if c == "cpf"
        ));
    }

    #[test]
    fn preferencia_esconde_colunas_e_ausencia_mostra_todas() {
        let mut pref = BTreeMap::new();
        pref.insert("observacoes".to_string(), false);
        pref.insert("local".to_string(), false);

        let colunas = resolver_colunas(None, Some(&pref)).unwrap();
        assert_eq!(colunas.len(), 14);
        assert!(!colunas.contains(&Coluna::Local));

        assert_eq!(resolver_colunas(None, None).unwrap().len(), 16);
    }

    #[test]
    fn reprovado_mostra_traco_no_periodo() {
        let linhas = amostra();
        let hoje = agora().date();
        assert_eq!(valor_coluna(Coluna::DataInicial, &linhas[1], hoje), "-");
        assert_eq!(valor_coluna(Coluna::DataFinal, &linhas[1], hoje), "-");
        assert_eq!(valor_coluna(Coluna::DataInicial, &linhas[0], hoje), "10/06/2024");
        assert_eq!(valor_coluna(Coluna::Checagem, &linhas[2], hoje), "Vencida");
    }

    #[test]
    fn resumo_conta_status_efetivos_e_custo_por_departamento() {
        let resumo = resumir(&amostra(), agora().date());

        assert_eq!(resumo.total, 3);
        let contagem = |s| resumo.por_checagem.iter().find(|(x, _)| *x == s).map(|(_, n)| *n);
        assert_eq!(contagem(StatusChecagem::Aprovada), Some(1));
        assert_eq!(contagem(StatusChecagem::Vencida), Some(1));
        assert_eq!(contagem(StatusChecagem::Reprovada), Some(1));

        assert_eq!(resumo.departamentos["Manutenção"].prestadores, 2);
        assert_eq!(resumo.departamentos["Manutenção"].custo.to_string(), "40.00");
        assert_eq!(resumo.departamentos["TI"].custo, Decimal::ZERO);
    }

    #[test]
    fn csv_traz_dados_e_resumo() {
        let filtro = FiltroVisao { departamento: Some("Manutenção".into()), ..Default::default() };
        let bytes = gerar_csv(&amostra(), &[Coluna::Prestador, Coluna::Checagem], &filtro, agora()).unwrap();
        let texto = String::from_utf8(bytes).unwrap();

        assert!(texto.starts_with("\u{feff}Prestador,Checagem\r\n"));
        assert!(texto.contains("Ana,Aprovada\r\n"));
        assert!(texto.contains("Resumo da Exportação"));
        assert!(texto.contains("Departamento,Manutenção"));
        assert!(texto.contains("Gerado em,01/06/2024 14:30:05"));
    }

    #[test]
    fn xlsx_gera_um_zip() {
        let bytes = gerar_xlsx(&amostra(), &Coluna::TODAS, &FiltroVisao::default(), agora()).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }
}
