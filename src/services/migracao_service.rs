// src/services/migracao_service.rs
//
// Importação de registros históricos feita pelo suporte. Cada item vira uma
// solicitação aprovada com um único prestador aprovado.

use chrono::{Datelike, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    common::{
        datas::{parse_data, somar_meses},
        error::AppError,
    },
    db::{PrestadorRepository, SolicitacaoRepository},
    models::{
        migracao::{ItemMigracao, ResultadoMigracao},
        prestador::{NovoPrestador, StatusCadastro, StatusChecagem},
        solicitacao::{Finalidade, NovaSolicitacao, TipoSolicitacao},
    },
    services::{
        busca::{digitos, normalizar_texto, MARCA_MIGRACAO},
        prestador_service::VALIDADE_CHECAGEM_MESES,
        status::status_geral,
    },
};

pub const JUSTIFICATIVA_MIGRACAO: &str = "Dados migrados pelo suporte";
pub const LOCAL_MIGRACAO: &str = "Migração Histórica";

const CABECALHO_MODELO: [&str; 12] = [
    "Departamento",
    "Data Solicitação",
    "Nome",
    "Documento",
    "Documento2",
    "Empresa",
    "Data Inicial",
    "Data Final",
    "Solicitante",
    "Status",
    "Cadastro",
    "Válida Até",
];

/// Item validado, com os valores padrão já aplicados.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistroMigrado {
    pub solicitante: String,
    pub departamento: String,
    pub empresa: String,
    pub data_solicitacao: NaiveDate,
    pub data_inicial: NaiveDate,
    pub data_final: NaiveDate,
    pub nome: String,
    pub documento: String,
    pub documento2: Option<String>,
    pub status: StatusChecagem,
    pub cadastro: StatusCadastro,
    pub valida_ate: Option<NaiveDate>,
}

#[derive(Clone)]
pub struct MigracaoService {
    solicitacao_repo: SolicitacaoRepository,
    prestador_repo: PrestadorRepository,
}

impl MigracaoService {
    pub fn new(solicitacao_repo: SolicitacaoRepository, prestador_repo: PrestadorRepository) -> Self {
        Self { solicitacao_repo, prestador_repo }
    }

    /// Processa item a item; uma falha não interrompe o lote.
    pub async fn migrar(&self, pool: &PgPool, itens: &[ItemMigracao], hoje: NaiveDate) -> ResultadoMigracao {
        tracing::info!("🔄 Migração de {} registro(s) iniciada", itens.len());

        let mut detalhes_erros = Vec::new();
        let mut total_sucesso = 0;

        for (i, item) in itens.iter().enumerate() {
            let resultado = match preparar(item, hoje) {
                Ok(registro) => self.gravar(pool, &registro).await.map_err(|e| e.to_string()),
                Err(motivo) => Err(motivo),
            };

            match resultado {
                Ok(numero) => {
                    total_sucesso += 1;
                    tracing::debug!("Item {} migrado como {}", i + 1, numero);
                }
                Err(motivo) => {
                    tracing::warn!("⚠️ Migração, linha {}: {}", i + 1, motivo);
                    detalhes_erros.push(format!("Linha {}: {}", i + 1, motivo));
                }
            }
        }

        tracing::info!(
            "✅ Migração concluída: {} sucesso(s), {} erro(s)",
            total_sucesso, detalhes_erros.len()
        );

        ResultadoMigracao {
            total_processados: itens.len(),
            total_sucesso,
            total_erros: detalhes_erros.len(),
            detalhes_erros,
        }
    }

    async fn gravar(&self, pool: &PgPool, registro: &RegistroMigrado) -> Result<String, AppError> {
        let mut tx = pool.begin().await?;

        for documento in std::iter::once(&registro.documento).chain(registro.documento2.as_ref()) {
            if documento.is_empty() {
                continue;
            }
            if self.prestador_repo.documento_existe(&mut *tx, documento, &digitos(documento)).await? {
                return Err(AppError::DocumentoJaCadastrado(documento.clone()));
            }
        }

        let numero = self.solicitacao_repo
            .proximo_numero(&mut *tx, registro.data_solicitacao.year())
            .await?;

        let nova = NovaSolicitacao {
            numero,
            solicitante: registro.solicitante.clone(),
            departamento: registro.departamento.clone(),
            usuario_id: None,
            data_solicitacao: registro.data_solicitacao,
            hora_solicitacao: NaiveTime::MIN,
            tipo_solicitacao: TipoSolicitacao::ChecagemLiberacao,
            finalidade: Finalidade::Obra,
            local: LOCAL_MIGRACAO.to_string(),
            empresa: registro.empresa.clone(),
            data_inicial: registro.data_inicial,
            data_final: registro.data_final,
            status_geral: status_geral(&[registro.status]),
            observacoes_gerais: None,
            custo_checagem: Decimal::ZERO,
            economia_gerada: Decimal::ZERO,
        };
        let solicitacao = self.solicitacao_repo.create(&mut *tx, &nova).await?;

        let prestador = NovoPrestador {
            solicitacao_id: solicitacao.id,
            nome: registro.nome.clone(),
            documento: registro.documento.clone(),
            documento2: registro.documento2.clone(),
            empresa: Some(registro.empresa.clone()),
            status: registro.status,
            checagem_valida_ate: registro.valida_ate,
            cadastro: registro.cadastro,
            justificativa: Some(JUSTIFICATIVA_MIGRACAO.to_string()),
            aprovado_por: Some(MARCA_MIGRACAO.to_string()),
            data_avaliacao: (registro.status != StatusChecagem::Pendente).then(Utc::now),
        };
        self.prestador_repo.create(&mut *tx, &prestador).await?;

        tx.commit().await?;
        Ok(solicitacao.numero)
    }
}

fn texto(valor: &Option<String>) -> Option<String> {
    valor.as_deref().map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

fn data(campo: &str, valor: &Option<String>) -> Result<Option<NaiveDate>, String> {
    match texto(valor) {
        None => Ok(None),
        Some(v) => parse_data(&v)
            .map(Some)
            .ok_or_else(|| format!("{} inválida: {}", campo, v)),
    }
}

/// Status de checagem escrito à mão nas planilhas antigas.
pub fn normalizar_status_legado(valor: &str) -> StatusChecagem {
    match normalizar_texto(valor).as_str() {
        "aprovado" | "aprovada" | "ok" | "valido" | "valida" => StatusChecagem::Aprovada,
        "reprovado" | "reprovada" | "negado" | "negada" => StatusChecagem::Reprovada,
        "excecao" => StatusChecagem::Excecao,
        _ => StatusChecagem::Pendente,
    }
}

pub fn normalizar_cadastro_legado(valor: &str) -> StatusCadastro {
    match normalizar_texto(valor).as_str() {
        "ok" | "liberado" | "liberada" => StatusCadastro::Ok,
        "vencida" | "vencido" | "expirado" | "expirada" => StatusCadastro::Vencida,
        "urgente" => StatusCadastro::Urgente,
        "negada" | "negado" | "nao ok" => StatusCadastro::Negada,
        _ => StatusCadastro::Pendente,
    }
}

/// Valida o item e aplica os padrões da migração.
pub fn preparar(item: &ItemMigracao, hoje: NaiveDate) -> Result<RegistroMigrado, String> {
    let nome = texto(&item.nome);
    let documento = texto(&item.documento);
    let documento2 = texto(&item.documento2);

    if nome.is_none() && documento.is_none() {
        return Err("Nome ou documento são obrigatórios".to_string());
    }

    let data_solicitacao = data("Data Solicitação", &item.data_solicitacao)?.unwrap_or(hoje);
    let data_inicial = data("Data Inicial", &item.data_inicial)?.unwrap_or(data_solicitacao);
    let data_final_informada = data("Data Final", &item.data_final)?;
    let data_final = data_final_informada.unwrap_or(data_inicial);

    if data_final < data_inicial {
        return Err(AppError::PeriodoInvalido.to_string());
    }

    // Sem coluna de status, o registro histórico entra como aprovado
    let status = texto(&item.status)
        .map(|v| normalizar_status_legado(&v))
        .unwrap_or(StatusChecagem::Aprovada);
    let cadastro = match texto(&item.cadastro) {
        Some(v) => normalizar_cadastro_legado(&v),
        None if data_final_informada.is_some() => StatusCadastro::Ok,
        None => StatusCadastro::Pendente,
    };
    let valida_ate = match data("Válida Até", &item.valida_ate)? {
        Some(informada) => Some(informada),
        None if status == StatusChecagem::Aprovada => {
            Some(somar_meses(data_solicitacao, VALIDADE_CHECAGEM_MESES))
        }
        None => None,
    };

    // Sem documento principal, o secundário assume o lugar
    let (documento, documento2) = match documento {
        Some(d) => (d, documento2),
        None => (documento2.unwrap_or_default(), None),
    };

    Ok(RegistroMigrado {
        solicitante: texto(&item.solicitante).unwrap_or_else(|| "Suporte Sistema".to_string()),
        departamento: texto(&item.departamento).unwrap_or_else(|| "Migração".to_string()),
        empresa: texto(&item.empresa).unwrap_or_else(|| "Não informado".to_string()),
        data_solicitacao,
        data_inicial,
        data_final,
        nome: nome.unwrap_or_else(|| "Não informado".to_string()),
        documento,
        documento2,
        status,
        cadastro,
        valida_ate,
    })
}

fn item_vazio(item: &ItemMigracao) -> bool {
    [
        &item.departamento,
        &item.data_solicitacao,
        &item.nome,
        &item.documento,
        &item.documento2,
        &item.empresa,
        &item.data_inicial,
        &item.data_final,
        &item.solicitante,
        &item.status,
        &item.cadastro,
        &item.valida_ate,
    ]
    .into_iter()
    .all(|campo| texto(campo).is_none())
}

/// Lê o CSV do modelo. Linhas totalmente vazias são ignoradas.
pub fn ler_csv(conteudo: &[u8]) -> Result<Vec<ItemMigracao>, AppError> {
    let mut leitor = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(conteudo);

    let mut itens = Vec::new();
    for (i, registro) in leitor.deserialize::<ItemMigracao>().enumerate() {
        // +2: cabeçalho e base 1
        let item = registro.map_err(|e| AppError::ArquivoInvalido(format!("linha {}: {}", i + 2, e)))?;
        if !item_vazio(&item) {
            itens.push(item);
        }
    }
    Ok(itens)
}

pub fn modelo_csv() -> Result<Vec<u8>, AppError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());

    writer.write_record(CABECALHO_MODELO)?;
    writer.write_record([
        "TI",
        "15/01/2025",
        "João Silva",
        "12.345.678-9",
        "123.456.789-00",
        "Empresa ABC Ltda",
        "01/01/2025",
        "31/12/2025",
        "Suporte Sistema",
        "Aprovado",
        "Liberado",
        "15/07/2025",
    ])?;

    let corpo = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Falha ao finalizar modelo CSV: {}", e))?;
    Ok(corpo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fixtures::data as d;

    fn item(nome: Option<&str>, documento: Option<&str>) -> ItemMigracao {
        ItemMigracao {
            nome: nome.map(str::to_string),
            documento: documento.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn sem_nome_e_sem_documento_e_rejeitado() {
        let erro = preparar(&item(Some("  "), None), d(2024, 6, 1)).unwrap_err();
        assert_eq!(erro, "Nome ou documento são obrigatórios");
    }

    #[test]
    fn padroes_da_migracao() {
        let r = preparar(&item(Some("João"), Some("12.345.678-9")), d(2024, 6, 1)).unwrap();

        assert_eq!(r.solicitante, "Suporte Sistema");
        assert_eq!(r.departamento, "Migração");
        assert_eq!(r.empresa, "Não informado");
        assert_eq!(r.data_solicitacao, d(2024, 6, 1));
        assert_eq!(r.data_inicial, d(2024, 6, 1));
        assert_eq!(r.data_final, d(2024, 6, 1));
        assert_eq!(r.status, StatusChecagem::Aprovada);
        assert_eq!(r.cadastro, StatusCadastro::Pendente);
        assert_eq!(r.valida_ate, Some(d(2024, 12, 1)));
    }

    #[test]
    fn datas_brasileiras_e_cadastro_ok_com_data_final() {
        let mut i = item(Some("Ana"), None);
        i.documento2 = Some("MG-123".into());
        i.data_solicitacao = Some("15/01/2025".into());
        i.data_inicial = Some("2025-01-20".into());
        i.data_final = Some("31/12/2025".into());

        let r = preparar(&i, d(2025, 6, 1)).unwrap();

        assert_eq!(r.documento, "MG-123");
        assert_eq!(r.documento2, None);
        assert_eq!(r.data_inicial, d(2025, 1, 20));
        assert_eq!(r.cadastro, StatusCadastro::Ok);
        assert_eq!(r.valida_ate, Some(d(2025, 7, 15)));
    }

    #[test]
    fn data_invalida_vira_erro_da_linha() {
        let mut i = item(Some("Ana"), Some("1"));
        i.data_final = Some("31/02/2025".into());
        assert_eq!(preparar(&i, d(2025, 6, 1)).unwrap_err(), "Data Final inválida: 31/02/2025");
    }

    #[test]
    fn csv_com_cabecalho_do_modelo() {
        let conteudo = "\u{feff}Departamento,Data Solicitação,Nome,Documento,Documento2,Empresa,Data Inicial,Data Final\n\
                        TI,15/01/2025,João Silva,12.345.678-9,,Empresa ABC,01/01/2025,31/12/2025\n\
                        ,,,,,,,\n";

        let itens = ler_csv(conteudo.as_bytes()).unwrap();

        assert_eq!(itens.len(), 1);
        assert_eq!(itens[0].nome.as_deref(), Some("João Silva"));
        assert_eq!(itens[0].data_solicitacao.as_deref(), Some("15/01/2025"));
        assert_eq!(itens[0].documento2, None);
    }

    #[test]
    fn modelo_tem_cabecalho_e_exemplo() {
        let modelo = String::from_utf8(modelo_csv().unwrap()).unwrap();
        let mut linhas = modelo.lines();
        assert_eq!(linhas.next(), Some(CABECALHO_MODELO.join(",").as_str()));
        assert!(linhas.next().is_some_and(|l| l.starts_with("TI,15/01/2025,João Silva")));
    }

    #[test]
    fn status_legado_de_checagem() {
        for v in ["Aprovado", "OK", "válido", " APROVADA "] {
            assert_eq!(normalizar_status_legado(v), StatusChecagem::Aprovada, "{v}");
        }
        for v in ["Reprovado", "NEGADO"] {
            assert_eq!(normalizar_status_legado(v), StatusChecagem::Reprovada, "{v}");
        }
        for v in ["Exceção", "excecao"] {
            assert_eq!(normalizar_status_legado(v), StatusChecagem::Excecao, "{v}");
        }
        for v in ["", "em análise", "?"] {
            assert_eq!(normalizar_status_legado(v), StatusChecagem::Pendente, "{v}");
        }
    }

    #[test]
    fn cadastro_legado() {
        assert_eq!(normalizar_cadastro_legado("OK"), StatusCadastro::Ok);
        assert_eq!(normalizar_cadastro_legado("Liberado"), StatusCadastro::Ok);
        assert_eq!(normalizar_cadastro_legado("Vencida"), StatusCadastro::Vencida);
        assert_eq!(normalizar_cadastro_legado("EXPIRADO"), StatusCadastro::Vencida);
        assert_eq!(normalizar_cadastro_legado("urgente"), StatusCadastro::Urgente);
        assert_eq!(normalizar_cadastro_legado("Negada"), StatusCadastro::Negada);
        assert_eq!(normalizar_cadastro_legado("Não OK"), StatusCadastro::Negada);
        assert_eq!(normalizar_cadastro_legado("aguardando"), StatusCadastro::Pendente);
    }

    #[test]
    fn colunas_legadas_sobrescrevem_os_padroes() {
        let mut i = item(Some("Ana"), Some("1"));
        i.status = Some("Negado".into());
        i.cadastro = Some("Expirado".into());
        i.data_final = Some("31/12/2025".into());

        let r = preparar(&i, d(2025, 6, 1)).unwrap();

        assert_eq!(r.status, StatusChecagem::Reprovada);
        assert_eq!(r.cadastro, StatusCadastro::Vencida);
        assert_eq!(r.valida_ate, None);

        i.status = Some("Aprovado".into());
        i.valida_ate = Some("2026-01-31".into());
        assert_eq!(preparar(&i, d(2025, 6, 1)).unwrap().valida_ate, Some(d(2026, 1, 31)));

        i.valida_ate = Some("amanhã".into());
        assert_eq!(preparar(&i, d(2025, 6, 1)).unwrap_err(), "Válida Até inválida: amanhã");
    }

    #[test]
    fn csv_aceita_colunas_legadas() {
        let conteudo = "Nome,Documento,Status,Liberação,Validade\n\
                        Ana,123,Aprovado,Liberado,15/07/2025\n";

        let itens = ler_csv(conteudo.as_bytes()).unwrap();
        let r = preparar(&itens[0], d(2025, 6, 1)).unwrap();

        assert_eq!(r.status, StatusChecagem::Aprovada);
        assert_eq!(r.cadastro, StatusCadastro::Ok);
        assert_eq!(r.valida_ate, Some(d(2025, 7, 15)));
    }
}
