// src/services/prestador_service.rs

use chrono::NaiveDate;
use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::{datas::somar_meses, error::AppError},
    db::{PrestadorRepository, SolicitacaoRepository},
    models::prestador::{
        AvaliarChecagemPayload, ConsultaDocumento, LogAlteracao, Prestador, StatusCadastro, StatusChecagem,
        StatusHistorico,
    },
    services::{
        busca::digitos,
        status::{status_geral, status_historico},
    },
};

/// Meses de validade de uma checagem aprovada.
pub const VALIDADE_CHECAGEM_MESES: u32 = 6;

#[derive(Clone)]
pub struct PrestadorService {
    repo: PrestadorRepository,
    solicitacao_repo: SolicitacaoRepository,
}

impl PrestadorService {
    pub fn new(repo: PrestadorRepository, solicitacao_repo: SolicitacaoRepository) -> Self {
        Self { repo, solicitacao_repo }
    }

    /// Registra o parecer da checagem e recalcula o status geral da solicitação.
    pub async fn avaliar_checagem<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        payload: &AvaliarChecagemPayload,
        avaliador: &str,
        hoje: NaiveDate,
    ) -> Result<Prestador, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let (justificativa, valida_ate) = parecer(payload, hoje)?;

        let mut tx = executor.begin().await?;

        let prestador = self.repo
            .avaliar(&mut *tx, id, payload.status, justificativa.as_deref(), avaliador, valida_ate)
            .await?;

        if let Some(solicitacao_id) = prestador.solicitacao_id {
            let statuses = self.repo.list_status_by_solicitacao(&mut *tx, solicitacao_id).await?;
            self.solicitacao_repo
                .update_status_geral(&mut *tx, solicitacao_id, status_geral(&statuses))
                .await?;
        }

        tx.commit().await?;

        tracing::info!("✅ Checagem de {} marcada como {:?} por {}", prestador.nome, prestador.status, avaliador);
        Ok(prestador)
    }

    pub async fn confirmar_liberacao<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        observacoes: Option<&str>,
    ) -> Result<Prestador, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let observacoes = observacoes.map(str::trim).filter(|o| !o.is_empty());
        self.mudar_cadastro(executor, id, StatusCadastro::Ok, observacoes).await
    }

    pub async fn negar_liberacao<'e, E>(&self, executor: E, id: Uuid, observacoes: &str) -> Result<Prestador, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let observacoes = observacoes.trim();
        if observacoes.is_empty() {
            return Err(AppError::ObservacaoObrigatoria);
        }
        self.mudar_cadastro(executor, id, StatusCadastro::Negada, Some(observacoes)).await
    }

    async fn mudar_cadastro<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        cadastro: StatusCadastro,
        observacoes: Option<&str>,
    ) -> Result<Prestador, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let atual = self.repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or(AppError::PrestadorNaoEncontrado)?;
        if atual.status == StatusChecagem::Pendente {
            return Err(AppError::ChecagemPendente);
        }

        let prestador = self.repo.atualizar_cadastro(&mut *tx, id, cadastro, observacoes).await?;
        tx.commit().await?;

        tracing::info!("🚪 Liberação de {} atualizada para {:?}", prestador.nome, cadastro);
        Ok(prestador)
    }

    /// Situação do registro mais recente de um documento.
    pub async fn consultar_documento<'e, E>(
        &self,
        executor: E,
        documento: &str,
        hoje: NaiveDate,
    ) -> Result<ConsultaDocumento, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let documento = documento.trim().to_string();
        let chave = digitos(&documento);

        if chave.is_empty() {
            return Ok(ConsultaDocumento { documento, status: StatusHistorico::SemHistorico, registro: None });
        }

        let registro = self.repo.find_ultimo_por_digitos(executor, &chave).await?;
        let status = registro
            .as_ref()
            .map(|r| status_historico(r.status, r.checagem_valida_ate, hoje))
            .unwrap_or(StatusHistorico::SemHistorico);

        Ok(ConsultaDocumento { documento, status, registro })
    }

    pub async fn historico_alteracoes<'e, E>(&self, executor: E, id: Uuid) -> Result<Vec<LogAlteracao>, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut conn = executor.acquire().await?;
        if self.repo.find_by_id(&mut *conn, id).await?.is_none() {
            return Err(AppError::PrestadorNaoEncontrado);
        }
        self.repo.list_alteracoes(&mut *conn, id).await
    }
}

/// Valida o parecer e devolve (justificativa, nova validade).
fn parecer(
    payload: &AvaliarChecagemPayload,
    hoje: NaiveDate,
) -> Result<(Option<String>, Option<NaiveDate>), AppError> {
    let justificativa = payload
        .justificativa
        .as_deref()
        .map(str::trim)
        .filter(|j| !j.is_empty())
        .map(str::to_string);

    match payload.status {
        StatusChecagem::Aprovada => Ok((justificativa, Some(somar_meses(hoje, VALIDADE_CHECAGEM_MESES)))),
        StatusChecagem::Reprovada | StatusChecagem::Excecao => match justificativa {
            Some(j) => Ok((Some(j), None)),
            None => Err(AppError::JustificativaObrigatoria),
        },
        StatusChecagem::Pendente | StatusChecagem::Vencida => Err(AppError::StatusAvaliacaoInvalido),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fixtures::data;

    fn payload(status: StatusChecagem, justificativa: Option<&str>) -> AvaliarChecagemPayload {
        AvaliarChecagemPayload { status, justificativa: justificativa.map(str::to_string) }
    }

    #[test]
    fn aprovada_vale_seis_meses() {
        let (_, validade) = parecer(&payload(StatusChecagem::Aprovada, None), data(2024, 6, 10)).unwrap();
        assert_eq!(validade, Some(data(2024, 12, 10)));
    }

    #[test]
    fn validade_ajusta_fim_de_mes() {
        let (_, validade) = parecer(&payload(StatusChecagem::Aprovada, None), data(2024, 8, 31)).unwrap();
        assert_eq!(validade, Some(data(2025, 2, 28)));
    }

    #[test]
    fn reprovada_e_excecao_exigem_justificativa() {
        let hoje = data(2024, 6, 10);
        assert!(matches!(
            parecer(&payload(StatusChecagem::Reprovada, Some("   ")), hoje),
            Err(AppError::JustificativaObrigatoria)
        ));
        assert!(matches!(
            parecer(&payload(StatusChecagem::Excecao, None), hoje),
            Err(AppError::JustificativaObrigatoria)
        ));

        let (justificativa, validade) =
            parecer(&payload(StatusChecagem::Excecao, Some(" Autorizado pela diretoria ")), hoje).unwrap();
        assert_eq!(justificativa.as_deref(), Some("Autorizado pela diretoria"));
        assert_eq!(validade, None);
    }

    #[test]
    fn pendente_e_vencida_nao_sao_pareceres() {
        let hoje = data(2024, 6, 10);
        assert!(matches!(
            parecer(&payload(StatusChecagem::Pendente, None), hoje),
            Err(AppError::StatusAvaliacaoInvalido)
        ));
        assert!(matches!(
            parecer(&payload(StatusChecagem::Vencida, Some("x")), hoje),
            Err(AppError::StatusAvaliacaoInvalido)
        ));
    }
}
