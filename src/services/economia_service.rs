// src/services/economia_service.rs

use rust_decimal::Decimal;
use sqlx::{Acquire, Executor, PgConnection, Postgres};

use crate::{
    common::error::AppError,
    db::EconomiaRepository,
    models::economia::{
        AnaliseEconomia, EconomiaPorSolicitante, EconomiaRegistro, FiltroEconomias, MetricasEconomia,
        NovaEconomia, TipoEconomia, TotalPorTipo,
    },
};

/// Registros iguais dentro desta janela são considerados duplicados.
pub const JANELA_DUPLICIDADE_MIN: i32 = 5;

#[derive(Clone)]
pub struct EconomiaService {
    repo: EconomiaRepository,
}

impl EconomiaService {
    pub fn new(repo: EconomiaRepository) -> Self {
        Self { repo }
    }

    /// Grava a economia detectada. Devolve `None` para "nenhuma" e para duplicatas.
    pub async fn contabilizar<'e, E>(
        &self,
        executor: E,
        solicitante: &str,
        analise: &AnaliseEconomia,
        solicitacao_origem: Option<&str>,
    ) -> Result<Option<EconomiaRegistro>, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        if analise.tipo.is_none() {
            return Ok(None);
        }

        let mut tx = executor.begin().await?;
        let registro = self.contabilizar_em(&mut *tx, solicitante, analise, solicitacao_origem).await?;
        tx.commit().await?;

        Ok(registro)
    }

    /// Mesma regra de `contabilizar`, sobre uma transação já aberta pelo chamador.
    pub(crate) async fn contabilizar_em(
        &self,
        conn: &mut PgConnection,
        solicitante: &str,
        analise: &AnaliseEconomia,
        solicitacao_origem: Option<&str>,
    ) -> Result<Option<EconomiaRegistro>, AppError> {
        let Some(tipo) = analise.tipo else {
            return Ok(None);
        };

        let duplicada = self.repo
            .existe_recente(&mut *conn, solicitante, &analise.documento, tipo, JANELA_DUPLICIDADE_MIN)
            .await?;
        if duplicada {
            tracing::warn!(
                "⚠️ Economia duplicada ignorada: {} / {} / {:?}",
                solicitante, analise.documento, tipo
            );
            return Ok(None);
        }

        let nova = NovaEconomia {
            solicitante: solicitante.to_string(),
            prestador_nome: analise.nome.clone(),
            prestador_documento: analise.documento.clone(),
            tipo_economia: tipo,
            valor_economizado: analise.valor,
            detalhes: analise.motivo.clone(),
            solicitacao_origem: solicitacao_origem.map(str::to_string),
        };

        let registro = self.repo.create(&mut *conn, &nova).await?;

        tracing::info!("💰 Economia {:?} de R$ {} para {}", tipo, registro.valor_economizado, solicitante);
        Ok(Some(registro))
    }

    pub async fn historico<'e, E>(&self, executor: E, filtro: &FiltroEconomias) -> Result<Vec<EconomiaRegistro>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.list(executor, filtro).await
    }

    pub async fn metricas<'e, E>(&self, executor: E) -> Result<MetricasEconomia, AppError>
    where
        E: Executor<'e, Database = Postgres> + Copy,
    {
        let totais = self.repo.totais_por_tipo(executor).await?;
        let por_solicitante = self.repo.por_solicitante(executor).await?;
        Ok(montar_metricas(totais, por_solicitante))
    }
}

pub fn montar_metricas(
    totais: Vec<(TipoEconomia, i64, Decimal)>,
    mut por_solicitante: Vec<EconomiaPorSolicitante>,
) -> MetricasEconomia {
    let mut metricas = MetricasEconomia {
        total_economizado: Decimal::ZERO,
        total_registros: 0,
        maxima: TotalPorTipo::default(),
        operacional: TotalPorTipo::default(),
        evitado: TotalPorTipo::default(),
        por_solicitante: Vec::new(),
    };

    for (tipo, quantidade, valor) in totais {
        metricas.total_economizado += valor;
        metricas.total_registros += quantidade;
        let alvo = match tipo {
            TipoEconomia::Maxima => &mut metricas.maxima,
            TipoEconomia::Operacional => &mut metricas.operacional,
            TipoEconomia::Evitado => &mut metricas.evitado,
        };
        alvo.quantidade += quantidade;
        alvo.valor += valor;
    }

    // Maior economia primeiro
    por_solicitante.sort_by(|a, b| b.total.cmp(&a.total));
    metricas.por_solicitante = por_solicitante;
    metricas
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reais(v: i64) -> Decimal {
        Decimal::new(v * 100, 2)
    }

    #[test]
    fn metricas_somam_por_tipo_e_ordenam_solicitantes() {
        let totais = vec![
            (TipoEconomia::Maxima, 3, reais(60)),
            (TipoEconomia::Evitado, 1, reais(20)),
        ];
        let ranking = vec![
            EconomiaPorSolicitante { solicitante: "Ana".into(), quantidade: 1, total: reais(20) },
            EconomiaPorSolicitante { solicitante: "Bia".into(), quantidade: 3, total: reais(60) },
        ];

        let m = montar_metricas(totais, ranking);

        assert_eq!(m.total_economizado, reais(80));
        assert_eq!(m.total_registros, 4);
        assert_eq!(m.maxima.quantidade, 3);
        assert_eq!(m.operacional.quantidade, 0);
        assert_eq!(m.evitado.valor, reais(20));
        assert_eq!(m.por_solicitante[0].solicitante, "Bia");
    }

    #[test]
    fn metricas_vazias() {
        let m = montar_metricas(vec![], vec![]);
        assert_eq!(m.total_economizado, Decimal::ZERO);
        assert!(m.por_solicitante.is_empty());
    }
}
