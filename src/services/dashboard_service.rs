// src/services/dashboard_service.rs

use sqlx::{Acquire, Executor, Postgres};

use crate::{
    common::error::AppError,
    db::DashboardRepository,
    models::dashboard::PainelDashboard,
};

#[derive(Clone)]
pub struct DashboardService {
    repo: DashboardRepository,
}

impl DashboardService {
    pub fn new(repo: DashboardRepository) -> Self {
        Self { repo }
    }

    pub async fn get_painel<'e, E>(&self, executor: E) -> Result<PainelDashboard, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut conn = executor.acquire().await?;

        let resumo = self.repo.get_resumo(&mut *conn).await?;
        let departamentos = self.repo.por_departamento(&mut *conn).await?;

        Ok(PainelDashboard { resumo, departamentos })
    }
}
