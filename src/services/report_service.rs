// src/services/report_service.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::ReportRepository,
    models::reports::{MonthlyHourReport, NewReport},
};

#[derive(Clone)]
pub struct ReportService {
    pool: PgPool,
    repo: ReportRepository,
}

impl ReportService {
    pub fn new(pool: PgPool, repo: ReportRepository) -> Self {
        Self { pool, repo }
    }

    pub async fn list_reports(&self) -> Result<Vec<MonthlyHourReport>, AppError> {
        self.repo.list_reports().await
    }

    // Uma linha, uma transação
    pub async fn create_report(&self, report: &NewReport) -> Result<MonthlyHourReport, AppError> {
        let mut tx = self.pool.begin().await?;

        let created = match self.repo.create_report(&mut *tx, report).await {
            Ok(created) => created,
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::error!("Falha no rollback do informe: {}", rollback_err);
                }
                return Err(e);
            }
        };

        tx.commit().await?;

        tracing::info!(id = created.id, rut = %created.rut, "📝 Informe criado");
        Ok(created)
    }
}
