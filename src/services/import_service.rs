// src/services/import_service.rs

use sqlx::{PgConnection, PgPool};

use crate::{
    common::error::AppError,
    db::{ActivityRepository, WorkerRepository},
    importer::ImportBatch,
};

#[derive(Clone)]
pub struct ImportService {
    pool: PgPool,
    worker_repo: WorkerRepository,
    activity_repo: ActivityRepository,
}

impl ImportService {
    pub fn new(pool: PgPool, worker_repo: WorkerRepository, activity_repo: ActivityRepository) -> Self {
        Self { pool, worker_repo, activity_repo }
    }

    /// Grava o lote inteiro numa única transação: ou entram todas as linhas, ou nenhuma.
    pub async fn import(&self, batch: &ImportBatch) -> Result<usize, AppError> {
        // --- INÍCIO DA TRANSAÇÃO ---
        let mut tx = self.pool.begin().await?;

        if let Err(e) = self.stage(&mut tx, batch).await {
            // Desfaz tudo o que foi preparado antes de devolver o erro
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!("Falha no rollback da importação: {}", rollback_err);
            }
            tracing::warn!(rows = batch.len(), "Importação desfeita: {}", e);
            return Err(e);
        }

        tx.commit().await?;
        // --- FIM DA TRANSAÇÃO ---

        tracing::info!(rows = batch.len(), "📥 Lote importado com sucesso");
        Ok(batch.len())
    }

    async fn stage(&self, conn: &mut PgConnection, batch: &ImportBatch) -> Result<(), AppError> {
        match batch {
            ImportBatch::Workers(workers) => {
                for worker in workers {
                    self.worker_repo.create_worker(&mut *conn, worker).await?;
                }
            }
            ImportBatch::Activities(activities) => {
                for activity in activities {
                    self.activity_repo.create_activity(&mut *conn, activity).await?;
                }
            }
        }
        Ok(())
    }
}
