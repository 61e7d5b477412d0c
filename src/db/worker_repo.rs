// src/db/worker_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use crate::{
    common::error::AppError,
    models::workers::{NewWorker, Worker, WorkerLookup},
};

#[derive(Clone)]
pub struct WorkerRepository {
    pool: PgPool,
}

impl WorkerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_workers(&self) -> Result<Vec<Worker>, AppError> {
        let workers = sqlx::query_as::<_, Worker>(
            "SELECT id, rut, nombre, cargo FROM trabajadores ORDER BY id ASC",
        )
            .fetch_all(&self.pool)
            .await?;
        Ok(workers)
    }

    /// Insere um trabalhador. Roda dentro da transação do lote de importação.
    pub async fn create_worker<'e, E>(
        &self,
        executor: E,
        worker: &NewWorker,
    ) -> Result<Worker, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Worker>(
            r#"
            INSERT INTO trabajadores (rut, nombre, cargo)
            VALUES ($1, $2, $3)
            RETURNING id, rut, nombre, cargo
            "#,
        )
            .bind(&worker.rut)
            .bind(&worker.name)
            .bind(&worker.position)
            .fetch_one(executor)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation() {
                        return AppError::DuplicateRut(worker.rut.clone());
                    }
                }
                e.into()
            })
    }

    // Ficha somente leitura usada pelo autocompletar
    pub async fn find_lookup(&self, rut: &str) -> Result<Option<WorkerLookup>, AppError> {
        let lookup = sqlx::query_as::<_, WorkerLookup>(
            "SELECT rut, rol, nombre, cargo FROM trabajadores_lookup WHERE rut = $1",
        )
            .bind(rut)
            .fetch_optional(&self.pool)
            .await?;
        Ok(lookup)
    }
}
