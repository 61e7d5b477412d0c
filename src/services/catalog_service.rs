// src/services/catalog_service.rs

use crate::{
    common::error::AppError,
    db::{ActivityRepository, WorkerRepository},
    models::{activities::Activity, workers::{Worker, WorkerLookupResponse}},
};

/// Leituras da página inicial e do autocompletar por RUT.
#[derive(Clone)]
pub struct CatalogService {
    worker_repo: WorkerRepository,
    activity_repo: ActivityRepository,
}

impl CatalogService {
    pub fn new(worker_repo: WorkerRepository, activity_repo: ActivityRepository) -> Self {
        Self { worker_repo, activity_repo }
    }

    pub async fn list_workers(&self) -> Result<Vec<Worker>, AppError> {
        self.worker_repo.list_workers().await
    }

    pub async fn list_activities(&self) -> Result<Vec<Activity>, AppError> {
        self.activity_repo.list_activities().await
    }

    pub async fn lookup_worker(&self, rut: &str) -> Result<WorkerLookupResponse, AppError> {
        self.worker_repo
            .find_lookup(rut)
            .await?
            .map(WorkerLookupResponse::from)
            .ok_or(AppError::NotFound)
    }
}
