// src/handlers/workers.rs

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    common::error::{AppError, ErrorBody},
    config::AppState,
    models::workers::{RutQuery, WorkerLookupResponse},
};

// GET /buscar_trabajador?rut=...
#[utoipa::path(
    get,
    path = "/buscar_trabajador",
    tag = "Trabajadores",
    params(
        ("rut" = String, Query, description = "RUT exacto del trabajador")
    ),
    responses(
        (status = 200, description = "Ficha encontrada", body = WorkerLookupResponse),
        (status = 400, description = "Falta el parámetro rut", body = ErrorBody),
        (status = 401, description = "Sin sesión", body = ErrorBody),
        (status = 404, description = "RUT no encontrado", body = ErrorBody)
    )
)]
pub async fn buscar_trabajador(
    State(app_state): State<AppState>,
    Query(query): Query<RutQuery>,
) -> Result<Json<WorkerLookupResponse>, AppError> {
    // Busca pela chave exata; só espaços conta como parâmetro ausente
    let rut = query
        .rut
        .filter(|rut| !rut.trim().is_empty())
        .ok_or(AppError::MissingParameter("rut"))?;

    let worker = app_state.catalog_service.lookup_worker(&rut).await?;
    Ok(Json(worker))
}
