// src/docs.rs

use axum::Json;
use utoipa::OpenApi;

use crate::{common::error::ErrorBody, handlers, models};

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Carga de planillas ---
        handlers::imports::upload_excel,

        // --- Trabajadores ---
        handlers::workers::buscar_trabajador,
    ),
    components(
        schemas(
            ErrorBody,
            models::imports::ImportResponse,
            models::imports::UploadExcelForm,
            models::workers::WorkerLookupResponse,
        )
    ),
    tags(
        (name = "Carga", description = "Importación masiva desde planillas"),
        (name = "Trabajadores", description = "Consulta de fichas por RUT")
    )
)]
pub struct ApiDoc;

// GET /api-docs/openapi.json
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
