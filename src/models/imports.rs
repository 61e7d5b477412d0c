// src/models/imports.rs

use serde::Serialize;
use utoipa::ToSchema;

pub const IMPORT_SUCCESS_MESSAGE: &str = "Archivo cargado correctamente!";

#[derive(Debug, Serialize, ToSchema)]
pub struct ImportResponse {
    #[schema(example = "Archivo cargado correctamente!")]
    pub message: String,
}

// Só existe para documentar o corpo multipart no OpenAPI
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadExcelForm {
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
    #[schema(example = "trabajadores")]
    tipo: String,
}
