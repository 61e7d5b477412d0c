// src/handlers/imports.rs

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    Json,
};

use crate::{
    common::error::{AppError, ErrorBody},
    config::AppState,
    importer::{self, ImportKind},
    middleware::auth::AuthenticatedUser,
    models::imports::{ImportResponse, UploadExcelForm, IMPORT_SUCCESS_MESSAGE},
};

/// Limite do corpo do upload (o padrão do axum é 2 MB).
pub const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

// Partes relevantes do multipart
#[derive(Debug, Default)]
struct UploadParts {
    filename: Option<String>,
    bytes: Option<Vec<u8>>,
    kind: Option<String>,
}

async fn read_parts(mut multipart: Multipart) -> Result<UploadParts, AppError> {
    let mut parts = UploadParts::default();

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("file") => {
                parts.filename = Some(field.file_name().unwrap_or_default().to_string());
                parts.bytes = Some(field.bytes().await.map_err(malformed)?.to_vec());
            }
            Some("tipo") => {
                parts.kind = Some(field.text().await.map_err(malformed)?);
            }
            _ => {}
        }
    }

    Ok(parts)
}

fn malformed(e: MultipartError) -> AppError {
    AppError::InvalidField(format!("Formulario inválido: {}", e.body_text()))
}

// POST /upload_excel
#[utoipa::path(
    post,
    path = "/upload_excel",
    tag = "Carga",
    request_body(content = UploadExcelForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Lote grabado completo", body = ImportResponse),
        (status = 400, description = "Archivo ausente, vacío o tipo no soportado", body = ErrorBody),
        (status = 500, description = "Error de lectura o de base de datos; nada fue grabado", body = ErrorBody)
    )
)]
pub async fn upload_excel(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    multipart: Multipart,
) -> Result<Json<ImportResponse>, AppError> {
    let parts = read_parts(multipart).await?;

    let (Some(filename), Some(bytes)) = (parts.filename, parts.bytes) else {
        return Err(AppError::MissingFile);
    };
    if filename.trim().is_empty() || bytes.is_empty() {
        return Err(AppError::EmptyFile);
    }

    let raw_kind = parts.kind.unwrap_or_default();
    let kind = ImportKind::parse(&raw_kind).ok_or(AppError::UnsupportedImportKind(raw_kind))?;

    tracing::info!(
        username = %user.username,
        filename = %filename,
        size = bytes.len(),
        ?kind,
        "Carga de planilha recebida"
    );

    let batch = importer::parse_upload(kind, &filename, &bytes)?;
    app_state.import_service.import(&batch).await?;

    Ok(Json(ImportResponse {
        message: IMPORT_SUCCESS_MESSAGE.to_string(),
    }))
}
