// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use utoipa::ToSchema;

use crate::importer::ImportError;

// Corpo padrão de erro das rotas JSON: {"error": "..."}
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = "No encontrado")]
    pub error: String,
}

// Nosso tipo de erro. As mensagens são as que o usuário final vê (em espanhol).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error de validación")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Usuario o contraseña incorrectos")]
    InvalidCredentials,

    #[error("No autenticado")]
    Unauthenticated,

    #[error("No hay archivo")]
    MissingFile,

    #[error("Archivo vacío")]
    EmptyFile,

    #[error("Tipo de carga no soportado: {0}")]
    UnsupportedImportKind(String),

    #[error("Falta el parámetro '{0}'")]
    MissingParameter(&'static str),

    #[error("{0}")]
    InvalidField(String),

    #[error("No encontrado")]
    NotFound,

    #[error("El RUT {0} ya existe")]
    DuplicateRut(String),

    #[error("El usuario {0} ya existe")]
    UsernameTaken(String),

    // Falhas de leitura/mapeamento da planilha
    #[error(transparent)]
    Import(#[from] ImportError),

    #[error("Error de base de datos: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Error al generar la página: {0}")]
    TemplateError(#[from] handlebars::RenderError),

    #[error("Error interno del servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Error de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Error de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::MissingFile
            | AppError::EmptyFile
            | AppError::UnsupportedImportKind(_)
            | AppError::MissingParameter(_)
            | AppError::InvalidField(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::UsernameTaken(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Mensagem legível para avisos inline. Erros de validação viram a lista
    /// das mensagens de cada campo.
    pub fn user_message(&self) -> String {
        match self {
            AppError::ValidationError(errors) => {
                let mut messages: Vec<String> = errors
                    .field_errors()
                    .values()
                    .flat_map(|field_errors| field_errors.iter())
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .collect();
                messages.sort();
                messages.join("; ")
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if let AppError::ValidationError(errors) = &self {
            let mut details = std::collections::HashMap::new();
            for (field, field_errors) in errors.field_errors() {
                let messages: Vec<String> = field_errors
                    .iter()
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .collect();
                details.insert(field.to_string(), messages);
            }
            let body = Json(json!({
                "error": "Uno o más campos son inválidos.",
                "details": details,
            }));
            return (status, body).into_response();
        }

        // Os 500 sempre vão para o log; a mensagem segue para o cliente
        // porque a carga de planilha precisa mostrar a causa da falha.
        if status.is_server_error() {
            tracing::error!("Erro Interno do Servidor: {}", self);
        }

        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::{ValidationError, ValidationErrors};

    #[test]
    fn client_errors_map_to_4xx() {
        assert_eq!(AppError::MissingFile.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::MissingParameter("rut").status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Unauthenticated.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn persistence_errors_map_to_500() {
        assert_eq!(
            AppError::DuplicateRut("1-9".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Import(ImportError::MissingHeader).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn user_message_flattens_validation_errors() {
        let mut errors = ValidationErrors::new();
        let mut err = ValidationError::new("length");
        err.message = Some("El RUT es obligatorio".into());
        errors.add("rut", err);

        let message = AppError::ValidationError(errors).user_message();
        assert_eq!(message, "El RUT es obligatorio");
    }
}
