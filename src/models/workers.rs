// src/models/workers.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// Tabela 'trabajadores'. O RUT é a chave natural (único).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Worker {
    pub id: i32,
    pub rut: String,
    #[sqlx(rename = "nombre")]
    pub name: String,
    #[sqlx(rename = "cargo")]
    pub position: String,
}

// Linha pronta para inserir (vinda da planilha ou criada manualmente)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWorker {
    pub rut: String,
    pub name: String,
    pub position: String,
}

// Tabela somente leitura 'trabajadores_lookup', usada pelo autocompletar
#[derive(Debug, Clone, FromRow)]
pub struct WorkerLookup {
    pub rut: String,
    #[sqlx(rename = "rol")]
    pub role: Option<String>,
    #[sqlx(rename = "nombre")]
    pub name: Option<String>,
    #[sqlx(rename = "cargo")]
    pub position: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RutQuery {
    pub rut: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WorkerLookupResponse {
    #[schema(example = "Operador")]
    pub rol: Option<String>,
    #[schema(example = "Juan Pérez")]
    pub nombre: Option<String>,
    #[schema(example = "Obrero")]
    pub cargo: Option<String>,
}

impl From<WorkerLookup> for WorkerLookupResponse {
    fn from(lookup: WorkerLookup) -> Self {
        Self {
            rol: lookup.role,
            nombre: lookup.name,
            cargo: lookup.position,
        }
    }
}
