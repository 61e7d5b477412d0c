// src/importer.rs

//! Carga de planilhas: arquivo -> linhas cruas -> campos limpos -> registros.
//!
//! Nada aqui toca o banco. O lote inteiro é montado (ou rejeitado) antes de
//! qualquer INSERT; a transação fica com o `ImportService`.

pub mod cleaning;
pub mod mapping;
pub mod sheet;

use thiserror::Error;

use crate::models::{activities::NewActivity, workers::NewWorker};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("No se pudo leer el archivo: {0}")]
    Unreadable(String),

    #[error("El archivo no contiene hojas")]
    NoWorksheet,

    #[error("El archivo no contiene encabezados")]
    MissingHeader,

    #[error("Faltan columnas requeridas: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Fila {row}: la columna {column} está vacía")]
    MissingValue { row: usize, column: &'static str },
}

/// O que o campo `tipo` do upload seleciona.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    Workers,
    Activities,
}

impl ImportKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "trabajadores" | "workers" => Some(Self::Workers),
            "actividades" | "activities" => Some(Self::Activities),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportBatch {
    Workers(Vec<NewWorker>),
    Activities(Vec<NewActivity>),
}

impl ImportBatch {
    pub fn len(&self) -> usize {
        match self {
            ImportBatch::Workers(rows) => rows.len(),
            ImportBatch::Activities(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Lê o arquivo enviado e converte todas as linhas no tipo pedido.
pub fn parse_upload(kind: ImportKind, filename: &str, bytes: &[u8]) -> Result<ImportBatch, ImportError> {
    let sheet = sheet::read_sheet(filename, bytes)?;

    match kind {
        ImportKind::Workers => Ok(ImportBatch::Workers(mapping::map_rows(&sheet)?)),
        ImportKind::Activities => Ok(ImportBatch::Activities(mapping::map_rows(&sheet)?)),
    }
}
