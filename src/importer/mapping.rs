// src/importer/mapping.rs

use rust_decimal::Decimal;

use super::{
    cleaning::{clean_number, clean_text},
    sheet::{Cell, Sheet, SheetRow},
    ImportError,
};
use crate::models::{activities::NewActivity, workers::NewWorker};

#[derive(Debug, Clone, PartialEq)]
pub enum Cleaned {
    Text(Option<String>),
    Number(Option<Decimal>),
}

pub type Cleaner = fn(&Cell) -> Cleaned;

fn text(cell: &Cell) -> Cleaned {
    Cleaned::Text(clean_text(cell))
}

fn number(cell: &Cell) -> Cleaned {
    Cleaned::Number(clean_number(cell))
}

/// Uma linha da tabela declarativa: cabeçalho da planilha -> campo -> limpeza.
/// `header` já está na forma normalizada (maiúsculas, sem acento).
pub struct ColumnSpec {
    pub header: &'static str,
    pub field: &'static str,
    pub clean: Cleaner,
}

pub const WORKER_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec { header: "RUT", field: "rut", clean: text },
    ColumnSpec { header: "NOMBRE", field: "name", clean: text },
    ColumnSpec { header: "CARGO", field: "position", clean: text },
];

pub const ACTIVITY_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec { header: "ID1", field: "external_id_1", clean: text },
    ColumnSpec { header: "ID2", field: "external_id_2", clean: text },
    ColumnSpec { header: "DESCRIPCION", field: "description", clean: text },
    ColumnSpec { header: "RENDIMIENTO", field: "performance_rate", clean: number },
    ColumnSpec { header: "PONDERACION", field: "weighting", clean: number },
    ColumnSpec { header: "UNIDAD", field: "unit", clean: text },
];

/// "  Descripción " -> "DESCRIPCION"
pub fn normalize_header(raw: &str) -> String {
    raw.trim()
        .to_uppercase()
        .chars()
        .map(|c| match c {
            'Á' | 'À' | 'Ä' | 'Â' => 'A',
            'É' | 'È' | 'Ë' | 'Ê' => 'E',
            'Í' | 'Ì' | 'Ï' | 'Î' => 'I',
            'Ó' | 'Ò' | 'Ö' | 'Ô' => 'O',
            'Ú' | 'Ù' | 'Ü' | 'Û' => 'U',
            other => other,
        })
        .collect()
}

/// Tabela resolvida contra os cabeçalhos reais: posição de cada coluna.
pub struct ColumnMap {
    specs: &'static [ColumnSpec],
    positions: Vec<usize>,
}

impl ColumnMap {
    /// Falha antes de ler qualquer linha se faltar algum cabeçalho da tabela.
    pub fn resolve(specs: &'static [ColumnSpec], headers: &[String]) -> Result<Self, ImportError> {
        let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();

        let mut positions = Vec::with_capacity(specs.len());
        let mut missing = Vec::new();
        for spec in specs {
            match normalized.iter().position(|h| h == spec.header) {
                Some(position) => positions.push(position),
                None => missing.push(spec.header.to_string()),
            }
        }

        if !missing.is_empty() {
            return Err(ImportError::MissingColumns(missing));
        }

        Ok(Self { specs, positions })
    }

    pub fn clean_row(&self, row: &SheetRow) -> CleanedRow {
        let fields = self
            .specs
            .iter()
            .zip(&self.positions)
            .map(|(spec, &position)| (spec, (spec.clean)(row.cell(position))))
            .collect();

        CleanedRow { line: row.line, fields }
    }
}

pub struct CleanedRow {
    pub line: usize,
    fields: Vec<(&'static ColumnSpec, Cleaned)>,
}

impl CleanedRow {
    fn get(&self, field: &str) -> Option<(&'static ColumnSpec, &Cleaned)> {
        self.fields
            .iter()
            .find(|(spec, _)| spec.field == field)
            .map(|(spec, value)| (*spec, value))
    }

    pub fn text(&self, field: &str) -> Option<String> {
        match self.get(field) {
            Some((_, Cleaned::Text(value))) => value.clone(),
            _ => None,
        }
    }

    pub fn number(&self, field: &str) -> Option<Decimal> {
        match self.get(field) {
            Some((_, Cleaned::Number(value))) => *value,
            _ => None,
        }
    }

    /// Campo obrigatório: ausente vira erro com o número da linha.
    pub fn required_text(&self, field: &str) -> Result<String, ImportError> {
        self.text(field).ok_or_else(|| ImportError::MissingValue {
            row: self.line,
            column: self.get(field).map(|(spec, _)| spec.header).unwrap_or("?"),
        })
    }
}

/// Registro que pode ser montado a partir de uma linha limpa.
pub trait FromCleanedRow: Sized {
    const COLUMNS: &'static [ColumnSpec];

    fn from_cleaned(row: &CleanedRow) -> Result<Self, ImportError>;
}

impl FromCleanedRow for NewWorker {
    const COLUMNS: &'static [ColumnSpec] = WORKER_COLUMNS;

    fn from_cleaned(row: &CleanedRow) -> Result<Self, ImportError> {
        Ok(Self {
            rut: row.required_text("rut")?,
            name: row.required_text("name")?,
            position: row.required_text("position")?,
        })
    }
}

impl FromCleanedRow for NewActivity {
    const COLUMNS: &'static [ColumnSpec] = ACTIVITY_COLUMNS;

    fn from_cleaned(row: &CleanedRow) -> Result<Self, ImportError> {
        Ok(Self {
            external_id_1: row.text("external_id_1"),
            external_id_2: row.text("external_id_2"),
            description: row.required_text("description")?,
            performance_rate: row.number("performance_rate"),
            weighting: row.number("weighting"),
            unit: row.text("unit"),
        })
    }
}

/// Linhas totalmente vazias são ignoradas; qualquer outra falha derruba o lote.
pub fn map_rows<T: FromCleanedRow>(sheet: &Sheet) -> Result<Vec<T>, ImportError> {
    let columns = ColumnMap::resolve(T::COLUMNS, &sheet.headers)?;

    sheet
        .rows
        .iter()
        .filter(|row| !row.is_blank())
        .map(|row| T::from_cleaned(&columns.clean_row(row)))
        .collect()
}
