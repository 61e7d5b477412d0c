// src/models/reports.rs

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::{postgres::PgRow, FromRow, Row};
use validator::Validate;

use crate::common::error::AppError;

/// Quantidade de colunas diárias de horas do informe (dia_1 .. dia_15).
pub const DAY_SLOTS: usize = 15;

// Limite por dia para uma coluna de horas
const MAX_DAILY_HOURS: i32 = 24;

/// Nome da coluna/campo do dia `slot` (começando em 1).
pub fn day_column(slot: usize) -> String {
    format!("dia_{slot}")
}

// Tabela 'informe_mod'
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyHourReport {
    pub id: i32,
    pub responsible: String,
    pub date: NaiveDate,
    pub number: Option<String>,
    pub role: Option<String>,
    pub rut: String,
    pub name: String,
    pub position: Option<String>,
    pub hours: [Option<i32>; DAY_SLOTS],
    pub total_hours: Option<i32>,
    pub notes: Option<String>,
}

// As 15 colunas diárias viram um array, então o FromRow é manual.
impl<'r> FromRow<'r, PgRow> for MonthlyHourReport {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let mut hours = [None; DAY_SLOTS];
        for (index, slot) in hours.iter_mut().enumerate() {
            *slot = row.try_get(day_column(index + 1).as_str())?;
        }

        Ok(Self {
            id: row.try_get("id")?,
            responsible: row.try_get("responsable")?,
            date: row.try_get("fecha")?,
            number: row.try_get("numero")?,
            role: row.try_get("rol")?,
            rut: row.try_get("rut")?,
            name: row.try_get("nombre")?,
            position: row.try_get("cargo")?,
            hours,
            total_hours: row.try_get("total_horas")?,
            notes: row.try_get("observaciones")?,
        })
    }
}

// Linha nova vinda do formulário manual
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct NewReport {
    #[validate(length(min = 1, message = "El responsable es obligatorio"))]
    pub responsible: String,

    pub date: NaiveDate,
    pub number: Option<String>,
    pub role: Option<String>,

    #[validate(length(min = 1, message = "El RUT es obligatorio"))]
    pub rut: String,

    #[validate(length(min = 1, message = "El nombre es obligatorio"))]
    pub name: String,

    pub position: Option<String>,
    pub hours: [Option<i32>; DAY_SLOTS],

    #[validate(range(min = 0, message = "El total de horas no puede ser negativo"))]
    pub total_hours: Option<i32>,

    pub notes: Option<String>,
}

impl NewReport {
    /// Monta o informe a partir do formulário plano (nome do campo -> valor).
    /// Horas vazias ficam ausentes; texto não numérico é rejeitado.
    pub fn from_form(fields: &HashMap<String, String>) -> Result<Self, AppError> {
        let text = |key: &str| fields.get(key).map(|v| v.trim().to_string()).unwrap_or_default();
        let optional = |key: &str| Some(text(key)).filter(|v| !v.is_empty());

        let raw_date = text("fecha");
        if raw_date.is_empty() {
            return Err(AppError::InvalidField("La fecha es obligatoria".into()));
        }
        let date = NaiveDate::parse_from_str(&raw_date, "%Y-%m-%d").map_err(|_| {
            AppError::InvalidField(format!("La fecha '{raw_date}' debe tener el formato AAAA-MM-DD"))
        })?;

        let mut hours = [None; DAY_SLOTS];
        for (index, slot) in hours.iter_mut().enumerate() {
            let field = day_column(index + 1);
            *slot = parse_hours(&field, &text(&field), Some(MAX_DAILY_HOURS))?;
        }

        let report = Self {
            responsible: text("responsable"),
            date,
            number: optional("numero"),
            role: optional("rol"),
            rut: text("rut"),
            name: text("nombre"),
            position: optional("cargo"),
            hours,
            total_hours: parse_hours("total_horas", &text("total_horas"), None)?,
            notes: optional("observaciones"),
        };

        report.validate()?;
        Ok(report)
    }
}

fn parse_hours(field: &str, raw: &str, max: Option<i32>) -> Result<Option<i32>, AppError> {
    if raw.is_empty() {
        return Ok(None);
    }

    let value: i32 = raw.parse().map_err(|_| {
        AppError::InvalidField(format!("El campo {field} debe ser un número entero (recibido '{raw}')"))
    })?;

    if value < 0 || max.is_some_and(|max| value > max) {
        return Err(AppError::InvalidField(format!(
            "El campo {field} está fuera de rango ({value})"
        )));
    }

    Ok(Some(value))
}
