// src/db/report_repo.rs

use std::sync::LazyLock;

use sqlx::{Executor, PgPool, Postgres};
use crate::{
    common::error::AppError,
    models::reports::{day_column, MonthlyHourReport, NewReport, DAY_SLOTS},
};

// $1..$7 = cabeçalho, depois uma coluna por dia, depois total e observações
static INSERT_REPORT_SQL: LazyLock<String> = LazyLock::new(|| {
    let days: Vec<String> = (1..=DAY_SLOTS).map(day_column).collect();
    let placeholders: Vec<String> = (8..8 + DAY_SLOTS).map(|i| format!("${i}")).collect();

    format!(
        "INSERT INTO informe_mod (responsable, fecha, numero, rol, rut, nombre, cargo, {}, total_horas, observaciones) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, {}, ${}, ${}) RETURNING *",
        days.join(", "),
        placeholders.join(", "),
        8 + DAY_SLOTS,
        9 + DAY_SLOTS,
    )
});

#[derive(Clone)]
pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Mais recente primeiro
    pub async fn list_reports(&self) -> Result<Vec<MonthlyHourReport>, AppError> {
        let reports = sqlx::query_as::<_, MonthlyHourReport>("SELECT * FROM informe_mod ORDER BY id DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(reports)
    }

    pub async fn create_report<'e, E>(
        &self,
        executor: E,
        report: &NewReport,
    ) -> Result<MonthlyHourReport, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let mut query = sqlx::query_as::<_, MonthlyHourReport>(INSERT_REPORT_SQL.as_str())
            .bind(&report.responsible)
            .bind(report.date)
            .bind(report.number.as_deref())
            .bind(report.role.as_deref())
            .bind(&report.rut)
            .bind(&report.name)
            .bind(report.position.as_deref());

        for hours in report.hours {
            query = query.bind(hours);
        }

        let created = query
            .bind(report.total_hours)
            .bind(report.notes.as_deref())
            .fetch_one(executor)
            .await?;
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_statement_has_one_placeholder_per_column() {
        let sql = INSERT_REPORT_SQL.as_str();

        assert!(sql.contains("dia_1, dia_2"));
        assert!(sql.contains("dia_15, total_horas"));
        assert!(sql.contains("$22, $23, $24)"));
        assert!(!sql.contains("$25"));
    }
}
