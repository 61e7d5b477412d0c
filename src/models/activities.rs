// src/models/activities.rs

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

// Tabela 'actividades'. Rendimento e ponderação podem faltar.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Activity {
    pub id: i32,
    #[sqlx(rename = "id_1")]
    pub external_id_1: Option<String>,
    #[sqlx(rename = "id_2")]
    pub external_id_2: Option<String>,
    #[sqlx(rename = "descripcion")]
    pub description: String,
    #[sqlx(rename = "rendimiento")]
    pub performance_rate: Option<Decimal>,
    #[sqlx(rename = "ponderacion")]
    pub weighting: Option<Decimal>,
    #[sqlx(rename = "unidad")]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewActivity {
    pub external_id_1: Option<String>,
    pub external_id_2: Option<String>,
    pub description: String,
    pub performance_rate: Option<Decimal>,
    pub weighting: Option<Decimal>,
    pub unit: Option<String>,
}
