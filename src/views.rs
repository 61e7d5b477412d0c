// src/views.rs

use std::{collections::HashMap, sync::Arc};

use axum::response::Html;
use handlebars::{Handlebars, TemplateError};
use serde::Serialize;

use crate::{
    common::{error::AppError, session::Flash},
    models::{
        activities::Activity,
        reports::{day_column, MonthlyHourReport, DAY_SLOTS},
        workers::Worker,
    },
};

// Templates embutidos no binário
const TEMPLATES: &[(&str, &str)] = &[
    ("login", include_str!("../templates/login.hbs")),
    ("index", include_str!("../templates/index.hbs")),
    ("informes", include_str!("../templates/informes.hbs")),
    ("informe_nuevo", include_str!("../templates/informe_nuevo.hbs")),
];

#[derive(Clone)]
pub struct Templates {
    registry: Arc<Handlebars<'static>>,
}

impl Templates {
    pub fn new() -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        registry.register_partial("layout", include_str!("../templates/layout.hbs"))?;
        for (name, source) in TEMPLATES {
            registry.register_template_string(name, source)?;
        }

        Ok(Self { registry: Arc::new(registry) })
    }

    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<Html<String>, AppError> {
        Ok(Html(self.registry.render(name, data)?))
    }
}

// ---
// Contextos de cada página
// ---

#[derive(Debug, Default, Serialize)]
pub struct LoginView {
    pub flash: Option<Flash>,
    pub form_username: String,
}

#[derive(Debug, Serialize)]
pub struct IndexView {
    pub flash: Option<Flash>,
    pub username: String,
    pub role: String,
    pub is_uploader: bool,
    pub tipo: &'static str,
    pub workers: Vec<Worker>,
    pub activities: Vec<Activity>,
}

#[derive(Debug, Serialize)]
pub struct ReportListView {
    pub flash: Option<Flash>,
    pub username: String,
    pub role: String,
    pub can_create: bool,
    pub day_slots: Vec<usize>,
    pub reports: Vec<MonthlyHourReport>,
}

#[derive(Debug, Serialize)]
pub struct DayField {
    pub slot: usize,
    pub field: String,
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct ReportFormView {
    pub flash: Option<Flash>,
    pub username: String,
    pub role: String,
    pub values: HashMap<String, String>,
    pub days: Vec<DayField>,
}

impl ReportFormView {
    /// Formulário (re)preenchido com o que o usuário enviou.
    pub fn new(flash: Option<Flash>, username: String, role: String, values: HashMap<String, String>) -> Self {
        let days = (1..=DAY_SLOTS)
            .map(|slot| {
                let field = day_column(slot);
                let value = values.get(&field).cloned().unwrap_or_default();
                DayField { slot, field, value }
            })
            .collect();

        Self { flash, username, role, values, days }
    }
}
