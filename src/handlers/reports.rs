// src/handlers/reports.rs

use std::collections::HashMap;

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    common::{
        error::AppError,
        session::{Flash, FlashLevel},
    },
    config::AppState,
    middleware::{auth::AuthenticatedUser, rbac::UPLOADER_ROLE},
    models::reports::{NewReport, DAY_SLOTS},
    views::{ReportFormView, ReportListView},
};

// GET /informe_mod
pub async fn list_reports(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let reports = app_state.report_service.list_reports().await?;

    let (jar, flash) = app_state.sessions.take_flash(jar);
    let view = ReportListView {
        flash,
        can_create: user.role == UPLOADER_ROLE,
        username: user.username,
        role: user.role,
        day_slots: (1..=DAY_SLOTS).collect(),
        reports,
    };

    Ok((jar, app_state.templates.render("informes", &view)?).into_response())
}

// GET /informe_mod/nuevo
pub async fn new_report_form(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let (jar, flash) = app_state.sessions.take_flash(jar);
    let view = ReportFormView::new(flash, user.username, user.role, HashMap::new());

    Ok((jar, app_state.templates.render("informe_nuevo", &view)?).into_response())
}

// POST /informe_mod/nuevo
// Erros nunca escapam como 500: o formulário volta preenchido com o aviso.
pub async fn create_report(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    jar: CookieJar,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Response, AppError> {
    let result = match NewReport::from_form(&fields) {
        Ok(report) => app_state.report_service.create_report(&report).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(_) => {
            let jar = app_state
                .sessions
                .push_flash(jar, FlashLevel::Success, "Informe guardado correctamente");
            Ok((jar, Redirect::to("/informe_mod")).into_response())
        }
        Err(e) => {
            let message = if e.status().is_server_error() {
                tracing::error!(username = %user.username, "Falha ao gravar informe: {}", e);
                format!("Error al guardar el informe: {}", e.user_message())
            } else {
                e.user_message()
            };

            let view = ReportFormView::new(
                Some(Flash::new(FlashLevel::Danger, message)),
                user.username,
                user.role,
                fields,
            );
            Ok(app_state.templates.render("informe_nuevo", &view)?.into_response())
        }
    }
}
