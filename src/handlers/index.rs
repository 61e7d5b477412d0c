// src/handlers/index.rs

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{auth::AuthenticatedUser, rbac::UPLOADER_ROLE},
    views::IndexView,
};

// GET /  (página de carga + listas de trabajadores e actividades)
pub async fn index(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let workers = app_state.catalog_service.list_workers().await?;
    let activities = app_state.catalog_service.list_activities().await?;

    let (jar, flash) = app_state.sessions.take_flash(jar);
    let view = IndexView {
        flash,
        is_uploader: user.role == UPLOADER_ROLE,
        username: user.username,
        role: user.role,
        tipo: "trabajadores",
        workers,
        activities,
    };

    Ok((jar, app_state.templates.render("index", &view)?).into_response())
}
