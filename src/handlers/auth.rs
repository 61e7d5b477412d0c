// src/handlers/auth.rs

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        session::{Flash, FlashLevel},
    },
    config::AppState,
    models::auth::LoginForm,
    views::LoginView,
};

// GET /login
pub async fn login_page(
    State(app_state): State<AppState>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let (jar, flash) = app_state.sessions.take_flash(jar);
    let page = app_state.templates.render("login", &LoginView { flash, ..Default::default() })?;

    Ok((jar, page).into_response())
}

// POST /login
pub async fn login(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let outcome = match form.validate() {
        Ok(()) => app_state.auth_service.login_user(&form.username, &form.password).await,
        Err(_) => Err(AppError::InvalidCredentials),
    };

    match outcome {
        Ok(user) => {
            tracing::info!(username = %user.username, role = %user.role, "🔑 Login efetuado");
            let jar = app_state.sessions.start_session(jar, &user)?;
            let jar = app_state.sessions.push_flash(jar, FlashLevel::Success, "Bienvenido!");
            Ok((jar, Redirect::to("/")).into_response())
        }
        // Mesma mensagem para usuário inexistente e senha errada
        Err(AppError::InvalidCredentials) => {
            tracing::warn!(username = %form.username, "Falha de login");
            let view = LoginView {
                flash: Some(Flash::new(FlashLevel::Danger, AppError::InvalidCredentials.to_string())),
                form_username: form.username,
            };
            Ok(app_state.templates.render("login", &view)?.into_response())
        }
        Err(e) => Err(e),
    }
}

// GET /logout
pub async fn logout(State(app_state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let jar = app_state.sessions.clear(jar);
    let jar = app_state.sessions.push_flash(jar, FlashLevel::Info, "Sesión cerrada");
    (jar, Redirect::to("/login"))
}
