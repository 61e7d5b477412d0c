// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    common::{
        error::AppError,
        session::{FlashLevel, SessionUser},
    },
    config::AppState,
    middleware::rbac::{authorize, Access},
};

/// Estado do guard: o AppState mais o conjunto de papéis exigido (se houver).
#[derive(Clone)]
pub struct GuardState {
    app_state: AppState,
    roles: Option<&'static [&'static str]>,
}

impl GuardState {
    /// Só exige sessão.
    pub fn authenticated(app_state: AppState) -> Self {
        Self { app_state, roles: None }
    }

    /// Exige sessão e um dos papéis.
    pub fn with_roles(app_state: AppState, roles: &'static [&'static str]) -> Self {
        Self { app_state, roles: Some(roles) }
    }
}

// Guard das páginas: falha sempre vira redirect com aviso
pub async fn page_guard(
    State(guard): State<GuardState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let sessions = &guard.app_state.sessions;
    let principal = sessions.read_session(&jar);

    match authorize(principal.as_ref(), guard.roles) {
        Access::Granted => {
            if let Some(user) = principal {
                request.extensions_mut().insert(user);
            }
            next.run(request).await
        }
        Access::Unauthenticated => {
            let jar = sessions.push_flash(jar, FlashLevel::Warning, "Debes iniciar sesión");
            (jar, Redirect::to("/login")).into_response()
        }
        Access::Forbidden => {
            tracing::warn!(path = %request.uri().path(), "Acesso negado por papel");
            let jar = sessions.push_flash(jar, FlashLevel::Danger, "No tienes permiso");
            (jar, Redirect::to("/")).into_response()
        }
    }
}

// Guard das rotas JSON: falha vira {"error": ...} com 401
pub async fn api_guard(
    State(app_state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = app_state
        .sessions
        .read_session(&jar)
        .ok_or(AppError::Unauthenticated)?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

// Extrator para obter o usuário autenticado diretamente nos handlers
pub struct AuthenticatedUser(pub SessionUser);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionUser>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or(AppError::Unauthenticated)
    }
}
