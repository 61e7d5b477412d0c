// src/routes.rs

use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};

use crate::{
    config::AppState,
    docs, handlers,
    handlers::imports::MAX_UPLOAD_BYTES,
    middleware::{
        auth::{api_guard, page_guard, GuardState},
        rbac::UPLOADER_ONLY,
    },
};

pub fn build_router(app_state: AppState) -> Router {
    // Páginas que só exigem sessão
    let session_routes = Router::new()
        .route("/", get(handlers::index::index))
        .route("/informe_mod", get(handlers::reports::list_reports))
        .route_layer(axum_middleware::from_fn_with_state(
            GuardState::authenticated(app_state.clone()),
            page_guard,
        ));

    // Operações restritas ao papel "uploader"
    let uploader_routes = Router::new()
        .route(
            "/upload_excel",
            post(handlers::imports::upload_excel).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route(
            "/informe_mod/nuevo",
            get(handlers::reports::new_report_form).post(handlers::reports::create_report),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            GuardState::with_roles(app_state.clone(), UPLOADER_ONLY),
            page_guard,
        ));

    // JSON: sem sessão responde 401 em vez de redirecionar
    let api_routes = Router::new()
        .route("/buscar_trabajador", get(handlers::workers::buscar_trabajador))
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            api_guard,
        ));

    // Combina tudo no router principal
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api-docs/openapi.json", get(docs::openapi_json))
        .route("/login", get(handlers::auth::login_page).post(handlers::auth::login))
        .route("/logout", get(handlers::auth::logout))
        .merge(session_routes)
        .merge(uploader_routes)
        .merge(api_routes)
        .with_state(app_state)
}
