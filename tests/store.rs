// tests/store.rs
//
// Fluxos que dependem do Postgres. Cada teste recebe um banco novo, já migrado,
// criado pelo `sqlx::test` a partir de DATABASE_URL:
//
//     DATABASE_URL=postgres://... cargo test --test store -- --ignored

mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::json;
use sqlx::PgPool;

use common::{
    body_json, body_text, cookie_pair, form_request, location, multipart, send, session_cookie,
    set_cookies, state_with, upload_request,
};
use registro_faena::{build_router, common::session::SESSION_COOKIE};

async fn worker_rows(pool: &PgPool) -> Vec<(String, String, String)> {
    sqlx::query_as("SELECT rut, nombre, cargo FROM trabajadores ORDER BY id")
        .fetch_all(pool)
        .await
        .unwrap()
}

// ---
// Login
// ---

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requer Postgres (DATABASE_URL)"]
async fn correct_password_starts_a_session_with_the_role(pool: PgPool) {
    let state = state_with(pool);
    state
        .auth_service
        .provision_user("alice", "correcta", "uploader")
        .await
        .unwrap();

    let response = send(
        build_router(state.clone()),
        form_request("/login", None, "username=alice&password=correcta"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    let cookie = cookie_pair(&response, SESSION_COOKIE).expect("cookie de sessão");

    let token = cookie.trim_start_matches(&format!("{SESSION_COOKIE}=")).to_string();
    let principal = state.sessions.verify(&token).unwrap();
    assert_eq!(principal.username, "alice");
    assert_eq!(principal.role, "uploader");

    // A sessão abre a página inicial, com o formulário de carga
    let response = send(
        build_router(state),
        Request::get("/").header(header::COOKIE, cookie).body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("/upload_excel"));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requer Postgres (DATABASE_URL)"]
async fn wrong_password_and_unknown_user_get_the_same_page(pool: PgPool) {
    let state = state_with(pool);
    state
        .auth_service
        .provision_user("alice", "correcta", "viewer")
        .await
        .unwrap();

    for body in ["username=alice&password=wrong", "username=nadie&password=correcta"] {
        let response = send(build_router(state.clone()), form_request("/login", None, body)).await;

        assert_eq!(response.status(), StatusCode::OK, "{body}");
        assert!(set_cookies(&response).iter().all(|c| !c.starts_with(&format!("{SESSION_COOKIE}="))));
        assert!(body_text(response).await.contains("Usuario o contraseña incorrectos"));
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requer Postgres (DATABASE_URL)"]
async fn usernames_are_unique(pool: PgPool) {
    let state = state_with(pool);
    state.auth_service.provision_user("alice", "a", "viewer").await.unwrap();

    let err = state.auth_service.provision_user("alice", "b", "uploader").await.unwrap_err();
    assert_eq!(err.status(), StatusCode::CONFLICT);
}

// ---
// Carga de planilhas
// ---

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requer Postgres (DATABASE_URL)"]
async fn worker_upload_persists_every_row(pool: PgPool) {
    let state = state_with(pool.clone());
    let cookie = session_cookie(&state, "uploader");

    let csv = "RUT,Nombre,Cargo\n11111111-1,Juan,Obrero\n22222222-2, Ana ,Jefa\n";
    let response = send(
        build_router(state),
        upload_request(&cookie, multipart(&[("tipo", None, "trabajadores"), ("file", Some("t.csv"), csv)])),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "message": "Archivo cargado correctamente!" }));
    assert_eq!(
        worker_rows(&pool).await,
        vec![
            ("11111111-1".into(), "Juan".into(), "Obrero".into()),
            ("22222222-2".into(), "Ana".into(), "Jefa".into()),
        ]
    );
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requer Postgres (DATABASE_URL)"]
async fn duplicate_rut_midway_leaves_nothing_behind(pool: PgPool) {
    let state = state_with(pool.clone());
    let cookie = session_cookie(&state, "uploader");

    let csv = "RUT,Nombre,Cargo\n1-9,Ana,Jefa\n2-7,Luis,Obrero\n1-9,Otra,Capataz\n";
    let response = send(
        build_router(state),
        upload_request(&cookie, multipart(&[("tipo", None, "trabajadores"), ("file", Some("t.csv"), csv)])),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_json(response).await["error"].as_str().unwrap().contains("1-9"));
    assert!(worker_rows(&pool).await.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requer Postgres (DATABASE_URL)"]
async fn rut_already_stored_rejects_the_whole_batch(pool: PgPool) {
    sqlx::query("INSERT INTO trabajadores (rut, nombre, cargo) VALUES ('2-7', 'Luis', 'Obrero')")
        .execute(&pool)
        .await
        .unwrap();

    let state = state_with(pool.clone());
    let cookie = session_cookie(&state, "uploader");
    let csv = "RUT,Nombre,Cargo\n1-9,Ana,Jefa\n2-7,Luis,Obrero\n";
    let response = send(
        build_router(state),
        upload_request(&cookie, multipart(&[("tipo", None, "trabajadores"), ("file", Some("t.csv"), csv)])),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(worker_rows(&pool).await, vec![("2-7".into(), "Luis".into(), "Obrero".into())]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requer Postgres (DATABASE_URL)"]
async fn activity_upload_cleans_numbers_to_absent(pool: PgPool) {
    let state = state_with(pool.clone());
    let cookie = session_cookie(&state, "uploader");

    let csv = "ID1,ID2,Descripción,Rendimiento,Ponderación,Unidad\nA1,,Excavar zanja,12%,abc,m3\n";
    let response = send(
        build_router(state),
        upload_request(&cookie, multipart(&[("tipo", None, "actividades"), ("file", Some("a.csv"), csv)])),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let (id_2, descripcion, rendimiento, ponderacion): (Option<String>, String, Option<Decimal>, Option<Decimal>) =
        sqlx::query_as("SELECT id_2, descripcion, rendimiento, ponderacion FROM actividades")
            .fetch_one(&pool)
            .await
            .unwrap();

    assert_eq!(id_2, None);
    assert_eq!(descripcion, "Excavar zanja");
    assert_eq!(rendimiento, Some(Decimal::from(12)));
    assert_eq!(ponderacion, None);
}

// ---
// Informes
// ---

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requer Postgres (DATABASE_URL)"]
async fn reports_are_listed_newest_first(pool: PgPool) {
    let state = state_with(pool);
    let cookie = session_cookie(&state, "uploader");

    for responsible in ["Primero", "Segundo", "Tercero"] {
        let body = format!(
            "responsable={responsible}&fecha=2025-03-01&numero=7&rut=1-9&nombre=Ana&dia_1=8&dia_15=&total_horas=8"
        );
        let response = send(build_router(state.clone()), form_request("/informe_mod/nuevo", Some(cookie.as_str()), &body)).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/informe_mod");
    }

    let reports = state.report_service.list_reports().await.unwrap();
    let ids: Vec<i32> = reports.iter().map(|report| report.id).collect();
    assert_eq!(ids.len(), 3);
    assert!(ids.windows(2).all(|pair| pair[0] > pair[1]), "{ids:?}");
    assert_eq!(reports[0].responsible, "Tercero");
    assert_eq!(reports[0].hours[0], Some(8));
    assert_eq!(reports[0].hours[14], None);

    let response = send(
        build_router(state),
        Request::get("/informe_mod").header(header::COOKIE, cookie).body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let page = body_text(response).await;
    let position = |needle: &str| page.find(needle).unwrap();
    assert!(position("Tercero") < position("Segundo"));
    assert!(position("Segundo") < position("Primero"));
}

// ---
// Busca por RUT
// ---

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requer Postgres (DATABASE_URL)"]
async fn lookup_returns_the_worker_or_not_found(pool: PgPool) {
    sqlx::query(
        "INSERT INTO trabajadores_lookup (rut, rol, nombre, cargo) VALUES ('11111111-1', 'Operador', 'Juan', 'Obrero')",
    )
    .execute(&pool)
    .await
    .unwrap();

    let state = state_with(pool);
    let cookie = session_cookie(&state, "viewer");
    let get = |uri: &str| Request::get(uri).header(header::COOKIE, &cookie).body(Body::empty()).unwrap();

    let response = send(build_router(state.clone()), get("/buscar_trabajador?rut=11111111-1")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "rol": "Operador", "nombre": "Juan", "cargo": "Obrero" })
    );

    let response = send(build_router(state.clone()), get("/buscar_trabajador?rut=99999999-9")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({ "error": "No encontrado" }));

    // Chave exata: espaços em volta não são removidos
    let response = send(build_router(state), get("/buscar_trabajador?rut=%2011111111-1")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
