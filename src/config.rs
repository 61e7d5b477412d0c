// src/config.rs

use anyhow::{anyhow, bail, Context};
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    PgPool,
};
use std::{env, str::FromStr, time::Duration};

use crate::{
    common::session::SessionKeys,
    db::{ActivityRepository, ReportRepository, UserRepository, WorkerRepository},
    services::{
        auth::AuthService, catalog_service::CatalogService, import_service::ImportService,
        report_service::ReportService,
    },
    views::Templates,
};

/// Configuração lida do ambiente (e do .env, se existir).
#[derive(Debug, Clone)]
pub struct Config {
    pub database: PgConnectOptions,
    pub secret_key: String,
    pub bind_addr: String,
    pub session_ttl_hours: i64,
    pub max_connections: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// DATABASE_URL tem prioridade; sem ela, a conexão é montada a partir das
    /// variáveis POSTGRES_*.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let required = |key: &str| var(key).ok_or_else(|| anyhow!("{key} deve ser definida"));

        let secret_key = required("SECRET_KEY")?;

        let database = match var("DATABASE_URL") {
            Some(url) => PgConnectOptions::from_str(&url).context("DATABASE_URL inválida")?,
            None => PgConnectOptions::new()
                .host(&required("POSTGRES_HOST")?)
                .port(parse_or(var("POSTGRES_PORT"), 5432, "POSTGRES_PORT")?)
                .username(&required("POSTGRES_USER")?)
                .password(&required("POSTGRES_PASSWORD")?)
                .database(&required("POSTGRES_DB")?),
        };

        Ok(Self {
            database,
            secret_key,
            bind_addr: var("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:5000".to_string()),
            session_ttl_hours: parse_session_ttl(var("SESSION_TTL_HOURS"))?,
            max_connections: parse_or(var("DB_MAX_CONNECTIONS"), 5, "DB_MAX_CONNECTIONS")?,
        })
    }
}

fn parse_or<T>(raw: Option<String>, default: T, key: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{key} inválida: '{value}'")),
    }
}

/// Validade da sessão em horas: de 1 hora a 1 ano.
pub const SESSION_TTL_RANGE: std::ops::RangeInclusive<i64> = 1..=8760;

fn parse_session_ttl(raw: Option<String>) -> anyhow::Result<i64> {
    let hours = parse_or(raw, 8, "SESSION_TTL_HOURS")?;
    if !SESSION_TTL_RANGE.contains(&hours) {
        bail!(
            "SESSION_TTL_HOURS fora do intervalo {}..={}: {hours}",
            SESSION_TTL_RANGE.start(),
            SESSION_TTL_RANGE.end()
        );
    }
    Ok(hours)
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub sessions: SessionKeys,
    pub templates: Templates,
    pub auth_service: AuthService,
    pub catalog_service: CatalogService,
    pub import_service: ImportService,
    pub report_service: ReportService,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect_with(config.database.clone())
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Self::with_pool(db_pool, config)
    }

    // --- Monta o gráfico de dependências ---
    pub fn with_pool(db_pool: PgPool, config: &Config) -> anyhow::Result<Self> {
        let user_repo = UserRepository::new(db_pool.clone());
        let worker_repo = WorkerRepository::new(db_pool.clone());
        let activity_repo = ActivityRepository::new(db_pool.clone());
        let report_repo = ReportRepository::new(db_pool.clone());

        let templates = Templates::new().context("Falha ao registrar os templates")?;

        Ok(Self {
            sessions: SessionKeys::new(&config.secret_key, config.session_ttl_hours),
            templates,
            auth_service: AuthService::new(user_repo),
            catalog_service: CatalogService::new(worker_repo.clone(), activity_repo.clone()),
            import_service: ImportService::new(db_pool.clone(), worker_repo, activity_repo),
            report_service: ReportService::new(db_pool.clone(), report_repo),
            db_pool,
        })
    }
}
