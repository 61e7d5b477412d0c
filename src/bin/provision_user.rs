// src/bin/provision_user.rs
//
// Provisionamento externo de usuários: provision_user <username> <password> <rol>

use anyhow::{bail, Context};
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

use registro_faena::{config::Config, db::UserRepository, services::auth::AuthService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).compact().init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [username, password, role] = args.as_slice() else {
        bail!("uso: provision_user <username> <password> <rol>");
    };

    let config = Config::from_env()?;
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(3))
        .connect_with(config.database.clone())
        .await
        .context("Falha ao conectar ao banco de dados")?;

    let auth_service = AuthService::new(UserRepository::new(pool));
    let user = auth_service
        .provision_user(username, password, role)
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    tracing::info!(id = user.id, username = %user.username, role = %user.role, "✅ Usuário criado");
    Ok(())
}
