use sqlx::PgPool;
use crate::{common::error::AppError, models::auth::User};

// O repositório de usuários, responsável por todas as interações com a tabela 'usuarios'
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Busca exata (sensível a maiúsculas) pelo nome de usuário
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT id, username, password, rol FROM usuarios WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::DatabaseError)
    }

    // Provisionamento externo (binário provision_user)
    pub async fn create_user(
        &self,
        username: &str,
        hashed_password: &str,
        role: &str,
    ) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "INSERT INTO usuarios (username, password, rol) VALUES ($1, $2, $3) RETURNING id, username, password, rol",
        )
        .bind(username)
        .bind(hashed_password)
        .bind(role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // Converte erro de violação de chave única em um erro mais amigável
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::UsernameTaken(username.to_string());
                }
            }
            AppError::DatabaseError(e)
        })
    }
}
