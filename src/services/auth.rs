// src/services/auth.rs

use std::sync::LazyLock;

use bcrypt::{hash, verify};

use crate::{
    common::{error::AppError, session::SessionUser},
    db::UserRepository,
    models::auth::User,
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
}

impl AuthService {
    pub fn new(user_repo: UserRepository) -> Self {
        Self { user_repo }
    }

    pub async fn login_user(&self, username: &str, password: &str) -> Result<SessionUser, AppError> {
        let user = self.user_repo.find_by_username(username).await?;
        let password_clone = password.to_owned();

        // Executa a verificação em um thread separado
        tokio::task::spawn_blocking(move || authenticate(user, &password_clone))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))?
    }

    pub async fn provision_user(&self, username: &str, password: &str, role: &str) -> Result<User, AppError> {
        let password_clone = password.to_owned();
        let hashed_password = tokio::task::spawn_blocking(move || {
            hash(&password_clone, bcrypt::DEFAULT_COST)
        })
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))?
            ?;

        self.user_repo.create_user(username, &hashed_password, role).await
    }
}

// Hash de referência para usernames inexistentes
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash("registro-faena-sem-usuario", bcrypt::DEFAULT_COST).ok());

/// Confere a senha contra o hash bcrypt. Usuário inexistente e senha errada
/// produzem o mesmo erro.
pub fn authenticate(user: Option<User>, password: &str) -> Result<SessionUser, AppError> {
    let Some(user) = user else {
        // Mesmo custo de bcrypt que um usuário existente
        if let Some(dummy) = DUMMY_HASH.as_deref() {
            let _ = verify(password, dummy);
        }
        return Err(AppError::InvalidCredentials);
    };

    match verify(password, &user.password_hash) {
        Ok(true) => Ok(SessionUser {
            user_id: user.id,
            role: user.role,
            username: user.username,
        }),
        Ok(false) => Err(AppError::InvalidCredentials),
        Err(e) => {
            // Hash gravado em formato que não é bcrypt
            tracing::warn!(username = %user.username, "Hash de senha ilegível: {}", e);
            Err(AppError::InvalidCredentials)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(username: &str, password: &str, role: &str) -> User {
        User {
            id: 1,
            username: username.into(),
            password_hash: hash(password, 4).unwrap(),
            role: role.into(),
        }
    }

    #[test]
    fn correct_password_yields_principal_with_role() {
        let principal = authenticate(Some(stored("alice", "correcta", "uploader")), "correcta").unwrap();

        assert_eq!(
            principal,
            SessionUser {
                user_id: 1,
                role: "uploader".into(),
                username: "alice".into(),
            }
        );
    }

    #[test]
    fn wrong_password_and_unknown_user_fail_the_same_way() {
        let wrong = authenticate(Some(stored("alice", "correcta", "uploader")), "wrong").unwrap_err();
        let unknown = authenticate(None, "correcta").unwrap_err();

        assert!(matches!(wrong, AppError::InvalidCredentials));
        assert!(matches!(unknown, AppError::InvalidCredentials));
        assert_eq!(wrong.to_string(), "Usuario o contraseña incorrectos");
        assert_eq!(wrong.to_string(), unknown.to_string());
    }

    #[test]
    fn unknown_user_still_pays_for_a_real_bcrypt_check() {
        let dummy = DUMMY_HASH.as_deref().expect("hash de referência");

        assert!(dummy.starts_with("$2"));
        assert!(dummy.contains(&format!("${:02}$", bcrypt::DEFAULT_COST)));
        assert!(!verify("correcta", dummy).unwrap());
        assert!(matches!(authenticate(None, "correcta"), Err(AppError::InvalidCredentials)));
    }

    #[test]
    fn non_bcrypt_hash_is_rejected_without_panicking() {
        let mut user = stored("bob", "x", "viewer");
        user.password_hash = "pbkdf2:sha256:260000$salt$deadbeef".into();

        assert!(matches!(authenticate(Some(user), "x"), Err(AppError::InvalidCredentials)));
    }
}
