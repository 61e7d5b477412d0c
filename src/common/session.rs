// src/common/session.rs

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::common::error::AppError;

pub const SESSION_COOKIE: &str = "session";
pub const FLASH_COOKIE: &str = "flash";

// Avisos só precisam sobreviver a um redirect.
const FLASH_TTL_MINUTES: i64 = 5;

/// O "principal" da sessão: quem está logado e com qual papel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub user_id: i32,
    pub role: String,
    pub username: String,
}

// Claims do cookie de sessão
#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    sub: i32,
    rol: String,
    username: String,
    exp: usize,
    iat: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Info,
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn new(level: FlashLevel, message: impl Into<String>) -> Self {
        Self { level, message: message.into() }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct FlashClaims {
    level: FlashLevel,
    message: String,
    exp: usize,
}

/// Chaves HS256 derivadas de SECRET_KEY. Assinam tanto a sessão quanto os avisos.
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_hours: i64,
}

impl SessionKeys {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_hours,
        }
    }

    // ---
    // Sessão
    // ---

    pub fn issue(&self, user: &SessionUser) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = expires_after(now, Duration::try_hours(self.ttl_hours))
            .ok_or_else(|| anyhow::anyhow!("Validade de sessão inválida: {} horas", self.ttl_hours))?;

        let claims = SessionClaims {
            sub: user.user_id,
            rol: user.role.clone(),
            username: user.username.clone(),
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }

    /// Token inválido, expirado ou adulterado conta como "sem sessão".
    pub fn verify(&self, token: &str) -> Option<SessionUser> {
        let data = decode::<SessionClaims>(token, &self.decoding, &Validation::new(Algorithm::HS256)).ok()?;
        Some(SessionUser {
            user_id: data.claims.sub,
            role: data.claims.rol,
            username: data.claims.username,
        })
    }

    pub fn read_session(&self, jar: &CookieJar) -> Option<SessionUser> {
        jar.get(SESSION_COOKIE).and_then(|cookie| self.verify(cookie.value()))
    }

    pub fn start_session(&self, jar: CookieJar, user: &SessionUser) -> Result<CookieJar, AppError> {
        let token = self.issue(user)?;
        Ok(jar.add(build_cookie(SESSION_COOKIE, token)))
    }

    /// Limpa sessão e avisos pendentes. Seguro sem sessão ativa.
    pub fn clear(&self, jar: CookieJar) -> CookieJar {
        jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
            .remove(Cookie::build(FLASH_COOKIE).path("/"))
    }

    // ---
    // Avisos (flash)
    // ---

    pub fn push_flash(&self, jar: CookieJar, level: FlashLevel, message: &str) -> CookieJar {
        let Some(expires_at) = expires_after(Utc::now(), Duration::try_minutes(FLASH_TTL_MINUTES)) else {
            tracing::warn!("Validade do aviso fora do intervalo");
            return jar;
        };

        let claims = FlashClaims {
            level,
            message: message.to_string(),
            exp: expires_at.timestamp() as usize,
        };

        match encode(&Header::default(), &claims, &self.encoding) {
            Ok(token) => jar.add(build_cookie(FLASH_COOKIE, token)),
            Err(e) => {
                // Um aviso perdido não deve derrubar a requisição
                tracing::warn!("Falha ao assinar aviso: {}", e);
                jar
            }
        }
    }

    /// Lê e consome o aviso pendente.
    pub fn take_flash(&self, jar: CookieJar) -> (CookieJar, Option<Flash>) {
        let Some(cookie) = jar.get(FLASH_COOKIE) else {
            return (jar, None);
        };

        let flash = decode::<FlashClaims>(cookie.value(), &self.decoding, &Validation::new(Algorithm::HS256))
            .ok()
            .map(|data| Flash::new(data.claims.level, data.claims.message));

        (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), flash)
    }
}

fn expires_after(now: DateTime<Utc>, ttl: Option<Duration>) -> Option<DateTime<Utc>> {
    now.checked_add_signed(ttl?)
}

fn build_cookie(name: &'static str, value: String) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}
