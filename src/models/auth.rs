// src/models/auth.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

// Representa um usuário vindo da tabela 'usuarios'
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    #[sqlx(rename = "password")]
    pub password_hash: String,

    #[sqlx(rename = "rol")]
    pub role: String,
}

// Dados do formulário de login
#[derive(Debug, Default, Deserialize, Validate)]
pub struct LoginForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "El usuario es obligatorio"))]
    pub username: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "La contraseña es obligatoria"))]
    pub password: String,
}
