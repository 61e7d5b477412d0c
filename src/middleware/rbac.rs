// src/middleware/rbac.rs

use crate::common::session::SessionUser;

/// Papel que pode carregar planilhas e criar informes.
pub const UPLOADER_ROLE: &str = "uploader";

pub const UPLOADER_ONLY: &[&str] = &[UPLOADER_ROLE];

/// Resultado da checagem, na ordem: autenticação, depois papel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    Unauthenticated,
    Forbidden,
}

pub fn authorize(principal: Option<&SessionUser>, required_roles: Option<&[&str]>) -> Access {
    let Some(user) = principal else {
        return Access::Unauthenticated;
    };

    match required_roles {
        Some(roles) if !roles.contains(&user.role.as_str()) => Access::Forbidden,
        _ => Access::Granted,
    }
}
