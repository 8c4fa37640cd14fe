use crate::models::role::UserRole;
use chrono::{DateTime, Utc};
use rocket::serde::{Deserialize, Serialize};
use schemars::JsonSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

/// Non-sensitive user fields returned to clients.
#[derive(Serialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Login body. Both fields are optional when parsing; absence is reported by
/// validation with a per-field message.
#[derive(Deserialize, Debug, Default, Validate, JsonSchema)]
pub struct LoginRequest {
    #[validate(required(message = "Email é obrigatório"), email(message = "Email inválido"))]
    pub email: Option<String>,
    #[validate(
        required(message = "Senha é obrigatória"),
        length(min = 6, message = "Senha deve ter no mínimo 6 caracteres")
    )]
    pub password: Option<String>,
}

impl LoginRequest {
    /// Copy with the email normalized, ready for validation and lookup.
    pub fn normalized(&self) -> Self {
        Self {
            email: self.email.as_deref().map(normalize_email),
            password: self.password.clone(),
        }
    }
}

#[derive(Serialize, Debug, JsonSchema)]
pub struct LoginResponse {
    pub user: UserResponse,
}

#[derive(Deserialize, Debug, Validate, JsonSchema)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "Nome é obrigatório"))]
    pub name: String,
    #[validate(email(message = "Email inválido"))]
    pub email: String,
    #[validate(length(min = 6, message = "Senha deve ter no mínimo 6 caracteres"))]
    pub password: String,
    pub role: UserRole,
}

impl CreateUserRequest {
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: normalize_email(&self.email),
            password: self.password.clone(),
            role: self.role,
        }
    }
}

#[derive(Serialize, Debug, JsonSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Lowercases and trims an email so lookups and inserts agree.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
