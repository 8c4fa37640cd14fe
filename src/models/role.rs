use rocket::serde::{Deserialize, Serialize};
use schemars::JsonSchema;
use std::fmt;

/// Closed set of roles a user can hold. Stored as the `user_role` Postgres enum.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
pub enum UserRole {
    Diretor,
    Gerente,
    Supervisor,
    Analista,
    Operador,
}

impl UserRole {
    #[cfg(test)]
    pub const ALL: [UserRole; 5] = [
        UserRole::Diretor,
        UserRole::Gerente,
        UserRole::Supervisor,
        UserRole::Analista,
        UserRole::Operador,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Diretor => "DIRETOR",
            UserRole::Gerente => "GERENTE",
            UserRole::Supervisor => "SUPERVISOR",
            UserRole::Analista => "ANALISTA",
            UserRole::Operador => "OPERADOR",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
