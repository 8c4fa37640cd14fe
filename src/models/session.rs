use crate::models::role::UserRole;
use rocket::serde::{Deserialize, Serialize};
use schemars::JsonSchema;

/// Identity carried inside a session token. Immutable once issued.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct SessionPayload {
    pub user_id: String,
    pub email: String,
    pub role: UserRole,
}

#[derive(Serialize, Debug, JsonSchema)]
pub struct SessionResponse {
    pub user: SessionPayload,
}
