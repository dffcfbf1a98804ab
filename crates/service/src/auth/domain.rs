use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Signup input
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub password: String,
}

/// Login input
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub password: String,
}

/// Admin account as exposed to callers; carries no password material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: Uuid,
    pub name: String,
}

/// Stored credentials (hashed)
#[derive(Debug, Clone)]
pub struct Credentials {
    pub admin_id: Uuid,
    pub password_hash: String,
    pub password_algorithm: String,
}
