use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("duplicate value: {0}")]
    Duplicate(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ModelError {
    /// Unique-index violations become `Duplicate`, everything else `Db`.
    pub fn from_db(err: sea_orm::DbErr, what: &str) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => Self::Duplicate(what.to_string()),
            _ => Self::Db(err.to_string()),
        }
    }
}
