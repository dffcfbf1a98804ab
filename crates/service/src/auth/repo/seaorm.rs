use models::{admin, errors::ModelError};
use sea_orm::DatabaseConnection;

use crate::auth::domain::{AdminUser, Credentials};
use crate::auth::errors::AuthError;
use crate::auth::repository::AdminRepository;

pub struct SeaOrmAdminRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmAdminRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl AdminRepository for SeaOrmAdminRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<(AdminUser, Credentials)>, AuthError> {
        let found = admin::find_by_name(&self.db, name)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(found.map(|a| {
            let creds = Credentials { admin_id: a.id, password_hash: a.password_hash, password_algorithm: a.password_algorithm };
            (AdminUser { id: a.id, name: a.name }, creds)
        }))
    }

    async fn create_admin(&self, name: &str, password_hash: String, password_algorithm: &str) -> Result<AdminUser, AuthError> {
        let created = admin::create(&self.db, name, password_hash, password_algorithm)
            .await
            .map_err(|e| match e {
                ModelError::Duplicate(_) => AuthError::Conflict,
                ModelError::Validation(msg) => AuthError::Validation(msg),
                ModelError::Db(msg) => AuthError::Repository(msg),
            })?;
        Ok(AdminUser { id: created.id, name: created.name })
    }
}
