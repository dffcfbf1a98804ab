use async_trait::async_trait;

use super::domain::{AdminUser, Credentials};
use super::errors::AuthError;

/// Repository abstraction for admin persistence.
#[async_trait]
pub trait AdminRepository: Send + Sync {
    async fn find_by_name(&self, name: &str) -> Result<Option<(AdminUser, Credentials)>, AuthError>;
    async fn create_admin(&self, name: &str, password_hash: String, password_algorithm: &str) -> Result<AdminUser, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use uuid::Uuid;

    #[derive(Default)]
    pub struct MockAdminRepository {
        admins: Mutex<HashMap<String, (AdminUser, Credentials)>>, // key: name
    }

    fn poisoned<T>(_: T) -> AuthError { AuthError::Repository("mock store lock poisoned".into()) }

    #[async_trait]
    impl AdminRepository for MockAdminRepository {
        async fn find_by_name(&self, name: &str) -> Result<Option<(AdminUser, Credentials)>, AuthError> {
            let admins = self.admins.lock().map_err(poisoned)?;
            Ok(admins.get(name).cloned())
        }

        async fn create_admin(&self, name: &str, password_hash: String, password_algorithm: &str) -> Result<AdminUser, AuthError> {
            let mut admins = self.admins.lock().map_err(poisoned)?;
            if admins.contains_key(name) {
                return Err(AuthError::Conflict);
            }
            let user = AdminUser { id: Uuid::new_v4(), name: name.to_string() };
            let creds = Credentials { admin_id: user.id, password_hash, password_algorithm: password_algorithm.to_string() };
            admins.insert(name.to_string(), (user.clone(), creds));
            Ok(user)
        }
    }
}
