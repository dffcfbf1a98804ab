use std::sync::Arc;

use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use once_cell::sync::Lazy;
use rand::rngs::OsRng;
use tracing::{info, debug, instrument};

use super::domain::{AdminUser, LoginInput, SignupInput};
use super::errors::AuthError;
use super::repository::AdminRepository;

pub const PASSWORD_ALGORITHM: &str = "argon2";

/// Hash verified against when the name is unknown, so a miss costs as much as a wrong password.
static DUMMY_HASH: Lazy<Option<String>> = Lazy::new(|| {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(b"bike-repair-unknown-admin", &salt)
        .map(|h| h.to_string())
        .ok()
});

fn verify_against_dummy(password: &str) {
    if let Some(parsed) = DUMMY_HASH.as_deref().and_then(|h| PasswordHash::new(h).ok()) {
        let _ = Argon2::default().verify_password(password.as_bytes(), &parsed);
    }
}

/// Admin auth service independent of web framework
pub struct AuthService<R: AdminRepository> {
    repo: Arc<R>,
}

impl<R: AdminRepository> AuthService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Create an admin account with a salted argon2 hash.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, repository::mock::MockAdminRepository, domain::SignupInput};
    /// use std::sync::Arc;
    /// let svc = AuthService::new(Arc::new(MockAdminRepository::default()));
    /// let input = SignupInput { name: "workshop".into(), password: "Secret123".into() };
    /// let admin = tokio_test::block_on(svc.signup(input)).unwrap();
    /// assert_eq!(admin.name, "workshop");
    /// ```
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn signup(&self, input: SignupInput) -> Result<AdminUser, AuthError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(AuthError::Validation("name is required".into()));
        }
        if input.password.is_empty() {
            return Err(AuthError::Validation("password is required".into()));
        }
        if let Some((existing, _)) = self.repo.find_by_name(name).await? {
            debug!("admin exists: {}", existing.name);
            return Err(AuthError::Conflict);
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(input.password.as_bytes(), &salt)
            .map_err(|e| AuthError::HashError(e.to_string()))?
            .to_string();

        let admin = self.repo.create_admin(name, hash, PASSWORD_ALGORITHM).await?;
        info!(admin_id = %admin.id, name = %admin.name, "admin_registered");
        Ok(admin)
    }

    /// Check a name/password pair. Every kind of mismatch is `Unauthorized`.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, repository::mock::MockAdminRepository};
    /// use service::auth::domain::{SignupInput, LoginInput};
    /// use std::sync::Arc;
    /// let svc = AuthService::new(Arc::new(MockAdminRepository::default()));
    /// let _ = tokio_test::block_on(svc.signup(SignupInput { name: "workshop".into(), password: "Passw0rd".into() }));
    /// let admin = tokio_test::block_on(svc.login(LoginInput { name: "workshop".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(admin.name, "workshop");
    /// assert!(tokio_test::block_on(svc.login(LoginInput { name: "workshop".into(), password: "nope".into() })).is_err());
    /// ```
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn login(&self, input: LoginInput) -> Result<AdminUser, AuthError> {
        if input.name.trim().is_empty() || input.password.is_empty() {
            return Err(AuthError::Unauthorized);
        }
        let Some((admin, creds)) = self.repo.find_by_name(input.name.trim()).await? else {
            verify_against_dummy(&input.password);
            debug!("unknown admin");
            return Err(AuthError::Unauthorized);
        };

        let parsed = PasswordHash::new(&creds.password_hash).map_err(|e| AuthError::HashError(e.to_string()))?;
        if Argon2::default().verify_password(input.password.as_bytes(), &parsed).is_err() {
            debug!(admin_id = %admin.id, "password mismatch");
            return Err(AuthError::Unauthorized);
        }
        info!(admin_id = %admin.id, "admin_logged_in");
        Ok(admin)
    }
}
