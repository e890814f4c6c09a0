//! Authentication service.
//!
//! Password registration and login against the credential store, with
//! sessions managed through [`crate::middleware::session`].

mod error;

pub use error::AuthError;

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use tower_sessions::Session;

use wardrobe_core::{Email, UserId};

use crate::config::PasswordHashingConfig;
use crate::db::UserRepository;
use crate::middleware::{self, SessionToken};
use crate::models::{CurrentUser, NewUser, Profile};

/// Authentication service.
///
/// Borrowed per request from [`AppState`](crate::state::AppState).
pub struct AuthService<'a> {
    users: &'a dyn UserRepository,
    hashing: PasswordHashingConfig,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(users: &'a dyn UserRepository, hashing: PasswordHashingConfig) -> Self {
        Self { users, hashing }
    }

    /// Register a new user with email and password.
    ///
    /// Duplicate emails are accepted.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` if the email is malformed or the
    /// password is empty, `AuthError::PasswordHash` if hashing fails and
    /// `AuthError::Repository` if the store write fails.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        profile: Profile,
    ) -> Result<UserId, AuthError> {
        self.create_user(email, password, profile)
            .await
            .map(|user| user.id)
    }

    /// Register a new user and authenticate `session` as them.
    ///
    /// # Errors
    ///
    /// Same as [`register`](Self::register), plus `AuthError::Session` if the
    /// session cannot be written. The user record exists in that case.
    pub async fn register_and_login(
        &self,
        session: &Session,
        email: &str,
        password: &str,
        profile: Profile,
    ) -> Result<SessionToken, AuthError> {
        let user = self.create_user(email, password, profile).await?;
        let token = middleware::establish(session, &user).await?;

        tracing::info!(user_id = %user.id, "User logged in after registration");
        Ok(token)
    }

    async fn create_user(
        &self,
        email: &str,
        password: &str,
        profile: Profile,
    ) -> Result<CurrentUser, AuthError> {
        let email = Email::parse(email).map_err(|e| AuthError::Validation(e.to_string()))?;
        if password.is_empty() {
            return Err(AuthError::Validation("password cannot be empty".to_owned()));
        }

        let password_hash = self.hash_password(password)?;

        let id = self
            .users
            .create(&NewUser {
                email: email.clone(),
                password_hash,
                profile,
            })
            .await?;

        tracing::info!(user_id = %id, "User registered");
        Ok(CurrentUser { id, email })
    }

    /// Verify credentials and authenticate `session`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for an unknown or malformed
    /// email and for a wrong password alike. Store and session failures are
    /// reported as such.
    pub async fn login(
        &self,
        session: &Session,
        email: &str,
        password: &str,
    ) -> Result<SessionToken, AuthError> {
        let Ok(email) = Email::parse(email) else {
            self.burn_hash(password);
            return Err(AuthError::InvalidCredentials);
        };

        let Some((user, password_hash)) = self.users.find_with_password_hash(&email).await? else {
            self.burn_hash(password);
            return Err(AuthError::InvalidCredentials);
        };

        verify_password(password, &password_hash)?;

        let current = CurrentUser {
            id: user.id,
            email: user.email,
        };
        let token = middleware::establish(session, &current).await?;

        tracing::info!(user_id = %current.id, "User logged in");
        Ok(token)
    }

    /// Log out by destroying the session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Session` if the store fails to delete the session.
    pub async fn logout(&self, session: &Session) -> Result<(), AuthError> {
        middleware::destroy(session).await?;
        Ok(())
    }

    fn hasher(&self) -> Result<Argon2<'static>, AuthError> {
        let params = Params::new(
            self.hashing.memory_kib,
            self.hashing.iterations,
            self.hashing.parallelism,
            None,
        )
        .map_err(|e| {
            tracing::error!(error = %e, "Invalid password hashing parameters");
            AuthError::PasswordHash
        })?;

        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }

    /// Hash a password using Argon2id with a fresh salt.
    fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        self.hasher()?
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|_| AuthError::PasswordHash)
    }

    /// Spend the same work as a real verification when there is no user.
    fn burn_hash(&self, password: &str) {
        let _ = self.hash_password(password);
    }
}

/// Verify a password against a stored PHC hash. The comparison is constant time.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;
    use crate::db::MemoryUserRepository;

    const CHEAP: PasswordHashingConfig = PasswordHashingConfig {
        memory_kib: 256,
        iterations: 1,
        parallelism: 1,
    };

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    fn profile() -> Profile {
        Profile {
            name: "Asha".to_owned(),
            city: "Pune".to_owned(),
            ..Profile::default()
        }
    }

    #[tokio::test]
    async fn test_register_stores_argon2_hash() {
        let repo = MemoryUserRepository::new();
        let auth = AuthService::new(&repo, CHEAP);

        auth.register("asha@example.com", "correct horse", profile())
            .await
            .unwrap();

        let email = Email::parse("asha@example.com").unwrap();
        let (user, hash) = repo.find_with_password_hash(&email).await.unwrap().unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("correct horse"));
        assert_eq!(user.profile.city, "Pune");
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let repo = MemoryUserRepository::new();
        let auth = AuthService::new(&repo, CHEAP);
        let id = auth
            .register("asha@example.com", "correct horse", profile())
            .await
            .unwrap();

        let session = session();
        let token = auth
            .login(&session, "asha@example.com", "correct horse")
            .await
            .unwrap();
        assert!(!token.as_str().is_empty());

        let current = middleware::current_user(&session).await.unwrap();
        assert_eq!(current.id, id);
    }

    #[tokio::test]
    async fn test_register_and_login_authenticates_session() {
        let repo = MemoryUserRepository::new();
        let auth = AuthService::new(&repo, CHEAP);
        let session = session();

        auth.register_and_login(&session, " asha@example.com ", "pw", profile())
            .await
            .unwrap();

        let current = middleware::current_user(&session).await.unwrap();
        assert_eq!(current.email.as_str(), "asha@example.com");
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_are_indistinguishable() {
        let repo = MemoryUserRepository::new();
        let auth = AuthService::new(&repo, CHEAP);
        auth.register("asha@example.com", "correct horse", profile())
            .await
            .unwrap();

        let wrong_password = auth
            .login(&session(), "asha@example.com", "battery staple")
            .await
            .unwrap_err();
        let unknown_email = auth
            .login(&session(), "nobody@example.com", "correct horse")
            .await
            .unwrap_err();
        let malformed_email = auth
            .login(&session(), "not-an-email", "correct horse")
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_email, AuthError::InvalidCredentials));
        assert!(matches!(malformed_email, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_failed_login_leaves_session_anonymous() {
        let repo = MemoryUserRepository::new();
        let auth = AuthService::new(&repo, CHEAP);
        let session = session();

        let _ = auth.login(&session, "nobody@example.com", "x").await;
        assert!(middleware::current_user(&session).await.is_none());
    }

    #[tokio::test]
    async fn test_register_validation() {
        let repo = MemoryUserRepository::new();
        let auth = AuthService::new(&repo, CHEAP);

        let bad_email = auth.register("nope", "pw", profile()).await.unwrap_err();
        assert!(matches!(bad_email, AuthError::Validation(_)));

        let empty_password = auth
            .register("asha@example.com", "", profile())
            .await
            .unwrap_err();
        assert!(matches!(empty_password, AuthError::Validation(_)));
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn test_register_surfaces_store_failure() {
        let repo = MemoryUserRepository::new();
        repo.set_unavailable(true);
        let auth = AuthService::new(&repo, CHEAP);

        let err = auth
            .register("asha@example.com", "pw", profile())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Repository(_)));
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let repo = MemoryUserRepository::new();
        let auth = AuthService::new(&repo, CHEAP);
        auth.register("asha@example.com", "pw", profile())
            .await
            .unwrap();

        let session = session();
        auth.login(&session, "asha@example.com", "pw").await.unwrap();

        auth.logout(&session).await.unwrap();
        auth.logout(&session).await.unwrap();
        assert!(middleware::current_user(&session).await.is_none());
    }
}
