//! Credential strategies
//!
//! A request proves its identity either with a username/password pair
//! (login) or with a bearer token issued by an earlier login. Both resolve
//! to a live user record through [`Authenticator::resolve`].

use super::jwt::JwtService;
use super::password::PasswordService;
use crate::error::ApiError;
use crate::repositories::{UserRecord, UserRepository};
use myflix_shared::AuthError;
use tracing::{debug, info};

/// Proof of identity presented by a client
#[derive(Debug, Clone)]
pub enum Credential {
    Password { username: String, password: String },
    Bearer(String),
}

impl Credential {
    /// Parse an `Authorization` header value as a bearer credential
    pub fn from_authorization_header(value: Option<&str>) -> Result<Self, AuthError> {
        let value = value.ok_or(AuthError::MissingToken)?;
        let token = value
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::MalformedHeader)?;
        Ok(Credential::Bearer(token.to_string()))
    }
}

/// Resolves credentials against the credential store
pub struct Authenticator<'a> {
    users: &'a dyn UserRepository,
    jwt: &'a JwtService,
}

impl<'a> Authenticator<'a> {
    pub fn new(users: &'a dyn UserRepository, jwt: &'a JwtService) -> Self {
        Self { users, jwt }
    }

    /// Resolve a credential to the user it proves, or fail
    ///
    /// Authentication failures come back as [`ApiError::Unauthorized`];
    /// store failures as [`ApiError::Internal`].
    pub async fn resolve(&self, credential: Credential) -> Result<UserRecord, ApiError> {
        match credential {
            Credential::Password { username, password } => {
                self.check_password(&username, password).await
            }
            Credential::Bearer(token) => self.check_token(&token).await,
        }
    }

    async fn check_password(&self, username: &str, password: String) -> Result<UserRecord, ApiError> {
        let Some(user) = self.users.find_by_username(username).await? else {
            info!(%username, "Login failed: unknown username");
            return Err(AuthError::InvalidCredentials.into());
        };

        let valid = PasswordService::verify_async(password, user.password_hash.clone()).await?;
        if !valid {
            info!(%username, "Login failed: password mismatch");
            return Err(AuthError::InvalidCredentials.into());
        }

        Ok(user)
    }

    async fn check_token(&self, token: &str) -> Result<UserRecord, ApiError> {
        let claims = self.jwt.verify(token)?;
        let user_id = claims.user_id()?;

        match self.users.find_by_id(user_id).await? {
            Some(user) => Ok(user),
            None => {
                debug!(%user_id, "Token subject no longer exists");
                Err(AuthError::UnknownSubject.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{InMemoryStore, NewUser};

    async fn store_with_alice() -> InMemoryStore {
        let store = InMemoryStore::new();
        store
            .create(NewUser {
                username: "alice1".to_string(),
                password_hash: PasswordService::hash("popcorn42").unwrap(),
                email: "alice@example.com".to_string(),
                birthday: None,
            })
            .await
            .unwrap();
        store
    }

    fn password(username: &str, password: &str) -> Credential {
        Credential::Password {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    fn assert_auth_error(result: Result<UserRecord, ApiError>, expected: AuthError) {
        match result {
            Err(ApiError::Unauthorized(reason)) => assert_eq!(reason, expected),
            other => panic!("expected {expected:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_authorization_header() {
        assert!(matches!(
            Credential::from_authorization_header(Some("Bearer abc.def.ghi")),
            Ok(Credential::Bearer(token)) if token == "abc.def.ghi"
        ));
        assert_eq!(
            Credential::from_authorization_header(None).unwrap_err(),
            AuthError::MissingToken
        );
        assert_eq!(
            Credential::from_authorization_header(Some("Basic dXNlcjpwYXNz")).unwrap_err(),
            AuthError::MalformedHeader
        );
        assert_eq!(
            Credential::from_authorization_header(Some("Bearer ")).unwrap_err(),
            AuthError::MalformedHeader
        );
    }

    #[tokio::test]
    async fn test_password_credential_resolves_user() {
        let store = store_with_alice().await;
        let jwt = JwtService::new("test-secret", 3600);
        let auth = Authenticator::new(&store, &jwt);

        let user = auth.resolve(password("alice1", "popcorn42")).await.unwrap();
        assert_eq!(user.username, "alice1");
    }

    #[tokio::test]
    async fn test_unknown_user_and_wrong_password_fail_identically() {
        let store = store_with_alice().await;
        let jwt = JwtService::new("test-secret", 3600);
        let auth = Authenticator::new(&store, &jwt);

        assert_auth_error(
            auth.resolve(password("bobby1", "popcorn42")).await,
            AuthError::InvalidCredentials,
        );
        assert_auth_error(
            auth.resolve(password("alice1", "wrong")).await,
            AuthError::InvalidCredentials,
        );
    }

    #[tokio::test]
    async fn test_bearer_credential_resolves_live_user() {
        let store = store_with_alice().await;
        let jwt = JwtService::new("test-secret", 3600);
        let alice = store.find_by_username("alice1").await.unwrap().unwrap();
        let token = jwt.issue(alice.id, &alice.username).unwrap();

        let auth = Authenticator::new(&store, &jwt);
        let user = auth.resolve(Credential::Bearer(token)).await.unwrap();
        assert_eq!(user.id, alice.id);
    }

    #[tokio::test]
    async fn test_bearer_for_deleted_user_fails() {
        let store = store_with_alice().await;
        let jwt = JwtService::new("test-secret", 3600);
        let alice = store.find_by_username("alice1").await.unwrap().unwrap();
        let token = jwt.issue(alice.id, &alice.username).unwrap();
        store.delete("alice1").await.unwrap();

        let auth = Authenticator::new(&store, &jwt);
        assert_auth_error(
            auth.resolve(Credential::Bearer(token)).await,
            AuthError::UnknownSubject,
        );
    }
}
