//! Authentication extractor
//!
//! Protected handlers take an [`AuthUser`] argument. Extraction runs before
//! the handler body, so a request without a valid bearer token is rejected
//! with 401 and the handler never executes.

use super::strategy::{Authenticator, Credential};
use crate::error::ApiError;
use crate::repositories::UserRecord;
use crate::state::AppState;
use axum::{
    extract::FromRef,
    http::{header::AUTHORIZATION, request::Parts},
};

/// The live user behind a verified bearer token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: UserRecord,
}

impl AuthUser {
    /// Fail unless the caller is the owner of `username`
    pub fn ensure_owner(&self, username: &str) -> Result<(), ApiError> {
        if self.user.username != username {
            return Err(ApiError::PermissionDenied);
        }
        Ok(())
    }
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        let credential = Credential::from_authorization_header(header)?;

        let user = Authenticator::new(app_state.users(), app_state.jwt())
            .resolve(credential)
            .await?;

        Ok(AuthUser { user })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn auth_user(username: &str) -> AuthUser {
        AuthUser {
            user: UserRecord {
                id: Uuid::new_v4(),
                username: username.to_string(),
                password_hash: String::new(),
                email: format!("{username}@example.com"),
                birthday: None,
                favorite_movies: Vec::new(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
        }
    }

    #[test]
    fn test_owner_check() {
        let alice = auth_user("alice1");
        assert!(alice.ensure_owner("alice1").is_ok());
        assert!(matches!(
            alice.ensure_owner("bobby1"),
            Err(ApiError::PermissionDenied)
        ));
    }
}
