//! User service for authentication and account management
//!
//! Every mutation is restricted to the account owner. The owner check lives
//! here rather than in the store. Check-then-write sequences (username
//! uniqueness, rename) are not transactional; a concurrent writer can still
//! trip the store's unique index, which surfaces as an internal error.

use crate::auth::{AuthUser, Authenticator, Credential, JwtService, PasswordService};
use crate::error::ApiError;
use crate::repositories::{NewUser, UserChanges, UserRecord, UserRepository};
use myflix_shared::validation::{validate_registration, validate_update};
use myflix_shared::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest, UpdateUserRequest, User};
use tracing::info;

/// User service for account operations
pub struct UserService;

impl UserService {
    /// Register a new account
    ///
    /// Field checks run first and report every failing field. The password
    /// is hashed on the blocking thread pool.
    pub async fn register(users: &dyn UserRepository, req: RegisterRequest) -> Result<User, ApiError> {
        let birthday = validate_registration(&req).map_err(ApiError::Validation)?;

        if users.username_exists(&req.username).await? {
            return Err(ApiError::AlreadyExists(format!(
                "{} already exists",
                req.username
            )));
        }

        let password_hash = PasswordService::hash_async(req.password).await?;

        let user = users
            .create(NewUser {
                username: req.username,
                password_hash,
                email: req.email,
                birthday,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user.into_public())
    }

    /// Check a username/password pair and issue a session token
    pub async fn login(
        users: &dyn UserRepository,
        jwt: &JwtService,
        req: LoginRequest,
    ) -> Result<LoginResponse, ApiError> {
        let credential = Credential::Password {
            username: req.username,
            password: req.password,
        };
        let user = Authenticator::new(users, jwt).resolve(credential).await?;

        let token = jwt.issue(user.id, &user.username)?;

        info!(user_id = %user.id, username = %user.username, "User logged in");
        Ok(LoginResponse {
            user: user.into_public(),
            token,
        })
    }

    /// Public view of the caller's own account
    pub fn get(caller: &AuthUser, username: &str) -> Result<User, ApiError> {
        caller.ensure_owner(username)?;
        Ok(caller.user.clone().into_public())
    }

    /// Change the supplied fields of the caller's account
    ///
    /// A caller other than the owner is refused before the body is looked
    /// at.
    pub async fn update(
        users: &dyn UserRepository,
        caller: &AuthUser,
        username: &str,
        req: UpdateUserRequest,
    ) -> Result<User, ApiError> {
        caller.ensure_owner(username)?;

        let birthday = validate_update(&req).map_err(ApiError::Validation)?;

        if let Some(new_name) = req.username.as_deref() {
            if new_name != username && users.username_exists(new_name).await? {
                return Err(ApiError::AlreadyExists(format!("{} already exists", new_name)));
            }
        }

        let password_hash = match req.password {
            Some(password) => Some(PasswordService::hash_async(password).await?),
            None => None,
        };

        let changes = UserChanges {
            username: req.username,
            password_hash,
            email: req.email,
            birthday,
        };

        let user = users
            .update(username, changes)
            .await?
            .ok_or_else(|| user_not_found(username))?;

        info!(user_id = %user.id, username = %user.username, "User updated");
        Ok(user.into_public())
    }

    /// Append a movie id to the caller's favorites
    ///
    /// The id is not checked against the catalog. Adding an id already in
    /// the list appends it again.
    pub async fn add_favorite(
        users: &dyn UserRepository,
        caller: &AuthUser,
        username: &str,
        movie_id: &str,
    ) -> Result<User, ApiError> {
        owned_target(users, caller, username).await?;

        let user = users
            .push_favorite(username, movie_id)
            .await?
            .ok_or_else(|| user_not_found(username))?;

        Ok(user.into_public())
    }

    /// Remove a movie id from the caller's favorites
    ///
    /// Removing an id that is not in the list succeeds and changes nothing.
    pub async fn remove_favorite(
        users: &dyn UserRepository,
        caller: &AuthUser,
        username: &str,
        movie_id: &str,
    ) -> Result<User, ApiError> {
        owned_target(users, caller, username).await?;

        let user = users
            .pull_favorite(username, movie_id)
            .await?
            .ok_or_else(|| user_not_found(username))?;

        Ok(user.into_public())
    }

    /// Delete the caller's account
    pub async fn deregister(
        users: &dyn UserRepository,
        caller: &AuthUser,
        username: &str,
    ) -> Result<MessageResponse, ApiError> {
        owned_target(users, caller, username).await?;

        let user = users
            .delete(username)
            .await?
            .ok_or_else(|| user_not_found(username))?;

        info!(user_id = %user.id, username = %user.username, "User deregistered");
        Ok(MessageResponse::new(format!("{} was deleted.", username)))
    }
}

/// Look up the target account, then check the caller owns it
///
/// The lookup comes first so that an unknown username is reported as not
/// found rather than as a permission failure.
async fn owned_target(
    users: &dyn UserRepository,
    caller: &AuthUser,
    username: &str,
) -> Result<UserRecord, ApiError> {
    let target = users
        .find_by_username(username)
        .await?
        .ok_or_else(|| user_not_found(username))?;
    caller.ensure_owner(&target.username)?;
    Ok(target)
}

fn user_not_found(username: &str) -> ApiError {
    ApiError::NotFound(format!("{} was not found", username))
}
