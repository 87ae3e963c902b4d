//! User business logic: registration, login, token resolution and account lifecycle

use crate::domain::{CreateUserInput, LoginUserInput, UpdateUserInput, User};
use crate::error::{AppError, Result};
use crate::repository::{AddressRepository, ContactRepository, UserRepository};
use crate::service::credential;
use sqlx::MySqlPool;
use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

/// Returned for both unknown usernames and wrong passwords
const INVALID_CREDENTIALS: &str = "Username or password is wrong";

pub struct UserService<R: UserRepository, C: ContactRepository, A: AddressRepository> {
    repo: Arc<R>,
    contact_repo: Arc<C>,
    address_repo: Arc<A>,
    /// Database pool for transactional cascade deletes
    pool: Option<MySqlPool>,
}

impl<R: UserRepository, C: ContactRepository, A: AddressRepository> UserService<R, C, A> {
    pub fn new(repo: Arc<R>, contact_repo: Arc<C>, address_repo: Arc<A>) -> Self {
        Self {
            repo,
            contact_repo,
            address_repo,
            pool: None,
        }
    }

    /// Set the database pool for transactional cascade deletes
    pub fn with_pool(mut self, pool: MySqlPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub async fn register(&self, input: CreateUserInput) -> Result<User> {
        input.validate()?;

        if self.repo.find_by_username(&input.username).await?.is_some() {
            return Err(AppError::field("username", "Username already exists"));
        }

        let password_hash = credential::hash_password(&input.password)?;
        let user = self.repo.create(&input, &password_hash).await?;
        info!(user_id = user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Verify credentials and issue a fresh token, replacing any previous one
    pub async fn login(&self, input: LoginUserInput) -> Result<(User, String)> {
        input.validate()?;

        let user = self
            .repo
            .find_by_username(&input.username)
            .await?
            .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

        if !credential::verify_password(&input.password, &user.password)? {
            warn!(user_id = user.id, "Login rejected: wrong password");
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let token = credential::issue_token();
        self.repo.set_token(user.id, Some(token.clone())).await?;
        info!(user_id = user.id, "User logged in");

        Ok((
            User {
                token: Some(token.clone()),
                ..user
            },
            token,
        ))
    }

    /// Resolve a session token to its user
    pub async fn authenticate(&self, token: &str) -> Result<User> {
        if token.is_empty() {
            return Err(AppError::Unauthorized("Unauthorized".to_string()));
        }

        self.repo
            .find_by_token(token)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_string()))
    }

    pub async fn update(&self, user: &User, input: UpdateUserInput) -> Result<User> {
        input.validate()?;

        let password = match &input.password {
            Some(password) => Some(credential::hash_password(password)?),
            None => None,
        };
        let changes = UpdateUserInput {
            name: input.name,
            password,
        };

        self.repo.update(user.id, &changes).await
    }

    pub async fn logout(&self, user: &User) -> Result<()> {
        self.repo.set_token(user.id, None).await?;
        info!(user_id = user.id, "User logged out");
        Ok(())
    }

    /// Delete a user with cascade delete of all owned data.
    ///
    /// Cascade order:
    /// 1. Delete addresses of every contact owned by the user
    /// 2. Delete the user's contacts
    /// 3. Delete the user record
    ///
    /// With a database pool all three steps commit or roll back together.
    pub async fn delete(&self, user: &User) -> Result<()> {
        if let Some(ref pool) = self.pool {
            let mut tx = pool.begin().await?;

            // 1. Delete addresses of the user's contacts
            sqlx::query(
                "DELETE a FROM addresses a \
                 INNER JOIN contacts c ON a.contact_id = c.id \
                 WHERE c.user_id = ?",
            )
            .bind(user.id)
            .execute(tx.as_mut())
            .await?;

            // 2. Delete contacts
            sqlx::query("DELETE FROM contacts WHERE user_id = ?")
                .bind(user.id)
                .execute(tx.as_mut())
                .await?;

            // 3. Delete user record
            let result = sqlx::query("DELETE FROM users WHERE id = ?")
                .bind(user.id)
                .execute(tx.as_mut())
                .await?;
            if result.rows_affected() == 0 {
                return Err(AppError::NotFound(format!("User {} not found", user.id)));
            }

            tx.commit().await?;
        } else {
            // 1. Delete addresses per contact
            let contact_ids = self.contact_repo.list_ids_by_user(user.id).await?;
            for contact_id in contact_ids {
                self.address_repo.delete_by_contact(contact_id).await?;
            }

            // 2. Delete contacts
            self.contact_repo.delete_by_user(user.id).await?;

            // 3. Delete user record
            self.repo.delete(user.id).await?;
        }

        info!(user_id = user.id, "User deleted");
        Ok(())
    }
}
