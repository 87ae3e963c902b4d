//! User repository

use crate::domain::{CreateUserInput, UpdateUserInput, User};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user. `input.password` is ignored in favour of `password_hash`.
    async fn create(&self, input: &CreateUserInput, password_hash: &str) -> Result<User>;
    async fn find_by_id(&self, id: i64) -> Result<Option<User>>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;
    async fn find_by_token(&self, token: &str) -> Result<Option<User>>;
    /// Apply the present fields. `input.password`, when set, is already hashed.
    async fn update(&self, id: i64, input: &UpdateUserInput) -> Result<User>;
    async fn set_token(&self, id: i64, token: Option<String>) -> Result<()>;
    async fn delete(&self, id: i64) -> Result<()>;
}

pub struct UserRepositoryImpl {
    pool: MySqlPool,
}

impl UserRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn create(&self, input: &CreateUserInput, password_hash: &str) -> Result<User> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (username, name, password, token, created_at, updated_at)
            VALUES (?, ?, ?, NULL, NOW(), NOW())
            "#,
        )
        .bind(&input.username)
        .bind(&input.name)
        .bind(password_hash)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_id() as i64;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create user")))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, name, password, token, created_at, updated_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, name, password, token, created_at, updated_at
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, name, password, token, created_at, updated_at
            FROM users
            WHERE token = ?
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn update(&self, id: i64, input: &UpdateUserInput) -> Result<User> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))?;

        let name = input.name.as_ref().unwrap_or(&existing.name);
        let password = input.password.as_ref().unwrap_or(&existing.password);

        sqlx::query(
            r#"
            UPDATE users
            SET name = ?, password = ?, updated_at = NOW()
            WHERE id = ?
            "#,
        )
        .bind(name)
        .bind(password)
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to update user")))
    }

    async fn set_token(&self, id: i64, token: Option<String>) -> Result<()> {
        // rows_affected is 0 when the value is unchanged, so it is not checked here
        sqlx::query(
            r#"
            UPDATE users
            SET token = ?, updated_at = NOW()
            WHERE id = ?
            "#,
        )
        .bind(token)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User {} not found", id)));
        }

        Ok(())
    }
}
