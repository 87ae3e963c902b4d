//! Contact repository

use crate::domain::{Contact, ContactFilter, ContactInput};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn create(&self, user_id: i64, input: &ContactInput) -> Result<Contact>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Contact>>;
    async fn update(&self, id: i64, input: &ContactInput) -> Result<Contact>;
    async fn delete(&self, id: i64) -> Result<()>;
    /// Contacts of `user_id` matching `filter`, ordered by id
    async fn search(
        &self,
        user_id: i64,
        filter: &ContactFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Contact>>;
    async fn count(&self, user_id: i64, filter: &ContactFilter) -> Result<i64>;
    async fn list_ids_by_user(&self, user_id: i64) -> Result<Vec<i64>>;
    async fn delete_by_user(&self, user_id: i64) -> Result<u64>;
}

pub struct ContactRepositoryImpl {
    pool: MySqlPool,
}

impl ContactRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

/// Build a `LIKE` pattern matching `value` anywhere, with wildcards escaped
fn like_pattern(value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// WHERE clause for the owner's contacts matching `filter`, plus the LIKE
/// patterns to bind after `user_id`, in placeholder order
fn filter_conditions(filter: &ContactFilter) -> (String, Vec<String>) {
    let mut sql = String::from(" WHERE user_id = ?");
    let mut patterns = Vec::new();

    if let Some(name) = &filter.name {
        sql.push_str(" AND (LOWER(first_name) LIKE ? OR LOWER(last_name) LIKE ?)");
        let pattern = like_pattern(&name.to_lowercase());
        patterns.push(pattern.clone());
        patterns.push(pattern);
    }
    if let Some(email) = &filter.email {
        sql.push_str(" AND LOWER(email) LIKE ?");
        patterns.push(like_pattern(&email.to_lowercase()));
    }
    if let Some(phone) = &filter.phone {
        sql.push_str(" AND phone LIKE ?");
        patterns.push(like_pattern(phone));
    }

    (sql, patterns)
}

#[async_trait]
impl ContactRepository for ContactRepositoryImpl {
    async fn create(&self, user_id: i64, input: &ContactInput) -> Result<Contact> {
        let result = sqlx::query(
            r#"
            INSERT INTO contacts (user_id, first_name, last_name, email, phone, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, NOW(), NOW())
            "#,
        )
        .bind(user_id)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.email)
        .bind(&input.phone)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_id() as i64;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create contact")))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Contact>> {
        let contact = sqlx::query_as::<_, Contact>(
            r#"
            SELECT id, user_id, first_name, last_name, email, phone, created_at, updated_at
            FROM contacts
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(contact)
    }

    async fn update(&self, id: i64, input: &ContactInput) -> Result<Contact> {
        sqlx::query(
            r#"
            UPDATE contacts
            SET first_name = ?, last_name = ?, email = ?, phone = ?, updated_at = NOW()
            WHERE id = ?
            "#,
        )
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Contact {} not found", id)))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Contact {} not found", id)));
        }

        Ok(())
    }

    async fn search(
        &self,
        user_id: i64,
        filter: &ContactFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Contact>> {
        let (conditions, patterns) = filter_conditions(filter);
        let sql = format!(
            "SELECT id, user_id, first_name, last_name, email, phone, created_at, updated_at \
             FROM contacts{} ORDER BY id ASC LIMIT ? OFFSET ?",
            conditions
        );

        let mut query = sqlx::query_as::<_, Contact>(&sql).bind(user_id);
        for pattern in &patterns {
            query = query.bind(pattern);
        }
        let contacts = query
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(contacts)
    }

    async fn count(&self, user_id: i64, filter: &ContactFilter) -> Result<i64> {
        let (conditions, patterns) = filter_conditions(filter);
        let sql = format!("SELECT COUNT(*) FROM contacts{}", conditions);

        let mut query = sqlx::query_as::<_, (i64,)>(&sql).bind(user_id);
        for pattern in &patterns {
            query = query.bind(pattern);
        }

        let (count,) = query.fetch_one(&self.pool).await?;
        Ok(count)
    }

    async fn list_ids_by_user(&self, user_id: i64) -> Result<Vec<i64>> {
        let rows: Vec<(i64,)> =
            sqlx::query_as("SELECT id FROM contacts WHERE user_id = ? ORDER BY id ASC")
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    async fn delete_by_user(&self, user_id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM contacts WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
